#![warn(missing_docs)]
//! Deterministic testing surfaces for prediction sessions (fixture state +
//! event capture).

mod probe;

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use probe::{reference_replay, MoveInput, ProbeState};

/// Primary event record captured by headless prediction runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Input sequence id the event refers to, if any.
    pub sequence_id: Option<u64>,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload.
    pub payload: String,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_jsonl_sink_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut sink = JsonlSink::create(&path).unwrap();
        sink.write(&EventRecord {
            sequence_id: Some(3),
            kind: "Reconciled",
            payload: "acked=2".to_string(),
        })
        .unwrap();
        sink.write(&EventRecord {
            sequence_id: None,
            kind: "SessionEnd",
            payload: String::new(),
        })
        .unwrap();
        drop(sink);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().next().unwrap().contains("Reconciled"));
    }
}
