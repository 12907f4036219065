//! Sighting recordings
//!
//! A recording is a JSON-lines file where each line holds one ranging cycle:
//!
//! ```text
//! {"beacons":[{"identifier":"C4:7C:8D:6A:00:01","distance":2.4,"name":"Sensor01"}]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::domain::models::BeaconSighting;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid ranging cycle on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("recording contains no ranging cycles")]
    Empty,
}

/// Beacons reported by one ranging cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangingCycle {
    #[serde(default)]
    pub beacons: Vec<BeaconSighting>,
}

#[derive(Debug, Clone)]
pub struct Recording {
    cycles: Vec<RangingCycle>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let contents = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, RecordingError> {
        let mut cycles = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cycle = serde_json::from_str(line).map_err(|source| RecordingError::Parse {
                line: index + 1,
                source,
            })?;
            cycles.push(cycle);
        }

        if cycles.is_empty() {
            return Err(RecordingError::Empty);
        }
        Ok(Self { cycles })
    }

    pub fn cycles(&self) -> &[RangingCycle] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
# two beacons walking away
{"beacons":[{"identifier":"AA","distance":1.0,"name":"Sensor01"}]}

{"beacons":[{"identifier":"AA","distance":2.0,"name":"Sensor01"},{"identifier":"BB","distance":9.5,"name":"SensorAlpha99"}]}
{"beacons":[]}
"#;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let recording = Recording::parse(SAMPLE).unwrap();
        assert_eq!(recording.len(), 3);
        assert_eq!(recording.cycles()[1].beacons.len(), 2);
        assert_eq!(
            recording.cycles()[1].beacons[1],
            BeaconSighting::new("BB", 9.5, "SensorAlpha99")
        );
        assert!(recording.cycles()[2].beacons.is_empty());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = Recording::parse("{\"beacons\":[]}\n\n{oops}\n").unwrap_err();
        match err {
            RecordingError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            Recording::parse("# nothing\n\n"),
            Err(RecordingError::Empty)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let recording = Recording::load(file.path()).unwrap();
        assert_eq!(recording.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Recording::load(&dir.path().join("missing.jsonl")).unwrap_err();
        assert!(matches!(err, RecordingError::Io { .. }));
        assert!(err.to_string().contains("missing.jsonl"));
    }
}
