//! Persisted move sequences.
//!
//! The on-disk shape is
//! `{"metadata": {"total_steps": <int>}, "movements": [<int>, ...]}`.
//! This module only converts between that shape and bytes; opening files is
//! the caller's job.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogMetadata {
    pub total_steps: usize,
}

/// An ordered walk of location indices plus its declared length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    pub metadata: MoveLogMetadata,
    pub movements: Vec<usize>,
}

impl MoveLog {
    pub fn from_walk(movements: Vec<usize>) -> Self {
        Self { metadata: MoveLogMetadata { total_steps: movements.len() }, movements }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(malformed)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(malformed)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(malformed)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self).map_err(malformed)
    }

    /// Check the declared length and that every index names one of `n` locations.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.metadata.total_steps != self.movements.len() {
            return Err(Error::LogLengthMismatch {
                declared: self.metadata.total_steps,
                actual: self.movements.len(),
            });
        }
        match self.movements.iter().find(|&&i| i >= n) {
            Some(&index) => Err(Error::IndexOutOfRange { index, len: n }),
            None => Ok(()),
        }
    }
}

fn malformed(e: serde_json::Error) -> Error {
    Error::MalformedLog(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_persisted_shape() {
        let log = MoveLog::from_json_str(
            r#"{"metadata": {"total_steps": 4}, "movements": [0, 1, 2, 0]}"#,
        )
        .unwrap();
        assert_eq!(log.movements, vec![0, 1, 2, 0]);
        assert!(log.validate(3).is_ok());
    }

    #[test]
    fn writes_the_persisted_shape() {
        let json = MoveLog::from_walk(vec![2, 1]).to_json_string().unwrap();
        assert_eq!(json, r#"{"metadata":{"total_steps":2},"movements":[2,1]}"#);
    }

    #[test]
    fn validation_catches_bad_logs() {
        let short = MoveLog { metadata: MoveLogMetadata { total_steps: 5 }, movements: vec![0, 1] };
        assert!(matches!(
            short.validate(2),
            Err(Error::LogLengthMismatch { declared: 5, actual: 2 })
        ));
        let wide = MoveLog::from_walk(vec![0, 9]);
        assert!(matches!(wide.validate(3), Err(Error::IndexOutOfRange { index: 9, len: 3 })));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(MoveLog::from_json_str("{\"movements\": [-1]}"), Err(Error::MalformedLog(_))));
    }

    #[test]
    fn writer_and_reader_agree() {
        let log = MoveLog::from_walk(vec![0, 1, 1, 2]);
        let mut buf = Vec::new();
        log.to_writer(&mut buf).unwrap();
        assert_eq!(MoveLog::from_reader(buf.as_slice()).unwrap(), log);
    }
}
