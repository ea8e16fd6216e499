use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The single message sent on a freshly opened execution channel.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub cmd: String,
    pub args: IndexMap<String, String>,
}

impl ExecutionRequest {
    pub fn new(cmd: impl Into<String>, args: IndexMap<String, String>) -> Self {
        Self {
            cmd: cmd.into(),
            args,
        }
    }

    /// Encodes the request as the JSON text frame the server expects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if serialization fails.
    pub fn to_message(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Encode)
    }
}

impl Display for ExecutionRequest {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.cmd)?;
        for (name, value) in &self.args {
            write!(formatter, " {name}={value}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_message_matches_wire_format() {
        let mut args = IndexMap::new();
        args.insert("a".to_string(), "1".to_string());
        args.insert("b".to_string(), "2".to_string());
        let request = ExecutionRequest::new("foo", args);

        assert_eq!(
            request.to_message().unwrap(),
            r#"{"cmd":"foo","args":{"a":"1","b":"2"}}"#
        );
    }

    #[test]
    fn test_to_message_keeps_insertion_order() {
        let mut args = IndexMap::new();
        args.insert("zebra".to_string(), "z".to_string());
        args.insert("apple".to_string(), "a".to_string());
        let request = ExecutionRequest::new("sort", args);

        assert_eq!(
            request.to_message().unwrap(),
            r#"{"cmd":"sort","args":{"zebra":"z","apple":"a"}}"#
        );
    }

    #[test]
    fn test_to_message_without_args() {
        let request = ExecutionRequest::new("uptime", IndexMap::new());
        assert_eq!(request.to_message().unwrap(), r#"{"cmd":"uptime","args":{}}"#);
    }

    #[test]
    fn test_display() {
        let mut args = IndexMap::new();
        args.insert("text".to_string(), "hi".to_string());
        assert_eq!(ExecutionRequest::new("echo", args).to_string(), "echo text=hi");
    }
}
