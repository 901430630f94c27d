//! Tokenized command lines.

use std::fmt;
use std::str::FromStr;

use crate::error::MessageParseError;

/// Marker that turns the rest of a line into a single parameter.
pub const TRAILING_MARKER: char = ':';

/// One command line from a client.
///
/// The command is upper-cased; parameters keep the client's spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Upper-cased command name.
    pub command: String,
    /// Positional parameters, the trailing parameter (if any) last.
    pub params: Vec<String>,
    /// The line as received, terminator removed.
    pub raw: String,
}

impl Message {
    /// Parameter `n`, if present.
    #[inline]
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.params.get(n).map(String::as_str)
    }

    /// Parameters from `n` onward joined with single spaces.
    ///
    /// Used for free text that a client may send either as a trailing
    /// parameter or as loose words.
    pub fn text_from(&self, n: usize) -> Option<String> {
        let rest = self.params.get(n..)?;
        if rest.is_empty() {
            None
        } else {
            Some(rest.join(" "))
        }
    }

    /// Number of parameters.
    #[inline]
    pub fn arg_count(&self) -> usize {
        self.params.len()
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let raw = line.trim_end_matches(['\r', '\n']);
        let mut rest = raw.trim_start();

        let command = match rest.find(char::is_whitespace) {
            Some(end) => {
                let (head, tail) = rest.split_at(end);
                rest = tail;
                head
            }
            None => std::mem::take(&mut rest),
        };
        if command.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(TRAILING_MARKER) {
                params.push(trailing.to_string());
                break;
            }
            match rest.find(char::is_whitespace) {
                Some(end) => {
                    params.push(rest[..end].to_string());
                    rest = &rest[end..];
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Ok(Message {
            command: command.to_ascii_uppercase(),
            params,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
