//! # relay-proto
//!
//! Wire handling for the relayd chat protocol: a line-oriented subset of IRC.
//!
//! - [`LineCodec`] frames a TCP byte stream into lines, keeping any partial
//!   line buffered across reads and discarding lines that exceed a length cap.
//! - [`Message`] tokenizes one line into an upper-cased command plus
//!   positional parameters, honouring the `:` trailing-parameter convention.
//!
//! ```rust
//! use relay_proto::Message;
//!
//! let msg: Message = "privmsg bob :hello there".parse().unwrap();
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.params, vec!["bob", "hello there"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod line;
pub mod message;

pub use error::{MessageParseError, ProtocolError};
pub use line::{Frame, LineCodec, CRLF};
pub use message::Message;
