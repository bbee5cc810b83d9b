//! Program log events: typed records and the line/batch decoder.

pub mod decode;
pub mod types;

pub use decode::{decode_line, decode_logs, LineFailure, LogBatch};
pub use types::*;
