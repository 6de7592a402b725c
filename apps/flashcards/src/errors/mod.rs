pub mod error_code;

pub use error_code::{error_text, ErrorCode};
