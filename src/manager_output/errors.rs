use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub enum OutputError {
    Io(String),
    Json(String),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "OutputError::Io: {}", e),
            OutputError::Json(e) => write!(f, "OutputError::Json: {}", e),
        }
    }
}
impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self { OutputError::Io(err.to_string()) }
}
impl From<serde_json::Error> for OutputError {
    fn from(err: serde_json::Error) -> Self { OutputError::Json(err.to_string()) }
}
