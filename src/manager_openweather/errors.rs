use std::fmt;

#[derive(Debug)]
pub enum OWMError {
    Transport(String),
    Schema(String),
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::Transport(e) => write!(f, "OWMError::Transport: {}", e),
            OWMError::Schema(e) => write!(f, "OWMError::Schema: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Schema(e.to_string())
    }
}
impl From<chrono::format::ParseError> for OWMError {
    fn from(e: chrono::format::ParseError) -> Self {
        OWMError::Schema(e.to_string())
    }
}
