use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TrackerError {
    InvalidConfig(String),
    InvalidBBox(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackerError::InvalidConfig(txt) => write!(f, "InvalidConfig: {}", txt),
            TrackerError::InvalidBBox(txt) => write!(f, "InvalidBBox: {}", txt),
        }
    }
}

impl Error for TrackerError {}
