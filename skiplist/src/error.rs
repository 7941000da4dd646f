use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum OperationError {
    /// The key collides with a sentinel bound or falls beyond it.
    KeyOutOfRange(i64),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OperationError::KeyOutOfRange(key) => {
                write!(f, "key {} is outside the indexable range", key)
            }
        }
    }
}

impl Error for OperationError {
    fn description(&self) -> &str {
        match *self {
            OperationError::KeyOutOfRange(_) => "key is outside the indexable range",
        }
    }
}
