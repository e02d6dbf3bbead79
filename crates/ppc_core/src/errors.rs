use core::fmt;

/// Minimal error set for core-domain parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    /// A label did not name any variant of the given enumeration.
    UnknownLabel(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::UnknownLabel(kind) => write!(f, "unknown {kind} label"),
        }
    }
}

impl std::error::Error for CoreError {}
