use std::fmt;

/// User-facing command failure
///
/// Every variant ends the invocation before any generated text is emitted.
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command was pointed at something that is not a model-bearing app
    Usage(String),
    /// The target Python runtime or Django version is not supported
    Environment(String),
    /// An option has an unrecognized value or the wrong shape
    Argument(String),
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Usage(m) | CommandError::Environment(m) | CommandError::Argument(m) => m,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CommandError {}
