use std::fmt;

/// Failure taxonomy for the whole app.
///
/// `Validation` covers bad user input (blank task name, no task selected,
/// break length out of range) and is always reported without changing any
/// state. `Persistence` covers the store and config files: loads degrade to
/// defaults instead of surfacing one of these, saves surface it but the
/// in-memory list stays authoritative. `Io` is everything else the OS can
/// fail at, such as reading stdin. A start requested while a session is
/// already running is deliberately not an error of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(String),
    Persistence(String),
    Io(String),
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn persistence<M: Into<String>>(message: M) -> Self {
        Self::Persistence(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    /// Stable short code, used as the error prefix on the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Persistence(_) => "persistence",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        let (Self::Validation(message) | Self::Persistence(message) | Self::Io(message)) = self;
        message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn codes_follow_the_failure_kind() {
        assert_eq!(AppError::validation("no task selected").code(), "validation");
        assert_eq!(AppError::persistence("disk full").code(), "persistence");
        assert_eq!(AppError::io("stdin closed").code(), "io_error");
    }

    #[test]
    fn display_prefixes_the_code() {
        let err = AppError::validation("task name is required");
        assert_eq!(err.to_string(), "validation - task name is required");
        assert_eq!(err.message(), "task name is required");
    }
}
