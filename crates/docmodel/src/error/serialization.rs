use super::Error;

/// Error when a model cannot be converted to or from a stored document.
#[derive(Debug)]
pub(super) struct SerializationFailure {
    inner: serde_json::Error,
}

impl std::error::Error for SerializationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for SerializationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "serialization failed: {}", self.inner)
    }
}

impl Error {
    pub fn serialization_failure(err: serde_json::Error) -> Error {
        Error::from(super::ErrorKind::Serialization(SerializationFailure {
            inner: err,
        }))
    }

    pub fn is_serialization_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Serialization(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::serialization_failure(err)
    }
}
