use super::Error;

/// Error when a model value cannot be persisted as given, for example when
/// its collection name is empty or it does not serialize to a document.
#[derive(Debug)]
pub(super) struct InvalidModel {
    message: Box<str>,
}

impl std::error::Error for InvalidModel {}

impl core::fmt::Display for InvalidModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model: {}", self.message)
    }
}

impl Error {
    pub fn invalid_model(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidModel(InvalidModel {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidModel(_))
    }
}
