use crate::Error;

/// Outcome of a resolver method.
///
/// Borrows the resolved value and the cached error from the model that owns
/// them, so repeated calls observe the same pair.
#[derive(Debug)]
pub struct Resolved<'a, T> {
    value: &'a T,
    error: Option<&'a Error>,
}

impl<'a, T> Resolved<'a, T> {
    pub fn new(value: &'a T, error: Option<&'a Error>) -> Resolved<'a, T> {
        Resolved { value, error }
    }

    /// The resolved value. Holds whatever was loaded before the first
    /// failure when [`error`](Self::error) is set.
    pub fn value(&self) -> &'a T {
        self.value
    }

    pub fn error(&self) -> Option<&'a Error> {
        self.error
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (&'a T, Option<&'a Error>) {
        (self.value, self.error)
    }

    pub fn into_result(self) -> Result<&'a T, Error> {
        match self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.value),
        }
    }
}

impl<T> Clone for Resolved<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolved<'_, T> {}
