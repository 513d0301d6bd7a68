//! Redacting wrapper for credentials
//!
//! The execution context carries the caller's auth token down to the engine.
//! Contexts get logged with `{:?}` in a few places, so the token is wrapped
//! in `Sensitive<T>` which never prints its contents.

use std::fmt;

/// Wrapper whose Debug and Display output is always `***REDACTED***`
///
/// # Example
///
/// ```
/// use gqlx_core_types::Sensitive;
///
/// let token = Sensitive::new("bearer abc");
/// assert_eq!(format!("{:?}", token), "***REDACTED***");
/// assert_eq!(token.expose(), &"bearer abc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value; only the engine's auth check should need this
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}
