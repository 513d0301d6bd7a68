//! GraphQL-shaped errors.
//!
//! `GqlErrorList` is what resolvers render into the `errors` array of a
//! GraphQL response. An engine error that already is one of these is handed
//! back to the resolver as-is.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::EngineFailure;

/// Position in the GraphQL document an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// A single user-facing GraphQL error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl GqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: serde_json::Map::new(),
        }
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    pub fn with_path(mut self, path: Vec<serde_json::Value>) -> Self {
        self.path = path;
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

impl fmt::Display for GqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for loc in &self.locations {
            write!(f, " (Locations: [{{Line: {}, Column: {}}}])", loc.line, loc.column)?;
        }
        Ok(())
    }
}

/// Ordered list of GraphQL errors; serializes as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GqlErrorList(pub Vec<GqlError>);

impl GqlErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: GqlError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GqlError> {
        self.0.iter()
    }

    /// Build a list reporting `err` under a stable `message` prefix.
    ///
    /// A nested list is wrapped entry by entry so locations and paths of
    /// the individual errors survive.
    pub fn wrap(err: &(dyn StdError + 'static), message: &str) -> Self {
        if let Some(list) = err.downcast_ref::<GqlErrorList>() {
            let wrapped = list
                .iter()
                .map(|e| GqlError {
                    message: format!("{} because {}", message, e.message),
                    ..e.clone()
                })
                .collect();
            return GqlErrorList(wrapped);
        }
        GqlErrorList(vec![GqlError::new(format!("{} because {}", message, err))])
    }
}

impl From<GqlError> for GqlErrorList {
    fn from(err: GqlError) -> Self {
        GqlErrorList(vec![err])
    }
}

impl FromIterator<GqlError> for GqlErrorList {
    fn from_iter<I: IntoIterator<Item = GqlError>>(iter: I) -> Self {
        GqlErrorList(iter.into_iter().collect())
    }
}

impl fmt::Display for GqlErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl StdError for GqlErrorList {}

impl EngineFailure for GqlErrorList {
    fn is_gql_error_list(&self) -> bool {
        true
    }
}
