use serde::{Deserialize, Serialize};

/// The GraphQL field a request was rewritten from.
///
/// The engine uses it to shape the JSON response under the field's response
/// key. Absent when the request did not come from a GraphQL resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// GraphQL type of the field, e.g. `[Person!]`
    pub type_name: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_name: type_name.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Key the field's data appears under in the response
    pub fn response_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
