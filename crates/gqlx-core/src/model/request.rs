use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One mutation in an engine request.
///
/// JSON and N-Quad payloads may be mixed; `cond` carries the upsert
/// condition (`@if(...)`) when the mutation is conditional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_json: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_json: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_nquads: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub del_nquads: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cond: String,
}

impl Mutation {
    pub fn set_json(value: serde_json::Value) -> Self {
        Self {
            set_json: Some(value),
            ..Self::default()
        }
    }

    pub fn delete_json(value: serde_json::Value) -> Self {
        Self {
            delete_json: Some(value),
            ..Self::default()
        }
    }

    pub fn set_nquads(nquads: impl Into<String>) -> Self {
        Self {
            set_nquads: nquads.into(),
            ..Self::default()
        }
    }

    pub fn with_cond(mut self, cond: impl Into<String>) -> Self {
        self.cond = cond.into();
        self
    }
}

/// Single-line text rendering used for diagnostics only.
///
/// Lists non-empty members as `name:"escaped"`, space separated.
impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        let mut field = |f: &mut fmt::Formatter<'_>, name: &str, value: &str| -> fmt::Result {
            let r = write!(f, "{}{}:{:?}", sep, name, value);
            sep = " ";
            r
        };
        if let Some(v) = &self.set_json {
            field(f, "set_json", &v.to_string())?;
        }
        if let Some(v) = &self.delete_json {
            field(f, "delete_json", &v.to_string())?;
        }
        if !self.set_nquads.is_empty() {
            field(f, "set_nquads", &self.set_nquads)?;
        }
        if !self.del_nquads.is_empty() {
            field(f, "del_nquads", &self.del_nquads)?;
        }
        if !self.cond.is_empty() {
            field(f, "cond", &self.cond)?;
        }
        Ok(())
    }
}

/// An execution unit handed to the engine: a query, mutations, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub mutations: Vec<Mutation>,
    /// Query variables (`$name` → value)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
    /// Timestamp of the transaction to join; 0 starts a new one
    #[serde(default)]
    pub start_ts: u64,
    #[serde(default)]
    pub commit_now: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub best_effort: bool,
}

impl Request {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn mutations(mutations: Vec<Mutation>) -> Self {
        Self {
            mutations,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_start_ts(mut self, start_ts: u64) -> Self {
        self.start_ts = start_ts;
        self
    }

    pub fn with_commit_now(mut self, commit_now: bool) -> Self {
        self.commit_now = commit_now;
        self
    }

    /// No query text and no mutations: nothing for the engine to do.
    ///
    /// Only the literal empty string counts as "no query"; whitespace is
    /// left for the engine to reject.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.mutations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_request_is_empty() {
        assert!(Request::default().is_empty());
    }

    #[test]
    fn test_options_alone_do_not_make_a_request_non_empty() {
        let req = Request::default()
            .with_var("$id", "0x1")
            .with_start_ts(10)
            .with_commit_now(true);
        assert!(req.is_empty());
    }

    #[test]
    fn test_query_or_mutation_makes_request_non_empty() {
        assert!(!Request::query("{ q(func: uid(0x1)) { uid } }").is_empty());
        assert!(!Request::mutations(vec![Mutation::default()]).is_empty());
        assert!(!Request::query(" ").is_empty());
    }

    #[test]
    fn test_mutation_display_lists_non_empty_members() {
        let m = Mutation::set_json(json!({ "uid": "_:x", "Person.name": "Ann" }))
            .with_cond("@if(eq(len(x), 0))");
        let rendered = m.to_string();

        assert!(rendered.starts_with("set_json:\""));
        assert!(rendered.contains("Person.name"));
        assert!(rendered.contains(" cond:\"@if(eq(len(x), 0))\""));
        assert!(!rendered.contains("del_nquads"));
    }

    #[test]
    fn test_mutation_display_escapes_newlines() {
        let m = Mutation::set_nquads("_:a <name> \"A\" .\n_:b <name> \"B\" .");
        let rendered = m.to_string();
        assert!(!rendered.contains('\n'));
        assert!(rendered.contains("\\n"));
    }

    #[test]
    fn test_empty_mutation_renders_empty() {
        assert_eq!(Mutation::default().to_string(), "");
    }
}
