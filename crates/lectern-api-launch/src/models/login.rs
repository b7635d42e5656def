//! Login initiation parameter model.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Canonical OIDC third-party-initiated login parameters.
///
/// `target_link_uri` and `login_hint` are required by the LTI protocol,
/// but normalization does not enforce non-emptiness: fields that were
/// missing from the request read as empty strings, single values are
/// carried exactly as the platform sent them, and a field the platform
/// repeated reads as its values joined with commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoginParams {
    /// Launch destination inside the tool.
    pub target_link_uri: String,
    /// Opaque platform user hint, echoed back in the authentication
    /// request.
    pub login_hint: String,
    /// Opaque platform state hint; empty when the platform sent none.
    pub lti_message_hint: String,
}

/// Field collection with "get field by name, default empty" semantics.
///
/// A field that arrives more than once accumulates: its values read back
/// joined with commas, in arrival order.
#[derive(Debug, Default)]
pub struct FieldMap {
    fields: HashMap<String, String>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.fields.entry(name.into()) {
            Entry::Occupied(mut field) => {
                let joined = field.get_mut();
                joined.push(',');
                joined.push_str(&value);
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }

    /// Exact, case-sensitive lookup. Missing fields read as `""`, repeated
    /// fields as their comma-joined values.
    #[must_use]
    pub fn get(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Where the login parameters came from. Resolved once per request: a
/// declared form content type commits to the body, anything else reads
/// the query string. There is no fallback between the two.
#[derive(Debug)]
pub enum ParamSource {
    /// Form-encoded or multipart body fields.
    Form(FieldMap),
    /// URL query string fields.
    Query(FieldMap),
}

impl ParamSource {
    /// Extract the canonical parameters from whichever collection was
    /// resolved.
    #[must_use]
    pub fn into_login_params(self) -> LoginParams {
        let fields = match self {
            ParamSource::Form(fields) | ParamSource::Query(fields) => fields,
        };
        LoginParams {
            target_link_uri: fields.get("target_link_uri"),
            login_hint: fields.get("login_hint"),
            lti_message_hint: fields.get("lti_message_hint"),
        }
    }
}
