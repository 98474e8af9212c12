use std::fmt;

use hashbrown::HashMap as FastHashMap;
use serde::{Deserialize, Serialize};

use super::errors::RouterErrorCode;

#[derive(Serialize, Debug)]
pub struct RouterError {
    pub code: RouterErrorCode,
    pub error: String,
    pub description: String,
    pub detail: Option<serde_json::Value>,
}

impl RouterError {
    /// Construct a RouterError. The caller must provide a context-specific description.
    pub fn new(
        code: RouterErrorCode,
        description: String,
        detail: Option<serde_json::Value>,
    ) -> RouterError {
        RouterError {
            error: code.as_str().to_string(),
            code,
            description,
            detail,
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.code.code(), self.description)
    }
}

impl std::error::Error for RouterError {}

/// Reverse-lookup record for a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: String,
    pub path: String,
    pub name: String,
}

impl Route {
    /// Synthesized identifier: `"METHOD path"`.
    pub fn id(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Route-id to metadata map, attached to contexts by `lookup`.
pub type RouteIndex = FastHashMap<String, Route>;

/// Capacity snapshot produced when registration finishes.
///
/// Sizes per-request parameter buffers; see [`crate::RouteContext`]. Taking
/// the snapshot before the last `add` undersizes every buffer built from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouterCapacity {
    /// Largest parameter count over all registered routes.
    pub max_params: usize,
}
