use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::context::MatchContext;

/// Outcome of invoking a handler.
///
/// Resolution failures never surface as router errors: the router resolves
/// to a builtin handler that produces the matching [`HttpError`] when called.
pub type HandlerResult = Result<(), HttpError>;

type HandlerBody = dyn Fn(&mut dyn MatchContext) -> HandlerResult + Send + Sync;

/// An opaque callable registered for a (method, path template) pair.
///
/// Clones share the underlying closure. The name is diagnostic only: it
/// feeds the route index and never influences matching.
#[derive(Clone)]
pub struct HandlerFunc {
    name: Arc<str>,
    body: Arc<HandlerBody>,
}

impl HandlerFunc {
    pub fn new<F>(name: &str, body: F) -> HandlerFunc
    where
        F: Fn(&mut dyn MatchContext) -> HandlerResult + Send + Sync + 'static,
    {
        HandlerFunc {
            name: Arc::from(name),
            body: Arc::new(body),
        }
    }

    pub fn call(&self, ctx: &mut dyn MatchContext) -> HandlerResult {
        (self.body)(ctx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when both values share one underlying closure.
    pub fn same(&self, other: &HandlerFunc) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for HandlerFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFunc").field("name", &self.name).finish()
    }
}

/// Error a handler surfaces to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> HttpError {
        HttpError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> HttpError {
        HttpError::new(404, "Not Found")
    }

    pub fn method_not_allowed() -> HttpError {
        HttpError::new(405, "Method Not Allowed")
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl std::error::Error for HttpError {}

lazy_static! {
    static ref NOT_FOUND: HandlerFunc =
        HandlerFunc::new("not_found", |_| Err(HttpError::not_found()));
    static ref METHOD_NOT_ALLOWED: HandlerFunc =
        HandlerFunc::new("method_not_allowed", |_| Err(HttpError::method_not_allowed()));
}

/// Handler resolved when no route matches the request path.
pub fn not_found_handler() -> HandlerFunc {
    NOT_FOUND.clone()
}

/// Handler resolved when the path matches but the verb has no registration.
pub fn method_not_allowed_handler() -> HandlerFunc {
    METHOD_NOT_ALLOWED.clone()
}
