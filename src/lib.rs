//! taproot — a compressed-prefix (radix) HTTP request router.
//!
//! The tree maps an HTTP method and URL path to a registered handler,
//! supporting static segments, named `:param` captures and trailing `*`
//! wildcards. Registration happens once at startup; resolution is a pure
//! read that writes its result into a caller-owned, reusable
//! [`RouteContext`] sized from the sealed router's [`RouterCapacity`].
//!
//! See [`router`] for the matching rules and a usage example.

pub mod context;
pub mod handler;
pub mod method;
pub mod middleware;
pub mod router;

pub use context::{MatchContext, RouteContext};
pub use handler::{
    method_not_allowed_handler, not_found_handler, HandlerFunc, HandlerResult, HttpError,
};
pub use method::Method;
pub use middleware::{Chain, MiddlewareFunc};
pub use router::{RadixTree, Route, RouteIndex, RouterCapacity, RouterError, RouterErrorCode};
