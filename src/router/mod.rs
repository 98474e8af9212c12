//! Radix-tree request router.
//!
//! Routes are registered once at startup (`add` / `add_handler`), the tree
//! is sealed, and resolution (`find` / `lookup`) then runs as a pure,
//! lock-free, allocation-free read over the built structure.
//!
//! ```rust
//! use taproot::{HandlerFunc, RadixTree, RouteContext};
//!
//! let mut tree = RadixTree::new();
//! tree.add("GET", "/users/:id", HandlerFunc::new("get_user", |_| Ok(())))
//!     .unwrap();
//! tree.add("GET", "/assets/*", HandlerFunc::new("assets", |_| Ok(())))
//!     .unwrap();
//! let capacity = tree.seal();
//!
//! let mut ctx = RouteContext::with_capacity(capacity);
//! tree.find("GET", "/users/42", &mut ctx);
//! assert_eq!(ctx.path(), "/users/:id");
//! assert_eq!(ctx.param("id"), Some("42"));
//! ```
//!
//! Template syntax:
//! - `/literal/:name/literal` — `:name` captures one segment (up to the next `/`)
//! - `/literal/*` — `*` must come last; it captures the rest of the path
//!   under the implicit name `"*"`
//!
//! Matching priority at every node is static > param > wildcard, with a
//! single saved backtrack frame rather than full backtracking; see
//! [`RadixTree::find`].

mod errors;
mod radix_tree;
mod structures;

pub use errors::RouterErrorCode;
pub use radix_tree::RadixTree;
pub use structures::{Route, RouteIndex, RouterCapacity, RouterError};

use std::sync::Arc;

use crate::context::MatchContext;
use crate::handler::HandlerFunc;
use crate::middleware::{self, MiddlewareFunc};

impl RadixTree {
    /// [`find`](RadixTree::find), then decorate the result for the serving
    /// boundary: attach the route index for introspection and wrap the
    /// resolved handler (including the 404/405 classifications) with the
    /// router-wide interceptor chain.
    pub fn lookup(&self, method: &str, path: &str, ctx: &mut dyn MatchContext) {
        self.find(method, path, ctx);
        ctx.set_route_index(Arc::clone(&self.routes));

        let handler = ctx.handler().clone();
        ctx.set_handler(self.middleware.apply(handler));
    }

    /// Register a route with per-route interceptors and record its
    /// reverse-lookup metadata. The recorded name is the unwrapped
    /// handler's.
    pub fn add_handler(
        &mut self,
        method: &str,
        path: &str,
        handler: HandlerFunc,
        layers: &[MiddlewareFunc],
    ) -> Result<Route, RouterError> {
        let wrapped = middleware::apply(handler.clone(), layers);
        self.add(method, path, wrapped)?;

        let route = Route {
            method: method.to_string(),
            path: path.to_string(),
            name: handler.name().to_string(),
        };
        Arc::make_mut(&mut self.routes).insert(route.id(), route.clone());
        Ok(route)
    }

    /// Append a router-wide interceptor; `lookup` applies the chain to every
    /// resolved handler in registration order.
    pub fn use_middleware(&mut self, layer: MiddlewareFunc) {
        self.middleware.add(layer);
    }

    /// Reverse-lookup index of routes registered through `add_handler`.
    pub fn routes(&self) -> &RouteIndex {
        &self.routes
    }
}
