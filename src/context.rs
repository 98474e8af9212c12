use std::sync::Arc;

use lazy_static::lazy_static;

use crate::handler::{not_found_handler, HandlerFunc};
use crate::router::{RouteIndex, RouterCapacity};

lazy_static! {
    static ref NO_PARAMS: Arc<[String]> = Arc::from(Vec::<String>::new());
}

/// Shared empty name list, so priming a context never allocates.
pub(crate) fn no_params() -> Arc<[String]> {
    Arc::clone(&NO_PARAMS)
}

/// Capability the router writes resolution results into.
///
/// Implementations own a parameter-value buffer of at least
/// [`RouterCapacity::max_params`] slots. The router only ever writes into
/// existing slots; it never grows the buffer. Slots at positions past the
/// resolved route's parameter count hold stale values and must be read
/// through the name list, not directly.
pub trait MatchContext {
    /// Resolved path template, or the raw request path until resolution.
    fn set_path(&mut self, path: &str);
    fn set_handler(&mut self, handler: HandlerFunc);
    fn handler(&self) -> &HandlerFunc;
    fn set_param_names(&mut self, names: Arc<[String]>);
    fn param_values(&mut self) -> &mut [String];
    fn set_route_index(&mut self, routes: Arc<RouteIndex>);
}

/// Reusable per-request match context.
///
/// Intended to be pooled by the embedding application: construct once from
/// the sealed router's capacity, then [`reset`](RouteContext::reset) between
/// requests. The value buffer is fixed-size and its `String` slots keep their
/// heap capacity across requests, so resolution writes stay allocation-free
/// once the slots have warmed up.
pub struct RouteContext {
    path: String,
    handler: HandlerFunc,
    param_names: Arc<[String]>,
    param_values: Box<[String]>,
    routes: Option<Arc<RouteIndex>>,
}

impl RouteContext {
    pub fn with_capacity(capacity: RouterCapacity) -> RouteContext {
        RouteContext {
            path: String::new(),
            handler: not_found_handler(),
            param_names: no_params(),
            param_values: vec![String::new(); capacity.max_params].into_boxed_slice(),
            routes: None,
        }
    }

    /// Re-prime for the next request. The value buffer keeps its slots;
    /// stale values are overwritten by the next resolution.
    pub fn reset(&mut self) {
        self.path.clear();
        self.handler = not_found_handler();
        self.param_names = no_params();
        self.routes = None;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Captured value for `name`, if the resolved route declares it.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.param_names
            .iter()
            .position(|n| n == name)
            .map(|i| self.param_values[i].as_str())
    }

    /// Route index attached by `lookup`, when resolution went through it.
    pub fn route_index(&self) -> Option<&Arc<RouteIndex>> {
        self.routes.as_ref()
    }
}

impl MatchContext for RouteContext {
    fn set_path(&mut self, path: &str) {
        self.path.clear();
        self.path.push_str(path);
    }

    fn set_handler(&mut self, handler: HandlerFunc) {
        self.handler = handler;
    }

    fn handler(&self) -> &HandlerFunc {
        &self.handler
    }

    fn set_param_names(&mut self, names: Arc<[String]>) {
        self.param_names = names;
    }

    fn param_values(&mut self) -> &mut [String] {
        &mut self.param_values
    }

    fn set_route_index(&mut self, routes: Arc<RouteIndex>) {
        self.routes = Some(routes);
    }
}
