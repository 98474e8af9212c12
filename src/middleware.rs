use std::fmt;
use std::sync::Arc;

use crate::handler::HandlerFunc;

/// An interceptor: receives the next handler, returns the wrapping handler.
pub type MiddlewareFunc = Arc<dyn Fn(HandlerFunc) -> HandlerFunc + Send + Sync>;

/// Ordered interceptor chain. The first layer added runs outermost.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<MiddlewareFunc>,
}

impl Chain {
    pub fn new() -> Chain {
        Chain { layers: Vec::new() }
    }

    pub fn with(mut self, layer: MiddlewareFunc) -> Chain {
        self.layers.push(layer);
        self
    }

    pub fn add(&mut self, layer: MiddlewareFunc) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn apply(&self, handler: HandlerFunc) -> HandlerFunc {
        apply(handler, &self.layers)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("layers", &self.layers.len()).finish()
    }
}

/// Wrap `handler` with `layers` so that `layers[0]` runs first at call time.
pub fn apply(handler: HandlerFunc, layers: &[MiddlewareFunc]) -> HandlerFunc {
    let mut wrapped = handler;
    for layer in layers.iter().rev() {
        wrapped = layer(wrapped);
    }
    wrapped
}
