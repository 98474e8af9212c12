use std::sync::Arc;

use smallvec::SmallVec;

use crate::context::no_params;
use crate::handler::{method_not_allowed_handler, not_found_handler, HandlerFunc};
use crate::method::Method;

use super::NodeId;

/// Route-segment classification; also the traversal priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Static,
    Param,
    Wildcard,
}

/// Handler slots, one per known verb.
///
/// Unknown verbs are dropped on write and miss on read; registration and
/// resolution accept them without error.
#[derive(Debug, Default)]
pub(crate) struct MethodTable([Option<HandlerFunc>; Method::COUNT]);

impl MethodTable {
    #[inline(always)]
    pub(crate) fn set(&mut self, method: &str, handler: HandlerFunc) {
        if let Some(m) = Method::from_name(method) {
            self.0[m as usize] = Some(handler);
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, method: &str) -> Option<&HandlerFunc> {
        Method::from_name(method).and_then(|m| self.0[m as usize].as_ref())
    }

    #[inline(always)]
    pub(crate) fn get_method(&self, method: Method) -> Option<&HandlerFunc> {
        self.0[method as usize].as_ref()
    }
}

/// One vertex of the compressed trie.
///
/// `prefix` owns the compressed segment; `label` caches its first byte for
/// one-byte child dispatch. A node may have any number of Static children
/// (distinct labels) plus at most one Param and one Wildcard child.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) kind: Kind,
    pub(crate) label: u8,
    pub(crate) prefix: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) methods: MethodTable,
    /// Original registered template; set only on nodes terminating a route.
    pub(crate) pristine_path: String,
    /// Capture-order parameter names of the terminating route.
    pub(crate) param_names: Arc<[String]>,
}

impl Node {
    /// The empty root. Its prefix stays empty only until the first insert.
    pub(crate) fn root() -> Node {
        Node {
            kind: Kind::Static,
            label: 0,
            prefix: String::new(),
            parent: None,
            children: SmallVec::new(),
            methods: MethodTable::default(),
            pristine_path: String::new(),
            param_names: no_params(),
        }
    }

    pub(crate) fn new(
        kind: Kind,
        prefix: &str,
        parent: NodeId,
        pristine_path: &str,
        param_names: Arc<[String]>,
    ) -> Node {
        Node {
            kind,
            label: prefix.as_bytes()[0],
            prefix: prefix.to_string(),
            parent: Some(parent),
            children: SmallVec::new(),
            methods: MethodTable::default(),
            pristine_path: pristine_path.to_string(),
            param_names,
        }
    }

    /// True when any verb has a handler registered here.
    pub(crate) fn has_handlers(&self) -> bool {
        Method::ALL
            .iter()
            .any(|&m| self.methods.get_method(m).is_some())
    }

    /// Path matched but the verb did not: 405 when any verb is registered on
    /// this node, plain 404 otherwise.
    pub(crate) fn check_method_not_allowed(&self) -> HandlerFunc {
        if self.has_handlers() {
            method_not_allowed_handler()
        } else {
            not_found_handler()
        }
    }
}
