use std::sync::Arc;

use bitflags::bitflags;

use crate::middleware::Chain;

use super::structures::{RouteIndex, RouterCapacity};

mod find;
mod insert;
pub(crate) mod node;

pub(crate) use node::{Kind, Node};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct TreeFlags: u8 {
        const SEALED = 0b0000_0001;
        const DIRTY = 0b0000_0010;
    }
}

/// Index of a node in the tree's contiguous arena. The root is always slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Compressed-prefix routing tree.
///
/// Nodes live in one arena and never move or die; parent links are plain
/// indices used for the one-level backtrack during wildcard fallback.
///
/// Registration (`add`, `add_handler`, `use_middleware`) is single-threaded
/// and must fully complete, with a synchronizing event establishing
/// happens-before (e.g. moving the tree behind an `Arc`), before the first
/// concurrent `find`/`lookup`. The tree takes no locks; mutating it while
/// serving is a precondition violation, not a supported mode. [`seal`]
/// enforces the registration side of that contract.
///
/// [`seal`]: RadixTree::seal
#[derive(Debug)]
pub struct RadixTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) routes: Arc<RouteIndex>,
    pub(crate) middleware: Chain,
    pub(crate) max_params: usize,
    pub(crate) flags: TreeFlags,
}

impl Default for RadixTree {
    fn default() -> RadixTree {
        RadixTree::new()
    }
}

impl RadixTree {
    pub fn new() -> RadixTree {
        RadixTree {
            nodes: vec![Node::root()],
            routes: Arc::new(RouteIndex::default()),
            middleware: Chain::new(),
            max_params: 0,
            flags: TreeFlags::empty(),
        }
    }

    /// Finish registration. Further `add` calls are refused, and the
    /// returned capacity is final, safe to size per-request buffers with.
    /// Matching works the same before and after sealing.
    pub fn seal(&mut self) -> RouterCapacity {
        self.flags.remove(TreeFlags::DIRTY);
        self.flags.insert(TreeFlags::SEALED);
        tracing::event!(
            tracing::Level::DEBUG,
            operation = "seal",
            routes = self.routes.len() as u64,
            max_params = self.max_params as u64
        );
        self.capacity()
    }

    pub fn is_sealed(&self) -> bool {
        self.flags.contains(TreeFlags::SEALED)
    }

    /// True when routes were added since construction or the last seal.
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(TreeFlags::DIRTY)
    }

    /// Current capacity snapshot; only stable once sealed.
    pub fn capacity(&self) -> RouterCapacity {
        RouterCapacity {
            max_params: self.max_params,
        }
    }

    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Exact (label, kind) child; used when choosing among static children.
    #[inline(always)]
    pub(crate) fn find_child(&self, at: NodeId, label: u8, kind: Kind) -> Option<NodeId> {
        self.node(at).children.iter().copied().find(|&child| {
            let node = self.node(child);
            node.label == label && node.kind == kind
        })
    }

    /// First child carrying `label`, regardless of kind; insertion-time only.
    #[inline(always)]
    pub(crate) fn find_child_with_label(&self, at: NodeId, label: u8) -> Option<NodeId> {
        self.node(at)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).label == label)
    }

    /// The single Param or Wildcard child, when present.
    #[inline(always)]
    pub(crate) fn find_child_by_kind(&self, at: NodeId, kind: Kind) -> Option<NodeId> {
        self.node(at)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).kind == kind)
    }
}

/// Byte-wise longest common prefix, clamped so it never lands inside a
/// multi-byte UTF-8 sequence.
#[inline(always)]
pub(crate) fn longest_common_prefix(a: &str, b: &str) -> usize {
    let max = a.len().min(b.len());
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    let mut l = 0;
    while l < max && ab[l] == bb[l] {
        l += 1;
    }
    while l > 0 && !a.is_char_boundary(l) {
        l -= 1;
    }
    l
}
