use std::sync::Arc;

use crate::context::MatchContext;

use super::{longest_common_prefix, Kind, NodeId, RadixTree};

/// Traversal phase of the single-frame backtracking search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    MatchStatic,
    TryParam,
    TryWildcard,
    Backtrack,
}

impl RadixTree {
    /// Resolve `method` + `path` into `ctx`.
    ///
    /// Search priority at every node is static, then param, then wildcard.
    /// Before trying a param or wildcard child the search records one
    /// backtrack frame (alternative kind, node, remaining search), and only
    /// when the current prefix ends in `/`. A failed deeper attempt restores
    /// that single frame instead of unwinding a full stack, so route sets
    /// needing independent backtracks across sibling dynamic branches are
    /// resolved on a best-effort basis.
    ///
    /// On a path match, `ctx` receives the template, parameter names and the
    /// verb's handler; a matched path without the verb resolves to the
    /// method-not-allowed or not-found classification handler. On no match,
    /// `ctx` keeps its primed handler. Captured values are written into the
    /// context's existing buffer slots; this function never allocates.
    pub fn find(&self, method: &str, path: &str, ctx: &mut dyn MatchContext) {
        ctx.set_path(path);

        let mut current = NodeId::ROOT;
        let mut search = path;
        let mut captured = 0usize;
        let mut saved_kind = Kind::Static; // Static marks "no frame saved"
        let mut saved_node: Option<NodeId> = None;
        let mut saved_search = "";
        let mut phase = Phase::MatchStatic;

        let matched = loop {
            match phase {
                Phase::MatchStatic => {
                    if search.is_empty() {
                        break true;
                    }

                    let node = self.node(current);
                    // param nodes own a zero-width marker: skip the prefix compare
                    let (common, prefix_len) = if node.label == b':' {
                        (0, 0)
                    } else {
                        (longest_common_prefix(search, &node.prefix), node.prefix.len())
                    };

                    if common != prefix_len {
                        phase = Phase::Backtrack;
                        continue;
                    }
                    search = &search[common..];
                    if search.is_empty() {
                        break true;
                    }

                    if let Some(child) = self.find_child(current, search.as_bytes()[0], Kind::Static)
                    {
                        // a param alternative only begins after a '/' boundary
                        if self.node(current).prefix.ends_with('/') {
                            saved_kind = Kind::Param;
                            saved_node = Some(current);
                            saved_search = search;
                        }
                        current = child;
                        continue;
                    }
                    phase = Phase::TryParam;
                }

                Phase::TryParam => match self.find_child_by_kind(current, Kind::Param) {
                    Some(child) => {
                        if ctx.param_values().len() == captured {
                            // capture slots exhausted: retry the alternative
                            phase = Phase::Backtrack;
                            continue;
                        }
                        if self.node(current).prefix.ends_with('/') {
                            saved_kind = Kind::Wildcard;
                            saved_node = Some(current);
                            saved_search = search;
                        }
                        current = child;
                        let end = search.find('/').unwrap_or(search.len());
                        let slot = &mut ctx.param_values()[captured];
                        slot.clear();
                        slot.push_str(&search[..end]);
                        captured += 1;
                        search = &search[end..];
                        phase = Phase::MatchStatic;
                    }
                    None => phase = Phase::TryWildcard,
                },

                Phase::TryWildcard => match self.find_child_by_kind(current, Kind::Wildcard) {
                    Some(child) => {
                        current = child;
                        let node = self.node(current);
                        let slot_index = node.param_names.len() - 1;
                        let slot = &mut ctx.param_values()[slot_index];
                        slot.clear();
                        slot.push_str(search);
                        break true;
                    }
                    None => match saved_node {
                        // climb one level: the frame walks up the parent chain
                        Some(frame) => {
                            current = frame;
                            saved_node = self.node(frame).parent;
                            search = saved_search;
                            match saved_kind {
                                Kind::Param => phase = Phase::TryParam,
                                Kind::Wildcard => phase = Phase::TryWildcard,
                                Kind::Static => break false,
                            }
                        }
                        None => break false,
                    },
                },

                Phase::Backtrack => match (saved_node, saved_kind) {
                    (Some(frame), Kind::Param) => {
                        current = frame;
                        search = saved_search;
                        phase = Phase::TryParam;
                    }
                    (Some(frame), Kind::Wildcard) => {
                        current = frame;
                        search = saved_search;
                        phase = Phase::TryWildcard;
                    }
                    _ => break false,
                },
            }
        };

        if !matched {
            return;
        }

        let node = self.node(current);
        ctx.set_path(&node.pristine_path);
        ctx.set_param_names(Arc::clone(&node.param_names));
        if let Some(handler) = node.methods.get(method) {
            ctx.set_handler(handler.clone());
            return;
        }

        // path matched, verb did not: 405 vs 404, then a trailing wildcard
        // child as the last fallback with its capture slot cleared
        ctx.set_handler(node.check_method_not_allowed());
        if let Some(any) = self.find_child_by_kind(current, Kind::Wildcard) {
            let any_node = self.node(any);
            match any_node.methods.get(method) {
                Some(handler) => ctx.set_handler(handler.clone()),
                None => ctx.set_handler(any_node.check_method_not_allowed()),
            }
            ctx.set_path(&any_node.pristine_path);
            ctx.set_param_names(Arc::clone(&any_node.param_names));
            let slot_index = any_node.param_names.len() - 1;
            ctx.param_values()[slot_index].clear();
        }
    }
}
