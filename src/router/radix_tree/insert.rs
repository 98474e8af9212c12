use std::sync::Arc;

use serde_json::json;

use crate::context::no_params;
use crate::handler::HandlerFunc;
use crate::router::errors::RouterErrorCode;
use crate::router::structures::RouterError;

use super::{longest_common_prefix, Kind, Node, NodeId, RadixTree, TreeFlags};

impl RadixTree {
    /// Register `handler` for `method` on `path`.
    ///
    /// The path is normalized to start with `/`, then scanned for `:name`
    /// and `*` markers. Each `:name` collapses to a one-byte marker so the
    /// tree stores route shape, not parameter spellings; a `*` terminates
    /// the route and captures everything after it at match time.
    ///
    /// Re-adding the same method and path replaces the handler in place.
    /// Verbs outside the known set are accepted but never stored.
    pub fn add(&mut self, method: &str, path: &str, handler: HandlerFunc) -> Result<(), RouterError> {
        tracing::event!(tracing::Level::TRACE, operation = "add", method = %method, path = %path);
        if self.is_sealed() {
            return Err(RouterError::new(
                RouterErrorCode::RouterSealedCannotInsert,
                format!("router is sealed; cannot add route '{}'", path),
                Some(json!({"operation": "add", "method": method, "path": path})),
            ));
        }
        if path.is_empty() {
            return Err(RouterError::new(
                RouterErrorCode::RoutePathEmpty,
                "route path cannot be empty".to_string(),
                Some(json!({"operation": "add", "method": method})),
            ));
        }
        self.flags.insert(TreeFlags::DIRTY);

        let mut path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let pristine = path.clone();
        let mut param_names: Vec<String> = Vec::new();

        let mut i = 0;
        while i < path.len() {
            match path.as_bytes()[i] {
                b':' => {
                    let j = i + 1;
                    self.insert(method, &path[..i], None, Kind::Static, "", &[]);

                    let mut end = j;
                    while end < path.len() && path.as_bytes()[end] != b'/' {
                        end += 1;
                    }
                    param_names.push(path[j..end].to_string());
                    // collapse the name: the tree keeps only the ':' marker
                    path.replace_range(j..end, "");
                    i = j;

                    if i == path.len() {
                        self.insert(
                            method,
                            &path[..i],
                            Some(&handler),
                            Kind::Param,
                            &pristine,
                            &param_names,
                        );
                        return Ok(());
                    }
                    self.insert(method, &path[..i], None, Kind::Param, "", &[]);
                }
                b'*' => {
                    self.insert(method, &path[..i], None, Kind::Static, "", &[]);
                    param_names.push("*".to_string());
                    // wildcards are always terminal; anything after '*' is dropped
                    self.insert(
                        method,
                        &path[..=i],
                        Some(&handler),
                        Kind::Wildcard,
                        &pristine,
                        &param_names,
                    );
                    return Ok(());
                }
                _ => {}
            }
            i += 1;
        }

        self.insert(method, &path, Some(&handler), Kind::Static, &pristine, &param_names);
        Ok(())
    }

    /// Longest-common-prefix merge of one structural fragment.
    ///
    /// Four cases on (lcp `l`, node prefix length `pl`, search length `sl`):
    /// empty root adopts the search; `l < pl` splits the node; `l < sl`
    /// descends or grows a fresh branch; exact match attaches the handler.
    fn insert(
        &mut self,
        method: &str,
        path: &str,
        handler: Option<&HandlerFunc>,
        kind: Kind,
        pristine_path: &str,
        param_names: &[String],
    ) {
        tracing::event!(tracing::Level::TRACE, operation = "insert", kind = ?kind, path = %path);
        if param_names.len() > self.max_params {
            self.max_params = param_names.len();
        }

        let mut current = NodeId::ROOT;
        let mut search = path;

        loop {
            let search_len = search.len();
            let prefix_len = self.node(current).prefix.len();
            let common = longest_common_prefix(search, &self.node(current).prefix);

            if common == 0 {
                // first route ever: the empty root adopts the whole search
                let node = self.node_mut(current);
                node.label = search.as_bytes()[0];
                node.prefix = search.to_string();
                if let Some(handler) = handler {
                    node.kind = kind;
                    node.methods.set(method, handler.clone());
                    node.pristine_path = pristine_path.to_string();
                    node.param_names = Arc::from(param_names.to_vec());
                }
            } else if common < prefix_len {
                // split: demote the unmatched prefix tail into a child that
                // keeps the handlers, children and route metadata
                let tail = {
                    let node = self.node_mut(current);
                    Node {
                        kind: node.kind,
                        label: node.prefix.as_bytes()[common],
                        prefix: node.prefix[common..].to_string(),
                        parent: Some(current),
                        children: std::mem::take(&mut node.children),
                        methods: std::mem::take(&mut node.methods),
                        pristine_path: std::mem::take(&mut node.pristine_path),
                        param_names: std::mem::replace(&mut node.param_names, no_params()),
                    }
                };
                let tail_id = self.alloc(tail);
                {
                    let node = self.node_mut(current);
                    node.kind = Kind::Static;
                    node.label = node.prefix.as_bytes()[0];
                    node.prefix.truncate(common);
                    node.children.push(tail_id);
                }

                if common == search_len {
                    // the new route terminates exactly at the split point
                    let node = self.node_mut(current);
                    node.kind = kind;
                    if let Some(handler) = handler {
                        node.methods.set(method, handler.clone());
                    }
                    node.pristine_path = pristine_path.to_string();
                    node.param_names = Arc::from(param_names.to_vec());
                } else {
                    let mut child = Node::new(
                        kind,
                        &search[common..],
                        current,
                        pristine_path,
                        Arc::from(param_names.to_vec()),
                    );
                    if let Some(handler) = handler {
                        child.methods.set(method, handler.clone());
                    }
                    let child_id = self.alloc(child);
                    self.node_mut(current).children.push(child_id);
                }
            } else if common < search_len {
                search = &search[common..];
                if let Some(next) = self.find_child_with_label(current, search.as_bytes()[0]) {
                    current = next;
                    continue;
                }
                // brand-new branch: one child holds the whole remaining suffix
                let mut child = Node::new(
                    kind,
                    search,
                    current,
                    pristine_path,
                    Arc::from(param_names.to_vec()),
                );
                if let Some(handler) = handler {
                    child.methods.set(method, handler.clone());
                }
                let child_id = self.alloc(child);
                self.node_mut(current).children.push(child_id);
            } else {
                // node already exists for this exact prefix
                if let Some(handler) = handler {
                    let node = self.node_mut(current);
                    node.methods.set(method, handler.clone());
                    node.pristine_path = pristine_path.to_string();
                    // the first registrant keeps the naming on a shared node
                    if node.param_names.is_empty() {
                        node.param_names = Arc::from(param_names.to_vec());
                    }
                }
            }
            return;
        }
    }
}
