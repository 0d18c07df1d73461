//! In-memory schema context.
//!
//! [`SchemaTree`] indexes schema nodes by their absolute path and resolves
//! leafref paths against that index. Supported path syntax:
//!
//! - absolute: `/if:interfaces/if:interface/if:name`
//! - relative: `../name`, `../../config/name`
//! - predicates (`[name = current()/../ifname]`) are accepted and ignored
//!
//! A prefix is taken to be the module name. Unprefixed steps inherit the
//! module of the node the path is evaluated from.

use crate::traits::{ResolveError, SchemaContext};
use crate::yang::{QName, SchemaNode, SchemaPath, TypeDefinition, TypeKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Longest leafref chain followed before giving up.
pub const MAX_LEAFREF_HOPS: usize = 32;

/// Schema nodes indexed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    nodes: HashMap<SchemaPath, SchemaNode>,
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, replacing any node already at the same path.
    pub fn insert(&mut self, node: SchemaNode) -> Option<SchemaNode> {
        self.nodes.insert(node.path.clone(), node)
    }

    pub fn get(&self, path: &SchemaPath) -> Option<&SchemaNode> {
        self.nodes.get(path)
    }

    /// Evaluate a leafref path expression from `scope`.
    pub fn locate(&self, expr: &str, scope: &SchemaNode) -> Result<SchemaPath, ResolveError> {
        let stripped = strip_predicates(expr).map_err(|reason| ResolveError::InvalidPath {
            path: expr.to_string(),
            reason,
        })?;
        let stripped = stripped.trim();
        let invalid = |reason: &str| ResolveError::InvalidPath {
            path: expr.to_string(),
            reason: reason.to_string(),
        };

        let (mut current, rest) = match stripped.strip_prefix('/') {
            Some(rest) => (SchemaPath::root(), rest),
            None => (scope.path.clone(), stripped),
        };
        if rest.is_empty() {
            return Err(invalid("path has no steps"));
        }

        for step in rest.split('/').map(str::trim) {
            match step {
                "" => return Err(invalid("empty path step")),
                "." => {}
                ".." => {
                    current = current
                        .parent()
                        .ok_or_else(|| invalid("path escapes the schema root"))?;
                }
                _ => {
                    let qname = match step.split_once(':') {
                        Some((_, name)) if name.contains(':') => {
                            return Err(invalid("malformed qualified name"));
                        }
                        Some((prefix, name)) => QName::new(prefix, name),
                        None => QName::new(scope.qname.module.clone(), step),
                    };
                    current = current.child(qname);
                }
            }
        }

        Ok(current)
    }
}

impl FromIterator<SchemaNode> for SchemaTree {
    fn from_iter<I: IntoIterator<Item = SchemaNode>>(iter: I) -> Self {
        let mut tree = Self::new();
        for node in iter {
            tree.insert(node);
        }
        tree
    }
}

impl SchemaContext for SchemaTree {
    fn resolve_leafref(
        &self,
        leafref: &TypeDefinition,
        scope: &SchemaNode,
    ) -> Result<Arc<TypeDefinition>, ResolveError> {
        let TypeKind::Leafref { path } = &leafref.kind else {
            return Err(ResolveError::NotLeafref {
                name: leafref.qname.to_string(),
            });
        };

        let mut expr = path.as_str();
        let mut scope = scope;
        for _ in 0..MAX_LEAFREF_HOPS {
            let target_path = self.locate(expr, scope)?;
            let target = self
                .get(&target_path)
                .ok_or_else(|| ResolveError::NotFound {
                    path: target_path.to_string(),
                })?;
            let ty = target.ty.as_ref().ok_or_else(|| ResolveError::NotTyped {
                path: target_path.to_string(),
            })?;

            debug!(
                scope = %scope.path,
                path = expr,
                target = %target_path,
                target_type = %ty.qname,
                "resolved leafref step"
            );

            match &ty.kind {
                TypeKind::Leafref { path } => {
                    expr = path.as_str();
                    scope = target;
                }
                _ => return Ok(Arc::clone(ty)),
            }
        }

        Err(ResolveError::TooDeep {
            path: path.clone(),
            hops: MAX_LEAFREF_HOPS,
        })
    }
}

/// Remove `[...]` predicates from a path expression.
fn strip_predicates(expr: &str) -> Result<String, String> {
    let mut out = String::with_capacity(expr.len());
    let mut depth = 0usize;
    for c in expr.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ']'".to_string())?;
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unterminated predicate".to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yang::IntWidth;

    fn q(name: &str) -> QName {
        QName::new("if", name)
    }

    fn path(names: &[&str]) -> SchemaPath {
        SchemaPath(names.iter().map(|n| q(n)).collect())
    }

    fn interfaces_tree() -> SchemaTree {
        [
            SchemaNode::container(path(&["interfaces"])),
            SchemaNode::container(path(&["interfaces", "interface"])),
            SchemaNode::leaf(
                path(&["interfaces", "interface", "name"]),
                Arc::new(TypeDefinition::string()),
            ),
            SchemaNode::leaf(
                path(&["interfaces", "interface", "enabled"]),
                Arc::new(TypeDefinition::boolean()),
            ),
            SchemaNode::leaf(
                path(&["interfaces", "interface", "mtu"]),
                Arc::new(TypeDefinition::uint(IntWidth::W32)),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn insert_replaces_node_at_same_path() {
        let mut tree = interfaces_tree();
        let mtu = path(&["interfaces", "interface", "mtu"]);
        let previous = tree.insert(SchemaNode::leaf(
            mtu.clone(),
            Arc::new(TypeDefinition::uint(IntWidth::W16)),
        ));
        assert!(previous.is_some());

        let ty = tree.get(&mtu).and_then(|node| node.ty.as_ref()).unwrap();
        assert_eq!(ty.kind, TypeKind::Uint(IntWidth::W16));
        assert!(tree.get(&path(&["interfaces", "mtu"])).is_none());
    }

    #[test]
    fn absolute_path() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let located = tree
            .locate("/if:interfaces/if:interface/if:name", &scope)
            .unwrap();
        assert_eq!(located, path(&["interfaces", "interface", "name"]));
    }

    #[test]
    fn relative_path_starts_at_scope() {
        let tree = interfaces_tree();
        let scope = SchemaNode::leaf(
            path(&["interfaces", "interface", "alias"]),
            Arc::new(TypeDefinition::leafref("../enabled")),
        );
        let located = tree.locate("../enabled", &scope).unwrap();
        assert_eq!(located, path(&["interfaces", "interface", "enabled"]));
    }

    #[test]
    fn predicates_are_ignored() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let located = tree
            .locate(
                "/if:interfaces/if:interface[if:name = current()/../ifname]/if:mtu",
                &scope,
            )
            .unwrap();
        assert_eq!(located, path(&["interfaces", "interface", "mtu"]));
    }

    #[test]
    fn unprefixed_steps_use_scope_module() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let located = tree.locate("/interfaces/interface/name", &scope).unwrap();
        assert_eq!(located, path(&["interfaces", "interface", "name"]));
    }

    #[test]
    fn escaping_root_is_invalid() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let err = tree.locate("../../x", &scope).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath { .. }));
    }

    #[test]
    fn unbalanced_predicate_is_invalid() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let err = tree.locate("/if:interfaces[", &scope).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath { .. }));
    }

    #[test]
    fn resolves_to_target_type() {
        let tree = interfaces_tree();
        let leafref = TypeDefinition::leafref("../enabled");
        let scope = SchemaNode::leaf(
            path(&["interfaces", "interface", "alias"]),
            Arc::new(leafref.clone()),
        );
        let ty = tree.resolve_leafref(&leafref, &scope).unwrap();
        assert_eq!(ty.kind, TypeKind::Boolean);
    }

    #[test]
    fn follows_chained_leafrefs() {
        let mut tree = interfaces_tree();
        tree.insert(SchemaNode::leaf(
            path(&["interfaces", "interface", "alias"]),
            Arc::new(TypeDefinition::leafref("../mtu")),
        ));
        let leafref = TypeDefinition::leafref("/if:interfaces/if:interface/if:alias");
        let scope = SchemaNode::leaf(path(&["default-alias"]), Arc::new(leafref.clone()));
        let ty = tree.resolve_leafref(&leafref, &scope).unwrap();
        assert_eq!(ty.kind, TypeKind::Uint(IntWidth::W32));
    }

    #[test]
    fn cyclic_leafrefs_fail() {
        let mut tree = SchemaTree::new();
        tree.insert(SchemaNode::leaf(
            path(&["a"]),
            Arc::new(TypeDefinition::leafref("/if:b")),
        ));
        tree.insert(SchemaNode::leaf(
            path(&["b"]),
            Arc::new(TypeDefinition::leafref("/if:a")),
        ));
        let leafref = TypeDefinition::leafref("/if:a");
        let scope = SchemaNode::leaf(path(&["c"]), Arc::new(leafref.clone()));
        let err = tree.resolve_leafref(&leafref, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::TooDeep { hops: MAX_LEAFREF_HOPS, .. }));
    }

    #[test]
    fn missing_and_untyped_targets() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));

        let dangling = TypeDefinition::leafref("/if:interfaces/if:nope");
        let err = tree.resolve_leafref(&dangling, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));

        let container = TypeDefinition::leafref("/if:interfaces/if:interface");
        let err = tree.resolve_leafref(&container, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::NotTyped { .. }));
    }

    #[test]
    fn rejects_non_leafref() {
        let tree = interfaces_tree();
        let scope = SchemaNode::container(path(&["interfaces"]));
        let err = tree
            .resolve_leafref(&TypeDefinition::boolean(), &scope)
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotLeafref { .. }));
    }
}
