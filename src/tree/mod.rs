//! Pure mutation operations over the component forest.
//!
//! Every operation takes the current forest by reference and returns a new one. Structural
//! no-ops (unknown ids, out-of-range indices, missing containers) return the forest unchanged
//! and are logged, never reported as errors.
use crate::form::{ComponentNode, FieldKind};
use itertools::Itertools;

/// Where an insertion or a reorder applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The root-level sequence of the forest.
    Root,
    /// The children of the container with this id.
    Container(String),
}

impl Scope {
    pub fn container(id: impl Into<String>) -> Self {
        Scope::Container(id.into())
    }

    /// `None` maps to the root, mirroring an optional parent id.
    pub fn from_parent(parent_id: Option<&str>) -> Self {
        parent_id.map_or(Scope::Root, Scope::container)
    }
}

/// Attaches `node` at the end of `scope`.
///
/// Fails silently (forest unchanged) if the container does not exist or cannot hold children.
pub fn insert(forest: &[ComponentNode], node: ComponentNode, scope: &Scope) -> Vec<ComponentNode> {
    let mut out = forest.to_vec();
    match scope_children_mut(&mut out, scope) {
        Some(children) => {
            log::debug!("Inserting '{}' ({}) into {:?}", node.id, node.kind, scope);
            children.push(node);
            relink_parents(out)
        }
        None => {
            log::warn!(
                "Cannot insert '{}': container {:?} not found or cannot hold children",
                node.id,
                scope
            );
            out
        }
    }
}

/// Replaces the node whose id matches `replacement.id`, searching depth-first.
pub fn update(forest: &[ComponentNode], replacement: ComponentNode) -> Vec<ComponentNode> {
    let mut out = forest.to_vec();
    let id = replacement.id.clone();
    match find_mut(&mut out, &id) {
        Some(slot) => {
            *slot = replacement;
            slot.normalize_children();
            relink_parents(out)
        }
        None => {
            log::debug!("Update ignored: no component with id '{}'", id);
            out
        }
    }
}

/// Removes the node with `id` and its whole subtree.
pub fn remove(forest: &[ComponentNode], id: &str) -> Vec<ComponentNode> {
    let mut out = forest.to_vec();
    match take(&mut out, id) {
        Some(removed) => {
            log::debug!(
                "Removed '{}' ({}) with {} descendant(s)",
                removed.id,
                removed.kind,
                flatten(removed.children()).len()
            );
            out
        }
        None => {
            log::debug!("Remove ignored: no component with id '{}'", id);
            out
        }
    }
}

/// Moves the element at `from` to `to` within `scope`.
///
/// Out-of-range indices or a missing scope leave the forest unchanged.
pub fn reorder(
    forest: &[ComponentNode],
    scope: &Scope,
    from: usize,
    to: usize,
) -> Vec<ComponentNode> {
    let mut out = forest.to_vec();
    let Some(siblings) = scope_children_mut(&mut out, scope) else {
        log::warn!("Reorder ignored: scope {:?} not found", scope);
        return out;
    };

    if from >= siblings.len() || to >= siblings.len() {
        log::warn!(
            "Invalid indices for reordering in {:?}: from={}, to={}, len={}",
            scope,
            from,
            to,
            siblings.len()
        );
        return out;
    }

    let moved = siblings.remove(from);
    siblings.insert(to, moved);
    log::debug!(
        "Reordered {:?}: {}",
        scope,
        siblings.iter().map(|c| c.id.as_str()).join(", ")
    );
    out
}

/// Finds a node anywhere in the forest.
pub fn find<'a>(forest: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    let mut stack: Vec<&ComponentNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// Every node of the forest in pre-order (parents before their children).
pub fn flatten(forest: &[ComponentNode]) -> Vec<&ComponentNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&ComponentNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}

/// Value-bearing fields in document order.
///
/// Layout containers are walked through; everything else, including dynamic lists, is a field.
pub fn leaf_fields(forest: &[ComponentNode]) -> Vec<&ComponentNode> {
    let mut out = Vec::new();
    collect_leaf_fields(forest, &mut out);
    out
}

fn collect_leaf_fields<'a>(nodes: &'a [ComponentNode], out: &mut Vec<&'a ComponentNode>) {
    for node in nodes {
        if node.kind.is_layout() {
            collect_leaf_fields(node.children(), out);
        } else {
            out.push(node);
        }
    }
}

pub fn count_kind(forest: &[ComponentNode], kind: FieldKind) -> usize {
    flatten(forest).iter().filter(|n| n.kind == kind).count()
}

/// Field names used by more than one field. Generated code silently collides on these.
pub fn duplicate_names(forest: &[ComponentNode]) -> Vec<String> {
    leaf_fields(forest)
        .into_iter()
        .map(|n| n.name.clone())
        .duplicates()
        .collect()
}

/// Drops every node of `kind`, with its subtree.
pub fn remove_kind(forest: &[ComponentNode], kind: FieldKind) -> Vec<ComponentNode> {
    forest
        .iter()
        .filter(|n| n.kind != kind)
        .map(|n| {
            let mut node = n.clone();
            if let Some(children) = node.children.take() {
                node.children = Some(remove_kind(&children, kind));
            }
            node
        })
        .collect()
}

/// Recomputes every `parent_id` from the tree structure.
pub fn relink_parents(forest: Vec<ComponentNode>) -> Vec<ComponentNode> {
    let mut forest = forest;
    for node in forest.iter_mut() {
        node.parent_id = None;
        relink_children(node);
    }
    forest
}

fn relink_children(node: &mut ComponentNode) {
    let parent_id = node.id.clone();
    if let Some(children) = node.children.as_mut() {
        for child in children {
            child.parent_id = Some(parent_id.clone());
            relink_children(child);
        }
    }
}

fn find_mut<'a>(nodes: &'a mut [ComponentNode], id: &str) -> Option<&'a mut ComponentNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Removes a node, checking the current level before descending.
fn take(nodes: &mut Vec<ComponentNode>, id: &str) -> Option<ComponentNode> {
    if let Some(pos) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(pos));
    }
    nodes
        .iter_mut()
        .filter_map(|n| n.children.as_mut())
        .find_map(|children| take(children, id))
}

fn scope_children_mut<'a>(
    forest: &'a mut Vec<ComponentNode>,
    scope: &Scope,
) -> Option<&'a mut Vec<ComponentNode>> {
    match scope {
        Scope::Root => Some(forest),
        Scope::Container(id) => find_mut(forest, id).and_then(|n| n.children.as_mut()),
    }
}
