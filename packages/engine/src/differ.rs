//! Id-based document diffing.
//!
//! Nodes are matched across edits by `id`; `key` is render-only and ignored.
//! For each list the patches come in this order: removals (old order), then
//! for each node of the new list an insert, a move, a replacement or prop
//! updates, followed by the patches of its slots.

use pagetree_ast::{Document, Node, PropValue, Props};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Identifies one node list in a document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListPath {
    Content,
    Zone(String),
    Slot { parent: String, name: String },
    RootSlot(String),
}

impl fmt::Display for ListPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListPath::Content => write!(f, "content"),
            ListPath::Zone(name) => write!(f, "zone:{}", name),
            ListPath::Slot { parent, name } => write!(f, "{}.{}", parent, name),
            ListPath::RootSlot(name) => write!(f, "root.{}", name),
        }
    }
}

impl Serialize for ListPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single change between two documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum TreePatch {
    Insert { path: ListPath, index: usize, node: Node },
    Remove { path: ListPath, id: String },
    Move { path: ListPath, id: String, from: usize, to: usize },
    /// Block type changed; the whole subtree is replaced
    Replace { path: ListPath, id: String, node: Node },
    /// Non-slot props changed; carries the complete new set
    #[serde(rename_all = "camelCase")]
    UpdateProps { path: ListPath, id: String, props: Props },
    #[serde(rename_all = "camelCase")]
    UpdateReadOnly { path: ListPath, id: String, read_only: bool },
    UpdateRoot { props: Props },
    AddZone { name: String, nodes: Vec<Node> },
    RemoveZone { name: String },
}

/// Diff two documents
pub fn diff_documents(old: &Document, new: &Document) -> Vec<TreePatch> {
    let mut patches = Vec::new();

    let old_root = value_props(&old.root.props);
    let new_root = value_props(&new.root.props);
    if old_root != new_root {
        patches.push(TreePatch::UpdateRoot { props: new_root });
    }
    diff_slots(&old.root.props, &new.root.props, ListPath::RootSlot, &mut patches);

    diff_list(ListPath::Content, &old.content, &new.content, &mut patches);

    for name in old.zones.keys() {
        if !new.zones.contains_key(name) {
            patches.push(TreePatch::RemoveZone { name: name.clone() });
        }
    }
    for (name, nodes) in &new.zones {
        match old.zones.get(name) {
            Some(old_nodes) => diff_list(ListPath::Zone(name.clone()), old_nodes, nodes, &mut patches),
            None => patches.push(TreePatch::AddZone {
                name: name.clone(),
                nodes: nodes.clone(),
            }),
        }
    }

    patches
}

/// Diff two node lists
pub fn diff_list(path: ListPath, old: &[Node], new: &[Node], patches: &mut Vec<TreePatch>) {
    // First occurrence wins when ids repeat
    let mut old_index: HashMap<&str, usize> = HashMap::new();
    for (index, node) in old.iter().enumerate() {
        old_index.entry(node.id.as_str()).or_insert(index);
    }

    // Pair each new node with at most one old node
    let mut matched = vec![None; new.len()];
    let mut claimed = vec![false; old.len()];
    for (new_pos, node) in new.iter().enumerate() {
        if let Some(&old_pos) = old_index.get(node.id.as_str()) {
            if !claimed[old_pos] {
                claimed[old_pos] = true;
                matched[new_pos] = Some(old_pos);
            }
        }
    }

    for (old_pos, node) in old.iter().enumerate() {
        if !claimed[old_pos] {
            patches.push(TreePatch::Remove {
                path: path.clone(),
                id: node.id.clone(),
            });
        }
    }

    let survivors: Vec<usize> = matched.iter().flatten().copied().collect();
    let stable = longest_increasing_subsequence(&survivors);

    for (new_pos, node) in new.iter().enumerate() {
        let Some(old_pos) = matched[new_pos] else {
            patches.push(TreePatch::Insert {
                path: path.clone(),
                index: new_pos,
                node: node.clone(),
            });
            continue;
        };

        if !stable.contains(&old_pos) {
            patches.push(TreePatch::Move {
                path: path.clone(),
                id: node.id.clone(),
                from: old_pos,
                to: new_pos,
            });
        }

        diff_node(&path, &old[old_pos], node, patches);
    }
}

fn diff_node(path: &ListPath, old: &Node, new: &Node, patches: &mut Vec<TreePatch>) {
    if old.kind != new.kind {
        patches.push(TreePatch::Replace {
            path: path.clone(),
            id: new.id.clone(),
            node: new.clone(),
        });
        return;
    }

    let old_props = value_props(&old.props);
    let new_props = value_props(&new.props);
    if old_props != new_props {
        patches.push(TreePatch::UpdateProps {
            path: path.clone(),
            id: new.id.clone(),
            props: new_props,
        });
    }

    if old.read_only != new.read_only {
        patches.push(TreePatch::UpdateReadOnly {
            path: path.clone(),
            id: new.id.clone(),
            read_only: new.read_only,
        });
    }

    diff_slots(
        &old.props,
        &new.props,
        |name| ListPath::Slot {
            parent: new.id.clone(),
            name,
        },
        patches,
    );
}

fn diff_slots<F>(old: &Props, new: &Props, make_path: F, patches: &mut Vec<TreePatch>)
where
    F: Fn(String) -> ListPath,
{
    let names: BTreeSet<&String> = old
        .iter()
        .chain(new.iter())
        .filter(|(_, value)| value.as_slot().is_some())
        .map(|(name, _)| name)
        .collect();

    for name in names {
        let old_nodes = old.get(name).and_then(PropValue::as_slot).map(Vec::as_slice).unwrap_or(&[]);
        let new_nodes = new.get(name).and_then(PropValue::as_slot).map(Vec::as_slice).unwrap_or(&[]);
        diff_list(make_path(name.clone()), old_nodes, new_nodes, patches);
    }
}

/// Props without slots; slot contents are diffed separately
fn value_props(props: &Props) -> Props {
    props
        .iter()
        .filter(|(_, value)| value.as_slot().is_none())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Values of the longest strictly increasing subsequence of `values`
fn longest_increasing_subsequence(values: &[usize]) -> BTreeSet<usize> {
    // tails[k]: index into `values` of the smallest tail of a run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &value) in values.iter().enumerate() {
        let pos = tails.partition_point(|&t| values[t] < value);
        if pos > 0 {
            previous[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut result = BTreeSet::new();
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        result.insert(values[i]);
        cursor = previous[i];
    }
    result
}
