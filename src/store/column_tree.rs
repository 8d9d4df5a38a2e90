//! Column definition tree normalization.
//!
//! Two pure passes over the host's tree:
//! 1. pad every branch with synthetic groups so all leaves sit at one depth
//! 2. flatten into leaf order, per-depth group ids and per-group metadata
//!
//! Neither pass mutates its input.

use std::collections::HashMap;

use crate::types::{
    ColumnDefaults, ColumnGroupDef, ColumnNode, ColumnOptions, ColumnPinned, GroupData,
};

const PADDING_PREFIX: &str = "__pad";

/// Output of [`normalize`].
#[derive(Debug, Default)]
pub(crate) struct Flattened {
    pub order: Vec<String>,
    pub options: HashMap<String, ColumnOptions>,
    pub groups: Vec<Vec<String>>,
    pub groups_data: HashMap<String, GroupData>,
}

/// Number of group levels above the deepest leaf of `node`.
fn height(node: &ColumnNode) -> usize {
    match node {
        ColumnNode::Column(_) => 0,
        ColumnNode::Group(group) => 1 + group.children.iter().map(height).max().unwrap_or(0),
    }
}

struct Padder {
    next_id: usize,
}

impl Padder {
    /// Return `node` wrapped so its leaves end exactly `levels` groups down.
    fn pad(&mut self, node: &ColumnNode, levels: usize) -> ColumnNode {
        let own = height(node);
        let inner = match node {
            ColumnNode::Column(_) => node.clone(),
            ColumnNode::Group(group) => {
                let children = group
                    .children
                    .iter()
                    .map(|child| self.pad(child, own.saturating_sub(1)))
                    .collect();
                ColumnNode::Group(ColumnGroupDef {
                    children,
                    ..group.clone()
                })
            }
        };
        (own..levels).fold(inner, |child, _| {
            let id = format!("{PADDING_PREFIX}{}", self.next_id);
            self.next_id += 1;
            ColumnNode::Group(ColumnGroupDef::new(id, vec![child]))
        })
    }
}

/// Pad the tree so every leaf sits at the same depth.
pub(crate) fn pad_columns(columns: &[ColumnNode]) -> Vec<ColumnNode> {
    let depth = columns.iter().map(height).max().unwrap_or(0);
    let mut padder = Padder { next_id: 0 };
    columns
        .iter()
        .map(|node| padder.pad(node, depth))
        .collect()
}

pub(crate) fn is_padding(group_id: &str) -> bool {
    group_id.starts_with(PADDING_PREFIX)
}

/// Pad, flatten and resolve a column tree.
pub(crate) fn normalize(columns: &[ColumnNode], defaults: &ColumnDefaults) -> Flattened {
    let padded = pad_columns(columns);
    let mut out = Flattened::default();
    for node in &padded {
        flatten(node, 0, defaults, &mut out);
    }
    apply_visibility(&mut out.options, &out.groups_data);
    out
}

/// Returns the leaf fields and group ids below (and including) `node`.
fn flatten(
    node: &ColumnNode,
    level: usize,
    defaults: &ColumnDefaults,
    out: &mut Flattened,
) -> (Vec<String>, Vec<String>) {
    match node {
        ColumnNode::Column(def) => {
            if out.options.contains_key(&def.field) {
                tracing::debug!(field = %def.field, "duplicate column field ignored");
                return (Vec::new(), Vec::new());
            }
            out.order.push(def.field.clone());
            out.options
                .insert(def.field.clone(), ColumnOptions::resolve(def, defaults));
            (vec![def.field.clone()], Vec::new())
        }
        ColumnNode::Group(group) => {
            let mut columns = Vec::new();
            let mut groups = Vec::new();
            for child in &group.children {
                let (c, g) = flatten(child, level + 1, defaults, out);
                columns.extend(c);
                groups.extend(g);
            }
            if out.groups.len() <= level {
                out.groups.resize_with(level + 1, Vec::new);
            }
            if let Some(ids) = out.groups.get_mut(level) {
                ids.push(group.group_id.clone());
            }
            out.groups_data.insert(
                group.group_id.clone(),
                GroupData {
                    header_name: group.header_name.clone(),
                    columns: columns.clone(),
                    groups: groups.clone(),
                    collapsed: group.collapsed,
                    padding: is_padding(&group.group_id),
                },
            );
            let mut ids = Vec::with_capacity(groups.len() + 1);
            ids.push(group.group_id.clone());
            ids.extend(groups);
            (columns, ids)
        }
    }
}

/// A column is visible unless some collapsed group containing it does not
/// start with it.
pub(crate) fn apply_visibility(
    options: &mut HashMap<String, ColumnOptions>,
    groups_data: &HashMap<String, GroupData>,
) {
    for (field, column) in options.iter_mut() {
        column.visible = groups_data
            .values()
            .filter(|g| g.collapsed && g.columns.contains(field))
            .all(|g| g.columns.first() == Some(field));
    }
}

/// Non-padding groups that contain `field`, sorted by id.
pub(crate) fn enclosing_groups<'a>(
    groups_data: &'a HashMap<String, GroupData>,
    field: &str,
) -> Vec<&'a str> {
    let mut ids: Vec<&str> = groups_data
        .iter()
        .filter(|(_, g)| !g.padding && g.columns.iter().any(|c| c == field))
        .map(|(id, _)| id.as_str())
        .collect();
    ids.sort_unstable();
    ids
}

/// Index in `order` just past the innermost non-padding group holding
/// `field`, or the end of `order` when it sits in none. `order` must not
/// contain `field` itself.
pub(crate) fn group_end(
    order: &[String],
    groups_data: &HashMap<String, GroupData>,
    field: &str,
) -> usize {
    let innermost = groups_data
        .values()
        .filter(|g| !g.padding && g.columns.iter().any(|c| c == field))
        .min_by_key(|g| g.columns.len());
    let Some(group) = innermost else {
        return order.len();
    };
    order
        .iter()
        .rposition(|f| f != field && group.columns.contains(f))
        .map_or(order.len(), |i| i + 1)
}

/// Re-sort group columns and per-depth group ids after `order` changed.
/// Memberships are untouched.
pub(crate) fn reorder_groups(
    order: &[String],
    groups: &mut [Vec<String>],
    groups_data: &mut HashMap<String, GroupData>,
) {
    let rank: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, f)| (f.as_str(), i))
        .collect();
    let column_rank = |field: &String| rank.get(field.as_str()).copied().unwrap_or(usize::MAX);
    for group in groups_data.values_mut() {
        group.columns.sort_by_key(column_rank);
    }
    let first: HashMap<String, Option<usize>> = groups_data
        .iter()
        .map(|(id, g)| (id.clone(), g.columns.first().map(column_rank)))
        .collect();
    let sort_ids = |ids: &mut Vec<String>| {
        // Empty groups keep their place behind the previous group.
        let mut last = 0;
        let mut keyed: Vec<(usize, String)> = ids
            .drain(..)
            .map(|id| {
                if let Some(Some(key)) = first.get(&id) {
                    last = *key;
                }
                (last, id)
            })
            .collect();
        keyed.sort_by_key(|(key, _)| *key);
        ids.extend(keyed.into_iter().map(|(_, id)| id));
    };
    for ids in groups.iter_mut() {
        sort_ids(ids);
    }
    for group in groups_data.values_mut() {
        sort_ids(&mut group.groups);
    }
}

/// Split visible columns into (pinned left, normal, pinned right), each in
/// declaration order.
pub(crate) fn split_pinned(
    order: &[String],
    options: &HashMap<String, ColumnOptions>,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut left = Vec::new();
    let mut normal = Vec::new();
    let mut right = Vec::new();
    for field in order {
        let Some(column) = options.get(field) else {
            continue;
        };
        if !column.visible {
            continue;
        }
        match column.pinned {
            Some(ColumnPinned::Left) => left.push(field.clone()),
            Some(ColumnPinned::Right) => right.push(field.clone()),
            None => normal.push(field.clone()),
        }
    }
    (left, normal, right)
}
