// ============================================================================
// Portal Core - Topic Tree Builder
// File: crates/portal-core/src/topic_tree.rs
// ============================================================================
//! Assembles flat topic rows into a filtered, nested forest.
//!
//! Root and sibling order is fixed once by a stable sort on
//! `(parent_id or 0, lower(title))`; the search filter only removes nodes,
//! it never reorders them. A node survives the filter when it matches the
//! search term itself or when any of its descendants survives.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use portal_shared::constants::MAX_TOPIC_DEPTH;
use portal_shared::utils::normalize_search;
use portal_shared::TopicId;

use crate::domain::{TopicNode, TopicRow};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Build the topic forest.
///
/// `article_matches` holds ids of topics whose articles matched the same
/// search term in full-text search; it is ignored when no term is active.
/// Parents missing from `rows` demote their children to roots. Parent cycles
/// are broken by demoting the smallest id in each cycle to a root, and nodes
/// nested [`MAX_TOPIC_DEPTH`] levels down start a new root.
pub fn build_topic_tree(
    mut rows: Vec<TopicRow>,
    search: Option<&str>,
    article_matches: &HashSet<TopicId>,
) -> Vec<TopicNode> {
    if rows.is_empty() {
        return Vec::new();
    }

    let term = normalize_search(search);

    rows.sort_by_cached_key(|row| (row.parent_topic_id.unwrap_or(0), row.title.to_lowercase()));

    let mut index: HashMap<TopicId, usize> = HashMap::with_capacity(rows.len());
    for (pos, row) in rows.iter().enumerate() {
        index.entry(row.id).or_insert(pos);
    }

    let self_matches: Vec<bool> = rows
        .iter()
        .map(|row| match &term {
            None => true,
            Some(term) => row_matches(row, term) || article_matches.contains(&row.id),
        })
        .collect();

    let mut parents: Vec<Option<usize>> = rows
        .iter()
        .map(|row| row.parent_topic_id.and_then(|pid| index.get(&pid).copied()))
        .collect();
    break_cycles(&rows, &mut parents);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots = Vec::new();
    for (pos, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(pos),
            None => roots.push(pos),
        }
    }
    cap_depth(&rows, &mut children, &mut roots);

    let mut nodes: Vec<Option<TopicNode>> = rows.into_iter().map(|row| Some(row.into())).collect();
    let forest = assemble(&roots, &mut nodes, &children, &self_matches);

    debug!(
        "Built topic tree: {} roots, {} nodes, search={:?}",
        forest.len(),
        forest.iter().map(TopicNode::node_count).sum::<usize>(),
        term
    );

    forest
}

fn row_matches(row: &TopicRow, term: &str) -> bool {
    row.title.to_lowercase().contains(term)
        || row.description.to_lowercase().contains(term)
        || row.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

/// Clear one parent link per cycle so every node is reachable from a root
fn break_cycles(rows: &[TopicRow], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::New; parents.len()];

    for start in 0..parents.len() {
        if state[start] != Visit::New {
            continue;
        }

        let mut path = Vec::new();
        let mut current = Some(start);
        while let Some(pos) = current {
            match state[pos] {
                Visit::New => {
                    state[pos] = Visit::OnPath;
                    path.push(pos);
                    current = parents[pos];
                }
                Visit::OnPath => {
                    if let Some(cycle_start) = path.iter().position(|&p| p == pos) {
                        let cycle = &path[cycle_start..];
                        if let Some(&victim) = cycle.iter().min_by_key(|&&p| (rows[p].id, p)) {
                            warn!(
                                "Topic parent cycle of {} nodes broken at topic {}",
                                cycle.len(),
                                rows[victim].id
                            );
                            parents[victim] = None;
                        }
                    }
                    break;
                }
                Visit::Done => break,
            }
        }

        for pos in path {
            state[pos] = Visit::Done;
        }
    }
}

/// Re-root every node sitting [`MAX_TOPIC_DEPTH`] levels down.
///
/// Roots keep sort order, so a re-rooted subtree lands among the orphans.
fn cap_depth(rows: &[TopicRow], children: &mut [Vec<usize>], roots: &mut Vec<usize>) {
    let mut pending: Vec<(usize, usize)> = roots.iter().map(|&pos| (pos, 0)).collect();
    let mut demoted = Vec::new();

    while let Some((pos, depth)) = pending.pop() {
        if depth + 1 >= MAX_TOPIC_DEPTH {
            for child in children[pos].drain(..) {
                pending.push((child, 0));
                demoted.push(child);
            }
        } else {
            pending.extend(children[pos].iter().map(|&child| (child, depth + 1)));
        }
    }

    if !demoted.is_empty() {
        warn!(
            "{} topics nested deeper than {} levels re-rooted (first: {})",
            demoted.len(),
            MAX_TOPIC_DEPTH,
            rows[demoted[0]].id
        );
        roots.extend(demoted);
        roots.sort_unstable();
    }
}

/// Post-order assembly over an explicit stack.
///
/// A node is built once all of its children are; pruned children leave `None`.
fn assemble(
    roots: &[usize],
    nodes: &mut [Option<TopicNode>],
    children: &[Vec<usize>],
    self_matches: &[bool],
) -> Vec<TopicNode> {
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&pos| (pos, false)).collect();

    while let Some((pos, expanded)) = stack.pop() {
        if !expanded {
            stack.push((pos, true));
            stack.extend(children[pos].iter().rev().map(|&child| (child, false)));
            continue;
        }

        let Some(mut node) = nodes[pos].take() else {
            continue;
        };
        let kept: Vec<TopicNode> = children[pos]
            .iter()
            .filter_map(|&child| nodes[child].take())
            .collect();

        if self_matches[pos] || !kept.is_empty() {
            node.children = kept;
            nodes[pos] = Some(node);
        }
    }

    roots.iter().filter_map(|&pos| nodes[pos].take()).collect()
}
