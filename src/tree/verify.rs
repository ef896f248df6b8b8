//! Whole-tree invariant checker.
//!
//! Re-derives everything the tree claims from first principles and reports
//! the first disagreement: leaf labels against the text, suffix starts as
//! a permutation, fan-out of internal nodes, suffix-link labels, the node
//! budget, and both derived arrays against directly computed references.
//! Heavier than anything on the construction path; meant for tests and for
//! callers that want a paranoid post-build check.

use std::cmp::Ordering;

use crate::alphabet::SymbolOrder;

use super::error::InvariantViolation;
use super::node::{NodeId, NodeStore, ROOT};

pub(crate) fn verify(
    store: &NodeStore,
    text: &[char],
    order: &SymbolOrder,
    sa: &[usize],
    lcp: &[usize],
) -> Result<(), InvariantViolation> {
    let budget = 2 * text.len();
    if store.len() > budget {
        return Err(InvariantViolation::NodeBudgetExceeded {
            nodes: store.len(),
            budget,
        });
    }

    let mut starts_seen = vec![false; text.len()];
    let mut labels: Vec<Option<Vec<char>>> = vec![None; store.len()];
    labels[ROOT] = Some(Vec::new());
    check_structure(store, text, order, ROOT, &mut Vec::new(), &mut starts_seen, &mut labels)?;

    if !starts_seen.iter().all(|&seen| seen) {
        return Err(InvariantViolation::SuffixStartsNotPermutation { len: text.len() });
    }

    check_suffix_links(store, &labels)?;
    check_arrays(text, order, sa, lcp)?;
    Ok(())
}

/// One traversal collects leaf labels, suffix starts, fan-out, and the path
/// label of every internal node.
fn check_structure(
    store: &NodeStore,
    text: &[char],
    order: &SymbolOrder,
    node: NodeId,
    path: &mut Vec<char>,
    starts_seen: &mut [bool],
    labels: &mut [Option<Vec<char>>],
) -> Result<(), InvariantViolation> {
    for (_, child) in store.children_sorted(node, order) {
        let child_node = store.node(child);
        let start = child_node.start();
        let end = match child_node.end() {
            Some(end) if end > start => end,
            _ => {
                return Err(InvariantViolation::LeafLabelMismatch {
                    node: child,
                    start,
                })
            }
        };
        path.extend_from_slice(&text[start..end]);

        if child_node.is_leaf() {
            let Some(suffix_start) = start.checked_sub(path.len() - (end - start)) else {
                return Err(InvariantViolation::LeafLabelMismatch { node: child, start });
            };
            let expected_end = suffix_start + path.len();
            if expected_end > text.len()
                || path.as_slice() != &text[suffix_start..expected_end]
                || starts_seen[suffix_start]
            {
                return Err(InvariantViolation::LeafLabelMismatch {
                    node: child,
                    start: suffix_start,
                });
            }
            starts_seen[suffix_start] = true;
        } else {
            if child_node.child_count() < 2 {
                return Err(InvariantViolation::UndersizedInternal {
                    node: child,
                    children: child_node.child_count(),
                });
            }
            labels[child] = Some(path.clone());
            check_structure(store, text, order, child, path, starts_seen, labels)?;
        }

        path.truncate(path.len() - (end - start));
    }
    Ok(())
}

/// Every installed link must drop exactly the first symbol of its source's
/// path label.
fn check_suffix_links(
    store: &NodeStore,
    labels: &[Option<Vec<char>>],
) -> Result<(), InvariantViolation> {
    for id in 0..store.len() {
        let node = store.node(id);
        let Some(target) = node.suffix_link() else {
            continue;
        };
        if node.is_leaf() || store.node(target).is_leaf() {
            return Err(InvariantViolation::SuffixLinkEndpointNotInternal { node: id });
        }
        match (&labels[id], &labels[target]) {
            (Some(from), Some(to)) if from.len() == to.len() + 1 && from[1..] == to[..] => {}
            _ => return Err(InvariantViolation::SuffixLinkLabelMismatch { from: id, to: target }),
        }
    }
    Ok(())
}

/// SA against a direct sort of all suffixes, LCP against direct prefix
/// comparison. Sentinels are unique in the text, so no two suffixes compare
/// equal through one and the full-text order equals the truncated order.
fn check_arrays(
    text: &[char],
    order: &SymbolOrder,
    sa: &[usize],
    lcp: &[usize],
) -> Result<(), InvariantViolation> {
    let mut reference: Vec<usize> = (0..text.len()).collect();
    reference.sort_by(|&a, &b| compare_suffixes(text, order, a, b));
    for (rank, (&got, &expected)) in sa.iter().zip(&reference).enumerate() {
        if got != expected {
            return Err(InvariantViolation::ArrayMismatch { array: "SA", rank });
        }
    }
    if sa.len() != reference.len() || lcp.len() != sa.len() {
        return Err(InvariantViolation::ArrayMismatch { array: "SA", rank: sa.len() });
    }

    for rank in 1..sa.len() {
        let a = &text[sa[rank - 1]..];
        let b = &text[sa[rank]..];
        let direct = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
        if lcp[rank] != direct {
            return Err(InvariantViolation::ArrayMismatch { array: "LCP", rank });
        }
    }
    if !lcp.is_empty() && lcp[0] != 0 {
        return Err(InvariantViolation::ArrayMismatch { array: "LCP", rank: 0 });
    }
    Ok(())
}

fn compare_suffixes(text: &[char], order: &SymbolOrder, a: usize, b: usize) -> Ordering {
    let a = text[a..].iter().map(|&c| order.rank(c));
    let b = text[b..].iter().map(|&c| order.rank(c));
    a.cmp(b)
}
