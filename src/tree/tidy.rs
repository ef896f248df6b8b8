//! The tidy pass: freeze leaf ends, number leaves.
//!
//! Construction leaves every leaf edge coupled to the builder's shared leaf
//! end. Tidying makes the tree explicit: each leaf's end is frozen just
//! past the first terminator at or after its edge start, and leaves are
//! numbered with their rank in sorted suffix order. The rank order falls
//! out of a single depth-first traversal that visits children in ascending
//! symbol rank.
//!
//! The freeze position is always the represented suffix's own sentinel: an
//! internal node's path label occurs at least twice in the text, a string
//! containing a sentinel occurs exactly once, so the path above a leaf
//! never crosses one.

use crate::alphabet::SymbolOrder;

use super::node::{NodeId, NodeStore, ROOT};

/// Freezes every leaf and assigns ranks; returns the leaves in rank order.
pub(crate) fn tidy(store: &mut NodeStore, text: &[char], order: &SymbolOrder) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    visit(store, text, order, ROOT, &mut leaves);
    leaves
}

fn visit(
    store: &mut NodeStore,
    text: &[char],
    order: &SymbolOrder,
    node: NodeId,
    leaves: &mut Vec<NodeId>,
) {
    for (_, child) in store.children_sorted(node, order) {
        if store.node(child).is_leaf() {
            let start = store.node(child).start();
            let sentinel = first_terminator_at(text, order, start);
            store.freeze_leaf(child, sentinel + 1);
            store.assign_rank(child, leaves.len());
            leaves.push(child);
        } else {
            visit(store, text, order, child, leaves);
        }
    }
}

/// Position of the first terminator at or after `start`. Terminators close
/// every word, so the scan always lands inside the text.
fn first_terminator_at(text: &[char], order: &SymbolOrder, start: usize) -> usize {
    let mut p = start;
    while !order.is_terminator(text[p]) {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, SymbolOrder};
    use crate::tree::builder::Ukkonen;

    fn tidied(text: &str, terminators: &[char]) -> (NodeStore, Vec<NodeId>, Vec<char>) {
        let chars: Vec<char> = text.chars().collect();
        let order = SymbolOrder::new(&Alphabet::lowercase(), terminators);
        let mut builder = Ukkonen::new(&chars, false);
        for pos in 0..chars.len() {
            builder.extend(pos).unwrap();
        }
        let mut store = builder.finish();
        let leaves = tidy(&mut store, &chars, &order);
        (store, leaves, chars)
    }

    #[test]
    fn test_every_leaf_is_frozen_at_a_terminator() {
        let (store, leaves, chars) = tidied("abaabA", &['A']);
        assert_eq!(leaves.len(), chars.len());
        for &leaf in &leaves {
            let end = store.node(leaf).end().unwrap();
            assert!(end > store.node(leaf).start());
            assert_eq!(chars[end - 1], 'A');
        }
    }

    #[test]
    fn test_ranks_follow_visit_order() {
        let (store, leaves, _) = tidied("bananaA", &['A']);
        for (rank, &leaf) in leaves.iter().enumerate() {
            assert_eq!(store.node(leaf).sa_rank(), Some(rank));
        }
    }

    #[test]
    fn test_multi_word_leaves_stop_at_their_own_sentinel() {
        // ab·A·ba·B: a leaf starting inside the first word must freeze at
        // 'A' even though 'B' also lies ahead of it.
        let (store, leaves, chars) = tidied("abAbaB", &['A', 'B']);
        for &leaf in &leaves {
            let node = store.node(leaf);
            let end = node.end().unwrap();
            let label = &chars[node.start()..end];
            let terminators = label.iter().filter(|c| **c == 'A' || **c == 'B').count();
            assert_eq!(terminators, 1, "edge label {:?} crosses a sentinel", label);
        }
    }
}
