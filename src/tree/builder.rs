//! Ukkonen's on-line construction over the concatenated text.
//!
//! One phase per text position. Each phase bumps the shared leaf end (which
//! silently extends every existing leaf edge) and then inserts the pending
//! suffixes one by one until either all are placed or one turns out to be
//! already present, which ends the phase early because every shorter
//! pending suffix is then present too.
//!
//! The active point (node, edge symbol, length) names the spot where the
//! next insertion starts. It is kept as three builder fields mutated
//! per-component; no operation treats it as one value. `active_length` is
//! always strictly below the length of the edge it indexes; the walk-down
//! restores that before any symbol on the edge is examined.

use super::error::InvariantViolation;
use super::node::{NodeId, NodeStore, ROOT};

/// Construction state for one text. `leaf_end` lives here, not in any
/// process-wide cell, so independent constructions never alias it.
pub(crate) struct Ukkonen<'a> {
    text: &'a [char],
    store: NodeStore,
    active_node: NodeId,
    active_edge: char,
    active_length: usize,
    remaining: usize,
    /// Exclusive end shared by every unfrozen leaf edge; equals `pos + 1`
    /// during phase `pos`.
    leaf_end: usize,
    narrate: bool,
}

impl<'a> Ukkonen<'a> {
    pub(crate) fn new(text: &'a [char], narrate: bool) -> Self {
        Self {
            text,
            store: NodeStore::new(),
            active_node: ROOT,
            active_edge: '\0',
            active_length: 0,
            remaining: 0,
            leaf_end: 0,
            narrate,
        }
    }

    pub(crate) fn store(&self) -> &NodeStore {
        &self.store
    }

    pub(crate) fn leaf_end(&self) -> usize {
        self.leaf_end
    }

    /// Consumes the builder once every phase has run.
    pub(crate) fn finish(self) -> NodeStore {
        self.store
    }

    /// Runs phase `pos`: extends all leaves through `text[pos]` and inserts
    /// the suffixes that rule 3 has been holding back.
    pub(crate) fn extend(&mut self, pos: usize) -> Result<(), InvariantViolation> {
        // Rule 1 for every leaf at once: the shared end moves, the leaves
        // follow.
        self.leaf_end = pos + 1;
        self.remaining += 1;

        // At most one internal node per extension is waiting for its suffix
        // link, and it must be resolved within this phase.
        let mut last_new_internal: Option<NodeId> = None;

        let symbol = self.text[pos];
        if self.narrate {
            println!("== phase {} ('{}') ==", pos + 1, symbol);
        }

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = symbol;
            }

            match self.store.get_child(self.active_node, self.active_edge) {
                None => {
                    // Rule 2, node at node: the suffix falls off the tree
                    // right at the active node.
                    let leaf = self.store.new_leaf(pos);
                    self.store.set_child(self.active_node, self.active_edge, leaf)?;
                    if self.narrate {
                        println!(
                            "  rule 2: leaf {} under node {} at '{}'",
                            leaf, self.active_node, self.active_edge
                        );
                    }
                    if let Some(pending) = last_new_internal.take() {
                        self.store.set_suffix_link(pending, self.active_node)?;
                    }
                }
                Some(next) => {
                    if self.walk_down(next, pos) {
                        continue;
                    }
                    let probe = self.text[self.store.node(next).start() + self.active_length];
                    if probe == symbol {
                        // Rule 3: already present. Every shorter pending
                        // suffix is present too, so the phase ends here.
                        if self.active_node != ROOT {
                            if let Some(pending) = last_new_internal.take() {
                                self.store.set_suffix_link(pending, self.active_node)?;
                            }
                        }
                        self.active_length += 1;
                        if self.narrate {
                            println!("  rule 3: '{}' already on edge, phase stops", symbol);
                        }
                        break;
                    }
                    // Rule 2, edge split: the suffix diverges mid-edge.
                    let split = self.split_edge(next, pos)?;
                    if let Some(pending) = last_new_internal.take() {
                        self.store.set_suffix_link(pending, split)?;
                    }
                    last_new_internal = Some(split);
                }
            }

            self.remaining -= 1;
            if self.active_node == ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = self.text[pos + 1 - self.remaining];
            } else if self.active_node != ROOT {
                // Only a node created this very phase can still lack its
                // link; falling back to the root is then correct.
                self.active_node = self
                    .store
                    .node(self.active_node)
                    .suffix_link()
                    .unwrap_or(ROOT);
            }
        }

        if self.narrate {
            println!(
                "  active node {}, edge '{}', length {}, remaining {}",
                self.active_node, self.active_edge, self.active_length, self.remaining
            );
        }
        Ok(())
    }

    /// Skip/count: when the active length reaches the edge under it, move
    /// the active node through that edge instead of comparing symbols.
    fn walk_down(&mut self, next: NodeId, pos: usize) -> bool {
        let edge_len = self.store.edge_length(next, self.leaf_end);
        if self.active_length < edge_len {
            return false;
        }
        self.active_length -= edge_len;
        self.active_edge = self.text[pos - self.active_length];
        self.active_node = next;
        if self.narrate {
            println!("  walk down to node {}", next);
        }
        true
    }

    /// Splits the edge into `next` at the active length. The new internal
    /// node keeps the matched prefix; `next` keeps the rest under its first
    /// diverging symbol; the new leaf hangs beside it.
    fn split_edge(&mut self, next: NodeId, pos: usize) -> Result<NodeId, InvariantViolation> {
        let next_start = self.store.node(next).start();
        let split = self
            .store
            .new_internal(next_start, next_start + self.active_length);
        self.store.replace_child(self.active_node, self.active_edge, split)?;
        self.store.advance_start(next, self.active_length);
        let diverging = self.text[self.store.node(next).start()];
        self.store.set_child(split, diverging, next)?;
        let leaf = self.store.new_leaf(pos);
        self.store.set_child(split, self.text[pos], leaf)?;
        if self.narrate {
            println!(
                "  rule 2: split node {} into {}, leaf {} at '{}'",
                next, split, leaf, self.text[pos]
            );
        }
        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_store(text: &str) -> NodeStore {
        let chars: Vec<char> = text.chars().collect();
        let mut builder = Ukkonen::new(&chars, false);
        for pos in 0..chars.len() {
            builder.extend(pos).unwrap();
        }
        builder.finish()
    }

    fn leaf_count(store: &NodeStore) -> usize {
        (0..store.len()).filter(|&id| store.node(id).is_leaf()).count()
    }

    #[test]
    fn test_unique_last_symbol_makes_all_suffixes_explicit() {
        // abbcA: one split (shared "b"), five leaves, seven nodes.
        let store = build_store("abbcA");
        assert_eq!(leaf_count(&store), 5);
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_repetitive_text_splits_once_per_repeat() {
        // aaaaA: leaves n+1, internal splits n-1 for a^n.
        let n = 4;
        let store = build_store("aaaaA");
        assert_eq!(leaf_count(&store), n + 1);
        assert_eq!(store.len(), 1 + (n + 1) + (n - 1));
    }

    #[test]
    fn test_node_budget_holds() {
        let text = "abcabxabcdA";
        let store = build_store(text);
        assert!(store.len() <= 2 * text.len());
    }

    #[test]
    fn test_root_children_cover_distinct_first_symbols() {
        let store = build_store("abcabxabcdA");
        // a, b, c, d, x and the sentinel each head exactly one root edge.
        assert_eq!(store.node(ROOT).child_count(), 6);
    }

    #[test]
    fn test_suffix_links_land_on_internals() {
        let store = build_store("abcabxabcdA");
        for id in 0..store.len() {
            if let Some(target) = store.node(id).suffix_link() {
                assert!(!store.node(target).is_leaf());
            }
        }
    }
}
