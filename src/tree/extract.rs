//! Suffix array and LCP materialization.
//!
//! Both arrays fall out of one rank-ordered depth-first traversal of the
//! tidied tree. A leaf reached below a path of length `depth` represents
//! the suffix starting at `leaf.start - depth`; consecutive leaves share a
//! prefix exactly as long as the path of their lowest common ancestor,
//! which is the node at which the traversal last switched children.
//!
//! The arrays are pure functions of the tidied tree; extraction can run any
//! number of times without touching it.

use crate::alphabet::SymbolOrder;

use super::node::{NodeId, NodeStore, ROOT};

/// The derived arrays, index-aligned: `lcp[r]` refers to the suffixes at
/// ranks `r - 1` and `r`, and `lcp[0]` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arrays {
    pub sa: Vec<usize>,
    pub lcp: Vec<usize>,
}

pub(crate) fn extract(store: &NodeStore, order: &SymbolOrder) -> Arrays {
    let mut state = Extraction {
        store,
        order,
        sa: Vec::new(),
        lcp: Vec::new(),
        branch_depth: 0,
    };
    state.visit(ROOT, 0);
    Arrays {
        sa: state.sa,
        lcp: state.lcp,
    }
}

struct Extraction<'a> {
    store: &'a NodeStore,
    order: &'a SymbolOrder,
    sa: Vec<usize>,
    lcp: Vec<usize>,
    /// Path length of the node at which the traversal last switched
    /// children; the LCP of the previous leaf and the next one.
    branch_depth: usize,
}

impl Extraction<'_> {
    /// `depth` is the path length down to (and including) `node`'s edge.
    fn visit(&mut self, node: NodeId, depth: usize) {
        for (index, (_, child)) in self.store.children_sorted(node, self.order).into_iter().enumerate() {
            if index > 0 {
                self.branch_depth = depth;
            }
            let child_node = self.store.node(child);
            if child_node.is_leaf() {
                self.lcp.push(if self.sa.is_empty() { 0 } else { self.branch_depth });
                self.sa.push(child_node.start() - depth);
            } else {
                let edge = child_node.end().unwrap_or(0) - child_node.start();
                self.visit(child, depth + edge);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, SymbolOrder};
    use crate::tree::builder::Ukkonen;
    use crate::tree::tidy::tidy;

    fn arrays(text: &str, terminators: &[char]) -> Arrays {
        let chars: Vec<char> = text.chars().collect();
        let order = SymbolOrder::new(&Alphabet::lowercase(), terminators);
        let mut builder = Ukkonen::new(&chars, false);
        for pos in 0..chars.len() {
            builder.extend(pos).unwrap();
        }
        let mut store = builder.finish();
        tidy(&mut store, &chars, &order);
        extract(&store, &order)
    }

    #[test]
    fn test_banana_arrays() {
        let arrays = arrays("bananaA", &['A']);
        assert_eq!(arrays.sa, vec![6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(arrays.lcp, vec![0, 0, 1, 3, 0, 0, 2]);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let chars: Vec<char> = "abaabA".chars().collect();
        let order = SymbolOrder::new(&Alphabet::lowercase(), &['A']);
        let mut builder = Ukkonen::new(&chars, false);
        for pos in 0..chars.len() {
            builder.extend(pos).unwrap();
        }
        let mut store = builder.finish();
        tidy(&mut store, &chars, &order);
        assert_eq!(extract(&store, &order), extract(&store, &order));
    }

    #[test]
    fn test_lcp_matches_direct_comparison() {
        let text: Vec<char> = "mississippiA".chars().collect();
        let arrays = arrays("mississippiA", &['A']);
        for r in 1..arrays.sa.len() {
            let a = &text[arrays.sa[r - 1]..];
            let b = &text[arrays.sa[r]..];
            let direct = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
            assert_eq!(arrays.lcp[r], direct, "rank {}", r);
        }
    }
}
