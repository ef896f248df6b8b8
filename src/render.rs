//! Text rendering of trees and arrays for the CLI.
//!
//! Rendering never mutates: the walkthrough snapshot works on the raw store
//! mid-construction (leaf edges still tracking the shared leaf end), the
//! tree view on a finished [`Tree`].

use crate::alphabet::SymbolOrder;
use crate::tree::{NodeStore, Tree, ROOT};

/// Indented view of a finished tree: one line per edge, leaves tagged with
/// their suffix-array rank.
pub fn tree(tree: &Tree) -> String {
    let mut out = String::new();
    subtree(
        tree.store(),
        tree.text(),
        tree.order(),
        tree.len(),
        ROOT,
        0,
        &mut out,
    );
    out
}

/// Mid-construction view used by the walkthrough; unfrozen leaf edges end
/// at the builder's current leaf end.
pub(crate) fn snapshot(
    store: &NodeStore,
    text: &[char],
    order: &SymbolOrder,
    leaf_end: usize,
) -> String {
    let mut out = String::new();
    subtree(store, text, order, leaf_end, ROOT, 0, &mut out);
    out
}

fn subtree(
    store: &NodeStore,
    text: &[char],
    order: &SymbolOrder,
    leaf_end: usize,
    node: usize,
    indent: usize,
    out: &mut String,
) {
    for (_, child) in store.children_sorted(node, order) {
        let child_node = store.node(child);
        let start = child_node.start();
        let end = child_node.end().unwrap_or(leaf_end);
        let label: String = text[start..end].iter().collect();
        out.push_str(&"    ".repeat(indent));
        out.push_str(&format!("'{}' ({}..{})", label, start, end));
        if child_node.is_leaf() {
            if let Some(rank) = child_node.sa_rank() {
                out.push_str(&format!(" #{}", rank));
            }
        }
        out.push('\n');
        if !child_node.is_leaf() {
            subtree(store, text, order, leaf_end, child, indent + 1, out);
        }
    }
}

/// One integer per line, rank first.
pub fn array(values: &[usize]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(rank, v)| format!("{}: {}\n", rank, v))
        .collect()
}

/// Suffixes in rank order, one per line.
pub fn suffixes(tree: &Tree) -> String {
    tree.string_suffixes()
        .iter()
        .enumerate()
        .map(|(rank, s)| format!("{}: {}\n", rank, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build;

    #[test]
    fn test_tree_rendering_lists_every_leaf_rank() {
        let words = vec!["banana".to_string()];
        let tree_value = build(&words, &['A']).unwrap();
        let rendered = tree(&tree_value);
        for rank in 0..tree_value.len() {
            assert!(rendered.contains(&format!("#{}", rank)), "missing rank {}", rank);
        }
    }

    #[test]
    fn test_array_rendering() {
        assert_eq!(array(&[3, 1]), "0: 3\n1: 1\n");
    }

    #[test]
    fn test_suffix_rendering_is_sorted() {
        let words = vec!["ab".to_string()];
        let tree_value = build(&words, &['A']).unwrap();
        assert_eq!(suffixes(&tree_value), "0: A\n1: abA\n2: bA\n");
    }
}
