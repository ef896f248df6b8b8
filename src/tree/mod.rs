//! Generalized suffix tree construction and the arrays derived from it.
//!
//! The pipeline is: validate the request, concatenate the words with their
//! per-word sentinels, stream the text through Ukkonen's algorithm, tidy
//! the implicit tree into an explicit one, and materialize the suffix and
//! LCP arrays. A single call to [`build`] runs all of it synchronously; the
//! returned [`Tree`] is immutable.
//!
//! Construction state, including the shared leaf end, lives inside the
//! builder for exactly one construction, so independent builds can run
//! concurrently.

pub mod error;

mod builder;
mod extract;
mod node;
mod tidy;
mod verify;

pub use node::{Node, NodeId, NodeStore, ROOT};

use crate::alphabet::{self, Alphabet, SymbolOrder};
use crate::render;

use self::builder::Ukkonen;
use self::error::{InvariantViolation, TreeError};

/// Build-time options; [`build`] uses the defaults, [`build_with_config`]
/// takes this.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Symbols the input words may use, in order.
    pub alphabet: Alphabet,
    /// Narrate each construction phase and print a tree snapshot after it.
    pub walkthrough: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::lowercase(),
            walkthrough: false,
        }
    }
}

/// A completed, tidied generalized suffix tree over `w₁·σ₁·…·wₖ·σₖ`.
#[derive(Debug)]
pub struct Tree {
    text: Vec<char>,
    words: Vec<String>,
    terminators: Vec<char>,
    store: NodeStore,
    order: SymbolOrder,
    sa: Vec<usize>,
    lcp: Vec<usize>,
}

/// Builds the tree for `words` over the lowercase alphabet, closing word
/// `i` with `terminators[i]`.
pub fn build(words: &[String], terminators: &[char]) -> Result<Tree, TreeError> {
    build_with_config(words, terminators, &BuildConfig::default())
}

/// Builds the tree with an explicit alphabet and options.
pub fn build_with_config(
    words: &[String],
    terminators: &[char],
    config: &BuildConfig,
) -> Result<Tree, TreeError> {
    alphabet::validate(words, terminators, &config.alphabet)?;

    let text = alphabet::concatenate(words, terminators);
    let order = SymbolOrder::new(&config.alphabet, terminators);

    let mut builder = Ukkonen::new(&text, config.walkthrough);
    for pos in 0..text.len() {
        builder.extend(pos)?;
        if config.walkthrough {
            println!("{}", render::snapshot(builder.store(), &text, &order, builder.leaf_end()));
        }
    }
    let mut store = builder.finish();

    tidy::tidy(&mut store, &text, &order);
    let arrays = extract::extract(&store, &order);

    Ok(Tree {
        text,
        words: words.to_vec(),
        terminators: terminators[..words.len()].to_vec(),
        store,
        order,
        sa: arrays.sa,
        lcp: arrays.lcp,
    })
}

impl Tree {
    /// Starting positions of all suffixes of the concatenated text, in
    /// sorted order.
    pub fn suffix_array(&self) -> &[usize] {
        &self.sa
    }

    /// `lcp_array()[r]` is the longest common prefix of the suffixes at
    /// ranks `r - 1` and `r`; entry 0 is 0.
    pub fn lcp_array(&self) -> &[usize] {
        &self.lcp
    }

    /// The suffixes themselves in sorted order, each truncated at its
    /// first sentinel inclusive.
    pub fn string_suffixes(&self) -> Vec<String> {
        self.sa
            .iter()
            .map(|&start| {
                self.text[start..]
                    .iter()
                    .copied()
                    .scan(false, |done, c| {
                        if *done {
                            return None;
                        }
                        *done = self.order.is_terminator(c);
                        Some(c)
                    })
                    .collect()
            })
            .collect()
    }

    pub fn root(&self) -> &Node {
        self.store.node(ROOT)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    /// Children of a node in the traversal order (terminators first, then
    /// alphabet letters).
    pub fn children(&self, id: NodeId) -> Vec<(char, NodeId)> {
        self.store.children_sorted(id, &self.order)
    }

    pub fn word(&self, i: usize) -> Option<&str> {
        self.words.get(i).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The sentinels actually consumed, one per word.
    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Length of the concatenated text, sentinels included.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn store(&self) -> &NodeStore {
        &self.store
    }

    pub(crate) fn order(&self) -> &SymbolOrder {
        &self.order
    }

    /// Re-derives every structural and array property from first
    /// principles; an error here means a construction bug.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        verify::verify(&self.store, &self.text, &self.order, &self.sa, &self.lcp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_list(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_build_single_word() {
        let tree = build(&word_list(&["banana"]), &['A']).unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.suffix_array(), &[6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(tree.lcp_array(), &[0, 0, 1, 3, 0, 0, 2]);
        tree.verify().unwrap();
    }

    #[test]
    fn test_string_suffixes_are_sorted_and_truncated() {
        let tree = build(&word_list(&["banana"]), &['A']).unwrap();
        let suffixes = tree.string_suffixes();
        assert_eq!(suffixes[0], "A");
        assert_eq!(suffixes[4], "bananaA");
        for s in &suffixes {
            assert!(s.ends_with('A'));
            assert_eq!(s.matches('A').count(), 1);
        }
    }

    #[test]
    fn test_introspection_helpers() {
        let tree = build(&word_list(&["ab", "ba"]), &['A', 'B']).unwrap();
        assert_eq!(tree.word(0), Some("ab"));
        assert_eq!(tree.word(2), None);
        assert_eq!(tree.words().len(), 2);
        assert_eq!(tree.terminators(), &['A', 'B']);
        assert!(!tree.root().is_leaf());
        assert!(tree.node_count() <= 2 * tree.len());
    }

    #[test]
    fn test_unused_terminators_are_not_consumed() {
        let tree = build(&word_list(&["ab"]), &['A', 'B', 'C']).unwrap();
        assert_eq!(tree.terminators(), &['A']);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_invalid_input_fails_before_building() {
        let err = build(&word_list(&["aXb"]), &['A']).unwrap_err();
        assert!(matches!(err, TreeError::Input(_)));
    }
}
