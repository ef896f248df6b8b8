//! # gstree - generalized suffix trees with derived arrays
//!
//! Builds a generalized suffix tree over a set of words in a single on-line
//! pass (Ukkonen's algorithm), closing each word with its own sentinel
//! terminator so that every suffix of every word ends at exactly one leaf.
//! From the finished tree it derives the suffix array and LCP array of the
//! concatenated text.
//!
//! ## Overview
//!
//! - Words are validated against a fixed, ordered alphabet; terminators are
//!   disjoint from it and sort before it, in the order supplied.
//! - Construction is linear in the total input length and entirely
//!   self-contained: all mutable state, including the shared leaf-end
//!   position that implicitly grows every leaf edge, belongs to one build.
//!   Independent builds can run concurrently.
//! - A tidy pass freezes each leaf just past its word's sentinel and
//!   numbers leaves in sorted suffix order; the arrays are read off one
//!   rank-ordered traversal.
//!
//! ## Example Usage
//!
//! ```rust
//! use gstree::build;
//!
//! let words = vec!["banana".to_string()];
//! let tree = build(&words, &['$']).unwrap();
//!
//! assert_eq!(tree.suffix_array(), &[6, 5, 3, 1, 0, 4, 2]);
//! assert_eq!(tree.lcp_array(), &[0, 0, 1, 3, 0, 0, 2]);
//! assert_eq!(tree.string_suffixes()[0], "$");
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`]: alphabets, terminators, symbol ordering, validation
//! - [`tree`]: node store, builder, tidy pass, array extraction
//! - [`render`]: plain-text views of trees and arrays

pub mod alphabet;
pub mod render;
pub mod tree;

// Re-export commonly used types at the crate root
pub use alphabet::{Alphabet, SymbolOrder, DEFAULT_TERMINATORS};
pub use tree::error::{InputError, InvariantViolation, TreeError};
pub use tree::{build, build_with_config, BuildConfig, Node, NodeId, Tree};
