//! Public suffix tree.
//!
//! Rules are stored in a prefix tree keyed by label and read right-to-left,
//! so "com.au" lives at `root -> "au" -> "com"`. Lookups walk the same path
//! over a domain's labels:
//! - O(k) per lookup where k is the number of labels in the domain
//! - wildcard (`*.ck`) and exception (`!www.ck`) rules resolve at the node
//!   declaring them
//!
//! ## Example
//!
//! ```
//! use tld_tree::tree::{build_tree, match_suffix_length};
//!
//! let tree = build_tree(["com", "au", "com.au"]);
//!
//! assert_eq!(match_suffix_length(&["a", "b", "com"], tree.root()), 1);
//! assert_eq!(match_suffix_length(&["b", "com", "au"], tree.root()), 2);
//! assert_eq!(match_suffix_length(&["com", "au"], tree.root()), 1);
//! ```

mod builder;
mod matcher;
mod node;

pub use builder::{build_tree, build_tree_from_rules, build_tree_with};
pub use matcher::{match_suffix_length, public_suffix};
pub use node::{Branch, SuffixTree, TreeNode};

pub(crate) use matcher::{prepared_labels, suffix_with};
