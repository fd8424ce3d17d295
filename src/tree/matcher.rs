//! Longest public suffix lookup over a [`SuffixTree`].
//!
//! Labels are walked right-to-left, mirroring the DNS hierarchy. Wildcard
//! exceptions are resolved at the node that declares the wildcard and only
//! for the single label below it.

use std::borrow::Cow;

use crate::nameprep::NamePreparer;

use super::node::{SuffixTree, TreeNode};

/// Number of trailing `labels` that form the longest public suffix.
///
/// `labels` is the domain split on '.', in left-to-right order, already
/// prepared the same way the tree was built.
///
/// Returns 0 if the domain does not end with a known suffix, and also if the
/// suffix would consume the entire domain: at least one label must remain as
/// the registrable name.
pub fn match_suffix_length<S: AsRef<str>>(labels: &[S], root: &TreeNode) -> usize {
    let length = labels.len();
    let mut node = root;
    let mut count = 0;

    for index in (0..length).rev() {
        let label = labels[index].as_ref();

        let branch = match node {
            TreeNode::Terminal => break,
            TreeNode::Branch(b) => b,
        };

        // "com.de": "de" alone must leave "com" free even though "com.de"
        // is a suffix of its own
        if index == 0 && branch.terminal {
            break;
        }

        if let Some(child) = branch.children.get(label) {
            count += 1;
            node = child;
            continue;
        }

        if let Some(exceptions) = &branch.exceptions {
            if !exceptions.contains(label) {
                count += 1;
            }
            break;
        }

        if branch.terminal {
            break;
        }

        return 0;
    }

    if count == length {
        return 0;
    }
    count
}

/// Prepare every label of `domain` with `preparer`
pub(crate) fn prepared_labels<'a>(domain: &'a str, preparer: &dyn NamePreparer) -> Vec<Cow<'a, str>> {
    domain.split('.').map(|l| preparer.prepare(l)).collect()
}

/// Public suffix of `domain`, with a leading '.'.
///
/// - `None` input: `None`
/// - single label ("localhost"): `Some("")`
/// - no matching rule: `None`
/// - otherwise the matched trailing labels as given in `domain` (".co.uk")
pub fn public_suffix(
    tree: &SuffixTree,
    preparer: &dyn NamePreparer,
    domain: Option<&str>,
) -> Option<String> {
    suffix_with(domain, |d| {
        match_suffix_length(&prepared_labels(d, preparer), tree.root())
    })
}

/// Shared tail of the suffix lookups: `match_len` yields the number of
/// matched trailing labels of a multi-label domain.
pub(crate) fn suffix_with(
    domain: Option<&str>,
    match_len: impl FnOnce(&str) -> usize,
) -> Option<String> {
    let domain = domain?;
    if !domain.contains('.') {
        return Some(String::new());
    }

    let count = match_len(domain);
    if count == 0 {
        return None;
    }

    let raw: Vec<&str> = domain.split('.').collect();
    Some(format!(".{}", raw[raw.len() - count..].join(".")))
}

impl SuffixTree {
    /// Match length for already prepared labels, see [`match_suffix_length`]
    pub fn match_len<S: AsRef<str>>(&self, labels: &[S]) -> usize {
        match_suffix_length(labels, &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nameprep::AsciiPreparer;
    use crate::tree::build_tree;

    fn sample_tree() -> SuffixTree {
        build_tree([
            "com", "com.au", "au", "de", "com.de", "github.io", "*.ck", "!www.ck",
        ])
    }

    fn suffix(tree: &SuffixTree, domain: &str) -> Option<String> {
        public_suffix(tree, &AsciiPreparer, Some(domain))
    }

    #[test]
    fn test_basic_suffixes() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "a.b.com").as_deref(), Some(".com"));
        assert_eq!(suffix(&tree, "b.com.au").as_deref(), Some(".com.au"));
        assert_eq!(suffix(&tree, "com.au").as_deref(), Some(".au"));
        assert_eq!(suffix(&tree, "a.b.de").as_deref(), Some(".de"));
    }

    #[test]
    fn test_left_most_label_protection() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "a.b.com.de").as_deref(), Some(".com.de"));
        assert_eq!(suffix(&tree, "com.de").as_deref(), Some(".de"));
    }

    #[test]
    fn test_private_suffix() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "a.github.io").as_deref(), Some(".github.io"));
        assert_eq!(suffix(&tree, "x.a.github.io").as_deref(), Some(".github.io"));
    }

    #[test]
    fn test_unknown_suffix() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "a.b.blob"), None);
        assert_eq!(suffix(&tree, "b.com.yx"), None);
        // "io" itself is not a rule
        assert_eq!(suffix(&tree, "a.io"), None);
    }

    #[test]
    fn test_wildcards_and_exceptions() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "a.foo.ck").as_deref(), Some(".foo.ck"));
        assert_eq!(suffix(&tree, "www.ck").as_deref(), Some(".ck"));
        assert_eq!(suffix(&tree, "a.www.ck").as_deref(), Some(".ck"));
    }

    #[test]
    fn test_wildcard_never_consumes_whole_domain() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "com.ck"), None);
    }

    #[test]
    fn test_single_label_and_none() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "localhost").as_deref(), Some(""));
        assert_eq!(suffix(&tree, "foo").as_deref(), Some(""));
        assert_eq!(suffix(&tree, "").as_deref(), Some(""));
        assert_eq!(public_suffix(&tree, &AsciiPreparer, None), None);
    }

    #[test]
    fn test_identity_on_own_output() {
        let tree = sample_tree();
        for s in [".com", ".com.au", ".foo.ck", ".github.io"] {
            assert_eq!(suffix(&tree, s).as_deref(), Some(s));
        }
    }

    #[test]
    fn test_case_insensitive_lookup_keeps_input_case() {
        let tree = sample_tree();
        assert_eq!(suffix(&tree, "A.GitHub.IO").as_deref(), Some(".GitHub.IO"));
    }

    #[test]
    fn test_match_length_counts() {
        let tree = sample_tree();
        assert_eq!(tree.match_len(&["a", "b", "com"]), 1);
        assert_eq!(tree.match_len(&["b", "com", "au"]), 2);
        assert_eq!(tree.match_len(&["com"]), 0);
        assert_eq!(tree.match_len::<&str>(&[]), 0);
    }

    #[test]
    fn test_exception_only_resolves_one_level() {
        // the wildcard at "ck" decides one label; deeper labels are left alone
        let tree = sample_tree();
        assert_eq!(tree.match_len(&["a", "b", "foo", "ck"]), 2);
        assert_eq!(tree.match_len(&["a", "b", "www", "ck"]), 1);
    }

    #[test]
    fn test_default_wildcard_rule() {
        // "*" as a rule of its own makes every unknown TLD a suffix
        let tree = build_tree(["*", "com"]);
        assert_eq!(suffix(&tree, "a.example").as_deref(), Some(".example"));
        assert_eq!(suffix(&tree, "a.com").as_deref(), Some(".com"));
    }
}
