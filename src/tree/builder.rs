use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::nameprep::{AsciiPreparer, NamePreparer};
use crate::types::{Rule, Section};

use super::node::{Branch, SuffixTree, TreeNode};

/// Build a suffix tree from rule tokens ("com", "*.ck", "!www.ck"), using
/// the default [`AsciiPreparer`].
pub fn build_tree<I, S>(tokens: I) -> SuffixTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_tree_with(tokens, &AsciiPreparer)
}

/// Build a suffix tree from rule tokens, preparing every label with `preparer`.
///
/// Tokens that cannot form a rule are skipped.
pub fn build_tree_with<I, S>(tokens: I, preparer: &dyn NamePreparer) -> SuffixTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::new(preparer);
    for token in tokens {
        let token = token.as_ref().trim();
        match Rule::parse(token, Section::Icann) {
            Some(rule) => builder.insert(&rule.labels),
            None => warn!(token, "skipping malformed suffix rule"),
        }
    }
    builder.finish()
}

/// Build a suffix tree from already parsed rules.
pub fn build_tree_from_rules<'a, I>(rules: I, preparer: &dyn NamePreparer) -> SuffixTree
where
    I: IntoIterator<Item = &'a Rule>,
{
    let mut builder = TreeBuilder::new(preparer);
    for rule in rules {
        builder.insert(&rule.labels);
    }
    builder.finish()
}

/// Mutable tree used while inserting rules
struct TreeBuilder<'p> {
    root: NodeBuilder,
    rule_count: usize,
    preparer: &'p dyn NamePreparer,
}

#[derive(Default)]
struct NodeBuilder {
    terminal: bool,
    exceptions: Option<HashSet<String>>,
    children: HashMap<String, NodeBuilder>,
}

impl<'p> TreeBuilder<'p> {
    fn new(preparer: &'p dyn NamePreparer) -> Self {
        Self {
            root: NodeBuilder::default(),
            rule_count: 0,
            preparer,
        }
    }

    /// Insert one rule, labels in left-to-right order
    fn insert(&mut self, labels: &[String]) {
        if labels.is_empty() {
            return;
        }
        self.rule_count += 1;

        let mut node = &mut self.root;
        let mut rest = labels;
        loop {
            let Some((label, init)) = rest.split_last() else {
                node.terminal = true;
                return;
            };

            // Wildcards only cover the single level below this node; labels
            // left of the marker are not descended into.
            if label == "*" {
                node.exceptions.get_or_insert_with(HashSet::new);
                return;
            }

            if let Some(excepted) = label.strip_prefix('!') {
                let excepted = self.preparer.prepare(excepted).into_owned();
                node.exceptions
                    .get_or_insert_with(HashSet::new)
                    .insert(excepted);
                return;
            }

            let key = self.preparer.prepare(label).into_owned();
            node = node.children.entry(key).or_default();
            rest = init;
        }
    }

    fn finish(self) -> SuffixTree {
        let root = self.root.freeze();
        debug!(
            rules = self.rule_count,
            nodes = root.node_count(),
            "built suffix tree"
        );
        SuffixTree {
            root,
            rule_count: self.rule_count,
        }
    }
}

impl NodeBuilder {
    fn freeze(self) -> TreeNode {
        if self.terminal && self.exceptions.is_none() && self.children.is_empty() {
            return TreeNode::Terminal;
        }

        let children = self
            .children
            .into_iter()
            .map(|(label, child)| (label, child.freeze()))
            .collect();

        TreeNode::Branch(Branch {
            terminal: self.terminal,
            exceptions: self.exceptions,
            children,
        })
    }
}
