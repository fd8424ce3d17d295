use std::collections::{HashMap, HashSet};

/// Node of the suffix tree.
///
/// Children are keyed by label and the tree is read right-to-left, so the
/// root's children are top-level labels ("com", "uk", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A suffix ends here and nothing continues below it.
    /// Same meaning as a `Branch` with `terminal` set and nothing else.
    Terminal,
    /// Any other node
    Branch(Branch),
}

/// Inner node of the suffix tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    /// A suffix may end at this node
    pub(crate) terminal: bool,
    /// Present when a wildcard rule covers the level below this node.
    /// Holds the labels excluded from the wildcard by exception rules.
    pub(crate) exceptions: Option<HashSet<String>>,
    /// Child nodes keyed by label
    pub(crate) children: HashMap<String, TreeNode>,
}

impl TreeNode {
    /// Whether a suffix may end at this node
    pub fn is_terminal(&self) -> bool {
        match self {
            TreeNode::Terminal => true,
            TreeNode::Branch(b) => b.terminal,
        }
    }

    /// Child for an exact label
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        match self {
            TreeNode::Terminal => None,
            TreeNode::Branch(b) => b.children.get(label),
        }
    }

    /// Wildcard exception labels, if a wildcard covers the level below
    pub fn exceptions(&self) -> Option<&HashSet<String>> {
        match self {
            TreeNode::Terminal => None,
            TreeNode::Branch(b) => b.exceptions.as_ref(),
        }
    }

    /// Iterate over `(label, child)` pairs in no particular order
    pub fn children(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        let map = match self {
            TreeNode::Terminal => None,
            TreeNode::Branch(b) => Some(&b.children),
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children().map(|(_, c)| c.node_count()).sum::<usize>()
    }
}

impl Default for TreeNode {
    fn default() -> Self {
        TreeNode::Branch(Branch::default())
    }
}

/// Immutable suffix tree produced by the builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixTree {
    pub(crate) root: TreeNode,
    pub(crate) rule_count: usize,
}

impl SuffixTree {
    /// Root node
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of rules inserted while building
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Whether the tree holds no rule at all
    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }
}
