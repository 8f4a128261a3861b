/// A node of the generic S-expression tree.
///
/// Leaves carry the lexeme they were parsed from as their tag. A parenthesized
/// group takes its first atom as the tag and every following sub-expression as
/// a child, in source order.
///
/// # Examples
/// ```text
/// (:int, 5)          → Node { tag: ":int", children: [Node { tag: "5" }] }
/// :true              → Node { tag: ":true", children: [] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub children: Vec<Node>,
    /// Line of the token the tag came from
    pub line: usize,
}

impl Node {
    pub fn leaf(tag: impl Into<String>, line: usize) -> Self {
        Node {
            tag: tag.into(),
            children: Vec::new(),
            line,
        }
    }

    pub fn group(tag: impl Into<String>, children: Vec<Node>, line: usize) -> Self {
        Node {
            tag: tag.into(),
            children,
            line,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Nesting depth of composite nodes: 0 for a leaf, 1 for a group of leaves.
    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            0
        } else {
            1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
        }
    }
}
