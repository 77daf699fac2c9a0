//! Weighted tree nodes shared by the priority queue and the Huffman tree.

use std::fmt;

/// A Huffman tree node.
///
/// Leaves carry one symbol; internal nodes own exactly two children and
/// carry no symbol. A subtree is owned by its parent (or by the priority
/// queue until it is merged) and dropped as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single symbol and its frequency.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Two merged subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf node.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Self::Leaf { symbol, weight }
    }

    /// Merge two subtrees under a new internal node.
    pub fn internal(left: Node, right: Node) -> Self {
        Self::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Priority key of this node.
    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Overwrite the priority key of this node.
    pub fn set_weight(&mut self, new_weight: u64) {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight = new_weight,
        }
    }

    /// Symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Internal { .. } => None,
        }
    }

    /// Check whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Left and right children of an internal node.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some((left, right)),
        }
    }
}

/// Renders `symbol:weight`, with `#` standing in for internal nodes.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf { symbol, weight } if symbol.is_ascii_graphic() => {
                write!(f, "{}:{}", *symbol as char, weight)
            }
            Self::Leaf { symbol, weight } => write!(f, "0x{:02X}:{}", symbol, weight),
            Self::Internal { weight, .. } => write!(f, "#:{}", weight),
        }
    }
}
