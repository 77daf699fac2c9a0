//! Huffman tree construction, code derivation and the decoding walk.

use crate::codes::{Code, CodeTable};
use crate::frequency::FrequencyTable;
use crate::heap::PriorityQueue;
use crate::node::Node;
use oxihuff_core::{HuffError, Result};

/// A Huffman tree built from a [`FrequencyTable`].
///
/// Construction is deterministic: leaves enter the queue in ascending symbol
/// order, the first node extracted becomes the left child and the second
/// the right child. Building twice from the same table gives the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::EmptyInput`] if the table holds no symbols.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let mut queue = PriorityQueue::with_capacity(frequencies.len());
        for (symbol, count) in frequencies.iter() {
            queue.insert(Node::leaf(symbol, count));
        }

        while queue.len() > 1 {
            let left = queue.extract_min()?;
            let right = queue.extract_min()?;
            queue.insert(Node::internal(left, right));
        }

        let root = queue.extract_min()?;
        log::trace!(
            "built Huffman tree: {} symbols, root weight {}",
            frequencies.len(),
            root.weight()
        );
        Ok(Self { root })
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the tree and return its root.
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn symbol_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => count += 1,
            }
        }
        count
    }

    /// Longest root-to-leaf path, which is the longest code length.
    ///
    /// A single-leaf tree reports 1, matching its one-bit code.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, level)) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    stack.push((left, level + 1));
                    stack.push((right, level + 1));
                }
                None => deepest = deepest.max(level),
            }
        }
        deepest.max(1)
    }

    /// Derive the code of every leaf: `0` for each left step, `1` for each
    /// right step.
    ///
    /// A single-leaf tree has no steps, so its only symbol gets the code `0`.
    pub fn derive_codes(&self) -> CodeTable {
        let mut table = CodeTable::new();

        if let Node::Leaf { symbol, .. } = self.root {
            table.set(symbol, Code::new(vec![false]));
            return table;
        }

        let mut path = Vec::new();
        collect_codes(&self.root, &mut path, &mut table);

        for (symbol, code) in table.iter() {
            log::trace!("code {:#04x} -> {}", symbol, code);
        }
        table
    }

    /// Start a bit-by-bit walk from the root.
    pub fn walker(&self) -> TreeWalker<'_> {
        TreeWalker {
            root: &self.root,
            current: &self.root,
            bit_position: 0,
        }
    }
}

fn collect_codes(node: &Node, path: &mut Vec<bool>, table: &mut CodeTable) {
    match node {
        Node::Leaf { symbol, .. } => table.set(*symbol, Code::new(path.clone())),
        Node::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, table);
            path.pop();

            path.push(true);
            collect_codes(right, path, table);
            path.pop();
        }
    }
}

/// Cursor that walks a [`HuffmanTree`] one bit at a time.
#[derive(Debug, Clone)]
pub struct TreeWalker<'a> {
    root: &'a Node,
    current: &'a Node,
    bit_position: u64,
}

impl TreeWalker<'_> {
    /// Follow one bit (`false` = left, `true` = right).
    ///
    /// Returns the symbol when a leaf is reached, after which the walk
    /// restarts at the root.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::InvalidCode`] for a `1` bit on a single-leaf
    /// tree, the only way to step off the tree.
    #[inline]
    pub fn step(&mut self, bit: bool) -> Result<Option<u8>> {
        let position = self.bit_position;
        self.bit_position += 1;

        let next = match self.current {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            // Only a single-leaf root is ever current while being a leaf.
            Node::Leaf { symbol, .. } => {
                if bit {
                    return Err(HuffError::invalid_code(position));
                }
                return Ok(Some(*symbol));
            }
        };

        match &**next {
            Node::Leaf { symbol, .. } => {
                self.current = self.root;
                Ok(Some(*symbol))
            }
            internal => {
                self.current = internal;
                Ok(None)
            }
        }
    }

    /// Check whether the walk sits at the root (between symbols).
    pub fn is_at_root(&self) -> bool {
        std::ptr::eq(self.current, self.root)
    }

    /// Bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.bit_position
    }

    /// Check that the walk ended between symbols.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::TruncatedStream`] if the last code was cut short.
    pub fn finish(&self) -> Result<()> {
        if self.is_at_root() {
            Ok(())
        } else {
            Err(HuffError::truncated(self.bit_position))
        }
    }
}
