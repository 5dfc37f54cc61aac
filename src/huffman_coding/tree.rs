//! Builds the huffman tree from a symbol frequency table.
//!
//! The frequency table is indexed by symbol (0-255) and holds the number of times each symbol was seen.
//! Symbols with a count of zero are not part of the tree.
//!
//! Equal weights are common (every symbol seen exactly once, for example), and the order in which
//! equal weight nodes are merged decides the exact bytes of the serialized table. The pending nodes
//! live in a small binary heap with fixed sift rules:
//!
//! - the heap starts as the leaves in ascending symbol order, heapified bottom-up,
//! - a parent and child swap only when the child is strictly lighter,
//! - sift-down prefers the left child unless the right child is strictly lighter,
//! - the first node popped becomes the left child of the merge, the second the right.
//!
//! With these rules {A:3, B:2, C:1, D:1} yields the codes A=0, B=10, D=110, C=111.

use log::{debug, trace};

use crate::error::{HuffError, Result};

/// Number of distinct byte values that can be coded.
pub const ALPHABET_SIZE: usize = 256;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Sum of the frequencies of every leaf below (or at) this node
    pub weight: u64,
    /// Height of the subtree. A leaf has depth 0.
    pub depth: u8,
    /// Number of leaves in the subtree
    pub syms: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for a symbol
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            depth: 0,
            syms: 1,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two subtrees under a new internal node
    pub fn join(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            depth: left.depth.max(right.depth) + 1,
            syms: left.syms + right.syms,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Total number of nodes (leaves and internal) in this subtree.
    /// A full binary tree with n leaves always has 2n - 1 nodes.
    pub fn node_count(&self) -> usize {
        2 * self.syms as usize - 1
    }
}

/// Build the huffman tree for a symbol indexed frequency table. Returns the root node.
///
/// Fails with EmptyInput when every count is zero, and with InputTooLarge when a nonzero count is
/// found at an index that does not fit in a byte.
pub fn build(freqs: &[u32]) -> Result<Node> {
    if freqs.len() > ALPHABET_SIZE && freqs[ALPHABET_SIZE..].iter().any(|&f| f > 0) {
        return Err(HuffError::InputTooLarge {
            symbols: freqs.len(),
        });
    }

    // One leaf per symbol actually present, in symbol order
    let leaves: Vec<Node> = freqs
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f > 0)
        .map(|(sym, &f)| Node::leaf(sym as u8, f as u64))
        .collect();

    if leaves.is_empty() {
        return Err(HuffError::EmptyInput);
    }
    debug!("Building huffman tree from {} symbols", leaves.len());

    let mut pending = PendingHeap::from_leaves(leaves);

    // Merge the two lightest nodes until only the root is left
    loop {
        let left = pending.pop().ok_or(HuffError::EmptyInput)?;
        let right = match pending.pop() {
            Some(right) => right,
            None => {
                debug!(
                    "Huffman tree complete: weight {}, {} leaves, longest code {} bits",
                    left.weight, left.syms, left.depth
                );
                return Ok(left);
            }
        };
        trace!(
            "merge {} ({}) + {} ({})",
            left.weight,
            left.syms,
            right.weight,
            right.syms
        );
        pending.push(Node::join(left, right));
    }
}

/// Array backed min-heap of pending nodes, ordered by weight only.
struct PendingHeap {
    nodes: Vec<Node>,
}

impl PendingHeap {
    /// Heapify the leaves in place, bottom-up.
    fn from_leaves(nodes: Vec<Node>) -> Self {
        let mut heap = PendingHeap { nodes };
        let n = heap.nodes.len();
        for i in (0..n / 2).rev() {
            heap.sift_down(i, n);
        }
        heap
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn lighter(&self, a: usize, b: usize) -> bool {
        self.nodes[a].weight < self.nodes[b].weight
    }

    fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    fn pop(&mut self) -> Option<Node> {
        let last = self.nodes.len().checked_sub(1)?;
        self.nodes.swap(0, last);
        self.sift_down(0, last);
        self.nodes.pop()
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.lighter(child, parent) {
                break;
            }
            self.nodes.swap(parent, child);
            child = parent;
        }
    }

    /// Sift the node at `parent` down, looking only at the first `end` slots.
    fn sift_down(&mut self, mut parent: usize, end: usize) {
        loop {
            let left = 2 * parent + 1;
            if left >= end {
                break;
            }
            let mut child = left;
            if left + 1 < end && self.lighter(left + 1, left) {
                child = left + 1;
            }
            if !self.lighter(child, parent) {
                break;
            }
            self.nodes.swap(parent, child);
            parent = child;
        }
    }
}
