//! Match trees.
//!
//! A match tree indexes a set of precondition-bearing elements (ground
//! actions or ground axioms) by their fluent precondition bits. Each
//! internal node tests one ground atom and splits the elements three ways:
//! those requiring the atom present, those requiring it absent, and those
//! that don't care. A query walks the tree over a state's fluent bitset,
//! taking the matching branch plus the don't-care branch at every node, and
//! collects the elements of every leaf it reaches — so a query costs at
//! most one bit probe per atom in the probe order.
//!
//! Atoms where every remaining element is indifferent produce no node at
//! all; in mutex-rich domains the tree size stays linear in the number of
//! elements.

use crate::formalism::{Fluent, GroundAtomId};

use super::bitset::FactBitset;

/// How one element's precondition constrains one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolarity {
    Positive,
    Negative,
    DontCare,
}

#[derive(Debug)]
enum MatchTreeNode {
    Selector {
        atom: GroundAtomId<Fluent>,
        present: Option<usize>,
        absent: Option<usize>,
        dont_care: Option<usize>,
    },
    Leaf {
        elements: Vec<u32>,
    },
}

/// A decision tree over ground-atom bits indexing a set of elements.
#[derive(Debug, Default)]
pub struct MatchTree {
    nodes: Vec<MatchTreeNode>,
    root: Option<usize>,
}

impl MatchTree {
    /// Build a tree over `elements`, probing atoms in `order`.
    ///
    /// `polarity` reports how an element's precondition constrains an atom.
    /// The probe order determines the tree shape and must be deterministic.
    pub fn build(
        elements: &[u32],
        order: &[GroundAtomId<Fluent>],
        polarity: impl Fn(u32, GroundAtomId<Fluent>) -> MatchPolarity,
    ) -> Self {
        let mut tree = MatchTree {
            nodes: Vec::new(),
            root: None,
        };
        tree.root = tree.build_node(elements.to_vec(), 0, order, &polarity);
        tree
    }

    fn build_node(
        &mut self,
        elements: Vec<u32>,
        mut position: usize,
        order: &[GroundAtomId<Fluent>],
        polarity: &impl Fn(u32, GroundAtomId<Fluent>) -> MatchPolarity,
    ) -> Option<usize> {
        if elements.is_empty() {
            return None;
        }

        while position < order.len() {
            let atom = order[position];

            let mut present = Vec::new();
            let mut absent = Vec::new();
            let mut dont_care = Vec::new();
            for &element in &elements {
                match polarity(element, atom) {
                    MatchPolarity::Positive => present.push(element),
                    MatchPolarity::Negative => absent.push(element),
                    MatchPolarity::DontCare => dont_care.push(element),
                }
            }

            // Skip atoms nothing here constrains.
            if present.is_empty() && absent.is_empty() {
                position += 1;
                continue;
            }

            let present_child = self.build_node(present, position + 1, order, polarity);
            let absent_child = self.build_node(absent, position + 1, order, polarity);
            let dont_care_child = self.build_node(dont_care, position + 1, order, polarity);

            let index = self.nodes.len();
            self.nodes.push(MatchTreeNode::Selector {
                atom,
                present: present_child,
                absent: absent_child,
                dont_care: dont_care_child,
            });
            return Some(index);
        }

        let index = self.nodes.len();
        self.nodes.push(MatchTreeNode::Leaf { elements });
        Some(index)
    }

    /// Collect the elements whose fluent precondition is compatible with
    /// the state bitset, in deterministic traversal order.
    pub fn applicable(&self, state: &FactBitset<Fluent>, out: &mut Vec<u32>) {
        if let Some(root) = self.root {
            self.visit(root, state, out);
        }
    }

    fn visit(&self, node: usize, state: &FactBitset<Fluent>, out: &mut Vec<u32>) {
        match &self.nodes[node] {
            MatchTreeNode::Leaf { elements } => out.extend_from_slice(elements),
            MatchTreeNode::Selector {
                atom,
                present,
                absent,
                dont_care,
            } => {
                let branch = if state.contains(*atom) { present } else { absent };
                if let Some(child) = branch {
                    self.visit(*child, state, out);
                }
                if let Some(child) = dont_care {
                    self.visit(*child, state, out);
                }
            }
        }
    }

    /// Number of nodes, selector and leaf alike.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
