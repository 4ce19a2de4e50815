//! Defines the inner representation of the decision tree.
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::TreeError;
use super::split_rule::{Splitter, LR};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node with two children.
    Branch(BranchNode),

    /// A node with no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of the decision tree.
/// Each `BranchNode` has exactly two children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


impl BranchNode {
    /// Returns the `BranchNode` from the given components.
    #[inline]
    pub(super) fn from_raw(
        rule: Splitter,
        left: Box<Node>,
        right: Box<Node>,
    ) -> Self
    {
        Self { rule, left, right, }
    }


    /// The rule this node routes records by.
    pub fn rule(&self) -> &Splitter {
        &self.rule
    }
}


/// Represents the leaf nodes of the decision tree.
/// A leaf holds the class counts of the training records
/// that reached it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) counts: Vec<usize>,
}


impl LeafNode {
    /// Returns a `LeafNode` holding the given class counts.
    #[inline]
    pub(super) fn from_raw(counts: Vec<usize>) -> Self {
        Self { counts }
    }


    /// The class counts of the training records that reached this leaf.
    pub fn counts(&self) -> &[usize] {
        &self.counts[..]
    }


    /// The counts normalized to a probability distribution.
    pub fn distribution(&self) -> Vec<f64> {
        let total = self.counts.iter().sum::<usize>();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = total as f64;
        self.counts.iter()
            .map(|&c| c as f64 / total)
            .collect()
    }


    /// The most frequent class code;
    /// ties go to the lowest code.
    pub fn majority(&self) -> usize {
        let mut best = 0_usize;
        for (k, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = k;
            }
        }
        best
    }
}


impl Node {
    /// Traverse from this node down to the leaf the record falls in.
    #[inline]
    pub(super) fn leaf_at(&self, data: &Dataset, row: usize)
        -> Result<&LeafNode, TreeError>
    {
        match self {
            Node::Leaf(leaf) => Ok(leaf),
            Node::Branch(branch) => {
                match branch.rule.split(data, row)? {
                    LR::Left  => branch.left.leaf_at(data, row),
                    LR::Right => branch.right.leaf_at(data, row),
                }
            },
        }
    }


    /// The number of edges on the longest root-to-leaf path.
    pub(super) fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(branch) => {
                1 + branch.left.depth().max(branch.right.depth())
            },
        }
    }


    /// The number of nodes of this sub-tree.
    pub(super) fn node_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                1 + branch.left.node_count() + branch.right.node_count()
            },
        }
    }


    /// The number of leaves of this sub-tree.
    pub(super) fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                branch.left.leaf_count() + branch.right.leaf_count()
            },
        }
    }


    pub(super) fn to_dot_info(&self, classes: &[String], id: usize)
        -> (Vec<String>, usize)
    {
        match self {
            Node::Branch(branch) => {
                let b_info = format!(
                    "\tnode_{id} [ label = \"{rule} ?\" ];\n",
                    rule = branch.rule,
                );

                let (l_info, next_id)
                    = branch.left.to_dot_info(classes, id + 1);
                let (mut r_info, ret_id)
                    = branch.right.to_dot_info(classes, next_id);

                let mut info = l_info;
                info.push(b_info);
                info.append(&mut r_info);

                let l_edge = format!(
                    "\tnode_{id} -- node_{l_id} [ label = \"Yes\" ];\n",
                    l_id = id + 1,
                );
                let r_edge = format!(
                    "\tnode_{id} -- node_{r_id} [ label = \"No\" ];\n",
                    r_id = next_id,
                );

                info.push(l_edge);
                info.push(r_edge);

                (info, ret_id)
            },
            Node::Leaf(leaf) => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{class}\", \
                     shape = box, \
                     ];\n",
                    class = classes[leaf.majority()],
                );

                (vec![info], id + 1)
            },
        }
    }
}
