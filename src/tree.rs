//! This module defines the decision tree and its builder.
mod builder;
mod criterion;
mod decision_tree;
mod node;
mod split_rule;


pub use builder::{
    TreeBuilder,
    DEFAULT_MIN_IMPROVEMENT,
    DEFAULT_MIN_SPLIT_SIZE,
};
pub use decision_tree::DecisionTree;
pub use node::{BranchNode, LeafNode, Node};
pub use split_rule::{SplitRule, Splitter, LR};
