use colored::Colorize;

use crate::dataset::{Dataset, Labels};
use crate::error::TreeError;
use super::criterion::{best_split, gini_impurity};
use super::decision_tree::DecisionTree;
use super::node::{BranchNode, LeafNode, Node};
use super::split_rule::{Splitter, LR};


/// The minimal node size set as default.
pub const DEFAULT_MIN_SPLIT_SIZE: usize = 2;
/// The impurity-reduction threshold set as default.
pub const DEFAULT_MIN_IMPROVEMENT: f64 = 0.0;


/// A struct that builds [`DecisionTree`].
/// `TreeBuilder` keeps the stopping parameters for growing a tree.
///
/// # Example
///
/// ```no_run
/// # use minicart::prelude::*;
/// # fn grow(sample: &Dataset) -> Result<DecisionTree, TreeError> {
/// let tree = TreeBuilder::new()
///     .max_depth(2)
///     .min_split_size(4)
///     .min_improvement(0.01)
///     .build(sample)?;
/// # Ok(tree)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    min_split_size: usize,
    min_improvement: f64,
    max_depth: Option<usize>,
    verbose: bool,
}


impl TreeBuilder {
    /// Construct a new instance of [`TreeBuilder`].
    /// By default, [`TreeBuilder`] sets the parameters as follows;
    /// ```text
    /// min_split_size: DEFAULT_MIN_SPLIT_SIZE == 2,
    /// min_improvement: DEFAULT_MIN_IMPROVEMENT == 0.0,
    /// max_depth: unbounded,
    /// verbose: false,
    /// ```
    pub fn new() -> Self {
        Self {
            min_split_size: DEFAULT_MIN_SPLIT_SIZE,
            min_improvement: DEFAULT_MIN_IMPROVEMENT,
            max_depth: None,
            verbose: false,
        }
    }


    /// Set the minimal number of records a node must hold
    /// to attempt a split.
    /// Default value is `2`.
    pub fn min_split_size(mut self, size: usize) -> Self {
        self.min_split_size = size;
        self
    }


    /// Set the minimal impurity reduction a split must achieve
    /// to be accepted.
    /// Default value is `0.0`.
    /// The Gini impurity never reaches `1`,
    /// so a threshold of `1.0` forbids every split.
    pub fn min_improvement(mut self, improvement: f64) -> Self {
        self.min_improvement = improvement;
        self
    }


    /// Set the maximal depth of the tree.
    /// By default the depth is unbounded.
    /// A depth of `0` keeps the root a leaf.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `TreeBuilder` prints one line per accepted split.
    /// Default value is `false.`
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Grow a [`DecisionTree`] on the given dataset.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidConfig`] when `min_split_size < 2`
    /// or `min_improvement` is negative or not finite.
    /// [`TreeError::InvalidInput`] when the dataset has no records
    /// or no label column.
    pub fn build(&self, data: &Dataset) -> Result<DecisionTree, TreeError> {
        if self.min_split_size < 2 {
            return Err(TreeError::invalid_config(format!(
                "min_split_size must be at least 2, got {}",
                self.min_split_size,
            )));
        }
        if !self.min_improvement.is_finite() || self.min_improvement < 0.0 {
            return Err(TreeError::invalid_config(format!(
                "min_improvement must be finite and non-negative, got {}",
                self.min_improvement,
            )));
        }

        let n_sample = data.shape().0;
        if n_sample == 0 {
            return Err(TreeError::invalid_input("the dataset has no records"));
        }
        let labels = data.labels()
            .ok_or_else(|| TreeError::invalid_input(
                "the dataset has no label column; use `Dataset::set_target`"
            ))?;

        let indices = (0..n_sample).collect::<Vec<usize>>();
        let root = self.grow(data, labels, indices, 0)?;

        Ok(DecisionTree::from_raw(root, labels.classes().to_vec()))
    }


    /// Grow the sub-tree over the records in `indices`.
    fn grow(
        &self,
        data: &Dataset,
        labels: &Labels,
        indices: Vec<usize>,
        depth: usize,
    ) -> Result<Node, TreeError>
    {
        let n_classes = labels.n_classes();
        let mut counts = vec![0_usize; n_classes];
        for &i in &indices {
            counts[labels.codes()[i]] += 1;
        }

        let impurity = gini_impurity(&counts);

        let too_small = indices.len() < self.min_split_size;
        let too_deep = self.max_depth.is_some_and(|ceil| depth >= ceil);
        if too_small || too_deep || impurity == 0.0 {
            return Ok(Node::Leaf(LeafNode::from_raw(counts)));
        }

        // Find the best pair of attribute and rule.
        let candidate = match best_split(
            data, labels.codes(), &indices, n_classes,
        ) {
            Some(candidate) => candidate,
            None => return Ok(Node::Leaf(LeafNode::from_raw(counts))),
        };

        // Pre-pruning: reject splits that barely reduce the impurity.
        let improvement = impurity - candidate.score;
        if improvement < self.min_improvement {
            return Ok(Node::Leaf(LeafNode::from_raw(counts)));
        }

        let name = data.attributes()[candidate.attribute].name();
        let rule = Splitter::new(name, candidate.rule);

        // Split the records for the left/right children.
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for i in indices {
            match rule.split(data, i)? {
                LR::Left  => { lindices.push(i); },
                LR::Right => { rindices.push(i); },
            }
        }

        // Candidates never route every record to one side.
        if lindices.is_empty() || rindices.is_empty() {
            return Ok(Node::Leaf(LeafNode::from_raw(counts)));
        }

        if self.verbose {
            println!(
                "{}    {}    {}",
                format!("[depth {depth:>2}]").bold().red(),
                format!("[split {rule}]").bold().green(),
                format!(
                    "[gini {impurity:.4} -> {score:.4}]",
                    score = candidate.score,
                ).bold().yellow(),
            );
        }

        // Grow the tree.
        let ltree = self.grow(data, labels, lindices, depth + 1)?;
        let rtree = self.grow(data, labels, rindices, depth + 1)?;

        Ok(Node::Branch(BranchNode::from_raw(
            rule,
            Box::new(ltree),
            Box::new(rtree),
        )))
    }
}


impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
