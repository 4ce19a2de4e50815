#![warn(missing_docs)]

//!
//! A crate that provides a CART-style decision tree classifier.
//!
//! The tree is grown by impurity-driven recursive partitioning:
//! at each node the builder evaluates every candidate split,
//! keeps the one that minimizes the weighted Gini impurity of
//! the two partitions, and terminates a node as a leaf when it is pure,
//! too small to split, at the depth ceiling,
//! or when the best split does not reduce the impurity enough.
//!
//! Records may carry numeric, ordered categorical,
//! or unordered categorical attributes,
//! and any of them may be missing.
//!
//! ```no_run
//! use minicart::prelude::*;
//!
//! fn main() -> Result<(), TreeError> {
//!     let sample = DatasetReader::new()
//!         .file("iris.csv")
//!         .has_header(true)
//!         .target_feature("species")
//!         .read()?;
//!
//!     let tree = TreeBuilder::new()
//!         .max_depth(3)
//!         .min_split_size(5)
//!         .build(&sample)?;
//!
//!     println!("train accuracy: {}", tree.accuracy(&sample)?);
//!     tree.to_dot_file("iris.dot")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod dataset;
pub mod tree;
pub mod prelude;


pub use error::TreeError;

pub use dataset::{
    Attribute,
    AttributeKind,
    Dataset,
    DatasetReader,
};

pub use tree::{
    TreeBuilder,
    DecisionTree,
};
