//! Defines the fitted decision tree classifier.
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::TreeError;
use super::node::Node;


/// Decision tree classifier.
/// Built by [`TreeBuilder`](crate::TreeBuilder);
/// immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
    classes: Vec<String>,
}


impl DecisionTree {
    #[inline]
    pub(super) fn from_raw(root: Node, classes: Vec<String>) -> Self {
        Self { root, classes }
    }


    /// Class names in canonical order.
    /// The distributions of [`DecisionTree::predict`] align to it.
    pub fn classes(&self) -> &[String] {
        &self.classes[..]
    }


    /// The class probability distribution for record `row` of `data`.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingAttribute`] when the record has no usable
    /// value for an attribute tested on the traversal path.
    pub fn predict(&self, data: &Dataset, row: usize)
        -> Result<Vec<f64>, TreeError>
    {
        let leaf = self.root.leaf_at(data, row)?;
        Ok(leaf.distribution())
    }


    /// The most probable class for record `row` of `data`.
    /// Ties go to the lowest class index in canonical order.
    pub fn predict_class(&self, data: &Dataset, row: usize)
        -> Result<&str, TreeError>
    {
        let leaf = self.root.leaf_at(data, row)?;
        Ok(&self.classes[leaf.majority()])
    }


    /// The fraction of records of `data` whose predicted class
    /// matches the label.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidInput`] when `data` is empty
    /// or has no label column.
    pub fn accuracy(&self, data: &Dataset) -> Result<f64, TreeError> {
        let n_sample = data.shape().0;
        if n_sample == 0 {
            return Err(TreeError::invalid_input(
                "cannot score an empty dataset"
            ));
        }
        let labels = data.labels()
            .ok_or_else(|| TreeError::invalid_input(
                "the dataset has no label column; use `Dataset::set_target`"
            ))?;

        let mut hit = 0_usize;
        for row in 0..n_sample {
            if self.predict_class(data, row)? == labels.class_of(row) {
                hit += 1;
            }
        }

        Ok(hit as f64 / n_sample as f64)
    }


    /// The number of edges on the longest root-to-leaf path.
    /// A single-leaf tree has depth `0`.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// The total number of nodes, branches and leaves alike.
    pub fn n_nodes(&self) -> usize {
        self.root.node_count()
    }


    /// The number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.root.leaf_count()
    }


    /// Write the current decision tree to a dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<(), TreeError>
        where P: AsRef<Path>
    {
        let mut content = String::from("graph DecisionTree {");

        let info = self.root.to_dot_info(&self.classes, 0).0;
        info.into_iter()
            .for_each(|row| {
                content.push_str(&row);
            });

        content.push('}');
        fs::write(path, content)?;

        Ok(())
    }


    /// Save the current decision tree to a JSON file.
    pub fn to_json_file<P>(&self, path: P) -> Result<(), TreeError>
        where P: AsRef<Path>
    {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;

        Ok(())
    }


    /// Load a decision tree from a JSON file
    /// written by [`DecisionTree::to_json_file`].
    pub fn from_json_file<P>(path: P) -> Result<Self, TreeError>
        where P: AsRef<Path>
    {
        let json = fs::read_to_string(path)?;
        let tree = serde_json::from_str(&json)?;

        Ok(tree)
    }
}
