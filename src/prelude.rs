//! Exports the common types of this crate.
//!
pub use crate::dataset::{
    // Columnar data model
    Attribute,
    AttributeKind,
    Dataset,
    Labels,

    // File ingestion
    DatasetReader,
};


pub use crate::tree::{
    // Growing
    TreeBuilder,

    // The fitted model
    DecisionTree,

    // Split rules
    SplitRule,
    Splitter,
};


pub use crate::error::TreeError;
