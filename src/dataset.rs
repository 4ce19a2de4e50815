//! This module defines [`Dataset`] and the items around it.
mod attribute;
mod dataset_struct;
mod reader;


pub use attribute::{Attribute, AttributeKind};
pub use dataset_struct::{Dataset, Labels};
pub use reader::DatasetReader;
