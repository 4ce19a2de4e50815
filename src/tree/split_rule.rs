//! This file defines split rules for the decision tree.
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::dataset::Dataset;
use crate::error::TreeError;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LR {
    /// The record goes to the left child.
    Left,
    /// The record goes to the right child.
    Right,
}


/// The test a branch node applies to route a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitRule {
    /// Route left when the value is below the threshold.
    /// Used for numeric attributes and,
    /// over the category codes, for ordered categorical ones.
    Threshold(f64),

    /// Route left when the category is a member of the set.
    /// The member names are held sorted.
    /// Categories unseen at training time route right.
    Membership(Vec<String>),
}


/// A named attribute paired with the rule that splits on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    pub(crate) attribute: String,
    pub(crate) rule: SplitRule,
}


impl Splitter {
    #[inline]
    pub(crate) fn new(attribute: &str, rule: SplitRule) -> Self {
        let attribute = attribute.to_string();
        Self {
            attribute,
            rule,
        }
    }


    /// Defines the splitting.
    /// Fails with [`TreeError::MissingAttribute`] when the record
    /// has no usable value for the tested attribute.
    #[inline]
    pub fn split(&self, data: &Dataset, row: usize) -> Result<LR, TreeError> {
        let attribute = data.attribute(&self.attribute)
            .ok_or_else(|| self.missing(row))?;

        match &self.rule {
            SplitRule::Threshold(threshold) => {
                let value = attribute.ordered_value(row)
                    .ok_or_else(|| self.missing(row))?;

                if value < *threshold {
                    Ok(LR::Left)
                } else {
                    Ok(LR::Right)
                }
            },
            SplitRule::Membership(members) => {
                let category = attribute.category(row)
                    .ok_or_else(|| self.missing(row))?;

                let is_member = members
                    .binary_search_by(|m| m.as_str().cmp(category))
                    .is_ok();
                if is_member {
                    Ok(LR::Left)
                } else {
                    Ok(LR::Right)
                }
            },
        }
    }


    #[inline]
    fn missing(&self, row: usize) -> TreeError {
        TreeError::MissingAttribute {
            attribute: self.attribute.clone(),
            row,
        }
    }
}


impl fmt::Display for Splitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            SplitRule::Threshold(threshold) => {
                write!(f, "{} < {threshold:.2}", self.attribute)
            },
            SplitRule::Membership(members) => {
                write!(f, "{} in {{{}}}", self.attribute, members.join(", "))
            },
        }
    }
}
