use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;

use super::attribute::Attribute;
use crate::error::TreeError;


/// The label column of a [`Dataset`].
/// Classes are held in a canonical order;
/// every record stores a code into that order.
#[derive(Debug, Clone)]
pub struct Labels {
    pub(crate) classes: Vec<String>,
    pub(crate) codes: Vec<usize>,
}


impl Labels {
    /// Class names in canonical order.
    pub fn classes(&self) -> &[String] {
        &self.classes[..]
    }


    /// Per-record class codes into [`Labels::classes`].
    pub fn codes(&self) -> &[usize] {
        &self.codes[..]
    }


    /// Number of distinct classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }


    /// The class name of record `row`.
    pub fn class_of(&self, row: usize) -> &str {
        &self.classes[self.codes[row]]
    }


    /// Convert a label attribute into `Labels`.
    /// Categorical columns keep their category order;
    /// numeric columns order their classes by ascending value.
    /// A missing label on any record is an error.
    fn from_attribute(attribute: &Attribute) -> Result<Self, TreeError> {
        let n_sample = attribute.len();

        if let Some(categories) = attribute.categories() {
            let classes = categories.to_vec();
            let mut codes = Vec::with_capacity(n_sample);
            for row in 0..n_sample {
                let code = attribute.code(row)
                    .ok_or_else(|| TreeError::invalid_input(format!(
                        "record {row} has no label"
                    )))?;
                codes.push(code);
            }
            return Ok(Self { classes, codes });
        }

        // Numeric label column.
        let mut values = Vec::with_capacity(n_sample);
        for row in 0..n_sample {
            let value = attribute.ordered_value(row)
                .ok_or_else(|| TreeError::invalid_input(format!(
                    "record {row} has no label"
                )))?;
            values.push(value);
        }

        let mut distinct = values.clone();
        distinct.sort_by(|a, b| a.total_cmp(b));
        distinct.dedup();

        let classes = distinct.iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        let codes = values.into_iter()
            .map(|v| {
                distinct.binary_search_by(|d| d.total_cmp(&v))
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        Ok(Self { classes, codes })
    }
}


/// Struct `Dataset` holds a batch of records in columnar form.
/// Each column is an [`Attribute`];
/// one column may be designated as the label
/// via [`Dataset::set_target`].
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) name_to_index: HashMap<String, usize>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) labels: Option<Labels>,
    pub(crate) n_sample: usize,
    pub(crate) n_attribute: usize,
}


impl Dataset {
    /// Build an unlabeled dataset from the given columns.
    /// Fails when the columns do not share a common length.
    pub fn from_attributes(attributes: Vec<Attribute>)
        -> Result<Self, TreeError>
    {
        let n_sample = attributes.first()
            .map(|attr| attr.len())
            .unwrap_or(0);

        for attribute in &attributes {
            if attribute.len() != n_sample {
                return Err(TreeError::invalid_input(format!(
                    "attribute `{}` has {} values, expected {n_sample}",
                    attribute.name(), attribute.len(),
                )));
            }
        }

        let n_attribute = attributes.len();
        let name_to_index = attributes.iter()
            .enumerate()
            .map(|(i, attr)| (attr.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(Self {
            name_to_index,
            attributes,
            labels: None,
            n_sample,
            n_attribute,
        })
    }


    /// Set the attribute named `target` as the label column.
    /// The column leaves the feature set.
    /// The old label column, if any, is dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S)
        -> Result<Self, TreeError>
    {
        let target = target.as_ref();
        let pos = self.attributes.iter()
            .position(|attr| attr.name() == target)
            .ok_or_else(|| TreeError::invalid_input(format!(
                "no attribute named `{target}` to use as the target"
            )))?;

        let label_column = self.attributes.remove(pos);
        self.labels = Some(Labels::from_attribute(&label_column)?);
        self.n_attribute -= 1;

        self.name_to_index = self.attributes.iter()
            .enumerate()
            .map(|(i, attr)| (attr.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(self)
    }


    /// Convert a `polars::DataFrame` into a labeled `Dataset`.
    /// This method takes the ownership of `data`.
    /// See [`Attribute::from_series`] for the column coercion rules.
    pub fn from_dataframe<S: AsRef<str>>(data: DataFrame, target: S)
        -> Result<Self, TreeError>
    {
        let attributes = data.get_columns()
            .iter()
            .map(Attribute::from_series)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_attributes(attributes)?.set_target(target)
    }


    /// Returns the pair of the number of records and
    /// the number of feature attributes.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_attribute)
    }


    /// Returns a slice of the feature attributes.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the attribute named `name`, if present.
    pub fn attribute<S: AsRef<str>>(&self, name: S) -> Option<&Attribute> {
        self.name_to_index
            .get(name.as_ref())
            .map(|&k| &self.attributes[k])
    }


    /// Returns the label column, if one was designated.
    pub fn labels(&self) -> Option<&Labels> {
        self.labels.as_ref()
    }
}


impl<S> Index<S> for Dataset
    where S: AsRef<str>
{
    type Output = Attribute;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name).unwrap();
        &self.attributes[k]
    }
}
