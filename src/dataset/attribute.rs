//! Defines `Attribute`, a single named column of a dataset.
use polars::prelude::*;

use crate::error::TreeError;


/// Tokens that mark a missing value in textual input.
const MISSING_TOKENS: [&str; 3] = ["", "?", "NA"];


/// Returns `true` when the given cell marks a missing value.
#[inline]
pub(crate) fn is_missing_token(token: &str) -> bool {
    MISSING_TOKENS.contains(&token.trim())
}


/// The kind of an attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Real-valued.
    Numeric,
    /// Categorical with a declared order.
    Ordinal,
    /// Categorical without an order.
    Nominal,
}


/// Column values, one variant per representation.
#[derive(Debug, Clone)]
enum AttributeValues {
    /// Real values; `None` marks a missing value.
    Numeric(Vec<Option<f64>>),
    /// Category codes into `categories`; `None` marks a missing value.
    Categorical {
        ordered: bool,
        categories: Vec<String>,
        codes: Vec<Option<usize>>,
    },
}


/// A single named column of a [`Dataset`](crate::Dataset).
///
/// An attribute is numeric, ordered categorical, or unordered categorical.
/// Every row holds a value or an explicit missing marker.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    values: AttributeValues,
}


impl Attribute {
    /// Construct a numeric attribute with no missing values.
    pub fn numeric<T, V>(name: T, values: V) -> Self
        where T: ToString,
              V: AsRef<[f64]>,
    {
        let values = values.as_ref()
            .iter()
            .copied()
            .map(Some)
            .collect::<Vec<_>>();
        Self {
            name: name.to_string(),
            values: AttributeValues::Numeric(values),
        }
    }


    /// Construct a numeric attribute where `None` marks a missing value.
    pub fn numeric_with_gaps<T: ToString>(
        name: T,
        values: Vec<Option<f64>>,
    ) -> Self
    {
        Self {
            name: name.to_string(),
            values: AttributeValues::Numeric(values),
        }
    }


    /// Construct an unordered categorical attribute.
    /// The categories are discovered from the values and held
    /// in lexicographic order.
    /// The cells `""`, `"?"`, and `"NA"` mark missing values.
    pub fn nominal<T, S>(name: T, values: &[S]) -> Self
        where T: ToString,
              S: AsRef<str>,
    {
        let values = values.iter()
            .map(|v| {
                let v = v.as_ref().trim();
                if is_missing_token(v) { None } else { Some(v.to_string()) }
            })
            .collect::<Vec<_>>();

        Self::nominal_from_options(name.to_string(), values)
    }


    /// Construct an ordered categorical attribute.
    /// `order` declares the categories from lowest to highest.
    /// The cells `""`, `"?"`, and `"NA"` mark missing values.
    ///
    /// # Panics
    /// Panics when a non-missing value does not appear in `order`.
    pub fn ordinal<T, S>(name: T, order: &[S], values: &[S]) -> Self
        where T: ToString,
              S: AsRef<str>,
    {
        let name = name.to_string();
        let categories = order.iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>();

        let codes = values.iter()
            .map(|v| {
                let v = v.as_ref().trim();
                if is_missing_token(v) { return None; }
                let code = categories.iter()
                    .position(|c| c.as_str() == v)
                    .unwrap_or_else(|| panic!(
                        "value `{v}` does not appear in \
                         the declared order of `{name}`"
                    ));
                Some(code)
            })
            .collect::<Vec<_>>();

        Self {
            name,
            values: AttributeValues::Categorical {
                ordered: true,
                categories,
                codes,
            },
        }
    }


    /// Build an unordered categorical attribute
    /// from already-screened values.
    pub(crate) fn nominal_from_options(
        name: String,
        values: Vec<Option<String>>,
    ) -> Self
    {
        let mut categories = values.iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>();
        categories.sort();
        categories.dedup();

        let codes = values.iter()
            .map(|v| {
                v.as_ref()
                    .and_then(|v| categories.binary_search(v).ok())
            })
            .collect::<Vec<_>>();

        Self {
            name,
            values: AttributeValues::Categorical {
                ordered: false,
                categories,
                codes,
            },
        }
    }


    /// Convert a `polars::Series` into an `Attribute`.
    /// Numeric dtypes become numeric attributes,
    /// string columns become unordered categorical ones,
    /// and boolean columns are coerced to the categories
    /// `false`/`true`.
    /// Null entries become missing values.
    pub fn from_series(series: &Series) -> Result<Self, TreeError> {
        let name = series.name().to_string();

        match series.dtype() {
            DataType::Utf8 => {
                let values = series.utf8()
                    .map_err(|e| TreeError::invalid_input(e.to_string()))?
                    .into_iter()
                    .map(|v| {
                        v.map(str::trim)
                            .filter(|v| !is_missing_token(v))
                            .map(String::from)
                    })
                    .collect::<Vec<_>>();
                Ok(Self::nominal_from_options(name, values))
            },
            DataType::Boolean => {
                let values = series.bool()
                    .map_err(|e| TreeError::invalid_input(e.to_string()))?
                    .into_iter()
                    .map(|v| v.map(|b| b.to_string()))
                    .collect::<Vec<_>>();
                Ok(Self::nominal_from_options(name, values))
            },
            dtype if dtype.is_numeric() => {
                let series = series.cast(&DataType::Float64)
                    .map_err(|e| TreeError::invalid_input(e.to_string()))?;
                let values = series.f64()
                    .map_err(|e| TreeError::invalid_input(e.to_string()))?
                    .into_iter()
                    .collect::<Vec<_>>();
                Ok(Self {
                    name,
                    values: AttributeValues::Numeric(values),
                })
            },
            dtype => Err(TreeError::invalid_input(format!(
                "column `{name}` has unsupported dtype {dtype}"
            ))),
        }
    }


    /// Get the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// The kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match &self.values {
            AttributeValues::Numeric(_) => AttributeKind::Numeric,
            AttributeValues::Categorical { ordered: true, .. }
                => AttributeKind::Ordinal,
            AttributeValues::Categorical { ordered: false, .. }
                => AttributeKind::Nominal,
        }
    }


    /// Returns the number of rows in this attribute.
    pub fn len(&self) -> usize {
        match &self.values {
            AttributeValues::Numeric(values) => values.len(),
            AttributeValues::Categorical { codes, .. } => codes.len(),
        }
    }


    /// Returns `true` if the number of rows is equal to `0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns `true` when the value at `row` is missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match &self.values {
            AttributeValues::Numeric(values) => values[row].is_none(),
            AttributeValues::Categorical { codes, .. } => codes[row].is_none(),
        }
    }


    /// The value at `row` on the ordered scale:
    /// the raw value for numeric attributes,
    /// the category code for ordinal ones.
    /// `None` for nominal attributes and missing values.
    pub(crate) fn ordered_value(&self, row: usize) -> Option<f64> {
        match &self.values {
            AttributeValues::Numeric(values) => values[row],
            AttributeValues::Categorical { ordered: true, codes, .. }
                => codes[row].map(|c| c as f64),
            AttributeValues::Categorical { ordered: false, .. } => None,
        }
    }


    /// The category code at `row`.
    /// `None` for numeric attributes and missing values.
    pub(crate) fn code(&self, row: usize) -> Option<usize> {
        match &self.values {
            AttributeValues::Numeric(_) => None,
            AttributeValues::Categorical { codes, .. } => codes[row],
        }
    }


    /// The category name at `row`.
    /// `None` for numeric attributes and missing values.
    pub(crate) fn category(&self, row: usize) -> Option<&str> {
        match &self.values {
            AttributeValues::Numeric(_) => None,
            AttributeValues::Categorical { categories, codes, .. }
                => codes[row].map(|c| categories[c].as_str()),
        }
    }


    /// All categories of a categorical attribute.
    /// `None` for numeric attributes.
    pub fn categories(&self) -> Option<&[String]> {
        match &self.values {
            AttributeValues::Numeric(_) => None,
            AttributeValues::Categorical { categories, .. }
                => Some(&categories[..]),
        }
    }


    /// Number of distinct non-missing values in this attribute.
    pub fn distinct_value_count(&self) -> usize {
        match &self.values {
            AttributeValues::Numeric(values) => {
                let values = values.iter()
                    .flatten()
                    .copied()
                    .collect::<Vec<_>>();
                inner_distinct_value_count(values)
            },
            AttributeValues::Categorical { codes, .. } => {
                let mut codes = codes.iter()
                    .flatten()
                    .copied()
                    .collect::<Vec<_>>();
                codes.sort_unstable();
                codes.dedup();
                codes.len()
            },
        }
    }
}


/// Count the number of distinct items in `src`.
fn inner_distinct_value_count(mut src: Vec<f64>) -> usize {
    src.sort_by(|a, b| a.total_cmp(b));
    let mut iter = src.into_iter();
    let mut value = match iter.next() {
        Some(v) => v,
        None => { return 0; }
    };
    let mut uniq_value_count = 1;

    for v in iter {
        if v != value {
            value = v;
            uniq_value_count += 1;
        }
    }

    uniq_value_count
}
