use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::attribute::{is_missing_token, Attribute};
use super::dataset_struct::Dataset;
use crate::error::TreeError;


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a delimited text file to [`Dataset`].
///
/// Each column is inferred independently:
/// a column whose non-missing cells all parse as `f64`
/// becomes a numeric attribute,
/// any other column becomes an unordered categorical one.
/// The cells `""`, `"?"`, and `"NA"` mark missing values.
///
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// # use minicart::prelude::*;
/// # fn read() -> Result<Dataset, TreeError> {
/// let sample = DatasetReader::new()
///     .file("/path/to/csv/file.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?;
/// # Ok(sample)
/// # }
/// ```
pub struct DatasetReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
}


impl<P, S> DatasetReader<P, S> {
    /// Construct a new instance of [`DatasetReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P, S> Default for DatasetReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for the target label.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>,
{
    /// Reads the file based on the arguments,
    /// and returns a labeled [`Dataset`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<Dataset, TreeError> {
        let Some(file) = self.file else {
            return Err(TreeError::invalid_config(
                "the input file is not set; use `DatasetReader::file`"
            ));
        };
        let Some(target) = self.target else {
            return Err(TreeError::invalid_config(
                "the target column is not specified; \
                 use `DatasetReader::target_feature`"
            ));
        };

        let file = File::open(file.as_ref())?;
        let mut lines = BufReader::new(file).lines();

        let mut names: Vec<String> = Vec::new();
        let mut columns: Vec<Vec<String>> = Vec::new();

        if self.has_header {
            if let Some(line) = lines.next() {
                names = line?.split(',')
                    .map(|cell| cell.trim().to_string())
                    .collect();
                columns = vec![Vec::new(); names.len()];
            }
        }

        let mut n_sample = 0_usize;

        // For each line of the file
        for line in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>();

            // If the header does not exist,
            // construct a dummy header.
            if columns.is_empty() {
                names = (1..=cells.len())
                    .map(|i| format!("Attr. [{i}]"))
                    .collect();
                columns = vec![Vec::new(); cells.len()];
            }

            if cells.len() != columns.len() {
                return Err(TreeError::invalid_input(format!(
                    "record {n_sample} has {} fields, expected {}",
                    cells.len(), columns.len(),
                )));
            }

            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
            n_sample += 1;
        }

        let attributes = names.into_iter()
            .zip(columns)
            .map(|(name, cells)| infer_attribute(name, &cells))
            .collect::<Vec<_>>();

        Dataset::from_attributes(attributes)?
            .set_target(target.as_ref())
    }
}


/// Infer the attribute kind of one column of cells.
fn infer_attribute(name: String, cells: &[String]) -> Attribute {
    let mut values = Vec::with_capacity(cells.len());

    for cell in cells {
        if is_missing_token(cell) {
            values.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(value) => { values.push(Some(value)); },
            Err(_) => {
                return Attribute::nominal(&name, cells);
            },
        }
    }

    Attribute::numeric_with_gaps(name, values)
}
