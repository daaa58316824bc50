//! In-memory record sets
//!
//! A [`Dataset`] is an ordered collection of rows stored column by column.
//! Rows have no identity beyond their position, so partitions are expressed
//! as index lists and materialized with [`Dataset::take`].

use std::fmt;

use crate::schema::{ColumnKind, NumericField, Schema, SchemaError, StratumField, TextField};

/// Ordinal stratification label of a single row.
///
/// Levels sort in ascending order and [`Stratum::Undefined`] sorts after all
/// of them, so report rows come out as `1, 2, ..., undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stratum {
    /// A regular 1-based level.
    Level(u8),
    /// The source value was missing or not finite.
    Undefined,
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stratum::Level(level) => fmt::Display::fmt(level, f),
            Stratum::Undefined => fmt::Display::fmt("undefined", f),
        }
    }
}

/// Values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Stratum(Vec<Stratum>),
}

impl ColumnData {
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Stratum(_) => ColumnKind::Stratum,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
            ColumnData::Stratum(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take(&self, indices: &[usize]) -> Self {
        match self {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(indices.iter().map(|&i| values[i]).collect())
            }
            ColumnData::Text(values) => {
                ColumnData::Text(indices.iter().map(|&i| values[i].clone()).collect())
            }
            ColumnData::Stratum(values) => {
                ColumnData::Stratum(indices.iter().map(|&i| values[i]).collect())
            }
        }
    }
}

/// A schema-checked, column-oriented record set.
///
/// # Example
///
/// ```
/// use strata_dataset::{ColumnData, Dataset};
///
/// let dataset = Dataset::from_columns(vec![
///     ("median_income".to_owned(), ColumnData::Numeric(vec![Some(0.5), Some(7.0), None])),
///     ("ocean_proximity".to_owned(), ColumnData::Text(vec![None, Some("INLAND".to_owned()), None])),
/// ])
/// .unwrap();
///
/// let income = dataset.schema().numeric_field("median_income").unwrap();
/// let subset = dataset.take(&[1, 0]);
/// assert_eq!(subset.numeric(income), &[Some(7.0), Some(0.5)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    columns: Vec<ColumnData>,
    len: usize,
}

impl Dataset {
    /// Builds a dataset from named columns of equal length.
    pub fn from_columns(columns: Vec<(String, ColumnData)>) -> Result<Self, SchemaError> {
        let len = columns.first().map_or(0, |(_, data)| data.len());
        let mut dataset = Self {
            len,
            ..Self::default()
        };
        for (name, data) in columns {
            dataset.push_column(name, data)?;
        }
        Ok(dataset)
    }

    fn push_column(&mut self, name: String, data: ColumnData) -> Result<usize, SchemaError> {
        if data.len() != self.len {
            return Err(SchemaError::LengthMismatch {
                name,
                expected: self.len,
                actual: data.len(),
            });
        }
        let index = self.schema.push(name, data.kind())?;
        self.columns.push(data);
        Ok(index)
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values of a numeric column.
    ///
    /// # Panics
    ///
    /// Panics if `field` was resolved against a dataset with a different schema.
    #[must_use]
    pub fn numeric(&self, field: NumericField) -> &[Option<f64>] {
        match &self.columns[field.index] {
            ColumnData::Numeric(values) => values,
            other => panic!("numeric descriptor points at a {} column", other.kind()),
        }
    }

    /// Values of a text column.
    ///
    /// # Panics
    ///
    /// Panics if `field` was resolved against a dataset with a different schema.
    #[must_use]
    pub fn text(&self, field: TextField) -> &[Option<String>] {
        match &self.columns[field.index] {
            ColumnData::Text(values) => values,
            other => panic!("text descriptor points at a {} column", other.kind()),
        }
    }

    /// Labels of a stratum column.
    ///
    /// # Panics
    ///
    /// Panics if `field` was resolved against a dataset with a different schema.
    #[must_use]
    pub fn strata(&self, field: StratumField) -> &[Stratum] {
        match &self.columns[field.index] {
            ColumnData::Stratum(values) => values,
            other => panic!("stratum descriptor points at a {} column", other.kind()),
        }
    }

    /// Appends a derived label column, leaving existing columns untouched.
    pub fn add_stratum_column(
        &mut self,
        name: impl Into<String>,
        labels: Vec<Stratum>,
    ) -> Result<StratumField, SchemaError> {
        self.push_column(name.into(), ColumnData::Stratum(labels))
            .map(|index| StratumField { index })
    }

    /// Selects rows by position, in the given order.
    ///
    /// The result shares this dataset's schema, so every field descriptor
    /// resolved here stays valid on the selection.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            schema: self.schema.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| column.take(indices))
                .collect(),
            len: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_columns(vec![
            (
                "median_income".to_owned(),
                ColumnData::Numeric(vec![Some(0.5), Some(2.0), None]),
            ),
            (
                "ocean_proximity".to_owned(),
                ColumnData::Text(vec![
                    Some("NEAR BAY".to_owned()),
                    None,
                    Some("INLAND".to_owned()),
                ]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let err = Dataset::from_columns(vec![
            ("a".to_owned(), ColumnData::Numeric(vec![Some(1.0)])),
            ("b".to_owned(), ColumnData::Numeric(vec![])),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::LengthMismatch {
                name: "b".to_owned(),
                expected: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_add_stratum_column_keeps_other_columns() {
        let mut dataset = dataset();
        let before = dataset.clone();
        let field = dataset
            .add_stratum_column("income_cat", vec![Stratum::Level(1), Stratum::Level(2), Stratum::Undefined])
            .unwrap();

        assert_eq!(dataset.schema().len(), 3);
        assert_eq!(dataset.schema().stratum_name(field), "income_cat");
        let income = before.schema().numeric_field("median_income").unwrap();
        assert_eq!(dataset.numeric(income), before.numeric(income));
        assert_eq!(dataset.strata(field)[2], Stratum::Undefined);
    }

    #[test]
    fn test_add_stratum_column_rejects_duplicates() {
        let mut dataset = dataset();
        let err = dataset
            .add_stratum_column("median_income", vec![Stratum::Undefined; 3])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                name: "median_income".to_owned()
            }
        );
        assert_eq!(dataset.schema().len(), 2);
    }

    #[test]
    fn test_take_preserves_descriptors() {
        let dataset = dataset();
        let text = dataset.schema().text_field("ocean_proximity").unwrap();
        let subset = dataset.take(&[2, 0]);
        assert_eq!(subset.len(), 2);
        assert_eq!(
            subset.text(text),
            &[Some("INLAND".to_owned()), Some("NEAR BAY".to_owned())]
        );
        assert!(dataset.take(&[]).is_empty());
    }

    #[test]
    fn test_stratum_ordering() {
        let mut labels = vec![Stratum::Undefined, Stratum::Level(3), Stratum::Level(1)];
        labels.sort();
        assert_eq!(
            labels,
            vec![Stratum::Level(1), Stratum::Level(3), Stratum::Undefined]
        );
        assert_eq!(Stratum::Level(4).to_string(), "4");
        assert_eq!(Stratum::Undefined.to_string(), "undefined");
    }
}
