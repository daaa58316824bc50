//! Column schema and typed field descriptors
//!
//! Columns are looked up by name exactly once, through [`Schema`], which
//! hands back a typed descriptor ([`NumericField`], [`TextField`],
//! [`StratumField`]). Reading a column through a descriptor cannot fail, so
//! a missing or mistyped column surfaces as a [`SchemaError`] right after
//! loading instead of deep inside the pipeline.

use std::fmt;

/// The storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Floating-point values, possibly missing.
    Numeric,
    /// Free text values, possibly missing.
    Text,
    /// Derived ordinal stratification labels.
    Stratum,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Stratum => "stratum",
        };
        fmt::Display::fmt(s, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("missing column '{name}'")]
    MissingColumn { name: String },
    #[display("column '{name}' is {actual}, expected {expected}")]
    KindMismatch {
        name: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },
    #[display("duplicate column '{name}'")]
    DuplicateColumn { name: String },
    #[display("column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Name and kind of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub kind: ColumnKind,
}

/// Descriptor for a numeric column, valid for the dataset it was resolved
/// from and for every positional selection of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericField {
    pub(crate) index: usize,
}

/// Descriptor for a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextField {
    pub(crate) index: usize,
}

/// Descriptor for a stratification label column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StratumField {
    pub(crate) index: usize,
}

/// Ordered column definitions of a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub(crate) fn push(&mut self, name: String, kind: ColumnKind) -> Result<usize, SchemaError> {
        if self.position(&name).is_some() {
            return Err(SchemaError::DuplicateColumn { name });
        }
        self.fields.push(FieldDef { name, kind });
        Ok(self.fields.len() - 1)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    fn resolve(&self, name: &str, expected: ColumnKind) -> Result<usize, SchemaError> {
        let index = self
            .position(name)
            .ok_or_else(|| SchemaError::MissingColumn {
                name: name.to_owned(),
            })?;
        let actual = self.fields[index].kind;
        if actual != expected {
            return Err(SchemaError::KindMismatch {
                name: name.to_owned(),
                expected,
                actual,
            });
        }
        Ok(index)
    }

    pub fn numeric_field(&self, name: &str) -> Result<NumericField, SchemaError> {
        self.resolve(name, ColumnKind::Numeric)
            .map(|index| NumericField { index })
    }

    pub fn text_field(&self, name: &str) -> Result<TextField, SchemaError> {
        self.resolve(name, ColumnKind::Text)
            .map(|index| TextField { index })
    }

    pub fn stratum_field(&self, name: &str) -> Result<StratumField, SchemaError> {
        self.resolve(name, ColumnKind::Stratum)
            .map(|index| StratumField { index })
    }

    /// Name of the column behind a numeric descriptor.
    #[must_use]
    pub fn numeric_name(&self, field: NumericField) -> &str {
        &self.fields[field.index].name
    }

    /// Name of the column behind a stratum descriptor.
    #[must_use]
    pub fn stratum_name(&self, field: StratumField) -> &str {
        &self.fields[field.index].name
    }
}
