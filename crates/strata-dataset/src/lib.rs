//! Housing record sets: loading, acquisition, and typed column access
//!
//! This crate owns everything between a dataset URL and an in-memory,
//! schema-checked [`Dataset`]:
//!
//! 1. **Acquisition** ([`acquire`]): download and unpack the dataset archive
//!    once, then reuse the local copy
//! 2. **Loading** ([`load`]): parse the CSV and infer numeric and text columns
//! 3. **Schema validation** ([`schema`]): resolve column names into typed field
//!    descriptors once, up front
//! 4. **Column access** ([`dataset`]): read columns through descriptors and
//!    select rows positionally
//!
//! # Example
//!
//! ```no_run
//! use strata_dataset::{
//!     acquire::{self, DatasetSource},
//!     load,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let csv_path = acquire::ensure_dataset_available("datasets", &DatasetSource::housing())?;
//! let dataset = load::read_csv(&csv_path)?;
//! let income = dataset.schema().numeric_field("median_income")?;
//!
//! println!("{} rows, first income {:?}", dataset.len(), dataset.numeric(income)[0]);
//! # Ok(())
//! # }
//! ```

pub use self::{
    acquire::AcquisitionError,
    dataset::{ColumnData, Dataset, Stratum},
    load::LoadError,
    schema::{ColumnKind, NumericField, Schema, SchemaError, StratumField, TextField},
};

pub mod acquire;
pub mod dataset;
pub mod load;
pub mod schema;
