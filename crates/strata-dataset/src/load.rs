//! CSV loading with column kind inference
//!
//! The first row is the header. A column becomes [`ColumnKind::Numeric`]
//! when every non-empty cell parses as `f64` and [`ColumnKind::Text`]
//! otherwise. Empty cells are missing values in either kind.
//!
//! [`ColumnKind::Numeric`]: crate::ColumnKind::Numeric
//! [`ColumnKind::Text`]: crate::ColumnKind::Text

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::{
    dataset::{ColumnData, Dataset},
    schema::SchemaError,
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse CSV {}", path.display())]
    Parse { path: PathBuf, source: csv::Error },
    #[display("invalid columns in {}", path.display())]
    Schema { path: PathBuf, source: SchemaError },
}

/// Reads a CSV file into a [`Dataset`].
pub fn read_csv<P>(path: P) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_csv_from(BufReader::new(file), path)
}

fn read_csv_from<R>(reader: R, path: &Path) -> Result<Dataset, LoadError>
where
    R: io::Read,
{
    let parse_error = |source: csv::Error| LoadError::Parse {
        path: path.to_owned(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let mut cells = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        for (column, cell) in cells.iter_mut().zip(record.iter()) {
            column.push(cell.to_owned());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| {
            let data = infer_column(cells);
            debug!(column = %name, kind = %data.kind(), "inferred column kind");
            (name, data)
        })
        .collect();

    Dataset::from_columns(columns).map_err(|source| LoadError::Schema {
        path: path.to_owned(),
        source,
    })
}

fn infer_column(cells: Vec<String>) -> ColumnData {
    let parsed = cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                Ok(None)
            } else {
                cell.parse::<f64>().map(Some)
            }
        })
        .collect::<Result<Vec<_>, _>>();

    match parsed {
        Ok(values) => ColumnData::Numeric(values),
        Err(_) => ColumnData::Text(
            cells
                .into_iter()
                .map(|cell| (!cell.is_empty()).then_some(cell))
                .collect(),
        ),
    }
}
