//! Dataset acquisition command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use strata_dataset::acquire::{self, DatasetSource, HOUSING_URL};

const DEFAULT_DATASETS_DIR: &str = "datasets";

/// Where the dataset is fetched from and cached.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub(crate) struct DatasetArg {
    /// Directory holding the downloaded archive and the extracted CSV
    #[arg(long, default_value = DEFAULT_DATASETS_DIR)]
    pub datasets_dir: PathBuf,
    /// URL of the gzip-compressed dataset tarball
    #[arg(long, default_value = HOUSING_URL)]
    pub url: String,
}

impl Default for DatasetArg {
    fn default() -> Self {
        Self {
            datasets_dir: PathBuf::from(DEFAULT_DATASETS_DIR),
            url: HOUSING_URL.to_owned(),
        }
    }
}

impl DatasetArg {
    fn source(&self) -> DatasetSource {
        DatasetSource::housing().with_url(self.url.clone())
    }

    /// Makes the dataset CSV available locally and returns its path.
    pub(crate) fn acquire(&self) -> anyhow::Result<PathBuf> {
        acquire::ensure_dataset_available(&self.datasets_dir, &self.source()).with_context(|| {
            format!(
                "Failed to acquire dataset into {}",
                self.datasets_dir.display()
            )
        })
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Args)]
pub(crate) struct FetchArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
}

pub(crate) fn run(arg: &FetchArg) -> anyhow::Result<()> {
    let csv_path = arg.dataset.acquire()?;
    println!("{}", csv_path.display());
    Ok(())
}
