//! One-time dataset acquisition
//!
//! The dataset is distributed as a gzip-compressed tarball. On first use the
//! archive is downloaded into a local datasets directory and unpacked next to
//! it; later runs find the extracted CSV and skip the network entirely.
//!
//! ```text
//! datasets/
//! ├── housing.tgz          (downloaded archive)
//! └── housing/
//!     └── housing.csv      (extracted, returned to the caller)
//! ```
//!
//! There is no retry, checksum, or locking: a failed step aborts the run, and
//! two processes racing on the same directory may clobber each other.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;
use tracing::info;

/// URL of the California housing archive.
pub const HOUSING_URL: &str = "https://github.com/ageron/data/raw/main/housing.tgz";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AcquisitionError {
    #[display("failed to create datasets directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to download {url}")]
    Download { url: String, source: ureq::Error },
    #[display("failed to save {url} to {}", path.display())]
    Save {
        url: String,
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to extract {} into {}", archive.display(), dest.display())]
    Extract {
        archive: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },
    #[display("{} not found after extracting {}", csv.display(), archive.display())]
    MissingCsv { csv: PathBuf, archive: PathBuf },
}

/// Where a dataset comes from and where its CSV lives once unpacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// Archive URL.
    pub url: String,
    /// File name of the archive inside the datasets directory.
    pub archive_name: String,
    /// Path of the CSV relative to the datasets directory.
    pub csv_path: PathBuf,
}

impl DatasetSource {
    /// The California housing dataset.
    #[must_use]
    pub fn housing() -> Self {
        Self {
            url: HOUSING_URL.to_owned(),
            archive_name: "housing.tgz".to_owned(),
            csv_path: Path::new("housing").join("housing.csv"),
        }
    }

    /// Same archive layout, fetched from another URL.
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }
}

/// Returns the path of the dataset CSV, downloading and extracting it first if needed.
///
/// An archive already present in `datasets_dir` is reused without contacting
/// the network, so a manually placed archive is enough for offline use.
pub fn ensure_dataset_available<P>(
    datasets_dir: P,
    source: &DatasetSource,
) -> Result<PathBuf, AcquisitionError>
where
    P: AsRef<Path>,
{
    let datasets_dir = datasets_dir.as_ref();
    let csv_path = datasets_dir.join(&source.csv_path);
    if csv_path.is_file() {
        info!(path = %csv_path.display(), "using cached dataset");
        return Ok(csv_path);
    }

    fs::create_dir_all(datasets_dir).map_err(|source| AcquisitionError::CreateDir {
        path: datasets_dir.to_owned(),
        source,
    })?;

    let archive_path = datasets_dir.join(&source.archive_name);
    if archive_path.is_file() {
        info!(path = %archive_path.display(), "using cached archive");
    } else {
        download(&source.url, &archive_path)?;
    }

    extract_archive(&archive_path, datasets_dir)?;

    if !csv_path.is_file() {
        return Err(AcquisitionError::MissingCsv {
            csv: csv_path,
            archive: archive_path,
        });
    }
    Ok(csv_path)
}

/// Streams `url` into `dest`.
///
/// The body is written to a `.part` sibling first and renamed into place once
/// complete, so an interrupted transfer never looks like a cached archive.
fn download(url: &str, dest: &Path) -> Result<(), AcquisitionError> {
    info!(%url, "downloading dataset archive");
    let response = ureq::get(url)
        .call()
        .map_err(|source| AcquisitionError::Download {
            url: url.to_owned(),
            source,
        })?;

    let mut partial_name = dest.file_name().unwrap_or_default().to_owned();
    partial_name.push(".part");
    let partial = dest.with_file_name(partial_name);

    let save_error = |source: io::Error| AcquisitionError::Save {
        url: url.to_owned(),
        path: dest.to_owned(),
        source,
    };

    let file = File::create(&partial).map_err(save_error)?;
    let mut writer = BufWriter::new(file);
    let mut reader = response.into_body().into_reader();
    let bytes = io::copy(&mut reader, &mut writer).map_err(save_error)?;
    writer.flush().map_err(save_error)?;
    drop(writer);
    fs::rename(&partial, dest).map_err(save_error)?;

    info!(bytes, path = %dest.display(), "download complete");
    Ok(())
}

/// Unpacks a gzip-compressed tarball into `dest`.
pub fn extract_archive<P, Q>(archive: P, dest: Q) -> Result<(), AcquisitionError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let archive = archive.as_ref();
    let dest = dest.as_ref();
    info!(archive = %archive.display(), dest = %dest.display(), "extracting dataset archive");

    let extract_error = |source: io::Error| AcquisitionError::Extract {
        archive: archive.to_owned(),
        dest: dest.to_owned(),
        source,
    };

    let file = File::open(archive).map_err(extract_error)?;
    let mut tarball = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tarball.unpack(dest).map_err(extract_error)
}

#[cfg(test)]
mod tests {
    use flate2::{Compression, write::GzEncoder};

    use super::*;

    const CSV: &str = "median_income,ocean_proximity\n8.3252,NEAR BAY\n1.2,INLAND\n";

    fn unreachable_source() -> DatasetSource {
        // Any network access in these tests is a bug.
        DatasetSource::housing().with_url("http://127.0.0.1:9/housing.tgz")
    }

    fn write_archive(path: &Path, entry: &str, contents: &str) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, entry, contents.as_bytes())
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_cached_csv_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("housing").join("housing.csv");
        fs::create_dir_all(csv_path.parent().unwrap()).unwrap();
        fs::write(&csv_path, CSV).unwrap();

        let path = ensure_dataset_available(dir.path(), &unreachable_source()).unwrap();
        assert_eq!(path, csv_path);
    }

    #[test]
    fn test_cached_archive_is_extracted() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("housing.tgz"), "housing/housing.csv", CSV);

        let path = ensure_dataset_available(dir.path(), &unreachable_source()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), CSV);
    }

    #[test]
    fn test_archive_without_csv() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("housing.tgz"), "README.txt", "nothing here");

        let err = ensure_dataset_available(dir.path(), &unreachable_source()).unwrap_err();
        assert!(matches!(err, AcquisitionError::MissingCsv { .. }), "{err:?}");
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("housing.tgz"), b"not a tarball").unwrap();

        let err = ensure_dataset_available(dir.path(), &unreachable_source()).unwrap_err();
        assert!(matches!(err, AcquisitionError::Extract { .. }), "{err:?}");
    }

    #[test]
    fn test_download_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_dataset_available(dir.path().join("datasets"), &unreachable_source())
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::Download { .. }), "{err:?}");
        assert!(!dir.path().join("datasets").join("housing.tgz").exists());
    }

    #[test]
    fn test_housing_source_layout() {
        let source = DatasetSource::housing();
        assert_eq!(source.url, HOUSING_URL);
        assert_eq!(source.archive_name, "housing.tgz");
        assert_eq!(source.csv_path, Path::new("housing/housing.csv"));
    }
}
