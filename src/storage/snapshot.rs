//! A file backed snapshot of service requests
//!
//! The [`Snapshot`] owns the records read from a single JSON or YAML file.
//! Indexes borrow from it; adding a record goes through validation and is
//! persisted with [`Snapshot::save`].

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    RequestIndex, RequestRecord,
    storage::validation::{InvalidRecord, validate},
};

/// On-disk encoding of a snapshot, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl Format {
    /// Picks the format from the extension of `path`.
    ///
    /// Returns `None` for any other extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }
}

/// Errors that can occur when loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file extension names no supported format.
    #[error("unsupported snapshot format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// An I/O error occurred.
    #[error("failed to read snapshot")]
    Io(#[from] io::Error),
    /// The JSON content could not be parsed.
    #[error("failed to parse snapshot")]
    Json(#[from] serde_json::Error),
    /// The YAML content could not be parsed.
    #[error("failed to parse snapshot")]
    Yaml(#[from] serde_yaml::Error),
    /// A record failed validation.
    #[error("record {index} is invalid: {reason}")]
    Invalid {
        /// Position of the record in the file.
        index: usize,
        /// Why it was rejected.
        reason: InvalidRecord,
    },
}

/// Errors that can occur when saving a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// An I/O error occurred.
    #[error("failed to write snapshot")]
    Io(#[from] io::Error),
    /// The JSON content could not be produced.
    #[error("failed to serialize snapshot")]
    Json(#[from] serde_json::Error),
    /// The YAML content could not be produced.
    #[error("failed to serialize snapshot")]
    Yaml(#[from] serde_yaml::Error),
}

/// The serialized versions of a snapshot file.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        requests: Vec<RequestRecord>,
    },
}

/// Service requests held in a snapshot file.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    path: PathBuf,
    format: Format,
    records: Vec<RequestRecord>,
}

impl Snapshot {
    /// Opens the snapshot at `path`.
    ///
    /// A file that does not exist yet is an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the extension is not supported, the file
    /// cannot be read or parsed, or any record fails validation.
    #[instrument(level = "debug")]
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let format =
            Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("snapshot not found, starting empty");
                return Ok(Self {
                    path: path.to_path_buf(),
                    format,
                    records: Vec::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let Versions::V1 { requests } = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Yaml => serde_yaml::from_str(&content)?,
        };

        check_all(&requests)?;
        debug!(records = requests.len(), "loaded snapshot");

        Ok(Self {
            path: path.to_path_buf(),
            format,
            records: requests,
        })
    }

    /// The path the snapshot was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The on-disk format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The records, in file order.
    #[must_use]
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    /// Builds the indexes over the current records.
    #[must_use]
    pub fn index(&self) -> RequestIndex<'_> {
        RequestIndex::new(&self.records)
    }

    /// Adds a record to the snapshot.
    ///
    /// The change is held in memory until [`save`](Self::save) is called.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidRecord`] if the record fails validation or its
    /// identifier is already taken.
    pub fn add(&mut self, record: RequestRecord) -> Result<&RequestRecord, InvalidRecord> {
        validate(&record)?;
        if self.records.iter().any(|existing| existing.id() == record.id()) {
            return Err(InvalidRecord::DuplicateId(record.id().to_string()));
        }
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Writes the snapshot back to its file.
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if the snapshot cannot be serialized or
    /// written.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), SaveError> {
        #[derive(Serialize)]
        #[serde(tag = "_version")]
        enum VersionsRef<'a> {
            #[serde(rename = "1")]
            V1 { requests: &'a [RequestRecord] },
        }

        let data = VersionsRef::V1 {
            requests: &self.records,
        };
        let content = match self.format {
            Format::Json => serde_json::to_string_pretty(&data)?,
            Format::Yaml => serde_yaml::to_string(&data)?,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, content)?;
        debug!(records = self.records.len(), "saved snapshot");
        Ok(())
    }
}

fn check_all(records: &[RequestRecord]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        validate(record).map_err(|reason| LoadError::Invalid { index, reason })?;
        if !seen.insert(record.id()) {
            return Err(LoadError::Invalid {
                index,
                reason: InvalidRecord::DuplicateId(record.id().to_string()),
            });
        }
    }
    Ok(())
}
