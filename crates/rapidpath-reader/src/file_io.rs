//! File I/O Module
//!
//! Opens G-code program files and streams them through a
//! [`ProgramReader`] with a large read buffer.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::reader::ProgramReader;
use crate::scan::ProgramScan;

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Files above this size get a warning before scanning (500 MB)
const LARGE_FILE_WARNING: u64 = 500 * 1024 * 1024;

/// G-code program file reader
#[derive(Debug, Clone)]
pub struct ProgramFileReader {
    path: PathBuf,
    file_size: u64,
}

impl ProgramFileReader {
    /// Create a new program file reader
    ///
    /// # Arguments
    /// * `path` - Path to the G-code file
    ///
    /// # Errors
    /// Returns error if file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {}", path.display()));
        }

        if !path.is_file() {
            return Err(anyhow!("Path is not a file: {}", path.display()));
        }

        let metadata = fs::metadata(&path)?;
        let file_size = metadata.len();

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan the whole file with `reader`
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or read
    pub fn scan(&self, reader: &ProgramReader) -> Result<ProgramScan> {
        if self.file_size > LARGE_FILE_WARNING {
            tracing::warn!(
                "Scanning very large file ({}MB)",
                self.file_size / (1024 * 1024)
            );
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let buffered = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        reader
            .read(buffered)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }
}
