use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::templates::GeneratedFile;

/// Creates directories and writes files beneath an explicit root.
///
/// Directory creation refuses to reuse an existing path; that is what keeps
/// a second `init` or `module-new` from clobbering earlier output. File writes
/// always overwrite. Nothing is rolled back when a later step fails.
#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
}

impl Materializer {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `path` against the root unless it is already absolute.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Creates a single directory.
    ///
    /// # Errors
    /// * `Error::TargetExistsError` if anything already exists at `path`
    /// * `Error::IoError` if the parent is missing or not writable
    pub fn create_directory<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let abs_path = self.resolve(path);
        if abs_path.exists() {
            return Err(Error::TargetExistsError { path: abs_path.display().to_string() });
        }
        debug!("Creating directory: {}", abs_path.display());
        fs::create_dir(&abs_path)?;
        Ok(abs_path)
    }

    /// Writes `content` to `path`, replacing any existing file.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, content: &str) -> Result<PathBuf> {
        let abs_path = self.resolve(path);
        debug!("Writing file: {}", abs_path.display());
        fs::write(&abs_path, content)?;
        Ok(abs_path)
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let abs_path = self.resolve(path);
        debug!("Reading file: {}", abs_path.display());
        Ok(fs::read_to_string(abs_path)?)
    }

    /// Writes a file set in order and prints each created path.
    ///
    /// Files written before a failure stay on disk; the failure is logged
    /// together with how far the set got.
    pub fn write_all(&self, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            match self.write_file(&file.path, &file.content) {
                Ok(path) => {
                    println!("create: '{}'", path.display());
                    written.push(path);
                }
                Err(e) => {
                    error!(
                        "Failed to write '{}' ({} of {} files already written, no rollback is performed)",
                        file.path.display(),
                        index,
                        files.len()
                    );
                    return Err(e);
                }
            }
        }
        Ok(written)
    }
}
