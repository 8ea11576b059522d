//! Local File Access Session
//!
//! Implements the FileAccessSession port on the local disk.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{FileAccessSession, FsError, FsResult};

/// Session on a host whose files are reachable through the local filesystem
#[derive(Debug, Clone)]
pub struct LocalSession {
    host: String,
}

impl LocalSession {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl FileAccessSession for LocalSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, path: &Path, recursive: bool) -> FsResult<Vec<PathBuf>> {
        if !path.is_dir() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }

        // Every file counts, including dotfiles and anything a .gitignore names.
        let mut builder = WalkBuilder::new(path);
        builder.standard_filters(false).follow_links(false);
        if !recursive {
            builder.max_depth(Some(1));
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|e| {
                FsError::Other(format!("failed to walk {}: {e}", path.display()))
            })?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn delete_dir(&self, path: &Path) -> FsResult<()> {
        if !path.is_dir() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        fs::remove_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> FsResult<()> {
        if !overwrite && dst.exists() {
            return Err(FsError::AlreadyExists(dst.to_path_buf()));
        }
        fs::copy(src, dst)
            .map(|_| ())
            .map_err(|e| FsError::from_io(src, e))
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>> {
        let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(Box::new(file))
    }

    fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>> {
        let file = File::create(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(Box::new(file))
    }

    fn close(&mut self) {
        tracing::trace!(host = %self.host, "local session closed");
    }
}
