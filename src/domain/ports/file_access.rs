//! FileAccessSession port - filesystem capability bound to one host
//!
//! The deploy workflow never touches a disk directly. Every read, write and
//! directory operation goes through a session that was opened for a specific
//! host under one credential context (local disk, SSH, or an in-memory mock).

use std::io::{Read, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Result type for session operations
pub type FsResult<T> = Result<T, FsError>;

/// Filesystem operation errors
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path was required but does not exist
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Destination exists and overwrite was not requested
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// I/O failure on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport or other failure
    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// Filesystem capability scoped to one host
///
/// Implementations:
/// - `LocalSession` - local disk
/// - `SshSession` - remote host through the `ssh` binary
/// - in-memory mocks for tests
pub trait FileAccessSession {
    /// Identifier of the host this session is bound to
    fn host(&self) -> &str;

    /// Check whether a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// List files (not directories) under `path`
    ///
    /// Fails with `NotFound` if `path` is absent.
    fn list_files(&self, path: &Path, recursive: bool) -> FsResult<Vec<PathBuf>>;

    /// Create a directory and its parents; succeeds if already present
    fn create_dir(&self, path: &Path) -> FsResult<()>;

    /// Delete a directory recursively; fails with `NotFound` if absent
    fn delete_dir(&self, path: &Path) -> FsResult<()>;

    /// Copy a file within this host
    ///
    /// The parent of `dst` must already exist.
    fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> FsResult<()>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Open a file for streaming reads
    fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>>;

    /// Open a file for streaming writes, creating or truncating it
    fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>>;

    /// Tear the session down
    ///
    /// Called once by [`ScopedSession`] when the owner is done with it.
    fn close(&mut self) {}
}

impl<S: FileAccessSession + ?Sized> FileAccessSession for Box<S> {
    fn host(&self) -> &str {
        (**self).host()
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_files(&self, path: &Path, recursive: bool) -> FsResult<Vec<PathBuf>> {
        (**self).list_files(path, recursive)
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir(path)
    }

    fn delete_dir(&self, path: &Path) -> FsResult<()> {
        (**self).delete_dir(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> FsResult<()> {
        (**self).copy_file(src, dst, overwrite)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        (**self).remove_file(path)
    }

    fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>> {
        (**self).open_read(path)
    }

    fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>> {
        (**self).open_write(path)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Owns a session and closes it when dropped
///
/// Guarantees teardown on every exit path of the owner, including early
/// returns and panics.
pub struct ScopedSession<S: FileAccessSession> {
    inner: S,
}

impl<S: FileAccessSession> ScopedSession<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: FileAccessSession> Deref for ScopedSession<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S: FileAccessSession> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        tracing::debug!(host = self.inner.host(), "closing file access session");
        self.inner.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSession {
        closes: Arc<AtomicUsize>,
    }

    impl FileAccessSession for CountingSession {
        fn host(&self) -> &str {
            "counting"
        }
        fn exists(&self, _path: &Path) -> bool {
            false
        }
        fn list_files(&self, path: &Path, _recursive: bool) -> FsResult<Vec<PathBuf>> {
            Err(FsError::NotFound(path.to_path_buf()))
        }
        fn create_dir(&self, _path: &Path) -> FsResult<()> {
            Ok(())
        }
        fn delete_dir(&self, path: &Path) -> FsResult<()> {
            Err(FsError::NotFound(path.to_path_buf()))
        }
        fn copy_file(&self, src: &Path, _dst: &Path, _overwrite: bool) -> FsResult<()> {
            Err(FsError::NotFound(src.to_path_buf()))
        }
        fn remove_file(&self, path: &Path) -> FsResult<()> {
            Err(FsError::NotFound(path.to_path_buf()))
        }
        fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>> {
            Err(FsError::NotFound(path.to_path_buf()))
        }
        fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>> {
            Err(FsError::NotFound(path.to_path_buf()))
        }
        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn fs_error_display_includes_path() {
        let err = FsError::NotFound(PathBuf::from("site/index.html"));
        assert!(err.to_string().contains("site/index.html"));
    }

    #[test]
    fn fs_error_from_io_classifies_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FsError::from_io(Path::new("a.txt"), io_err);
        assert!(err.is_not_found());

        let io_err = std::io::Error::other("disk on fire");
        let err = FsError::from_io(Path::new("b.txt"), io_err);
        assert!(matches!(err, FsError::Io { .. }));
        assert!(err.to_string().contains("b.txt"));
    }

    #[test]
    fn scoped_session_closes_exactly_once_on_drop() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let scoped = ScopedSession::new(CountingSession {
                closes: closes.clone(),
            });
            assert_eq!(scoped.host(), "counting");
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn boxed_session_forwards_close() {
        let closes = Arc::new(AtomicUsize::new(0));
        let boxed: Box<dyn FileAccessSession> = Box::new(CountingSession {
            closes: closes.clone(),
        });
        drop(ScopedSession::new(boxed));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
