//! In-memory file access sessions for unit tests
//!
//! A [`MemoryHost`] is a shared filesystem image; every [`MemorySession`]
//! opened on it sees the same files, so tests can hand a session to the
//! orchestrator by value and still inspect the host afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::entities::DomainRegistry;
use crate::domain::ports::{
    DomainRepository, DomainStoreError, FileAccessSession, FsError, FsResult, SessionError,
    SessionProvider,
};

#[derive(Default)]
struct HostState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    fail_list: HashSet<PathBuf>,
    fail_create_dir: HashSet<PathBuf>,
    fail_copy: HashSet<PathBuf>,
    fail_read: HashSet<PathBuf>,
    /// Writes to these paths keep the first chunk, then error
    fail_write_midway: HashSet<PathBuf>,
    closes: usize,
    copy_log: Vec<(PathBuf, PathBuf)>,
}

#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, name: &str) -> MemorySession {
        MemorySession {
            name: name.to_string(),
            host: self.clone(),
        }
    }

    pub fn put_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            insert_dir_all(&mut state.dirs, parent);
        }
        state
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
    }

    pub fn put_dir(&self, path: impl AsRef<Path>) {
        insert_dir_all(&mut self.state.lock().unwrap().dirs, path.as_ref());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }

    /// Files under `root`, relative to it
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.state
            .lock()
            .unwrap()
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    pub fn fail_list(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_list
            .insert(path.as_ref().to_path_buf());
    }

    pub fn fail_create_dir(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_create_dir
            .insert(path.as_ref().to_path_buf());
    }

    /// Fail `copy_file` whenever `path` is the source or the destination
    pub fn fail_copy(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_copy
            .insert(path.as_ref().to_path_buf());
    }

    pub fn fail_read(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_read
            .insert(path.as_ref().to_path_buf());
    }

    pub fn fail_write_midway(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_write_midway
            .insert(path.as_ref().to_path_buf());
    }

    pub fn closes(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    /// Every successful `copy_file` call, in order
    pub fn copy_log(&self) -> Vec<(PathBuf, PathBuf)> {
        self.state.lock().unwrap().copy_log.clone()
    }
}

fn insert_dir_all(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

pub struct MemorySession {
    name: String,
    host: MemoryHost,
}

impl FileAccessSession for MemorySession {
    fn host(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.host.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn list_files(&self, path: &Path, recursive: bool) -> FsResult<Vec<PathBuf>> {
        let state = self.host.state.lock().unwrap();
        if state.fail_list.contains(path) {
            return Err(FsError::Other(format!("listing {} failed", path.display())));
        }
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        Ok(state
            .files
            .keys()
            .filter(|p| {
                if recursive {
                    p.starts_with(path)
                } else {
                    p.parent() == Some(path)
                }
            })
            .cloned()
            .collect())
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        let mut state = self.host.state.lock().unwrap();
        if state.fail_create_dir.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        insert_dir_all(&mut state.dirs, path);
        Ok(())
    }

    fn delete_dir(&self, path: &Path) -> FsResult<()> {
        let mut state = self.host.state.lock().unwrap();
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> FsResult<()> {
        let mut state = self.host.state.lock().unwrap();
        if state.fail_copy.contains(src) || state.fail_copy.contains(dst) {
            return Err(FsError::Io {
                path: src.to_path_buf(),
                source: io::Error::other("injected copy failure"),
            });
        }
        let data = state
            .files
            .get(src)
            .cloned()
            .ok_or_else(|| FsError::NotFound(src.to_path_buf()))?;
        if let Some(parent) = dst.parent() {
            if !state.dirs.contains(parent) {
                return Err(FsError::NotFound(parent.to_path_buf()));
            }
        }
        if !overwrite && state.files.contains_key(dst) {
            return Err(FsError::AlreadyExists(dst.to_path_buf()));
        }
        state.files.insert(dst.to_path_buf(), data);
        state.copy_log.push((src.to_path_buf(), dst.to_path_buf()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.host
            .state
            .lock()
            .unwrap()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>> {
        let state = self.host.state.lock().unwrap();
        if state.fail_read.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        let data = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>> {
        let mut state = self.host.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            if !state.dirs.contains(parent) {
                return Err(FsError::NotFound(parent.to_path_buf()));
            }
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        let fail_midway = state.fail_write_midway.contains(path);
        Ok(Box::new(MemoryWriter {
            path: path.to_path_buf(),
            host: self.host.clone(),
            fail_midway,
            written_chunks: 0,
        }))
    }

    fn close(&mut self) {
        self.host.state.lock().unwrap().closes += 1;
    }
}

struct MemoryWriter {
    path: PathBuf,
    host: MemoryHost,
    fail_midway: bool,
    written_chunks: usize,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_midway && self.written_chunks > 0 {
            return Err(io::Error::other("connection reset mid-write"));
        }
        let mut state = self.host.state.lock().unwrap();
        let file = state.files.entry(self.path.clone()).or_default();
        if self.fail_midway {
            // Keep a torn first chunk to mimic a partially written file.
            let half = buf.len() / 2;
            if half == 0 {
                return Err(io::Error::other("connection reset mid-write"));
            }
            file.extend_from_slice(&buf[..half]);
            self.written_chunks += 1;
            return Ok(half);
        }
        file.extend_from_slice(buf);
        self.written_chunks += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Domain records held in memory
#[derive(Default)]
pub struct MemoryDomainRepository {
    registry: Mutex<DomainRegistry>,
}

impl DomainRepository for MemoryDomainRepository {
    fn load(&self) -> Result<DomainRegistry, DomainStoreError> {
        Ok(self.registry.lock().unwrap().clone())
    }

    fn save(&self, registry: &DomainRegistry) -> Result<(), DomainStoreError> {
        *self.registry.lock().unwrap() = registry.clone();
        Ok(())
    }
}

/// Opens sessions on named in-memory hosts
#[derive(Default)]
pub struct MemorySessionProvider {
    hosts: HashMap<String, MemoryHost>,
}

impl MemorySessionProvider {
    pub fn with_host(mut self, id: &str, host: &MemoryHost) -> Self {
        self.hosts.insert(id.to_string(), host.clone());
        self
    }
}

impl SessionProvider for MemorySessionProvider {
    fn open(&self, host: &str) -> Result<Box<dyn FileAccessSession>, SessionError> {
        self.hosts
            .get(host)
            .map(|h| Box::new(h.session(host)) as Box<dyn FileAccessSession>)
            .ok_or_else(|| SessionError::UnknownHost(host.to_string()))
    }
}
