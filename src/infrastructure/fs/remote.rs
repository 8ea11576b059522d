//! Remote File Access Session
//!
//! Implements the FileAccessSession port for hosts reached over SSH. Every
//! primitive runs one short shell command through the system `ssh` binary;
//! file streams are piped through `cat` on the remote side.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Output, Stdio};

use crate::domain::ports::{FileAccessSession, FsError, FsResult, SessionError};

/// Exit status the helper scripts use for a missing path
const EXIT_NOT_FOUND: i32 = 3;
/// Exit status the helper scripts use for an existing destination
const EXIT_EXISTS: i32 = 4;
/// Exit status of `ssh` itself when the connection or authentication fails
const EXIT_SSH_FAILURE: i32 = 255;

/// Session on a host reached through `ssh`
pub struct SshSession {
    host: String,
    /// SSH destination (user@host or host)
    destination: String,
    program: String,
}

impl SshSession {
    pub fn new(host: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            destination: destination.into(),
            program: "ssh".to_string(),
        }
    }

    /// Use another ssh client binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Get the SSH destination
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Check that the host accepts a non-interactive login.
    pub fn connect(self) -> Result<Self, SessionError> {
        let unreachable = |message: String| SessionError::Unreachable {
            host: self.host.clone(),
            message,
        };
        let output = self.run("true").map_err(|e| unreachable(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("ssh exited with {}", output.status)
            } else {
                stderr
            };
            return Err(unreachable(message));
        }
        tracing::debug!(host = %self.host, destination = %self.destination, "ssh session ready");
        Ok(self)
    }

    fn command(&self, script: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(&self.destination)
            .arg(script);
        command
    }

    /// Run `script` remotely and collect its output
    fn run(&self, script: &str) -> FsResult<Output> {
        tracing::trace!(host = %self.host, %script, "ssh");
        self.command(script)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| FsError::Other(format!("failed to run {}: {e}", self.program)))
    }

    /// Run `script`, mapping the helper exit codes for `path`
    fn run_checked(&self, script: &str, path: &Path) -> FsResult<Output> {
        let output = self.run(script)?;
        match output.status.code() {
            Some(0) => Ok(output),
            Some(EXIT_NOT_FOUND) => Err(FsError::NotFound(path.to_path_buf())),
            Some(EXIT_EXISTS) => Err(FsError::AlreadyExists(path.to_path_buf())),
            _ => Err(ssh_error(path, &output)),
        }
    }

    /// Quote a path for safe use in shell commands
    fn quote_path(path: &Path) -> String {
        format!("'{}'", path.to_string_lossy().replace('\'', "'\\''"))
    }

    fn list_script(path: &Path, recursive: bool) -> String {
        let p = Self::quote_path(path);
        let depth = if recursive { "" } else { " -maxdepth 1" };
        format!("[ -d {p} ] || exit {EXIT_NOT_FOUND}; find {p}{depth} -type f")
    }

    fn copy_script(src: &Path, dst: &Path, overwrite: bool) -> String {
        let (s, d) = (Self::quote_path(src), Self::quote_path(dst));
        if overwrite {
            format!("cp -f {s} {d}")
        } else {
            format!("[ -e {d} ] && exit {EXIT_EXISTS}; cp {s} {d}")
        }
    }
}

fn ssh_error(path: &Path, output: &Output) -> FsError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    FsError::Io {
        path: path.to_path_buf(),
        source: io::Error::other(format!("SSH error: {}", stderr.trim())),
    }
}

impl FileAccessSession for SshSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn exists(&self, path: &Path) -> bool {
        match self.run(&format!("test -e {}", Self::quote_path(path))) {
            Ok(output) if output.status.code() == Some(EXIT_SSH_FAILURE) => {
                tracing::warn!(
                    host = %self.host,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "ssh connection failed during existence check"
                );
                false
            }
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::warn!(host = %self.host, error = %e, "ssh unavailable");
                false
            }
        }
    }

    fn list_files(&self, path: &Path, recursive: bool) -> FsResult<Vec<PathBuf>> {
        let output = self.run_checked(&Self::list_script(path, recursive), path)?;
        let mut files: Vec<PathBuf> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        files.sort();
        Ok(files)
    }

    fn create_dir(&self, path: &Path) -> FsResult<()> {
        self.run_checked(&format!("mkdir -p {}", Self::quote_path(path)), path)?;
        Ok(())
    }

    fn delete_dir(&self, path: &Path) -> FsResult<()> {
        let p = Self::quote_path(path);
        self.run_checked(&format!("[ -d {p} ] || exit {EXIT_NOT_FOUND}; rm -rf {p}"), path)?;
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> FsResult<()> {
        self.run_checked(&Self::copy_script(src, dst, overwrite), dst)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        let p = Self::quote_path(path);
        self.run_checked(&format!("[ -e {p} ] || exit {EXIT_NOT_FOUND}; rm -f {p}"), path)?;
        Ok(())
    }

    fn open_read(&self, path: &Path) -> FsResult<Box<dyn Read + '_>> {
        let mut child = self
            .command(&format!("cat {}", Self::quote_path(path)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FsError::from_io(path, e))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FsError::Other("ssh stdout was not captured".to_string()))?;
        Ok(Box::new(RemoteReader {
            path: path.to_path_buf(),
            child: Some(child),
            stdout,
        }))
    }

    fn open_write(&self, path: &Path) -> FsResult<Box<dyn Write + '_>> {
        let mut child = self
            .command(&format!("cat > {}", Self::quote_path(path)))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FsError::from_io(path, e))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FsError::Other("ssh stdin was not captured".to_string()))?;
        Ok(Box::new(RemoteWriter {
            path: path.to_path_buf(),
            child: Some(child),
            stdin: Some(stdin),
        }))
    }

    fn close(&mut self) {
        tracing::debug!(host = %self.host, destination = %self.destination, "ssh session closed");
    }
}

/// Remote `cat` output; reports a failed remote command at end of stream
struct RemoteReader {
    path: PathBuf,
    child: Option<Child>,
    stdout: ChildStdout,
}

impl Read for RemoteReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.stdout.read(buf)?;
        if read == 0 && !buf.is_empty() {
            if let Some(child) = self.child.take() {
                let output = child.wait_with_output()?;
                if !output.status.success() {
                    return Err(io::Error::other(format!(
                        "reading {} failed: {}",
                        self.path.display(),
                        String::from_utf8_lossy(&output.stderr).trim()
                    )));
                }
            }
        }
        Ok(read)
    }
}

impl Drop for RemoteReader {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Remote `cat >` input
///
/// `flush` ends the upload and waits for the remote side, so it surfaces
/// remote failures; writes after a flush fail.
struct RemoteWriter {
    path: PathBuf,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl RemoteWriter {
    fn finish(&mut self) -> io::Result<()> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Ok(());
        };
        let output = child.wait_with_output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "writing {} failed: {}",
                self.path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

impl Write for RemoteWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "remote stream already finished",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(stdin) = self.stdin.as_mut() {
            stdin.flush()?;
        }
        self.finish()
    }
}

impl Drop for RemoteWriter {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "remote write did not complete"
            );
        }
    }
}
