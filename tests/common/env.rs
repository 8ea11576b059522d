//! Test environment builder for isolated site-deploy testing.
//!
//! Every `TestEnv` owns a temp directory laid out as:
//!
//! ```text
//! home/      scratch HOME (domain registry lives under .site-deploy/)
//! work/      working directory holding site-deploy.toml
//! staging/   root of the "staging" host
//! live/      root of the "az102" live host
//! live2/     root of the "az201" live host
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Overrides that would leak the developer's environment into a test run
const SCRUBBED_VARS: &[&str] = &[
    "SITE_DEPLOY_STAGING_HOST",
    "SITE_DEPLOY_BUFFER_SIZE",
    "SITE_DEPLOY_EXCLUDE",
    "SITE_DEPLOY_STRICT",
    "SITE_DEPLOY_REGISTRY",
    "RUST_LOG",
];

/// Result of running a site-deploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as a JSON value
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON ({e}): {line}\n{}", self.stderr))
            })
            .collect()
    }
}

pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    /// Environment with one staging host and two local live hosts
    pub fn new() -> Self {
        let env = Self::bare();
        env.write_config(&env.default_config());
        env
    }

    /// Environment without a config file
    pub fn bare() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        for dir in ["home", "work", "staging", "live", "live2"] {
            fs::create_dir_all(root.path().join(dir)).expect("Failed to create directories");
        }
        Self { root }
    }

    pub fn default_config(&self) -> String {
        format!(
            r#"staging_host = "staging"

[hosts.staging]
root = "{staging}"

[hosts.az102]
root = "{live}"

[hosts.az201]
root = "{live2}"
"#,
            staging = toml_path(&self.staging_root()),
            live = toml_path(&self.live_root()),
            live2 = toml_path(&self.path("live2")),
        )
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn home(&self) -> PathBuf {
        self.path("home")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.path("work")
    }

    pub fn staging_root(&self) -> PathBuf {
        self.path("staging")
    }

    pub fn live_root(&self) -> PathBuf {
        self.path("live")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.home().join(".site-deploy/domains.toml")
    }

    /// Snapshot directory of `domain` on the az102 host
    pub fn backup_dir(&self, domain: &str) -> PathBuf {
        self.live_root()
            .join("Rollback")
            .join(format!("temp-{domain}"))
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir().join("site-deploy.toml"), content)
            .expect("Failed to write config");
    }

    pub fn write_staged(&self, domain: &str, relative: &str, content: &str) {
        write_file(&self.staging_root().join(domain).join(relative), content);
    }

    pub fn write_live(&self, domain: &str, relative: &str, content: &str) {
        write_file(&self.live_root().join(domain).join(relative), content);
    }

    pub fn read_live(&self, domain: &str, relative: &str) -> Option<String> {
        fs::read_to_string(self.live_root().join(domain).join(relative)).ok()
    }

    /// Run site-deploy from the work directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_site-deploy"));
        cmd.current_dir(self.work_dir())
            .args(args)
            .env("SITE_DEPLOY_TEST_HOME", self.home())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("NO_COLOR", "1");
        for key in SCRUBBED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute site-deploy");
        output_to_result(output)
    }

    /// Register `domain` and host it on az102
    pub fn hosted_domain(&self, domain: &str) {
        let added = self.run(&["domains", "add", domain]);
        assert!(added.is_success(), "add failed: {}", added.combined_output());
        let hosted = self.run(&["domains", "host", domain, "--server", "az102"]);
        assert!(
            hosted.is_success(),
            "host failed: {}",
            hosted.combined_output()
        );
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Path as a TOML basic string body (backslashes escaped for Windows)
fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
