//! TestWorld pattern for CLI integration tests.
//!
//! Each world owns a throwaway data directory and the environment the `folio`
//! binary should see, so tests never touch the real token or config.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for running the `folio` binary.
///
/// # Example
/// ```no_run
/// use folio_testing::{StubServer, TestWorld};
///
/// let stub = StubServer::start().unwrap();
/// let world = TestWorld::new().with_api(stub.base_url());
/// world.login(stub.token()).unwrap();
///
/// let result = world.run_json(&["blog", "list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".folio");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Point the CLI at a backend through `FOLIO_API_URL`.
    pub fn with_api(self, base_url: &str) -> Self {
        self.with_env("FOLIO_API_URL", base_url)
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a file under the temp root and return its path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join("token")
    }

    /// Configure a command with this world's data dir and env, plain output.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        self.configure_with_format(cmd, "plain")
    }

    fn configure_with_format<'a>(&self, cmd: &'a mut Command, format: &str) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg(format);

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("FOLIO_PATH");
        cmd.env_remove("FOLIO_API_URL");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run `folio` with plain output.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.execute("plain", args, None)
    }

    /// Run `folio --format json`.
    pub fn run_json(&self, args: &[&str]) -> Result<CliResult> {
        self.execute("json", args, None)
    }

    /// Run `folio` feeding `stdin` (interactive prompts and `browse`).
    pub fn run_with_input(&self, args: &[&str], stdin: &str) -> Result<CliResult> {
        self.execute("plain", args, Some(stdin))
    }

    /// Store `token` through `folio login`.
    pub fn login(&self, token: &str) -> Result<()> {
        let result = self.run(&["login", "--token", token])?;
        if !result.success() {
            anyhow::bail!("login failed: {}", result.stderr());
        }
        Ok(())
    }

    fn execute(&self, format: &'static str, args: &[&str], stdin: Option<&str>) -> Result<CliResult> {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("folio")
            .map_err(|e| anyhow::anyhow!("Failed to find folio binary: {}", e))?;
        self.configure_with_format(&mut cmd, format);
        cmd.args(args);
        if let Some(input) = stdin {
            cmd.write_stdin(input.to_string());
        }

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
