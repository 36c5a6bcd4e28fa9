//! Shared fixtures for the black-box specs.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use assert_cmd::cargo::cargo_bin;
use tempfile::TempDir;

/// Two-line pool used by most specs
pub const GREETINGS: &str = "hello\nhi\n";

/// A scratch directory holding pool content and a daemon config
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn socket(&self) -> PathBuf {
        self.path().join("run/poolsd.sock")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("pools.toml")
    }

    /// Write pools.toml: platform options first, then daemon paths
    /// inside the project
    pub fn config(&self, platform: &str) {
        let content = format!(
            "{}\n\n[daemon]\nsocket_path = \"run/poolsd.sock\"\nlock_path = \"run/poolsd.pid\"\nlog_path = \"poolsd.log\"\n",
            platform
        );
        self.file("pools.toml", &content);
    }

    /// The CLI, pointed at this project's socket
    pub fn pools(&self) -> CliBuilder {
        let mut cmd = Command::new(cargo_bin("pools"));
        cmd.arg("--socket")
            .arg(self.socket())
            .current_dir(self.path())
            .env_remove("POOLS_SOCKET")
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }

    /// The daemon binary, run to completion
    pub fn poolsd(&self) -> CliBuilder {
        let mut cmd = Command::new(cargo_bin("poolsd"));
        cmd.arg(self.config_path()).current_dir(self.path());
        CliBuilder { cmd }
    }

    /// Start poolsd in the background and wait until it is ready
    pub fn start_daemon(&self) -> Daemon {
        let mut child = Command::new(cargo_bin("poolsd"))
            .arg(self.config_path())
            .current_dir(self.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line).unwrap();
        if line.trim() != "READY" {
            let _ = child.kill();
            let log = std::fs::read_to_string(self.path().join("poolsd.log")).unwrap_or_default();
            panic!("poolsd did not start:\n{}", log);
        }
        Daemon { child }
    }
}

/// Background daemon, killed when dropped
pub struct Daemon {
    child: Child,
}

impl Daemon {
    /// Wait for the process to exit on its own
    pub fn wait(mut self) -> std::process::ExitStatus {
        self.child.wait().unwrap()
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    fn run(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        RunAssert {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and expect exit code 0
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    /// Run and expect a non-zero exit code
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct RunAssert {
    success: bool,
    stdout: String,
    stderr: String,
}

impl RunAssert {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }

    /// Exact stdout, diffed on mismatch
    pub fn stdout_eq(&self, expected: &str) -> &Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
