//! Shared test infrastructure: a scratch workspace wired to a mock pac CLI.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// One isolated run environment: a temp working directory, the mock pac
/// script, and the invocation log it appends to.
pub struct TestEnv {
    temp: TempDir,
    script: PathBuf,
    log_path: PathBuf,
    listing: Option<PathBuf>,
    fail: Option<String>,
    canvas: Option<String>,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let script = install_mock_pac(temp.path());
        let log_path = temp.path().join("pac-invocations.log");
        Self {
            temp,
            script,
            log_path,
            listing: None,
            fail: None,
            canvas: None,
        }
    }

    /// Replace the mock's default solution listing.
    pub fn with_listing(mut self, listing: &str) -> Self {
        let path = self.temp.path().join("listing.txt");
        fs::write(&path, listing).expect("write listing fixture");
        self.listing = Some(path);
        self
    }

    /// Force invocations matching the arg prefix to fail.
    pub fn with_failure(mut self, arg_prefix: &str) -> Self {
        self.fail = Some(arg_prefix.to_string());
        self
    }

    /// Have `solution unpack` drop these canvas app packages into the tree.
    pub fn with_canvas_apps(mut self, names: &str) -> Self {
        self.canvas = Some(names.to_string());
        self
    }

    /// Working root the default `--root` resolves to (cwd is the temp dir).
    pub fn root(&self) -> PathBuf {
        self.temp.path().join("powerplatform")
    }

    /// Run solpull with the mock pac wired in via the command override.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = self.base_command(args);
        command.env("SOLPULL_PAC_COMMAND", &self.script);
        command.output().expect("run solpull")
    }

    /// Run solpull with no override and an empty PATH, so the dependency
    /// check cannot resolve pac.
    pub fn run_without_pac(&self, args: &[&str]) -> Output {
        let empty = self.temp.path().join("empty-path");
        fs::create_dir_all(&empty).expect("create empty PATH dir");
        let mut command = self.base_command(args);
        command.env_remove("SOLPULL_PAC_COMMAND");
        command.env("PATH", &empty);
        command.output().expect("run solpull")
    }

    /// Invocation log lines, one per mock pac call, in order.
    pub fn invocations(&self) -> Vec<String> {
        match fs::read_to_string(&self.log_path) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn base_command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_solpull"));
        command
            .args(args)
            .current_dir(self.temp.path())
            .env("MOCK_PAC_LOG", &self.log_path);
        if let Some(listing) = &self.listing {
            command.env("MOCK_PAC_LISTING", listing);
        }
        if let Some(fail) = &self.fail {
            command.env("MOCK_PAC_FAIL", fail);
        }
        if let Some(canvas) = &self.canvas {
            command.env("MOCK_PAC_CANVAS", canvas);
        }
        command
    }
}

pub fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn install_mock_pac(dir: &Path) -> PathBuf {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mock-pac.sh");
    let script = dir.join("mock-pac.sh");
    fs::copy(&fixture, &script).expect("copy mock pac script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
            .expect("mark mock pac executable");
    }
    script
}
