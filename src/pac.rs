//! Narrow invocation surface for the Power Platform CLI.
//!
//! Every external call goes through one synchronous path: program + args in,
//! exit status + captured output out. The workflow never builds `pac`
//! argument vectors itself.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Environment override for the `pac` command line (shell-words syntax).
pub const PAC_COMMAND_ENV: &str = "SOLPULL_PAC_COMMAND";

const INSTALL_HINT: &str = "dotnet tool install --global Microsoft.PowerApps.CLI.Tool";

/// Resolved handle to the external CLI.
pub struct PacTool {
    argv: Vec<String>,
    verbose: bool,
}

impl PacTool {
    /// Resolve the `pac` executable, preferring the environment override.
    ///
    /// A missing tool is fatal before any other step runs, so the error
    /// carries the install command.
    pub fn resolve(verbose: bool) -> Result<Self> {
        if let Ok(raw) = std::env::var(PAC_COMMAND_ENV) {
            let argv = parse_command_override(&raw)?;
            return Ok(Self { argv, verbose });
        }
        let program = which::which("pac").map_err(|_| {
            anyhow!("pac CLI not found on PATH; install it with `{INSTALL_HINT}`")
        })?;
        let program = path_to_string(&program, "pac executable")?;
        Ok(Self {
            argv: vec![program],
            verbose,
        })
    }

    /// Create (or overwrite) a named auth profile for the environment URL.
    pub fn auth_create(&self, profile: &str, url: &str) -> Result<()> {
        self.expect_success(
            "auth create",
            &["auth", "create", "--name", profile, "--url", url],
        )?;
        Ok(())
    }

    /// Select the named auth profile as active.
    pub fn auth_select(&self, profile: &str) -> Result<()> {
        self.expect_success("auth select", &["auth", "select", "--name", profile])?;
        Ok(())
    }

    /// List solutions in the active environment; returns the raw text.
    pub fn solution_list(&self) -> Result<String> {
        let output = self.expect_success("solution list", &["solution", "list"])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Export one solution, unmanaged, to the archive path.
    pub fn solution_export(&self, unique_name: &str, archive: &Path) -> Result<()> {
        let archive = path_to_string(archive, "archive")?;
        let args = export_args(unique_name, &archive);
        self.expect_success("solution export", &to_str_args(&args))?;
        Ok(())
    }

    /// Unpack an archive into the target folder as an unmanaged solution.
    pub fn solution_unpack(&self, archive: &Path, folder: &Path) -> Result<()> {
        let archive = path_to_string(archive, "archive")?;
        let folder = path_to_string(folder, "unpack folder")?;
        let args = unpack_args(&archive, &folder);
        self.expect_success("solution unpack", &to_str_args(&args))?;
        Ok(())
    }

    /// Decompile one canvas app package into the sources folder.
    pub fn canvas_unpack(&self, msapp: &Path, sources: &Path) -> Result<()> {
        let msapp = path_to_string(msapp, "app package")?;
        let sources = path_to_string(sources, "sources folder")?;
        let args = canvas_args(&msapp, &sources);
        self.expect_success("canvas unpack", &to_str_args(&args))?;
        Ok(())
    }

    fn expect_success(&self, label: &str, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("exit status {}", output.status),
                text => text.to_string(),
            };
            return Err(anyhow!("pac {label} failed: {detail}"));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        if self.verbose {
            eprintln!("running: pac {}", args.join(" "));
        }
        tracing::debug!(program = %self.argv[0], ?args, "invoking pac");
        let mut command = Command::new(&self.argv[0]);
        command.args(&self.argv[1..]);
        command.args(args);
        command
            .output()
            .with_context(|| format!("run pac {}", args.join(" ")))
    }
}

fn parse_command_override(raw: &str) -> Result<Vec<String>> {
    let argv =
        shell_words::split(raw).with_context(|| format!("parse {PAC_COMMAND_ENV}"))?;
    if argv.is_empty() {
        return Err(anyhow!("{PAC_COMMAND_ENV} is empty"));
    }
    Ok(argv)
}

fn export_args(unique_name: &str, archive: &str) -> Vec<String> {
    vec![
        "solution".to_string(),
        "export".to_string(),
        "--name".to_string(),
        unique_name.to_string(),
        "--path".to_string(),
        archive.to_string(),
        "--managed".to_string(),
        "false".to_string(),
    ]
}

fn unpack_args(archive: &str, folder: &str) -> Vec<String> {
    vec![
        "solution".to_string(),
        "unpack".to_string(),
        "--zipfile".to_string(),
        archive.to_string(),
        "--folder".to_string(),
        folder.to_string(),
        "--packagetype".to_string(),
        "Unmanaged".to_string(),
    ]
}

fn canvas_args(msapp: &str, sources: &str) -> Vec<String> {
    vec![
        "canvas".to_string(),
        "unpack".to_string(),
        "--msapp".to_string(),
        msapp.to_string(),
        "--sources".to_string(),
        sources.to_string(),
    ]
}

fn to_str_args(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

fn path_to_string(path: &Path, label: &str) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{label} path is not valid UTF-8"))
}
