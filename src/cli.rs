//! CLI argument parsing for the solution pull workflow.
//!
//! The CLI is intentionally thin: it collects explicit run parameters and
//! hands them to the workflow unchanged, so no step reads ambient state.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default working directory for exports and unpacked sources.
pub const DEFAULT_ROOT: &str = "powerplatform";

/// Default auth profile label created and selected for each run.
pub const DEFAULT_PROFILE: &str = "solpull";

/// Root CLI entrypoint for the pull workflow.
#[derive(Parser, Debug)]
#[command(
    name = "solpull",
    version,
    about = "Export and unpack Power Platform solutions into source control",
    after_help = "Examples:\n  solpull pull --url https://org.crm.dynamics.com --name \"Widgets\"\n  solpull pull --url https://org.crm.dynamics.com --unique-name spl_widgets --skip-canvas\n  solpull list --url https://org.crm.dynamics.com --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Pull(PullArgs),
    List(ListArgs),
}

/// Pull command inputs: authenticate, export, unpack, decompile.
#[derive(Parser, Debug)]
#[command(about = "Export a solution and unpack it into source control")]
pub struct PullArgs {
    /// Environment URL to authenticate against
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Solution display name; resolved to a unique name via the listing
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Solution unique name; used verbatim, skipping resolution
    #[arg(long, value_name = "NAME")]
    pub unique_name: Option<String>,

    /// Working directory holding exports/ and solution-src/
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Auth profile label to create and select
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Skip decompiling canvas app packages
    #[arg(long)]
    pub skip_canvas: bool,

    /// Echo each external invocation
    #[arg(long)]
    pub verbose: bool,
}

/// List command inputs for printing the environment's solutions.
#[derive(Parser, Debug)]
#[command(about = "List solutions visible in the environment")]
pub struct ListArgs {
    /// Environment URL to authenticate against
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Auth profile label to create and select
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Emit parsed listing rows as JSON instead of raw text
    #[arg(long)]
    pub json: bool,

    /// Echo each external invocation
    #[arg(long)]
    pub verbose: bool,
}
