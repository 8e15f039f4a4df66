//! Sequential pull workflow: authenticate, export, unpack, decompile.
//!
//! Control flows strictly top to bottom. Each step gates the next; the first
//! fatal error ends the run and partial on-disk state is left as-is.

use crate::canvas;
use crate::cli::{ListArgs, PullArgs};
use crate::layout::WorkspaceLayout;
use crate::pac::PacTool;
use crate::resolve::{self, Resolution};
use anyhow::{anyhow, Context, Result};
use chrono::Local;

const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn run_pull(args: PullArgs) -> Result<()> {
    let ctx = PullContext::from_args(args)?;
    ctx.layout.ensure()?;
    let pac = PacTool::resolve(ctx.verbose)?;

    println!("Authenticating to {}", ctx.url);
    pac.auth_create(&ctx.profile, &ctx.url)?;
    pac.auth_select(&ctx.profile)?;

    let unique_name = resolve_identifier(&pac, &ctx)?;

    let timestamp = Local::now().format(ARCHIVE_TIMESTAMP_FORMAT).to_string();
    let archive = ctx.layout.archive_path(&unique_name, &timestamp);
    println!("Exporting {} to {}", unique_name, archive.display());
    pac.solution_export(&unique_name, &archive)?;

    let src_dir = ctx.layout.solution_src_dir();
    ctx.layout.clean_solution_src();
    println!("Unpacking into {}", src_dir.display());
    pac.solution_unpack(&archive, &src_dir)?;

    if ctx.skip_canvas {
        println!("Skipping canvas app decompilation.");
    } else {
        decompile_canvas_apps(&pac, &ctx.layout)?;
    }

    println!("Done. Solution unpacked to {}", src_dir.display());
    println!("Review the changes and commit them to source control.");
    Ok(())
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let pac = PacTool::resolve(args.verbose)?;
    pac.auth_create(&args.profile, &args.url)?;
    pac.auth_select(&args.profile)?;
    let listing = pac.solution_list()?;
    if args.json {
        let rows = resolve::parse_rows(&listing);
        let text = serde_json::to_string_pretty(&rows).context("serialize solution rows")?;
        println!("{text}");
    } else {
        print!("{listing}");
    }
    Ok(())
}

/// Explicit run context threaded through each step; no step reads globals.
struct PullContext {
    url: String,
    display_name: Option<String>,
    unique_name: Option<String>,
    profile: String,
    layout: WorkspaceLayout,
    skip_canvas: bool,
    verbose: bool,
}

impl PullContext {
    /// Validate inputs before any external invocation happens.
    fn from_args(args: PullArgs) -> Result<Self> {
        if args.name.is_none() && args.unique_name.is_none() {
            return Err(anyhow!(
                "provide --name or --unique-name to select a solution"
            ));
        }
        Ok(Self {
            url: args.url,
            display_name: args.name,
            unique_name: args.unique_name,
            profile: args.profile,
            layout: WorkspaceLayout::new(args.root),
            skip_canvas: args.skip_canvas,
            verbose: args.verbose,
        })
    }
}

fn resolve_identifier(pac: &PacTool, ctx: &PullContext) -> Result<String> {
    if let Some(unique) = &ctx.unique_name {
        return Ok(unique.clone());
    }
    let display = ctx
        .display_name
        .as_deref()
        .ok_or_else(|| anyhow!("provide --name or --unique-name to select a solution"))?;
    let listing = pac.solution_list()?;
    match resolve::resolve_unique_name(&listing, display)? {
        Resolution::Matched(unique) => {
            println!("Resolved '{display}' to {unique}");
            Ok(unique)
        }
        Resolution::FallbackDisplayName => {
            // The export call may still reject the display name downstream.
            eprintln!(
                "warning: no unique name found for '{display}'; using the display name for export"
            );
            Ok(display.to_string())
        }
    }
}

fn decompile_canvas_apps(pac: &PacTool, layout: &WorkspaceLayout) -> Result<()> {
    let canvas_dir = layout.canvas_apps_dir();
    let packages = canvas::find_app_packages(&canvas_dir)?;
    if packages.is_empty() {
        println!("No canvas app packages under {}", canvas_dir.display());
        return Ok(());
    }
    for package in &packages {
        let sources = canvas::source_output_dir(package);
        println!("Decompiling {}", package.display());
        pac.canvas_unpack(package, &sources)?;
    }
    println!("Decompiled {} canvas app package(s).", packages.len());
    Ok(())
}
