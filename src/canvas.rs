//! Canvas app package discovery under the unpacked solution tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_PACKAGE_EXT: &str = "msapp";
const SOURCE_DIR_SUFFIX: &str = "_src";

/// Recursively collect canvas app packages, sorted for deterministic order.
///
/// A missing root is not an error: solutions without canvas apps simply have
/// no `CanvasApps` directory after unpack.
pub fn find_app_packages(root: &Path) -> Result<Vec<PathBuf>> {
    let mut packages = Vec::new();
    if !root.exists() {
        return Ok(packages);
    }
    collect_packages(root, &mut packages)?;
    packages.sort();
    Ok(packages)
}

fn collect_packages(dir: &Path, packages: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_packages(&path, packages)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(APP_PACKAGE_EXT) {
            packages.push(path);
        }
    }
    Ok(())
}

/// Decompile target for one package: the file stem plus a fixed suffix,
/// placed beside the package.
pub fn source_output_dir(package: &Path) -> PathBuf {
    let stem = package
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("app");
    let dir_name = format!("{stem}{SOURCE_DIR_SUFFIX}");
    match package.parent() {
        Some(parent) => parent.join(dir_name),
        None => PathBuf::from(dir_name),
    }
}
