//! Executable discovery and profile directory setup.

use anyhow::Context;
use std::path::PathBuf;

/// Well-known Chromium executable names, tried in order.
const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Locate the browser executable: explicit flag, then `$CDP_CHROME`, then
/// well-known names on PATH.
pub fn find_chrome(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("CDP_CHROME") {
        return Ok(PathBuf::from(path));
    }
    for candidate in CHROME_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }
    anyhow::bail!("no Chrome executable found; pass --chrome or set CDP_CHROME")
}

/// Resolve the profile directory and make sure it exists.
///
/// Defaults to `<local data dir>/cdp/profile`.
pub fn profile_dir(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let dir = match flag {
        Some(dir) => dir,
        None => dirs::data_local_dir()
            .context("could not determine the local data directory; pass --profile-dir")?
            .join("cdp")
            .join("profile"),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create profile directory {}", dir.display()))?;
    Ok(dir)
}
