//! Browser process management.
//!
//! Spawns the Chromium executable with a dedicated profile directory and a
//! remote debugging port, and owns the child's lifecycle. Nothing else in
//! the system may signal the process.

use crate::error::{Error, Result};
use crate::introspect::DEFAULT_DEBUG_PORT;
use std::path::PathBuf;
use tokio::process::{Child, Command};

/// Configuration for a browser launch.
///
/// Constructed once before launch and treated as immutable thereafter.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Path to the Chrome/Chromium executable
    pub executable: PathBuf,
    /// Profile (user data) directory handed to the browser
    pub user_data_dir: PathBuf,
    /// Remote debugging port
    pub port: u16,
    /// URL opened when the browser starts
    pub url: String,
    /// Profile bootstrap mode: launch, confirm readiness, and hand the
    /// still-running browser back to the caller instead of automating it
    pub initial_setup: bool,
}

impl LaunchConfig {
    /// Create a config with the default port and a blank initial page.
    pub fn new(executable: impl Into<PathBuf>, user_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            user_data_dir: user_data_dir.into(),
            port: DEFAULT_DEBUG_PORT,
            url: "about:blank".to_string(),
            initial_setup: false,
        }
    }

    /// Command-line arguments passed to the executable, in order.
    pub fn args(&self) -> Vec<String> {
        vec![
            format!("--remote-debugging-port={}", self.port),
            format!("--user-data-dir={}", self.user_data_dir.display()),
            "--remote-allow-origins=*".to_string(),
            self.url.clone(),
        ]
    }
}

/// Owns the browser child process.
///
/// Exists in two states: holding a running child, or empty (never launched,
/// or already terminated). [`terminate`](Self::terminate) is idempotent
/// across both.
///
/// Dropping a `BrowserProcess` does NOT kill the browser; the only kill
/// path is the explicit terminate. The profile bootstrap flow relies on
/// this to leave the browser open for the user.
#[derive(Debug, Default)]
pub struct BrowserProcess {
    child: Option<Child>,
}

impl BrowserProcess {
    /// Launch the browser process.
    ///
    /// # Errors
    ///
    /// Returns `Error::LaunchFailed` if the executable cannot be spawned or
    /// the process exits within the first ~100ms.
    pub async fn launch(config: &LaunchConfig) -> Result<Self> {
        let args = config.args();
        tracing::info!(
            executable = %config.executable.display(),
            args = %args.join(" "),
            "launching browser"
        );

        let mut child = Command::new(&config.executable)
            .args(&args)
            .spawn()
            .map_err(|e| Error::LaunchFailed(format!("Failed to spawn process: {}", e)))?;

        // Check if process started successfully
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        match child.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::LaunchFailed(format!(
                    "Browser process exited immediately with status: {}",
                    status
                )));
            }
            Ok(None) => {
                // Process is still running, good!
            }
            Err(e) => {
                return Err(Error::LaunchFailed(format!(
                    "Failed to check process status: {}",
                    e
                )));
            }
        }

        Ok(Self { child: Some(child) })
    }

    /// Returns true if a child is still attached to this handle.
    pub fn is_attached(&self) -> bool {
        self.child.is_some()
    }

    /// Terminate the browser process and reap it.
    ///
    /// Idempotent: terminating an already-terminated or never-launched
    /// handle is a logged no-op.
    pub async fn terminate(&mut self) -> Result<()> {
        match self.child.take() {
            Some(mut child) => {
                child
                    .kill()
                    .await
                    .map_err(|e| Error::LaunchFailed(format!("Failed to kill process: {}", e)))?;
                let _ = child.wait().await;
                tracing::info!("browser process terminated");
                Ok(())
            }
            None => {
                tracing::debug!("no browser process to terminate");
                Ok(())
            }
        }
    }
}
