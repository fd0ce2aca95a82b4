//! Chromium automation over the DevTools protocol.
//!
//! Launches a Chromium-family browser with a dedicated profile and a remote
//! debugging port, waits for the debug endpoint to come up, resolves the
//! first page target's WebSocket debugger URL, and drives navigation and
//! script evaluation over it.
//!
//! # Example
//!
//! ```no_run
//! use cdp::{Browser, LaunchConfig, Launched};
//!
//! # async fn run() -> cdp::Result<()> {
//! let config = LaunchConfig::new("/usr/bin/chromium", "/tmp/profile");
//! let Launched::Ready(mut browser) = Browser::launch(config).await? else {
//!     return Ok(()); // setup mode, browser left open for the user
//! };
//!
//! browser.navigate("https://example.com").await?;
//! let result = browser.evaluate("document.title").await?;
//! println!("{:?}", result.value);
//! browser.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod session;

pub use browser::{Browser, Launched};
pub use session::{DEFAULT_LOAD_TIMEOUT, Session};

// Re-export the layers the API surfaces.
pub use cdp_protocol::{Event, RemoteObject, Target};
pub use cdp_runtime::{
    BrowserProcess, Connection, DEFAULT_DEBUG_PORT, Error, Introspector, LaunchConfig,
    READY_MAX_ATTEMPTS, READY_POLL_INTERVAL, Result,
};
