//! Launch orchestration: spawn, poll, resolve, drive.

use crate::session::Session;
use cdp_protocol::RemoteObject;
use cdp_runtime::{
    BrowserProcess, Error, Introspector, LaunchConfig, READY_MAX_ATTEMPTS, READY_POLL_INTERVAL,
    Result,
};
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of [`Browser::launch`].
pub enum Launched {
    /// The browser is up and a page endpoint is resolved.
    Ready(Browser),
    /// Profile bootstrap mode: the browser is up and left running so a
    /// human can set up the profile. No automation follows; the caller
    /// owns the process handle and decides when (or whether) to kill it.
    SetupComplete(BrowserProcess),
}

/// A launched browser with a resolved page endpoint.
pub struct Browser {
    process: BrowserProcess,
    introspector: Introspector,
    session: Session,
}

impl Browser {
    /// Launch the browser and bring it to a drivable state.
    ///
    /// Spawns the process, polls the debug endpoint until it reports a
    /// target (30 attempts at a 1s cadence), then resolves the first page
    /// target's WebSocket debugger URL. With `config.initial_setup` set,
    /// resolution is skipped and [`Launched::SetupComplete`] is returned
    /// instead.
    ///
    /// On readiness or resolution failure the spawned process is
    /// terminated before the error is returned, so an `Err` never leaks a
    /// running browser.
    pub async fn launch(config: LaunchConfig) -> Result<Launched> {
        let mut process = BrowserProcess::launch(&config).await?;
        let introspector = Introspector::new(config.port);

        if !introspector
            .wait_until_ready(READY_MAX_ATTEMPTS, READY_POLL_INTERVAL)
            .await
        {
            if let Err(e) = process.terminate().await {
                warn!(error = %e, "failed to terminate browser after readiness failure");
            }
            return Err(Error::NotReady {
                attempts: READY_MAX_ATTEMPTS,
            });
        }
        info!("browser debug endpoint is ready");

        if config.initial_setup {
            return Ok(Launched::SetupComplete(process));
        }

        let ws_url = match introspector.resolve_page_endpoint().await {
            Ok(ws_url) => ws_url,
            Err(e) => {
                if let Err(terminate_err) = process.terminate().await {
                    warn!(error = %terminate_err, "failed to terminate browser after resolution failure");
                }
                return Err(e);
            }
        };

        Ok(Launched::Ready(Browser {
            process,
            introspector,
            session: Session::new(ws_url),
        }))
    }

    /// The resolved control channel endpoint.
    pub fn endpoint(&self) -> &str {
        self.session.endpoint()
    }

    /// Set the navigate load timeout for subsequent operations.
    pub fn set_load_timeout(&mut self, timeout: Duration) {
        self.session.set_load_timeout(timeout);
    }

    /// Navigate the page and wait for load completion.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.session.navigate(url).await
    }

    /// Evaluate a JavaScript expression in the page.
    pub async fn evaluate(&self, expression: &str) -> Result<RemoteObject> {
        self.session.evaluate(expression).await
    }

    /// Re-resolve the page endpoint, replacing the stored address.
    ///
    /// Needed when the original page target went away (tab closed, new
    /// window). The load timeout carries over.
    pub async fn refresh_endpoint(&mut self) -> Result<()> {
        let ws_url = self.introspector.resolve_page_endpoint().await?;
        let timeout = self.session.load_timeout();
        self.session = Session::new(ws_url).with_load_timeout(timeout);
        Ok(())
    }

    /// Terminate the browser process. Idempotent.
    pub async fn close(&mut self) -> Result<()> {
        self.process.terminate().await
    }
}
