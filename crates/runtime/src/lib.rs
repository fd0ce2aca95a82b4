//! CDP Runtime - Browser lifecycle, endpoint discovery, and connection
//!
//! This crate provides the low-level infrastructure for driving a Chromium
//! browser over the DevTools protocol:
//!
//! - **Launcher**: Spawning and terminating the browser process
//! - **Introspection**: Polling the HTTP endpoint for readiness and
//!   resolving a page target's WebSocket debugger URL
//! - **Transport**: WebSocket framing of JSON messages
//! - **Connection**: Command/response correlation by id and event delivery
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   cdp-rs    │  Browser / Session API
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ cdp-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Conn   │ │  id correlation, event queue
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Trans  │ │  WebSocket transport
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Launch │ │  Process management, /json polling
//! │  └────────┘ │
//! └─────────────┘
//! ```

pub mod connection;
pub mod error;
pub mod introspect;
pub mod launcher;
pub mod transport;

// Re-export key types at crate root
pub use connection::Connection;
pub use error::{Error, Result};
pub use introspect::{DEFAULT_DEBUG_PORT, Introspector, READY_MAX_ATTEMPTS, READY_POLL_INTERVAL};
pub use launcher::{BrowserProcess, LaunchConfig};
pub use transport::{TransportParts, WsReceiver, WsSender};
