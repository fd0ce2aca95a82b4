//! Wire types for the Chrome DevTools protocol.
//!
//! This crate contains the serde-serializable types exchanged with a
//! Chromium browser: the JSON messages carried over the WebSocket control
//! channel and the target records served by the HTTP introspection endpoint
//! (`http://localhost:<port>/json`). These types represent the "protocol
//! layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//!   (plus small pure helpers such as [`first_page_endpoint`])
//! - **1:1 with protocol**: Match the DevTools wire format
//! - **Stable**: Changes only when the wire protocol changes
//!
//! Connection management and higher-level APIs are built on top of these
//! types in `cdp-runtime` and `cdp-rs`.

pub mod evaluate;
pub mod message;
pub mod target;

pub use evaluate::*;
pub use message::*;
pub use target::*;
