//! Display stream protocol: the wire shape of one event pushed to a connected display.
//!
//! This crate defines what a display sees on the event stream: a tagged event
//! carrying a refreshed upstream value. It does not depend on the core crate;
//! the server bridges typed snapshots into [`DisplayEvent`] payloads.

pub mod event;

pub use event::DisplayEvent;
