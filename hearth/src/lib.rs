//! # hearth
//!
//! Core of the hearth backend: typed clients for the weather and calendar
//! upstreams, a read-through TTL cache with single-flight refresh, and an
//! in-process broker that fans refreshed values out to connected displays.
//!
//! The shape is deliberate: handlers talk to a [`Cache`], the cache holds the
//! upstream client as a [`Fetch`] capability (never re-exposed, so nothing can
//! bypass the cache), and the [`Broker`] is fed by background refreshers
//! rather than by request traffic.
//!
//! ## Main modules
//!
//! - [`cache`]: [`Cache`], [`Fetch`] — TTL memoization around one upstream call.
//! - [`broker`]: [`Broker`], [`Subscription`] — subscriber registry and fan-out.
//! - [`weather`], [`calendar`]: upstream clients (the wire boundary).
//! - [`refresh`]: background tick feeding the broker from a cache.
//! - [`error`]: [`FetchError`].

pub mod broker;
pub mod cache;
pub mod calendar;
pub mod error;
mod http;
pub mod refresh;
pub mod weather;

pub use broker::{Broker, Subscription};
pub use cache::{Cache, Fetch};
pub use error::FetchError;
