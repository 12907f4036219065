//! Ranging Module
//!
//! The ranging collaborator sits behind a command channel and reports one
//! batch of [`BeaconSighting`](crate::domain::models::BeaconSighting)s per
//! scan cycle.
//!
//! ```text
//!  RangingCommand ──► RangingService ──► AppEvent::BeaconsRanged ──► UI
//!                          │
//!                          └── Recording (JSON lines, one cycle per line)
//! ```
//!
//! - [`recording`] - Recorded ranging cycles and their loader
//! - [`service`] - Service thread, start/stop handling and cycle pacing

pub mod recording;
pub mod service;

pub use service::{spawn_ranging_thread, RangingService};
