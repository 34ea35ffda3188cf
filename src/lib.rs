//! # Billwatch - Mahadiscom electricity bill poller
//!
//! Polls the Mahadiscom consumer web portal on a fixed interval, extracts the
//! latest electricity bill figures for a configured consumer account, and
//! exposes them as named sensor values to a host monitoring loop.
//!
//! ## Features
//!
//! - **Two-step exchange**: challenge retrieval followed by a form submission
//!   within one cookie session
//! - **Throttled polling**: a minimum-interval gate, 30 minutes by default
//! - **Stale-tolerant sensors**: failed cycles keep the previous values
//! - **Configuration**: YAML-based configuration with startup validation
//!
//! ## Architecture
//!
//! The application follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `portal`: Portal client performing the two-step exchange
//! - `bill`: Bill field table and value extraction
//! - `sensor`: Sensor projections and display metadata

pub mod bill;
pub mod config;
pub mod error;
pub mod logging;
pub mod portal;
pub mod sensor;

// Re-export commonly used types
pub use bill::BillField;
pub use config::Config;
pub use error::{BillwatchError, Result};
pub use portal::{FetchOutcome, PortalClient};
pub use sensor::Sensor;
