//! line-transport: line-oriented command channel abstractions
//!
//! This crate provides the trait and types for writing newline-terminated
//! command lines to a lighting controller, with feature-gated backends. The
//! default build enables a `mock` backend so that binaries can compile and
//! test on any host without a device attached.

mod types;
pub use types::PortInfo;

mod error;
pub use error::{Result, TransportError};

mod traits;
pub use traits::LineChannel;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::MockChannel;

#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "serial")]
pub use serial::SerialChannel;
