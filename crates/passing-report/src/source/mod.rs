//! Play-by-play providers.
//!
//! The pipeline never knows where a season comes from: it asks a
//! [`PlayByPlaySource`] for a table and validates the columns itself.
//!
//! # Feature Flag
//!
//! [`NflverseSource`] downloads seasons over HTTP and requires the `remote`
//! feature (enabled by default). [`FileSource`] is always available.
//!
//! ```toml
//! # Local files only, no HTTP client
//! passing_report = { version = "0.1", default-features = false }
//! ```

mod file;
mod provider;

pub use file::FileSource;
pub use provider::PlayByPlaySource;

#[cfg(feature = "remote")]
mod nflverse;

#[cfg(feature = "remote")]
pub use nflverse::{NflverseConfig, NflverseConfigBuilder, NflverseSource};
