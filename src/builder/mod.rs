//! Builder API for store construction.
//!
//! The builder is the crate's configuration layer: it picks the initial
//! state, optional overrides for ceiling and currency, the guards, and any
//! subscribers that should see the first published snapshot.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StoreBuilder;
