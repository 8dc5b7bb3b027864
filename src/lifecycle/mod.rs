//! Lifecycle management.
//!
//! ```text
//! main: bind listener (fatal on error) → spawn Ctrl+C watcher → serve
//! Ctrl+C → Shutdown::trigger → server stops accepting, drains, returns
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
