//! Browser utilities.
//!
//! Provides:
//! - [`dom`] - window, localStorage and hash navigation helpers
//! - [`BrowserStorage`] - `localStorage` key-value adapter
//! - [`format`] - size and timestamp display helpers
//! - [`log`] - `tracing` subscriber writing to the browser console

pub mod dom;
pub mod format;
pub mod log;
mod storage;

pub use storage::BrowserStorage;
