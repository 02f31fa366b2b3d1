//! The open-document workflow: authenticated fetch, transient viewing,
//! and direct-URL fallback.

pub mod coordinator;
pub mod fetch;
pub mod viewer;

pub use coordinator::{DocumentOpener, OpenError};
pub use fetch::{DocumentFetcher, FetchError, HttpFetcher};
pub use viewer::{TransientHandle, TransientViewer, ViewerError, ViewerLauncher};
