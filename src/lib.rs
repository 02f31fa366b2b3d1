//! Client-side document workflow for a healthcare appointment platform.
//!
//! Stored document references come in three forms — absolute URLs,
//! cloud-hosted paths (`/uploads/...`), and API-relative paths. The
//! [`retrieval`] module resolves a reference, fetches the bytes over the
//! authenticated document API, and hands them to an external viewer
//! through a short-lived temp-file handle, falling back to direct-URL
//! viewing when the authenticated path fails. [`documents`] carries the
//! remaining document flows (list, upload, share, delete).
//!
//! The platform opener and the session token are injected collaborators
//! ([`ViewerLauncher`], [`CredentialProvider`]); the workflow itself holds
//! no ambient state and caches nothing across calls.

pub mod config;
pub mod documents;
pub mod models;
pub mod resolver;
pub mod retrieval;
pub mod session;

pub use config::ApiConfig;
pub use documents::DocumentsClient;
pub use models::{DocumentReference, MediaType, RetrievedPayload};
pub use resolver::{ResolveStoredPath, UrlResolver};
pub use retrieval::{
    DocumentFetcher, DocumentOpener, FetchError, HttpFetcher, OpenError, TransientViewer,
    ViewerError, ViewerLauncher,
};
pub use session::{CredentialProvider, NoCredential, StaticToken, TokenStore};
