//! Fallback coordination for opening a document.
//!
//! One user tap, one linear pass: validate the reference, try the
//! authenticated fetch-and-view path, and on any failure there fall back
//! to direct-URL viewing. Every intermediate error is handled here; the
//! caller only ever sees an invalid reference or the aggregated failure
//! of both paths.

use crate::models::DocumentReference;
use crate::resolver::ResolveStoredPath;
use crate::session::CredentialProvider;

use super::fetch::DocumentFetcher;
use super::viewer::{TransientViewer, ViewerLauncher};

/// Terminal errors of the open-document workflow — the only ones the
/// calling UI has to surface.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The reference has no identifier; nothing was attempted.
    #[error("document reference has no identifier")]
    InvalidReference,
    /// Both the authenticated path and the direct-URL fallback failed.
    #[error("could not open document (authenticated: {primary}; direct: {fallback})")]
    OpenFailed { primary: String, fallback: String },
}

/// Orchestrates one open-document action.
///
/// Concurrent calls run independently — documents are read-only, nothing
/// here is shared or cached, and a second tap before the first completes
/// simply starts a redundant task. There is no cancellation: a started
/// fetch or launch runs to completion or failure.
pub struct DocumentOpener<R: ResolveStoredPath, F: DocumentFetcher, L: ViewerLauncher> {
    resolver: R,
    fetcher: F,
    viewer: TransientViewer<L>,
}

impl<R: ResolveStoredPath, F: DocumentFetcher, L: ViewerLauncher> DocumentOpener<R, F, L> {
    pub fn new(resolver: R, fetcher: F, viewer: TransientViewer<L>) -> Self {
        Self {
            resolver,
            fetcher,
            viewer,
        }
    }

    /// Open one document in the external viewer.
    ///
    /// Primary path: authenticated fetch, then transient viewing. Fallback
    /// path: resolve the stored path to a direct URL and open that instead
    /// — the document is then viewed unauthenticated.
    pub async fn open_document(
        &self,
        doc: &DocumentReference,
        credentials: &dyn CredentialProvider,
    ) -> Result<(), OpenError> {
        if doc.id.is_empty() {
            return Err(OpenError::InvalidReference);
        }

        let token = credentials.bearer_token().unwrap_or_default();
        let primary_failure = match self.fetcher.fetch(&doc.id, &token).await {
            Ok(payload) => match self.viewer.present(&payload).await {
                Ok(()) => {
                    tracing::debug!(document_id = %doc.id, "document opened via authenticated fetch");
                    return Ok(());
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            document_id = %doc.id,
            error = %primary_failure,
            "authenticated path failed, falling back to direct URL"
        );

        let url = self.resolver.resolve(&doc.stored_path);
        if url.is_empty() {
            return Err(OpenError::OpenFailed {
                primary: primary_failure,
                fallback: "stored path is empty".to_string(),
            });
        }

        match self.viewer.present_url(&url) {
            Ok(()) => {
                tracing::info!(
                    document_id = %doc.id,
                    "document opened via direct URL (unauthenticated)"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(document_id = %doc.id, error = %e, "both retrieval paths failed");
                Err(OpenError::OpenFailed {
                    primary: primary_failure,
                    fallback: e.to_string(),
                })
            }
        }
    }
}
