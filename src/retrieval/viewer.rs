//! Transient viewing of retrieved documents.
//!
//! Retrieved bytes are written to a named temp file so an external viewer
//! can open them. The file is deleted by a background task after a fixed
//! delay from creation, whether or not the viewer consumed it: no
//! cancellation if the viewer closes early, no extension if it is still
//! open.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::RetrievedPayload;

/// How long a transient handle stays valid after creation.
pub const HANDLE_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Could not stage the payload to a local file.
    #[error("failed to stage document for viewing: {0}")]
    Staging(#[from] std::io::Error),
    /// The platform viewer refused to launch.
    #[error("external viewer failed to launch: {0}")]
    Launch(String),
}

/// Opens content in the platform's external full-screen viewer.
///
/// Launching is platform-specific (desktop shell, mobile intent), so the
/// embedding application injects its opener here; the workflow itself only
/// decides *what* gets opened.
pub trait ViewerLauncher {
    /// Open a local file in the external viewer.
    fn launch_path(&self, path: &Path) -> Result<(), ViewerError>;
    /// Open an absolute URL in the external viewer.
    fn launch_url(&self, url: &str) -> Result<(), ViewerError>;
}

// Shared launchers work too (the coordinator owns its viewer, while the
// embedding app usually keeps one opener).
impl<T: ViewerLauncher + ?Sized> ViewerLauncher for std::sync::Arc<T> {
    fn launch_path(&self, path: &Path) -> Result<(), ViewerError> {
        (**self).launch_path(path)
    }

    fn launch_url(&self, url: &str) -> Result<(), ViewerError> {
        (**self).launch_url(url)
    }
}

// ═══════════════════════════════════════════════════════════
// TransientHandle — time-boxed local reference
// ═══════════════════════════════════════════════════════════

/// Short-lived, process-local reference to retrieved content.
///
/// Exclusively owned by the open-document call that created it; never
/// shared, cached, or reused. The backing file disappears when the TTL
/// task fires, and later access through the path simply fails.
pub struct TransientHandle {
    path: PathBuf,
}

impl TransientHandle {
    /// Write `payload` to a temp file and schedule its unconditional
    /// deletion after `ttl`.
    ///
    /// Must run inside a tokio runtime — the cleanup task is spawned.
    pub fn create(payload: &RetrievedPayload, ttl: Duration) -> Result<Self, ViewerError> {
        let mut file = tempfile::Builder::new()
            .prefix("caredocs-")
            .suffix(&format!(".{}", payload.extension()))
            .tempfile()?;
        file.write_all(&payload.bytes)?;

        // Persist past the guard's drop; deletion belongs to the TTL task.
        let (_file, path) = file.keep().map_err(|e| ViewerError::Staging(e.error))?;

        let cleanup_path = path.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            match tokio::fs::remove_file(&cleanup_path).await {
                Ok(()) => {
                    tracing::debug!(path = %cleanup_path.display(), "transient handle released")
                }
                Err(e) => {
                    tracing::debug!(
                        path = %cleanup_path.display(),
                        error = %e,
                        "transient handle already gone"
                    )
                }
            }
        });

        Ok(Self { path })
    }

    /// Local path to hand to the external viewer.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ═══════════════════════════════════════════════════════════
// TransientViewer — present payloads and URLs
// ═══════════════════════════════════════════════════════════

/// Presents retrieved content in an external viewer.
pub struct TransientViewer<L: ViewerLauncher> {
    launcher: L,
    ttl: Duration,
}

impl<L: ViewerLauncher> TransientViewer<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            ttl: HANDLE_TTL,
        }
    }

    /// Constructor with a custom handle lifetime, for tests.
    pub fn with_ttl(launcher: L, ttl: Duration) -> Self {
        Self { launcher, ttl }
    }

    /// Stage `payload` in a transient handle and open the external viewer
    /// on it. Cleanup is scheduled at handle creation; a launch failure
    /// does not cancel it.
    pub async fn present(&self, payload: &RetrievedPayload) -> Result<(), ViewerError> {
        let handle = TransientHandle::create(payload, self.ttl)?;
        self.launcher.launch_path(handle.path())
    }

    /// Open the external viewer directly on an already-resolved absolute
    /// URL. No local handle, nothing to clean up.
    pub fn present_url(&self, url: &str) -> Result<(), ViewerError> {
        self.launcher.launch_url(url)
    }
}

// ═══════════════════════════════════════════════════════════
// RecordingLauncher — test double
// ═══════════════════════════════════════════════════════════

/// Recording launcher for tests — remembers every launch and can be told
/// to fail either operation.
#[derive(Default)]
pub struct RecordingLauncher {
    paths: std::sync::Mutex<Vec<PathBuf>>,
    urls: std::sync::Mutex<Vec<String>>,
    fail_paths: bool,
    fail_urls: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_paths(mut self) -> Self {
        self.fail_paths = true;
        self
    }

    pub fn with_failing_urls(mut self) -> Self {
        self.fail_urls = true;
        self
    }

    pub fn launched_paths(&self) -> Vec<PathBuf> {
        self.paths.lock().expect("lock").clone()
    }

    pub fn launched_urls(&self) -> Vec<String> {
        self.urls.lock().expect("lock").clone()
    }
}

impl ViewerLauncher for RecordingLauncher {
    fn launch_path(&self, path: &Path) -> Result<(), ViewerError> {
        self.paths.lock().expect("lock").push(path.to_path_buf());
        if self.fail_paths {
            return Err(ViewerError::Launch("viewer unavailable".into()));
        }
        Ok(())
    }

    fn launch_url(&self, url: &str) -> Result<(), ViewerError> {
        self.urls.lock().expect("lock").push(url.to_string());
        if self.fail_urls {
            return Err(ViewerError::Launch("viewer unavailable".into()));
        }
        Ok(())
    }
}
