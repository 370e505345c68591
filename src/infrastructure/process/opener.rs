//! Platform default-application opener

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{PlatformOpener, ProcessError};

/// Opens paths with the desktop's default handler (`xdg-open`, `open`, `start`)
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformOpener for SystemOpener {
    async fn open(&self, path: &Path) -> Result<(), ProcessError> {
        debug!(path = %path.display(), "opening with default handler");
        open::that_detached(path).map_err(|e| ProcessError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
