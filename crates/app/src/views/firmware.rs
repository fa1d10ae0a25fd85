//! Firmware and certificate uploads.
//!
//! Both need an explicit confirmation and a reboot to take effect.

use ofp_domain::error::OfpError;

use super::Outcome;
use crate::ports::ControllerApi;

/// A file picked in an upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    /// `None` or empty when no file was selected.
    pub file: Option<Vec<u8>>,
    pub confirmed: bool,
}

impl Upload {
    fn into_payload(self) -> Option<Vec<u8>> {
        if !self.confirmed {
            return None;
        }
        self.file.filter(|bytes| !bytes.is_empty())
    }
}

#[derive(Clone)]
pub struct FirmwareController<A> {
    api: A,
}

impl<A: ControllerApi> FirmwareController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip_all)]
    pub async fn upload_firmware(&self, upload: Upload) -> Result<Outcome, OfpError> {
        let Some(image) = upload.into_payload() else {
            return Ok(Outcome::Skipped);
        };
        tracing::info!(size = image.len(), "uploading firmware");
        self.api.upload_firmware(image).await?;
        Ok(Outcome::Reboot)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip_all)]
    pub async fn upload_certificate(&self, upload: Upload) -> Result<Outcome, OfpError> {
        let Some(bundle) = upload.into_payload() else {
            return Ok(Outcome::Skipped);
        };
        tracing::info!(size = bundle.len(), "uploading certificate bundle");
        self.api.upload_certificate(bundle).await?;
        Ok(Outcome::Reboot)
    }

    /// Trigger the reboot and return the controller's wait page.
    ///
    /// # Errors
    ///
    /// Propagates the controller error.
    pub async fn reboot(&self) -> Result<String, OfpError> {
        self.api.reboot().await
    }
}
