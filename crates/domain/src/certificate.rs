//! PEM bundle validation for the controller's TLS identity.

use crate::error::ValidationError;

/// A PEM bundle holding certificates and one unencrypted private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    pub certificates: usize,
}

impl CertificateBundle {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCertificate`] when the bundle has no
    /// certificate, not exactly one unencrypted private key, an encrypted key
    /// or an unterminated block.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let mut open: Option<&str> = None;
        let mut certificates = 0;
        let mut keys = 0;

        for line in text.lines().map(str::trim) {
            if let Some(label) = pem_label(line, "-----BEGIN ") {
                if open.is_some() {
                    return Err(ValidationError::InvalidCertificate("nested PEM block"));
                }
                open = Some(label);
            } else if let Some(label) = pem_label(line, "-----END ") {
                if open != Some(label) {
                    return Err(ValidationError::InvalidCertificate("unbalanced PEM block"));
                }
                open = None;
                match label {
                    "CERTIFICATE" => certificates += 1,
                    "PRIVATE KEY" => keys += 1,
                    "ENCRYPTED PRIVATE KEY" => {
                        return Err(ValidationError::InvalidCertificate(
                            "private key must not be encrypted",
                        ));
                    }
                    _ => {}
                }
            }
        }

        if open.is_some() {
            return Err(ValidationError::InvalidCertificate("unterminated PEM block"));
        }
        if certificates == 0 {
            return Err(ValidationError::InvalidCertificate("no certificate"));
        }
        if keys != 1 {
            return Err(ValidationError::InvalidCertificate(
                "exactly one private key expected",
            ));
        }
        Ok(Self { certificates })
    }
}

fn pem_label<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)?.strip_suffix("-----")
}
