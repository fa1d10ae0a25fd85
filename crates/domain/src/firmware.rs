//! Sanity checks on firmware images before they are flashed.
//!
//! An ESP32 application image starts with a 24 byte image header followed by
//! an 8 byte segment header, then the 256 byte application descriptor.

use crate::error::ValidationError;

pub const IMAGE_MAGIC: u8 = 0xE9;
pub const APP_DESC_MAGIC: u32 = 0xABCD_5432;

const IMAGE_HEADER_LEN: usize = 24;
const SEGMENT_HEADER_LEN: usize = 8;
const APP_DESC_OFFSET: usize = IMAGE_HEADER_LEN + SEGMENT_HEADER_LEN;
const APP_DESC_LEN: usize = 256;

/// Application identity embedded in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub version: String,
    pub project_name: String,
    pub time: String,
    pub date: String,
    pub idf_version: String,
}

/// Result of inspecting an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareImage {
    pub size: usize,
    /// Present when the image is long enough to carry a descriptor.
    pub descriptor: Option<AppDescriptor>,
}

impl FirmwareImage {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFirmware`] for an empty image, a
    /// wrong image magic or a wrong application descriptor magic.
    pub fn inspect(bytes: &[u8]) -> Result<Self, ValidationError> {
        let Some(&magic) = bytes.first() else {
            return Err(ValidationError::InvalidFirmware("empty image"));
        };
        if magic != IMAGE_MAGIC {
            return Err(ValidationError::InvalidFirmware("image magic mismatch"));
        }

        let descriptor = match bytes.get(APP_DESC_OFFSET..APP_DESC_OFFSET + APP_DESC_LEN) {
            Some(desc) => Some(parse_descriptor(desc)?),
            None => None,
        };

        Ok(Self {
            size: bytes.len(),
            descriptor,
        })
    }
}

fn parse_descriptor(desc: &[u8]) -> Result<AppDescriptor, ValidationError> {
    let magic = u32::from_le_bytes([desc[0], desc[1], desc[2], desc[3]]);
    if magic != APP_DESC_MAGIC {
        return Err(ValidationError::InvalidFirmware("app descriptor magic mismatch"));
    }
    Ok(AppDescriptor {
        version: c_string(&desc[16..48]),
        project_name: c_string(&desc[48..80]),
        time: c_string(&desc[80..96]),
        date: c_string(&desc[96..112]),
        idf_version: c_string(&desc[112..144]),
    })
}

fn c_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
