//! File header (8 bytes).
//!
//! Layout, host byte order:
//! - 0-3: magic, the ASCII bytes `crdb` read as a little-endian u32
//! - 4-7: format version

use super::{MAGIC, VERSION};
use crate::error::DecodeError;
use crate::wire::ByteReader;

/// File header - first 8 bytes of a database file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
        }
    }
}

impl Header {
    /// Encoded size in bytes.
    pub const SIZE: usize = 8;

    /// Decode header from the first 8 bytes.
    ///
    /// Returns `None` if fewer than 8 bytes are available.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.get(..Self::SIZE)?;
        Some(Self {
            magic: u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            version: u32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }

    pub(crate) fn read(input: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            magic: input.u32()?,
            version: input.u32()?,
        })
    }

    /// Encode header to 8 bytes.
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.magic.to_ne_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_ne_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Check magic, then version.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if !self.validate_magic() {
            return Err(DecodeError::BadMagic(self.magic));
        }
        if !self.validate_version() {
            return Err(DecodeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}
