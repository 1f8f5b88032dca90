//! Content addressing: digest and storage compression of framed objects

use crate::model::ObjectId;
use crate::{Error, Result};
use flate2::read::{ZlibDecoder, ZlibEncoder};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Compute the id of a framed object (header included)
pub fn identify(framed: &[u8]) -> ObjectId {
    ObjectId::digest(framed)
}

/// Stream codec applied to framed objects on disk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// zlib-wrapped DEFLATE, readable by git
    #[default]
    Zlib,
    /// zstd frames; smaller and faster, not git-compatible
    Zstd,
}

/// Compression codec plus optional level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compressor {
    pub compression: Compression,
    pub level: Option<i32>,
}

impl Compressor {
    pub fn new(compression: Compression, level: Option<i32>) -> Self {
        Compressor { compression, level }
    }

    /// Compress framed bytes for storage
    pub fn compress(&self, framed: &[u8]) -> Result<Vec<u8>> {
        match self.compression {
            Compression::Zlib => {
                let level = match self.level {
                    Some(l) => flate2::Compression::new(l.clamp(0, 9) as u32),
                    None => flate2::Compression::default(),
                };
                let mut out = Vec::new();
                ZlibEncoder::new(framed, level).read_to_end(&mut out)?;
                Ok(out)
            }
            Compression::Zstd => Ok(zstd::encode_all(framed, self.level.unwrap_or(3))?),
        }
    }

    /// Inverse of [`Compressor::compress`]
    ///
    /// Any stream that is not valid compressed data for the configured codec
    /// is reported as [`Error::CorruptObject`], never as an IO error.
    pub fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>> {
        let decoded = match self.compression {
            Compression::Zlib => {
                let mut out = Vec::new();
                ZlibDecoder::new(compressed)
                    .read_to_end(&mut out)
                    .map(|_| out)
            }
            Compression::Zstd => zstd::decode_all(compressed),
        };
        decoded.map_err(|e| Error::corrupt(format!("invalid {:?} stream: {}", self.compression, e)))
    }
}

/// Compress with the default (git-compatible) codec
pub fn compress(framed: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().compress(framed)
}

/// Decompress with the default (git-compatible) codec
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().decompress(compressed)
}
