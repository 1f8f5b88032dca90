//! Content-addressed object store
//!
//! This module implements the storage layer using content-addressed objects.
//! Objects are identified by the SHA-1 of their framed bytes and compressed
//! with zlib (or zstd when configured).

mod address;
mod loose;
mod object;

pub use address::{compress, decompress, identify, Compression, Compressor};
pub use loose::{LooseStore, MIN_PREFIX_LEN};
pub use object::Object;
