//! Binary object framing and tree payload encoding
//!
//! Framed object layout (before compression):
//! ```text
//! <kind> SP <ascii decimal payload length> NUL <payload>
//! ```
//!
//! Tree payload layout, entries sorted byte-wise by name, no separator:
//! ```text
//! <mode> SP <name> NUL <20 raw digest bytes> <mode> SP <name> NUL ...
//! ```

mod framing;
mod tree;

pub use framing::{frame, parse};
pub use tree::{decode_tree_entries, encode_tree_entries};
