//! Tree payload encoding and cursor-based decoding

use crate::model::{EntryMode, ObjectId, TreeEntry, ID_LEN};
use crate::{Error, Result};

/// Encode entries into a canonical tree payload
///
/// Entries are sorted by name here, so the payload does not depend on the
/// order the caller discovered them in. Duplicate or invalid names are
/// rejected.
pub fn encode_tree_entries(entries: &[TreeEntry]) -> Result<Vec<u8>> {
    let mut sorted: Vec<&TreeEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for pair in sorted.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(Error::malformed(format!(
                "duplicate tree entry '{}'",
                pair[0].name_lossy()
            )));
        }
    }

    let mut out = Vec::new();
    for entry in sorted {
        if !TreeEntry::is_valid_name(&entry.name) {
            return Err(Error::malformed(format!(
                "invalid tree entry name '{}'",
                entry.name_lossy()
            )));
        }
        out.extend_from_slice(entry.mode.as_str().as_bytes());
        out.push(b' ');
        out.extend_from_slice(&entry.name);
        out.push(0);
        out.extend_from_slice(entry.id.as_bytes());
    }
    Ok(out)
}

/// Decode a tree payload into its entries, in stored order
pub fn decode_tree_entries(payload: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut cursor = Cursor::new(payload);
    let mut entries = Vec::new();

    while !cursor.is_at_end() {
        let start = cursor.pos;
        let mode = cursor.take_until(b' ')?;
        let mode = EntryMode::from_bytes(mode).ok_or_else(|| {
            Error::malformed(format!(
                "unknown entry mode '{}' at offset {}",
                String::from_utf8_lossy(mode),
                start
            ))
        })?;
        let name = cursor.take_until(0)?;
        if !TreeEntry::is_valid_name(name) {
            return Err(Error::malformed(format!(
                "invalid entry name at offset {}",
                start
            )));
        }
        let name = name.to_vec();
        let id = cursor.take_id()?;
        entries.push(TreeEntry { mode, name, id });
    }

    Ok(entries)
}

/// Bounds-checked reader over a tree payload
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Consume bytes up to `delim`, returning them and skipping the delimiter
    fn take_until(&mut self, delim: u8) -> Result<&'a [u8]> {
        let buf = self.buf;
        let rest = &buf[self.pos..];
        let len = rest.iter().position(|&b| b == delim).ok_or_else(|| {
            Error::malformed(format!(
                "missing {:?} delimiter after offset {}",
                delim as char, self.pos
            ))
        })?;
        self.pos += len + 1;
        Ok(&rest[..len])
    }

    fn take_id(&mut self) -> Result<ObjectId> {
        let remaining = self.buf.len() - self.pos;
        if remaining < ID_LEN {
            return Err(Error::malformed(format!(
                "truncated entry digest at offset {}: {} of {} bytes",
                self.pos, remaining, ID_LEN
            )));
        }
        let buf = self.buf;
        let bytes = &buf[self.pos..self.pos + ID_LEN];
        self.pos += ID_LEN;
        ObjectId::from_slice(bytes).ok_or_else(|| Error::malformed("bad digest width"))
    }
}
