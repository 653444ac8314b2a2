//! GNU `.mo` writer.
//!
//! Layout (all integers u32 little endian):
//!
//! ```text
//! [magic 0x950412de][revision 0][N][orig table off][trans table off][hash size 0][hash off]
//! [orig table: N x (len, off)][trans table: N x (len, off)]
//! [original strings, NUL terminated][translated strings, NUL terminated]
//! ```
//!
//! No hash table is emitted; readers fall back to binary search over the
//! sorted original strings.

use std::collections::BTreeMap;
use std::io::Write;

use crate::{Catalog, CatalogError, Message};

const MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 7 * 4;

/// Separates `msgctxt` from `msgid` in the key.
const CONTEXT_SEPARATOR: char = '\u{04}';

/// Serialize `catalog` into `out`.
///
/// The header entry is always kept. Untranslated messages are dropped, and so
/// are fuzzy ones unless `use_fuzzy` is set. Later duplicates of the same key
/// replace earlier ones.
pub fn write_mo<W: Write>(catalog: &Catalog, use_fuzzy: bool, out: &mut W) -> Result<(), CatalogError> {
    let entries: BTreeMap<Vec<u8>, Vec<u8>> = catalog
        .messages
        .iter()
        .filter(|m| m.is_header() || (m.is_translated() && (use_fuzzy || !m.fuzzy)))
        .map(|m| (key(m).into_bytes(), value(m).into_bytes()))
        .collect();

    let count = entries.len();
    let ids_start = HEADER_LEN + count * 16;
    let ids_len: usize = entries.keys().map(|k| k.len() + 1).sum();
    let strs_start = ids_start + ids_len;

    let mut buf = Vec::with_capacity(strs_start + entries.values().map(|v| v.len() + 1).sum::<usize>());
    for word in [
        MAGIC,
        0,
        u32_of(count)?,
        u32_of(HEADER_LEN)?,
        u32_of(HEADER_LEN + count * 8)?,
        0,
        u32_of(ids_start)?,
    ] {
        buf.extend_from_slice(&word.to_le_bytes());
    }

    let mut offset = ids_start;
    for k in entries.keys() {
        buf.extend_from_slice(&u32_of(k.len())?.to_le_bytes());
        buf.extend_from_slice(&u32_of(offset)?.to_le_bytes());
        offset += k.len() + 1;
    }
    let mut offset = strs_start;
    for v in entries.values() {
        buf.extend_from_slice(&u32_of(v.len())?.to_le_bytes());
        buf.extend_from_slice(&u32_of(offset)?.to_le_bytes());
        offset += v.len() + 1;
    }
    u32_of(offset)?;

    for k in entries.keys() {
        buf.extend_from_slice(k);
        buf.push(0);
    }
    for v in entries.values() {
        buf.extend_from_slice(v);
        buf.push(0);
    }

    out.write_all(&buf)?;
    Ok(())
}

fn u32_of(n: usize) -> Result<u32, CatalogError> {
    u32::try_from(n).map_err(|_| CatalogError::TooLarge)
}

fn key(m: &Message) -> String {
    let mut key = String::new();
    if let Some(ctx) = &m.context {
        key.push_str(ctx);
        key.push(CONTEXT_SEPARATOR);
    }
    key.push_str(&m.id);
    if let Some(plural) = &m.id_plural {
        key.push('\0');
        key.push_str(plural);
    }
    key
}

fn value(m: &Message) -> String {
    let Some(plural) = &m.id_plural else {
        return m.strings.first().cloned().unwrap_or_default();
    };
    // Missing plural forms fall back to the source strings.
    m.strings
        .iter()
        .enumerate()
        .map(|(n, s)| match (s.is_empty(), n) {
            (false, _) => s.as_str(),
            (true, 0) => m.id.as_str(),
            (true, _) => plural.as_str(),
        })
        .collect::<Vec<_>>()
        .join("\0")
}
