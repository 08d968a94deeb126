use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plist::Value;
use tracing::debug;

pub const OBJECTS_KEY: &str = "$objects";
pub const VERSION_KEY: &str = "$version";

/// Decode a keyed archive and return the string entries of `$objects` in archive order.
///
/// Entries that are not strings (class references, `$null`, numbers, nested
/// dictionaries) are skipped. Only an unreadable property list or a missing or
/// non-array `$objects` is an error.
pub fn decode_archive_strings(bytes: &[u8]) -> Result<Vec<String>> {
    let root = Value::from_reader(Cursor::new(bytes)).context("failed to parse property list")?;
    let dict = root
        .as_dictionary()
        .ok_or_else(|| anyhow!("keyed archive root must be a dictionary"))?;

    match dict.get(VERSION_KEY).and_then(Value::as_unsigned_integer) {
        Some(version) => debug!(version, "decoding keyed archive"),
        None => debug!("keyed archive has no integer {VERSION_KEY}"),
    }

    let objects = dict
        .get(OBJECTS_KEY)
        .ok_or_else(|| anyhow!("keyed archive is missing {OBJECTS_KEY}"))?
        .as_array()
        .ok_or_else(|| anyhow!("keyed archive {OBJECTS_KEY} must be an array"))?;

    let tokens = objects
        .iter()
        .filter_map(Value::as_string)
        .map(str::to_string)
        .collect::<Vec<_>>();
    debug!(
        objects = objects.len(),
        tokens = tokens.len(),
        "decoded archive strings"
    );
    Ok(tokens)
}

pub fn read_archive_strings(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_archive_strings(&bytes).with_context(|| format!("failed to decode {}", path.display()))
}

#[cfg(test)]
pub(crate) fn encode_archive(objects: Vec<Value>) -> Vec<u8> {
    let mut top = plist::Dictionary::new();
    top.insert("root".to_string(), Value::Uid(plist::Uid::new(1)));

    let mut root = plist::Dictionary::new();
    root.insert(
        "$archiver".to_string(),
        Value::String("NSKeyedArchiver".to_string()),
    );
    root.insert(
        VERSION_KEY.to_string(),
        Value::Integer(plist::Integer::from(100_000_i64)),
    );
    root.insert(OBJECTS_KEY.to_string(), Value::Array(objects));
    root.insert("$top".to_string(), Value::Dictionary(top));

    let mut out = Vec::new();
    Value::Dictionary(root)
        .to_writer_binary(&mut out)
        .expect("encode binary plist");
    out
}
