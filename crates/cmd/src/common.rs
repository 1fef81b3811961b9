use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use keytree::ObjectKey;
use relocate::IndexedObject;

/// Parse a key listing: one object key per line, optionally followed by a
/// tab and the key's index record id. Blank lines and `#` comments are
/// ignored.
pub fn parse_listing(input: &str) -> Vec<IndexedObject> {
    input
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut parts = line.splitn(2, '\t');
            let key = parts.next()?.trim();
            let record = parts
                .next()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty());
            Some(IndexedObject::new(key, record))
        })
        .collect()
}

/// Load a listing from a file, or from stdin when no file is given.
pub fn read_listing(file: Option<&Path>) -> Result<Vec<IndexedObject>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading listing {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading listing from stdin")?;
            buffer
        }
    };
    Ok(parse_listing(&text))
}

pub fn keys_of(objects: &[IndexedObject]) -> Vec<ObjectKey> {
    objects.iter().map(|o| o.key.clone()).collect()
}
