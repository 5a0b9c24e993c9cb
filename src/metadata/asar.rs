//! Minimal reader for Electron `app.asar` archives.
//!
//! Layout: a pickle holding the header size, a pickle holding the JSON file
//! index, then the concatenated file contents. Offsets in the index are
//! relative to the end of the header.
//!
//! ```text
//! u32 LE  4              size of the first pickle payload
//! u32 LE  header_size    size of the header pickle
//! u32 LE  payload_size   header pickle payload size
//! u32 LE  json_len       length of the JSON index
//! [u8]    json           file index, padded to 4 bytes
//! [u8]    contents       starts at 8 + header_size
//! ```

use crate::bundler::error::{Error, ErrorExt, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

/// One node of the archive index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Directory {
        files: BTreeMap<String, Entry>,
    },
    Link {
        #[allow(dead_code)]
        link: String,
    },
    File {
        size: u64,
        #[serde(default)]
        offset: Option<String>,
        #[serde(default)]
        unpacked: bool,
    },
}

/// Reads one file out of an asar archive.
///
/// `inner` is a `/`-separated path relative to the archive root. Files marked
/// `unpacked` are read from the sibling `<archive>.unpacked/` directory.
pub async fn extract_file(archive: &Path, inner: &str) -> Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(archive)
        .await
        .fs_context("opening archive", archive)?;
    let archive_len = file
        .metadata()
        .await
        .fs_context("reading metadata of", archive)?
        .len();

    let mut prefix = [0u8; 8];
    file.read_exact(&mut prefix)
        .await
        .fs_context("reading archive header from", archive)?;
    let header_size = u32_le(&prefix[4..8]) as u64;
    // Sizes come from the file itself; never allocate past its end
    if 8 + header_size > archive_len {
        return Err(truncated(archive, "index"));
    }

    let mut header = vec![0u8; header_size as usize];
    file.read_exact(&mut header)
        .await
        .fs_context("reading archive index from", archive)?;
    let index = parse_index(&header)?;

    let (size, offset, unpacked) = lookup(&index, inner).ok_or_else(|| {
        Error::GenericError(format!("{} not found in {}", inner, archive.display()))
    })?;

    if unpacked {
        let mut unpacked_root = archive.as_os_str().to_owned();
        unpacked_root.push(".unpacked");
        let path = inner
            .split('/')
            .fold(PathBuf::from(unpacked_root), |p, part| p.join(part));
        return tokio::fs::read(&path)
            .await
            .fs_context("reading unpacked archive entry", path);
    }

    let start = 8 + header_size;
    let in_bounds = start
        .checked_add(offset)
        .and_then(|begin| begin.checked_add(size))
        .is_some_and(|end| end <= archive_len);
    if !in_bounds {
        return Err(truncated(archive, "entry"));
    }

    file.seek(SeekFrom::Start(start + offset))
        .await
        .fs_context("seeking in archive", archive)?;
    let mut contents = vec![0u8; size as usize];
    file.read_exact(&mut contents)
        .await
        .fs_context("reading archive entry from", archive)?;
    Ok(contents)
}

fn truncated(archive: &Path, what: &str) -> Error {
    Error::GenericError(format!(
        "archive {} in {} extends past the end of the file",
        what,
        archive.display()
    ))
}

fn u32_le(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}

/// Decodes the header pickle into the root directory entry.
fn parse_index(header: &[u8]) -> Result<Entry> {
    if header.len() < 8 {
        return Err(Error::GenericError("archive header is truncated".into()));
    }
    let json_len = u32_le(&header[4..8]) as usize;
    let json = header
        .get(8..8 + json_len)
        .ok_or_else(|| Error::GenericError("archive index is truncated".into()))?;
    Ok(serde_json::from_slice(json)?)
}

/// Walks the index to `inner`, returning `(size, offset, unpacked)`.
fn lookup(root: &Entry, inner: &str) -> Option<(u64, u64, bool)> {
    let mut node = root;
    for part in inner.split('/').filter(|p| !p.is_empty()) {
        match node {
            Entry::Directory { files } => node = files.get(part)?,
            _ => return None,
        }
    }
    match node {
        Entry::File {
            size,
            offset,
            unpacked,
        } => {
            let offset = match offset {
                Some(o) => o.parse().ok()?,
                None if *unpacked => 0,
                None => return None,
            };
            Some((*size, offset, *unpacked))
        }
        _ => None,
    }
}
