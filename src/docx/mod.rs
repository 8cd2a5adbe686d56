//! `.docx` bundle handling around the markup engine.

mod package;

pub use package::{DOCUMENT_PATH, DocxPackage};

use std::path::Path;

use uuid::Uuid;

use crate::error::{Error, Result};

/// Reject payloads that are empty or larger than `limit` bytes.
pub fn check_upload(bytes: &[u8], limit: u64) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::MissingDocument);
    }
    let size = bytes.len() as u64;
    if size > limit {
        return Err(Error::DocumentTooLarge { size, limit });
    }
    Ok(())
}

/// Unique name for a corrected document: `<uuid>.<original file name>`.
///
/// Only the final path component of `original` is kept.
pub fn output_file_name(original: &Path) -> String {
    let name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.docx".to_string());
    format!("{}.{}", Uuid::new_v4(), name)
}
