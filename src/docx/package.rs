//! Unpacking and repacking of the zip bundle.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};
use crate::util::decode_markup;

/// Location of the main document part inside the bundle.
pub const DOCUMENT_PATH: &str = "word/document.xml";

/// A `.docx` bundle extracted into a private working directory.
///
/// The directory is removed when the package is dropped, whether or not the
/// correction cycle succeeded. [`DocxPackage::close`] removes it eagerly and
/// reports failures.
#[derive(Debug)]
pub struct DocxPackage {
    workdir: TempDir,
    entries: Vec<Entry>,
    /// Encoding the document markup was read in, and is written back in.
    encoding: &'static Encoding,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    compression: CompressionMethod,
}

impl DocxPackage {
    /// Extract a bundle into a fresh working directory.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        let workdir = tempfile::Builder::new()
            .prefix("docfix-")
            .tempdir()
            .map_err(packaging_error)?;
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let relative = file.enclosed_name().ok_or_else(|| {
                Error::Packaging(format!("entry {:?} escapes the package root", file.name()))
            })?;
            let target = workdir.path().join(relative);

            if file.is_dir() {
                fs::create_dir_all(&target).map_err(packaging_error)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(packaging_error)?;
            }
            let mut out = File::create(&target).map_err(packaging_error)?;
            io::copy(&mut file, &mut out).map_err(packaging_error)?;

            entries.push(Entry {
                name: file.name().to_string(),
                compression: file.compression(),
            });
        }

        if !entries.iter().any(|e| e.name == DOCUMENT_PATH) {
            return Err(Error::Packaging(format!("bundle has no {DOCUMENT_PATH}")));
        }

        tracing::debug!(
            entries = entries.len(),
            workdir = %workdir.path().display(),
            "unpacked package"
        );
        Ok(Self {
            workdir,
            entries,
            encoding: UTF_8,
        })
    }

    /// Working directory holding the extracted entries.
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Entry names in archive order, directories excluded.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn document_path(&self) -> PathBuf {
        self.workdir.path().join(DOCUMENT_PATH)
    }

    /// Read and decode the main document markup.
    pub fn read_document(&mut self) -> Result<String> {
        let bytes = fs::read(self.document_path()).map_err(packaging_error)?;
        let (markup, encoding) = decode_markup(&bytes);
        self.encoding = encoding;
        Ok(markup.into_owned())
    }

    /// Encoding [`write_document`](Self::write_document) will use: the one the
    /// document declared when it was last read, UTF-8 otherwise.
    pub fn document_encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Replace the main document markup, encoded to match its declaration.
    ///
    /// Characters the encoding cannot represent are written as numeric
    /// character references.
    pub fn write_document(&self, markup: &str) -> Result<()> {
        let (bytes, _, _) = self.encoding.encode(markup);
        fs::write(self.document_path(), bytes).map_err(packaging_error)
    }

    /// Zip the working directory back up, entries in their original order.
    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);
            let data = fs::read(self.workdir.path().join(&entry.name)).map_err(packaging_error)?;

            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&data).map_err(packaging_error)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Remove the working directory now.
    pub fn close(self) -> Result<()> {
        self.workdir.close().map_err(packaging_error)
    }
}

fn packaging_error(e: impl Display) -> Error {
    Error::Packaging(e.to_string())
}
