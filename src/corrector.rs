//! The correction cycle: parse, scan, resolve, rewrite, serialize.

use crate::config::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::docx::{DocxPackage, check_upload};
use crate::dom::{parse, serialize};
use crate::error::Result;
use crate::resolve::{Resolver, resolve_all};
use crate::spelling::{RewriteSummary, rewrite, scan_document};

/// Runs correction cycles against one [`Resolver`].
///
/// Each call owns its own tree; a `Corrector` can serve many documents
/// concurrently.
#[derive(Debug, Clone)]
pub struct Corrector<R> {
    resolver: R,
    max_document_bytes: u64,
}

/// One word that went through the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCorrection {
    pub word: String,
    /// Empty when the resolver had no suggestion and the word was kept.
    pub replacement: String,
}

/// Result of correcting a markup document.
#[derive(Debug, Clone)]
pub struct Correction {
    /// Corrected markup.
    pub markup: String,
    /// Every flagged word, in scan order.
    pub corrections: Vec<AppliedCorrection>,
    pub summary: RewriteSummary,
}

/// Result of correcting a `.docx` bundle.
#[derive(Debug, Clone)]
pub struct CorrectedPackage {
    /// The repacked bundle.
    pub bytes: Vec<u8>,
    pub corrections: Vec<AppliedCorrection>,
    pub summary: RewriteSummary,
}

impl<R: Resolver> Corrector<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Reject packages larger than `limit` bytes.
    pub fn with_max_document_bytes(mut self, limit: u64) -> Self {
        self.max_document_bytes = limit;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Correct `word/document.xml` markup.
    ///
    /// The tree is left alone until every lookup has answered; a single
    /// failed lookup fails the cycle with nothing applied.
    pub async fn correct_markup(&self, markup: &str) -> Result<Correction> {
        let mut dom = parse(markup)?;
        let pairs = scan_document(&dom)?;
        tracing::info!(flagged = pairs.len(), "found flagged words");

        let records = resolve_all(&self.resolver, pairs).await?;
        let summary = rewrite(&mut dom, &records)?;

        let corrections = records
            .into_iter()
            .map(|record| AppliedCorrection {
                word: record.pair.word,
                replacement: record.replacement,
            })
            .collect();

        Ok(Correction {
            markup: serialize(&dom),
            corrections,
            summary,
        })
    }

    /// Correct a `.docx` bundle and return the repacked bytes.
    ///
    /// The bundle is extracted into a temporary working directory that is
    /// removed before this returns, on success and failure alike.
    pub async fn correct_package(&self, bytes: &[u8]) -> Result<CorrectedPackage> {
        check_upload(bytes, self.max_document_bytes)?;

        let mut package = DocxPackage::unpack(bytes)?;
        let markup = package.read_document()?;
        let correction = self.correct_markup(&markup).await?;

        package.write_document(&correction.markup)?;
        let bytes = package.pack()?;
        package.close()?;

        Ok(CorrectedPackage {
            bytes,
            corrections: correction.corrections,
            summary: correction.summary,
        })
    }
}

/// Flagged words of a markup document, in scan order, without resolving them.
pub fn flagged_words(markup: &str) -> Result<Vec<String>> {
    let dom = parse(markup)?;
    Ok(scan_document(&dom)?.into_iter().map(|p| p.word).collect())
}

/// Flagged words of a `.docx` bundle.
pub fn flagged_words_in_package(bytes: &[u8], limit: u64) -> Result<Vec<String>> {
    check_upload(bytes, limit)?;
    let mut package = DocxPackage::unpack(bytes)?;
    flagged_words(&package.read_document()?)
}
