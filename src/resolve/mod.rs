//! Correction lookups.
//!
//! A [`Resolver`] maps one flagged word to its best replacement. The
//! [`resolve_all`] driver issues one lookup per marker pair, all at once, and
//! waits for every one of them before handing the records to the rewriter.

mod dictionary;
mod languagetool;

pub use dictionary::DictionaryResolver;
pub use languagetool::LanguageToolResolver;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::{Error, Result};
use crate::spelling::{CorrectionRecord, MarkerPair};

/// Source of spelling corrections.
///
/// Implementations return the single best replacement for `word`, or an
/// empty string when there is nothing to suggest (including for an empty
/// word). Any failure is reported as an error, never as an empty string.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, word: &str) -> Result<String>;
}

#[async_trait]
impl<T: Resolver + ?Sized> Resolver for Box<T> {
    async fn resolve(&self, word: &str) -> Result<String> {
        (**self).resolve(word).await
    }
}

#[async_trait]
impl<T: Resolver + ?Sized> Resolver for std::sync::Arc<T> {
    async fn resolve(&self, word: &str) -> Result<String> {
        (**self).resolve(word).await
    }
}

/// Resolve every pair concurrently.
///
/// Records come back in the order of `pairs`. The first failed lookup fails
/// the whole batch; lookups still in flight are dropped and nothing is
/// returned for the pairs that did succeed.
pub async fn resolve_all<R>(resolver: &R, pairs: Vec<MarkerPair>) -> Result<Vec<CorrectionRecord>>
where
    R: Resolver + ?Sized,
{
    let lookups = pairs.into_iter().map(move |pair| async move {
        let replacement = resolver.resolve(&pair.word).await.inspect_err(|e| {
            tracing::warn!(word = %pair.word, error = %e, "correction lookup failed");
        })?;
        tracing::debug!(word = %pair.word, %replacement, "resolved");
        Ok::<_, Error>(CorrectionRecord::new(pair, replacement))
    });

    try_join_all(lookups).await
}
