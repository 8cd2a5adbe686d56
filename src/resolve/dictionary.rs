//! In-memory resolver.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::Resolver;
use crate::error::{Error, Result};

/// Resolver backed by a fixed word list. Unknown words get no suggestion.
#[derive(Debug, Clone, Default)]
pub struct DictionaryResolver {
    entries: HashMap<String, String>,
}

impl DictionaryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry.
    pub fn with_entry(mut self, word: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.entries.insert(word.into(), replacement.into());
        self
    }

    /// Parse `word<TAB>replacement` lines. Blank lines and lines starting
    /// with `#` are skipped.
    pub fn from_tsv(contents: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, replacement) = line.split_once('\t').ok_or_else(|| {
                Error::Config(format!("dictionary line {}: expected word<TAB>replacement", lineno + 1))
            })?;
            entries.insert(word.to_string(), replacement.to_string());
        }
        Ok(Self { entries })
    }

    /// Load a TSV dictionary file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let dictionary = Self::from_tsv(&contents)?;
        tracing::info!(entries = dictionary.len(), "loaded dictionary from {}", path.display());
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Resolver for DictionaryResolver {
    async fn resolve(&self, word: &str) -> Result<String> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}
