//! # docfix
//!
//! Apply spelling corrections to `.docx` documents using the proofing markers
//! the word processor already left in the markup.
//!
//! Word marks every misspelled word with a pair of `<w:proofErr/>` elements.
//! docfix finds those pairs, asks a [`Resolver`] for a replacement for each
//! word (all lookups run concurrently), rewrites the words in place, strips
//! the markers and writes the document back out.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfix::{Config, Corrector, LanguageToolResolver};
//!
//! # async fn run() -> docfix::Result<()> {
//! let config = Config::default();
//! let corrector = Corrector::new(LanguageToolResolver::new(&config.resolver)?);
//!
//! let input = std::fs::read("letter.docx")?;
//! let corrected = corrector.correct_package(&input).await?;
//! std::fs::write("letter.fixed.docx", corrected.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with markup directly
//!
//! ```
//! use docfix::dom::{parse, serialize};
//! use docfix::spelling::{CorrectionRecord, rewrite, scan_document};
//!
//! let markup = concat!(
//!     "<w:document><w:body><w:p>",
//!     "<w:proofErr w:type=\"spellStart\"/><w:r><w:t>recieve</w:t></w:r><w:proofErr w:type=\"spellEnd\"/>",
//!     "</w:p></w:body></w:document>",
//! );
//!
//! let mut dom = parse(markup)?;
//! let records: Vec<_> = scan_document(&dom)?
//!     .into_iter()
//!     .map(|pair| CorrectionRecord::new(pair, "receive"))
//!     .collect();
//! rewrite(&mut dom, &records)?;
//!
//! assert_eq!(
//!     serialize(&dom),
//!     "<w:document><w:body><w:p><w:r><w:t>receive</w:t></w:r></w:p></w:body></w:document>"
//! );
//! # Ok::<(), docfix::Error>(())
//! ```

pub mod config;
pub mod corrector;
pub mod docx;
pub mod dom;
pub mod error;
pub mod resolve;
pub mod spelling;
pub(crate) mod util;

pub use config::Config;
pub use corrector::{
    AppliedCorrection, CorrectedPackage, Correction, Corrector, flagged_words,
    flagged_words_in_package,
};
pub use docx::{DocxPackage, output_file_name};
pub use error::{Error, Result};
pub use resolve::{DictionaryResolver, LanguageToolResolver, Resolver, resolve_all};
pub use spelling::{CorrectionRecord, MarkerPair};
