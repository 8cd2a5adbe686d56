//! Spelling-marker handling.
//!
//! Word processors wrap a misspelled word in a pair of self-closing proofing
//! markers:
//!
//! ```xml
//! <w:p>
//!   <w:proofErr w:type="spellStart"/>
//!   <w:r><w:t>recieve</w:t></w:r>
//!   <w:proofErr w:type="spellEnd"/>
//! </w:p>
//! ```
//!
//! [`scan`] finds those pairs and the word between them, [`rewrite`] writes the
//! corrections back into the tree and strips the markers.

mod rewriter;
mod scanner;

pub use rewriter::{RewriteSummary, rewrite};
pub use scanner::{scan, scan_document};

use crate::dom::NodeId;

/// Tag of the proofing marker elements.
pub const MARKER_TAG: &str = "w:proofErr";

/// A start/end marker pair and the run it encloses, as found by [`scan`].
///
/// Ids point into the tree that was scanned; a pair is only meaningful for
/// that tree and for one correction cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    /// The start marker.
    pub start: NodeId,
    /// Parent of the start marker at scan time. The end marker is expected
    /// to share it.
    pub parent: NodeId,
    /// The node carrying the flagged word, if the traversal had one left.
    pub enclosed: Option<NodeId>,
    /// The text node the word was read from.
    pub text_node: Option<NodeId>,
    /// The end marker, if the traversal had one left.
    pub end: Option<NodeId>,
    /// Flagged word; empty when the enclosed node holds no text.
    pub word: String,
}

/// A marker pair together with the replacement chosen for its word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRecord {
    pub pair: MarkerPair,
    /// Replacement text; empty means "leave the word as it is".
    pub replacement: String,
}

impl CorrectionRecord {
    pub fn new(pair: MarkerPair, replacement: impl Into<String>) -> Self {
        Self {
            pair,
            replacement: replacement.into(),
        }
    }
}
