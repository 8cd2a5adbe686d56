//! Tree rewriter applying corrections and removing markers.

use std::collections::{BTreeSet, HashMap};

use super::CorrectionRecord;
use crate::dom::{Dom, NodeId};
use crate::error::{Error, Result};

/// What a [`rewrite`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Text nodes overwritten with a non-empty replacement.
    pub words_replaced: usize,
    /// Marker elements removed from the tree.
    pub markers_removed: usize,
}

/// Apply corrections to the tree.
///
/// Every marker position is resolved against its parent's current children
/// before anything is touched, so a [`Error::CorruptedDocument`] leaves the
/// tree exactly as it was. Markers sharing a parent are removed in a single
/// rebuild of that parent's child list; retained siblings keep their order.
pub fn rewrite(dom: &mut Dom, records: &[CorrectionRecord]) -> Result<RewriteSummary> {
    let deletions = plan_deletions(dom, records)?;

    let mut summary = RewriteSummary::default();

    for record in records {
        if record.replacement.is_empty() {
            continue;
        }
        if let Some(text_node) = record.pair.text_node
            && dom.set_text(text_node, &record.replacement)
        {
            summary.words_replaced += 1;
        }
    }

    for (parent, positions) in deletions {
        let kept: Vec<NodeId> = dom
            .children(parent)
            .iter()
            .enumerate()
            .filter(|(i, _)| !positions.contains(i))
            .map(|(_, &id)| id)
            .collect();
        dom.set_children(parent, kept);
        summary.markers_removed += positions.len();
    }

    tracing::debug!(
        words_replaced = summary.words_replaced,
        markers_removed = summary.markers_removed,
        "rewrote document"
    );
    Ok(summary)
}

/// Child positions to drop, grouped by parent.
fn plan_deletions(
    dom: &Dom,
    records: &[CorrectionRecord],
) -> Result<HashMap<NodeId, BTreeSet<usize>>> {
    let mut deletions: HashMap<NodeId, BTreeSet<usize>> = HashMap::new();

    for record in records {
        let pair = &record.pair;
        let end = pair.end.ok_or_else(|| {
            Error::CorruptedDocument(format!(
                "marker {:?} for {:?} has no matching end marker",
                pair.start, pair.word
            ))
        })?;

        let start_index = position_in(dom, pair.parent, pair.start)?;
        let end_index = position_in(dom, pair.parent, end)?;

        deletions
            .entry(pair.parent)
            .or_default()
            .extend([start_index, end_index]);
    }

    Ok(deletions)
}

fn position_in(dom: &Dom, parent: NodeId, marker: NodeId) -> Result<usize> {
    dom.children(parent)
        .iter()
        .position(|&c| c == marker)
        .ok_or_else(|| {
            Error::CorruptedDocument(format!(
                "marker {marker:?} not found among the children of {parent:?}"
            ))
        })
}
