//! Marker scanner.

use std::collections::VecDeque;

use super::{MARKER_TAG, MarkerPair};
use crate::dom::{Dom, NodeId};
use crate::error::Result;

/// Scan a parsed document, starting from its validated body.
pub fn scan_document(dom: &Dom) -> Result<Vec<MarkerPair>> {
    let body = dom.body()?;
    Ok(scan(dom, body))
}

/// Find marker pairs below `body`.
///
/// The traversal is breadth-first over a queue seeded with the body's
/// children. A node with children has them queued; a childless marker element
/// is taken as a start marker, and the next two queued items are taken as the
/// enclosed run and the end marker. The markers are assumed to be well
/// formed: never nested, always closed, and enclosing exactly one run. Input
/// that breaks these assumptions yields wrong pairs here, and the rewriter
/// rejects them later.
///
/// Markers at different depths from the run they enclose (for example inside
/// a `w:del` wrapper) are not guaranteed to pair correctly.
pub fn scan(dom: &Dom, body: NodeId) -> Vec<MarkerPair> {
    let mut queue: VecDeque<NodeId> = dom.children(body).iter().copied().collect();
    let mut pairs = Vec::new();

    while let Some(id) = queue.pop_front() {
        let children = dom.children(id);
        if !children.is_empty() {
            queue.extend(children);
            continue;
        }
        if dom.element_name(id) != Some(MARKER_TAG) {
            continue;
        }

        let enclosed = queue.pop_front();
        let text_node = enclosed.and_then(|e| {
            if dom.is_text(e) {
                Some(e)
            } else {
                dom.first_text_descendant(e)
            }
        });
        let word = text_node
            .and_then(|t| dom.text_content(t))
            .unwrap_or_default()
            .to_string();
        let end = queue.pop_front();

        pairs.push(MarkerPair {
            start: id,
            parent: dom.parent(id).unwrap_or(body),
            enclosed,
            text_node,
            end,
            word,
        });
    }

    tracing::debug!(pairs = pairs.len(), "scanned spelling markers");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn doc(body: &str) -> String {
        format!(
            "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{body}</w:body></w:document>"
        )
    }

    const MISSPELLED: &str = r#"<w:p><w:r><w:t xml:space="preserve">I </w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:rPr><w:lang w:val="en-US"/></w:rPr><w:t>recieve</w:t></w:r><w:proofErr w:type="spellEnd"/><w:r><w:t xml:space="preserve"> mail</w:t></w:r></w:p>"#;

    #[test]
    fn test_scan_single_pair() {
        let dom = parse(&doc(MISSPELLED)).unwrap();
        let pairs = scan_document(&dom).unwrap();

        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.word, "recieve");
        assert_eq!(dom.attr(pair.start, "w:type"), Some("spellStart"));
        assert_eq!(pair.end.and_then(|e| dom.attr(e, "w:type")), Some("spellEnd"));
        assert_eq!(pair.enclosed.and_then(|e| dom.element_name(e)), Some("w:r"));
        assert_eq!(dom.parent(pair.start), Some(pair.parent));
        assert_eq!(pair.end.and_then(|e| dom.parent(e)), Some(pair.parent));
    }

    #[test]
    fn test_scan_without_markers() {
        let dom = parse(&doc("<w:p><w:r><w:t>fine</w:t></w:r></w:p><w:sectPr/>")).unwrap();
        assert!(scan_document(&dom).unwrap().is_empty());

        let empty = parse(&doc("")).unwrap();
        assert!(scan_document(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_scan_pairs_across_paragraphs_in_order() {
        let body = [
            "<w:p><w:proofErr w:type=\"spellStart\"/><w:r><w:t>teh</w:t></w:r><w:proofErr w:type=\"spellEnd\"/></w:p>",
            "<w:p><w:r><w:t>ok</w:t></w:r><w:proofErr w:type=\"spellStart\"/><w:r><w:t>wrod</w:t></w:r><w:proofErr w:type=\"spellEnd\"/></w:p>",
            "<w:sectPr><w:pgSz w:w=\"12240\"/></w:sectPr>",
        ]
        .concat();
        let dom = parse(&doc(&body)).unwrap();
        let pairs = scan_document(&dom).unwrap();

        let words: Vec<_> = pairs.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(words, vec!["teh", "wrod"]);
        assert_ne!(pairs[0].parent, pairs[1].parent);
    }

    #[test]
    fn test_scan_run_without_text() {
        let body = "<w:p><w:proofErr w:type=\"spellStart\"/><w:r><w:tab/></w:r><w:proofErr w:type=\"spellEnd\"/></w:p>";
        let dom = parse(&doc(body)).unwrap();
        let pairs = scan_document(&dom).unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].word, "");
        assert_eq!(pairs[0].text_node, None);
    }

    #[test]
    fn test_scan_unterminated_marker_records_missing_end() {
        let body = "<w:p><w:proofErr w:type=\"spellStart\"/><w:r><w:t>alone</w:t></w:r></w:p>";
        let dom = parse(&doc(body)).unwrap();
        let pairs = scan_document(&dom).unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].word, "alone");
        assert_eq!(pairs[0].end, None);
    }

    #[test]
    fn test_scan_rejects_wrong_shape() {
        let dom = parse("<w:body><w:p/></w:body>").unwrap();
        assert!(scan_document(&dom).is_err());
    }
}
