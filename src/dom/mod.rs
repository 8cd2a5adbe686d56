//! In-memory element tree for WordprocessingML markup.
//!
//! [`parse`] builds a [`Dom`] from markup text and [`serialize`] writes it back.
//! The tree owns every node; callers hold [`NodeId`]s, never references, so a
//! mutation made through one id is visible to everything else holding the tree.

mod arena;
mod parse;
mod serialize;

pub use arena::{Attribute, BreadthFirst, Descendants, Dom, Node, NodeData, NodeId};
pub use parse::parse;
pub use serialize::{serialize, serialize_node};

use crate::error::{Error, Result};

/// Root element of `word/document.xml`.
pub const DOCUMENT_TAG: &str = "w:document";

/// Body container, expected as the first element inside [`DOCUMENT_TAG`].
pub const BODY_TAG: &str = "w:body";

impl Dom {
    /// Locate the body container.
    ///
    /// This is the only structural check made on a document: the first
    /// element of the tree must be `w:document` and its first element child
    /// must be `w:body`. An empty body is fine.
    pub fn body(&self) -> Result<NodeId> {
        let root = self
            .first_child_element(self.document())
            .filter(|&id| self.element_name(id) == Some(DOCUMENT_TAG))
            .ok_or_else(|| {
                Error::MalformedDocument(format!("root element is not <{DOCUMENT_TAG}>"))
            })?;

        self.first_child_element(root)
            .filter(|&id| self.element_name(id) == Some(BODY_TAG))
            .ok_or_else(|| {
                Error::MalformedDocument(format!(
                    "<{DOCUMENT_TAG}> does not start with <{BODY_TAG}>"
                ))
            })
    }
}
