//! Arena-based element tree for document markup.
//!
//! All nodes live in one vector owned by [`Dom`]. Children are stored as an
//! ordered list of ids on the parent, and every node keeps a non-owning
//! parent id, so index-in-parent lookups never need shared ownership.

use std::collections::VecDeque;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document root. Holds the declaration, prolog nodes and the root element.
    Document,
    /// Element with its qualified name (`w:p`) and attributes in source order.
    Element { name: String, attrs: Vec<Attribute> },
    /// Character data with entity references already resolved.
    Text(String),
    /// `<![CDATA[...]]>` content.
    CData(String),
    /// Comment body.
    Comment(String),
    /// Raw content of the `<?xml ...?>` declaration, without the delimiters.
    Declaration(String),
    /// Raw content of a processing instruction, without the delimiters.
    ProcessingInstruction(String),
    /// Raw content of a `<!DOCTYPE ...>` declaration.
    Doctype(String),
}

/// Element attribute with its value unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-based document tree.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Dom {
    /// Create an empty tree holding only the document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId(0),
        };
        dom.document = dom.alloc(NodeData::Document);
        dom
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Document root id.
    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Allocate a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        self.alloc(data)
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, name: impl Into<String>, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeData::Element {
            name: name.into(),
            attrs,
        })
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Append text to the last child if it is a text node, or add a new one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let last = self.children(parent).last().copied();
        if let Some(last) = last
            && let Some(Node {
                data: NodeData::Text(existing),
                ..
            }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text);
        self.append(parent, node);
    }

    /// Ordered children of a node (empty for unknown ids and leaves).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of a node, `None` for the document root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Position of `id` among its parent's current children.
    ///
    /// Linear in the number of siblings. Returns `None` if the node is not
    /// (or no longer) listed by its recorded parent.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Replace the whole child list of `parent` in one step.
    ///
    /// Nodes dropped from the list become detached; nodes in the new list are
    /// re-parented to `parent`.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let old = match self.get_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for id in old {
            if let Some(node) = self.get_mut(id) {
                node.parent = None;
            }
        }
        for &id in &children {
            if let Some(node) = self.get_mut(id) {
                node.parent = Some(parent);
            }
        }
        if let Some(node) = self.get_mut(parent) {
            node.children = children;
        }
    }

    /// Number of allocated nodes, detached ones and the document root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing is attached to the document root.
    pub fn is_empty(&self) -> bool {
        self.children(self.document).is_empty()
    }

    /// Pre-order depth-first iterator over the subtree below `root`
    /// (`root` itself excluded).
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { dom: self, stack }
    }

    /// Level-order iterator over the subtree below `root` (`root` excluded).
    pub fn breadth_first(&self, root: NodeId) -> BreadthFirst<'_> {
        BreadthFirst {
            dom: self,
            queue: self.children(root).iter().copied().collect(),
        }
    }

    /// First element in document order with the given qualified name.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.document)
            .find(|&id| self.element_name(id) == Some(tag))
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator, see [`Dom::descendants`].
pub struct Descendants<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.dom.children(id).iter().rev());
        Some(id)
    }
}

/// Breadth-first iterator, see [`Dom::breadth_first`].
pub struct BreadthFirst<'a> {
    dom: &'a Dom,
    queue: VecDeque<NodeId>,
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.dom.children(id));
        Some(id)
    }
}

/// Convenience accessors.
impl Dom {
    /// Qualified element name, `None` for non-element nodes.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// True for text and CDATA nodes.
    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Text(_) | NodeData::CData(_)))
    }

    /// Content of a text or CDATA node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) | NodeData::CData(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Overwrite the content of a text or CDATA node. Returns false for
    /// any other node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(s)) | Some(NodeData::CData(s)) => {
                s.clear();
                s.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Element children only, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    pub fn first_child_element(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    /// First text-bearing node reached by a depth-first descent below `id`.
    pub fn first_text_descendant(&self, id: NodeId) -> Option<NodeId> {
        self.descendants(id).find(|&d| self.is_text(d))
    }
}
