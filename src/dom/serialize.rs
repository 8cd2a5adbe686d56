//! Serializer turning a [`Dom`] back into markup text.

use super::arena::{Dom, NodeData, NodeId};

/// Serialize the whole document.
///
/// Output is compact: no indentation is added, childless elements are
/// written self-closing, and text and attribute values are re-escaped.
pub fn serialize(dom: &Dom) -> String {
    let mut out = String::new();
    for &child in dom.children(dom.document()) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Serialize a single subtree.
pub fn serialize_node(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for &child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeData::Element { name, attrs } => {
            out.push('<');
            out.push_str(name);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                push_escaped(out, &attr.value, true);
                out.push('"');
            }

            let children = dom.children(id);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in children {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(text) => push_escaped(out, text, false),
        NodeData::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Declaration(raw) | NodeData::ProcessingInstruction(raw) => {
            out.push_str("<?");
            out.push_str(raw);
            out.push_str("?>");
        }
        NodeData::Doctype(raw) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(raw);
            out.push('>');
        }
    }
}

fn push_escaped(out: &mut String, s: &str, in_attribute: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\n' if in_attribute => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' if in_attribute => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
}
