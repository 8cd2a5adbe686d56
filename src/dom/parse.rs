//! Markup parser building a [`Dom`] from quick-xml events.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, Dom, NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse markup text into a tree.
///
/// Document order is preserved. Whitespace-only text is dropped when it sits
/// between element siblings; all other text, including a lone whitespace run
/// inside an element, is kept verbatim with entity references resolved.
pub fn parse(markup: &str) -> Result<Dom> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut dom = Dom::new();
    let document = dom.document();
    let mut stack: Vec<NodeId> = vec![document];

    loop {
        let parent = stack.last().copied().unwrap_or(document);
        match reader.read_event()? {
            Event::Start(e) => {
                let id = create_element(&mut dom, &e)?;
                dom.append(parent, id);
                stack.push(id);
            }
            Event::Empty(e) => {
                let id = create_element(&mut dom, &e)?;
                dom.append(parent, id);
            }
            Event::End(e) => {
                if stack.len() <= 1 {
                    return Err(Error::MalformedDocument(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                stack.pop();
                drop_ignorable_whitespace(&mut dom, parent);
            }
            Event::Text(e) => dom.append_text(parent, &lossy(&e)),
            Event::GeneralRef(e) => {
                let entity = lossy(&e);
                let resolved = resolve_entity(&entity).ok_or_else(|| {
                    Error::MalformedDocument(format!("unknown entity &{entity};"))
                })?;
                dom.append_text(parent, &resolved);
            }
            Event::CData(e) => append_node(&mut dom, parent, NodeData::CData(lossy(&e))),
            Event::Comment(e) => append_node(&mut dom, parent, NodeData::Comment(lossy(&e))),
            Event::Decl(e) => append_node(&mut dom, parent, NodeData::Declaration(lossy(&e))),
            Event::PI(e) => append_node(
                &mut dom,
                parent,
                NodeData::ProcessingInstruction(lossy(&e)),
            ),
            Event::DocType(e) => append_node(&mut dom, parent, NodeData::Doctype(lossy(&e))),
            Event::Eof => break,
        }
    }

    if stack.len() > 1 {
        let open = stack
            .last()
            .and_then(|&id| dom.element_name(id))
            .unwrap_or_default()
            .to_string();
        return Err(Error::MalformedDocument(format!("unclosed element <{open}>")));
    }
    drop_ignorable_whitespace(&mut dom, document);

    Ok(dom)
}

fn create_element(dom: &mut Dom, e: &BytesStart<'_>) -> Result<NodeId> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|err| Error::MalformedDocument(format!("attribute on <{name}>: {err}")))?;
        attrs.push(Attribute::new(
            String::from_utf8_lossy(attr.key.as_ref()),
            value.into_owned(),
        ));
    }

    Ok(dom.create_element(name, attrs))
}

fn append_node(dom: &mut Dom, parent: NodeId, data: NodeData) {
    let id = dom.create(data);
    dom.append(parent, id);
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Remove whitespace-only text from an element that also has element children.
fn drop_ignorable_whitespace(dom: &mut Dom, id: NodeId) {
    let children = dom.children(id);
    if !children.iter().any(|&c| dom.is_element(c)) {
        return;
    }

    let kept: Vec<NodeId> = children
        .iter()
        .copied()
        .filter(|&c| !is_blank_text(dom, c))
        .collect();
    if kept.len() != children.len() {
        dom.set_children(id, kept);
    }
}

fn is_blank_text(dom: &Dom, id: NodeId) -> bool {
    matches!(
        dom.get(id).map(|n| &n.data),
        Some(NodeData::Text(s)) if s.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
    )
}

fn resolve_entity(entity: &str) -> Option<Cow<'static, str>> {
    match entity {
        "apos" => return Some(Cow::Borrowed("'")),
        "quot" => return Some(Cow::Borrowed("\"")),
        "lt" => return Some(Cow::Borrowed("<")),
        "gt" => return Some(Cow::Borrowed(">")),
        "amp" => return Some(Cow::Borrowed("&")),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| Cow::Owned(c.to_string()))
}
