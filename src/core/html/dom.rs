//! Thin helpers over the html5ever reference-counted DOM
//!
//! Parsing, serialization, and the handful of tree edits the converter
//! needs (replace, remove, append). Element names are compared by local
//! name only, so `<math>` is found whether or not it carries the MathML
//! namespace.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{parse_document, Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::utils::error::{ConversionError, ConversionResult};

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Parse an HTML document (fragments are wrapped in html/head/body)
pub fn parse_html(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

/// Serialize a whole document back to HTML
pub fn serialize_document(dom: &RcDom) -> ConversionResult<String> {
    serialize_node(&dom.document)
}

/// Serialize the children of a node
pub fn serialize_node(handle: &Handle) -> ConversionResult<String> {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    serialize(&mut bytes, &serializable, SerializeOpts::default())?;
    String::from_utf8(bytes)
        .map_err(|e| ConversionError::internal(format!("serializer produced invalid UTF-8: {}", e)))
}

/// Local name of an element, `None` for non-element nodes
pub fn element_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Check whether a node is an element with the given local name
pub fn is_element(handle: &Handle, local: &str) -> bool {
    element_name(handle).is_some_and(|n| n.eq_ignore_ascii_case(local))
}

/// Attribute value by local name
pub fn get_attr(handle: &Handle, attr: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| (*a.name.local).eq_ignore_ascii_case(attr))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// All attributes of an element as (local name, value) pairs, in source order
pub fn attributes(handle: &Handle) -> Vec<(String, String)> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Concatenated text of all descendant text nodes
pub fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    collect_text(handle, &mut out);
    out
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Element children only (text, comments and the like are skipped)
pub fn element_children(handle: &Handle) -> Vec<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Parent of a node, if it is still attached
pub fn parent_of(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    handle.parent.set(weak);
    parent
}

/// All elements with the given local name, in document order.
///
/// Matching elements are not descended into, so nested matches are never
/// reported twice.
pub fn find_outermost(handle: &Handle, local: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_outermost(handle, local, &mut found);
    found
}

fn collect_outermost(handle: &Handle, local: &str, found: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if is_element(child, local) {
            found.push(child.clone());
        } else {
            collect_outermost(child, local, found);
        }
    }
}

/// Create a detached text node
pub fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

/// Create a detached HTML element
pub fn new_element(local: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(*name)),
            value: StrTendril::from_slice(value),
        })
        .collect();
    Node::new(NodeData::Element {
        name: QualName::new(None, Namespace::from(HTML_NS), LocalName::from(local)),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Append a detached node as the last child of `parent`
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Insert a detached node at `index` among the children of `parent`
pub fn insert_child(parent: &Handle, index: usize, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    let mut children = parent.children.borrow_mut();
    let index = index.min(children.len());
    children.insert(index, child);
}

/// Replace `old` with `new` in its parent. Returns false if `old` is detached.
pub fn replace_node(old: &Handle, new: Handle) -> bool {
    let Some(parent) = parent_of(old) else {
        return false;
    };
    let mut children = parent.children.borrow_mut();
    let Some(index) = children.iter().position(|c| Rc::ptr_eq(c, old)) else {
        return false;
    };
    new.parent.set(Some(Rc::downgrade(&parent)));
    old.parent.set(None);
    children[index] = new;
    true
}

/// Detach a node from its parent. Returns false if it was already detached.
pub fn remove_node(handle: &Handle) -> bool {
    let Some(parent) = parent_of(handle) else {
        return false;
    };
    let mut children = parent.children.borrow_mut();
    let before = children.len();
    children.retain(|c| !Rc::ptr_eq(c, handle));
    handle.parent.set(None);
    children.len() != before
}

/// First element with the given local name anywhere below `handle`
pub fn find_first(handle: &Handle, local: &str) -> Option<Handle> {
    find_outermost(handle, local).into_iter().next()
}
