//! Document cleanup passes run around formula substitution
//!
//! All passes work on an html5ever DOM in place. None of them touch the
//! inside of `<math>` islands.

use html5ever::tendril::StrTendril;
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

use super::dom;
use crate::data::styles::PRESERVE_WHITESPACE_ELEMENTS;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Remove `<p>` elements without element children and with blank text.
///
/// Returns the number of paragraphs removed.
pub fn remove_empty_paragraphs(document: &RcDom) -> usize {
    let mut empty = Vec::new();
    collect_empty_paragraphs(&document.document, &mut empty);
    empty.iter().filter(|p| dom::remove_node(p)).count()
}

fn collect_empty_paragraphs(handle: &Handle, out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if dom::is_element(child, "p")
            && dom::element_children(child).is_empty()
            && dom::text_content(child).trim().is_empty()
        {
            out.push(child.clone());
        } else if !dom::is_element(child, "math") {
            collect_empty_paragraphs(child, out);
        }
    }
}

/// Collapse whitespace runs in every text node to a single space.
///
/// Whitespace-sensitive elements (`pre`, `script`, `style`, `textarea`)
/// and formulas are skipped. Returns the number of text nodes changed.
pub fn normalize_whitespace(document: &RcDom) -> usize {
    normalize_text_nodes(&document.document)
}

fn normalize_text_nodes(handle: &Handle) -> usize {
    let mut changed = 0;
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                let collapsed = WHITESPACE_RUN.replace_all(&contents.borrow(), " ").into_owned();
                if collapsed.as_str() != &**contents.borrow() {
                    *contents.borrow_mut() = StrTendril::from_slice(&collapsed);
                    changed += 1;
                }
            }
            NodeData::Element { ref name, .. } => {
                let local: &str = &name.local;
                let skip = local.eq_ignore_ascii_case("math")
                    || PRESERVE_WHITESPACE_ELEMENTS
                        .iter()
                        .any(|p| p.eq_ignore_ascii_case(local));
                if !skip {
                    changed += normalize_text_nodes(child);
                }
            }
            _ => changed += normalize_text_nodes(child),
        }
    }
    changed
}

/// Append a `<style>` block to `<head>`, creating the head if needed.
pub fn inject_stylesheet(document: &RcDom, css: &str) -> bool {
    let head = match dom::find_first(&document.document, "head") {
        Some(head) => head,
        None => {
            let Some(html) = dom::find_first(&document.document, "html") else {
                return false;
            };
            let head = dom::new_element("head", &[]);
            dom::insert_child(&html, 0, head.clone());
            head
        }
    };

    let style = dom::new_element("style", &[]);
    dom::append_child(&style, dom::new_text(css));
    dom::append_child(&head, style);
    true
}
