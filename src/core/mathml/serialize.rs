//! MathML serialization
//!
//! Writes a [`MathNode`] tree back out as compact MathML: no namespace
//! declarations, no insignificant whitespace. This is the form handed to
//! the primary translator.

use super::node::{MathKind, MathNode};

/// Serialize a tree to a compact MathML string
pub fn to_mathml(node: &MathNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &MathNode, out: &mut String) {
    let name = if node.name.is_empty() {
        node.kind.canonical_name()
    } else {
        node.name.as_str()
    };

    out.push('<');
    out.push_str(name);
    for (key, value) in &node.attrs {
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    let empty = node.children.is_empty() && node.text.is_empty();
    if empty && matches!(node.kind, MathKind::PrescriptMarker | MathKind::Placeholder) {
        out.push_str("/>");
        return;
    }
    out.push('>');

    if node.kind.is_token() {
        escape_into(&node.text, false, out);
    } else {
        for child in &node.children {
            write_node(child, out);
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mathml::parse::parse_mathml;

    #[test]
    fn test_serialize_compact() {
        let node = parse_mathml(
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" display=\"block\">\n\
             <mfrac>\n <mn>1</mn>\n <mi>x</mi>\n</mfrac></math>",
        )
        .unwrap();
        assert_eq!(
            to_mathml(&node),
            "<math display=\"block\"><mfrac><mn>1</mn><mi>x</mi></mfrac></math>"
        );
    }

    #[test]
    fn test_serialize_escapes_text() {
        let node = MathNode::with_children(MathKind::Root, vec![MathNode::operator("<")]);
        assert_eq!(to_mathml(&node), "<math><mo>&lt;</mo></math>");
    }

    #[test]
    fn test_serialize_self_closing_marker() {
        let node = MathNode::with_children(
            MathKind::Multiscript,
            vec![
                MathNode::identifier("C"),
                MathNode::new(MathKind::PrescriptMarker),
                MathNode::number("12"),
            ],
        );
        assert_eq!(
            to_mathml(&node),
            "<mmultiscripts><mi>C</mi><mprescripts/><mn>12</mn></mmultiscripts>"
        );
    }
}
