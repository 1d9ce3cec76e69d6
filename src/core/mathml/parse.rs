//! Building [`MathNode`] trees
//!
//! Trees are read from an html5ever DOM: either a `<math>` island inside a
//! parsed document, or a standalone MathML string parsed on its own.

use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

use super::node::{MathKind, MathNode};
use crate::core::html::dom;

lazy_static! {
    static ref XMLNS_ATTR: Regex = Regex::new(r#"\s*xmlns(?::[\w-]+)?\s*=\s*("[^"]*"|'[^']*')"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip namespace declarations and collapse whitespace runs to single spaces
pub fn clean_mathml(mathml: &str) -> String {
    let without_ns = XMLNS_ATTR.replace_all(mathml, "");
    WHITESPACE.replace_all(&without_ns, " ").trim().to_string()
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Build a tree from a DOM element.
///
/// Non-element children (whitespace between tags, comments) are dropped;
/// token elements keep their collapsed text content.
pub fn from_dom(handle: &Handle) -> Option<MathNode> {
    let NodeData::Element { ref name, .. } = handle.data else {
        return None;
    };
    let local: &str = &name.local;
    let kind = MathKind::from_name(local);

    let mut node = MathNode::new(kind);
    node.name = local.to_ascii_lowercase();
    node.attrs = dom::attributes(handle).into_iter().collect();

    if kind.is_token() {
        node.text = collapse_whitespace(&dom::text_content(handle));
        return Some(node);
    }

    node.children = handle
        .children
        .borrow()
        .iter()
        .filter_map(from_dom)
        .collect();
    Some(node)
}

/// Parse a standalone MathML string.
///
/// The first `<math>` element wins. Bare fragments without a `<math>`
/// wrapper (for example a lone `<mfrac>`) are parsed again inside a
/// synthetic `<math>`, so MathML-only elements such as `<mprescripts/>`
/// get foreign-content treatment. Returns `None` when the input contains
/// no elements at all.
pub fn parse_mathml(mathml: &str) -> Option<MathNode> {
    let document = dom::parse_html(mathml);
    if let Some(math) = dom::find_first(&document.document, "math") {
        return from_dom(&math);
    }

    let wrapped = dom::parse_html(&format!("<math>{}</math>", mathml));
    let math = dom::find_first(&wrapped.document, "math")?;
    let root = from_dom(&math)?;
    if root.children.is_empty() {
        return None;
    }
    Some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_mathml() {
        let input = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">\n  <mi>x</mi>\n</math>";
        assert_eq!(clean_mathml(input), "<math> <mi>x</mi> </math>");
    }

    #[test]
    fn test_clean_mathml_prefixed_namespace() {
        let input = "<m:math xmlns:m='http://www.w3.org/1998/Math/MathML'><m:mi>x</m:mi></m:math>";
        assert_eq!(clean_mathml(input), "<m:math><m:mi>x</m:mi></m:math>");
    }

    #[test]
    fn test_parse_fraction() {
        let node = parse_mathml("<math><mfrac><mn>12</mn><mi>a</mi></mfrac></math>").unwrap();
        assert_eq!(node.kind, MathKind::Root);
        assert_eq!(node.children.len(), 1);
        let frac = &node.children[0];
        assert_eq!(frac.kind, MathKind::Fraction);
        assert_eq!(frac.children[0], MathNode::number("12"));
        assert_eq!(frac.children[1], MathNode::identifier("a"));
    }

    #[test]
    fn test_parse_drops_whitespace_text() {
        let node = parse_mathml(
            "<math>\n  <mrow>\n    <mi> x </mi>\n    <mo>&times;</mo>\n  </mrow>\n</math>",
        )
        .unwrap();
        let row = &node.children[0];
        assert_eq!(row.children.len(), 2);
        assert_eq!(row.children[0].text, "x");
        assert_eq!(row.children[1].text, "×");
    }

    #[test]
    fn test_parse_prescripts_marker() {
        let node = parse_mathml(
            "<math><mmultiscripts><mi>C</mi><mprescripts/><mn>12</mn></mmultiscripts></math>",
        )
        .unwrap();
        let multi = &node.children[0];
        assert_eq!(multi.kind, MathKind::Multiscript);
        let kinds: Vec<_> = multi.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![MathKind::Identifier, MathKind::PrescriptMarker, MathKind::Number]
        );
    }

    #[test]
    fn test_parse_display_attribute() {
        let node = parse_mathml(r#"<math display="block"><mi>x</mi></math>"#).unwrap();
        assert!(node.is_display_block());
    }

    #[test]
    fn test_parse_bare_fragment() {
        let node = parse_mathml("<msup><mi>x</mi><mn>2</mn></msup>").unwrap();
        assert_eq!(node.kind, MathKind::Root);
        assert_eq!(node.children[0].kind, MathKind::Superscript);
        assert_eq!(node.children[0].children.len(), 2);
    }

    #[test]
    fn test_parse_bare_multiscripts_keeps_prescript() {
        let node =
            parse_mathml("<mmultiscripts><mi>C</mi><mprescripts/><mn>12</mn></mmultiscripts>")
                .unwrap();
        let multi = &node.children[0];
        assert_eq!(multi.kind, MathKind::Multiscript);
        assert_eq!(multi.children.len(), 3);
        assert_eq!(multi.children[1].kind, MathKind::PrescriptMarker);
        assert_eq!(multi.children[2], MathNode::number("12"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_mathml("").is_none());
        assert!(parse_mathml("just text").is_none());
    }
}
