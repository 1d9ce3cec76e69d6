//! Inline vs display placement of converted formulas

use markup5ever_rcdom::{Handle, NodeData};

use super::dom;

/// Where a formula sits in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Embedded in running text: `$...$`
    #[default]
    Inline,
    /// Standalone paragraph-level formula: `$$...$$`
    Display,
}

impl Placement {
    /// Decide placement from the `display` attribute and the surrounding block.
    pub fn classify(display_attr: Option<&str>, sole_content: bool) -> Self {
        let block = display_attr.is_some_and(|d| d.trim().eq_ignore_ascii_case("block"));
        if block || sole_content {
            Placement::Display
        } else {
            Placement::Inline
        }
    }

    pub fn delimiter(self) -> &'static str {
        match self {
            Placement::Inline => "$",
            Placement::Display => "$$",
        }
    }
}

/// Already starts with an inline or display math delimiter
pub fn is_delimited(latex: &str) -> bool {
    latex.starts_with('$') || latex.starts_with("\\[") || latex.starts_with("\\(")
}

/// Wrap a formula in the delimiter for its placement.
///
/// Empty formulas stay empty and delimited ones are returned unchanged.
pub fn wrap(latex: &str, placement: Placement) -> String {
    if latex.is_empty() || is_delimited(latex) {
        return latex.to_string();
    }
    let delim = placement.delimiter();
    format!("{}{}{}", delim, latex, delim)
}

/// Whether `island` is the only meaningful content of a container element.
///
/// The parent must be one of `containers`; sibling elements or sibling
/// text with anything but whitespace disqualify it.
pub fn is_sole_content(island: &Handle, containers: &[String]) -> bool {
    let Some(parent) = dom::parent_of(island) else {
        return false;
    };
    let is_container = dom::element_name(&parent)
        .is_some_and(|name| containers.iter().any(|c| c.eq_ignore_ascii_case(name)));
    if !is_container {
        return false;
    }

    let children = parent.children.borrow();
    children.iter().all(|sibling| {
        if std::rc::Rc::ptr_eq(sibling, island) {
            return true;
        }
        match sibling.data {
            NodeData::Element { .. } => false,
            NodeData::Text { ref contents } => contents.borrow().trim().is_empty(),
            _ => true,
        }
    })
}
