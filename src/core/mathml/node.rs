//! MathML tree model
//!
//! A [`MathNode`] is an owned, immutable snapshot of one MathML element.
//! Trees are built fresh for every formula and consumed once.

use indexmap::IndexMap;
use phf::phf_map;

/// Closed vocabulary of MathML element kinds understood by the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathKind {
    /// `<math>`
    Root,
    /// `<mi>`
    Identifier,
    /// `<mn>`
    Number,
    /// `<mo>`
    Operator,
    /// `<mfrac>`
    Fraction,
    /// `<msup>`
    Superscript,
    /// `<msub>`
    Subscript,
    /// `<msubsup>`
    SubSuperscript,
    /// `<mmultiscripts>`
    Multiscript,
    /// `<mrow>`
    Row,
    /// `<mtext>`
    Text,
    /// `<mprescripts/>`, the prescript/postscript boundary
    PrescriptMarker,
    /// `<none/>`, an empty script slot
    Placeholder,
    /// Anything else
    Unknown,
}

/// Element local name to kind
pub static ELEMENT_KINDS: phf::Map<&'static str, MathKind> = phf_map! {
    "math" => MathKind::Root,
    "mi" => MathKind::Identifier,
    "mn" => MathKind::Number,
    "mo" => MathKind::Operator,
    "mfrac" => MathKind::Fraction,
    "msup" => MathKind::Superscript,
    "msub" => MathKind::Subscript,
    "msubsup" => MathKind::SubSuperscript,
    "mmultiscripts" => MathKind::Multiscript,
    "mrow" => MathKind::Row,
    "mtext" => MathKind::Text,
    "mprescripts" => MathKind::PrescriptMarker,
    "none" => MathKind::Placeholder,
};

impl MathKind {
    /// Classify an element by its local name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        if let Some(kind) = ELEMENT_KINDS.get(name) {
            return *kind;
        }
        ELEMENT_KINDS
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(MathKind::Unknown)
    }

    /// Canonical element name for synthesized nodes
    pub fn canonical_name(self) -> &'static str {
        match self {
            MathKind::Root => "math",
            MathKind::Identifier => "mi",
            MathKind::Number => "mn",
            MathKind::Operator => "mo",
            MathKind::Fraction => "mfrac",
            MathKind::Superscript => "msup",
            MathKind::Subscript => "msub",
            MathKind::SubSuperscript => "msubsup",
            MathKind::Multiscript => "mmultiscripts",
            MathKind::Row => "mrow",
            MathKind::Text => "mtext",
            MathKind::PrescriptMarker => "mprescripts",
            MathKind::Placeholder => "none",
            MathKind::Unknown => "mrow",
        }
    }

    /// Kinds whose content is a literal text payload
    pub fn is_token(self) -> bool {
        matches!(
            self,
            MathKind::Identifier | MathKind::Number | MathKind::Operator | MathKind::Text
        )
    }

    /// Exact child count required by the kind's grammar rule, if any
    pub fn required_children(self) -> Option<usize> {
        match self {
            MathKind::Fraction | MathKind::Superscript | MathKind::Subscript => Some(2),
            MathKind::SubSuperscript => Some(3),
            _ => None,
        }
    }
}

/// One MathML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathNode {
    pub kind: MathKind,
    /// Element local name as it appeared in the source
    pub name: String,
    pub children: Vec<MathNode>,
    /// Literal payload of token elements (whitespace collapsed and trimmed)
    pub text: String,
    pub attrs: IndexMap<String, String>,
}

impl MathNode {
    /// Create an empty node of the given kind with its canonical name
    pub fn new(kind: MathKind) -> Self {
        Self {
            kind,
            name: kind.canonical_name().to_string(),
            children: Vec::new(),
            text: String::new(),
            attrs: IndexMap::new(),
        }
    }

    /// Create a token node (`mi`, `mn`, `mo`, `mtext`)
    pub fn token(kind: MathKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(kind)
        }
    }

    /// Create a node with children
    pub fn with_children(kind: MathKind, children: Vec<MathNode>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Self::token(MathKind::Identifier, text)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::token(MathKind::Number, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self::token(MathKind::Operator, text)
    }

    pub fn row(children: Vec<MathNode>) -> Self {
        Self::with_children(MathKind::Row, children)
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Root carries `display="block"`
    pub fn is_display_block(&self) -> bool {
        self.kind == MathKind::Root
            && self
                .attr("display")
                .is_some_and(|d| d.trim().eq_ignore_ascii_case("block"))
    }

    pub fn is_marker(&self) -> bool {
        self.kind == MathKind::PrescriptMarker
    }

    /// Children with the prescript marker filtered out
    pub fn content_children(&self) -> impl Iterator<Item = &MathNode> {
        self.children.iter().filter(|c| !c.is_marker())
    }

    /// Copy of the node without its children
    pub(crate) fn clone_shallow(&self) -> MathNode {
        MathNode {
            kind: self.kind,
            name: self.name.clone(),
            children: Vec::new(),
            text: self.text.clone(),
            attrs: self.attrs.clone(),
        }
    }

    /// Depth-first pre-order traversal
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a MathNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
