//! `mmultiscripts` normalization
//!
//! `mmultiscripts` can stand for a plain superscript, a combined
//! sub/superscript, or a leading prescript as in isotope notation
//! (`{}^{12}C`). The shape is decided by a heuristic on the position of
//! `<mprescripts/>` and the raw child count:
//!
//! 1. a marker followed by a child: `{}^{N}Base`
//! 2. three or more children: `Base_{sub}^{sup}`
//! 3. exactly two children: `Base^{sup}`
//! 4. anything shorter: no output
//!
//! Ambiguous two-child inputs without a marker are always read as a
//! superscript. The rewrite only ever produces `mrow`, `msup` and
//! `msubsup`, so later stages never see `mmultiscripts`.

use super::node::{MathKind, MathNode};

/// Rewrite one `mmultiscripts` node into its canonical form.
///
/// Returns `None` when the node has too few children to mean anything.
pub fn normalize_multiscript(node: &MathNode) -> Option<MathNode> {
    let children = &node.children;
    let marker = children.iter().position(MathNode::is_marker);

    if let Some(m) = marker {
        let base = match m {
            0 => MathNode::row(Vec::new()),
            _ => children[0].clone(),
        };
        // standard MathML pairs the prescripts as (presub, presup); an empty
        // presub slot is written as <none/>
        let prescript = children[m + 1..]
            .iter()
            .find(|c| c.kind != MathKind::Placeholder);
        if let Some(prescript) = prescript {
            let lead = MathNode::with_children(
                MathKind::Superscript,
                vec![MathNode::row(Vec::new()), prescript.clone()],
            );
            return Some(MathNode::row(vec![lead, base]));
        }
    }

    let postscripts: Vec<&MathNode> = match marker {
        Some(m) => children[..m].iter().collect(),
        None => children.iter().collect(),
    };

    match postscripts.len() {
        n if n >= 3 => Some(MathNode::with_children(
            MathKind::SubSuperscript,
            vec![
                postscripts[0].clone(),
                postscripts[1].clone(),
                postscripts[2].clone(),
            ],
        )),
        2 => Some(MathNode::with_children(
            MathKind::Superscript,
            vec![postscripts[0].clone(), postscripts[1].clone()],
        )),
        _ => None,
    }
}

/// Tree-wide pre-pass that rewrites every `mmultiscripts` node.
#[derive(Debug, Default)]
pub struct Normalizer {
    /// Multiscript nodes that were too short and became empty rows
    pub underflows: usize,
    /// Multiscript nodes rewritten
    pub rewritten: usize,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite a whole tree bottom-up. Underflowing nodes become empty rows.
    pub fn normalize(&mut self, node: &MathNode) -> MathNode {
        let children = node.children.iter().map(|c| self.normalize(c)).collect();
        let rebuilt = MathNode {
            children,
            ..node.clone_shallow()
        };

        if rebuilt.kind != MathKind::Multiscript {
            return rebuilt;
        }

        match normalize_multiscript(&rebuilt) {
            Some(canonical) => {
                self.rewritten += 1;
                canonical
            }
            None => {
                self.underflows += 1;
                MathNode::row(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiscripts(children: Vec<MathNode>) -> MathNode {
        MathNode::with_children(MathKind::Multiscript, children)
    }

    fn marker() -> MathNode {
        MathNode::new(MathKind::PrescriptMarker)
    }

    #[test]
    fn test_prescript_isotope() {
        let node = multiscripts(vec![MathNode::identifier("C"), marker(), MathNode::number("12")]);
        let out = normalize_multiscript(&node).unwrap();

        assert_eq!(out.kind, MathKind::Row);
        assert_eq!(out.children.len(), 2);
        let lead = &out.children[0];
        assert_eq!(lead.kind, MathKind::Superscript);
        assert!(lead.children[0].children.is_empty());
        assert_eq!(lead.children[1], MathNode::number("12"));
        assert_eq!(out.children[1], MathNode::identifier("C"));
    }

    #[test]
    fn test_prescript_skips_none_placeholder() {
        let node = multiscripts(vec![
            MathNode::identifier("C"),
            marker(),
            MathNode::new(MathKind::Placeholder),
            MathNode::number("14"),
        ]);
        let out = normalize_multiscript(&node).unwrap();
        assert_eq!(out.children[0].children[1], MathNode::number("14"));
    }

    #[test]
    fn test_sub_superscript() {
        let node = multiscripts(vec![
            MathNode::identifier("X"),
            MathNode::number("1"),
            MathNode::number("2"),
        ]);
        let out = normalize_multiscript(&node).unwrap();
        assert_eq!(out.kind, MathKind::SubSuperscript);
        assert_eq!(out.children.len(), 3);
    }

    #[test]
    fn test_extra_postscripts_are_ignored() {
        let node = multiscripts(vec![
            MathNode::identifier("X"),
            MathNode::number("1"),
            MathNode::number("2"),
            MathNode::number("3"),
            MathNode::number("4"),
        ]);
        let out = normalize_multiscript(&node).unwrap();
        assert_eq!(out.kind, MathKind::SubSuperscript);
        assert_eq!(out.children.len(), 3);
    }

    #[test]
    fn test_superscript() {
        let node = multiscripts(vec![MathNode::identifier("x"), MathNode::number("2")]);
        let out = normalize_multiscript(&node).unwrap();
        assert_eq!(out.kind, MathKind::Superscript);
    }

    #[test]
    fn test_underflow() {
        assert!(normalize_multiscript(&multiscripts(vec![])).is_none());
        assert!(normalize_multiscript(&multiscripts(vec![MathNode::identifier("x")])).is_none());
    }

    #[test]
    fn test_marker_without_prescript_uses_postscripts() {
        let node = multiscripts(vec![MathNode::identifier("x"), MathNode::number("2"), marker()]);
        let out = normalize_multiscript(&node).unwrap();
        assert_eq!(out.kind, MathKind::Superscript);

        let node = multiscripts(vec![MathNode::identifier("x"), marker()]);
        assert!(normalize_multiscript(&node).is_none());
    }

    #[test]
    fn test_normalizer_rewrites_nested() {
        let tree = MathNode::with_children(
            MathKind::Root,
            vec![MathNode::row(vec![
                multiscripts(vec![MathNode::identifier("C"), marker(), MathNode::number("12")]),
                MathNode::operator("+"),
                multiscripts(vec![MathNode::identifier("y")]),
            ])],
        );

        let mut normalizer = Normalizer::new();
        let out = normalizer.normalize(&tree);
        assert_eq!(normalizer.rewritten, 1);
        assert_eq!(normalizer.underflows, 1);

        let mut seen_multiscript = false;
        out.walk(&mut |n: &MathNode| seen_multiscript |= n.kind == MathKind::Multiscript);
        assert!(!seen_multiscript);
    }
}
