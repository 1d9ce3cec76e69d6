//! Recursive-descent MathML to LaTeX translator
//!
//! Covers the fixed vocabulary of [`MathKind`]. Grammar violations (wrong
//! child counts) never fail: the offending node translates to an empty
//! string and its parent carries on with an empty operand.

use std::borrow::Cow;

use super::multiscript::normalize_multiscript;
use super::node::{MathKind, MathNode};
use crate::data::operators::translate_operator;

/// Translate a MathML tree to LaTeX math (without delimiters)
pub fn translate(node: &MathNode) -> String {
    let mut out = String::new();
    translate_into(node, &mut out);
    out
}

fn translate_into(node: &MathNode, out: &mut String) {
    match node.kind {
        MathKind::Root | MathKind::Row | MathKind::Unknown => translate_children(node, out),

        MathKind::Identifier | MathKind::Number => push_token(&escape_math(&node.text), out),

        MathKind::Operator => {
            let op = translate_operator(&node.text);
            if op == node.text {
                push_token(&escape_math(op), out);
            } else {
                push_token(op, out);
            }
        }

        MathKind::Fraction => {
            if let [numerator, denominator] = node.children.as_slice() {
                out.push_str("\\frac{");
                translate_into(numerator, out);
                out.push_str("}{");
                translate_into(denominator, out);
                out.push('}');
            }
        }

        MathKind::Superscript | MathKind::Subscript => {
            if let [base, script] = node.children.as_slice() {
                push_base(base, out);
                out.push_str(if node.kind == MathKind::Superscript {
                    "^{"
                } else {
                    "_{"
                });
                translate_into(script, out);
                out.push('}');
            }
        }

        MathKind::SubSuperscript => {
            if let [base, sub, sup] = node.children.as_slice() {
                push_base(base, out);
                out.push_str("_{");
                translate_into(sub, out);
                out.push_str("}^{");
                translate_into(sup, out);
                out.push('}');
            }
        }

        MathKind::Multiscript => {
            if let Some(canonical) = normalize_multiscript(node) {
                translate_into(&canonical, out);
            }
        }

        MathKind::Text => {
            out.push_str("\\text{");
            out.push_str(&escape_text(&node.text));
            out.push('}');
        }

        MathKind::PrescriptMarker | MathKind::Placeholder => {}
    }
}

fn translate_children(node: &MathNode, out: &mut String) {
    for child in node.content_children() {
        translate_into(child, out);
    }
}

/// Append a token, separating it from a preceding control word
fn push_token(token: &str, out: &mut String) {
    if token.starts_with(|c: char| c.is_ascii_alphabetic()) && ends_with_control_word(out) {
        out.push(' ');
    }
    out.push_str(token);
}

fn ends_with_control_word(out: &str) -> bool {
    let stem = out.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    stem.len() < out.len() && stem.ends_with('\\') && !stem.ends_with("\\\\")
}

/// Scripts need something to attach to; an empty base becomes `{}`
fn push_base(base: &MathNode, out: &mut String) {
    let translated = translate(base);
    if translated.is_empty() {
        out.push_str("{}");
    } else {
        push_token(&translated, out);
    }
}

/// Escape token text whose characters would end or break LaTeX math
fn escape_math(token: &str) -> Cow<'_, str> {
    const SPECIAL: [char; 6] = ['$', '%', '#', '&', '{', '}'];
    if !token.contains(SPECIAL) {
        return Cow::Borrowed(token);
    }
    let mut out = String::with_capacity(token.len() + 2);
    for ch in token.chars() {
        if SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Escape characters that are special inside `\text{...}`
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '$' | '&' | '#' | '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}
