//! Default stylesheet injected into converted documents
//!
//! Word processors pick their fonts from the HTML they are generated from,
//! so documents get a serif CJK-capable font stack unless the caller
//! supplies a stylesheet of their own.

/// Default CSS rules (body text, math text, emphasis and paragraph spacing)
pub const DEFAULT_STYLESHEET: &str = r#"
body, p, div, span, h1, h2, h3, h4, h5, h6, li, td, th {
    font-family: "SimSun", "宋体", "Times New Roman", serif !important;
    font-size: 12pt;
    line-height: 1.5;
}

math, mtext {
    font-family: "SimSun", "宋体", "Times New Roman", serif !important;
}

strong, b {
    font-weight: bold;
    font-family: "SimSun", "宋体", "Times New Roman", serif !important;
}

p {
    margin: 6pt 0;
    text-align: justify;
}
"#;

/// Elements whose text content is whitespace-sensitive
pub const PRESERVE_WHITESPACE_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

/// Containers that turn a lone formula into a display formula by default
pub const DEFAULT_DISPLAY_CONTAINERS: &[&str] = &["p"];
