//! 条款边界判断
//!
//! 给定一行文本，判断它是否像一个新条款的开头

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::text::char_len;

/// `1. ` / `(2) `
static NUMERIC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?\d+[.)]\s+").expect("valid regex"));
/// `1.1. ` / `2.3.4) `
static DECIMAL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+(?:\.\d+)*[.)]\s+").expect("valid regex"));
/// `a. ` / `(b) `
static LETTER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?[a-z][.)]\s+").expect("valid regex"));
static SECTION_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:article|section|clause)\s+").expect("valid regex"));
/// `Payment Terms` / `Governing Law:`
static TITLE_CASE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+[:.]?\s*$").expect("valid regex")
});

/// 判断一行文本是否可能是新条款的开头
///
/// 规则按顺序检查，任一命中即返回 true；去除空白后不足 3 个字符的行一律返回 false。
pub fn is_clause_boundary(line: &str) -> bool {
    let stripped = line.trim();
    if char_len(stripped) < 3 {
        return false;
    }

    NUMERIC_MARKER.is_match(stripped)
        || DECIMAL_MARKER.is_match(stripped)
        || LETTER_MARKER.is_match(stripped)
        || SECTION_KEYWORD.is_match(stripped)
        || is_upper_heading(stripped)
        || TITLE_CASE_HEADING.is_match(stripped)
}

/// 全大写标题：没有小写字母、至少一个字母，长度在 (10, 100) 之间
pub(crate) fn is_upper_heading(stripped: &str) -> bool {
    let len = char_len(stripped);
    len > 10 && len < 100 && is_all_caps(stripped)
}

fn is_all_caps(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
