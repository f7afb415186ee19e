//! 条款切分
//!
//! 把 PDF 提取出的整段文本切成有序的条款列表。按固定顺序依次尝试多种策略，
//! 第一个给出结果的策略胜出；全部失败时整段文本作为唯一条款返回。
//!
//! | 顺序 | 策略 | 依据 |
//! |------|------|------|
//! | 1 | `Numbered` | 行首编号：`1.`、`(a)`、`1.1.`、`A.`、`Article IV`、`Section 3` |
//! | 2 | `Headings` | 独占一行的全大写 / 首字母大写标题，标题单独成段 |
//! | 3 | `Paragraphs` | 空行分段，非边界段落并入上一条款 |
//! | 4 | `LineStarts` | 行首大写且像句子开头的行 |
//! | - | `Fallback` | 整段文本 |

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::boundary::is_clause_boundary;
use crate::utils::text::{char_len, char_prefix};

/// 编号 / 标题类标记出现在行首
static NUMBERED_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"\(?\d+[.)]\s+",
        r"|\d+\.\d+(?:\.\d+)*[.)]\s+",
        r"|\(?[a-z][.)]\s+",
        r"|\(?[A-Z][.)]\s+",
        r"|(?:Article|ARTICLE)\s+(?:\d+|I{1,3}|IV|VI{0,3}|IX|XI{0,3}|XV|XX|XXX|XL|L|LX|LXX|LXXX|XC)",
        r"|(?:Section|SECTION|Clause|CLAUSE)\s+\d+",
        r")"
    ))
    .expect("valid regex")
});
static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\d+").expect("valid regex"));
static LETTERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?[a-z][.)]\s+").expect("valid regex"));
static WHOLE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s+").expect("valid regex"));
/// 标题行：全大写串或两词以上的首字母大写串，可带结尾 `:` / `.`。
/// 捕获组只含标题文字；`\s` 可以跨行，连续的标题行会合成一个片段。
static HEADING_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([A-Z][A-Z\s]{10,}|[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\s*[:.]?\s*$")
        .expect("valid regex")
});
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").expect("valid regex"));
static CAPITALIZED_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+").expect("valid regex"));

/// 编号片段的最短长度（不含）
const MIN_FRAGMENT_CHARS: usize = 10;
/// 识别子编号时只看片段开头的字符数
const MARKER_WINDOW_CHARS: usize = 50;
/// 短于该长度的片段视为排版碎片，并入上一条
const STRAY_FRAGMENT_CHARS: usize = 50;
/// 最终条款的最短长度（不含）
const MIN_CLAUSE_CHARS: usize = 20;
/// 去重指纹长度
const FINGERPRINT_CHARS: usize = 100;
/// 行首启发式中候选行的最短长度（不含）
const MIN_START_LINE_CHARS: usize = 15;

/// 切分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Numbered,
    Headings,
    Paragraphs,
    LineStarts,
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Numbered => "numbered",
            Strategy::Headings => "headings",
            Strategy::Paragraphs => "paragraphs",
            Strategy::LineStarts => "line-starts",
            Strategy::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// 切分结果，附带实际生效的策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub strategy: Strategy,
    pub clauses: Vec<String>,
}

type StrategyFn = fn(&str) -> Option<Vec<String>>;

/// 策略按顺序尝试，返回 None 表示"没有结果"，交给下一个
const CASCADE: [(Strategy, StrategyFn); 4] = [
    (Strategy::Numbered, split_numbered as StrategyFn),
    (Strategy::Headings, split_headings as StrategyFn),
    (Strategy::Paragraphs, split_paragraphs as StrategyFn),
    (Strategy::LineStarts, split_line_starts as StrategyFn),
];

/// 把合同全文切成条款
///
/// 返回的每个条款都已去除首尾空白且非空；空文本返回空列表。
pub fn segment(text: &str) -> Vec<String> {
    segment_with_strategy(text).clauses
}

/// 同 [`segment`]，额外返回生效的策略
pub fn segment_with_strategy(text: &str) -> Segmentation {
    for (strategy, split) in CASCADE {
        match split(text) {
            Some(clauses) => {
                debug!("切分策略 {} 生效，得到 {} 个条款", strategy, clauses.len());
                return Segmentation { strategy, clauses };
            }
            None => debug!("切分策略 {} 无结果，尝试下一个", strategy),
        }
    }

    let trimmed = text.trim();
    let clauses = if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    };
    Segmentation {
        strategy: Strategy::Fallback,
        clauses,
    }
}

// ========== 策略 1：编号切分 ==========

fn split_numbered(text: &str) -> Option<Vec<String>> {
    let cuts: Vec<usize> = line_starts(text)
        .filter(|&start| NUMBERED_START.is_match(&text[start..]))
        .collect();

    let fragments: Vec<&str> = split_at(text, &cuts)
        .map(str::trim)
        .filter(|fragment| char_len(fragment) > MIN_FRAGMENT_CHARS)
        .collect();
    if fragments.len() < 2 {
        return None;
    }

    let clauses = drop_short_and_duplicates(merge_fragments(&fragments));
    (!clauses.is_empty()).then_some(clauses)
}

enum Placement {
    /// 子条款，用空行拼到上一条
    Nest,
    /// 排版碎片，用空格拼到上一条
    Append,
    Separate,
}

/// 子编号（`1.2`、`a)`）并入父条款，过短的碎片并入上一条
fn merge_fragments(fragments: &[&str]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(fragments.len());

    for &fragment in fragments {
        let head = char_prefix(fragment, MARKER_WINDOW_CHARS).trim();
        let parent = DECIMAL_PREFIX
            .captures(head)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        let lettered = LETTERED_PREFIX.is_match(head);

        let placement = match merged.last() {
            None => Placement::Separate,
            Some(prev) => {
                let prev_head = char_prefix(prev, MARKER_WINDOW_CHARS).trim();
                if let Some(parent) = parent {
                    if opens_with_number(prev_head, parent) {
                        Placement::Nest
                    } else {
                        Placement::Separate
                    }
                } else if lettered {
                    if WHOLE_NUMBER_PREFIX.is_match(prev_head) || DECIMAL_PREFIX.is_match(prev_head)
                    {
                        Placement::Nest
                    } else {
                        Placement::Separate
                    }
                } else if char_len(fragment) < STRAY_FRAGMENT_CHARS {
                    Placement::Append
                } else {
                    Placement::Separate
                }
            }
        };

        let separator = match placement {
            Placement::Nest => "\n\n",
            Placement::Append => " ",
            Placement::Separate => {
                merged.push(fragment.to_string());
                continue;
            }
        };
        if let Some(prev) = merged.last_mut() {
            prev.push_str(separator);
            prev.push_str(fragment);
        }
    }

    merged
}

/// `head` 是否以 `{number}.` 或 `{number})` 加空白开头
fn opens_with_number(head: &str, number: &str) -> bool {
    let Some(rest) = head.strip_prefix(number) else {
        return false;
    };
    let mut chars = rest.chars();
    matches!(chars.next(), Some('.') | Some(')')) && chars.next().is_some_and(char::is_whitespace)
}

/// 去掉过短的条款，并按前缀指纹去重（保留第一次出现）
fn drop_short_and_duplicates(clauses: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    clauses
        .iter()
        .map(|clause| clause.trim())
        .filter(|clause| char_len(clause) > MIN_CLAUSE_CHARS)
        .filter(|clause| seen.insert(char_prefix(clause, FINGERPRINT_CHARS).to_string()))
        .map(str::to_string)
        .collect()
}

// ========== 策略 2：标题行切分 ==========

fn split_headings(text: &str) -> Option<Vec<String>> {
    let clauses: Vec<String> = split_keeping_headings(text)
        .into_iter()
        .map(str::trim)
        .filter(|fragment| char_len(fragment) > MIN_FRAGMENT_CHARS)
        .map(str::to_string)
        .collect();
    (clauses.len() > 1).then_some(clauses)
}

/// 在标题处切开：标题文字本身单独成为一个片段，正文留在标题之间
fn split_keeping_headings(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for caps in HEADING_SPLIT.captures_iter(text) {
        let (Some(whole), Some(heading)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        fragments.push(&text[last..whole.start()]);
        fragments.push(heading.as_str());
        last = whole.end();
    }
    fragments.push(&text[last..]);
    fragments
}

// ========== 策略 3：段落切分 ==========

fn split_paragraphs(text: &str) -> Option<Vec<String>> {
    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| char_len(paragraph) > MIN_CLAUSE_CHARS)
        .collect();
    if paragraphs.len() < 2 {
        return None;
    }

    let mut merged: Vec<String> = Vec::new();
    for paragraph in paragraphs {
        let first_line = paragraph.lines().next().unwrap_or_default();
        if merged.is_empty() || is_clause_boundary(first_line) {
            merged.push(paragraph.to_string());
        } else if let Some(open) = merged.last_mut() {
            open.push_str("\n\n");
            open.push_str(paragraph);
        }
    }

    (merged.len() > 1).then_some(merged)
}

// ========== 策略 4：行首启发式 ==========

fn split_line_starts(text: &str) -> Option<Vec<String>> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= 5 {
        return None;
    }

    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| looks_like_clause_start(line))
        .map(|(index, _)| index)
        .collect();
    if starts.len() < 2 {
        return None;
    }

    let clauses: Vec<String> = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            lines[start..end].join("\n").trim().to_string()
        })
        .filter(|clause| char_len(clause) > MIN_CLAUSE_CHARS)
        .collect();
    (!clauses.is_empty()).then_some(clauses)
}

fn looks_like_clause_start(line: &str) -> bool {
    let stripped = line.trim();
    if char_len(stripped) <= MIN_START_LINE_CHARS {
        return false;
    }
    let starts_upper = stripped.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && (stripped.ends_with('.') || stripped.ends_with(':') || CAPITALIZED_WORD.is_match(stripped))
}

// ========== 工具函数 ==========

/// 每一行的起始字节偏移
fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(index, _)| index + 1))
}

/// 在给定偏移处切开文本（偏移须递增）
fn split_at<'a>(text: &'a str, cuts: &[usize]) -> impl Iterator<Item = &'a str> + 'a {
    let bounds: Vec<usize> = std::iter::once(0)
        .chain(cuts.iter().copied())
        .chain(std::iter::once(text.len()))
        .collect();
    (0..bounds.len() - 1).map(move |i| &text[bounds[i]..bounds[i + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_foreign_words(source: &str, clauses: &[String]) {
        let words: HashSet<&str> = source.split_whitespace().collect();
        for clause in clauses {
            for word in clause.split_whitespace() {
                assert!(words.contains(word), "'{}' 不在原文中", word);
            }
        }
    }

    #[test]
    fn test_numbered_example_splits_into_two() {
        let text = "1. Payment Terms\nPayment shall be made within 30 days.\n2. Termination\nEither party may terminate with notice.";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Numbered);
        assert_eq!(
            result.clauses,
            vec![
                "1. Payment Terms\nPayment shall be made within 30 days.".to_string(),
                "2. Termination\nEither party may terminate with notice.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_and_short_inputs() {
        assert!(segment("").is_empty());
        assert!(segment("  \n\t ").is_empty());

        let result = segment_with_strategy("short");
        assert_eq!(result.strategy, Strategy::Fallback);
        assert_eq!(result.clauses, vec!["short".to_string()]);
    }

    #[test]
    fn test_single_numbered_clause_falls_back() {
        let text = "  1. The whole agreement is just this single sentence here.  ";
        let result = segment_with_strategy(text);
        assert_eq!(result.strategy, Strategy::Fallback);
        assert_eq!(result.clauses, vec![text.trim().to_string()]);
    }

    #[test]
    fn test_decimal_subsection_merges_into_parent() {
        let text = "1. Services\n\
                    The Provider shall provide the services described in Schedule A.\n\
                    1.1. The services include hosting and maintenance of the platform.\n\
                    2. Fees\n\
                    The Customer shall pay the fees set out in the order form within 30 days.";
        let clauses = segment(text);

        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].starts_with("1. Services"));
        assert!(clauses[0].contains("\n\n1.1. The services include hosting"));
        assert!(clauses[1].starts_with("2. Fees"));
    }

    #[test]
    fn test_decimal_subsection_without_parent_stays_separate() {
        let text = "1. Services\n\
                    The Provider shall provide the services described in Schedule A.\n\
                    2.1. The Customer shall pay the fees set out in the order form.";
        let clauses = segment(text);

        assert_eq!(clauses.len(), 2);
        assert!(clauses[1].starts_with("2.1."));
    }

    #[test]
    fn test_lettered_items_merge_into_numbered_clause() {
        let text = "1. Obligations of the Supplier\n\
                    The Supplier shall:\n\
                    (a) deliver the goods on time and in good condition;\n\
                    (b) provide all necessary documentation to the Buyer;\n\
                    2. Obligations of the Buyer\n\
                    The Buyer shall pay the purchase price upon delivery of the goods.";
        let clauses = segment(text);

        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].contains("(a) deliver the goods"));
        assert!(clauses[0].contains("(b) provide all necessary documentation"));
        assert!(clauses[1].starts_with("2. Obligations of the Buyer"));
    }

    #[test]
    fn test_stray_fragment_is_appended_to_previous() {
        let text = "1. Definitions and interpretation of the terms used herein apply.\n\
                    2. Reserved\n\
                    3. Assignment\n\
                    Neither party may assign this Agreement without prior written consent.";
        let clauses = segment(text);

        assert_eq!(clauses.len(), 2);
        assert_eq!(
            clauses[0],
            "1. Definitions and interpretation of the terms used herein apply. 2. Reserved"
        );
        assert!(clauses[1].starts_with("3. Assignment"));
    }

    #[test]
    fn test_duplicate_fingerprints_keep_first() {
        let clause_a = "A. The Supplier warrants that the goods are free from defects in material and workmanship.";
        let clause_b = "B. The Buyer shall notify the Supplier of any defect within ten days of discovery.";
        let text = format!("{clause_a}\n{clause_a}\n{clause_b}");
        let clauses = segment(&text);

        assert_eq!(clauses, vec![clause_a.to_string(), clause_b.to_string()]);
    }

    #[test]
    fn test_short_leading_fragment_is_dropped() {
        let text = "A. Short intro\n\
                    B. The Licensee shall not sublicense the software to any third party.\n\
                    C. The Licensor may audit the Licensee's use of the software once per year.";
        let clauses = segment(text);

        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].starts_with("B. The Licensee"));
        assert!(clauses[1].starts_with("C. The Licensor"));
    }

    #[test]
    fn test_roman_numeral_articles() {
        let text = "ARTICLE I\nDEFINITIONS\nTerms used in this agreement have the meanings given below.\n\
                    ARTICLE II\nTERM\nThe agreement lasts for one year from signature.";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Numbered);
        assert_eq!(result.clauses.len(), 2);
        assert!(result.clauses[1].starts_with("ARTICLE II"));
    }

    #[test]
    fn test_headings_become_their_own_fragments() {
        let text = "CONFIDENTIALITY OBLIGATIONS\n\
                    Each party shall keep the other party's information secret.\n\
                    GOVERNING LAW\n\
                    This agreement is governed by the laws of England.";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Headings);
        assert_eq!(
            result.clauses,
            vec![
                "CONFIDENTIALITY OBLIGATIONS",
                "Each party shall keep the other party's information secret.",
                "GOVERNING LAW",
                "This agreement is governed by the laws of England.",
            ]
        );
    }

    #[test]
    fn test_heading_punctuation_is_dropped() {
        let text = "Payment Terms:\n\
                    The Buyer shall pay every invoice within thirty days.\n\
                    Notices.\n\
                    Sent by post.";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Headings);
        // "Notices." 只有一个词，不算标题
        assert_eq!(
            result.clauses,
            vec![
                "Payment Terms",
                "The Buyer shall pay every invoice within thirty days.\nNotices.\nSent by post.",
            ]
        );
    }

    #[test]
    fn test_single_heading_with_body_is_enough() {
        let text = "Payment Terms\n\nThe Buyer shall pay all invoices promptly.\n\nReserved";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Headings);
        assert_eq!(
            result.clauses,
            vec![
                "Payment Terms",
                "The Buyer shall pay all invoices promptly.\n\nReserved",
            ]
        );
    }

    #[test]
    fn test_paragraphs_merge_continuations() {
        let text = "This agreement is made between Alpha Ltd and Beta LLC on the date below.\n\n\
                    It is entered into for the purposes described in the recitals.\n\n\
                    Section One covers the services that Alpha will provide to Beta.\n\n\
                    Those services are limited to consulting and training only.";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::Paragraphs);
        assert_eq!(result.clauses.len(), 2);
        assert!(result.clauses[0].ends_with("described in the recitals."));
        assert!(result.clauses[1].starts_with("Section One covers"));
        assert!(result.clauses[1].contains("\n\nThose services"));
    }

    #[test]
    fn test_line_start_heuristic() {
        let text = "The Supplier agrees to deliver the goods.\n\
                    delivery happens at the Buyer's warehouse\n\
                    on business days only\n\
                    The Buyer agrees to inspect the goods promptly.\n\
                    any defects must be reported in writing\n\
                    within five days of delivery";
        let result = segment_with_strategy(text);

        assert_eq!(result.strategy, Strategy::LineStarts);
        assert_eq!(result.clauses.len(), 2);
        assert!(result.clauses[0].ends_with("on business days only"));
        assert!(result.clauses[1].ends_with("within five days of delivery"));
    }

    #[test]
    fn test_output_is_trimmed_non_empty_and_from_source() {
        let samples = [
            "1. Payment Terms\nPayment shall be made within 30 days.\n2. Termination\nEither party may terminate with notice.",
            "PRELIMINARY MATTERS\nThe parties are named below.\n\nSection 1\nThe seller sells.\n\n(a) goods\n(b) services of every kind and description",
            "line one\nline two\n\n\n\nline three is a bit longer than the others\n",
            "Article IV Confidentiality.\nNo disclosure is permitted at all.\nArticle V Term.\nThis lasts for two full years from signature.",
        ];
        for sample in samples {
            let clauses = segment(sample);
            assert!(!clauses.is_empty());
            for clause in &clauses {
                assert!(!clause.is_empty());
                assert_eq!(clause.trim(), clause);
            }
            assert_no_foreign_words(sample, &clauses);
        }
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let text = "1. Überweisung — die Zahlung erfolgt binnen dreißig Tagen nach Rechnungsstellung.\n\
                    2. Kündigung — jede Partei kann mit einer Frist von drei Monaten kündigen.";
        let clauses = segment(text);
        assert_eq!(clauses.len(), 2);
    }

    #[test]
    fn test_opens_with_number() {
        assert!(opens_with_number("1. Services", "1"));
        assert!(opens_with_number("1) Services", "1"));
        assert!(!opens_with_number("10. Services", "1"));
        assert!(!opens_with_number("1.Services", "1"));
    }
}
