//! 条款类型分类
//!
//! 关键词子串匹配，按固定顺序检查，第一个命中的类型胜出。

use crate::models::ClauseType;

/// 类型 → 关键词（小写），顺序即优先级
pub static CLAUSE_TAXONOMY: [(ClauseType, &[&str]); 13] = [
    (
        ClauseType::Indemnity,
        &["indemnif", "indemnity", "hold harmless", "defend and indemnify"],
    ),
    (
        ClauseType::LimitationOfLiability,
        &[
            "limitation of liability",
            "limit of liability",
            "liability cap",
            "maximum liability",
            "cap on damages",
        ],
    ),
    (
        ClauseType::LiabilityExclusion,
        &[
            "exclusion of liability",
            "exclude liability",
            "not liable",
            "no liability",
            "disclaim",
        ],
    ),
    (
        ClauseType::Termination,
        &[
            "termination",
            "terminate",
            "terminates",
            "early termination",
            "term of this agreement",
        ],
    ),
    (
        ClauseType::Confidentiality,
        &[
            "confidential",
            "confidentiality",
            "non-disclosure",
            "proprietary information",
        ],
    ),
    (
        ClauseType::GoverningLaw,
        &["governing law", "choice of law", "laws of the", "jurisdiction"],
    ),
    (
        ClauseType::DisputeResolution,
        &[
            "arbitration",
            "arbitrate",
            "dispute resolution",
            "mediation",
            "litigation",
        ],
    ),
    (
        ClauseType::Warranty,
        &["warranty", "warrant", "warranties", "as is", "as-is"],
    ),
    (
        ClauseType::Insurance,
        &["insurance", "insure", "insured", "coverage", "policy"],
    ),
    (
        ClauseType::Payment,
        &["payment", "payable", "invoice", "fee", "consideration"],
    ),
    (
        ClauseType::IntellectualProperty,
        &[
            "intellectual property",
            "ip rights",
            "patent",
            "copyright",
            "trademark",
            "license",
        ],
    ),
    (
        ClauseType::NonCompete,
        &["non-compete", "non compete", "non-solicit", "non solicit"],
    ),
    (
        ClauseType::ForceMajeure,
        &["force majeure", "act of god", "beyond reasonable control"],
    ),
];

/// 给条款分类；没有任何关键词命中时返回 `General`
///
/// 匹配是不区分大小写的子串包含，不考虑词边界（"unwarranted" 也会命中 Warranty）。
pub fn classify(clause_text: &str) -> ClauseType {
    let lower = clause_text.to_lowercase();
    CLAUSE_TAXONOMY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(clause_type, _)| *clause_type)
        .unwrap_or_default()
}
