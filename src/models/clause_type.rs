use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 条款类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClauseType {
    Indemnity,
    LimitationOfLiability,
    LiabilityExclusion,
    Termination,
    Confidentiality,
    GoverningLaw,
    DisputeResolution,
    Warranty,
    Insurance,
    Payment,
    IntellectualProperty,
    NonCompete,
    ForceMajeure,
    /// 兜底类型
    #[default]
    General,
}

static LABELS: phf::Map<&'static str, ClauseType> = phf::phf_map! {
    "Indemnity" => ClauseType::Indemnity,
    "Limitation of Liability" => ClauseType::LimitationOfLiability,
    "Liability Exclusion" => ClauseType::LiabilityExclusion,
    "Termination" => ClauseType::Termination,
    "Confidentiality" => ClauseType::Confidentiality,
    "Governing Law" => ClauseType::GoverningLaw,
    "Dispute Resolution" => ClauseType::DisputeResolution,
    "Warranty" => ClauseType::Warranty,
    "Insurance" => ClauseType::Insurance,
    "Payment" => ClauseType::Payment,
    "Intellectual Property" => ClauseType::IntellectualProperty,
    "Non-Compete" => ClauseType::NonCompete,
    "Force Majeure" => ClauseType::ForceMajeure,
    "General" => ClauseType::General,
};

impl ClauseType {
    /// 对外展示的标签
    pub fn label(self) -> &'static str {
        match self {
            ClauseType::Indemnity => "Indemnity",
            ClauseType::LimitationOfLiability => "Limitation of Liability",
            ClauseType::LiabilityExclusion => "Liability Exclusion",
            ClauseType::Termination => "Termination",
            ClauseType::Confidentiality => "Confidentiality",
            ClauseType::GoverningLaw => "Governing Law",
            ClauseType::DisputeResolution => "Dispute Resolution",
            ClauseType::Warranty => "Warranty",
            ClauseType::Insurance => "Insurance",
            ClauseType::Payment => "Payment",
            ClauseType::IntellectualProperty => "Intellectual Property",
            ClauseType::NonCompete => "Non-Compete",
            ClauseType::ForceMajeure => "Force Majeure",
            ClauseType::General => "General",
        }
    }

    /// 从标签解析（精确匹配）
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS.get(label.trim()).copied()
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ClauseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 客户端回传的未知标签按 General 处理
impl<'de> Deserialize<'de> for ClauseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trips_through_lookup() {
        for ty in [
            ClauseType::Indemnity,
            ClauseType::LimitationOfLiability,
            ClauseType::NonCompete,
            ClauseType::General,
        ] {
            assert_eq!(ClauseType::from_label(ty.label()), Some(ty));
        }
        assert_eq!(ClauseType::from_label("Severability"), None);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ClauseType::ForceMajeure).unwrap();
        assert_eq!(json, "\"Force Majeure\"");
    }

    #[test]
    fn test_unknown_label_deserializes_as_general() {
        let ty: ClauseType = serde_json::from_str("\"Entire Agreement\"").unwrap();
        assert_eq!(ty, ClauseType::General);
        let ty: ClauseType = serde_json::from_str("\"Governing Law\"").unwrap();
        assert_eq!(ty, ClauseType::GoverningLaw);
    }
}
