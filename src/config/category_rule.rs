// ==========================================
// 站台股道分配 - 类别规则配置
// ==========================================
// 职责: 每个列车类别的硬性排除规则与站台长度策略
// 兼容: 接受历史字段名 (allow_bis / *_track_number / deny_track_*)
// ==========================================

use crate::engine::track_name::parse_track_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 类别规则
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRuleConfig {
    /// 是否允许孪生 (BIS) 股道
    #[serde(default, alias = "allow_bis")]
    pub allow_twin_suffix: bool,

    /// 是否允许无站台股道(按功能容量判定)
    #[serde(default)]
    pub allow_no_platform: bool,

    /// 硬性序号区间下限
    #[serde(default, alias = "min_track_number")]
    pub min_ordinal: Option<u32>,

    /// 硬性序号区间上限
    #[serde(default, alias = "max_track_number")]
    pub max_ordinal: Option<u32>,

    /// 优先序号区间下限
    #[serde(default, alias = "preferred_min_track_number")]
    pub preferred_min_ordinal: Option<u32>,

    /// 优先序号区间上限
    #[serde(default, alias = "preferred_max_track_number")]
    pub preferred_max_ordinal: Option<u32>,

    /// 禁用股道名称(规范化名称)
    #[serde(default, alias = "deny_track_names")]
    pub deny_names: BTreeSet<String>,

    /// 禁用名称子串
    #[serde(default, alias = "deny_track_patterns")]
    pub deny_patterns: Vec<String>,

    /// 禁用序号
    #[serde(default, alias = "deny_track_numbers")]
    pub deny_ordinals: BTreeSet<u32>,
}

impl CategoryRuleConfig {
    /// 优先区间 (两端均配置时才生效)
    pub fn preferred_band(&self) -> Option<(u32, u32)> {
        match (self.preferred_min_ordinal, self.preferred_max_ordinal) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// 序号是否落在硬性区间之外
    pub fn is_outside_hard_band(&self, ordinal: u32) -> bool {
        if let Some(min) = self.min_ordinal {
            if ordinal < min {
                return true;
            }
        }
        if let Some(max) = self.max_ordinal {
            if ordinal > max {
                return true;
            }
        }
        false
    }

    /// 规范化禁用名称并去重禁用子串(保留首次出现顺序)
    pub fn normalized(mut self) -> Self {
        self.deny_names = self
            .deny_names
            .iter()
            .map(|name| parse_track_name(name).normalized)
            .filter(|name| !name.is_empty())
            .collect();

        let mut seen = BTreeSet::new();
        self.deny_patterns = self
            .deny_patterns
            .into_iter()
            .map(|p| p.to_uppercase())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();
        self
    }

    /// 校验区间配置
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_ordinal, self.max_ordinal) {
            if min > max {
                return Err(format!("min_ordinal={} > max_ordinal={}", min, max));
            }
        }
        if let Some((min, max)) = self.preferred_band() {
            if min > max {
                return Err(format!(
                    "preferred_min_ordinal={} > preferred_max_ordinal={}",
                    min, max
                ));
            }
        }
        Ok(())
    }

    // ==========================================
    // 内置默认规则
    // ==========================================

    /// 内置规则表: default / INV / PRM / ES* / LH
    pub fn builtin_defaults() -> BTreeMap<String, CategoryRuleConfig> {
        let mut rules = BTreeMap::new();

        rules.insert("default".to_string(), CategoryRuleConfig::default());

        // 检修/回送车: 允许孪生股道与无站台股道
        rules.insert(
            "INV".to_string(),
            CategoryRuleConfig {
                allow_twin_suffix: true,
                allow_no_platform: true,
                ..CategoryRuleConfig::default()
            },
        );

        // 无障碍列车: 禁止北侧股道
        rules.insert(
            "PRM".to_string(),
            CategoryRuleConfig {
                deny_names: BTreeSet::from(["I NORD".to_string()]),
                deny_patterns: vec![" NORD".to_string()],
                ..CategoryRuleConfig::default()
            },
        );

        rules.insert(
            "ES*".to_string(),
            CategoryRuleConfig {
                deny_ordinals: BTreeSet::from([15]),
                ..CategoryRuleConfig::default()
            },
        );

        // 长途: 硬性 1-14,优先 2-13
        rules.insert(
            "LH".to_string(),
            CategoryRuleConfig {
                min_ordinal: Some(1),
                max_ordinal: Some(14),
                preferred_min_ordinal: Some(2),
                preferred_max_ordinal: Some(13),
                ..CategoryRuleConfig::default()
            },
        );

        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{
            "allow_bis": true,
            "min_track_number": 1,
            "max_track_number": 14,
            "deny_track_names": ["I NORD"],
            "deny_track_patterns": [" NORD"],
            "deny_track_numbers": [15]
        }"#;
        let rule: CategoryRuleConfig = serde_json::from_str(json).unwrap();
        assert!(rule.allow_twin_suffix);
        assert!(!rule.allow_no_platform);
        assert_eq!(rule.min_ordinal, Some(1));
        assert_eq!(rule.max_ordinal, Some(14));
        assert!(rule.deny_names.contains("I NORD"));
        assert!(rule.deny_ordinals.contains(&15));
    }

    #[test]
    fn test_preferred_band_requires_both_ends() {
        let rule = CategoryRuleConfig {
            preferred_min_ordinal: Some(2),
            ..CategoryRuleConfig::default()
        };
        assert!(rule.preferred_band().is_none());
    }

    #[test]
    fn test_hard_band() {
        let rule = &CategoryRuleConfig::builtin_defaults()["LH"];
        assert!(rule.is_outside_hard_band(0));
        assert!(!rule.is_outside_hard_band(1));
        assert!(!rule.is_outside_hard_band(14));
        assert!(rule.is_outside_hard_band(15));
    }

    #[test]
    fn test_normalized_dedupes_patterns() {
        let rule = CategoryRuleConfig {
            deny_names: BTreeSet::from(["  i   nord ".to_string()]),
            deny_patterns: vec![" nord".to_string(), " NORD".to_string(), "".to_string()],
            ..CategoryRuleConfig::default()
        }
        .normalized();
        assert!(rule.deny_names.contains("I NORD"));
        assert_eq!(rule.deny_patterns, vec![" NORD".to_string()]);
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let rule = CategoryRuleConfig {
            min_ordinal: Some(10),
            max_ordinal: Some(2),
            ..CategoryRuleConfig::default()
        };
        assert!(rule.validate().is_err());
        assert!(CategoryRuleConfig::default().validate().is_ok());
    }
}
