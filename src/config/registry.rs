// ==========================================
// 站台股道分配 - 类别配置注册表
// ==========================================
// 职责: 内置默认表 + 覆写表,按固定回退链解析类别配置
// 回退链: 原始类别覆写 → 类别族覆写 → 类别族内置 → 全局内置 (default)
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::config::priority_config::PriorityConfig;
use crate::domain::train::normalize_category;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeMap, BTreeSet};

/// 全局默认类别键
pub const DEFAULT_CATEGORY: &str = "default";

/// 长途类别族
pub const LH_CATEGORIES: &[&str] = &[
    "LH", "EC", "EN", "IC", "ICN", "EXP", "NCL", "ES*", "FR", "FA", "FB", "NTV",
];

/// 内置规则表的键
const BUILTIN_RULE_KEYS: &[&str] = &[DEFAULT_CATEGORY, "INV", "PRM", "ES*", "LH"];

/// 类别 → 类别族键
///
/// # 规则
/// 1. 已是内置键 → 原样
/// 2. 长途族 → LH
/// 3. 以 ES 开头 → ES*
/// 4. PRM / INV → 原样
/// 5. 其他 → default
pub fn normalize_category_key(category: &str) -> String {
    let cat = normalize_category(category);

    if BUILTIN_RULE_KEYS.contains(&cat.as_str()) {
        return cat;
    }
    if LH_CATEGORIES.contains(&cat.as_str()) {
        return "LH".to_string();
    }
    if cat.starts_with("ES") {
        return "ES*".to_string();
    }
    match cat.as_str() {
        "PRM" | "INV" => cat,
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// 覆写表使用的类别键: 规范化,全局默认统一为小写 default
fn override_key(category: &str) -> String {
    let cat = normalize_category(category);
    if cat.eq_ignore_ascii_case(DEFAULT_CATEGORY) {
        DEFAULT_CATEGORY.to_string()
    } else {
        cat
    }
}

/// 某类别解析后的完整配置
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCategory {
    /// 规范化后的原始类别
    pub category: String,
    /// 类别族键
    pub family: String,
    pub rule: CategoryRuleConfig,
    pub priority: PriorityConfig,
}

// ==========================================
// CategoryRegistry - 类别配置注册表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    builtin_rules: BTreeMap<String, CategoryRuleConfig>,
    builtin_priorities: BTreeMap<String, PriorityConfig>,
    rule_overrides: BTreeMap<String, CategoryRuleConfig>,
    priority_overrides: BTreeMap<String, PriorityConfig>,
}

impl CategoryRegistry {
    /// 仅包含内置默认表
    pub fn builtin() -> Self {
        Self {
            builtin_rules: CategoryRuleConfig::builtin_defaults(),
            builtin_priorities: PriorityConfig::builtin_defaults(),
            rule_overrides: BTreeMap::new(),
            priority_overrides: BTreeMap::new(),
        }
    }

    /// 不含任何内置表(解析完全依赖覆写)
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置表 + 覆写表
    pub fn with_overrides(
        rule_overrides: BTreeMap<String, CategoryRuleConfig>,
        priority_overrides: BTreeMap<String, PriorityConfig>,
    ) -> Self {
        let mut registry = Self::builtin();
        for (category, rule) in rule_overrides {
            registry.set_rule_override(&category, rule);
        }
        for (category, priority) in priority_overrides {
            registry.set_priority_override(&category, priority);
        }
        registry
    }

    // ==========================================
    // 解析
    // ==========================================

    /// 解析类别规则
    pub fn resolve_rule(&self, category: &str) -> EngineResult<&CategoryRuleConfig> {
        let raw = override_key(category);
        let family = normalize_category_key(&raw);

        self.rule_overrides
            .get(&raw)
            .or_else(|| {
                if family != raw {
                    self.rule_overrides.get(&family)
                } else {
                    None
                }
            })
            .or_else(|| self.builtin_rules.get(&family))
            .ok_or_else(|| {
                EngineError::Configuration(format!(
                    "类别 '{}' (族 '{}') 无可用规则配置",
                    raw, family
                ))
            })
    }

    /// 解析排序配置
    pub fn resolve_priority(&self, category: &str) -> EngineResult<&PriorityConfig> {
        let raw = override_key(category);
        let family = normalize_category_key(&raw);

        self.priority_overrides
            .get(&raw)
            .or_else(|| {
                if family != raw {
                    self.priority_overrides.get(&family)
                } else {
                    None
                }
            })
            .or_else(|| self.builtin_priorities.get(&family))
            .or_else(|| self.builtin_priorities.get(DEFAULT_CATEGORY))
            .ok_or_else(|| {
                EngineError::Configuration(format!(
                    "类别 '{}' (族 '{}') 无可用排序配置",
                    raw, family
                ))
            })
    }

    /// 同时解析规则与排序
    pub fn resolve(&self, category: &str) -> EngineResult<ResolvedCategory> {
        let rule = self.resolve_rule(category)?.clone();
        let priority = self.resolve_priority(category)?.clone();
        let raw = override_key(category);
        Ok(ResolvedCategory {
            family: normalize_category_key(&raw),
            category: raw,
            rule,
            priority,
        })
    }

    // ==========================================
    // 覆写管理
    // ==========================================

    /// 写入前规范化禁用名称与子串
    pub fn set_rule_override(&mut self, category: &str, rule: CategoryRuleConfig) {
        self.rule_overrides
            .insert(override_key(category), rule.normalized());
    }

    pub fn remove_rule_override(&mut self, category: &str) -> Option<CategoryRuleConfig> {
        self.rule_overrides.remove(&override_key(category))
    }

    pub fn set_priority_override(&mut self, category: &str, priority: PriorityConfig) {
        self.priority_overrides
            .insert(override_key(category), priority);
    }

    pub fn remove_priority_override(&mut self, category: &str) -> Option<PriorityConfig> {
        self.priority_overrides.remove(&override_key(category))
    }

    pub fn has_rule_override(&self, category: &str) -> bool {
        self.rule_overrides.contains_key(&override_key(category))
    }

    pub fn has_priority_override(&self, category: &str) -> bool {
        self.priority_overrides
            .contains_key(&override_key(category))
    }

    pub fn rule_overrides(&self) -> &BTreeMap<String, CategoryRuleConfig> {
        &self.rule_overrides
    }

    pub fn priority_overrides(&self) -> &BTreeMap<String, PriorityConfig> {
        &self.priority_overrides
    }

    /// 全部已知类别(内置键 ∪ 覆写键),有序
    pub fn known_categories(&self) -> Vec<String> {
        let categories: BTreeSet<String> = self
            .builtin_rules
            .keys()
            .chain(self.builtin_priorities.keys())
            .chain(self.rule_overrides.keys())
            .chain(self.priority_overrides.keys())
            .cloned()
            .collect();
        categories.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::priority_config::CriterionKey;

    #[test]
    fn test_normalize_category_key() {
        assert_eq!(normalize_category_key("ic"), "LH");
        assert_eq!(normalize_category_key(" NTV "), "LH");
        assert_eq!(normalize_category_key("ES*"), "ES*");
        assert_eq!(normalize_category_key("ESAV"), "ES*");
        assert_eq!(normalize_category_key("PRM"), "PRM");
        assert_eq!(normalize_category_key("inv"), "INV");
        assert_eq!(normalize_category_key("REG"), "default");
        assert_eq!(normalize_category_key(""), "default");
    }

    #[test]
    fn test_family_default_applies_to_member() {
        let registry = CategoryRegistry::builtin();
        let rule = registry.resolve_rule("IC").unwrap();
        assert_eq!(rule.min_ordinal, Some(1));
        assert_eq!(rule.max_ordinal, Some(14));
    }

    #[test]
    fn test_priority_falls_back_to_global_default() {
        let registry = CategoryRegistry::builtin();
        let priority = registry.resolve_priority("LH").unwrap();
        assert_eq!(priority, &PriorityConfig::builtin_defaults()["default"]);

        let priority = registry.resolve_priority("INV").unwrap();
        assert_eq!(priority.criteria[0].key, CriterionKey::NoPlatformFirst);
    }

    #[test]
    fn test_exact_override_beats_family_override() {
        let mut registry = CategoryRegistry::builtin();
        registry.set_rule_override(
            "LH",
            CategoryRuleConfig {
                max_ordinal: Some(10),
                ..CategoryRuleConfig::default()
            },
        );
        registry.set_rule_override(
            "ic",
            CategoryRuleConfig {
                max_ordinal: Some(8),
                ..CategoryRuleConfig::default()
            },
        );

        assert_eq!(registry.resolve_rule("IC").unwrap().max_ordinal, Some(8));
        assert_eq!(registry.resolve_rule("EC").unwrap().max_ordinal, Some(10));
        assert_eq!(registry.resolve_rule("REG").unwrap().max_ordinal, None);
    }

    #[test]
    fn test_default_override_applies_to_unknown_categories() {
        let mut registry = CategoryRegistry::builtin();
        registry.set_rule_override(
            "DEFAULT",
            CategoryRuleConfig {
                allow_twin_suffix: true,
                ..CategoryRuleConfig::default()
            },
        );
        assert!(registry.has_rule_override("default"));
        assert!(registry.resolve_rule("REG").unwrap().allow_twin_suffix);
    }

    #[test]
    fn test_empty_registry_fails_with_configuration_error() {
        let registry = CategoryRegistry::empty();
        let err = registry.resolve("REG").unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_known_categories_sorted_and_unique() {
        let mut registry = CategoryRegistry::builtin();
        registry.set_priority_override("REG", PriorityConfig::default());
        let categories = registry.known_categories();
        assert_eq!(
            categories,
            vec!["ES*", "INV", "LH", "PRM", "REG", "default"]
        );
    }
}
