// ==========================================
// 站台股道分配 - 可行性过滤
// ==========================================
// 职责: 硬性排除规则 + 站台长度/功能容量判定
// 红线: 纯函数,排除规则按固定顺序评估,首个命中即返回
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::domain::track::TrackMetadata;
use crate::engine::planned_track::PlannedTrack;
use crate::engine::track_name::{is_non_assignable, TWIN_SUFFIX};
use std::fmt;

/// 排除原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    NonAssignable,
    PlannedTrack,
    TwinNotAllowed,
    OutsideHardBand { ordinal: u32 },
    DeniedOrdinal { ordinal: u32 },
    DeniedName,
    DeniedPattern { pattern: String },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::NonAssignable => write!(f, "全局不可分配股道"),
            ExclusionReason::PlannedTrack => write!(f, "计划股道自身"),
            ExclusionReason::TwinNotAllowed => write!(f, "类别不允许孪生股道"),
            ExclusionReason::OutsideHardBand { ordinal } => {
                write!(f, "序号 {} 超出硬性区间", ordinal)
            }
            ExclusionReason::DeniedOrdinal { ordinal } => write!(f, "序号 {} 被禁用", ordinal),
            ExclusionReason::DeniedName => write!(f, "名称被禁用"),
            ExclusionReason::DeniedPattern { pattern } => {
                write!(f, "名称包含禁用子串 '{}'", pattern)
            }
        }
    }
}

// ==========================================
// FeasibilityFilter
// ==========================================
pub struct FeasibilityFilter<'a> {
    rule: &'a CategoryRuleConfig,
    planned: Option<&'a PlannedTrack>,
}

impl<'a> FeasibilityFilter<'a> {
    pub fn new(rule: &'a CategoryRuleConfig, planned: Option<&'a PlannedTrack>) -> Self {
        Self { rule, planned }
    }

    /// 判定排除原因
    ///
    /// # 规则 (首个命中即返回)
    /// 1. 全局不可分配股道
    /// 2. 计划股道自身 (序号+后缀一致,或规范化名称一致)
    /// 3. 孪生股道且类别不允许
    /// 4. 序号超出硬性区间
    /// 5. 序号在禁用集合中
    /// 6. 名称在禁用名称集合中
    /// 7. 名称包含禁用子串
    pub fn exclusion_reason(&self, name: &str, meta: &TrackMetadata) -> Option<ExclusionReason> {
        if is_non_assignable(name) {
            return Some(ExclusionReason::NonAssignable);
        }

        if let Some(planned) = self.planned {
            if planned.matches_exactly(meta.ordinal, &meta.suffix)
                || planned.normalized_name == name
            {
                return Some(ExclusionReason::PlannedTrack);
            }
        }

        if meta.suffix == TWIN_SUFFIX && !self.rule.allow_twin_suffix {
            return Some(ExclusionReason::TwinNotAllowed);
        }

        if let Some(ordinal) = meta.ordinal {
            if self.rule.is_outside_hard_band(ordinal) {
                return Some(ExclusionReason::OutsideHardBand { ordinal });
            }
            if self.rule.deny_ordinals.contains(&ordinal) {
                return Some(ExclusionReason::DeniedOrdinal { ordinal });
            }
        }

        if self.rule.deny_names.contains(name) {
            return Some(ExclusionReason::DeniedName);
        }

        self.rule
            .deny_patterns
            .iter()
            .find(|pattern| !pattern.is_empty() && name.contains(pattern.as_str()))
            .map(|pattern| ExclusionReason::DeniedPattern {
                pattern: pattern.clone(),
            })
    }

    pub fn is_excluded(&self, name: &str, meta: &TrackMetadata) -> bool {
        self.exclusion_reason(name, meta).is_some()
    }

    /// 站台长度/功能容量判定
    ///
    /// # 规则
    /// - 不允许无站台: 站台长度须 > 0 且 >= 列车长度
    /// - 允许无站台: 功能容量 > 0 时按容量判定;否则站台长度 > 0 时按站台判定;否则直接通过
    pub fn meets_length(&self, meta: &TrackMetadata, train_length_m: u32) -> bool {
        meets_length(meta, train_length_m, self.rule)
    }
}

/// 站台长度/功能容量判定(无计划股道上下文)
pub fn meets_length(meta: &TrackMetadata, train_length_m: u32, rule: &CategoryRuleConfig) -> bool {
    if !rule.allow_no_platform {
        return meta.platform_length > 0 && meta.platform_length >= train_length_m;
    }

    if meta.functional_capacity > 0 {
        return meta.functional_capacity >= train_length_m;
    }
    if meta.platform_length > 0 {
        return meta.platform_length >= train_length_m;
    }
    true
}
