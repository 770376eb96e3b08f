// ==========================================
// 站台股道分配 - 候选评分
// ==========================================
// 职责: 为每条可行股道计算全部评分维度
// 输入: 股道元数据 + 类别规则 + 排序配置 + 计划股道
// 输出: CandidateRecord
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::config::priority_config::PriorityConfig;
use crate::domain::candidate::CandidateRecord;
use crate::domain::track::TrackMetadata;
use crate::domain::types::{PriorityTier, Proximity, SortOrdinal};
use crate::engine::planned_track::PlannedTrack;

pub struct CandidateScorer<'a> {
    rule: &'a CategoryRuleConfig,
    priority: &'a PriorityConfig,
    planned: Option<&'a PlannedTrack>,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(
        rule: &'a CategoryRuleConfig,
        priority: &'a PriorityConfig,
        planned: Option<&'a PlannedTrack>,
    ) -> Self {
        Self {
            rule,
            priority,
            planned,
        }
    }

    pub fn score(&self, name: &str, meta: &TrackMetadata) -> CandidateRecord {
        let planned_info = self.planned.and_then(|p| p.info);

        let same_number_bonus = match self.planned {
            Some(p) if p.is_twin_of(meta.ordinal, &meta.suffix) => self.priority.same_number_bonus,
            _ => 0.0,
        };

        // 计划股道站台长度未知或为 0 时长度差为 0
        let length_delta = match planned_info {
            Some(info) if info.platform_length > 0 => info.platform_length.abs_diff(meta.platform_length),
            _ => 0,
        };

        CandidateRecord {
            name: name.to_string(),
            priority_tier: self.priority_tier(meta.ordinal),
            proximity: self.proximity(meta),
            similarity: self.similarity(meta),
            same_number_bonus,
            length_delta,
            sort_ordinal: SortOrdinal::from_ordinal(meta.ordinal),
            suffix: meta.suffix.clone(),
            platform_length: meta.platform_length,
            functional_capacity: meta.functional_capacity,
            profile: meta.profile,
        }
    }

    /// 优先档位
    ///
    /// # 规则
    /// 1. 序号不可解析 → Preferred
    /// 2. 超出硬性区间 → Secondary
    /// 3. 配置了完整优先区间 → 区间内 Preferred,否则 Secondary
    /// 4. 其他 → Preferred
    pub fn priority_tier(&self, ordinal: Option<u32>) -> PriorityTier {
        let Some(ordinal) = ordinal else {
            return PriorityTier::Preferred;
        };

        if self.rule.is_outside_hard_band(ordinal) {
            return PriorityTier::Secondary;
        }

        match self.rule.preferred_band() {
            Some((min, max)) if !(min..=max).contains(&ordinal) => PriorityTier::Secondary,
            _ => PriorityTier::Preferred,
        }
    }

    /// 与计划股道的邻近度
    pub fn proximity(&self, meta: &TrackMetadata) -> Proximity {
        let Some(planned) = self.planned else {
            return Proximity::Incomparable;
        };

        match (meta.ordinal, planned.ordinal) {
            (Some(candidate), Some(target)) => {
                if candidate == target && meta.suffix != planned.suffix {
                    Proximity::Distance(1)
                } else {
                    Proximity::Distance(candidate.abs_diff(target))
                }
            }
            _ => Proximity::Incomparable,
        }
    }

    /// 与计划股道的相似度 (0-3)
    ///
    /// - 站台长度相同且 > 0: +2
    /// - (高站台, 低站台) 剖面相同: +1
    pub fn similarity(&self, meta: &TrackMetadata) -> u8 {
        let Some(info) = self.planned.and_then(|p| p.info) else {
            return 0;
        };

        let mut score = 0;
        if meta.platform_length > 0 && meta.platform_length == info.platform_length {
            score += 2;
        }
        if meta.profile == info.profile {
            score += 1;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PlatformProfile;
    use crate::engine::planned_track::PlannedTrackInfo;

    fn meta(ordinal: Option<u32>, suffix: &str, length: u32, high: bool) -> TrackMetadata {
        TrackMetadata {
            ordinal,
            suffix: suffix.to_string(),
            platform_length: length,
            functional_capacity: 0,
            profile: PlatformProfile { high, low: false },
        }
    }

    fn planned_v() -> PlannedTrack {
        PlannedTrack {
            ordinal: Some(5),
            suffix: String::new(),
            normalized_name: "V".to_string(),
            info: Some(PlannedTrackInfo {
                platform_length: 300,
                profile: PlatformProfile {
                    high: true,
                    low: false,
                },
            }),
        }
    }

    #[test]
    fn test_twin_candidate() {
        let rule = CategoryRuleConfig::default();
        let priority = PriorityConfig::default();
        let planned = planned_v();
        let scorer = CandidateScorer::new(&rule, &priority, Some(&planned));

        let record = scorer.score("V BIS", &meta(Some(5), "BIS", 280, false));
        assert_eq!(record.proximity, Proximity::Distance(1));
        assert_eq!(record.same_number_bonus, -1.0);
        assert_eq!(record.similarity, 0);
        assert_eq!(record.length_delta, 20);
        assert!(record.has_suffix());
    }

    #[test]
    fn test_similarity_and_distance() {
        let rule = CategoryRuleConfig::default();
        let priority = PriorityConfig::default();
        let planned = planned_v();
        let scorer = CandidateScorer::new(&rule, &priority, Some(&planned));

        let record = scorer.score("VIII", &meta(Some(8), "", 300, true));
        assert_eq!(record.proximity, Proximity::Distance(3));
        assert_eq!(record.similarity, 3);
        assert_eq!(record.same_number_bonus, 0.0);
        assert_eq!(record.length_delta, 0);

        let record = scorer.score("DEP", &meta(None, "", 300, false));
        assert_eq!(record.proximity, Proximity::Incomparable);
        assert_eq!(record.sort_ordinal, SortOrdinal::NonNumeric);
        assert_eq!(record.similarity, 2);
    }

    #[test]
    fn test_no_planned_track_disables_relative_scores() {
        let rule = CategoryRuleConfig::default();
        let priority = PriorityConfig::default();
        let scorer = CandidateScorer::new(&rule, &priority, None);

        let record = scorer.score("II", &meta(Some(2), "", 250, true));
        assert_eq!(record.proximity, Proximity::Incomparable);
        assert_eq!(record.similarity, 0);
        assert_eq!(record.length_delta, 0);
        assert_eq!(record.same_number_bonus, 0.0);
    }

    #[test]
    fn test_priority_tier() {
        let rule = CategoryRuleConfig::builtin_defaults()["LH"].clone();
        let priority = PriorityConfig::default();
        let scorer = CandidateScorer::new(&rule, &priority, None);

        assert_eq!(scorer.priority_tier(Some(1)), PriorityTier::Secondary);
        assert_eq!(scorer.priority_tier(Some(2)), PriorityTier::Preferred);
        assert_eq!(scorer.priority_tier(Some(13)), PriorityTier::Preferred);
        assert_eq!(scorer.priority_tier(Some(14)), PriorityTier::Secondary);
        assert_eq!(scorer.priority_tier(None), PriorityTier::Preferred);

        let rule = CategoryRuleConfig {
            min_ordinal: Some(3),
            ..CategoryRuleConfig::default()
        };
        let scorer = CandidateScorer::new(&rule, &priority, None);
        assert_eq!(scorer.priority_tier(Some(2)), PriorityTier::Secondary);
        assert_eq!(scorer.priority_tier(Some(20)), PriorityTier::Preferred);
    }
}
