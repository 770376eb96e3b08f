// ==========================================
// 站台股道分配 - 股道选择引擎
// ==========================================
// 职责: 串联元数据构建 → 计划股道解析 → 过滤 → 评分 → 排序 → 说明
// 输入: 列车请求 + 股道清单 + 已解析的类别规则与排序配置
// 输出: 至多 MAX_ALTERNATIVES 条带说明的建议股道
// 红线: 无共享状态、无 I/O;数据质量问题只告警
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::config::priority_config::PriorityConfig;
use crate::domain::track::Inventory;
use crate::domain::train::{SuggestedTrack, TrainRequest};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::feasibility::FeasibilityFilter;
use crate::engine::justification::JustificationGenerator;
use crate::engine::metadata::build_track_metadata;
use crate::engine::planned_track::{validate_planned_track, PlannedTrackResolver};
use crate::engine::ranker::Ranker;
use crate::engine::scoring::CandidateScorer;

/// 建议股道数量上限
pub const MAX_ALTERNATIVES: usize = 7;

// ==========================================
// TrackSelector
// ==========================================
pub struct TrackSelector<'a> {
    rule: &'a CategoryRuleConfig,
    priority: &'a PriorityConfig,
    locale: &'a str,
}

impl<'a> TrackSelector<'a> {
    pub fn new(rule: &'a CategoryRuleConfig, priority: &'a PriorityConfig, locale: &'a str) -> Self {
        Self {
            rule,
            priority,
            locale,
        }
    }

    /// 为单列车选择可用股道
    ///
    /// # 返回
    /// - Err(Validation): 列车长度非正,或计划股道格式错误
    /// - Err(Configuration): 股道清单无有效股道
    pub fn select(
        &self,
        train: &TrainRequest,
        inventory: &Inventory,
    ) -> EngineResult<Vec<SuggestedTrack>> {
        let train_length_m = validated_train_length(train)?;
        if let Some(reference) = train.planned_track.as_deref() {
            validate_planned_track(reference)?;
        }

        let metadata = build_track_metadata(inventory)?;
        let planned =
            PlannedTrackResolver::new(&metadata, inventory).resolve(train.planned_track.as_deref());

        let filter = FeasibilityFilter::new(self.rule, planned.as_ref());
        let scorer = CandidateScorer::new(self.rule, self.priority, planned.as_ref());

        let mut candidates = Vec::new();
        for (name, meta) in &metadata {
            if let Some(reason) = filter.exclusion_reason(name, meta) {
                tracing::debug!(train = %train.train_code, track = %name, reason = %reason, "股道被排除");
                continue;
            }
            if !filter.meets_length(meta, train_length_m) {
                tracing::debug!(
                    train = %train.train_code,
                    track = %name,
                    platform_length = meta.platform_length,
                    functional_capacity = meta.functional_capacity,
                    "股道长度不足"
                );
                continue;
            }
            candidates.push(scorer.score(name, meta));
        }

        let feasible = candidates.len();
        let mut ranked = Ranker::new(self.priority).rank(candidates);
        ranked.truncate(MAX_ALTERNATIVES);

        let generator =
            JustificationGenerator::new(self.rule, planned.as_ref(), train_length_m, self.locale);
        let suggestions: Vec<SuggestedTrack> = ranked
            .iter()
            .map(|record| SuggestedTrack {
                track: record.name.clone(),
                reason: generator.reason(record),
            })
            .collect();

        tracing::info!(
            train = %train.train_code,
            category = %train.train_category,
            tracks = metadata.len(),
            feasible,
            returned = suggestions.len(),
            "股道选择完成"
        );
        Ok(suggestions)
    }
}

fn validated_train_length(train: &TrainRequest) -> EngineResult<u32> {
    if train.train_length_m <= 0 {
        return Err(EngineError::Validation(format!(
            "列车 {} 长度必须大于 0 (实际 {})",
            train.train_code, train.train_length_m
        )));
    }
    u32::try_from(train.train_length_m).map_err(|_| {
        EngineError::Validation(format!(
            "列车 {} 长度超出范围 (实际 {})",
            train.train_code, train.train_length_m
        ))
    })
}

/// 引擎入口
///
/// 类别规则或排序配置缺失时返回 Configuration 错误
pub fn select_tracks(
    train: &TrainRequest,
    inventory: &Inventory,
    rule: Option<&CategoryRuleConfig>,
    priority: Option<&PriorityConfig>,
    locale: &str,
) -> EngineResult<Vec<SuggestedTrack>> {
    validated_train_length(train)?;

    let (Some(rule), Some(priority)) = (rule, priority) else {
        return Err(EngineError::Configuration(format!(
            "类别 '{}' 缺少规则或排序配置",
            train.effective_category()
        )));
    };

    TrackSelector::new(rule, priority, locale).select(train, inventory)
}
