// ==========================================
// 站台股道分配 - 候选记录
// ==========================================
// 生命周期: 评分时构造,排序与说明生成后即丢弃,不持久化
// ==========================================

use crate::domain::types::{PlatformProfile, PriorityTier, Proximity, SortOrdinal};

/// 单条可行股道的全部评分维度
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    /// 规范化股道名称
    pub name: String,
    pub priority_tier: PriorityTier,
    pub proximity: Proximity,
    /// 与计划股道的相似度 (0-3)
    pub similarity: u8,
    /// 同号孪生奖励 (0 或配置值,通常为负)
    pub same_number_bonus: f64,
    /// 与计划股道站台长度之差的绝对值
    pub length_delta: u32,
    pub sort_ordinal: SortOrdinal,
    pub suffix: String,
    pub platform_length: u32,
    pub functional_capacity: u32,
    pub profile: PlatformProfile,
}

impl CandidateRecord {
    pub fn ordinal(&self) -> Option<u32> {
        self.sort_ordinal.value()
    }

    pub fn has_suffix(&self) -> bool {
        !self.suffix.is_empty()
    }
}
