// ==========================================
// 站台股道分配 - 计划股道解析
// ==========================================
// 职责: 将用户给出的计划股道映射到元数据空间
// 降级: 未找到时仍保留序号/后缀(邻近度可用),相似度关闭
// ==========================================

use crate::domain::track::{Inventory, TrackMetadataMap};
use crate::domain::types::PlatformProfile;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::track_name::parse_track_name;
use std::collections::HashMap;

/// 计划股道引用的最大长度
pub const MAX_PLANNED_TRACK_LEN: usize = 64;

/// 计划股道的站台信息(用于相似度与长度差)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTrackInfo {
    pub platform_length: u32,
    pub profile: PlatformProfile,
}

/// 解析后的计划股道
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTrack {
    pub ordinal: Option<u32>,
    pub suffix: String,
    /// 解析后的规范化名称
    pub normalized_name: String,
    /// 清单中的记录;None 表示未找到
    pub info: Option<PlannedTrackInfo>,
}

impl PlannedTrack {
    /// 序号与后缀完全一致
    pub fn matches_exactly(&self, ordinal: Option<u32>, suffix: &str) -> bool {
        self.ordinal.is_some() && self.ordinal == ordinal && self.suffix == suffix
    }

    /// 同号不同后缀(孪生)
    pub fn is_twin_of(&self, ordinal: Option<u32>, suffix: &str) -> bool {
        self.ordinal.is_some() && self.ordinal == ordinal && self.suffix != suffix
    }
}

/// 校验计划股道引用格式
///
/// # 规则
/// - 长度不超过 MAX_PLANNED_TRACK_LEN 个字符
/// - 不含控制字符
pub fn validate_planned_track(reference: &str) -> EngineResult<()> {
    if reference.chars().count() > MAX_PLANNED_TRACK_LEN {
        return Err(EngineError::Validation(format!(
            "计划股道长度超过 {} 个字符",
            MAX_PLANNED_TRACK_LEN
        )));
    }
    // 空白类控制字符(制表符等)在解析时被折叠,不视为非法
    if reference
        .chars()
        .any(|c| c.is_control() && !c.is_whitespace())
    {
        return Err(EngineError::Validation(format!(
            "计划股道包含控制字符: {:?}",
            reference
        )));
    }
    Ok(())
}

// ==========================================
// PlannedTrackResolver
// ==========================================
pub struct PlannedTrackResolver<'a> {
    metadata: &'a TrackMetadataMap,
    inventory: &'a Inventory,
}

impl<'a> PlannedTrackResolver<'a> {
    pub fn new(metadata: &'a TrackMetadataMap, inventory: &'a Inventory) -> Self {
        Self {
            metadata,
            inventory,
        }
    }

    /// 解析计划股道
    ///
    /// # 规则
    /// 1. 缺失或仅空白 → None(关闭邻近度与相似度)
    /// 2. 以 (序号, 后缀) 在元数据中查找规范化名称,找不到则使用引用自身的规范化名称
    /// 3. 清单中无该名称的记录 → 告警,info 为 None
    pub fn resolve(&self, reference: Option<&str>) -> Option<PlannedTrack> {
        let reference = reference?;
        let parsed = parse_track_name(reference);
        if parsed.normalized.is_empty() {
            return None;
        }

        let index: HashMap<(Option<u32>, &str), &str> = self
            .metadata
            .iter()
            .map(|(name, meta)| ((meta.ordinal, meta.suffix.as_str()), name.as_str()))
            .collect();

        let normalized_name = index
            .get(&(parsed.ordinal, parsed.suffix.as_str()))
            .map(|name| name.to_string())
            .unwrap_or_else(|| parsed.normalized.clone());

        let info = self.lookup_info(&normalized_name);
        if info.is_none() {
            tracing::warn!(
                planned_track = %reference,
                resolved = %normalized_name,
                "计划股道不在股道清单中,相似度评分关闭"
            );
        }

        Some(PlannedTrack {
            ordinal: parsed.ordinal,
            suffix: parsed.suffix,
            normalized_name,
            info,
        })
    }

    /// 优先使用元数据;记录被构建器丢弃时回退到原始清单
    fn lookup_info(&self, normalized_name: &str) -> Option<PlannedTrackInfo> {
        if let Some(meta) = self.metadata.get(normalized_name) {
            return Some(PlannedTrackInfo {
                platform_length: meta.platform_length,
                profile: meta.profile,
            });
        }

        self.inventory
            .iter()
            .find(|(name, _)| parse_track_name(name).normalized == normalized_name)
            .map(|(_, record)| PlannedTrackInfo {
                platform_length: record.platform_length().unwrap_or(0),
                profile: record.profile(),
            })
    }
}
