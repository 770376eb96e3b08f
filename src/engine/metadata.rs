// ==========================================
// 站台股道分配 - 股道元数据构建
// ==========================================
// 职责: 校验股道清单并派生请求内元数据
// 红线: 站台长度缺失/非数值的股道直接丢弃(告警),不得补 0
// ==========================================

use crate::domain::track::{Inventory, TrackMetadata, TrackMetadataMap, TrackRecord};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::track_name::parse_track_name;

/// 构建股道元数据
///
/// # 返回
/// - Ok: 规范化名称 → 元数据
/// - Err(Configuration): 没有任何有效股道
pub fn build_track_metadata(inventory: &Inventory) -> EngineResult<TrackMetadataMap> {
    let mut metadata = TrackMetadataMap::new();

    for (name, record) in inventory {
        let Some(platform_length) = validated_platform_length(name, record) else {
            continue;
        };

        let parsed = parse_track_name(name);
        if parsed.normalized.is_empty() {
            tracing::warn!(track = %name, "股道名称为空,已忽略");
            continue;
        }

        if metadata.contains_key(&parsed.normalized) {
            tracing::warn!(
                track = %name,
                normalized = %parsed.normalized,
                "规范化后股道名称重复,后出现的记录覆盖前者"
            );
        }

        metadata.insert(
            parsed.normalized,
            TrackMetadata {
                ordinal: parsed.ordinal,
                suffix: parsed.suffix,
                platform_length,
                functional_capacity: record.functional_capacity(),
                profile: record.profile(),
            },
        );
    }

    if metadata.is_empty() {
        return Err(EngineError::Configuration(
            "股道清单中没有有效股道".to_string(),
        ));
    }

    tracing::debug!(
        total = inventory.len(),
        valid = metadata.len(),
        "股道元数据构建完成"
    );
    Ok(metadata)
}

fn validated_platform_length(name: &str, record: &TrackRecord) -> Option<u32> {
    match &record.platform_length_m {
        None => {
            tracing::warn!(
                track = %name,
                field = "platform_length_m",
                "股道缺少站台长度,已忽略"
            );
            None
        }
        Some(raw) => {
            let value = raw.as_non_negative_int();
            if value.is_none() {
                tracing::warn!(
                    track = %name,
                    field = "platform_length_m",
                    value = %raw,
                    "股道站台长度非数值,已忽略"
                );
            }
            value
        }
    }
}
