// ==========================================
// 站台股道分配 - 字段映射器
// ==========================================
// 职责: 表格行 (列名 → 文本) → (股道名称, TrackRecord)
// 兼容: 英文列名 + 意大利语列名
// ==========================================

use crate::domain::track::{RawNumber, TrackRecord};
use std::collections::HashMap;

/// 股道名称列的候选列名
pub const NAME_COLUMNS: &[&str] = &["name", "track", "binario", "nome"];

pub struct TrackFieldMapper;

impl TrackFieldMapper {
    /// 映射单行
    ///
    /// # 返回
    /// - None: 行中没有股道名称(已告警)
    /// - Some: 数值字段保持原始文本,交由元数据构建校验
    pub fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Option<(String, TrackRecord)> {
        let Some(name) = self.get_string(row, NAME_COLUMNS) else {
            tracing::warn!(row = row_number, "行缺少股道名称,已忽略");
            return None;
        };

        let record = TrackRecord {
            platform_length_m: self.get_number(
                row,
                &["platform_length_m", "marciapiede_complessivo_m"],
            ),
            high_platform_m: self.get_number(row, &["high_platform_m", "marciapiede_alto_m"]),
            low_platform_m: self.get_number(row, &["low_platform_m", "marciapiede_basso_m"]),
            functional_capacity_m: self.get_number(
                row,
                &["functional_capacity_m", "capacita_funzionale_m"],
            ),
            functional_capacity_legacy_m: self.get_number(
                row,
                &["capacita_funzionle_m", "capacita_funzioanle_m"],
            ),
        };

        Some((name, record))
    }

    /// 是否包含股道名称列
    pub fn has_name_column(&self, headers: &[String]) -> bool {
        headers
            .iter()
            .any(|h| NAME_COLUMNS.contains(&h.to_lowercase().as_str()))
    }

    /// 提取字符串字段,依次尝试多个列名(别名),列名不区分大小写
    fn get_string(&self, row: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            let value = row
                .iter()
                .find(|(column, _)| column.eq_ignore_ascii_case(alias))
                .map(|(_, v)| v.trim());
            if let Some(v) = value {
                if !v.is_empty() {
                    return Some(v.to_string());
                }
            }
        }
        None
    }

    fn get_number(&self, row: &HashMap<String, String>, aliases: &[&str]) -> Option<RawNumber> {
        self.get_string(row, aliases).map(RawNumber::Text)
    }
}
