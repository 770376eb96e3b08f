// ==========================================
// 站台股道分配 - 股道档案
// ==========================================
// 职责: 外部股道清单记录 (TrackRecord) 与请求内派生元数据 (TrackMetadata)
// 兼容: 英文字段名 + 历史意大利语字段名 + 功能容量字段的历史拼写错误
// ==========================================

use crate::domain::types::PlatformProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// RawNumber - 未校验的数值字段
// ==========================================
// 清单来自 JSON/CSV/Excel,数值可能是整数、浮点或字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    /// 转换为非负整数
    ///
    /// # 规则
    /// - 整数: 须 >= 0
    /// - 浮点: 须为有限非负数,小数部分截断 (250.7 → 250)
    /// - 字符串: 去空白后按整数或浮点解析,规则同上
    ///
    /// # 返回
    /// - None: 无法转换(调用方决定是丢弃还是取 0)
    pub fn as_non_negative_int(&self) -> Option<u32> {
        match self {
            RawNumber::Int(v) => u32::try_from(*v).ok(),
            RawNumber::Float(v) => float_to_u32(*v),
            RawNumber::Text(s) => {
                let trimmed = s.trim();
                if let Ok(v) = trimmed.parse::<i64>() {
                    return u32::try_from(v).ok();
                }
                trimmed.parse::<f64>().ok().and_then(float_to_u32)
            }
            RawNumber::Other(_) => None,
        }
    }
}

fn float_to_u32(v: f64) -> Option<u32> {
    if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
        Some(v.trunc() as u32)
    } else {
        None
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawNumber::Int(v) => write!(f, "{}", v),
            RawNumber::Float(v) => write!(f, "{}", v),
            RawNumber::Text(s) => write!(f, "{:?}", s),
            RawNumber::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<u32> for RawNumber {
    fn from(v: u32) -> Self {
        RawNumber::Int(v as i64)
    }
}

// ==========================================
// TrackRecord - 外部股道清单记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// 站台总长 (m),必填;缺失或非数值的股道被丢弃
    #[serde(default, alias = "marciapiede_complessivo_m")]
    pub platform_length_m: Option<RawNumber>,

    /// 高站台长度 (m)
    #[serde(default, alias = "marciapiede_alto_m")]
    pub high_platform_m: Option<RawNumber>,

    /// 低站台长度 (m)
    #[serde(default, alias = "marciapiede_basso_m")]
    pub low_platform_m: Option<RawNumber>,

    /// 功能容量长度 (m),可空
    #[serde(default, alias = "capacita_funzionale_m")]
    pub functional_capacity_m: Option<RawNumber>,

    /// 功能容量的历史拼写错误字段,仅在标准字段缺失/为 0 时回退使用
    #[serde(
        default,
        alias = "capacita_funzionle_m",
        alias = "capacita_funzioanle_m",
        skip_serializing_if = "Option::is_none"
    )]
    pub functional_capacity_legacy_m: Option<RawNumber>,
}

impl TrackRecord {
    /// 以整数构造记录(测试与导入使用)
    pub fn new(platform_length_m: u32) -> Self {
        Self {
            platform_length_m: Some(platform_length_m.into()),
            ..Self::default()
        }
    }

    pub fn with_high_platform(mut self, meters: u32) -> Self {
        self.high_platform_m = Some(meters.into());
        self
    }

    pub fn with_low_platform(mut self, meters: u32) -> Self {
        self.low_platform_m = Some(meters.into());
        self
    }

    pub fn with_functional_capacity(mut self, meters: u32) -> Self {
        self.functional_capacity_m = Some(meters.into());
        self
    }

    /// 站台总长;None 表示缺失或不可转换
    pub fn platform_length(&self) -> Option<u32> {
        self.platform_length_m
            .as_ref()
            .and_then(RawNumber::as_non_negative_int)
    }

    /// 功能容量: 标准字段 → 历史拼写字段 → 0
    pub fn functional_capacity(&self) -> u32 {
        let canonical = self
            .functional_capacity_m
            .as_ref()
            .and_then(RawNumber::as_non_negative_int)
            .filter(|v| *v > 0);

        canonical
            .or_else(|| {
                self.functional_capacity_legacy_m
                    .as_ref()
                    .and_then(RawNumber::as_non_negative_int)
            })
            .unwrap_or(0)
    }

    pub fn profile(&self) -> PlatformProfile {
        let high = self
            .high_platform_m
            .as_ref()
            .and_then(RawNumber::as_non_negative_int)
            .unwrap_or(0);
        let low = self
            .low_platform_m
            .as_ref()
            .and_then(RawNumber::as_non_negative_int)
            .unwrap_or(0);
        PlatformProfile::from_lengths(high, low)
    }
}

/// 股道清单: 名称 → 记录 (按名称有序)
pub type Inventory = BTreeMap<String, TrackRecord>;

// ==========================================
// TrackMetadata - 请求内派生的股道元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub ordinal: Option<u32>,
    pub suffix: String,
    pub platform_length: u32,
    pub functional_capacity: u32,
    pub profile: PlatformProfile,
}

/// 规范化名称 → 元数据
pub type TrackMetadataMap = BTreeMap<String, TrackMetadata>;
