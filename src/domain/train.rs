// ==========================================
// 站台股道分配 - 列车请求与建议结果
// ==========================================
// 职责: 单列车请求、建议股道、批量响应
// 兼容: 单列车请求时在顶层保留 alternatives 字段
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};

/// PRM(无障碍)列车统一使用的类别
pub const PRM_CATEGORY: &str = "PRM";

// ==========================================
// TrainRequest - 单列车请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRequest {
    /// 车次
    pub train_code: String,

    /// 列车长度 (m),须 > 0(由校验器与引擎共同拒绝非法值)
    pub train_length_m: i64,

    /// 运营类别 (REG, IC, ES*, INV ...),反序列化时大写并去空白
    #[serde(default, deserialize_with = "deserialize_category")]
    pub train_category: String,

    /// 是否需要无障碍设施
    #[serde(default)]
    pub is_prm: bool,

    /// 计划股道(可空)
    #[serde(default)]
    pub planned_track: Option<String>,
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_category(raw.as_deref().unwrap_or("")))
}

/// 类别字符串规范化: 去空白 + 大写
pub fn normalize_category(category: &str) -> String {
    category.trim().to_uppercase()
}

impl TrainRequest {
    pub fn new(train_code: &str, train_length_m: i64, train_category: &str) -> Self {
        Self {
            train_code: train_code.to_string(),
            train_length_m,
            train_category: normalize_category(train_category),
            is_prm: false,
            planned_track: None,
        }
    }

    pub fn with_planned_track(mut self, planned_track: &str) -> Self {
        self.planned_track = Some(planned_track.to_string());
        self
    }

    pub fn with_prm(mut self, is_prm: bool) -> Self {
        self.is_prm = is_prm;
        self
    }

    /// 实际生效的类别: PRM 标记覆盖原类别
    pub fn effective_category(&self) -> String {
        if self.is_prm {
            PRM_CATEGORY.to_string()
        } else {
            normalize_category(&self.train_category)
        }
    }
}

// ==========================================
// 建议结果
// ==========================================

/// 单条建议股道
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTrack {
    pub track: String,
    pub reason: String,
}

/// 单列车的建议结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub train: TrainRequest,
    pub alternatives: Vec<SuggestedTrack>,
}

/// 批量响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// 兼容字段: 仅单列车请求时填充
    #[serde(default)]
    pub alternatives: Vec<SuggestedTrack>,

    /// 每列车的详细结果
    #[serde(default)]
    pub items: Vec<SuggestionResult>,
}

impl SuggestionResponse {
    pub fn from_results(items: Vec<SuggestionResult>) -> Self {
        let alternatives = if items.len() == 1 {
            items[0].alternatives.clone()
        } else {
            Vec::new()
        };
        Self {
            alternatives,
            items,
        }
    }
}
