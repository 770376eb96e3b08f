// ==========================================
// 站台股道分配 - 股道建议 API
// ==========================================
// 职责: 接收单列车/批量请求,解析类别配置,调用引擎
// 兼容: 旧版单列车对象、裸列车列表、{trains, tracks_override} 批量格式
// ==========================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::RequestValidator;
use crate::config::config_manager::ConfigManager;
use crate::config::registry::ResolvedCategory;
use crate::domain::track::Inventory;
use crate::domain::train::{SuggestionResponse, SuggestionResult, TrainRequest};
use crate::engine::selector::select_tracks;

// ==========================================
// SuggestionPayload - 请求载荷
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestionPayload {
    /// 批量格式,可附带临时股道清单
    Batch {
        trains: Vec<TrainRequest>,
        #[serde(default)]
        tracks_override: Option<Inventory>,
    },
    /// 裸列车列表
    List(Vec<TrainRequest>),
    /// 旧版单列车对象
    Single(TrainRequest),
}

impl SuggestionPayload {
    /// 拆分为 (列车列表, 临时股道清单)
    pub fn into_parts(self) -> (Vec<TrainRequest>, Option<Inventory>) {
        match self {
            SuggestionPayload::Batch {
                trains,
                tracks_override,
            } => (trains, tracks_override),
            SuggestionPayload::List(trains) => (trains, None),
            SuggestionPayload::Single(train) => (vec![train], None),
        }
    }
}

// ==========================================
// SuggestionApi
// ==========================================

/// 股道建议API
///
/// 职责：
/// 1. 请求校验
/// 2. 按有效类别解析规则与排序配置(批内缓存)
/// 3. 逐列车独立调用引擎
pub struct SuggestionApi {
    config: ConfigManager,
    inventory: Option<Inventory>,
}

impl SuggestionApi {
    /// # 参数
    /// - config: 配置管理器
    /// - inventory: 默认股道清单;None 时请求必须携带 tracks_override
    pub fn new(config: ConfigManager, inventory: Option<Inventory>) -> Self {
        Self { config, inventory }
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.as_ref()
    }

    /// 计算建议股道
    ///
    /// # 返回
    /// - Ok: 每列车一条结果;单列车时顶层 alternatives 同步填充
    /// - Err(ValidationError): 请求非法(不做部分处理)
    /// - Err(ConfigurationError): 类别配置缺失或股道清单无有效股道
    pub fn suggest(&self, payload: SuggestionPayload) -> ApiResult<SuggestionResponse> {
        let (trains, tracks_override) = payload.into_parts();
        RequestValidator::validate_trains(&trains)?;

        let inventory = match tracks_override.as_ref() {
            Some(tracks) if !tracks.is_empty() => tracks,
            _ => self.inventory.as_ref().ok_or_else(|| {
                ApiError::ConfigurationError("未加载股道清单且请求未提供 tracks_override".to_string())
            })?,
        };

        // 整批使用同一份配置快照
        let registry = self.config.registry()?;
        let locale = self.config.locale()?;

        let mut cache: HashMap<String, ResolvedCategory> = HashMap::new();
        let mut results = Vec::with_capacity(trains.len());

        for train in trains {
            let category = train.effective_category();
            if !cache.contains_key(&category) {
                let resolved = registry.resolve(&category)?;
                tracing::debug!(
                    category = %category,
                    family = %resolved.family,
                    "类别配置已解析"
                );
                cache.insert(category.clone(), resolved);
            }
            let resolved = &cache[&category];

            let alternatives = select_tracks(
                &train,
                inventory,
                Some(&resolved.rule),
                Some(&resolved.priority),
                &locale,
            )?;
            results.push(SuggestionResult {
                train,
                alternatives,
            });
        }

        Ok(SuggestionResponse::from_results(results))
    }

    /// JSON 入口: 解析请求、计算、序列化响应
    pub fn suggest_json(&self, payload_json: &str) -> ApiResult<String> {
        let payload: SuggestionPayload = serde_json::from_str(payload_json)
            .map_err(|e| ApiError::ValidationError(format!("请求格式错误: {}", e)))?;
        let response = self.suggest(payload)?;
        serde_json::to_string_pretty(&response)
            .map_err(|e| ApiError::InternalError(format!("响应序列化失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shapes() {
        let single: SuggestionPayload =
            serde_json::from_str(r#"{"train_code": "1", "train_length_m": 100, "train_category": "REG"}"#)
                .unwrap();
        assert!(matches!(single, SuggestionPayload::Single(_)));

        let list: SuggestionPayload = serde_json::from_str(
            r#"[{"train_code": "1", "train_length_m": 100, "train_category": "REG"}]"#,
        )
        .unwrap();
        assert!(matches!(list, SuggestionPayload::List(_)));

        let batch: SuggestionPayload = serde_json::from_str(
            r#"{"trains": [{"train_code": "1", "train_length_m": 100, "train_category": "REG"}],
                "tracks_override": {"I": {"platform_length_m": 300}}}"#,
        )
        .unwrap();
        let (trains, tracks) = batch.into_parts();
        assert_eq!(trains.len(), 1);
        assert_eq!(tracks.map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_missing_inventory_is_configuration_error() {
        let api = SuggestionApi::new(ConfigManager::in_memory(), None);
        let err = api
            .suggest(SuggestionPayload::Single(TrainRequest::new("1", 100, "REG")))
            .unwrap_err();
        assert!(matches!(err, ApiError::ConfigurationError(_)));
    }

    #[test]
    fn test_malformed_json_is_client_error() {
        let api = SuggestionApi::new(ConfigManager::in_memory(), None);
        let err = api.suggest_json("{not json").unwrap_err();
        assert!(err.is_client_error());
    }
}
