// ==========================================
// 站台股道分配 - 请求校验器
// ==========================================
// 职责: 引擎调用前的输入校验(列车请求、配置载荷)
// 红线: 校验失败的请求不做任何部分处理
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::category_rule::CategoryRuleConfig;
use crate::config::priority_config::PriorityConfig;
use crate::domain::train::TrainRequest;
use crate::engine::planned_track::validate_planned_track;

pub struct RequestValidator;

impl RequestValidator {
    /// 校验单列车请求
    ///
    /// # 规则
    /// - 车次非空
    /// - 列车长度 > 0
    /// - 计划股道格式合法(长度、控制字符)
    pub fn validate_train(train: &TrainRequest) -> ApiResult<()> {
        if train.train_code.trim().is_empty() {
            return Err(ApiError::ValidationError("车次不能为空".to_string()));
        }
        if train.train_length_m <= 0 {
            return Err(ApiError::ValidationError(format!(
                "列车 {} 长度必须大于 0 (实际 {})",
                train.train_code, train.train_length_m
            )));
        }
        if let Some(reference) = train.planned_track.as_deref() {
            validate_planned_track(reference).map_err(|e| {
                ApiError::ValidationError(format!("列车 {}: {}", train.train_code, e))
            })?;
        }
        Ok(())
    }

    /// 校验批量请求,首个错误即返回
    pub fn validate_trains(trains: &[TrainRequest]) -> ApiResult<()> {
        if trains.is_empty() {
            return Err(ApiError::ValidationError("列车列表为空".to_string()));
        }
        trains.iter().try_for_each(Self::validate_train)
    }

    /// 校验类别键
    pub fn validate_category(category: &str) -> ApiResult<()> {
        if category.trim().is_empty() {
            return Err(ApiError::ValidationError("类别不能为空".to_string()));
        }
        Ok(())
    }

    pub fn validate_category_rule(category: &str, rule: &CategoryRuleConfig) -> ApiResult<()> {
        Self::validate_category(category)?;
        rule.validate()
            .map_err(|msg| ApiError::ValidationError(format!("类别 {}: {}", category, msg)))
    }

    pub fn validate_priority_config(category: &str, config: &PriorityConfig) -> ApiResult<()> {
        Self::validate_category(category)?;
        config
            .validate()
            .map_err(|msg| ApiError::ValidationError(format!("类别 {}: {}", category, msg)))
    }
}
