// ==========================================
// 站台股道分配 - 配置管理 API
// ==========================================
// 职责: 类别规则与排序配置的查询、更新、删除、快照
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::RequestValidator;
use crate::config::category_rule::CategoryRuleConfig;
use crate::config::config_manager::{CategoryRuleEntry, ConfigManager, PriorityConfigEntry};
use crate::config::priority_config::PriorityConfig;
use crate::config::registry::ResolvedCategory;

/// 更新请求: 类别规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRuleUpdate {
    pub category: String,
    pub rule: CategoryRuleConfig,
}

/// 更新请求: 排序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityConfigUpdate {
    pub category: String,
    pub config: PriorityConfig,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================

/// 配置管理API
///
/// 职责：
/// 1. 配置查询(全部类别及其生效配置)
/// 2. 配置覆写的新增、替换、删除
/// 3. 配置快照与持久化
pub struct ConfigApi {
    config_manager: ConfigManager,
}

impl ConfigApi {
    pub fn new(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    pub fn list_category_rules(&self) -> ApiResult<Vec<CategoryRuleEntry>> {
        Ok(self.config_manager.list_category_rules()?)
    }

    pub fn list_priority_configs(&self) -> ApiResult<Vec<PriorityConfigEntry>> {
        Ok(self.config_manager.list_priority_configs()?)
    }

    /// 查询某类别的生效配置(经回退链解析)
    pub fn get_effective_config(&self, category: &str) -> ApiResult<ResolvedCategory> {
        RequestValidator::validate_category(category)?;
        Ok(self.config_manager.resolve(category)??)
    }

    /// 新增或替换类别规则
    ///
    /// # 返回
    /// 规范化后实际写入的规则
    pub fn upsert_category_rule(&self, update: CategoryRuleUpdate) -> ApiResult<CategoryRuleConfig> {
        RequestValidator::validate_category_rule(&update.category, &update.rule)?;
        Ok(self
            .config_manager
            .upsert_category_rule(&update.category, update.rule)?)
    }

    /// 删除类别规则覆写
    ///
    /// # 返回
    /// - Err(NotFound): 该类别没有覆写
    pub fn delete_category_rule(&self, category: &str) -> ApiResult<()> {
        RequestValidator::validate_category(category)?;
        if !self.config_manager.delete_category_rule(category)? {
            return Err(ApiError::NotFound(format!("类别规则覆写 {}", category)));
        }
        Ok(())
    }

    pub fn upsert_priority_config(&self, update: PriorityConfigUpdate) -> ApiResult<PriorityConfig> {
        RequestValidator::validate_priority_config(&update.category, &update.config)?;
        Ok(self
            .config_manager
            .upsert_priority_config(&update.category, update.config)?)
    }

    pub fn delete_priority_config(&self, category: &str) -> ApiResult<()> {
        RequestValidator::validate_category(category)?;
        if !self.config_manager.delete_priority_config(category)? {
            return Err(ApiError::NotFound(format!("排序配置覆写 {}", category)));
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.snapshot()?)
    }

    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ApiResult<usize> {
        Ok(self.config_manager.restore_from_snapshot(snapshot_json)?)
    }

    pub fn save(&self) -> ApiResult<()> {
        Ok(self.config_manager.save()?)
    }
}
