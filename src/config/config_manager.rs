// ==========================================
// 站台股道分配 - 配置管理器
// ==========================================
// 职责: 配置文件加载、类别覆写的增删查、快照与回写
// 存储: JSON 文件 (locale + category_rules + priority_configs)
// 路径: 显式路径 → ADMISSIBLE_TRACKS_CONFIG → 用户配置目录
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::priority_config::PriorityConfig;
use crate::config::registry::{CategoryRegistry, ResolvedCategory};
use crate::domain::train::normalize_category;
use crate::engine::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "ADMISSIBLE_TRACKS_CONFIG";

/// 默认说明语言
pub const DEFAULT_LOCALE: &str = "en";

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

// ==========================================
// EngineSettings - 配置文件内容
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// 说明文字语言 (en / it / zh-CN)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// 类别规则覆写
    #[serde(default)]
    pub category_rules: BTreeMap<String, CategoryRuleConfig>,

    /// 类别排序覆写
    #[serde(default)]
    pub priority_configs: BTreeMap<String, PriorityConfig>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            category_rules: BTreeMap::new(),
            priority_configs: BTreeMap::new(),
        }
    }
}

impl EngineSettings {
    /// 校验全部覆写(与 upsert 使用同一套规则)
    pub fn validate(&self) -> ConfigResult<()> {
        for (category, rule) in &self.category_rules {
            rule.validate().map_err(|message| ConfigError::InvalidValue {
                category: category.clone(),
                message,
            })?;
        }
        for (category, config) in &self.priority_configs {
            config
                .validate()
                .map_err(|message| ConfigError::InvalidValue {
                    category: category.clone(),
                    message,
                })?;
        }
        Ok(())
    }
}

/// 列表项: 类别规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRuleEntry {
    pub category: String,
    pub rule: CategoryRuleConfig,
    pub is_custom: bool,
}

/// 列表项: 类别排序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityConfigEntry {
    pub category: String,
    pub config: PriorityConfig,
    pub is_custom: bool,
}

struct ConfigState {
    locale: String,
    registry: CategoryRegistry,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
    state: Arc<RwLock<ConfigState>>,
}

impl ConfigManager {
    /// 仅使用内置默认配置(无文件)
    pub fn in_memory() -> Self {
        Self::build(EngineSettings::default(), None)
    }

    /// 从已解析的配置创建
    ///
    /// 覆写非法时返回 InvalidValue
    pub fn from_settings(settings: EngineSettings, path: Option<PathBuf>) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self::build(settings, path))
    }

    fn build(settings: EngineSettings, path: Option<PathBuf>) -> Self {
        let registry =
            CategoryRegistry::with_overrides(settings.category_rules, settings.priority_configs);
        Self {
            path,
            state: Arc::new(RwLock::new(ConfigState {
                locale: settings.locale,
                registry,
            })),
        }
    }

    /// 加载配置
    ///
    /// # 规则
    /// - 显式路径或环境变量路径: 文件必须存在
    /// - 默认用户配置目录: 文件不存在时使用内置默认配置(保存时会创建)
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_path(Path::new(trimmed));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                tracing::info!(path = %path.display(), "配置文件不存在,使用内置默认配置");
                Ok(Self::build(EngineSettings::default(), Some(path)))
            }
            None => Ok(Self::in_memory()),
        }
    }

    /// 从指定文件加载
    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            rules = settings.category_rules.len(),
            priorities = settings.priority_configs.len(),
            "已加载配置文件"
        );

        Self::from_settings(settings, Some(path.to_path_buf()))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self) -> ConfigResult<std::sync::RwLockReadGuard<'_, ConfigState>> {
        self.state
            .read()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    fn write(&self) -> ConfigResult<std::sync::RwLockWriteGuard<'_, ConfigState>> {
        self.state
            .write()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn locale(&self) -> ConfigResult<String> {
        Ok(self.read()?.locale.clone())
    }

    pub fn set_locale(&self, locale: &str) -> ConfigResult<()> {
        self.write()?.locale = locale.trim().to_string();
        Ok(())
    }

    /// 当前注册表的副本(批量请求内复用)
    pub fn registry(&self) -> ConfigResult<CategoryRegistry> {
        Ok(self.read()?.registry.clone())
    }

    /// 解析某类别的规则与排序
    ///
    /// 外层 Result 为锁错误,内层为配置缺失
    pub fn resolve(&self, category: &str) -> ConfigResult<EngineResult<ResolvedCategory>> {
        Ok(self.read()?.registry.resolve(category))
    }

    pub fn list_category_rules(&self) -> ConfigResult<Vec<CategoryRuleEntry>> {
        let state = self.read()?;
        let mut entries = Vec::new();
        for category in state.registry.known_categories() {
            // 内置键一定可解析;empty 注册表不会经由此处创建
            if let Ok(rule) = state.registry.resolve_rule(&category) {
                entries.push(CategoryRuleEntry {
                    is_custom: state.registry.has_rule_override(&category),
                    rule: rule.clone(),
                    category,
                });
            }
        }
        Ok(entries)
    }

    pub fn list_priority_configs(&self) -> ConfigResult<Vec<PriorityConfigEntry>> {
        let state = self.read()?;
        let mut entries = Vec::new();
        for category in state.registry.known_categories() {
            if let Ok(config) = state.registry.resolve_priority(&category) {
                entries.push(PriorityConfigEntry {
                    is_custom: state.registry.has_priority_override(&category),
                    config: config.clone(),
                    category,
                });
            }
        }
        Ok(entries)
    }

    // ==========================================
    // 覆写
    // ==========================================

    /// 新增或替换类别规则覆写
    ///
    /// # 返回
    /// 写入后该类别的生效规则
    pub fn upsert_category_rule(
        &self,
        category: &str,
        rule: CategoryRuleConfig,
    ) -> ConfigResult<CategoryRuleConfig> {
        let category = normalize_category(category);
        let rule = rule.normalized();
        rule.validate()
            .map_err(|message| ConfigError::InvalidValue {
                category: category.clone(),
                message,
            })?;

        let mut state = self.write()?;
        state.registry.set_rule_override(&category, rule.clone());
        tracing::info!(category = %category, "类别规则已更新");
        Ok(rule)
    }

    /// 删除类别规则覆写(不存在时无操作)
    pub fn delete_category_rule(&self, category: &str) -> ConfigResult<bool> {
        let removed = self.write()?.registry.remove_rule_override(category);
        Ok(removed.is_some())
    }

    pub fn upsert_priority_config(
        &self,
        category: &str,
        config: PriorityConfig,
    ) -> ConfigResult<PriorityConfig> {
        let category = normalize_category(category);
        config
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                category: category.clone(),
                message,
            })?;

        let mut state = self.write()?;
        state.registry.set_priority_override(&category, config.clone());
        tracing::info!(category = %category, "类别排序配置已更新");
        Ok(config)
    }

    pub fn delete_priority_config(&self, category: &str) -> ConfigResult<bool> {
        let removed = self.write()?.registry.remove_priority_override(category);
        Ok(removed.is_some())
    }

    // ==========================================
    // 快照与持久化
    // ==========================================

    /// 当前配置(仅覆写部分)
    pub fn settings(&self) -> ConfigResult<EngineSettings> {
        let state = self.read()?;
        Ok(EngineSettings {
            locale: state.locale.clone(),
            category_rules: state.registry.rule_overrides().clone(),
            priority_configs: state.registry.priority_overrides().clone(),
        })
    }

    /// 配置快照 (JSON)
    pub fn snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.settings()?)?)
    }

    /// 从快照恢复,覆盖当前全部覆写
    ///
    /// 快照非法时当前配置保持不变
    ///
    /// # 返回
    /// 恢复的覆写条目数量
    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let settings: EngineSettings = serde_json::from_str(snapshot_json)?;
        settings.validate()?;
        let count = settings.category_rules.len() + settings.priority_configs.len();

        let mut state = self.write()?;
        state.locale = settings.locale;
        state.registry =
            CategoryRegistry::with_overrides(settings.category_rules, settings.priority_configs);
        Ok(count)
    }

    /// 写回配置文件
    pub fn save(&self) -> ConfigResult<()> {
        let path = self.path.as_ref().ok_or(ConfigError::NoBackingFile)?;
        let json = serde_json::to_string_pretty(&self.settings()?)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWriteError {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }
        }

        std::fs::write(path, json).map_err(|e| ConfigError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "配置已保存");
        Ok(())
    }
}

/// 默认配置文件路径: 用户配置目录/admissible-tracks/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("admissible-tracks").join("config.json"))
}
