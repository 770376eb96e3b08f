// ==========================================
// 站台股道分配 - 配置层
// ==========================================
// 职责: 类别规则与排序配置,内置默认 + 多级覆写
// 存储: JSON 配置文件
// ==========================================

pub mod category_rule;
pub mod config_manager;
pub mod error;
pub mod priority_config;
pub mod registry;

pub use category_rule::CategoryRuleConfig;
pub use config_manager::{
    default_config_path, CategoryRuleEntry, ConfigManager, EngineSettings, PriorityConfigEntry,
    CONFIG_PATH_ENV, DEFAULT_LOCALE,
};
pub use error::{ConfigError, ConfigResult};
pub use priority_config::{CriterionKey, Direction, PriorityConfig, PriorityCriterion};
pub use registry::{normalize_category_key, CategoryRegistry, ResolvedCategory, DEFAULT_CATEGORY};
