// ==========================================
// 站台股道分配 - 核心库
// ==========================================
// 系统定位: 为到站列车给出可接车股道及其优先顺序
// 分层: domain → config → engine → importer → api
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 股道、列车、候选
pub mod domain;

// 配置层 - 类别规则与排序配置
pub mod config;

// 引擎层 - 可行性判定与排序
pub mod engine;

// 导入层 - 股道清单
pub mod importer;

// API 层 - 请求入口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Inventory, PlatformProfile, PriorityTier, Proximity, SortOrdinal, SuggestedTrack,
    SuggestionResponse, SuggestionResult, TrackRecord, TrainRequest,
};

// 配置
pub use config::{
    CategoryRegistry, CategoryRuleConfig, ConfigManager, CriterionKey, PriorityConfig,
};

// 引擎
pub use engine::{select_tracks, EngineError, TrackSelector, MAX_ALTERNATIVES};

// 导入
pub use importer::load_inventory;

// API
pub use api::{ApiError, ConfigApi, SuggestionApi, SuggestionPayload};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "admissible-tracks";
