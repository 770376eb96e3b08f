// ==========================================
// 站台股道分配 - API 层
// ==========================================
// 职责: 请求校验、配置解析、引擎调用、错误分类
// ==========================================

pub mod config_api;
pub mod error;
pub mod suggestion_api;
pub mod validator;

pub use config_api::{CategoryRuleUpdate, ConfigApi, PriorityConfigUpdate};
pub use error::{ApiError, ApiResult};
pub use suggestion_api::{SuggestionApi, SuggestionPayload};
pub use validator::RequestValidator;
