// ==========================================
// 站台股道分配 - API层错误类型
// ==========================================
// 职责: 统一引擎/导入/配置错误,区分客户端错误与服务端错误
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 客户端错误 (4xx)
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 服务端错误 (5xx)
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigurationError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为客户端输入错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::ValidationError(_) | ApiError::NotFound(_))
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => ApiError::ValidationError(msg),
            EngineError::Configuration(msg) => ApiError::ConfigurationError(msg),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件 {}", path)),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { .. } => ApiError::ValidationError(err.to_string()),
            ConfigError::FileNotFound(path) => {
                ApiError::ConfigurationError(format!("配置文件不存在: {}", path))
            }
            ConfigError::LockError(msg) => ApiError::InternalError(msg),
            other => ApiError::ConfigurationError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
