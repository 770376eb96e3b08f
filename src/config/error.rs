// ==========================================
// 站台股道分配 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值非法 (category: {category}): {message}")]
    InvalidValue { category: String, message: String },

    #[error("未指定配置文件路径")]
    NoBackingFile,

    #[error("锁获取失败: {0}")]
    LockError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
