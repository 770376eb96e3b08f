// ==========================================
// 站台股道分配 - 引擎错误类型
// ==========================================
// 分类: 输入校验错误(客户端) / 配置缺失错误(服务端)
// 红线: 数据质量问题只记录告警,不升级为错误
// ==========================================

use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 输入校验失败(列车长度非正、计划股道格式错误等)
    #[error("输入校验失败: {0}")]
    Validation(String),

    /// 配置缺失(无类别规则/排序配置、股道清单无有效股道)
    #[error("配置错误: {0}")]
    Configuration(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
