//! 错误处理模块 (修复原则：明确抛出异常)
//!
//! 所有存储层失败都是可恢复的类型化错误，由调用方捕获并上报；
//! 会话级的名称校验失败不属于错误，见 `session::SaveOutcome`。

use crate::types::Scope;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    /// 名称为空或仅包含空白字符，操作中止，不会触发任何 OS 写入
    #[error("环境变量名称不能为空")]
    InvalidInput,

    /// 新增或重命名的目标名称已存在，操作中止，不会触发任何 OS 写入
    #[error("环境变量 '{0}' 已存在")]
    AlreadyExists(String),

    #[error("当前平台不支持 {0} 作用域的写入")]
    UnsupportedScope(Scope),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, EnvError>;
