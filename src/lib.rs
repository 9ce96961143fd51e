//! EnvDesk - 环境变量存储管理核心
//!
//! 面向宿主展示层的库：作用域感知的环境变量 CRUD、重命名/重复
//! 检测协议、PATH 式分隔列表编解码、单会话编辑状态机和带搜索的
//! 目录快照。展示层（窗口、对话框、数据绑定）是外部协作者，
//! 只调用这里的同步方法并渲染返回值或类型化错误。

// 核心数据结构
pub mod types;

// 错误类型
pub mod error;

// 分隔列表编解码
pub mod codec;

// OS 环境表访问边界
pub mod accessor;

// 作用域感知存储
pub mod store;

// 编辑会话状态机
pub mod session;

// 目录快照与搜索
pub mod catalog;

#[cfg(test)]
pub(crate) mod test_utils;

// 重新导出常用类型
pub use accessor::{EnvAccessor, MemoryAccessor, SystemAccessor};
pub use catalog::Catalog;
pub use codec::PathListCodec;
pub use error::{EnvError, Result};
pub use session::{EditSession, Editor, SaveOutcome, SessionKind, ValueMode};
pub use store::EnvironmentStore;
pub use types::{Config, PathSegment, Scope, VariableRecord};
