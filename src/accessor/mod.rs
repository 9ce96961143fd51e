//! OS 环境表访问接口（输出端口）
//!
//! 包含：
//! - `EnvAccessor`: 抽象访问器接口，由宿主平台层注入
//! - `memory`: 内存表实现（测试与嵌入场景）
//! - `system`: 真实平台实现（Windows 注册表 / Unix shell 配置文件）

pub mod memory;
pub mod system;

use crate::error::Result;
use crate::types::Scope;
use std::collections::HashMap;

/// OS 环境表访问器
///
/// 核心的唯一外部边界。所有调用同步阻塞，按单线程使用设计；
/// 对表的并发外部修改不做检测。
pub trait EnvAccessor: Send + Sync {
    /// 枚举指定作用域的全部变量
    fn enumerate(&self, scope: Scope) -> Result<HashMap<String, String>>;

    /// 读取单个变量，不存在时返回 `None`
    fn get(&self, name: &str, scope: Scope) -> Result<Option<String>>;

    /// 写入或更新变量；`value` 为 `None` 表示删除（缺席删除不算错误）
    fn set(&self, name: &str, value: Option<&str>, scope: Scope) -> Result<()>;

    /// 机器级写入是否预期能成功（仅作信号，核心不据此拦截）
    fn is_elevated(&self) -> bool;

    /// 名称匹配是否大小写不敏感（Windows 注册表为真）
    fn case_insensitive(&self) -> bool;
}

pub use memory::MemoryAccessor;
pub use system::SystemAccessor;
