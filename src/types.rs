//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 环境变量作用域
///
/// 每个 `EnvironmentStore` 实例同一时刻只有一个活动作用域，
/// 切换作用域后目录快照必须重新加载。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Scope {
    /// 用户级环境变量
    #[default]
    User,
    /// 机器级环境变量（写入通常需要管理员权限）
    Machine,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::User => write!(f, "user"),
            Scope::Machine => write!(f, "machine"),
        }
    }
}

impl Scope {
    /// 从字符串解析
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Scope::User),
            "machine" | "system" => Some(Scope::Machine),
            _ => None,
        }
    }
}

/// 环境变量条目及其编辑跟踪元数据
///
/// 通过枚举获得的记录满足 `name == original_name` 且 `is_new == false`；
/// 通过新增会话创建的记录 `is_new == true`，首次保存后 `original_name == name`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    /// 当前（工作）名称
    pub name: String,
    /// 当前（工作）原始值
    pub value: String,
    /// 加载或开始编辑时的名称，用于识别重命名并定位 OS 写入/删除目标
    pub original_name: String,
    /// 该记录是否尚未存在于 OS 环境表中
    pub is_new: bool,
}

impl VariableRecord {
    /// 从枚举到的表项构造记录
    #[must_use]
    pub fn from_entry(name: String, value: String) -> Self {
        Self {
            original_name: name.clone(),
            name,
            value,
            is_new: false,
        }
    }

    /// 构造一条待新增的空白记录
    #[must_use]
    pub fn new_blank() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            original_name: String::new(),
            is_new: true,
        }
    }
}

/// 路径列表中的一个有序段（如 PATH 中的一个目录）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathSegment {
    /// 段文本
    pub text: String,
}

impl PathSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// 段是否为空或仅包含空白字符
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 配置选项 (支持详细/安静模式切换)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub verbose: bool, // 是否详细输出
}
