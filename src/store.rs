//! 作用域感知的环境变量存储 (模块原则：清晰分离的存储逻辑)
//!
//! 对注入的 OS 访问器做 CRUD 封装。存储自身无状态，仅持有活动
//! 作用域与配置，OS 环境表是唯一事实来源。

use crate::accessor::EnvAccessor;
use crate::error::{EnvError, Result};
use crate::types::{Config, Scope, VariableRecord};
use std::sync::Arc;

/// 环境变量存储 (遵循分离原则：接口与实现分离)
#[derive(Clone)]
pub struct EnvironmentStore {
    accessor: Arc<dyn EnvAccessor>,
    scope: Scope,
    config: Config,
}

impl EnvironmentStore {
    /// 创建存储，初始作用域为用户级
    pub fn new(accessor: Arc<dyn EnvAccessor>, config: Config) -> Self {
        Self {
            accessor,
            scope: Scope::User,
            config,
        }
    }

    /// 当前活动作用域
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// 切换活动作用域；调用方必须随后重新加载目录快照
    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// 机器级写入是否预期能成功（仅透传访问器信号）
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        self.accessor.is_elevated()
    }

    /// 获取活动作用域的全部变量，按名称升序（区分大小写的序数序）
    ///
    /// 空表返回空列表，不算错误。
    pub fn get_all(&self) -> Result<Vec<VariableRecord>> {
        let mut records: Vec<VariableRecord> = self
            .accessor
            .enumerate(self.scope)?
            .into_iter()
            .map(|(name, value)| VariableRecord::from_entry(name, value))
            .collect();

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    /// 检查活动作用域中是否存在该变量
    ///
    /// 名称匹配遵循访问器的大小写语义。
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.accessor.get(name, self.scope)?.is_some())
    }

    /// 添加环境变量
    pub fn add(&self, name: &str, value: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(EnvError::InvalidInput);
        }

        if self.exists(name)? {
            return Err(EnvError::AlreadyExists(name.to_string()));
        }

        self.accessor.set(name, Some(value), self.scope)?;

        if self.config.verbose {
            println!("✓ 添加变量 {} = {}", name, value);
        }

        Ok(())
    }

    /// 更新环境变量
    ///
    /// 名称改变时采用先删后建协议：环境表的名称匹配大小写不敏感
    /// 但保留大小写时，直接写入新名会留下两个条目。名称未变
    /// （按访问器大小写语义比较）则原地覆盖值。
    pub fn update(&self, original_name: &str, new_name: &str, value: &str) -> Result<()> {
        if new_name.trim().is_empty() {
            return Err(EnvError::InvalidInput);
        }

        if !self.names_match(original_name, new_name) {
            if self.exists(new_name)? {
                return Err(EnvError::AlreadyExists(new_name.to_string()));
            }
            self.delete(original_name)?;
        }

        self.accessor.set(new_name, Some(value), self.scope)?;

        if self.config.verbose {
            println!("✓ 更新变量 {} = {}", new_name, value);
        }

        Ok(())
    }

    /// 删除环境变量（缺席删除是无操作）
    pub fn delete(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(EnvError::InvalidInput);
        }

        self.accessor.set(name, None, self.scope)?;

        if self.config.verbose {
            println!("✓ 删除变量 {}", name);
        }

        Ok(())
    }

    /// 按访问器的大小写语义比较两个名称
    fn names_match(&self, a: &str, b: &str) -> bool {
        if self.accessor.case_insensitive() {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }
}
