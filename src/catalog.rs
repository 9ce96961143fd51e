//! 目录快照与过滤
//!
//! 持有当前作用域的完整快照（到下次重载前的权威内存视图），
//! 并提供对名称和值的大小写不敏感子串搜索。每次保存、删除或
//! 切换作用域成功后都必须重新加载。

use crate::error::Result;
use crate::store::EnvironmentStore;
use crate::types::{Scope, VariableRecord};

/// 环境变量目录
pub struct Catalog {
    store: EnvironmentStore,
    snapshot: Vec<VariableRecord>,
}

impl Catalog {
    /// 创建空目录；首次使用前调用 `load`
    pub fn new(store: EnvironmentStore) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &EnvironmentStore {
        &self.store
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.store.scope()
    }

    /// 从活动作用域重建快照
    pub fn load(&mut self) -> Result<()> {
        self.snapshot = self.store.get_all()?;
        Ok(())
    }

    /// 切换作用域并立即重载（旧快照随作用域切换失效）
    pub fn switch_scope(&mut self, scope: Scope) -> Result<()> {
        self.store.set_scope(scope);
        self.load()
    }

    /// 当前快照，按加载时的名称序
    #[must_use]
    pub fn snapshot(&self) -> &[VariableRecord] {
        &self.snapshot
    }

    /// 大小写不敏感的子串搜索
    ///
    /// 空白查询返回完整快照；否则返回名称或值包含查询串的子序列，
    /// 保持快照中的相对顺序。
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&VariableRecord> {
        if query.trim().is_empty() {
            return self.snapshot.iter().collect();
        }

        let needle = query.to_lowercase();
        self.snapshot
            .iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record.value.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// 导出快照的 JSON 视图（只读视图，不是持久化格式）
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }
}
