//! 内存环境表实现
//!
//! 用内存映射替代真实的进程/机器全局状态，供测试和嵌入场景使用。
//! 名称匹配的大小写行为可配置，用于模拟不同平台的环境表语义。

use crate::accessor::EnvAccessor;
use crate::error::Result;
use crate::types::Scope;
use std::collections::HashMap;
use std::sync::RwLock;

/// 内存环境表访问器
pub struct MemoryAccessor {
    user: RwLock<HashMap<String, String>>,
    machine: RwLock<HashMap<String, String>>,
    case_insensitive: bool,
    elevated: bool,
}

impl Default for MemoryAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccessor {
    /// 创建大小写不敏感的空表（参考平台语义），视为已提权
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: RwLock::new(HashMap::new()),
            machine: RwLock::new(HashMap::new()),
            case_insensitive: true,
            elevated: true,
        }
    }

    /// 创建大小写敏感的空表
    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            case_insensitive: false,
            ..Self::new()
        }
    }

    /// 设置提权信号
    #[must_use]
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// 预填充变量，便于构造测试场景
    #[must_use]
    pub fn with_vars(self, scope: Scope, vars: &[(&str, &str)]) -> Self {
        {
            let mut table = self.table(scope).write().unwrap();
            for (name, value) in vars {
                table.insert((*name).to_string(), (*value).to_string());
            }
        }
        self
    }

    fn table(&self, scope: Scope) -> &RwLock<HashMap<String, String>> {
        match scope {
            Scope::User => &self.user,
            Scope::Machine => &self.machine,
        }
    }

    /// 按配置的大小写语义查找已存储的键名
    fn resolve_key(&self, table: &HashMap<String, String>, name: &str) -> Option<String> {
        if let Some(key) = table.keys().find(|k| k.as_str() == name) {
            return Some(key.clone());
        }
        if self.case_insensitive {
            return table
                .keys()
                .find(|k| k.eq_ignore_ascii_case(name))
                .cloned();
        }
        None
    }

    /// 当前表中的条目数（测试辅助）
    #[must_use]
    pub fn len(&self, scope: Scope) -> usize {
        self.table(scope).read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self, scope: Scope) -> bool {
        self.len(scope) == 0
    }
}

impl EnvAccessor for MemoryAccessor {
    fn enumerate(&self, scope: Scope) -> Result<HashMap<String, String>> {
        Ok(self.table(scope).read().unwrap().clone())
    }

    fn get(&self, name: &str, scope: Scope) -> Result<Option<String>> {
        let table = self.table(scope).read().unwrap();
        Ok(self
            .resolve_key(&table, name)
            .and_then(|key| table.get(&key).cloned()))
    }

    fn set(&self, name: &str, value: Option<&str>, scope: Scope) -> Result<()> {
        let mut table = self.table(scope).write().unwrap();
        let existing = self.resolve_key(&table, name);

        match value {
            Some(value) => {
                // 大小写保留：已有键名不因写入时的大小写不同而改变
                let key = existing.unwrap_or_else(|| name.to_string());
                table.insert(key, value.to_string());
            }
            None => {
                if let Some(key) = existing {
                    table.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let accessor = MemoryAccessor::new();
        accessor.set("FOO", Some("bar"), Scope::User).unwrap();

        assert_eq!(
            accessor.get("FOO", Scope::User).unwrap(),
            Some("bar".to_string())
        );
        assert_eq!(accessor.get("FOO", Scope::Machine).unwrap(), None);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let accessor = MemoryAccessor::new().with_vars(Scope::User, &[("Path", "/bin")]);

        assert_eq!(
            accessor.get("PATH", Scope::User).unwrap(),
            Some("/bin".to_string())
        );
    }

    #[test]
    fn test_case_preserving_update() {
        let accessor = MemoryAccessor::new().with_vars(Scope::User, &[("Path", "/bin")]);

        // 以不同大小写写入时更新原条目，不产生第二个键
        accessor.set("PATH", Some("/usr/bin"), Scope::User).unwrap();

        assert_eq!(accessor.len(Scope::User), 1);
        let table = accessor.enumerate(Scope::User).unwrap();
        assert_eq!(table.get("Path"), Some(&"/usr/bin".to_string()));
    }

    #[test]
    fn test_case_sensitive_mode() {
        let accessor = MemoryAccessor::case_sensitive().with_vars(Scope::User, &[("Path", "/bin")]);

        assert_eq!(accessor.get("PATH", Scope::User).unwrap(), None);

        accessor.set("PATH", Some("/usr/bin"), Scope::User).unwrap();
        assert_eq!(accessor.len(Scope::User), 2);
    }

    #[test]
    fn test_delete_via_none() {
        let accessor = MemoryAccessor::new().with_vars(Scope::User, &[("FOO", "1")]);

        accessor.set("foo", None, Scope::User).unwrap();
        assert!(accessor.is_empty(Scope::User));

        // 删除不存在的变量是无操作
        accessor.set("MISSING", None, Scope::User).unwrap();
    }

    #[test]
    fn test_scopes_are_isolated() {
        let accessor = MemoryAccessor::new()
            .with_vars(Scope::User, &[("A", "user")])
            .with_vars(Scope::Machine, &[("A", "machine")]);

        assert_eq!(
            accessor.get("A", Scope::User).unwrap(),
            Some("user".to_string())
        );
        assert_eq!(
            accessor.get("A", Scope::Machine).unwrap(),
            Some("machine".to_string())
        );
    }

    #[test]
    fn test_elevated_flag() {
        assert!(MemoryAccessor::new().is_elevated());
        assert!(!MemoryAccessor::new().with_elevated(false).is_elevated());
    }
}
