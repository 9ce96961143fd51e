//! 测试工具模块
//!
//! 系统访问器的测试会改动真实的进程环境和 HOME 指向，
//! 这里提供自动恢复的守卫，避免测试之间互相污染。

use std::collections::HashMap;
use std::env;

/// 环境变量守卫 - 释放时恢复创建时的进程环境
pub struct EnvGuard {
    original_vars: HashMap<String, String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    /// 记录当前全部进程环境变量
    pub fn new() -> Self {
        Self {
            original_vars: env::vars().collect(),
        }
    }

    /// 设置测试环境变量（自动包装为 unsafe）
    pub fn set_var(&self, key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
    }

    /// 移除环境变量（自动包装为 unsafe）
    pub fn remove_var(&self, key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // 移除测试新增的变量
        let current: Vec<String> = env::vars().map(|(k, _)| k).collect();
        for key in current {
            if !self.original_vars.contains_key(&key) {
                self.remove_var(&key);
            }
        }

        // 恢复原始值
        for (key, value) in &self.original_vars {
            if env::var(key).as_deref() != Ok(value) {
                self.set_var(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_restores_on_drop() {
        {
            let guard = EnvGuard::new();
            guard.set_var("ENVDESK_GUARD_VAR", "temporary");
            assert_eq!(env::var("ENVDESK_GUARD_VAR").unwrap(), "temporary");
        }
        // 守卫释放后，测试新增的变量被清理
        assert!(env::var("ENVDESK_GUARD_VAR").is_err());
    }

    #[test]
    #[serial]
    fn test_env_guard_restores_overwritten_value() {
        let outer = EnvGuard::new();
        outer.set_var("ENVDESK_GUARD_KEEP", "before");
        {
            let inner = EnvGuard::new();
            inner.set_var("ENVDESK_GUARD_KEEP", "after");
        }
        assert_eq!(env::var("ENVDESK_GUARD_KEEP").unwrap(), "before");
    }
}
