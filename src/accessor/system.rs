//! 跨平台系统环境表实现
//!
//! 提供真实平台的环境表读写：
//! - Windows: 通过注册表读写（用户级 HKCU\Environment，机器级
//!   Session Manager\Environment），名称匹配大小写不敏感
//! - Linux/macOS: 用户级读取进程环境，写入持久化到 shell 配置文件
//!   (~/.bashrc, ~/.zshrc 等)；机器级不受支持

use crate::accessor::EnvAccessor;
use crate::error::Result;
use crate::types::Scope;
use std::collections::HashMap;

#[cfg(unix)]
use crate::error::EnvError;
#[cfg(unix)]
use std::path::PathBuf;

/// 系统环境表访问器
#[derive(Default)]
pub struct SystemAccessor;

impl SystemAccessor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EnvAccessor for SystemAccessor {
    fn enumerate(&self, scope: Scope) -> Result<HashMap<String, String>> {
        #[cfg(windows)]
        {
            windows_impl::enumerate(scope)
        }

        #[cfg(unix)]
        {
            match scope {
                Scope::User => Ok(std::env::vars().collect()),
                // 机器级表在 Unix 上不存在，读取视为空表
                Scope::Machine => Ok(HashMap::new()),
            }
        }
    }

    fn get(&self, name: &str, scope: Scope) -> Result<Option<String>> {
        #[cfg(windows)]
        {
            windows_impl::get(name, scope)
        }

        #[cfg(unix)]
        {
            match scope {
                Scope::User => Ok(std::env::var(name).ok()),
                Scope::Machine => Ok(None),
            }
        }
    }

    fn set(&self, name: &str, value: Option<&str>, scope: Scope) -> Result<()> {
        #[cfg(windows)]
        {
            windows_impl::set(name, value, scope)
        }

        #[cfg(unix)]
        {
            if scope == Scope::Machine {
                return Err(EnvError::UnsupportedScope(scope));
            }

            match value {
                Some(value) => {
                    unsafe {
                        std::env::set_var(name, value);
                    }
                    unix_impl::persist_var(name, value)
                }
                None => {
                    unsafe {
                        std::env::remove_var(name);
                    }
                    unix_impl::remove_persisted(name)
                }
            }
        }
    }

    fn is_elevated(&self) -> bool {
        #[cfg(windows)]
        {
            windows_impl::machine_key_writable()
        }

        #[cfg(unix)]
        {
            // Unix 下没有机器级表可写，始终视为未提权
            false
        }
    }

    fn case_insensitive(&self) -> bool {
        cfg!(windows)
    }
}

// ==================== Windows 实现 ====================

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use crate::error::EnvError;
    use winreg::RegKey;
    use winreg::enums::{
        HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE,
    };
    use winreg::types::FromRegValue;

    const MACHINE_ENV_PATH: &str =
        r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

    fn open_key(scope: Scope, writable: bool) -> Result<RegKey> {
        let flags = if writable { KEY_READ | KEY_SET_VALUE } else { KEY_READ };
        let result = match scope {
            Scope::User => {
                RegKey::predef(HKEY_CURRENT_USER).open_subkey_with_flags("Environment", flags)
            }
            Scope::Machine => RegKey::predef(HKEY_LOCAL_MACHINE)
                .open_subkey_with_flags(MACHINE_ENV_PATH, flags),
        };

        result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                EnvError::PermissionDenied(format!("打开 {scope} 级环境表失败: {e}"))
            } else {
                EnvError::Io(e)
            }
        })
    }

    pub fn enumerate(scope: Scope) -> Result<HashMap<String, String>> {
        let key = open_key(scope, false)?;
        let mut vars = HashMap::new();

        for item in key.enum_values() {
            let (name, value) = item?;
            // 非字符串类型的注册表值不属于环境表语义，跳过
            if let Ok(text) = String::from_reg_value(&value) {
                vars.insert(name, text);
            }
        }

        Ok(vars)
    }

    pub fn get(name: &str, scope: Scope) -> Result<Option<String>> {
        let key = open_key(scope, false)?;
        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EnvError::Io(e)),
        }
    }

    pub fn set(name: &str, value: Option<&str>, scope: Scope) -> Result<()> {
        let key = open_key(scope, true)?;
        match value {
            Some(value) => key.set_value(name, &value).map_err(EnvError::Io),
            None => match key.delete_value(name) {
                Ok(()) => Ok(()),
                // 删除不存在的值是无操作
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(EnvError::Io(e)),
            },
        }
    }

    pub fn machine_key_writable() -> bool {
        open_key(Scope::Machine, true).is_ok()
    }
}

// ==================== Unix 实现 ====================

#[cfg(unix)]
mod unix_impl {
    use super::*;
    use std::fs;

    /// 由本工具写入的条目标记行前缀
    const MARKER: &str = "# envdesk:";

    /// 选择要写入的 shell 配置文件，都不存在时默认 .bashrc
    fn shell_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EnvError::PermissionDenied("无法获取 HOME 目录".to_string()))?;

        for name in [".bashrc", ".zshrc", ".profile"] {
            let path = home.join(name);
            if path.exists() {
                return Ok(path);
            }
        }

        Ok(home.join(".bashrc"))
    }

    /// 过滤掉属于 `key` 的标记行和 export 行
    fn strip_entry(content: &str, key: &str) -> Vec<String> {
        let marker = format!("{MARKER} {key}");
        let export_prefix = format!("export {key}=");

        content
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                trimmed != marker && !trimmed.starts_with(&export_prefix)
            })
            .map(ToString::to_string)
            .collect()
    }

    /// 将变量作为带标记的 export 行写入 shell 配置文件
    pub fn persist_var(key: &str, value: &str) -> Result<()> {
        let path = shell_config_path()?;
        let content = fs::read_to_string(&path).unwrap_or_default();

        let mut lines = strip_entry(&content, key);
        if lines.last().is_some_and(|line| !line.is_empty()) {
            lines.push(String::new());
        }
        lines.push(format!("{MARKER} {key}"));
        lines.push(format!("export {key}={value}"));
        lines.push(String::new());

        fs::write(&path, lines.join("\n"))?;
        Ok(())
    }

    /// 从 shell 配置文件移除变量条目
    pub fn remove_persisted(key: &str) -> Result<()> {
        let path = shell_config_path()?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            // 文件不存在，无需删除
            Err(_) => return Ok(()),
        };

        let lines = strip_entry(&content, key);
        fs::write(&path, lines.join("\n"))?;
        Ok(())
    }
}
