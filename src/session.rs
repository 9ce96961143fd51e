//! 编辑会话状态机
//!
//! 一次新增或编辑操作的全部暂存状态。会话独占自己的工作副本，
//! 从不与目录快照里的记录共享；保存成功或取消后会话销毁。
//! 同一时刻最多只有一个会话打开，`Editor` 负责这条纪律。

use crate::codec::PathListCodec;
use crate::error::Result;
use crate::store::EnvironmentStore;
use crate::types::{PathSegment, VariableRecord};

/// 值编辑模式，每次打开编辑时由内容重新推导
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// 单值：直接编辑原始值
    Single,
    /// 多值：按分隔符解码为有序段列表编辑
    Multi,
}

/// 会话种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Adding,
    Editing,
}

/// 保存的会话级结果
///
/// 名称校验失败不是存储错误：会话保持打开等待修正。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 保存成功，会话已关闭，调用方应重新加载目录
    Saved,
    /// 工作名称为空，会话保持打开
    NameRequired,
    /// 当前没有打开的会话
    NoSession,
}

/// 一次进行中的新增/编辑会话
#[derive(Debug, Clone)]
pub struct EditSession {
    record: VariableRecord,
    kind: SessionKind,
    mode: ValueMode,
    segments: Vec<PathSegment>,
    dialog_title: String,
}

impl EditSession {
    fn adding() -> Self {
        Self {
            record: VariableRecord::new_blank(),
            kind: SessionKind::Adding,
            mode: ValueMode::Single,
            segments: Vec::new(),
            dialog_title: "添加环境变量".to_string(),
        }
    }

    fn editing(source: &VariableRecord) -> Self {
        let mode = if PathListCodec::is_multi_value(&source.value) {
            ValueMode::Multi
        } else {
            ValueMode::Single
        };

        let segments = match mode {
            ValueMode::Multi => PathListCodec::decode(&source.value)
                .into_iter()
                .map(PathSegment::new)
                .collect(),
            ValueMode::Single => Vec::new(),
        };

        Self {
            record: VariableRecord {
                name: source.name.clone(),
                value: source.value.clone(),
                original_name: source.name.clone(),
                is_new: false,
            },
            kind: SessionKind::Editing,
            mode,
            segments,
            dialog_title: "编辑环境变量".to_string(),
        }
    }

    #[must_use]
    pub fn record(&self) -> &VariableRecord {
        &self.record
    }

    /// 工作副本的可变引用，供调用方填写名称和单值
    pub fn record_mut(&mut self) -> &mut VariableRecord {
        &mut self.record
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn dialog_title(&self) -> &str {
        &self.dialog_title
    }

    /// 追加一个空段；仅多值模式可用
    pub fn add_segment(&mut self) -> bool {
        if self.mode != ValueMode::Multi {
            return false;
        }
        self.segments.push(PathSegment::default());
        true
    }

    /// 修改指定段的文本
    pub fn set_segment_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        if self.mode != ValueMode::Multi {
            return false;
        }
        match self.segments.get_mut(index) {
            Some(segment) => {
                segment.text = text.into();
                true
            }
            None => false,
        }
    }

    /// 移除指定段
    pub fn remove_segment(&mut self, index: usize) -> bool {
        if self.mode != ValueMode::Multi || index >= self.segments.len() {
            return false;
        }
        self.segments.remove(index);
        true
    }

    /// 与上一段交换；第一段上移是无操作
    pub fn move_up(&mut self, index: usize) -> bool {
        if self.mode != ValueMode::Multi || index == 0 || index >= self.segments.len() {
            return false;
        }
        self.segments.swap(index, index - 1);
        true
    }

    /// 与下一段交换；最后一段下移是无操作
    pub fn move_down(&mut self, index: usize) -> bool {
        if self.mode != ValueMode::Multi || index + 1 >= self.segments.len() {
            return false;
        }
        self.segments.swap(index, index + 1);
        true
    }

    /// 计算最终要保存的值：多值模式重新编码段列表，单值取原始字段
    fn value_to_save(&self) -> String {
        match self.mode {
            ValueMode::Multi => {
                PathListCodec::encode(self.segments.iter().map(|s| s.text.as_str()))
            }
            ValueMode::Single => self.record.value.clone(),
        }
    }
}

/// 编辑协调器：持有存储并强制单会话纪律
pub struct Editor {
    store: EnvironmentStore,
    session: Option<EditSession>,
}

impl Editor {
    pub fn new(store: EnvironmentStore) -> Self {
        Self {
            store,
            session: None,
        }
    }

    #[must_use]
    pub fn store(&self) -> &EnvironmentStore {
        &self.store
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// 打开新增会话；已有会话打开时不做任何事并返回 `false`
    pub fn open_add(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.session = Some(EditSession::adding());
        true
    }

    /// 打开编辑会话，复制源记录为工作副本；已有会话时返回 `false`
    pub fn open_edit(&mut self, source: &VariableRecord) -> bool {
        if self.is_open() {
            return false;
        }
        self.session = Some(EditSession::editing(source));
        true
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    /// 提交当前会话
    ///
    /// 成功时关闭会话并返回 `Saved`，调用方应重新加载目录；
    /// 存储层失败（如目标名已存在）时会话保持打开，错误原样上抛。
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let Some(session) = self.session.as_ref() else {
            return Ok(SaveOutcome::NoSession);
        };

        if session.record.name.trim().is_empty() {
            return Ok(SaveOutcome::NameRequired);
        }

        let value = session.value_to_save();
        if session.record.is_new {
            self.store.add(&session.record.name, &value)?;
        } else {
            self.store
                .update(&session.record.original_name, &session.record.name, &value)?;
        }

        self.session = None;
        Ok(SaveOutcome::Saved)
    }

    /// 无条件丢弃工作状态并关闭会话
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
