//! # 表单控制器
//!
//! `FormController` 持有页面模型、控制器状态、字段存储和服务端连接，
//! 所有用户事件都通过它的方法进入。各类动作的实现分布在同级模块中：
//! - `form` - 字段编辑、神兽选择、ID 自增、启动时恢复字段
//! - `generate` - 单个生成、批量生成、结果 ZIP 下载
//! - `files` - 文件预览和单文件下载
//! - `maintenance` - 删除、重置计数器、目录提示、桌面工具下载
//! - `keyboard` - 全局快捷键
//!
//! ## 执行模型
//! 控制器通过 `&mut self` 驱动，同一时刻只有一个动作在执行：
//! 禁用按钮 → 显示进度 → 请求 → 隐藏进度 → 恢复按钮，严格按顺序完成。

use std::time::Instant;

use crate::models::state::ControllerState;
use crate::models::status::StatusLevel;
use crate::services::backend::Backend;
use crate::services::field_store::FieldStore;
use crate::services::page::{ModalId, Page};

/// 网络错误前缀
pub(crate) const NETWORK_ERROR_PREFIX: &str = "Lỗi mạng: ";

/// 确认对话框
///
/// 浏览器中对应 `confirm()`；终端前端读取 y/n，测试使用预设答案。
pub trait Dialogs {
    /// 返回 true 表示用户确认
    fn confirm(&mut self, message: &str) -> bool;
}

/// 一次用户动作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 动作完成
    Completed,
    /// 用户在确认框中取消
    Cancelled,
    /// 客户端校验未通过，没有发出请求
    Rejected(String),
    /// 服务端返回 `success: false`（或功能不可用）
    Failed(String),
    /// 传输层失败
    Transport(String),
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }

    /// 需要展示给用户的错误消息
    pub fn message(&self) -> Option<&str> {
        match self {
            ActionOutcome::Rejected(msg)
            | ActionOutcome::Failed(msg)
            | ActionOutcome::Transport(msg) => Some(msg),
            ActionOutcome::Completed | ActionOutcome::Cancelled => None,
        }
    }
}

/// 表单控制器
pub struct FormController<B: Backend, D: Dialogs> {
    pub(crate) backend: B,
    pub(crate) dialogs: D,
    pub(crate) page: Page,
    pub(crate) state: ControllerState,
    pub(crate) store: FieldStore,
}

impl<B: Backend, D: Dialogs> FormController<B, D> {
    pub fn new(backend: B, dialogs: D, store: FieldStore) -> Self {
        Self {
            backend,
            dialogs,
            page: Page::new(),
            state: ControllerState::default(),
            store,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// 覆盖状态栏
    pub fn update_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.page.update_status(message, level);
    }

    /// 在页面顶部显示错误横幅
    pub fn show_error_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.page.show_error_message(message, Instant::now());
    }

    /// 点击模态框背景：关闭该模态框
    pub fn click_backdrop(&mut self, id: ModalId) {
        self.page.hide_modal(id);
    }

    /// 处理到期的定时动作（横幅过期、延时关闭、字段写盘）
    pub async fn tick(&mut self, now: Instant) {
        self.page.tick(now);
        self.store.flush_due(now).await;
    }

    /// 退出前把未写盘的字段立即保存
    pub async fn shutdown(&mut self) {
        self.store.flush().await;
    }
}
