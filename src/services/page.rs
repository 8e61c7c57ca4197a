//! # 页面模型
//!
//! 表单页面的内存表示：输入字段、按钮、模态框、状态栏、错误横幅和待执行的导航。
//! 控制器只修改这个模型，渲染交给宿主（终端前端或测试）。
//!
//! ## 模态框
//! 模态框是不透明的 UI 原语，只提供 `show()` / `hide()` 和"获取当前实例"：
//! - 进度框、成功框在页面创建时就存在
//! - 预览框首次使用时才创建（`ensure_preview_modal`），之后复用同一个实例
//!
//! ## 定时行为
//! 页面上所有延时动作都以截止时间（`Instant`）记录，由 `tick(now)` 统一处理：
//! - 错误横幅 5 秒后自动移除
//! - 成功框点击下载后 1 秒自动关闭

use std::time::{Duration, Instant};

use crate::models::api::GeneratedFile;
use crate::models::form::{FormField, FormState};
use crate::models::status::{StatusLevel, StatusMessage};

/// 错误横幅的自动移除时间
pub const BANNER_LIFETIME: Duration = Duration::from_secs(5);

/// 成功框在点击下载后自动关闭的延时
pub const SUCCESS_MODAL_CLOSE_DELAY: Duration = Duration::from_secs(1);

pub const GENERATE_LABEL: &str = "Tạo Files";
pub const AUTO_LABEL: &str = "🤖 Auto";
pub const AUTO_LOADING_LABEL: &str = "⏳ Đang tạo...";
pub const DELETE_LABEL: &str = "🗑️ Xóa Files Cuối";

/// 模态框标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Progress,
    Success,
    Preview,
}

/// 模态框实例
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    visible: bool,
}

impl Modal {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// 按钮状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
    /// 加载中：显示旋转图标，隐藏正常文字
    pub loading: bool,
}

impl Button {
    fn new(label: &str, disabled: bool) -> Self {
        Self {
            label: label.to_string(),
            disabled,
            loading: false,
        }
    }
}

/// 错误横幅（可手动关闭，5 秒后自动移除）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub id: u64,
    pub message: String,
    pub expires_at: Instant,
}

/// 文件卡片上"预览"/"下载"按钮绑定的目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    pub session_key: String,
    pub filename: String,
}

/// 成功框中的单个文件卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCard {
    pub name: String,
    pub kind: String,
    pub size: u64,
    pub session_key: String,
}

impl FileCard {
    pub fn from_file(file: &GeneratedFile, session_key: &str) -> Self {
        Self {
            name: file.name.clone(),
            kind: file.kind.clone(),
            size: file.size,
            session_key: session_key.to_string(),
        }
    }

    pub fn preview_action(&self) -> FileAction {
        FileAction {
            session_key: self.session_key.clone(),
            filename: self.name.clone(),
        }
    }

    pub fn download_action(&self) -> FileAction {
        self.preview_action()
    }
}

/// 批量生成的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSummary {
    pub total_creatures: u64,
    pub total_files: u64,
    /// 固定的四类目录结构
    pub folders: [&'static str; 4],
    pub filename: String,
}

/// 成功框正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessContent {
    /// 单个神兽：每个文件一张卡片
    Files(Vec<FileCard>),
    /// 批量生成：只展示汇总
    Auto(AutoSummary),
}

/// 下载链接（href + 建议文件名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: Option<String>,
}

/// 一次整页导航（下载），由宿主负责真正执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    pub suggested_name: Option<String>,
}

/// 神兽信息面板
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureInfoPanel {
    pub visible: bool,
    pub copy_id: String,
    pub name: String,
}

/// 表单页面
#[derive(Debug, Clone)]
pub struct Page {
    pub fields: FormState,
    /// 当前获得焦点的字段（校验失败时聚焦到出错字段）
    pub focused: Option<FormField>,

    pub generate_button: Button,
    pub auto_button: Button,
    pub delete_button: Button,

    progress_modal: Modal,
    success_modal: Modal,
    /// 预览框：首次预览时才创建
    preview_modal: Option<Modal>,

    pub success_content: Option<SuccessContent>,
    pub success_download: Option<DownloadLink>,
    pub preview_file: Option<GeneratedFile>,

    pub creature_info: CreatureInfoPanel,

    status: StatusMessage,

    /// 错误横幅：最新的在最前面
    banners: Vec<ErrorBanner>,
    next_banner_id: u64,

    /// 请求滚动到页面顶部的次数
    pub scroll_to_top_requests: u32,

    navigations: Vec<Navigation>,
    scheduled_hides: Vec<(ModalId, Instant)>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            fields: FormState::default(),
            focused: None,
            generate_button: Button::new(GENERATE_LABEL, false),
            auto_button: Button::new(AUTO_LABEL, false),
            // 删除按钮在第一次生成成功后才启用
            delete_button: Button::new(DELETE_LABEL, true),
            progress_modal: Modal::default(),
            success_modal: Modal::default(),
            preview_modal: None,
            success_content: None,
            success_download: None,
            preview_file: None,
            creature_info: CreatureInfoPanel::default(),
            status: StatusMessage::default(),
            banners: Vec::new(),
            next_banner_id: 1,
            scroll_to_top_requests: 0,
            navigations: Vec::new(),
            scheduled_hides: Vec::new(),
        }
    }

    // ======== 模态框 ========

    /// 获取模态框的当前实例；预览框未创建时返回 `None`
    pub fn modal(&self, id: ModalId) -> Option<&Modal> {
        match id {
            ModalId::Progress => Some(&self.progress_modal),
            ModalId::Success => Some(&self.success_modal),
            ModalId::Preview => self.preview_modal.as_ref(),
        }
    }

    pub fn modal_mut(&mut self, id: ModalId) -> Option<&mut Modal> {
        match id {
            ModalId::Progress => Some(&mut self.progress_modal),
            ModalId::Success => Some(&mut self.success_modal),
            ModalId::Preview => self.preview_modal.as_mut(),
        }
    }

    /// 获取预览框，不存在时先创建
    pub fn ensure_preview_modal(&mut self) -> &mut Modal {
        self.preview_modal.get_or_insert_with(|| {
            log::debug!("创建预览模态框");
            Modal::default()
        })
    }

    pub fn show_modal(&mut self, id: ModalId) {
        match id {
            ModalId::Preview => self.ensure_preview_modal().show(),
            _ => {
                if let Some(modal) = self.modal_mut(id) {
                    modal.show();
                }
            }
        }
    }

    pub fn hide_modal(&mut self, id: ModalId) {
        if let Some(modal) = self.modal_mut(id) {
            modal.hide();
        }
    }

    pub fn is_modal_visible(&self, id: ModalId) -> bool {
        self.modal(id).is_some_and(Modal::is_visible)
    }

    /// 当前可见的模态框
    pub fn visible_modals(&self) -> Vec<ModalId> {
        [ModalId::Progress, ModalId::Success, ModalId::Preview]
            .into_iter()
            .filter(|id| self.is_modal_visible(*id))
            .collect()
    }

    /// 关闭所有可见的模态框，没有打开的模态框时什么也不做
    pub fn hide_all_modals(&mut self) -> usize {
        let visible = self.visible_modals();
        for id in &visible {
            self.hide_modal(*id);
        }
        visible.len()
    }

    /// 在指定时刻关闭模态框
    pub fn schedule_hide(&mut self, id: ModalId, at: Instant) {
        self.scheduled_hides.push((id, at));
    }

    // ======== 状态栏 ========

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// 覆盖状态栏的文本和颜色
    pub fn update_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = StatusMessage {
            text: message.into(),
            level,
        };
    }

    // ======== 错误横幅 ========

    pub fn banners(&self) -> &[ErrorBanner] {
        &self.banners
    }

    /// 在页面顶部插入错误横幅并滚动到顶部
    ///
    /// 多条错误按插入顺序叠放（最新的在最上方），不去重。
    pub fn show_error_message(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_banner_id;
        self.next_banner_id += 1;
        let banner = ErrorBanner {
            id,
            message: message.into(),
            expires_at: now + BANNER_LIFETIME,
        };
        log::debug!("错误横幅 #{}: {}", id, banner.message);
        self.banners.insert(0, banner);
        self.scroll_to_top_requests += 1;
        id
    }

    /// 手动关闭横幅；已被移除时返回 false
    pub fn dismiss_banner(&mut self, id: u64) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.id != id);
        self.banners.len() != before
    }

    // ======== 导航 ========

    /// 记录一次整页导航
    pub fn navigate(&mut self, url: impl Into<String>, suggested_name: Option<String>) {
        let url = url.into();
        log::info!("导航到 {}", url);
        self.navigations.push(Navigation {
            url,
            suggested_name,
        });
    }

    /// 已记录但尚未被宿主执行的导航
    pub fn pending_navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    /// 取出全部待执行导航
    pub fn take_navigations(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.navigations)
    }

    // ======== 定时处理 ========

    /// 处理所有到期的延时动作
    pub fn tick(&mut self, now: Instant) {
        self.banners.retain(|b| b.expires_at > now);

        let (due, pending): (Vec<_>, Vec<_>) = self
            .scheduled_hides
            .drain(..)
            .partition(|(_, at)| *at <= now);
        self.scheduled_hides = pending;
        for (id, _) in due {
            self.hide_modal(id);
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
