//! # 辅助按钮动作
//!
//! - `delete_last_files` - 删除最近生成的文件（网页版不支持，固定提示）
//! - `reset_counters` - 把服务端自动计数器重置为默认值
//! - `show_folder` - 提示默认保存目录
//! - `download_desktop_tool` - 下载桌面版工具（两个入口共用）

use crate::commands::controller::{ActionOutcome, Dialogs, FormController, NETWORK_ERROR_PREFIX};
use crate::commands::generate::server_error;
use crate::models::state::{Counters, DEFAULT_AUTO_ID_COUNTER, DEFAULT_AUTO_RESULT_ID_COUNTER};
use crate::models::status::StatusLevel;
use crate::services::backend::{Backend, endpoints};

pub const DELETE_CONFIRM: &str = "Bạn có chắc chắn muốn xóa các file đã tạo cuối cùng không?";
pub const MSG_DELETE_UNSUPPORTED: &str = "Chức năng xóa file chưa khả dụng trong phiên bản web";
pub const MSG_RESET_OK: &str = "✅ Đã reset ID về mặc định";
pub const MSG_RESET_FALLBACK: &str = "Lỗi khi reset ID";
pub const MSG_FOLDER: &str = "📁 Thư mục: Desktop (mặc định)";
pub const MSG_DESKTOP_DOWNLOAD: &str = "✅ Đang tải Desktop Tool...";

/// 重置确认提示，列出两个默认值
pub fn reset_confirm_message() -> String {
    format!(
        "Bạn có chắc chắn muốn reset ID về giá trị mặc định không?\nID mặc định: {}\nResult ID mặc định: {}",
        DEFAULT_AUTO_ID_COUNTER, DEFAULT_AUTO_RESULT_ID_COUNTER
    )
}

impl<B: Backend, D: Dialogs> FormController<B, D> {
    /// 删除最近生成的文件
    ///
    /// 网页版不跟踪服务端生成的单个文件，确认后总是提示不支持。
    pub fn delete_last_files(&mut self) -> ActionOutcome {
        if !self.dialogs.confirm(DELETE_CONFIRM) {
            return ActionOutcome::Cancelled;
        }
        self.show_error_message(MSG_DELETE_UNSUPPORTED);
        ActionOutcome::Failed(MSG_DELETE_UNSUPPORTED.to_string())
    }

    /// 重置服务端计数器
    ///
    /// 成功时用响应中的值覆盖本地镜像，不考虑之前的取值。
    pub async fn reset_counters(&mut self) -> ActionOutcome {
        if !self.dialogs.confirm(&reset_confirm_message()) {
            return ActionOutcome::Cancelled;
        }

        let result = self.backend.reset_counters().await;
        match result {
            Ok(resp) if resp.success => {
                self.state.counters = Counters {
                    auto_id_counter: resp.auto_id_counter.unwrap_or(DEFAULT_AUTO_ID_COUNTER),
                    auto_result_id_counter: resp
                        .auto_result_id_counter
                        .unwrap_or(DEFAULT_AUTO_RESULT_ID_COUNTER),
                };
                log::info!(
                    "计数器已重置: {:?} {}",
                    self.state.counters,
                    resp.message.as_deref().unwrap_or_default()
                );
                self.update_status(MSG_RESET_OK, StatusLevel::Success);
                ActionOutcome::Completed
            }
            Ok(resp) => {
                let message = server_error(resp.error, MSG_RESET_FALLBACK);
                self.show_error_message(message.clone());
                ActionOutcome::Failed(message)
            }
            Err(cause) => {
                let message = format!("{}{}", NETWORK_ERROR_PREFIX, cause);
                self.show_error_message(message.clone());
                ActionOutcome::Transport(message)
            }
        }
    }

    /// 目录按钮：只更新状态栏
    pub fn show_folder(&mut self) {
        self.update_status(MSG_FOLDER, StatusLevel::Info);
    }

    /// 下载桌面版工具
    pub fn download_desktop_tool(&mut self) {
        self.page.navigate(
            endpoints::DOWNLOAD_DESKTOP,
            Some(endpoints::DESKTOP_TOOL_FILENAME.to_string()),
        );
        self.update_status(MSG_DESKTOP_DOWNLOAD, StatusLevel::Success);
    }
}
