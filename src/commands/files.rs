//! # 文件预览和下载
//!
//! - `preview_file` - 拉取会话内全部文件，按文件名精确匹配后在预览框中展示
//! - `download_single_file` - 整页导航到单文件下载地址
//! - `download_previewed_file` - 预览框中的下载按钮

use crate::commands::controller::{ActionOutcome, Dialogs, FormController};
use crate::models::api::GeneratedFile;
use crate::services::backend::{Backend, endpoints};

pub const MSG_PREVIEW_UNAVAILABLE: &str = "Không thể tải file để xem trước";
pub const PREVIEW_ERROR_PREFIX: &str = "Lỗi khi tải file: ";

impl<B: Backend, D: Dialogs> FormController<B, D> {
    /// 预览会话中的某个文件
    ///
    /// 任何失败都以错误横幅展示，不会打开预览框。
    pub async fn preview_file(&mut self, session_key: &str, filename: &str) -> ActionOutcome {
        let result = self.backend.preview(session_key).await;
        match result {
            Ok(resp) if resp.success => match resp.find(filename) {
                Some(file) => {
                    self.show_file_preview(file.clone());
                    ActionOutcome::Completed
                }
                None => {
                    let message = format!("Không tìm thấy file: {}", filename);
                    self.show_error_message(message.clone());
                    ActionOutcome::Failed(message)
                }
            },
            Ok(_) => {
                self.show_error_message(MSG_PREVIEW_UNAVAILABLE);
                ActionOutcome::Failed(MSG_PREVIEW_UNAVAILABLE.to_string())
            }
            Err(cause) => {
                let message = format!("{}{}", PREVIEW_ERROR_PREFIX, cause);
                self.show_error_message(message.clone());
                ActionOutcome::Transport(message)
            }
        }
    }

    /// 填充预览框（首次使用时创建）并显示
    fn show_file_preview(&mut self, file: GeneratedFile) {
        log::debug!("预览 {} ({} bytes)", file.name, file.size);
        self.page.preview_file = Some(file);
        self.page.ensure_preview_modal().show();
    }

    /// 下载单个文件：只记录导航，不检查响应
    pub fn download_single_file(&mut self, session_key: &str, filename: &str) {
        let url = endpoints::download_single(session_key, filename);
        self.page.navigate(url, None);
    }

    /// 预览框的下载按钮：使用当前会话 key 下载正在预览的文件
    pub fn download_previewed_file(&mut self) -> bool {
        let Some(filename) = self.page.preview_file.as_ref().map(|f| f.name.clone()) else {
            return false;
        };
        let Some(session_key) = self.state.session_key.clone() else {
            log::warn!("没有当前会话，无法下载 {}", filename);
            return false;
        };
        self.download_single_file(&session_key, &filename);
        true
    }
}
