//! # 生成动作
//!
//! - `submit` - 单个神兽生成（表单提交、Ctrl+Enter 共用同一路径）
//! - `auto_generate` - 为所有最高等级神兽批量生成
//! - `download_result_zip` - 成功框中的 ZIP 下载按钮
//!
//! 两个生成流程的结果都分三类返回：服务端失败（`success: false`）
//! 使用服务端给出的错误文本或固定回退文本；传输失败显示底层原因。
//! 无论结果如何，触发按钮都会被恢复为可用。

use std::time::Instant;

use crate::commands::controller::{ActionOutcome, Dialogs, FormController, NETWORK_ERROR_PREFIX};
use crate::models::api::{AutoGenerateResponse, GenerateResponse};
use crate::models::status::StatusLevel;
use crate::services::backend::Backend;
use crate::services::page::{
    AUTO_LABEL, AUTO_LOADING_LABEL, AutoSummary, Button, DownloadLink, FileCard, ModalId,
    SUCCESS_MODAL_CLOSE_DELAY, SuccessContent,
};
use crate::services::validation::{self, MSG_AUTHOR_REQUIRED};

pub const MSG_GENERATE_OK: &str = "✅ Tạo files thành công!";
pub const MSG_GENERATE_FALLBACK: &str = "Đã xảy ra lỗi khi tạo file mod";
pub const MSG_AUTO_RUNNING: &str = "Đang tạo auto mod...";
pub const MSG_AUTO_FALLBACK: &str = "Đã xảy ra lỗi khi tạo auto mod";

/// 批量生成前的确认提示
pub const AUTO_CONFIRM: &str = "Bạn có muốn tạo files cho tất cả thần thú (level cao nhất) không?\n\
     Điều này sẽ tạo một file ZIP với tất cả các mod chỉ cho thần thú level cao nhất.";

/// 批量生成 ZIP 内的固定目录结构
pub const AUTO_FOLDERS: [&str; 4] = ["Actor", "Horse", "Crafting", "Item"];

/// 服务端错误文本：缺失或为空时使用回退文本
pub(crate) fn server_error(error: Option<String>, fallback: &str) -> String {
    error
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn show_loading_state(button: &mut Button) {
    button.loading = true;
    button.disabled = true;
}

fn hide_loading_state(button: &mut Button) {
    button.loading = false;
    button.disabled = false;
}

impl<B: Backend, D: Dialogs> FormController<B, D> {
    /// 提交表单
    ///
    /// 校验不通过时只显示错误并聚焦出错字段，不发请求。
    /// 每次提交只请求一次，不重试。
    pub async fn submit(&mut self) -> ActionOutcome {
        if let Err(err) = validation::validate_form(&self.page.fields) {
            self.page.focused = Some(err.field);
            self.show_error_message(err.message);
            return ActionOutcome::Rejected(err.message.to_string());
        }

        show_loading_state(&mut self.page.generate_button);
        self.page.show_modal(ModalId::Progress);

        let form = self.page.fields.clone();
        log::info!(
            "提交生成: creature={} id={}",
            form.creature.value,
            form.id_value
        );
        let result = self.backend.generate(&form).await;

        self.page.hide_modal(ModalId::Progress);
        hide_loading_state(&mut self.page.generate_button);

        match result {
            Ok(resp) if resp.success => {
                self.show_success_modal(resp);
                self.page.delete_button.disabled = false;
                self.update_status(MSG_GENERATE_OK, StatusLevel::Success);
                ActionOutcome::Completed
            }
            Ok(resp) => {
                let message = server_error(resp.error, MSG_GENERATE_FALLBACK);
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

    /// 填充并显示单个生成的成功框
    fn show_success_modal(&mut self, resp: GenerateResponse) {
        let session_key = resp.session_key.clone().unwrap_or_default();
        let cards = resp
            .file_details
            .iter()
            .map(|file| FileCard::from_file(file, &session_key))
            .collect();

        self.page.success_content = Some(SuccessContent::Files(cards));
        self.page.success_download = resp.zip_url().map(|href| DownloadLink {
            href: href.to_string(),
            filename: resp.zip_filename().map(str::to_string),
        });

        self.state
            .replace_session(resp.session_key, resp.file_details);
        self.page.show_modal(ModalId::Success);
    }

    /// 批量生成
    ///
    /// 需要用户确认（取消时静默返回），并且作者名不能为空。
    pub async fn auto_generate(&mut self) -> ActionOutcome {
        if !self.dialogs.confirm(AUTO_CONFIRM) {
            return ActionOutcome::Cancelled;
        }

        let author = self.page.fields.author_value.trim().to_string();
        if author.is_empty() {
            self.show_error_message(MSG_AUTHOR_REQUIRED);
            return ActionOutcome::Rejected(MSG_AUTHOR_REQUIRED.to_string());
        }

        self.page.auto_button.disabled = true;
        self.page.auto_button.label = AUTO_LOADING_LABEL.to_string();
        self.page.show_modal(ModalId::Progress);
        self.update_status(MSG_AUTO_RUNNING, StatusLevel::Warning);

        log::info!("提交批量生成: author={}", author);
        let result = self.backend.auto_generate(&author).await;

        self.page.hide_modal(ModalId::Progress);
        self.page.auto_button.disabled = false;
        self.page.auto_button.label = AUTO_LABEL.to_string();

        match result {
            Ok(resp) if resp.success => {
                let status = format!(
                    "✅ Tạo thành công {} files cho {} thần thú!",
                    resp.total_files, resp.total_creatures
                );
                self.show_auto_success_modal(resp);
                self.update_status(status, StatusLevel::Success);
                ActionOutcome::Completed
            }
            Ok(resp) => {
                let message = server_error(resp.error, MSG_AUTO_FALLBACK);
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

    /// 填充并显示批量生成的汇总
    fn show_auto_success_modal(&mut self, resp: AutoGenerateResponse) {
        let filename = resp.filename.clone().unwrap_or_default();

        self.page.success_content = Some(SuccessContent::Auto(AutoSummary {
            total_creatures: resp.total_creatures,
            total_files: resp.total_files,
            folders: AUTO_FOLDERS,
            filename: filename.clone(),
        }));
        self.page.success_download = resp.download_url.map(|href| DownloadLink {
            href,
            filename: Some(filename).filter(|f| !f.is_empty()),
        });

        // 批量结果没有单文件列表
        self.state.replace_session(resp.session_key, Vec::new());
        self.page.show_modal(ModalId::Success);
    }

    /// 成功框的下载按钮：导航到 ZIP 地址，1 秒后关闭成功框
    ///
    /// # 返回值
    /// 成功框中没有下载链接时返回 false
    pub fn download_result_zip(&mut self) -> bool {
        let Some(link) = self.page.success_download.clone() else {
            return false;
        };
        self.page.navigate(link.href, link.filename);
        self.page
            .schedule_hide(ModalId::Success, Instant::now() + SUCCESS_MODAL_CLOSE_DELAY);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::commands::test_support::{FakeBackend, controller_with, filled_controller};
    use crate::models::api::GeneratedFile;
    use crate::models::form::{CreatureChoice, FormField};
    use crate::services::validation::{MSG_CREATURE_REQUIRED, MSG_ID_POSITIVE};

    fn file(name: &str, kind: &str, size: u64) -> GeneratedFile {
        GeneratedFile {
            name: name.to_string(),
            kind: kind.to_string(),
            size,
            full_content: None,
        }
    }

    fn two_file_response() -> GenerateResponse {
        serde_json::from_value(serde_json::json!({
            "success": true,
            "session_key": "files_20240101_120000",
            "file_details": [
                {"name": "actor_3430.json", "type": "actor", "size": 120},
                {"name": "item_3430.json", "type": "item", "size": 80}
            ],
            "metadata": {"zip_filename": "3430_Khung_Long.zip"},
            "download_zip_url": "/download_zip/files_20240101_120000"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_author_never_hits_network() {
        let mut ctl = filled_controller(FakeBackend::default());
        ctl.edit_field(FormField::Author, "   ");

        let outcome = ctl.submit().await;

        assert_eq!(outcome, ActionOutcome::Rejected(MSG_AUTHOR_REQUIRED.into()));
        assert!(ctl.backend().calls().is_empty());
        assert_eq!(ctl.page().banners()[0].message, MSG_AUTHOR_REQUIRED);
        assert_eq!(ctl.page().focused, Some(FormField::Author));
    }

    #[tokio::test]
    async fn test_empty_creature_never_hits_network() {
        let mut ctl = filled_controller(FakeBackend::default());
        ctl.select_creature(CreatureChoice::default());

        let outcome = ctl.submit().await;

        assert_eq!(outcome, ActionOutcome::Rejected(MSG_CREATURE_REQUIRED.into()));
        assert!(ctl.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_id_must_be_positive() {
        for id in ["0", "-4"] {
            let mut ctl = filled_controller(FakeBackend::default());
            ctl.edit_field(FormField::Id, id);
            assert_eq!(
                ctl.submit().await,
                ActionOutcome::Rejected(MSG_ID_POSITIVE.into())
            );
            assert!(ctl.backend().calls().is_empty());
        }

        let mut ctl = filled_controller(FakeBackend::default());
        ctl.edit_field(FormField::Id, "5");
        assert!(ctl.submit().await.is_completed());
        assert_eq!(ctl.backend().calls(), vec!["generate"]);
    }

    #[tokio::test]
    async fn test_success_renders_one_card_per_file() {
        let backend = FakeBackend {
            generate: Ok(two_file_response()),
            ..FakeBackend::default()
        };
        let mut ctl = filled_controller(backend);

        assert!(ctl.submit().await.is_completed());

        let page = ctl.page();
        let Some(SuccessContent::Files(cards)) = &page.success_content else {
            panic!("expected file cards");
        };
        assert_eq!(cards.len(), 2);
        for card in cards {
            assert_eq!(card.preview_action().session_key, "files_20240101_120000");
            assert_eq!(card.download_action().filename, card.name);
        }
        assert!(page.is_modal_visible(ModalId::Success));
        assert!(!page.is_modal_visible(ModalId::Progress));
        assert!(!page.generate_button.disabled);
        assert!(!page.delete_button.disabled);
        assert_eq!(page.status().text, MSG_GENERATE_OK);
        assert_eq!(
            page.success_download,
            Some(DownloadLink {
                href: "/download_zip/files_20240101_120000".into(),
                filename: Some("3430_Khung_Long.zip".into()),
            })
        );

        let state = ctl.state();
        assert_eq!(state.session_key.as_deref(), Some("files_20240101_120000"));
        assert_eq!(
            state.last_generated_files,
            vec![file("actor_3430.json", "actor", 120), file("item_3430.json", "item", 80)]
        );
    }

    #[tokio::test]
    async fn test_server_failure_shows_error_text() {
        let backend = FakeBackend {
            generate: Ok(GenerateResponse {
                success: false,
                error: Some("X".into()),
                ..GenerateResponse::default()
            }),
            ..FakeBackend::default()
        };
        let mut ctl = filled_controller(backend);

        assert_eq!(ctl.submit().await, ActionOutcome::Failed("X".into()));
        assert_eq!(ctl.page().banners()[0].message, "X");
        assert!(!ctl.page().is_modal_visible(ModalId::Success));
        assert!(!ctl.page().generate_button.disabled);
        assert!(ctl.page().delete_button.disabled);
    }

    #[tokio::test]
    async fn test_server_failure_without_error_uses_fallback() {
        let backend = FakeBackend {
            generate: Ok(GenerateResponse::default()),
            ..FakeBackend::default()
        };
        let mut ctl = filled_controller(backend);

        ctl.submit().await;

        assert_eq!(ctl.page().banners()[0].message, MSG_GENERATE_FALLBACK);
        assert!(!ctl.page().is_modal_visible(ModalId::Success));
    }

    #[tokio::test]
    async fn test_network_failure_restores_controls() {
        let backend = FakeBackend {
            generate: Err("connection refused".into()),
            ..FakeBackend::default()
        };
        let mut ctl = filled_controller(backend);

        let outcome = ctl.submit().await;

        assert_eq!(
            outcome,
            ActionOutcome::Transport("Lỗi mạng: connection refused".into())
        );
        assert!(!ctl.page().generate_button.disabled);
        assert!(!ctl.page().generate_button.loading);
        assert!(ctl.page().visible_modals().is_empty());
    }

    #[tokio::test]
    async fn test_auto_generate_requires_confirmation() {
        let mut ctl = controller_with(FakeBackend::default(), vec![false]);
        ctl.edit_field(FormField::Author, "tac_gia");

        assert_eq!(ctl.auto_generate().await, ActionOutcome::Cancelled);
        assert!(ctl.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_auto_generate_requires_author() {
        let mut ctl = controller_with(FakeBackend::default(), vec![true]);

        let outcome = ctl.auto_generate().await;

        assert_eq!(outcome, ActionOutcome::Rejected(MSG_AUTHOR_REQUIRED.into()));
        assert!(ctl.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_auto_generate_success_renders_summary() {
        let backend = FakeBackend {
            auto_generate: Ok(AutoGenerateResponse {
                success: true,
                total_files: 160,
                total_creatures: 62,
                filename: Some("miniworld_auto_mod_tac_gia.zip".into()),
                download_url: Some("/download_zip/auto_files_1".into()),
                session_key: Some("auto_files_1".into()),
                error: None,
            }),
            ..FakeBackend::default()
        };
        let mut ctl = controller_with(backend, vec![true]);
        ctl.edit_field(FormField::Author, " tac_gia ");

        assert!(ctl.auto_generate().await.is_completed());

        assert_eq!(ctl.backend().calls(), vec!["auto_generate:tac_gia"]);
        let page = ctl.page();
        assert_eq!(
            page.success_content,
            Some(SuccessContent::Auto(AutoSummary {
                total_creatures: 62,
                total_files: 160,
                folders: AUTO_FOLDERS,
                filename: "miniworld_auto_mod_tac_gia.zip".into(),
            }))
        );
        assert_eq!(page.status().text, "✅ Tạo thành công 160 files cho 62 thần thú!");
        assert_eq!(page.auto_button.label, AUTO_LABEL);
        assert!(!page.auto_button.disabled);
        assert_eq!(ctl.state().session_key.as_deref(), Some("auto_files_1"));
    }

    #[tokio::test]
    async fn test_auto_generate_failure_re_enables_button() {
        let backend = FakeBackend {
            auto_generate: Err("timed out".into()),
            ..FakeBackend::default()
        };
        let mut ctl = controller_with(backend, vec![true]);
        ctl.edit_field(FormField::Author, "tac_gia");

        assert!(matches!(
            ctl.auto_generate().await,
            ActionOutcome::Transport(_)
        ));
        assert!(!ctl.page().auto_button.disabled);
        assert_eq!(ctl.page().auto_button.label, AUTO_LABEL);
        assert!(!ctl.page().is_modal_visible(ModalId::Progress));
    }

    #[tokio::test]
    async fn test_zip_download_closes_success_modal_later() {
        let backend = FakeBackend {
            generate: Ok(two_file_response()),
            ..FakeBackend::default()
        };
        let mut ctl = filled_controller(backend);
        ctl.submit().await;

        assert!(ctl.download_result_zip());
        let navs = ctl.page_mut().take_navigations();
        assert_eq!(navs.len(), 1);
        assert_eq!(navs[0].url, "/download_zip/files_20240101_120000");
        assert_eq!(navs[0].suggested_name.as_deref(), Some("3430_Khung_Long.zip"));

        assert!(ctl.page().is_modal_visible(ModalId::Success));
        ctl.tick(Instant::now() + Duration::from_secs(2)).await;
        assert!(!ctl.page().is_modal_visible(ModalId::Success));
    }
}
