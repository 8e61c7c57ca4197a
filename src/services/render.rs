//! # 终端渲染
//!
//! 把页面模型渲染为纯文本，供终端前端输出：
//! - 状态栏按级别着色（success 绿、error 红、warning 黄、info 青）
//! - 错误横幅、神兽信息面板
//! - 当前可见的模态框内容（成功框文件卡片 / 批量汇总 / 文件预览）

use std::fmt::Write as _;

use colored::Colorize;

use crate::models::api::GeneratedFile;
use crate::models::status::{StatusLevel, StatusMessage};
use crate::services::page::{
    AutoSummary, Button, FileCard, ModalId, Page, SuccessContent,
};

/// 按级别为状态文本着色
pub fn status_line(status: &StatusMessage) -> String {
    let text = status.text.as_str();
    match status.level {
        StatusLevel::Success => text.green().to_string(),
        StatusLevel::Error => text.red().to_string(),
        StatusLevel::Warning => text.yellow().to_string(),
        StatusLevel::Info => text.cyan().to_string(),
    }
}

fn button_line(button: &Button) -> String {
    let label = if button.loading {
        format!("⏳ {}", button.label)
    } else {
        button.label.clone()
    };
    if button.disabled {
        format!("[{}]", label).dimmed().to_string()
    } else {
        format!("[{}]", label)
    }
}

/// 单个文件卡片：名称 + 类型/大小 + 两个动作
pub fn file_card(index: usize, card: &FileCard) -> String {
    format!(
        "  {}. {}\n     Loại: {} | Kích thước: {} bytes   (xem {} / tải {})",
        index + 1,
        card.name.bold(),
        card.kind,
        card.size,
        index + 1,
        index + 1
    )
}

/// 批量生成汇总
pub fn auto_summary(summary: &AutoSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", "Auto Generation hoàn thành!".green().bold());
    let _ = writeln!(out, "  Tổng số thần thú: {}", summary.total_creatures);
    let _ = writeln!(out, "  Tổng số files: {}", summary.total_files);
    let _ = writeln!(out, "  Cấu trúc thư mục: {}", summary.folders.join(", "));
    let _ = write!(out, "  File ZIP: {}", summary.filename);
    out
}

/// 文件预览：文件信息 + 完整内容
pub fn file_preview(file: &GeneratedFile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Tên: {}", file.name);
    let _ = writeln!(out, "  Loại: {}", file.kind);
    let _ = writeln!(out, "  Kích thước: {} bytes", file.size);
    let _ = writeln!(out, "  Nội dung:");
    let _ = write!(out, "{}", file.full_content.as_deref().unwrap_or_default());
    out
}

/// 渲染整个页面
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();

    for banner in page.banners() {
        let _ = writeln!(out, "{} {}", "⚠".red(), banner.message.red().bold());
    }

    let fields = &page.fields;
    let _ = writeln!(out, "Tác giả:   {}", fields.author_value);
    let _ = writeln!(out, "Thần thú:  {}", fields.creature.text);
    let _ = writeln!(out, "ID:        {}", fields.id_value);
    let _ = writeln!(out, "Result ID: {}", fields.result_id_value);

    if page.creature_info.visible {
        let _ = writeln!(
            out,
            "  Copy ID: {}  Tên Item: {}",
            page.creature_info.copy_id, page.creature_info.name
        );
    }

    let _ = writeln!(
        out,
        "{} {} {}",
        button_line(&page.generate_button),
        button_line(&page.auto_button),
        button_line(&page.delete_button)
    );

    if page.is_modal_visible(ModalId::Progress) {
        let _ = writeln!(out, "{}", "⏳ Đang xử lý...".yellow());
    }

    if page.is_modal_visible(ModalId::Success) {
        match &page.success_content {
            Some(SuccessContent::Files(cards)) => {
                let _ = writeln!(out, "{}", "Files đã tạo:".bold());
                for (i, card) in cards.iter().enumerate() {
                    let _ = writeln!(out, "{}", file_card(i, card));
                }
            }
            Some(SuccessContent::Auto(summary)) => {
                let _ = writeln!(out, "{}", auto_summary(summary));
            }
            None => {}
        }
        if let Some(link) = &page.success_download {
            let name = link.filename.as_deref().unwrap_or(&link.href);
            let _ = writeln!(out, "  ZIP: {} (zip)", name);
        }
    }

    if page.is_modal_visible(ModalId::Preview) {
        if let Some(file) = &page.preview_file {
            let _ = writeln!(out, "{}", "Xem trước file".bold());
            let _ = writeln!(out, "{}", file_preview(file));
        }
    }

    let _ = write!(out, "Trạng thái: {}", status_line(page.status()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_status_line_text_is_kept() {
        plain();
        let status = StatusMessage {
            text: "✅ Tạo files thành công!".into(),
            level: StatusLevel::Success,
        };
        assert_eq!(status_line(&status), "✅ Tạo files thành công!");
    }

    #[test]
    fn test_file_card_shows_type_and_size() {
        plain();
        let card = FileCard {
            name: "actor_5.json".into(),
            kind: "actor".into(),
            size: 1024,
            session_key: "files_1".into(),
        };
        let text = file_card(0, &card);
        assert!(text.contains("actor_5.json"));
        assert!(text.contains("Loại: actor | Kích thước: 1024 bytes"));
    }

    #[test]
    fn test_render_page_lists_banners_and_success_files() {
        plain();
        let mut page = Page::new();
        page.show_error_message("Tên tác giả là bắt buộc", Instant::now());
        page.success_content = Some(SuccessContent::Files(vec![FileCard {
            name: "item.json".into(),
            kind: "item".into(),
            size: 12,
            session_key: "files_1".into(),
        }]));
        page.show_modal(ModalId::Success);

        let text = render_page(&page);

        assert!(text.starts_with("⚠ Tên tác giả là bắt buộc"));
        assert!(text.contains("Files đã tạo:"));
        assert!(text.contains("item.json"));
        assert!(text.ends_with("Trạng thái: Sẵn sàng"));
    }

    #[test]
    fn test_hidden_modals_are_not_rendered() {
        plain();
        let mut page = Page::new();
        page.preview_file = Some(GeneratedFile {
            name: "a.json".into(),
            kind: "actor".into(),
            size: 2,
            full_content: Some("{}".into()),
        });

        assert!(!render_page(&page).contains("Xem trước file"));
    }
}
