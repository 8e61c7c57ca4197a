//! # 交互模式的输入行解析
//!
//! 每一行输入对应页面上的一个用户事件：
//!
//! | 输入 | 事件 |
//! |---|---|
//! | `author <v>` / `id <v>` / `result <v>` | 编辑输入框 |
//! | `creature <copy_id>` | 选择神兽（留空清除选择） |
//! | `key <combo>` | 按键，如 `ctrl+z`、`ctrl+enter`、`esc` |
//! | `generate` / `auto` / `delete` / `reset` / `folder` / `desktop` | 点击按钮 |
//! | `view <n>` / `get <n>` | 成功框第 n 张文件卡片的"预览"/"下载" |
//! | `zip` | 成功框的 ZIP 下载按钮 |
//! | `save` | 预览框的下载按钮 |
//! | `close <progress\|success\|preview>` | 点击模态框背景 |
//! | `dismiss <n>` | 关闭第 n 个错误横幅 |

use crate::models::form::FormField;
use crate::services::page::ModalId;
use crate::services::shortcuts::KeyEvent;

/// 一行输入解析后的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Edit(FormField, String),
    Creature(String),
    Key(KeyEvent),
    Generate,
    Auto,
    Delete,
    Reset,
    Folder,
    Desktop,
    /// 成功框文件卡片序号（从 1 开始）
    PreviewCard(usize),
    DownloadCard(usize),
    DownloadZip,
    DownloadPreviewed,
    CloseModal(ModalId),
    DismissBanner(usize),
    /// 空行：只重新渲染
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
author <v> | id <v> | result <v>   sửa trường
creature <copy_id>                 chọn thần thú
key ctrl+z | ctrl+enter | esc      phím tắt
generate | auto | delete | reset | folder | desktop
view <n> | get <n> | zip | save    xem / tải file
close <progress|success|preview>   đóng modal
dismiss <n>                        đóng thông báo lỗi
quit";

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("序号无效: {}", arg)),
    }
}

fn parse_modal(arg: &str) -> Result<ModalId, String> {
    match arg {
        "progress" => Ok(ModalId::Progress),
        "success" => Ok(ModalId::Success),
        "preview" => Ok(ModalId::Preview),
        other => Err(format!("未知的模态框: {}", other)),
    }
}

/// 解析一行输入
///
/// # 错误
/// 未知命令或参数不合法时返回错误说明
pub fn parse_line(line: &str) -> Result<ShellEvent, String> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    let event = match cmd {
        "" => ShellEvent::Refresh,
        "author" => ShellEvent::Edit(FormField::Author, arg.to_string()),
        "id" => ShellEvent::Edit(FormField::Id, arg.to_string()),
        "result" => ShellEvent::Edit(FormField::ResultId, arg.to_string()),
        "creature" => ShellEvent::Creature(arg.to_string()),
        "key" => ShellEvent::Key(
            KeyEvent::parse(arg).ok_or_else(|| format!("无法识别的按键: {}", arg))?,
        ),
        "generate" => ShellEvent::Generate,
        "auto" => ShellEvent::Auto,
        "delete" => ShellEvent::Delete,
        "reset" => ShellEvent::Reset,
        "folder" => ShellEvent::Folder,
        "desktop" => ShellEvent::Desktop,
        "view" => ShellEvent::PreviewCard(parse_index(arg)?),
        "get" => ShellEvent::DownloadCard(parse_index(arg)?),
        "zip" => ShellEvent::DownloadZip,
        "save" => ShellEvent::DownloadPreviewed,
        "close" => ShellEvent::CloseModal(parse_modal(arg)?),
        "dismiss" => ShellEvent::DismissBanner(parse_index(arg)?),
        "help" | "?" => ShellEvent::Help,
        "quit" | "exit" | "q" => ShellEvent::Quit,
        other => return Err(format!("未知命令: {}", other)),
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_edits_keep_inner_spaces() {
        assert_eq!(
            parse_line("author  Nguyen Van A ").unwrap(),
            ShellEvent::Edit(FormField::Author, "Nguyen Van A".into())
        );
        assert_eq!(
            parse_line("result").unwrap(),
            ShellEvent::Edit(FormField::ResultId, String::new())
        );
    }

    #[test]
    fn test_key_combos() {
        assert_eq!(
            parse_line("key ctrl+enter").unwrap(),
            ShellEvent::Key(KeyEvent::ctrl("Enter"))
        );
        assert!(parse_line("key").is_err());
    }

    #[test]
    fn test_indexes_start_at_one() {
        assert_eq!(parse_line("view 2").unwrap(), ShellEvent::PreviewCard(2));
        assert!(parse_line("get 0").is_err());
        assert!(parse_line("dismiss x").is_err());
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse_line("   ").unwrap(), ShellEvent::Refresh);
        assert_eq!(
            parse_line("close preview").unwrap(),
            ShellEvent::CloseModal(ModalId::Preview)
        );
        assert_eq!(parse_line("frobnicate").unwrap_err(), "未知命令: frobnicate");
    }
}
