//! # 交互会话
//!
//! 单线程事件循环：
//! 1. 定时器每 100ms 触发一次 `tick`（横幅过期、延时关闭、字段写盘）
//! 2. 取出所有已到达的输入行，依次作为页面事件交给控制器
//! 3. 执行控制器记录下来的导航（下载）
//! 4. 页面渲染结果有变化时重新输出

use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crate::commands::controller::{ActionOutcome, Dialogs, FormController};
use crate::services::backend::{Backend, HttpBackend};
use crate::services::page::{FileAction, FileCard, Page, SuccessContent};
use crate::services::render;
use crate::shell::dialogs::TerminalDialogs;
use crate::shell::events::{self, HELP, ShellEvent};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// 成功框第 `index` 张文件卡片（从 1 开始）
fn card_action(page: &Page, index: usize) -> Result<FileAction, String> {
    match &page.success_content {
        Some(SuccessContent::Files(cards)) => cards
            .get(index - 1)
            .map(FileCard::preview_action)
            .ok_or_else(|| format!("没有第 {} 个文件", index)),
        _ => Err("成功框中没有文件列表".to_string()),
    }
}

/// 把一个页面事件交给控制器
///
/// `Help` / `Quit` / `Refresh` 由调用方处理，这里直接忽略。
///
/// # 返回值
/// 触发了动作时返回动作结果
///
/// # 错误
/// 事件引用了页面上不存在的元素（如越界的卡片序号）时返回错误
pub async fn apply_event<B: Backend, D: Dialogs>(
    ctl: &mut FormController<B, D>,
    event: ShellEvent,
) -> Result<Option<ActionOutcome>, String> {
    let outcome = match event {
        ShellEvent::Edit(field, value) => {
            ctl.edit_field(field, &value);
            None
        }
        ShellEvent::Creature(copy_id) => Some(ctl.resolve_creature(&copy_id).await),
        ShellEvent::Key(key) => ctl.handle_key(&key).await,
        ShellEvent::Generate => Some(ctl.submit().await),
        ShellEvent::Auto => Some(ctl.auto_generate().await),
        ShellEvent::Delete => Some(ctl.delete_last_files()),
        ShellEvent::Reset => Some(ctl.reset_counters().await),
        ShellEvent::Folder => {
            ctl.show_folder();
            None
        }
        ShellEvent::Desktop => {
            ctl.download_desktop_tool();
            None
        }
        ShellEvent::PreviewCard(index) => {
            let action = card_action(ctl.page(), index)?;
            Some(ctl.preview_file(&action.session_key, &action.filename).await)
        }
        ShellEvent::DownloadCard(index) => {
            let action = card_action(ctl.page(), index)?;
            ctl.download_single_file(&action.session_key, &action.filename);
            None
        }
        ShellEvent::DownloadZip => {
            if !ctl.download_result_zip() {
                return Err("成功框中没有下载链接".to_string());
            }
            None
        }
        ShellEvent::DownloadPreviewed => {
            if !ctl.download_previewed_file() {
                return Err("没有正在预览的文件".to_string());
            }
            None
        }
        ShellEvent::CloseModal(id) => {
            ctl.click_backdrop(id);
            None
        }
        ShellEvent::DismissBanner(index) => {
            let id = ctl
                .page()
                .banners()
                .get(index - 1)
                .map(|b| b.id)
                .ok_or_else(|| format!("没有第 {} 条错误提示", index))?;
            ctl.page_mut().dismiss_banner(id);
            None
        }
        ShellEvent::Refresh | ShellEvent::Help | ShellEvent::Quit => None,
    };
    Ok(outcome)
}

/// 执行页面上积压的导航：逐个下载到 `dir`
///
/// 下载失败只记录日志，与浏览器中导航失败不影响页面一致。
pub async fn perform_navigations(
    ctl: &mut FormController<HttpBackend, TerminalDialogs>,
    dir: &Path,
) {
    for nav in ctl.page_mut().take_navigations() {
        match ctl.backend().download(&nav, dir).await {
            Ok(path) => {
                log::info!("已保存 {}", path.display());
                println!("⬇ {}", path.display());
            }
            Err(e) => log::error!("{}", e),
        }
    }
}

/// 运行交互会话，直到输入 `quit` 或标准输入关闭
pub async fn run_interactive(
    ctl: &mut FormController<HttpBackend, TerminalDialogs>,
    input: &Receiver<String>,
    download_dir: &Path,
) {
    println!("{}", HELP);
    let mut last_frame = String::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    'session: loop {
        ticker.tick().await;
        ctl.tick(Instant::now()).await;

        loop {
            let line = match input.try_recv() {
                Ok(line) => line,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'session,
            };

            let event = match events::parse_line(&line) {
                Ok(event) => event,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            match event {
                ShellEvent::Quit => break 'session,
                ShellEvent::Help => println!("{}", HELP),
                // 空行强制重绘
                ShellEvent::Refresh => last_frame.clear(),
                event => match apply_event(ctl, event).await {
                    Ok(Some(outcome)) => log::debug!("动作结果: {:?}", outcome),
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                },
            }
            perform_navigations(ctl, download_dir).await;
        }

        let frame = render::render_page(ctl.page());
        if frame != last_frame {
            println!("\n{}", frame);
            last_frame = frame;
        }
    }

    ctl.shutdown().await;
}
