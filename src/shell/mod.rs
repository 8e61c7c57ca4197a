//! # 终端宿主
//!
//! 在终端中承载表单控制器：
//! - `args` - 命令行参数（每个按钮一个子命令，默认进入交互模式）
//! - `dialogs` - 终端确认框和标准输入读取线程
//! - `events` - 交互模式的输入行解析
//! - `session` - 交互模式的事件循环

pub mod args;
pub mod dialogs;
pub mod events;
pub mod session;

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::commands::controller::{ActionOutcome, FormController};
use crate::commands::settings;
use crate::models::form::FormField;
use crate::models::settings::ClientConfig;
use crate::services::backend::HttpBackend;
use crate::services::field_store::FieldStore;
use crate::services::render;
use crate::utils::path;
use args::{Cli, Command, ConfigAction};
use dialogs::TerminalDialogs;

pub type TerminalController = FormController<HttpBackend, TerminalDialogs>;

/// 后台检查 `/sw.js`，结果只记录日志
fn spawn_service_worker_check(backend: HttpBackend) {
    let handle = tokio::spawn(async move { backend.check_service_worker().await });
    tokio::spawn(async move {
        match handle.await {
            Ok(Ok(())) => log::debug!("后台脚本可用"),
            Ok(Err(e)) => log::info!("后台脚本不可用: {}", e),
            Err(e) => log::error!("后台任务异常退出: {}", e),
        }
    });
}

/// 可选参数非空时写入字段
fn edit_if_given(ctl: &mut TerminalController, field: FormField, value: Option<String>) {
    if let Some(value) = value {
        ctl.edit_field(field, &value);
    }
}

/// 单次动作的收尾：执行下载、保存字段、输出页面
///
/// # 错误
/// 动作以错误结束时返回错误消息，进程以非零状态退出
async fn finish(
    ctl: &mut TerminalController,
    outcome: Option<ActionOutcome>,
    download_dir: &Path,
) -> Result<(), String> {
    session::perform_navigations(ctl, download_dir).await;
    ctl.shutdown().await;
    println!("{}", render::render_page(ctl.page()));

    match outcome.as_ref().and_then(ActionOutcome::message) {
        Some(message) => Err(message.to_string()),
        None => Ok(()),
    }
}

/// 按命令行参数执行
///
/// # 参数
/// - `cli` - 解析后的命令行参数
/// - `config_path` - 配置文件路径（`config init` 写入目标）
/// - `config` - 已合并命令行覆盖项的配置
///
/// # 错误
/// 初始化失败或动作以错误结束时返回错误消息
pub async fn dispatch(cli: Cli, config_path: PathBuf, config: ClientConfig) -> Result<(), String> {
    let command = cli.command.unwrap_or(Command::Shell);

    if let Command::Config { action } = &command {
        return match action {
            ConfigAction::Show => {
                let text = serde_json::to_string_pretty(&config)
                    .map_err(|e| format!("序列化配置失败: {}", e))?;
                println!("{}\n{}", config_path.display(), text);
                Ok(())
            }
            ConfigAction::Init => {
                settings::save_client_config(&config_path, &config).await?;
                println!("已写入 {}", config_path.display());
                Ok(())
            }
        };
    }

    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    let backend = HttpBackend::new(&config.base_url, timeout)?;
    let download_dir = path::resolve_download_dir(config.download_dir.as_deref())?;
    let debounce = Duration::from_millis(config.autosave_debounce_ms);
    let store = match path::get_field_store_path() {
        Ok(store_path) => FieldStore::load(store_path, debounce).await,
        Err(e) => {
            log::warn!("{}，字段只保存在内存中", e);
            FieldStore::in_memory(debounce)
        }
    };

    log::info!(
        "服务端 {}，下载目录 {}",
        config.base_url,
        download_dir.display()
    );
    spawn_service_worker_check(backend.clone());

    let input = Rc::new(dialogs::spawn_stdin_reader());
    let dialogs = TerminalDialogs::new(cli.yes, Rc::clone(&input));
    let mut ctl = FormController::new(backend, dialogs, store);
    ctl.load();

    let outcome = match command {
        Command::Generate {
            author,
            creature,
            id,
            result_id,
            download,
        } => {
            edit_if_given(&mut ctl, FormField::Author, author);
            edit_if_given(&mut ctl, FormField::Id, id);
            edit_if_given(&mut ctl, FormField::ResultId, result_id);
            ctl.resolve_creature(&creature).await;
            let outcome = ctl.submit().await;
            if download && outcome.is_completed() {
                ctl.download_result_zip();
            }
            Some(outcome)
        }
        Command::Auto { author, download } => {
            edit_if_given(&mut ctl, FormField::Author, author);
            let outcome = ctl.auto_generate().await;
            if download && outcome.is_completed() {
                ctl.download_result_zip();
            }
            Some(outcome)
        }
        Command::Reset => Some(ctl.reset_counters().await),
        Command::Delete => Some(ctl.delete_last_files()),
        Command::Folder => {
            ctl.show_folder();
            None
        }
        Command::Preview {
            session_key,
            filename,
        } => Some(ctl.preview_file(&session_key, &filename).await),
        Command::Download {
            session_key,
            filename,
        } => {
            ctl.download_single_file(&session_key, &filename);
            None
        }
        Command::Desktop => {
            ctl.download_desktop_tool();
            None
        }
        Command::Shell => {
            session::run_interactive(&mut ctl, &input, &download_dir).await;
            return Ok(());
        }
        Command::Config { .. } => None,
    };

    finish(&mut ctl, outcome, &download_dir).await
}
