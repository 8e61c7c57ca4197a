//! # Mini World Mod Generator - 表单客户端核心
//!
//! 本模块负责客户端的完整初始化流程，包括：
//! - 初始化终端日志和全局 panic 钩子
//! - 读取客户端配置并合并命令行覆盖项
//! - 创建单线程 tokio 运行时并分派到具体动作
//!
//! ## 模块结构
//! - `commands/` - 表单控制器及各类用户动作
//! - `models/` - 数据模型（表单、服务端响应、配置）
//! - `services/` - 页面模型、HTTP 服务端、校验、字段持久化、渲染
//! - `shell/` - 终端宿主（命令行参数、确认框、交互循环）
//! - `utils/` - 通用工具函数

pub mod commands;
pub mod models;
pub mod services;
pub mod shell;
pub mod utils;

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use commands::settings;
use shell::args::Cli;
use utils::path;

/// 初始化终端日志：默认 Info，`--verbose` 时为 Debug
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("初始化日志失败: {}", e);
    }
}

/// 未捕获的 panic 只记录日志
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        log::error!("未捕获的异常: {}", info);
    }));
}

/// 客户端启动函数
///
/// 1. 解析命令行参数并初始化日志
/// 2. 创建单线程运行时（所有事件回调和网络完成都在同一线程上执行）
/// 3. 读取配置文件，命令行参数覆盖其中的项
/// 4. 执行子命令（默认进入交互模式）
///
/// 任一步骤失败时记录错误并以状态码 1 退出。
pub fn run() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    install_panic_hook();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("创建运行时失败: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async move {
        let config_path = match cli.config.clone() {
            Some(config_path) => config_path,
            None => path::get_config_file_path()?,
        };
        let config = settings::read_client_config(&config_path).await?;
        let config = settings::apply_overrides(
            config,
            cli.base_url.clone(),
            cli.download_dir.clone(),
        );
        shell::dispatch(cli, config_path, config).await
    });

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
