//! # 命令行参数

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mini World Mod Generator - 命令行客户端
#[derive(Parser, Debug)]
#[command(name = "miniworld-mod")]
#[command(
    author,
    version,
    about = "Mini World Mod Generator - 模组生成服务端的表单客户端"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 服务端根地址（覆盖 config.json 中的 baseUrl）
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// 下载保存目录（默认为桌面）
    #[arg(long, global = true)]
    pub download_dir: Option<String>,

    /// config.json 路径
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 所有确认提示都回答“是”
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// 输出 debug 级别日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 为单个神兽生成模组文件
    #[command(visible_alias = "gen")]
    Generate {
        /// 作者名（未给出时使用上次保存的值）
        #[arg(short, long)]
        author: Option<String>,

        /// 神兽 copy ID
        #[arg(short, long)]
        creature: String,

        /// 物品 ID（未给出时使用上次保存的值）
        #[arg(short, long)]
        id: Option<String>,

        /// 结果 ID（可选）
        #[arg(short, long)]
        result_id: Option<String>,

        /// 生成成功后立即下载 ZIP
        #[arg(short, long)]
        download: bool,
    },

    /// 为所有顶层神兽批量生成文件
    Auto {
        /// 作者名（未给出时使用上次保存的值）
        #[arg(short, long)]
        author: Option<String>,

        /// 生成成功后立即下载 ZIP
        #[arg(short, long)]
        download: bool,
    },

    /// 把服务端 ID 计数器重置为默认值
    Reset,

    /// 删除最近生成的文件
    Delete,

    /// 显示输出目录
    Folder,

    /// 预览某次生成中的单个文件
    Preview { session_key: String, filename: String },

    /// 下载某次生成中的单个文件
    Download { session_key: String, filename: String },

    /// 下载桌面版工具
    Desktop,

    /// 查看或写入客户端配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// 交互式表单会话（默认）
    Shell,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// 输出当前生效的配置
    Show,
    /// 把当前生效的配置写入 config.json
    Init,
}
