//! # 客户端配置数据模型
//!
//! 对应 `{config_dir}/miniworld-mod/config.json` 文件内容。
//! 文件不存在时使用默认值；命令行参数可以覆盖其中的任意一项。

use serde::{Deserialize, Serialize};

/// 默认服务端地址：Flask 开发服务器的默认监听端口
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// 字段持久化的默认防抖间隔（毫秒）
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 500;

/// 客户端配置
///
/// 示例：
/// ```json
/// {
///   "baseUrl": "http://127.0.0.1:5000",
///   "downloadDir": null,
///   "requestTimeoutSecs": null,
///   "autosaveDebounceMs": 500
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// 生成服务端的根地址
    pub base_url: String,

    /// 下载文件保存目录：为 `None` 时使用桌面目录
    pub download_dir: Option<String>,

    /// 单次请求超时（秒）：为 `None` 时不设超时，与浏览器 fetch 行为一致
    pub request_timeout_secs: Option<u64>,

    /// 字段持久化写入的防抖间隔
    pub autosave_debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_dir: None,
            request_timeout_secs: None,
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
        }
    }
}
