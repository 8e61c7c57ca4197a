//! # 客户端配置读写
//!
//! - `read_client_config` - 读取 `config.json`，文件不存在时返回默认配置
//! - `save_client_config` - 写回配置文件（`config init` 子命令使用）
//! - `apply_overrides` - 用命令行参数覆盖配置项

use std::path::Path;

use crate::models::settings::ClientConfig;

/// 读取客户端配置
///
/// # 参数
/// - `config_path` - 配置文件路径
///
/// # 返回值
/// 返回解析后的配置；文件不存在时返回默认配置
///
/// # 错误
/// 文件存在但无法读取或 JSON 解析失败时返回错误
pub async fn read_client_config(config_path: &Path) -> Result<ClientConfig, String> {
    if !config_path.exists() {
        log::debug!("配置文件不存在，使用默认配置: {}", config_path.display());
        return Ok(ClientConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| format!("读取配置文件失败: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析配置文件失败: {}", e))
}

/// 保存客户端配置
///
/// 父目录不存在时递归创建，内容以 2 空格缩进写入。
///
/// # 错误
/// 目录创建失败、序列化失败或文件写入失败时返回错误
pub async fn save_client_config(config_path: &Path, config: &ClientConfig) -> Result<(), String> {
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("创建配置目录失败: {}", e))?;
        }
    }

    let content =
        serde_json::to_string_pretty(config).map_err(|e| format!("序列化配置失败: {}", e))?;

    tokio::fs::write(config_path, content)
        .await
        .map_err(|e| format!("写入配置文件失败: {}", e))
}

/// 用命令行参数覆盖配置项
pub fn apply_overrides(
    mut config: ClientConfig,
    base_url: Option<String>,
    download_dir: Option<String>,
) -> ClientConfig {
    if let Some(url) = base_url {
        config.base_url = url;
    }
    if let Some(dir) = download_dir {
        config.download_dir = Some(dir);
    }
    config
}
