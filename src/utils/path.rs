//! # 路径工具函数
//!
//! 提供客户端用到的几个固定位置：
//! - 配置文件目录（`{config_dir}/miniworld-mod/`）
//! - 字段持久化文件（`{data_dir}/miniworld-mod/fields.json`）
//! - 默认下载目录（桌面，取不到时退回主目录）

use std::path::PathBuf;

/// 应用在各系统目录下使用的子目录名
const APP_DIR_NAME: &str = "miniworld-mod";

/// 获取客户端配置目录的绝对路径
///
/// # 返回值
/// 返回 `{config_dir}/miniworld-mod/` 目录的绝对路径。
///
/// # 错误
/// 如果无法确定系统配置目录（如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\AppData\Roaming\miniworld-mod`
/// - Linux: `/home/username/.config/miniworld-mod`
pub fn get_app_config_path() -> Result<PathBuf, String> {
    let config = dirs::config_dir().ok_or_else(|| "无法获取系统配置目录".to_string())?;
    Ok(config.join(APP_DIR_NAME))
}

/// 默认配置文件路径：`{config_dir}/miniworld-mod/config.json`
pub fn get_config_file_path() -> Result<PathBuf, String> {
    Ok(get_app_config_path()?.join("config.json"))
}

/// 获取字段持久化文件的绝对路径
///
/// 数据目录不可用时退回到配置目录，两者都取不到才返回错误。
pub fn get_field_store_path() -> Result<PathBuf, String> {
    let base = match dirs::data_dir() {
        Some(data) => data.join(APP_DIR_NAME),
        None => get_app_config_path()?,
    };
    Ok(base.join("fields.json"))
}

/// 获取默认下载目录
///
/// 与网页版提示的"Desktop (mặc định)"一致，优先使用桌面目录。
///
/// # 参数
/// - `configured` - 配置文件或命令行中指定的目录；非空时直接使用
///
/// # 错误
/// 未指定目录且桌面、主目录都无法确定时返回错误。
pub fn resolve_download_dir(configured: Option<&str>) -> Result<PathBuf, String> {
    if let Some(dir) = configured.map(str::trim).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| "无法获取桌面目录或用户主目录".to_string())
}
