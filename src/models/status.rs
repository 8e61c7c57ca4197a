//! # 状态栏数据模型

use serde::{Deserialize, Serialize};

/// 状态栏消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// 状态栏当前内容（原地覆盖，不保留历史）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            text: "Sẵn sàng".to_string(),
            level: StatusLevel::Success,
        }
    }
}
