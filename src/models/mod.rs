//! # 数据模型模块
//!
//! 与服务端 JSON 和本地配置文件对应的 Rust 数据结构：
//! - `api` - 各端点的响应结构
//! - `form` - 表单字段和神兽选择
//! - `state` - 控制器状态（会话 key、最近文件、计数器）
//! - `status` - 状态栏消息及级别
//! - `settings` - 客户端配置

pub mod api;
pub mod form;
pub mod settings;
pub mod state;
pub mod status;
