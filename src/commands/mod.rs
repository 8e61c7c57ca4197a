//! # 用户动作处理模块
//!
//! `controller` 定义表单控制器，其余子模块为它补充各功能域的动作：
//! - `form` - 字段编辑、神兽选择、ID 自增
//! - `generate` - 单个生成、批量生成、ZIP 下载
//! - `files` - 文件预览和单文件下载
//! - `maintenance` - 删除、重置计数器、目录提示、桌面工具下载
//! - `keyboard` - 全局快捷键
//! - `settings` - 客户端配置文件的读写

pub mod controller;
pub mod files;
pub mod form;
pub mod generate;
pub mod keyboard;
pub mod maintenance;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;
