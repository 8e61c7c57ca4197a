//! # 业务逻辑服务模块
//!
//! 与控制器解耦的核心实现：
//! - `page` - 页面模型：字段、按钮、模态框、状态栏、错误横幅、导航
//! - `backend` - 生成服务端的端点定义和 HTTP 实现
//! - `validation` - 提交前的表单校验
//! - `shortcuts` - 按键到快捷键动作的映射
//! - `field_store` - 表单字段的防抖持久化
//! - `render` - 页面模型的终端渲染

pub mod backend;
pub mod field_store;
pub mod page;
pub mod render;
pub mod shortcuts;
pub mod validation;
