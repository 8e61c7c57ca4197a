//! # 控制器内存状态
//!
//! 会话 key、最近一次生成的文件列表以及两个自动计数器，
//! 全部归 `FormController` 实例所有，只在事件回调序列中被写入。

use crate::models::api::GeneratedFile;

/// Auto ID 计数器默认值
pub const DEFAULT_AUTO_ID_COUNTER: i64 = 2;

/// Auto Result ID 计数器默认值
pub const DEFAULT_AUTO_RESULT_ID_COUNTER: i64 = 4097;

/// 服务端计数器在客户端的镜像
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub auto_id_counter: i64,
    pub auto_result_id_counter: i64,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            auto_id_counter: DEFAULT_AUTO_ID_COUNTER,
            auto_result_id_counter: DEFAULT_AUTO_RESULT_ID_COUNTER,
        }
    }
}

/// 控制器状态
///
/// 只有一个会话槽位：每次成功生成都会整体覆盖 `session_key` 和
/// `last_generated_files`，不保留历史。
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    /// 当前会话 key
    pub session_key: Option<String>,

    /// 最近一次 `/generate` 返回的文件列表
    pub last_generated_files: Vec<GeneratedFile>,

    pub counters: Counters,
}

impl ControllerState {
    /// 记录新的生成批次，覆盖旧会话
    pub fn replace_session(&mut self, session_key: Option<String>, files: Vec<GeneratedFile>) {
        self.session_key = session_key;
        self.last_generated_files = files;
    }
}
