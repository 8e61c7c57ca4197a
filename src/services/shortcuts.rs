//! # 全局快捷键
//!
//! 把按键事件映射为快捷键动作。每个动作只有一个处理入口
//! （`FormController::handle_key`），重复触发也是幂等的。
//!
//! | 组合键 | 动作 |
//! |---|---|
//! | Ctrl/Cmd + Z | ID 加一 |
//! | Ctrl/Cmd + Enter | 提交表单 |
//! | Escape | 关闭所有打开的模态框 |

/// 一次按键事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// 按键名称，取值与浏览器 `KeyboardEvent.key` 相同（如 "z"、"Enter"、"Escape"）
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            meta: false,
        }
    }

    /// 解析组合键文本，如 `ctrl+z`、`cmd+enter`、`esc`
    ///
    /// 修饰键不区分大小写；主键的常见别名会归一化为浏览器按键名。
    pub fn parse(combo: &str) -> Option<Self> {
        let mut event = KeyEvent::plain("");
        for part in combo.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "" => return None,
                "ctrl" | "control" => event.ctrl = true,
                "cmd" | "meta" | "super" => event.meta = true,
                "enter" | "return" => event.key = "Enter".to_string(),
                "esc" | "escape" => event.key = "Escape".to_string(),
                _ => event.key = part.to_string(),
            }
        }
        if event.key.is_empty() { None } else { Some(event) }
    }

    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// 快捷键动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    IncrementId,
    Submit,
    CloseModals,
}

impl Shortcut {
    /// 匹配按键事件；不对应任何快捷键时返回 `None`
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.key == "Escape" {
            return Some(Shortcut::CloseModals);
        }
        if !event.has_command_modifier() {
            return None;
        }
        match event.key.as_str() {
            "z" => Some(Shortcut::IncrementId),
            "Enter" => Some(Shortcut::Submit),
            _ => None,
        }
    }
}
