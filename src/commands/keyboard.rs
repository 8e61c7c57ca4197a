//! # 全局快捷键处理
//!
//! 每个快捷键只注册一个处理入口，与焦点位置无关。

use crate::commands::controller::{ActionOutcome, Dialogs, FormController};
use crate::services::backend::Backend;
use crate::services::shortcuts::{KeyEvent, Shortcut};

impl<B: Backend, D: Dialogs> FormController<B, D> {
    /// 处理一次按键
    ///
    /// # 返回值
    /// - `None` - 不是快捷键，事件交给默认处理
    /// - `Some(outcome)` - 已作为快捷键处理
    pub async fn handle_key(&mut self, event: &KeyEvent) -> Option<ActionOutcome> {
        let shortcut = Shortcut::from_event(event)?;
        log::debug!("快捷键 {:?}", shortcut);

        let outcome = match shortcut {
            Shortcut::IncrementId => {
                self.increment_id();
                ActionOutcome::Completed
            }
            Shortcut::Submit => self.submit().await,
            Shortcut::CloseModals => {
                self.page.hide_all_modals();
                ActionOutcome::Completed
            }
        };
        Some(outcome)
    }
}
