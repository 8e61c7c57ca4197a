//! # 表单字段相关动作
//!
//! - `load` - 启动时从本地存储恢复空字段
//! - `edit_field` - 输入框编辑（触发防抖持久化）
//! - `select_creature` / `resolve_creature` - 神兽选择及信息面板
//! - `increment_id` - ID 加一

use std::time::Instant;

use crate::commands::controller::{ActionOutcome, Dialogs, FormController};
use crate::models::form::{CreatureChoice, FormField};
use crate::models::status::StatusLevel;
use crate::services::backend::Backend;
use crate::services::validation;

impl<B: Backend, D: Dialogs> FormController<B, D> {
    /// 页面加载
    ///
    /// 1. 文本/数字字段为空时，用本地存储中的值填充
    /// 2. 如果已经预选了神兽，执行一次选择变更处理
    pub fn load(&mut self) {
        for field in FormField::ALL.into_iter().filter(|f| f.is_text_input()) {
            if !self.page.fields.get(field).is_empty() {
                continue;
            }
            if let Some(saved) = self.store.get(field) {
                if !saved.is_empty() {
                    log::debug!("恢复字段 {} = {}", field.name(), saved);
                    self.page.fields.set(field, saved.to_string());
                }
            }
        }

        if !self.page.fields.creature.value.is_empty() {
            self.on_creature_changed();
        }
    }

    /// 用户编辑输入框
    pub fn edit_field(&mut self, field: FormField, value: &str) {
        if field == FormField::Creature {
            self.select_creature(CreatureChoice {
                value: value.to_string(),
                text: value.to_string(),
            });
            return;
        }
        self.page.fields.set(field, value.to_string());
        self.store.record(field, value, Instant::now());
    }

    /// 选择（或清空）神兽
    pub fn select_creature(&mut self, choice: CreatureChoice) {
        self.page.fields.creature = choice;
        self.on_creature_changed();
    }

    /// 按 copy id 向服务端查询名称后选择；copy id 为空时清空选择
    ///
    /// 名称查询只用于展示：查询失败时以 copy id 本身作为显示文本，
    /// 选择照常生效，不影响后续提交。
    pub async fn resolve_creature(&mut self, copy_id: &str) -> ActionOutcome {
        let copy_id = copy_id.trim();
        if copy_id.is_empty() {
            self.select_creature(CreatureChoice::default());
            return ActionOutcome::Completed;
        }

        let result = self.backend.creature_info(copy_id).await;
        let choice = match result {
            Ok(info) if !info.name.is_empty() => CreatureChoice::new(copy_id, &info.name),
            Ok(_) => CreatureChoice::bare(copy_id),
            Err(cause) => {
                log::warn!("查询神兽 {} 失败: {}", copy_id, cause);
                CreatureChoice::bare(copy_id)
            }
        };
        self.select_creature(choice);
        ActionOutcome::Completed
    }

    /// 神兽选择变更：更新信息面板和状态栏
    fn on_creature_changed(&mut self) {
        let choice = self.page.fields.creature.clone();
        if choice.value.is_empty() {
            self.page.creature_info.visible = false;
            self.page.creature_info.copy_id.clear();
            self.page.creature_info.name.clear();
            self.update_status("Sẵn sàng", StatusLevel::Success);
            return;
        }

        let (copy_id, name) = choice.split_text();
        self.page.creature_info.visible = true;
        self.page.creature_info.copy_id = copy_id.to_string();
        self.page.creature_info.name = name.to_string();
        self.update_status(format!("Đã chọn: {}", choice.text), StatusLevel::Info);
    }

    /// ID 加一，无法解析为数字时按 0 处理
    ///
    /// 程序化修改不会触发输入事件，因此不写入本地存储。
    pub fn increment_id(&mut self) -> i64 {
        let current = validation::parse_leading_int(&self.page.fields.id_value).unwrap_or(0);
        let next = current.saturating_add(1);
        self.page.fields.id_value = next.to_string();
        self.update_status(format!("ID đã tăng lên: {}", next), StatusLevel::Info);
        next
    }
}
