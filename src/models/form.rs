//! # 表单数据模型
//!
//! 表单页面上的输入字段及其当前取值。
//! 所有取值都以字符串形式保存（与输入框一致），校验和数值解析在
//! `services::validation` 中完成。

use serde::{Deserialize, Serialize};

/// 表单字段标识
///
/// `name()` 返回提交到服务端时使用的表单字段名，
/// 同时也是本地持久化 key 的后缀（`miniworld_mod_{name}`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    /// 作者名（文本输入）
    Author,
    /// 神兽选择（下拉框）
    Creature,
    /// 起始 ID（数字输入）
    Id,
    /// 起始 Result ID（数字输入，可选）
    ResultId,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Author,
        FormField::Creature,
        FormField::Id,
        FormField::ResultId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Author => "author_value",
            FormField::Creature => "creature_select",
            FormField::Id => "id_value",
            FormField::ResultId => "result_id_value",
        }
    }

    /// 按字段名反查
    pub fn from_name(name: &str) -> Option<FormField> {
        FormField::ALL.into_iter().find(|f| f.name() == name)
    }

    /// 是否为文本/数字输入框（下拉框不参与本地持久化）
    pub fn is_text_input(self) -> bool {
        !matches!(self, FormField::Creature)
    }
}

/// 下拉框中被选中的神兽
///
/// `text` 的格式为 `"{copy_id} - {名称}"`，与服务端渲染的下拉选项一致。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureChoice {
    /// 选项值：copy id；空字符串表示未选择
    pub value: String,
    /// 选项显示文本
    pub text: String,
}

impl CreatureChoice {
    pub fn new(copy_id: &str, name: &str) -> Self {
        Self {
            value: copy_id.to_string(),
            text: format!("{} - {}", copy_id, name),
        }
    }

    /// 只有 copy id、没有名称的选项
    pub fn bare(copy_id: &str) -> Self {
        Self {
            value: copy_id.to_string(),
            text: copy_id.to_string(),
        }
    }

    /// 按 `" - "` 拆分显示文本，得到 (copy id, 名称)
    ///
    /// 名称本身可能含有 `" - "`（如 "Boro Đại Dương - Tiến Hóa"），只拆第一处。
    pub fn split_text(&self) -> (&str, &str) {
        match self.text.split_once(" - ") {
            Some((copy_id, name)) => (copy_id, name),
            None => (self.text.as_str(), ""),
        }
    }
}

/// 表单当前状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub author_value: String,
    pub creature: CreatureChoice,
    pub id_value: String,
    pub result_id_value: String,
}

impl FormState {
    /// 读取指定字段的当前值
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Author => &self.author_value,
            FormField::Creature => &self.creature.value,
            FormField::Id => &self.id_value,
            FormField::ResultId => &self.result_id_value,
        }
    }

    /// 写入文本/数字字段；下拉框请使用 `FormController::select_creature`
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Author => self.author_value = value,
            FormField::Creature => {
                self.creature = CreatureChoice {
                    text: value.clone(),
                    value,
                }
            }
            FormField::Id => self.id_value = value,
            FormField::ResultId => self.result_id_value = value,
        }
    }

    /// 编码为表单提交字段
    ///
    /// 与浏览器 `new FormData(form)` 一致：所有具名字段原样提交，
    /// 可选的 `result_id_value` 为空时省略。
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (FormField::Author.name(), self.author_value.clone()),
            (FormField::Creature.name(), self.creature.value.clone()),
            (FormField::Id.name(), self.id_value.clone()),
        ];
        if !self.result_id_value.trim().is_empty() {
            pairs.push((FormField::ResultId.name(), self.result_id_value.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text_keeps_dash_in_name() {
        let choice = CreatureChoice::new("4526", "Boro Đại Dương - Tiến Hóa");
        assert_eq!(choice.split_text(), ("4526", "Boro Đại Dương - Tiến Hóa"));
    }

    #[test]
    fn test_form_pairs_omit_empty_result_id() {
        let form = FormState {
            author_value: "tac_gia".into(),
            creature: CreatureChoice::new("3430", "Khủng Long"),
            id_value: "5".into(),
            result_id_value: "  ".into(),
        };
        let names: Vec<&str> = form.to_form_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["author_value", "creature_select", "id_value"]);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
        assert_eq!(FormField::from_name("unknown"), None);
    }
}
