//! # 表单校验服务
//!
//! 提交前的同步校验，按顺序检查三个必填项：
//! 1. 作者名（去除首尾空白后）非空
//! 2. 已选择神兽
//! 3. ID 为正整数
//!
//! 数值解析沿用输入框的宽松语义：只取前导整数部分，
//! 所以 `"5abc"` 解析为 5，`"abc"` 无法解析。

use std::sync::LazyLock;

use regex::Regex;

use crate::models::form::{FormField, FormState};

/// 前导整数：可选空白 + 可选符号 + 至少一位数字
static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?\d+)").expect("leading integer pattern is valid")
});

pub const MSG_AUTHOR_REQUIRED: &str = "Tên tác giả là bắt buộc";
pub const MSG_CREATURE_REQUIRED: &str = "Chọn thần thú là bắt buộc";
pub const MSG_ID_POSITIVE: &str = "ID phải là số dương";

/// 校验失败：出错的字段 + 展示给用户的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FormField,
    pub message: &'static str,
}

/// 解析字符串的前导整数
///
/// # 返回值
/// - `Some(n)` - 开头是整数（允许前导空白和正负号）；
///   超出 i64 范围时饱和为 `i64::MAX` / `i64::MIN`，符号保持不变
/// - `None` - 开头不是数字
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let digits = LEADING_INT.captures(raw)?.get(1)?.as_str();
    // 正则已保证只有符号和数字，解析失败只可能是溢出
    let saturated = if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };
    Some(digits.parse().unwrap_or(saturated))
}

/// 校验表单
///
/// 第一个不通过的字段即返回，后续字段不再检查。
pub fn validate_form(form: &FormState) -> Result<(), ValidationError> {
    if form.author_value.trim().is_empty() {
        return Err(ValidationError {
            field: FormField::Author,
            message: MSG_AUTHOR_REQUIRED,
        });
    }

    if form.creature.value.is_empty() {
        return Err(ValidationError {
            field: FormField::Creature,
            message: MSG_CREATURE_REQUIRED,
        });
    }

    match parse_leading_int(&form.id_value) {
        Some(id) if id > 0 => Ok(()),
        _ => Err(ValidationError {
            field: FormField::Id,
            message: MSG_ID_POSITIVE,
        }),
    }
}
