//! # 表单字段持久化
//!
//! 将文本/数字输入框的取值保存到本地 JSON 文件，下次启动时恢复：
//! - key 形如 `miniworld_mod_{字段名}`
//! - 仅在字段当前为空时才用保存的值填充
//! - 每次编辑后防抖写盘（默认 500ms），连续输入只写一次
//!
//! 存储文件：`{data_dir}/miniworld-mod/fields.json`。
//! 读写失败只记录日志，不影响表单使用。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::models::form::FormField;

/// 持久化 key 前缀
const KEY_PREFIX: &str = "miniworld_mod_";

/// 字段存储
#[derive(Debug)]
pub struct FieldStore {
    /// 存储文件路径；为 `None` 时只保存在内存中
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
    debounce: Duration,
    /// 下一次写盘的截止时间；每次编辑都会向后推迟
    flush_at: Option<Instant>,
}

impl FieldStore {
    /// 仅内存存储
    pub fn in_memory(debounce: Duration) -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
            debounce,
            flush_at: None,
        }
    }

    /// 从文件加载
    ///
    /// 文件不存在或内容损坏时返回空存储（损坏时记录警告）。
    pub async fn load(path: PathBuf, debounce: Duration) -> Self {
        let values = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("解析字段存储失败 {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("读取字段存储失败 {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            values,
            debounce,
            flush_at: None,
        }
    }

    pub fn storage_key(field: FormField) -> String {
        format!("{}{}", KEY_PREFIX, field.name())
    }

    /// 读取保存的值
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values
            .get(&Self::storage_key(field))
            .map(String::as_str)
    }

    /// 记录一次编辑，并推迟写盘截止时间
    ///
    /// 下拉框不参与持久化，传入时直接忽略。
    pub fn record(&mut self, field: FormField, value: &str, now: Instant) {
        if !field.is_text_input() {
            return;
        }
        self.values
            .insert(Self::storage_key(field), value.to_string());
        self.flush_at = Some(now + self.debounce);
    }

    /// 是否有尚未写盘的修改
    pub fn is_dirty(&self) -> bool {
        self.flush_at.is_some()
    }

    /// 防抖到期时写盘
    pub async fn flush_due(&mut self, now: Instant) {
        if self.flush_at.is_some_and(|at| at <= now) {
            self.flush().await;
        }
    }

    /// 立即写盘（退出前调用）
    pub async fn flush(&mut self) {
        if self.flush_at.take().is_none() {
            return;
        }
        let Some(path) = self.path.clone() else {
            return;
        };
        if let Err(e) = self.write_to(&path).await {
            log::warn!("{}", e);
        }
    }

    async fn write_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("创建字段存储目录失败: {}", e))?;
        }

        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("序列化字段存储失败: {}", e))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| format!("写入字段存储失败: {}", e))
    }
}
