//! # 服务端响应数据模型
//!
//! 定义了生成服务端各个 JSON 端点的响应结构体。
//! 服务端字段统一使用 snake_case，因此这里不做 `rename_all`。
//!
//! 所有 `success` 字段都带 `#[serde(default)]`：服务端在部分错误路径上
//! （如会话过期的 404）只返回 `{"error": "..."}`，缺失的 `success` 按 `false` 处理。

use serde::{Deserialize, Serialize};

/// 生成结果中的单个文件描述
///
/// `/generate` 的 `file_details[]` 只带 name/type/size；
/// `/preview/{key}` 的 `files[]` 额外携带 `full_content`。
///
/// 对应服务端 JSON：
/// ```json
/// { "name": "actor_1234.json", "type": "actor", "size": 2048, "full_content": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// 文件名（在同一会话内唯一）
    pub name: String,

    /// 文件类别：actor / horse / crafting / item
    #[serde(rename = "type")]
    pub kind: String,

    /// 文件大小（字节）
    #[serde(default)]
    pub size: u64,

    /// 完整文件内容：仅预览接口返回
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
}

/// `/generate` 响应中的元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateMetadata {
    /// ZIP 下载时建议的文件名（如 `3430_Khung_Long.zip`）
    #[serde(default)]
    pub zip_filename: Option<String>,
}

/// `POST /generate` 的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,

    /// 生成的文件列表（成功时非空）
    #[serde(default)]
    pub file_details: Vec<GeneratedFile>,

    /// 本批文件的会话 key，后续预览/下载都依赖它
    #[serde(default)]
    pub session_key: Option<String>,

    /// ZIP 下载地址；旧版服务端只返回 `download_url`
    #[serde(default)]
    pub download_zip_url: Option<String>,

    #[serde(default)]
    pub download_url: Option<String>,

    #[serde(default)]
    pub metadata: Option<GenerateMetadata>,

    /// 失败时服务端给出的错误信息
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// ZIP 下载地址：优先 `download_zip_url`，回退到 `download_url`
    pub fn zip_url(&self) -> Option<&str> {
        self.download_zip_url
            .as_deref()
            .or(self.download_url.as_deref())
    }

    /// 下载时建议的 ZIP 文件名
    pub fn zip_filename(&self) -> Option<&str> {
        self.metadata.as_ref()?.zip_filename.as_deref()
    }
}

/// `POST /auto_generate` 的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoGenerateResponse {
    #[serde(default)]
    pub success: bool,

    /// 本次生成的文件总数
    #[serde(default)]
    pub total_files: u64,

    /// 参与生成的神兽数量（只取最高等级）
    #[serde(default)]
    pub total_creatures: u64,

    /// ZIP 文件名
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub download_url: Option<String>,

    #[serde(default)]
    pub session_key: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /reset_counters` 的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetCountersResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub auto_id_counter: Option<i64>,

    #[serde(default)]
    pub auto_result_id_counter: Option<i64>,

    /// 服务端附带的说明文本，仅记录日志
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /preview/{session_key}` 的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub files: Vec<GeneratedFile>,

    #[serde(default)]
    pub error: Option<String>,
}

impl PreviewResponse {
    /// 按文件名精确查找
    pub fn find(&self, filename: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.name == filename)
    }
}

/// `GET /get_creature_info/{copy_id}` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInfo {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_falls_back_to_download_url() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"success": true, "download_url": "/download_zip/files_1", "metadata": {"zip_filename": "a.zip"}}"#,
        )
        .unwrap();
        assert_eq!(resp.zip_url(), Some("/download_zip/files_1"));
        assert_eq!(resp.zip_filename(), Some("a.zip"));
    }

    #[test]
    fn test_missing_success_means_failure() {
        // 会话过期时服务端只返回 error 字段
        let resp: PreviewResponse =
            serde_json::from_str(r#"{"error": "Session đã hết hạn"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.files.is_empty());
    }

    #[test]
    fn test_preview_find_is_exact_match() {
        let resp: PreviewResponse = serde_json::from_str(
            r#"{"success": true, "files": [
                {"name": "a.json", "type": "actor", "size": 3, "full_content": "{1}"},
                {"name": "a.json.bak", "type": "item", "size": 1, "full_content": "x"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.find("a.json").map(|f| f.kind.as_str()), Some("actor"));
        assert!(resp.find("a").is_none());
    }
}
