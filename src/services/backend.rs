//! # 生成服务端接口
//!
//! 控制器通过 `Backend` trait 访问服务端，生产环境使用基于 reqwest 的
//! `HttpBackend`，测试使用脚本化的假实现。
//!
//! ## 错误约定
//! 所有方法返回 `Result<_, String>`：
//! - `Ok(resp)` - 拿到了可解析的 JSON（无论 HTTP 状态码是多少，
//!   服务端在 4xx/5xx 时同样返回 `{"success": false, "error": ...}`）
//! - `Err(cause)` - 传输层失败：连接错误、读取响应体失败、响应不是合法 JSON

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::models::api::{
    AutoGenerateResponse, CreatureInfo, GenerateResponse, PreviewResponse, ResetCountersResponse,
};
use crate::models::form::FormState;
use crate::services::page::Navigation;

/// 服务端路径
pub mod endpoints {
    pub const GENERATE: &str = "/generate";
    pub const AUTO_GENERATE: &str = "/auto_generate";
    pub const RESET_COUNTERS: &str = "/reset_counters";
    pub const DOWNLOAD_DESKTOP: &str = "/download_desktop";
    pub const SERVICE_WORKER: &str = "/sw.js";

    /// 桌面工具的建议文件名
    pub const DESKTOP_TOOL_FILENAME: &str = "MiniWorldModGenerator.exe";

    pub fn preview(session_key: &str) -> String {
        format!("/preview/{}", session_key)
    }

    /// 单文件下载地址，文件名做百分号编码
    pub fn download_single(session_key: &str, filename: &str) -> String {
        format!(
            "/download_single/{}/{}",
            session_key,
            urlencoding::encode(filename)
        )
    }

    pub fn creature_info(copy_id: &str) -> String {
        format!("/get_creature_info/{}", copy_id)
    }
}

/// 生成服务端
pub trait Backend {
    /// `POST /generate`：提交编码后的表单字段
    fn generate(&self, form: &FormState) -> impl Future<Output = Result<GenerateResponse, String>>;

    /// `POST /auto_generate`：只提交作者名
    fn auto_generate(
        &self,
        author_value: &str,
    ) -> impl Future<Output = Result<AutoGenerateResponse, String>>;

    /// `POST /reset_counters`：无请求体
    fn reset_counters(&self) -> impl Future<Output = Result<ResetCountersResponse, String>>;

    /// `GET /preview/{session_key}`
    fn preview(&self, session_key: &str) -> impl Future<Output = Result<PreviewResponse, String>>;

    /// `GET /get_creature_info/{copy_id}`
    fn creature_info(&self, copy_id: &str) -> impl Future<Output = Result<CreatureInfo, String>>;
}

/// 基于 reqwest 的服务端实现
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// 创建客户端
    ///
    /// # 参数
    /// - `base_url` - 服务端根地址（如 `http://127.0.0.1:5000`）
    /// - `timeout` - 单次请求超时；`None` 表示不限时
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| format!("创建 HTTP 客户端失败: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 把服务端返回的相对路径解析为完整 URL；已是绝对地址时原样返回
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        log::debug!("GET {}", path);
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<T, String> {
        log::debug!("POST {} ({} 个字段)", path, fields.len());
        let resp = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp).await
    }

    /// 执行一次导航：把目标流式下载到 `dir`
    ///
    /// 文件名优先级：导航的建议文件名 > `Content-Disposition` > URL 最后一段。
    ///
    /// # 返回值
    /// 保存后的文件路径
    ///
    /// # 错误
    /// 请求失败、HTTP 状态非 2xx 或写盘失败时返回错误
    pub async fn download(&self, nav: &Navigation, dir: &Path) -> Result<PathBuf, String> {
        let url = self.url(&nav.url);
        log::info!("下载 {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("下载请求失败: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("下载失败: HTTP {} ({})", status, url));
        }

        let filename = nav
            .suggested_name
            .clone()
            .or_else(|| content_disposition_filename(&resp))
            .unwrap_or_else(|| filename_from_url(&nav.url));

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| format!("创建下载目录失败: {}", e))?;
        let target = dir.join(sanitize_filename(&filename));

        if let Err(e) = write_stream(resp, &target).await {
            // 中途失败时删除写了一半的文件
            if let Err(remove_err) = tokio::fs::remove_file(&target).await {
                log::warn!("删除未完成的下载失败 {}: {}", target.display(), remove_err);
            }
            return Err(e);
        }

        Ok(target)
    }

    /// 检查后台脚本是否可用，失败只返回原因，由调用方记录日志
    pub async fn check_service_worker(&self) -> Result<(), String> {
        log::debug!("GET {}", endpoints::SERVICE_WORKER);
        let resp = self
            .client
            .get(self.url(endpoints::SERVICE_WORKER))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(format!("HTTP {}", resp.status()))
        }
    }
}

impl Backend for HttpBackend {
    async fn generate(&self, form: &FormState) -> Result<GenerateResponse, String> {
        self.post_form(endpoints::GENERATE, &form.to_form_pairs())
            .await
    }

    async fn auto_generate(&self, author_value: &str) -> Result<AutoGenerateResponse, String> {
        self.post_form(
            endpoints::AUTO_GENERATE,
            &[("author_value", author_value.to_string())],
        )
        .await
    }

    async fn reset_counters(&self) -> Result<ResetCountersResponse, String> {
        log::debug!("POST {}", endpoints::RESET_COUNTERS);
        let resp = self
            .client
            .post(self.url(endpoints::RESET_COUNTERS))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp).await
    }

    async fn preview(&self, session_key: &str) -> Result<PreviewResponse, String> {
        self.get_json(&endpoints::preview(session_key)).await
    }

    async fn creature_info(&self, copy_id: &str) -> Result<CreatureInfo, String> {
        self.get_json(&endpoints::creature_info(copy_id)).await
    }
}

/// 把响应体流式写入 `target`
async fn write_stream(resp: reqwest::Response, target: &Path) -> Result<(), String> {
    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(|e| format!("创建下载文件失败: {}", e))?;

    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| format!("读取下载内容失败: {}", e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| format!("写入下载文件失败: {}", e))?;
    }
    file.flush()
        .await
        .map_err(|e| format!("写入下载文件失败: {}", e))
}

/// 读取响应体并解析 JSON，不检查 HTTP 状态码
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, String> {
    let status = resp.status();
    let body = resp.bytes().await.map_err(|e| e.to_string())?;
    if !status.is_success() {
        log::warn!("服务端返回 HTTP {}", status);
    }
    serde_json::from_slice(&body).map_err(|e| format!("响应不是合法 JSON (HTTP {}): {}", status, e))
}

/// 从 `Content-Disposition: attachment; filename="x.zip"` 中取文件名
fn content_disposition_filename(resp: &reqwest::Response) -> Option<String> {
    let header = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// URL 最后一段（百分号解码后）
fn filename_from_url(url: &str) -> String {
    let last = url
        .split('?')
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or("");
    let decoded = urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string());
    if decoded.is_empty() {
        "download".to_string()
    } else {
        decoded
    }
}

/// 去掉文件名中的路径分隔符，防止写出下载目录
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "download".to_string(),
        _ => cleaned,
    }
}
