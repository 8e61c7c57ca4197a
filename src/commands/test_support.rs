//! 控制器测试用的假服务端、预设确认框和本地 HTTP 服务端

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode, header};
use hyper_util::rt::TokioIo;

use crate::commands::controller::{Dialogs, FormController};
use crate::models::api::{
    AutoGenerateResponse, CreatureInfo, GenerateResponse, PreviewResponse, ResetCountersResponse,
};
use crate::models::form::{CreatureChoice, FormField, FormState};
use crate::services::backend::Backend;
use crate::services::field_store::FieldStore;

/// 每个端点返回固定结果，并记录调用顺序
pub struct FakeBackend {
    pub generate: Result<GenerateResponse, String>,
    pub auto_generate: Result<AutoGenerateResponse, String>,
    pub reset_counters: Result<ResetCountersResponse, String>,
    pub preview: Result<PreviewResponse, String>,
    pub creature_info: Result<CreatureInfo, String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            generate: Ok(GenerateResponse {
                success: true,
                session_key: Some("files_test".into()),
                ..GenerateResponse::default()
            }),
            auto_generate: Ok(AutoGenerateResponse {
                success: true,
                ..AutoGenerateResponse::default()
            }),
            reset_counters: Ok(ResetCountersResponse {
                success: true,
                auto_id_counter: Some(2),
                auto_result_id_counter: Some(4097),
                ..ResetCountersResponse::default()
            }),
            preview: Ok(PreviewResponse {
                success: true,
                ..PreviewResponse::default()
            }),
            creature_info: Ok(CreatureInfo {
                name: "Khủng Long Hóa Thạch Thường".into(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Backend for FakeBackend {
    async fn generate(&self, _form: &FormState) -> Result<GenerateResponse, String> {
        self.record("generate".into());
        self.generate.clone()
    }

    async fn auto_generate(&self, author_value: &str) -> Result<AutoGenerateResponse, String> {
        self.record(format!("auto_generate:{}", author_value));
        self.auto_generate.clone()
    }

    async fn reset_counters(&self) -> Result<ResetCountersResponse, String> {
        self.record("reset_counters".into());
        self.reset_counters.clone()
    }

    async fn preview(&self, session_key: &str) -> Result<PreviewResponse, String> {
        self.record(format!("preview:{}", session_key));
        self.preview.clone()
    }

    async fn creature_info(&self, copy_id: &str) -> Result<CreatureInfo, String> {
        self.record(format!("creature_info:{}", copy_id));
        self.creature_info.clone()
    }
}

/// 按顺序返回预设答案，用完后一律取消
#[derive(Default)]
pub struct ScriptedDialogs {
    pub answers: VecDeque<bool>,
    pub prompts: Vec<String>,
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

pub type TestController = FormController<FakeBackend, ScriptedDialogs>;

pub fn controller_with(backend: FakeBackend, answers: Vec<bool>) -> TestController {
    let dialogs = ScriptedDialogs {
        answers: answers.into(),
        prompts: Vec::new(),
    };
    FormController::new(
        backend,
        dialogs,
        FieldStore::in_memory(Duration::from_millis(500)),
    )
}

/// 三个必填项都已填好的控制器
pub fn filled_controller(backend: FakeBackend) -> TestController {
    let mut ctl = controller_with(backend, Vec::new());
    ctl.edit_field(FormField::Author, "tac_gia");
    ctl.select_creature(CreatureChoice::new("3430", "Khủng Long Hóa Thạch Thường"));
    ctl.edit_field(FormField::Id, "5");
    ctl
}

/// 本地服务端收到的请求记录，形如 `"POST /generate author_value=..."`
pub type RequestLog = Arc<Mutex<Vec<String>>>;

fn json_response(status: StatusCode, body: serde_json::Value) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from(body.to_string())));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    resp
}

fn file_response(filename: &str, content: &'static [u8]) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(content)));
    if let Ok(value) =
        header::HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
    {
        resp.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    resp
}

/// 假的生成服务端：固定路由，`/auto_generate` 以 HTTP 500 返回 `success: false`
async fn route(req: Request<Incoming>, log: RequestLog) -> Response<Full<Bytes>> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let body = match req.into_body().collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(_) => String::new(),
    };
    log.lock()
        .unwrap()
        .push(format!("{} {} {}", method, path, body).trim_end().to_string());

    match (method.as_str(), path.as_str()) {
        ("POST", "/generate") => json_response(
            StatusCode::OK,
            serde_json::json!({
                "success": true,
                "session_key": "files_http",
                "file_details": [
                    {"name": "actor_5.json", "type": "actor", "size": 42},
                    {"name": "item_5.json", "type": "item", "size": 17}
                ],
                "download_zip_url": "/download_zip/files_http",
                "metadata": {"zip_filename": "mod_http.zip"}
            }),
        ),
        ("POST", "/auto_generate") => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({"success": false, "error": "Không tìm thấy thần thú"}),
        ),
        ("POST", "/reset_counters") => json_response(
            StatusCode::OK,
            serde_json::json!({"success": true, "auto_id_counter": 2, "auto_result_id_counter": 4097}),
        ),
        ("GET", "/preview/files_http") => json_response(
            StatusCode::OK,
            serde_json::json!({
                "success": true,
                "files": [
                    {"name": "actor_5.json", "type": "actor", "size": 42, "full_content": "{\"id\": 5}"}
                ]
            }),
        ),
        ("GET", "/get_creature_info/3430") => json_response(
            StatusCode::OK,
            serde_json::json!({"name": "Khủng Long Hóa Thạch Thường"}),
        ),
        ("GET", "/download_zip/files_http") => file_response("mod_http.zip", b"PK-zip-bytes"),
        ("GET", p) if p.starts_with("/download_single/files_http/") => {
            file_response("ignored.json", b"{\"id\": 5}")
        }
        _ => {
            let mut resp = Response::new(Full::new(Bytes::from_static(b"not found")));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        }
    }
}

/// 在 127.0.0.1 的随机端口上启动假服务端
///
/// # 返回值
/// (根地址, 请求记录)
pub async fn spawn_mock_server() -> (String, RequestLog) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let server_log = Arc::clone(&log);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let log = Arc::clone(&server_log);
            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let log = Arc::clone(&log);
                    async move { Ok::<_, Infallible>(route(req, log).await) }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (format!("http://{}", addr), log)
}
