//! HTTP 请求封装模块
//!
//! - `HttpClient`: 传输层抽象，API 客户端只依赖此 trait
//! - `FetchClient`: 基于 `web_sys::fetch` 的浏览器实现，带超时与中止
//! - `tests::MockHttpClient`: 测试用实现

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::warn;
use lulusin_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("Request build failed: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("Network Error: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("Response read failed: {0}")]
    ResponseParseFailed(String),
    /// 超时（毫秒）
    #[error("timeout of {0}ms exceeded")]
    Timeout(u32),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置请求体
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下 JS 类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 发送一次请求，不做任何重试
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch 客户端
// =========================================================

/// 基于 `window.fetch` 的客户端
///
/// 超时后通过 `AbortController` 中止底层请求。
#[derive(Debug, Clone, Copy)]
pub struct FetchClient {
    timeout_ms: u32,
}

impl FetchClient {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    async fn fetch(req: HttpRequest, controller: &AbortController) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("create Headers: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("set header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_signal(Some(&controller.signal()));

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                warn!("[Api] fetch rejected: {:?}", e);
                let message = e
                    .dyn_ref::<web_sys::js_sys::Error>()
                    .map(|err| String::from(err.message()));
                HttpError::NetworkError(network_error_message(message, e.as_string()))
            })?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("not a Response: {:?}", e)))?;

        let status = response.status();

        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// 面向用户的网络错误描述
///
/// 优先使用 JS `Error.message`，其次是字符串形式的拒绝值。
/// 调试信息只进日志，不进入错误消息。
fn network_error_message(js_message: Option<String>, raw: Option<String>) -> String {
    js_message
        .into_iter()
        .chain(raw)
        .map(|m| m.trim().to_string())
        .find(|m| !m.is_empty())
        .unwrap_or_else(|| "request failed".to_string())
}

/// 被丢弃时执行中止动作，除非已解除
///
/// 请求 future 被外部取消（例如登录页卸载）时，借此中止底层 fetch。
struct AbortOnDrop<F: FnMut()> {
    abort: Option<F>,
}

impl<F: FnMut()> AbortOnDrop<F> {
    fn new(abort: F) -> Self {
        Self { abort: Some(abort) }
    }

    fn disarm(&mut self) {
        self.abort = None;
    }
}

impl<F: FnMut()> Drop for AbortOnDrop<F> {
    fn drop(&mut self) {
        if let Some(abort) = self.abort.as_mut() {
            abort();
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let controller = AbortController::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("AbortController: {:?}", e)))?;
        let mut guard = AbortOnDrop::new({
            let controller = controller.clone();
            move || controller.abort()
        });

        let fetch = Box::pin(Self::fetch(req, &controller));
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match select(fetch, timeout).await {
            Either::Left((result, _)) => {
                guard.disarm();
                result
            }
            // 守卫在返回时中止请求
            Either::Right(((), _)) => Err(HttpError::Timeout(self.timeout_ms)),
        }
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================
