//! 登录流程错误类型
//!
//! 所有失败都在登录控制器边界被转换成一条面向用户的消息，
//! 不会继续向上传播。

use crate::session::StorageError;
use crate::web::http::HttpError;

/// 通用失败提示（没有更具体的描述可用时）
pub const MSG_LOGIN_FAILED: &str = "Login gagal. Periksa kembali email dan password Anda.";
/// 2xx 响应但缺少令牌或角色
pub const MSG_INVALID_RESPONSE: &str = "Respons login tidak valid.";
/// 角色存在但无法识别
pub const MSG_INVALID_USER_TYPE: &str = "Tipe pengguna tidak valid.";
/// 会话无法写入浏览器存储
pub const MSG_SESSION_NOT_SAVED: &str = "Sesi login tidak dapat disimpan di perangkat ini.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// 后端返回非 2xx 状态，`message` 为响应体中的可读消息（如有）
    #[error("Request failed with status code {status}")]
    Rejected { status: u16, message: Option<String> },
    /// 网络不可达、请求构建失败等传输层错误
    #[error("{0}")]
    Transport(String),
    #[error("timeout of {0}ms exceeded")]
    Timeout(u32),
    /// 2xx 响应缺少必要字段，或响应体不是合法 JSON
    #[error("login response is missing {0}")]
    MalformedResponse(&'static str),
    #[error("unrecognized user type {0:?}")]
    UnrecognizedRole(String),
    #[error("session could not be persisted: {0}")]
    Storage(#[from] StorageError),
}

impl From<HttpError> for AuthError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout(ms) => AuthError::Timeout(ms),
            other => AuthError::Transport(other.to_string()),
        }
    }
}

impl AuthError {
    /// 面向用户的提示消息
    ///
    /// 优先级：后端消息 > 传输层描述 > 通用提示。
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            AuthError::Rejected { .. } | AuthError::Transport(_) | AuthError::Timeout(_) => {
                let description = self.to_string();
                if description.trim().is_empty() {
                    MSG_LOGIN_FAILED.to_string()
                } else {
                    description
                }
            }
            AuthError::MalformedResponse(_) => MSG_INVALID_RESPONSE.to_string(),
            AuthError::UnrecognizedRole(_) => MSG_INVALID_USER_TYPE.to_string(),
            AuthError::Storage(_) => MSG_SESSION_NOT_SAVED.to_string(),
        }
    }
}
