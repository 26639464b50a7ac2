use crate::error::AuthError;
use crate::web::http::{HttpClient, HttpRequest, HttpResponse};
use leptos::logging::{log, warn};
use lulusin_shared::{Role, Session};
use lulusin_shared::protocol::{ApiRequest, ErrorBody, LoginRequest, LoginResponse};

/// 登录凭据，只在一次提交期间存在，从不持久化
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 一次登录尝试的结果
pub type AuthOutcome = Result<Session, AuthError>;

#[derive(Clone, Debug)]
pub struct LulusinApi<C> {
    pub base_url: String,
    client: C,
}

impl<C: HttpClient> LulusinApi<C> {
    pub fn new(base_url: String, client: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 登录
    ///
    /// 每次调用恰好发出一个请求，不重试。邮箱与密码原样发送，
    /// 不做客户端校验。
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let payload = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| AuthError::Transport(e.to_string()))?;

        let req = HttpRequest::new(&self.url(LoginRequest::PATH), LoginRequest::METHOD)
            .header("Content-Type", "application/json")
            .body(body);

        let res = self.client.send(req).await.map_err(|e| {
            warn!("[Api] Login request failed: {}", e);
            AuthError::from(e)
        })?;

        if !res.ok() {
            return Err(rejection(&res));
        }

        let session = parse_session(&res.body)?;
        log!("[Api] Login accepted for role {}", session.role);
        Ok(session)
    }
}

/// 非 2xx 响应：尽量读取后端提供的 `message`
fn rejection(res: &HttpResponse) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(&res.body)
        .ok()
        .and_then(|b| b.message);
    warn!("[Api] Login rejected with status {}", res.status);
    AuthError::Rejected {
        status: res.status,
        message,
    }
}

/// 2xx 响应：令牌与角色都必须存在且合法
fn parse_session(body: &str) -> Result<Session, AuthError> {
    let parsed: LoginResponse = serde_json::from_str(body).map_err(|e| {
        warn!("[Api] Login response is not valid JSON: {}", e);
        AuthError::MalformedResponse("body")
    })?;

    let token = parsed
        .token
        .filter(|t| Session::is_usable_token(t))
        .ok_or(AuthError::MalformedResponse("token"))?;

    let user_type = parsed
        .user_type
        .filter(|r| !r.is_empty())
        .ok_or(AuthError::MalformedResponse("userType"))?;

    let role = user_type
        .parse::<Role>()
        .map_err(|_| AuthError::UnrecognizedRole(user_type))?;

    Ok(Session { token, role })
}
