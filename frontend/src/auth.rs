//! 认证模块
//!
//! 登录流程控制器：持有提交生命周期，决定登录成功后的去向。
//!
//! 状态机：`Idle -> Submitting -> {Redirecting | Failed}`，
//! `Failed` 状态下表单仍可编辑，可以重新提交。
//! 控制器不依赖任何 DOM API，会话存储、API 与导航均通过注入完成。

use std::cell::{Cell, RefCell};

use futures::future::{AbortHandle, Abortable};
use leptos::logging::{error, log, warn};

use crate::api::{Credentials, LulusinApi};
use crate::error::AuthError;
use crate::session::{KeyValueStorage, SessionStore};
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::Navigator;

/// 登录表单
///
/// `show_password` 只是本地显示开关，不影响提交的凭据。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// 原样取出凭据，不做校验
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// 登录阶段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    /// 请求进行中，提交按钮禁用
    Submitting,
    /// 会话已保存，已发出导航
    Redirecting(AppRoute),
    /// 失败，携带面向用户的消息
    Failed(String),
}

impl LoginPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginPhase::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoginPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 只有空闲或失败时才接受新的提交
    fn accepts_submit(&self) -> bool {
        matches!(self, LoginPhase::Idle | LoginPhase::Failed(_))
    }
}

type PhaseObserver = Box<dyn Fn(&LoginPhase)>;

/// 登录流程控制器
///
/// 每个实例同一时间最多只有一个进行中的登录请求。
/// 单线程使用，状态放在 `Cell` / `RefCell` 中。
pub struct LoginController<C, S, N> {
    api: LulusinApi<C>,
    store: SessionStore<S>,
    navigator: N,
    phase: RefCell<LoginPhase>,
    in_flight: RefCell<Option<AbortHandle>>,
    disposed: Cell<bool>,
    observer: Option<PhaseObserver>,
}

impl<C, S, N> LoginController<C, S, N>
where
    C: HttpClient,
    S: KeyValueStorage,
    N: Navigator,
{
    pub fn new(api: LulusinApi<C>, store: SessionStore<S>, navigator: N) -> Self {
        Self {
            api,
            store,
            navigator,
            phase: RefCell::new(LoginPhase::Idle),
            in_flight: RefCell::new(None),
            disposed: Cell::new(false),
            observer: None,
        }
    }

    /// 注册阶段变化回调（视图层用它同步信号）
    pub fn with_observer(mut self, observer: impl Fn(&LoginPhase) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase.borrow().clone()
    }

    fn set_phase(&self, phase: LoginPhase) {
        *self.phase.borrow_mut() = phase;
        if let Some(observer) = &self.observer {
            observer(&self.phase.borrow());
        }
    }

    /// 提交登录
    ///
    /// 正在提交或已在跳转时调用是空操作。
    /// 每次进入 `Submitting` 都会先清除上一次的错误。
    pub async fn submit(&self, credentials: Credentials) {
        if self.disposed.get() {
            warn!("[Auth] Submit ignored: controller disposed");
            return;
        }
        if !self.phase.borrow().accepts_submit() {
            warn!("[Auth] Submit ignored: a login is already in progress");
            return;
        }

        log!("[Auth] Submitting login for {}", credentials.email);
        self.set_phase(LoginPhase::Submitting);

        let (handle, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(handle);

        let result = Abortable::new(self.api.login(&credentials), registration).await;
        self.in_flight.borrow_mut().take();

        // 控制器已销毁：不再触碰任何状态
        let outcome = match result {
            Ok(outcome) if !self.disposed.get() => outcome,
            _ => {
                log!("[Auth] Login request dropped after teardown");
                return;
            }
        };

        match outcome.and_then(|session| {
            self.store.save(&session)?;
            Ok(session)
        }) {
            Ok(session) => {
                let route = AppRoute::dashboard(session.role);
                log!("[Auth] Session saved, redirecting to {}", route);
                self.set_phase(LoginPhase::Redirecting(route.clone()));
                self.navigator.navigate(route);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, e: AuthError) {
        error!("[Auth] Login failed: {}", e);
        self.set_phase(LoginPhase::Failed(e.user_message()));
    }

    /// 销毁控制器（视图卸载时调用）
    ///
    /// 中止进行中的请求，之后的提交一律忽略。
    pub fn dispose(&self) {
        self.disposed.set(true);
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MSG_INVALID_USER_TYPE, MSG_SESSION_NOT_SAVED};
    use crate::session::tests::MemoryStorage;
    use crate::web::http::HttpError;
    use crate::web::http::tests::MockHttpClient;
    use crate::web::router::tests::RecordingNavigator;
    use lulusin_shared::{Role, Session};
    use std::rc::Rc;

    // =========================================================
    // 辅助函数
    // =========================================================

    struct Harness {
        client: MockHttpClient,
        storage: MemoryStorage,
        navigator: RecordingNavigator,
        controller: LoginController<MockHttpClient, MemoryStorage, RecordingNavigator>,
    }

    fn harness(client: MockHttpClient) -> Harness {
        let storage = MemoryStorage::new();
        let navigator = RecordingNavigator::at("/login");
        let controller = LoginController::new(
            LulusinApi::new(String::new(), client.clone()),
            SessionStore::new(storage.clone()),
            navigator.clone(),
        );
        Harness {
            client,
            storage,
            navigator,
            controller,
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn session_of(storage: &MemoryStorage) -> Option<Session> {
        SessionStore::new(storage.clone()).load()
    }

    // =========================================================
    // 成功路径
    // =========================================================

    #[tokio::test]
    async fn test_each_role_saves_once_and_navigates_once() {
        for role in Role::ALL {
            let body = format!(r#"{{"token":"tok-{role}","userType":"{role}"}}"#);
            let h = harness(MockHttpClient::new().with_response(200, &body));

            h.controller.submit(credentials("a@b.com", "x")).await;

            let expected = AppRoute::dashboard(role);
            assert_eq!(h.navigator.visits(), vec![expected.clone()]);
            assert_eq!(
                session_of(&h.storage),
                Some(Session::new(format!("tok-{role}"), role))
            );
            // 每个键恰好写入一次
            assert_eq!(h.storage.writes.borrow().len(), 2);
            assert_eq!(h.controller.phase(), LoginPhase::Redirecting(expected));
        }
    }

    #[tokio::test]
    async fn test_admin_login_scenario() {
        let h = harness(
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"admin"}"#),
        );

        h.controller.submit(credentials("a@b.com", "x")).await;

        assert_eq!(session_of(&h.storage), Some(Session::new("tok1", Role::Admin)));
        assert_eq!(h.navigator.current_path(), "/admin/dashboard");
        assert_eq!(h.client.request_count(), 1);
    }

    // =========================================================
    // 失败路径
    // =========================================================

    #[tokio::test]
    async fn test_invalid_credentials_scenario() {
        let h = harness(
            MockHttpClient::new().with_response(401, r#"{"message":"Invalid credentials"}"#),
        );

        h.controller.submit(credentials("a@b.com", "wrong")).await;

        assert_eq!(
            h.controller.phase(),
            LoginPhase::Failed("Invalid credentials".to_string())
        );
        assert!(h.navigator.visits().is_empty());
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_role_is_not_saved_or_routed() {
        let h = harness(
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"guest"}"#),
        );

        h.controller.submit(credentials("a@b.com", "x")).await;

        assert_eq!(h.controller.phase().error(), Some(MSG_INVALID_USER_TYPE));
        assert!(h.navigator.visits().is_empty());
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn test_failure_message_fallback_chain() {
        let cases = [
            (
                MockHttpClient::new().with_response(500, r#"{"message":"Server sedang sibuk"}"#),
                "Server sedang sibuk",
            ),
            (
                MockHttpClient::new().with_response(500, ""),
                "Request failed with status code 500",
            ),
            (
                MockHttpClient::new().with_error(HttpError::Timeout(15_000)),
                "timeout of 15000ms exceeded",
            ),
        ];

        for (client, expected) in cases {
            let h = harness(client);
            h.controller.submit(credentials("a@b.com", "x")).await;

            assert_eq!(h.controller.phase().error(), Some(expected));
            assert!(h.navigator.visits().is_empty());
            assert!(h.storage.is_empty());
        }
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_navigate() {
        let h = harness(
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"teacher"}"#),
        );
        h.storage.fail_writes_to("userType");

        h.controller.submit(credentials("a@b.com", "x")).await;

        assert_eq!(h.controller.phase().error(), Some(MSG_SESSION_NOT_SAVED));
        assert!(h.navigator.visits().is_empty());
        assert_eq!(session_of(&h.storage), None);
    }

    #[tokio::test]
    async fn test_repeated_failures_reenter_failed_and_retry_can_succeed() {
        let h = harness(
            MockHttpClient::new()
                .with_response(401, r#"{"message":"Invalid credentials"}"#)
                .with_response(401, r#"{"message":"Invalid credentials"}"#)
                .with_response(200, r#"{"token":"tok2","userType":"student"}"#),
        );

        for _ in 0..2 {
            h.controller.submit(credentials("a@b.com", "x")).await;
            assert_eq!(h.controller.phase().error(), Some("Invalid credentials"));
        }

        h.controller.submit(credentials("a@b.com", "right")).await;
        assert_eq!(h.controller.phase().error(), None);
        assert_eq!(h.navigator.visits(), vec![AppRoute::dashboard(Role::Student)]);
        assert_eq!(h.client.request_count(), 3);
    }

    // =========================================================
    // 并发与生命周期
    // =========================================================

    #[tokio::test]
    async fn test_submit_while_submitting_is_noop() {
        let client =
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"teacher"}"#);
        let release = client.hold_next();
        let h = harness(client);

        let first = h.controller.submit(credentials("a@b.com", "x"));
        let second = async {
            // 第一次提交已挂起在网络请求上
            assert!(h.controller.phase().is_submitting());
            h.controller.submit(credentials("a@b.com", "x")).await;
            release.send(()).unwrap();
        };
        futures::join!(first, second);

        assert_eq!(h.client.request_count(), 1);
        assert_eq!(h.navigator.visits(), vec![AppRoute::dashboard(Role::Teacher)]);
    }

    #[tokio::test]
    async fn test_submit_clears_previous_error_before_request() {
        let client = MockHttpClient::new()
            .with_response(401, r#"{"message":"Invalid credentials"}"#)
            .with_response(200, r#"{"token":"tok1","userType":"teacher"}"#);
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);

        let storage = MemoryStorage::new();
        let controller = LoginController::new(
            LulusinApi::new(String::new(), client),
            SessionStore::new(storage),
            RecordingNavigator::at("/login"),
        )
        .with_observer(move |phase| sink.borrow_mut().push(phase.clone()));

        controller.submit(credentials("a@b.com", "x")).await;
        controller.submit(credentials("a@b.com", "y")).await;

        let phases = observed.borrow();
        assert_eq!(phases[0], LoginPhase::Submitting);
        assert_eq!(phases[1], LoginPhase::Failed("Invalid credentials".to_string()));
        assert_eq!(phases[2], LoginPhase::Submitting);
        assert!(matches!(phases[3], LoginPhase::Redirecting(_)));
    }

    #[tokio::test]
    async fn test_dispose_mid_request_drops_outcome() {
        let client =
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"admin"}"#);
        let release = client.hold_next();
        let h = harness(client);

        let submit = h.controller.submit(credentials("a@b.com", "x"));
        let teardown = async {
            h.controller.dispose();
            let _ = release.send(());
        };
        futures::join!(submit, teardown);

        assert!(h.navigator.visits().is_empty());
        assert!(h.storage.is_empty());
        // 销毁后阶段停留在 Submitting，不再更新
        assert!(h.controller.phase().is_submitting());
    }

    #[tokio::test]
    async fn test_disposed_controller_rejects_submit() {
        let h = harness(
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"admin"}"#),
        );
        h.controller.dispose();

        h.controller.submit(credentials("a@b.com", "x")).await;

        assert_eq!(h.client.request_count(), 0);
        assert_eq!(h.controller.phase(), LoginPhase::Idle);
    }

    #[tokio::test]
    async fn test_redirecting_controller_ignores_further_submits() {
        let h = harness(
            MockHttpClient::new().with_response(200, r#"{"token":"tok1","userType":"admin"}"#),
        );
        h.controller.submit(credentials("a@b.com", "x")).await;
        h.controller.submit(credentials("a@b.com", "x")).await;

        assert_eq!(h.client.request_count(), 1);
        assert_eq!(h.navigator.visits().len(), 1);
    }

    // =========================================================
    // 表单
    // =========================================================

    #[test]
    fn test_password_toggle_does_not_change_credentials() {
        let mut form = LoginForm {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            show_password: false,
        };
        let before = form.credentials();

        form.toggle_password_visibility();
        assert!(form.show_password);
        assert_eq!(form.credentials(), before);

        form.toggle_password_visibility();
        assert!(!form.show_password);
    }

    #[test]
    fn test_form_passes_empty_fields_through() {
        let creds = LoginForm::default().credentials();
        assert_eq!(creds.email, "");
        assert_eq!(creds.password, "");
    }
}
