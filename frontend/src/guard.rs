//! 导航守卫
//!
//! 为角色头部提供导航项、高亮判断和注销。
//! 不做任何授权检查：高亮只用于显示。

use leptos::logging::log;
use lulusin_shared::Role;

use crate::session::{KeyValueStorage, SessionStore};
use crate::web::route::{AppRoute, NavItem, nav_items};
use crate::web::router::Navigator;

#[derive(Debug, Clone, Copy)]
pub struct NavGuard<S, N> {
    role: Role,
    store: SessionStore<S>,
    navigator: N,
}

impl<S: KeyValueStorage, N: Navigator> NavGuard<S, N> {
    pub fn new(role: Role, store: SessionStore<S>, navigator: N) -> Self {
        Self {
            role,
            store,
            navigator,
        }
    }

    pub fn nav_items(&self) -> &'static [NavItem] {
        nav_items(self.role)
    }

    /// 角色命名空间下的完整路径
    pub fn href(&self, sub_path: &str) -> String {
        format!("/{}{}", self.role.namespace(), sub_path)
    }

    /// 当前路径是否位于 `/{namespace}{sub_path}` 之下
    pub fn is_active(&self, sub_path: &str) -> bool {
        self.navigator
            .current_path()
            .starts_with(&self.href(sub_path))
    }

    /// 注销：清除会话后回到登录页
    ///
    /// 没有会话时同样会跳转。
    pub fn logout(&self) {
        log!("[Guard] Logging out {}", self.role);
        self.store.clear();
        self.navigator.navigate(AppRoute::Login);
    }
}
