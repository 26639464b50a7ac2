//! LuLuSin 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话存储
//! - `api`: 后端 API 客户端
//! - `auth`: 登录流程控制器
//! - `guard`: 导航守卫（高亮与注销）
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod header;
    mod icons;
    pub mod login;
    pub mod workspace;
}
mod config;
mod error;
mod guard;
mod session;

use crate::components::login::LoginPage;
use crate::components::workspace::WorkspacePage;
use crate::config::ClientConfig;
use crate::session::SessionStore;

use leptos::logging::log;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 注意：这里不校验会话，受保护页面的访问控制不在本应用范围内。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Workspace { role, section } => {
            view! { <WorkspacePage role=role section=section /> }.into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-[#F5F0EB]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-[#2D4562]">"404"</h1>
                    <p class="text-xl mt-4">"Halaman tidak ditemukan"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提供构建时配置
    provide_context(ClientConfig::from_env());

    // 2. 报告上次保存的会话（页面刷新后仍然有效）
    match SessionStore::new(web::BrowserStorage).load() {
        Some(session) => log!("[Session] Restored session for role {}", session.role),
        None => log!("[Session] No stored session"),
    }

    // 3. 路由器组件：提供路由上下文并渲染当前路由
    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
