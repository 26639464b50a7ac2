use leptos::prelude::*;
use lulusin_shared::Role;

use crate::components::icons::Logout;
use crate::guard::NavGuard;
use crate::session::SessionStore;
use crate::web::BrowserStorage;
use crate::web::router::use_router;

/// 角色头部：品牌、导航链接与注销按钮
#[component]
pub fn Header(role: Role) -> impl IntoView {
    let router = use_router();
    let guard = NavGuard::new(role, SessionStore::new(BrowserStorage), router);
    let dashboard = guard.href("/dashboard");
    let dashboard_href = dashboard.clone();

    let links = guard
        .nav_items()
        .iter()
        .map(|item| {
            let href = guard.href(item.sub_path);
            let sub_path = item.sub_path;
            let target = href.clone();
            view! {
                <a
                    href=href
                    class=move || {
                        if guard.is_active(sub_path) {
                            "text-white transition-colors duration-200"
                        } else {
                            "text-gray-300 hover:text-white transition-colors duration-200"
                        }
                    }
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate_path(&target);
                    }
                >
                    {item.label}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="bg-[#1E2A4F] text-white">
            <div class="container mx-auto">
                <div class="flex items-center justify-between h-16">
                    <a
                        href=dashboard_href
                        class="flex items-center ml-4"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            router.navigate_path(&dashboard);
                        }
                    >
                        <div>
                            <span class="text-xl font-bold">"LuLuSin"</span>
                            <div class="text-xs text-gray-300">"Education Academy"</div>
                        </div>
                    </a>

                    <nav class="flex items-center space-x-8 ml-auto mr-8">{links}</nav>

                    <button
                        class="bg-[#374151] hover:bg-[#4B5563] px-4 py-1.5 rounded-full text-white flex items-center gap-2 transition-all duration-200 mr-4"
                        on:click=move |_| guard.logout()
                    >
                        <span>"Logout"</span>
                        <Logout attr:class="w-4 h-4" />
                    </button>
                </div>
            </div>
        </header>
    }
}
