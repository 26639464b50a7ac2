use leptos::prelude::*;
use lulusin_shared::Role;

use crate::components::header::Header;
use crate::web::route::nav_items;

/// 角色工作区外壳
///
/// 各功能页面（科目、科目分类、模拟考试等）在此头部下渲染；
/// 这里只显示当前栏目的标题。
#[component]
pub fn WorkspacePage(role: Role, section: String) -> impl IntoView {
    let first = section.split('/').next().unwrap_or_default();
    let title = nav_items(role)
        .iter()
        .find(|item| item.sub_path.trim_start_matches('/') == first)
        .map(|item| item.label)
        .unwrap_or("Dashboard");

    view! {
        <div class="min-h-screen bg-[#F5F0EB]">
            <Header role=role />
            <main class="container mx-auto p-8">
                <h1 class="text-3xl font-bold text-[#2D4562]">{title}</h1>
            </main>
        </div>
    }
}
