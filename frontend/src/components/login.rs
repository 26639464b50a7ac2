use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::LulusinApi;
use crate::auth::{LoginController, LoginForm, LoginPhase};
use crate::components::icons::{Eye, EyeSlash};
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::web::route::REGISTER_PATH;
use crate::web::router::{RouterService, use_router};
use crate::web::{BrowserStorage, FetchClient};

type BrowserLoginController = LoginController<FetchClient, BrowserStorage, RouterService>;

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let router = use_router();

    let form = RwSignal::new(LoginForm::default());
    let phase = RwSignal::new(LoginPhase::Idle);

    let controller: BrowserLoginController = LoginController::new(
        LulusinApi::new(
            config.api_base_url.clone(),
            FetchClient::new(config.request_timeout_ms),
        ),
        SessionStore::new(BrowserStorage),
        router,
    )
    .with_observer(move |p| {
        // 页面卸载后信号已释放，忽略即可
        let _ = phase.try_set(p.clone());
    });
    let controller = StoredValue::new_local(Rc::new(controller));

    // 离开页面时中止进行中的请求
    on_cleanup(move || {
        controller.try_with_value(|c| c.dispose());
    });

    let is_submitting = move || phase.with(LoginPhase::is_submitting);
    let show_password = move || form.with(|f| f.show_password);
    let password_type = move || if show_password() { "text" } else { "password" };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if phase.with_untracked(LoginPhase::is_submitting) {
            return;
        }
        let Some(ctrl) = controller.try_get_value() else {
            return;
        };
        let credentials = form.with_untracked(LoginForm::credentials);
        spawn_local(async move {
            ctrl.submit(credentials).await;
        });
    };

    view! {
        <div class="fixed inset-0 bg-[#1B2B44] overflow-hidden">
            <section class="w-full h-full flex items-center justify-center">
                <div class="w-full max-w-5xl mx-4 bg-white bg-opacity-10 rounded-2xl shadow-lg overflow-hidden flex flex-col md:flex-row">
                    <form
                        class="w-full md:w-1/2 bg-[#F5F0EB] flex flex-col items-center justify-center p-6 md:p-8"
                        on:submit=on_submit
                    >
                        <h2 class="text-3xl font-bold text-[#2D4562] mb-5">"Login"</h2>
                        <p class="text-gray-600 text-center mb-4">
                            "Masuk untuk melanjutkan perjalananmu menuju kesuksesan!"
                        </p>

                        <Show when=move || phase.with(|p| p.error().is_some())>
                            <div
                                role="alert"
                                class="w-full mb-3 p-3 bg-red-100 border border-red-400 text-red-700 rounded-xl text-center"
                            >
                                {move || phase.with(|p| p.error().unwrap_or_default().to_string())}
                            </div>
                        </Show>

                        <div class="w-full mb-3">
                            <label class="block text-gray-700 text-sm font-semibold mb-1" for="email">
                                "Email"
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Masukkan email"
                                class="w-full p-3 border border-gray-300 rounded-xl bg-white text-gray-900"
                                prop:value=move || form.with(|f| f.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.email = value);
                                }
                                disabled=is_submitting
                            />
                        </div>

                        <div class="w-full mb-4">
                            <label class="block text-gray-700 text-sm font-semibold mb-1" for="password">
                                "Password"
                            </label>
                            <div class="relative">
                                <input
                                    id="password"
                                    type=password_type
                                    placeholder="Masukkan password"
                                    class="w-full p-3 border border-gray-300 rounded-xl bg-white text-gray-900 pr-10"
                                    prop:value=move || form.with(|f| f.password.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| f.password = value);
                                    }
                                    disabled=is_submitting
                                />
                                <button
                                    type="button"
                                    class="absolute right-3 top-1/2 transform -translate-y-1/2 text-gray-500 hover:text-[#2D4562]"
                                    on:click=move |_| form.update(LoginForm::toggle_password_visibility)
                                >
                                    {move || {
                                        if show_password() {
                                            view! { <EyeSlash attr:class="h-5 w-5" /> }.into_any()
                                        } else {
                                            view! { <Eye attr:class="h-5 w-5" /> }.into_any()
                                        }
                                    }}
                                </button>
                            </div>
                        </div>

                        <button
                            type="submit"
                            class="w-full bg-[#2D4562] text-white p-3 rounded-xl hover:bg-[#1B2B44] font-semibold disabled:opacity-50"
                            disabled=is_submitting
                        >
                            {move || if is_submitting() { "Loading..." } else { "Login" }}
                        </button>
                        <p class="mt-4 text-sm text-gray-600 text-center">
                            "Belum memiliki akun? "
                            <a href=REGISTER_PATH class="text-[#2D4562] font-semibold hover:text-[#1B2B44]">
                                "Register"
                            </a>
                        </p>
                    </form>

                    <div class="w-full md:w-1/2 flex flex-col items-center justify-center text-white p-6 md:p-8 bg-[#2D4562]">
                        <h2 class="text-2xl font-bold mb-3 text-center">
                            "Selamat Datang" <br /> "Kembali di Lulusin!"
                        </h2>
                        <p class="text-center text-sm">
                            "Ayo lanjutkan perjalananmu menuju kampus impian." <br />
                            "Masuk sekarang dan pantau progres belajarmu!"
                        </p>
                    </div>
                </div>
            </section>
        </div>
    }
}
