use std::collections::BTreeSet;

use factor_core::model::ModelResult;
use factor_core::portfolio::PortfolioSummary;
use factor_core::run::RunController;
use factor_core::FACTORS;
use leptos::*;
use leptos_meta::*;

use crate::catalog::load_catalog;
use crate::portfolio::PortfolioEditor;
use crate::results::ResultsView;
use crate::state::provide_app_ctx;
use crate::theme::GLOBAL_CSS;

#[cfg(target_arch = "wasm32")]
use factor_core::model::{RunModelRequest, RUN_MODEL_PATH};
#[cfg(target_arch = "wasm32")]
use factor_core::validate::{drift_prompt, validate_run};
#[cfg(target_arch = "wasm32")]
use gloo_net::http::Request;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;
#[cfg(target_arch = "wasm32")]
use web_sys::window;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = provide_app_ctx();
    load_catalog(&ctx);
    let api_base = ctx.api_base;

    let summary = create_rw_signal(PortfolioSummary::default());
    let selected_factors = create_rw_signal::<BTreeSet<&'static str>>(BTreeSet::new());
    let controller = create_rw_signal(RunController::default());
    let result = create_rw_signal::<Option<ModelResult>>(None);

    let in_flight = move || controller.get().phase().in_flight();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        run_model(
            api_base.get_untracked(),
            controller,
            selected_factors,
            summary,
            result,
        );
    };

    view! {
        <Style>{GLOBAL_CSS}</Style>
        <Title text="多因子回归分析"/>
        <main class="page">
            <header class="page-header">
                <h1>"多因子回归分析"</h1>
                <p class="page-subtitle">
                    "选择因子并配置投资组合，运行回归模型查看解释力与预测效果"
                </p>
            </header>
            <form id="input-form" on:submit=on_submit>
                <section class="panel">
                    <div class="section-label">"因子选择"</div>
                    <div class="factor-grid">
                        {FACTORS
                            .iter()
                            .map(|factor| {
                                let id = factor.id;
                                view! {
                                    <label class="factor-option">
                                        <input
                                            type="checkbox"
                                            name="factor"
                                            value=id
                                            on:change=move |ev| {
                                                let checked = event_target_checked(&ev);
                                                selected_factors
                                                    .update(|set| {
                                                        if checked {
                                                            set.insert(id);
                                                        } else {
                                                            set.remove(id);
                                                        }
                                                    });
                                            }
                                        />
                                        <span>{factor.label}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
                <section class="panel">
                    <div class="section-label">"投资组合"</div>
                    <PortfolioEditor summary=summary/>
                </section>
                <div class="submit-row">
                    <button type="submit" id="run-model-btn" disabled=in_flight>
                        "运行模型"
                    </button>
                    <div
                        id="loading-container"
                        class="loading"
                        style:display=move || if in_flight() { "flex" } else { "none" }
                    >
                        <span class="spinner"></span>
                        <span>"正在运行模型，请稍候..."</span>
                    </div>
                </div>
            </form>
            <ResultsView result=result/>
        </main>
    }
}

/// Restore the UI: any submission outcome funnels through here exactly once.
fn finish(controller: RwSignal<RunController>) {
    controller.update(|c| c.finish());
}

#[cfg(target_arch = "wasm32")]
fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

#[cfg(target_arch = "wasm32")]
fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Transport, server and payload failures all surface as the one generic
/// alert; the detail goes to the console only.
#[cfg(target_arch = "wasm32")]
fn report_run_failure(detail: &str) {
    web_sys::console::error_1(&JsValue::from_str(detail));
    alert("模型运行失败，请检查输入数据或稍后再试。");
}

#[cfg(target_arch = "wasm32")]
fn run_model(
    api_base: String,
    controller: RwSignal<RunController>,
    selected_factors: RwSignal<BTreeSet<&'static str>>,
    summary: RwSignal<PortfolioSummary>,
    result: RwSignal<Option<ModelResult>>,
) {
    let mut guard = controller.get_untracked();
    if !guard.begin() {
        return;
    }
    controller.set(guard);

    let factors: Vec<String> = selected_factors
        .get_untracked()
        .iter()
        .map(|id| (*id).to_string())
        .collect();
    let snapshot = summary.get_untracked();

    // Validation failures alert and restore; no request is sent.
    if let Err(err) = validate_run(&factors, &snapshot.weights) {
        alert(&err.to_string());
        finish(controller);
        return;
    }

    // Weight drift is a soft warning: the user may submit anyway.
    if let Some(prompt) = drift_prompt(snapshot.total_weight) {
        if !confirm(&prompt) {
            finish(controller);
            return;
        }
    }

    controller.update(|c| c.submit());
    let payload = RunModelRequest {
        factors,
        portfolio: snapshot.weights,
    };

    spawn_local(async move {
        let url = format!("{api_base}{RUN_MODEL_PATH}");
        let resp = match Request::post(&url).json(&payload) {
            Ok(req) => req.send().await,
            Err(e) => Err(e),
        };
        match resp {
            Ok(http) if http.ok() => match http.json::<ModelResult>().await {
                Ok(model) => {
                    controller.update(|c| c.render());
                    result.set(Some(model));
                }
                Err(e) => report_run_failure(&format!("解析模型结果失败: {e}")),
            },
            Ok(http) => report_run_failure(&format!("模型服务返回 {}", http.status())),
            Err(e) => report_run_failure(&format!("请求失败: {e}")),
        }
        // The one unconditional step: hide progress, re-enable submit.
        finish(controller);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn run_model(
    _api_base: String,
    controller: RwSignal<RunController>,
    _selected_factors: RwSignal<BTreeSet<&'static str>>,
    _summary: RwSignal<PortfolioSummary>,
    _result: RwSignal<Option<ModelResult>>,
) {
    // The request path needs the browser fetch stack; outside it the flow
    // still begins and restores so the control never sticks disabled.
    let mut guard = controller.get_untracked();
    if !guard.begin() {
        return;
    }
    controller.set(guard);
    finish(controller);
}
