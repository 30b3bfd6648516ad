use crate::state::{AppCtx, CatalogState};
use leptos::SignalSet;

#[cfg(target_arch = "wasm32")]
use factor_core::catalog::{Security, STOCKS_URL};
#[cfg(target_arch = "wasm32")]
use gloo_net::http::Request;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

/// Kick off the one catalog fetch for the session. Fire-and-forget, never
/// retried: any failure is logged and settles to an empty catalog, so row
/// editing and submission never block on it.
pub fn load_catalog(ctx: &AppCtx) {
    #[cfg(target_arch = "wasm32")]
    {
        let catalog = ctx.catalog;
        spawn_local(async move {
            let loaded: Vec<Security> = match Request::get(STOCKS_URL).send().await {
                Ok(resp) if resp.ok() => match resp.json::<Vec<Security>>().await {
                    Ok(list) => list,
                    Err(e) => {
                        log_load_failure(&format!("加载股票数据失败: {e}"));
                        Vec::new()
                    }
                },
                Ok(resp) => {
                    log_load_failure(&format!("加载股票数据失败: {}", resp.status()));
                    Vec::new()
                }
                Err(e) => {
                    log_load_failure(&format!("加载股票数据失败: {e}"));
                    Vec::new()
                }
            };
            catalog.set(CatalogState::Ready(loaded));
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        ctx.catalog.set(CatalogState::Ready(Vec::new()));
    }
}

#[cfg(target_arch = "wasm32")]
fn log_load_failure(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
