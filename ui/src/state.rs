use factor_core::Security;
use leptos::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Catalog lifecycle: `Loading` until the one startup fetch settles. A
/// failed load settles to `Ready` with an empty list, so autocomplete
/// silently degrades to free-text entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<Security>),
}

impl CatalogState {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn securities(&self) -> &[Security] {
        match self {
            Self::Ready(list) => list,
            Self::Loading => &[],
        }
    }
}

#[derive(Clone)]
pub struct AppCtx {
    pub api_base: RwSignal<String>,
    pub catalog: RwSignal<CatalogState>,
}

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

fn api_base_default() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        // Same-origin unless the host page overrides it.
        read_global("FACTORLAB_API_BASE").unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

pub fn provide_app_ctx() -> AppCtx {
    let ctx = AppCtx {
        api_base: create_rw_signal(api_base_default()),
        catalog: create_rw_signal(CatalogState::Loading),
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().expect("AppCtx not provided")
}
