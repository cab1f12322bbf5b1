use crate::dom::Elements;
use crate::overlay;
use crate::progress::LoadProgress;
use viewer_core::{import_model, LoadedModel};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} fetching {}", resp.status(), path);
    }
    let buffer = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch and decode the model at `path` in the background. `on_load` runs
/// only on success; failures are logged and the scene stays empty.
pub fn load_model(ui: Elements, path: &'static str, on_load: impl FnOnce(LoadedModel) + 'static) {
    spawn_local(async move {
        let mut progress = LoadProgress::new(1);
        overlay::set_loading(&ui, &progress.label());

        let result = match fetch_bytes(path).await {
            Ok(bytes) => import_model(&bytes).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        match result {
            Ok(model) => {
                progress.item_done();
                overlay::set_loading(&ui, &progress.label());
                if progress.is_complete() {
                    overlay::hide_loading(&ui);
                }
                log::info!("[loader] loaded {}", path);
                on_load(model);
            }
            Err(e) => log::error!("[loader] failed to load {}: {:?}", path, e),
        }
    });
}
