use crate::constants::MAX_TEXTURE_DIMENSION;
use crate::render::GpuState;
use globe_core::texture::TextureImage;
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen_futures::spawn_local;

async fn fetch_texture(url: &str) -> anyhow::Result<TextureImage> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> HTTP {}", url, resp.status());
    }
    let bytes = resp.binary().await?;
    Ok(TextureImage::decode(&bytes, MAX_TEXTURE_DIMENSION)?)
}

/// Load the globe texture in the background. The renderer keeps its fallback
/// on failure; nothing happens if it was disposed meanwhile.
pub fn spawn_texture_load(url: &'static str, gpu: Weak<RefCell<Option<GpuState>>>) {
    spawn_local(async move {
        match fetch_texture(url).await {
            Ok(image) => {
                let Some(gpu) = gpu.upgrade() else {
                    log::debug!("[texture] globe gone before {} arrived", url);
                    return;
                };
                if let Some(state) = gpu.borrow_mut().as_mut() {
                    state.set_globe_texture(&image);
                }
            }
            Err(e) => log::error!("[texture] {} failed, keeping flat globe: {:?}", url, e),
        };
    });
}
