use crate::constants::ICON_TEXTURE_SIZE;
use crate::core::{Lifecycle, ObjectHandle, ObjectRegistry};
use crate::dom;
use crate::frame::FrameContext;
use fnv::FnvHashMap;
use smallvec::{smallvec, SmallVec};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// One image to fetch and the objects that share it.
pub struct IconJob {
    pub url: String,
    pub layer: u32,
    pub handles: SmallVec<[ObjectHandle; 2]>,
}

/// Assign texture layers to distinct icon urls. Objects that get no layer
/// are returned separately and keep the fallback disc.
pub fn plan(registry: &ObjectRegistry, layers: u32) -> (Vec<IconJob>, Vec<ObjectHandle>) {
    let mut by_url: FnvHashMap<&str, usize> = FnvHashMap::default();
    let mut jobs: Vec<IconJob> = Vec::new();
    let mut unassigned = Vec::new();
    for obj in registry.iter() {
        let url = obj.tool.icon_ref.trim();
        if url.is_empty() {
            unassigned.push(obj.handle);
            continue;
        }
        if let Some(&i) = by_url.get(url) {
            jobs[i].handles.push(obj.handle);
            continue;
        }
        if jobs.len() as u32 >= layers {
            unassigned.push(obj.handle);
            continue;
        }
        by_url.insert(url, jobs.len());
        jobs.push(IconJob {
            url: url.to_string(),
            layer: jobs.len() as u32,
            handles: smallvec![obj.handle],
        });
    }
    (jobs, unassigned)
}

async fn load_image(url: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_cross_origin(Some("anonymous"));
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    JsFuture::from(loaded)
        .await
        .map_err(|_| anyhow::anyhow!("could not load {}", url))?;
    img.set_onload(None);
    img.set_onerror(None);
    Ok(img)
}

/// Draw `img` centred and aspect-fit into a square RGBA buffer.
fn rasterize(img: &web::HtmlImageElement, size: u32) -> anyhow::Result<Vec<u8>> {
    let (w, h) = (img.natural_width() as f64, img.natural_height() as f64);
    if w <= 0.0 || h <= 0.0 {
        anyhow::bail!("image has no size");
    }
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(size);
    canvas.set_height(size);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let side = size as f64;
    let s = side / w.max(h);
    let (dw, dh) = (w * s, h * s);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        (side - dw) * 0.5,
        (side - dh) * 0.5,
        dw,
        dh,
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    // Throws for cross-origin images without CORS headers
    let data = ctx
        .get_image_data(0.0, 0.0, side, side)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(data.data().0)
}

fn apply(ctx: &Rc<RefCell<FrameContext<'static>>>, job: &IconJob, rgba: anyhow::Result<Vec<u8>>) {
    let Ok(mut guard) = ctx.try_borrow_mut() else {
        log::warn!("[icons] scene busy, {} keeps its fallback", job.url);
        return;
    };
    let Some(parts) = guard.parts.as_mut() else {
        return;
    };
    let uploaded = match rgba {
        Ok(bytes) => parts.gpu.upload_icon(job.layer, &bytes),
        Err(e) => {
            log::warn!("[icons] {}: {:#}", job.url, e);
            false
        }
    };
    let registry = parts.scene.registry_mut();
    for &h in &job.handles {
        if uploaded {
            registry.mark_icon_ready(h, job.layer);
        } else {
            registry.mark_icon_failed(h);
        }
    }
}

/// Fetch every planned icon concurrently. Each completion re-checks the
/// lifecycle before touching the scene.
pub fn load_all(
    ctx: Rc<RefCell<FrameContext<'static>>>,
    lifecycle: Lifecycle,
    jobs: Vec<IconJob>,
    unassigned: Vec<ObjectHandle>,
) {
    if !unassigned.is_empty() {
        log::warn!("[icons] {} objects without an icon layer", unassigned.len());
        if let Ok(mut guard) = ctx.try_borrow_mut() {
            if let Some(parts) = guard.parts.as_mut() {
                for h in unassigned {
                    parts.scene.registry_mut().mark_icon_failed(h);
                }
            }
        }
    }
    log::info!("[icons] loading {} icons", jobs.len());
    for job in jobs {
        let ctx = ctx.clone();
        let lifecycle = lifecycle.clone();
        spawn_local(async move {
            let rgba = match load_image(&job.url).await {
                Ok(img) => rasterize(&img, ICON_TEXTURE_SIZE),
                Err(e) => Err(e),
            };
            if !lifecycle.is_alive() {
                return;
            }
            apply(&ctx, &job, rgba);
        });
    }
}
