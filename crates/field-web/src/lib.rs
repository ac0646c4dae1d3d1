#![cfg(target_arch = "wasm32")]
//! Browser host for particle fields.
//!
//! Pages either call `mountBackground(parent, variant)` themselves or
//! provide an element with id `field-root`, which is mounted on load.

mod constants;
mod css;
mod dom;
mod events;
mod frame;
mod input;
mod mount;
mod overrides;
mod raster;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub use mount::{mount_background, variants, FieldBackground};

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<FieldBackground>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web starting");

    let Some(root) = dom::window_document()
        .and_then(|d| d.get_element_by_id(constants::AUTO_MOUNT_ID))
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return Ok(());
    };
    spawn_local(async move {
        match mount::mount(root, None).await {
            Ok(bg) => {
                AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(bg));
                if let Err(e) = unmount_on_pagehide() {
                    log::warn!("pagehide listener: {e:?}");
                }
            }
            Err(e) => log::error!("auto-mount error: {:?}", e),
        }
    });
    Ok(())
}

fn unmount_on_pagehide() -> Result<(), JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    events::Listener::new(&window, "pagehide", |_: web::Event| {
        let mounted = AUTO_MOUNTED.with(|slot| slot.borrow_mut().take());
        if let Some(bg) = mounted {
            bg.unmount();
        }
    })?
    .forget();
    Ok(())
}
