//! Sprite loading. All six images load asynchronously; the game never waits
//! for them. A sprite that has not finished loading (or whose load failed)
//! reports `ready() == false` and the renderer substitutes a flat-color shape,
//! so a missing asset degrades visuals but never halts the loop.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlImageElement};

pub struct Sprite {
    img: HtmlImageElement,
    failed: Rc<Cell<bool>>,
}

impl Sprite {
    /// Start loading `src`. Load / error outcomes are logged to the console;
    /// `settled` counts both so progress can be reported as n-of-6.
    fn load(src: &str, name: &'static str, settled: Rc<Cell<u32>>, total: u32) -> Result<Self, JsValue> {
        let img = HtmlImageElement::new()?;
        let failed = Rc::new(Cell::new(false));

        {
            let settled = settled.clone();
            let closure = Closure::wrap(Box::new(move || {
                settled.set(settled.get() + 1);
                console::log_1(&JsValue::from_str(&format!(
                    "sprite loaded: {} ({}/{})",
                    name,
                    settled.get(),
                    total
                )));
            }) as Box<dyn FnMut()>);
            img.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let failed = failed.clone();
            let closure = Closure::wrap(Box::new(move || {
                settled.set(settled.get() + 1);
                failed.set(true);
                console::warn_1(&JsValue::from_str(&format!(
                    "sprite failed to load: {name}; using flat-color fallback"
                )));
            }) as Box<dyn FnMut()>);
            img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        img.set_src(src);
        Ok(Self { img, failed })
    }

    /// True once the image decoded successfully and can be drawn.
    pub fn ready(&self) -> bool {
        !self.failed.get() && self.img.complete() && self.img.natural_height() != 0
    }

    pub fn image(&self) -> &HtmlImageElement {
        &self.img
    }
}

pub struct Assets {
    pub dino: Sprite,
    pub cactus_small: Sprite,
    pub cactus_large: Sprite,
    pub cloud: Sprite,
    pub ground: Sprite,
    pub restart: Sprite,
}

impl Assets {
    pub fn load() -> Result<Self, JsValue> {
        let settled = Rc::new(Cell::new(0u32));
        let total = 6;
        Ok(Self {
            dino: Sprite::load("img/1x-trex.png", "trex", settled.clone(), total)?,
            cactus_small: Sprite::load("img/1x-obstacle-small.png", "cactus-small", settled.clone(), total)?,
            cactus_large: Sprite::load("img/1x-obstacle-large.png", "cactus-large", settled.clone(), total)?,
            cloud: Sprite::load("img/1x-cloud.png", "cloud", settled.clone(), total)?,
            ground: Sprite::load("img/1x-horizon.png", "ground", settled.clone(), total)?,
            restart: Sprite::load("img/1x-restart.png", "restart", settled, total)?,
        })
    }
}
