//! Dino Dash core crate.
//!
//! Endless-runner gameplay: a dino sprints over a scrolling desert, the player
//! jumps and ducks past cacti, score climbs once per frame and the sky flips
//! between day and night at score milestones. `start_game()` is the single
//! entrypoint exposed to JS; everything else is per-frame simulation plus
//! canvas rendering. The simulation itself (`runner::world`) is pure Rust and
//! testable natively on the host.

use wasm_bindgen::prelude::*;

pub mod runner;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Boot the runner: set up the canvas, overlays, input listeners and the
/// animation-frame loop, then start ticking.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    runner::start_runner_mode()
}
