// Browser smoke tests, run with `wasm-pack test --headless --chrome`.
// Compiled out entirely for native `cargo test`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_game_wires_canvas_and_overlays() {
    dino_dash::start_game().expect("start_game should succeed in a browser");
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("dd-canvas").is_some());
    assert!(doc.get_element_by_id("dd-score").is_some());
    assert!(doc.get_element_by_id("dd-high-score").is_some());
    assert!(doc.get_element_by_id("dd-game-over").is_some());
    assert!(doc.get_element_by_id("dd-restart").is_some());
}
