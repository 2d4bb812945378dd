//! Browser glue for the runner: canvas + overlay setup, input listeners, the
//! requestAnimationFrame loop, and per-frame rendering. Game rules live in
//! [`world`]; this module only moves pixels and DOM state around.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

pub mod assets;
pub mod world;

use assets::Assets;
use world::{
    CactusKind, Obstacle, World, CANVAS_HEIGHT, CANVAS_WIDTH, CLOUD_HEIGHT, CLOUD_WIDTH,
    DINO_HEIGHT, DINO_WIDTH, DINO_X, GROUND_HEIGHT,
};

const RESTART_WIDTH: f64 = 36.0;
const RESTART_HEIGHT: f64 = 32.0;

const HUD_STYLE: &str = "position:fixed; top:10px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#535353; z-index:45; letter-spacing:0.5px;";
const GAME_OVER_STYLE: &str = "position:fixed; left:50%; top:30%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:28px; letter-spacing:6px; color:#535353; z-index:50;";
const RESTART_STYLE: &str = "position:fixed; left:50%; top:42%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:16px; padding:6px 14px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; cursor:pointer; z-index:50;";

/// Runtime state: the canvas pair, loaded sprites, and the simulation.
struct RunnerState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    assets: Assets,
    world: World,
}

thread_local! {
    static RUNNER_STATE: RefCell<Option<RunnerState>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Wire up the page and start the game loop. Safe to call once per page.
pub fn start_runner_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the game canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("dd-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("dd-canvas");
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width(CANVAS_WIDTH as u32);
    canvas.set_height(CANVAS_HEIGHT as u32);
    canvas.set_attribute(
        "style",
        "position:fixed; left:50%; top:55%; transform:translate(-50%,-50%); border-bottom:2px solid #535353; z-index:20;",
    )?;
    // The day/night flip animates through this transition.
    let style = canvas.style();
    style.set_property("background-color", "white")?;
    style.set_property("transition", "background-color 1s")?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    // HUD overlays + game-over controls (hidden until a collision).
    ensure_overlay(&doc, "dd-score", &format!("{HUD_STYLE} right:16px;"), "0")?;
    ensure_overlay(
        &doc,
        "dd-high-score",
        &format!("{HUD_STYLE} right:80px;"),
        "HI: 0",
    )?;
    ensure_overlay(
        &doc,
        "dd-game-over",
        &format!("{GAME_OVER_STYLE} display:none;"),
        "G A M E  O V E R",
    )?;
    let restart_el = ensure_overlay(
        &doc,
        "dd-restart",
        &format!("{RESTART_STYLE} display:none;"),
        "RESTART",
    )?;

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let state = RunnerState {
        canvas,
        ctx,
        assets: Assets::load()?,
        world: World::new(now as u32),
    };
    RUNNER_STATE.with(|cell| cell.replace(Some(state)));

    // Keyboard: Space / ArrowUp jump, ArrowDown (held) ducks.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            RUNNER_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match evt.code().as_str() {
                        "Space" | "ArrowUp" => {
                            if !state.world.game_over {
                                state.world.dino.jump();
                            }
                        }
                        "ArrowDown" => state.world.dino.set_duck(true),
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            RUNNER_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if evt.code() == "ArrowDown" {
                        state.world.dino.set_duck(false);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Restart: reset the world and resume the (stopped) frame loop.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let resumed = RUNNER_STATE.with(|cell| {
                cell.borrow_mut().as_mut().map_or(false, |state| {
                    if state.world.game_over {
                        state.world.restart();
                        apply_sky(state);
                        true
                    } else {
                        false
                    }
                })
            });
            if resumed {
                set_game_over_visible(false);
                start_frame_loop();
            }
        }) as Box<dyn FnMut(_)>);
        restart_el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

/// Self-rescheduling rAF loop. The closure stops re-requesting frames when a
/// tick reports game over; the restart handler spins up a fresh chain.
fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let keep_running = RUNNER_STATE.with(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map_or(false, |state| frame_tick(state))
        });
        if keep_running {
            if let Some(w) = window() {
                let _ =
                    w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// One frame: simulate, react to outcome flags, draw, refresh the HUD.
/// Returns whether the loop should keep running.
fn frame_tick(state: &mut RunnerState) -> bool {
    let outcome = state.world.tick();
    if outcome.night_toggled {
        apply_sky(state);
    }
    render(state);
    update_hud(state);
    if outcome.collided {
        set_game_over_visible(true);
        return false;
    }
    true
}

// --- Rendering ----------------------------------------------------------------

fn render(state: &RunnerState) {
    let ctx = &state.ctx;
    ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

    for cloud in &state.world.clouds {
        draw_cloud(state, cloud.x, cloud.y);
    }
    draw_ground(state);
    draw_dino(state);
    for obstacle in &state.world.obstacles {
        draw_obstacle(state, obstacle);
    }
    if state.world.game_over {
        draw_restart_icon(state);
    }
}

fn draw_cloud(state: &RunnerState, x: f64, y: f64) {
    let ctx = &state.ctx;
    let sprite = &state.assets.cloud;
    let drawn = sprite.ready()
        && ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                sprite.image(),
                x,
                y,
                CLOUD_WIDTH,
                CLOUD_HEIGHT,
            )
            .is_ok();
    if !drawn {
        ctx.set_fill_style_str("#f1f1f1");
        ctx.fill_rect(x, y, CLOUD_WIDTH, CLOUD_HEIGHT / 2.0);
    }
}

fn draw_ground(state: &RunnerState) {
    let ctx = &state.ctx;
    let y = CANVAS_HEIGHT - GROUND_HEIGHT;
    let sprite = &state.assets.ground;
    let drawn = sprite.ready()
        && ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                sprite.image(),
                0.0,
                y,
                CANVAS_WIDTH,
                GROUND_HEIGHT,
            )
            .is_ok();
    if !drawn {
        ctx.set_fill_style_str("#535353");
        ctx.fill_rect(0.0, y, CANVAS_WIDTH, GROUND_HEIGHT);
    }
}

fn draw_dino(state: &RunnerState) {
    let ctx = &state.ctx;
    let hitbox = state.world.dino.hitbox();
    let sprite = &state.assets.dino;
    // Sprite sheet holds the three frames side by side; ducking squashes the
    // destination box down to the duck hitbox.
    let frame_x = f64::from(state.world.dino.frame.sheet_index()) * DINO_WIDTH;
    let drawn = sprite.ready()
        && ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                sprite.image(),
                frame_x,
                0.0,
                DINO_WIDTH,
                DINO_HEIGHT,
                DINO_X,
                hitbox.y,
                hitbox.w,
                hitbox.h,
            )
            .is_ok();
    if !drawn {
        ctx.set_fill_style_str("gray");
        ctx.fill_rect(hitbox.x, hitbox.y, hitbox.w, hitbox.h);
    }
}

fn draw_obstacle(state: &RunnerState, obstacle: &Obstacle) {
    let ctx = &state.ctx;
    let rect = obstacle.rect();
    let sprite = match obstacle.kind {
        CactusKind::Small => &state.assets.cactus_small,
        CactusKind::Large => &state.assets.cactus_large,
    };
    let drawn = sprite.ready()
        && ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                sprite.image(),
                rect.x,
                rect.y,
                rect.w,
                rect.h,
            )
            .is_ok();
    if drawn {
        return;
    }

    // Fallback cactus: colored stem plus arms, large variant gets two.
    let stem_w = rect.w * 0.4;
    let stem_x = rect.x + (rect.w - stem_w) / 2.0;
    ctx.set_fill_style_str(obstacle.color);
    ctx.fill_rect(stem_x, rect.y, stem_w, rect.h);
    match obstacle.kind {
        CactusKind::Large => {
            ctx.fill_rect(
                stem_x - stem_w * 0.8,
                rect.y + rect.h * 0.3,
                stem_w * 1.2,
                stem_w,
            );
            ctx.fill_rect(
                stem_x + stem_w,
                rect.y + rect.h * 0.6,
                stem_w * 1.2,
                stem_w,
            );
        }
        CactusKind::Small => {
            ctx.fill_rect(
                stem_x + stem_w,
                rect.y + rect.h * 0.4,
                stem_w * 0.8,
                stem_w,
            );
        }
    }
}

fn draw_restart_icon(state: &RunnerState) {
    let ctx = &state.ctx;
    let x = (CANVAS_WIDTH - RESTART_WIDTH) / 2.0;
    let y = CANVAS_HEIGHT / 2.0;
    let sprite = &state.assets.restart;
    let drawn = sprite.ready()
        && ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                sprite.image(),
                x,
                y,
                RESTART_WIDTH,
                RESTART_HEIGHT,
            )
            .is_ok();
    if !drawn {
        ctx.set_fill_style_str("#535353");
        ctx.set_font("28px 'Fira Code', monospace");
        ctx.set_text_align("center");
        ctx.fill_text("\u{27f3}", CANVAS_WIDTH / 2.0, y + RESTART_HEIGHT / 2.0)
            .ok();
    }
}

// --- DOM helpers --------------------------------------------------------------

fn ensure_overlay(doc: &Document, id: &str, style: &str, text: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_text_content(Some(text));
    div.set_attribute("style", style)?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&div)?;
    Ok(div)
}

fn update_hud(state: &RunnerState) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("dd-score") {
            el.set_text_content(Some(&state.world.display_score().to_string()));
        }
        if let Some(el) = doc.get_element_by_id("dd-high-score") {
            el.set_text_content(Some(&format!("HI: {}", state.world.display_high_score())));
        }
    }
}

fn apply_sky(state: &RunnerState) {
    let color = if state.world.night { "#003" } else { "white" };
    state
        .canvas
        .style()
        .set_property("background-color", color)
        .ok();
}

fn set_game_over_visible(visible: bool) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let display = if visible { "" } else { " display:none;" };
    if let Some(el) = doc.get_element_by_id("dd-game-over") {
        el.set_attribute("style", &format!("{GAME_OVER_STYLE}{display}"))
            .ok();
    }
    if let Some(el) = doc.get_element_by_id("dd-restart") {
        el.set_attribute("style", &format!("{RESTART_STYLE}{display}"))
            .ok();
    }
}
