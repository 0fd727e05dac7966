use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::state::FxState;

/// Base glyph size of the floating heart before its scale envelope.
const FLOAT_BASE_PX: f64 = 34.0;
const HEART_FILL: &str = "#ff4f7a";

#[derive(Properties)]
pub struct FxLayerProps {
    pub fx: Rc<RefCell<FxState>>,
}

impl PartialEq for FxLayerProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.fx, &other.fx)
    }
}

/// Full-viewport, pointer-transparent canvas. A requestAnimationFrame loop
/// steps the particle state and redraws it every frame; listeners and the
/// frame id are cleaned up on unmount.
#[function_component(FxLayer)]
pub fn fx_layer(props: &FxLayerProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let fx = props.fx.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement =
                canvas_ref.cast::<HtmlCanvasElement>().expect("fx canvas");

            let apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            apply_canvas_size();

            // Animation frame loop; reschedules itself until unmount.
            let raf_id = Rc::new(RefCell::new(None));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let frame_cell_loop = frame_cell.clone();
                let window_loop = window.clone();
                let canvas_loop = canvas.clone();
                let fx_loop = fx.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                    draw_frame(&canvas_loop, &fx_loop, now);
                    if let Ok(id) = window_loop.request_animation_frame(
                        frame_cell_loop
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        *raf_id_loop.borrow_mut() = Some(id);
                    }
                }) as Box<dyn FnMut(f64)>));
                if let Ok(id) = window.request_animation_frame(
                    frame_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            let window_cleanup = window.clone();
            move || {
                let _ = window_cleanup.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_cleanup.cancel_animation_frame(id);
                }
                frame_cell.borrow_mut().take();
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            id="fx-layer"
            style="position:fixed; inset:0; width:100%; height:100%; pointer-events:none; z-index:30;"
        ></canvas>
    }
}

fn draw_frame(canvas: &HtmlCanvasElement, fx: &Rc<RefCell<FxState>>, now: f64) {
    if !canvas.is_connected() {
        return;
    }
    let ctx = match canvas.get_context("2d").ok().flatten() {
        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    let mut fx = fx.borrow_mut();
    fx.step(now, w);

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.clear_rect(0.0, 0.0, w, h);
    if fx.is_idle() {
        return;
    }
    for f in &fx.floats {
        let (x, y) = f.pos(now);
        draw_heart(&ctx, x, y, FLOAT_BASE_PX * f.scale(now), f.alpha(now), 0.0);
    }
    for d in &fx.drops {
        let (x, y) = d.pos(now, h);
        draw_heart(&ctx, x, y, d.size_px, 0.9, d.rotation_deg(now).to_radians());
    }
}

/// Filled heart path authored on a 32px box, centered on (x, y).
fn draw_heart(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64, alpha: f64, rot: f64) {
    if alpha <= 0.0 || size <= 0.0 {
        return;
    }
    ctx.save();
    let _ = ctx.translate(x, y);
    let _ = ctx.rotate(rot);
    let s = size / 32.0;
    let _ = ctx.scale(s, s);
    ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
    ctx.set_fill_style_str(HEART_FILL);
    ctx.begin_path();
    ctx.move_to(0.0, 10.0);
    ctx.bezier_curve_to(-2.0, 4.0, -16.0, 0.0, -16.0, -6.0);
    ctx.bezier_curve_to(-16.0, -14.0, -6.0, -16.0, 0.0, -8.0);
    ctx.bezier_curve_to(6.0, -16.0, 16.0, -14.0, 16.0, -6.0);
    ctx.bezier_curve_to(16.0, 0.0, 2.0, 4.0, 0.0, 10.0);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}
