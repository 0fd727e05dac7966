use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    ask_card::AskCard,
    fx_layer::FxLayer,
    settings_modal::SettingsModal,
    yes_panel::{YES_IMAGE_SRC, YesPanel},
};
use crate::model::{Density, Outcome, PromptAction, PromptState, Settings};
use crate::state::FxState;
use crate::util::{clog, now_ms};

const SETTINGS_KEY: &str = "vt_settings";

/// Delay between the pop animation starting and the view switching.
const POP_SWITCH_DELAY_MS: i32 = 360;
/// Delay after a direct YES before the view switches.
const YES_SWITCH_DELAY_MS: i32 = 120;
/// Shower durations for the two ways of getting to the Yes panel.
const POP_SHOWER_MS: f64 = 5000.0;
const YES_SHOWER_MS: f64 = 2200.0;

#[derive(PartialEq, Clone)]
enum View {
    Ask,
    Yes,
}

fn load_settings() -> Option<Settings> {
    let win = web_sys::window()?;
    let store = win.local_storage().ok()??;
    let raw = store.get_item(SETTINGS_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Ask);
    let prompt = use_reducer(PromptState::default);
    let fx = use_mut_ref(FxState::default);
    let settings = use_state(|| load_settings().unwrap_or_default());
    let open_settings = use_state(|| false);

    // Persist settings and push them into the FX state.
    {
        let fx = fx.clone();
        use_effect_with(*settings, move |s| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(raw) = serde_json::to_string(s) {
                        let _ = store.set_item(SETTINGS_KEY, &raw);
                    }
                }
            }
            fx.borrow_mut().apply_settings(*s);
            || ()
        });
    }

    // Preload the celebration image so the Yes panel doesn't pop in late.
    use_effect_with((), move |_| {
        if let Ok(img) = web_sys::HtmlImageElement::new() {
            img.set_src(YES_IMAGE_SRC);
            let decode = img.decode();
            wasm_bindgen_futures::spawn_local(async move {
                // A missing or broken asset is not worth surfacing.
                let _ = wasm_bindgen_futures::JsFuture::from(decode).await;
            });
        }
        || ()
    });

    // Outcome effect: start the shower immediately, switch views after a
    // short beat so the pop animation is visible on the Ask card.
    {
        let view = view.clone();
        let prompt_handle = prompt.clone();
        let fx = fx.clone();
        use_effect_with(prompt.outcome, move |outcome| {
            let mut timeout_id: Option<i32> = None;
            let mut switch_cb: Option<Closure<dyn FnMut()>> = None;
            if let Some(outcome) = *outcome {
                clog(&format!("outcome: {:?}", outcome));
                let (shower_ms, delay_ms) = match outcome {
                    Outcome::Popped => (POP_SHOWER_MS, POP_SWITCH_DELAY_MS),
                    Outcome::Direct => (YES_SHOWER_MS, YES_SWITCH_DELAY_MS),
                };
                fx.borrow_mut().start_shower(now_ms(), shower_ms);
                let cb = Closure::wrap(Box::new(move || {
                    view.set(View::Yes);
                    prompt_handle.dispatch(PromptAction::Reset);
                }) as Box<dyn FnMut()>);
                if let Some(win) = web_sys::window() {
                    timeout_id = win
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            cb.as_ref().unchecked_ref(),
                            delay_ms,
                        )
                        .ok();
                }
                switch_cb = Some(cb);
            }
            move || {
                if let (Some(id), Some(win)) = (timeout_id, web_sys::window()) {
                    win.clear_timeout_with_handle(id);
                }
                drop(switch_cb);
            }
        });
    }

    let restart = {
        let view = view.clone();
        let prompt = prompt.clone();
        Callback::from(move |_| {
            view.set(View::Ask);
            prompt.dispatch(PromptAction::Reset);
        })
    };

    let open_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: MouseEvent| open_settings.set(true))
    };
    let close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(false))
    };
    let toggle_reduce_motion = {
        let settings = settings.clone();
        Callback::from(move |_| {
            let mut s = *settings;
            s.reduce_motion = !s.reduce_motion;
            settings.set(s);
        })
    };
    let set_density = {
        let settings = settings.clone();
        Callback::from(move |d: Density| {
            let mut s = *settings;
            s.density = d;
            settings.set(s);
        })
    };
    let reset_settings = {
        let settings = settings.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.remove_item(SETTINGS_KEY);
                }
            }
            settings.set(Settings::default());
        })
    };

    let content = match *view {
        View::Ask => html! { <AskCard prompt={prompt.clone()} fx={fx.clone()} /> },
        View::Yes => html! { <YesPanel on_restart={restart.clone()} /> },
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden;">
            { content }
            <FxLayer fx={fx.clone()} />
            <button
                onclick={open_settings_cb}
                title="Settings"
                style="position:fixed; top:12px; right:12px; z-index:40; padding:6px 10px; border-radius:8px;"
            >{"⚙"}</button>
            <SettingsModal
                show={*open_settings}
                settings={*settings}
                on_close={close_settings}
                on_toggle_reduce_motion={toggle_reduce_motion}
                on_set_density={set_density}
                on_reset={reset_settings}
            />
        </div>
    }
}
