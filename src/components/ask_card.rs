use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::model::{PromptAction, PromptState, clicks_to_pop};
use crate::state::FxState;
use crate::util::now_ms;

#[derive(Properties)]
pub struct AskCardProps {
    pub prompt: UseReducerHandle<PromptState>,
    pub fx: Rc<RefCell<FxState>>,
}

impl PartialEq for AskCardProps {
    fn eq(&self, other: &Self) -> bool {
        self.prompt == other.prompt && Rc::ptr_eq(&self.fx, &other.fx)
    }
}

#[function_component(AskCard)]
pub fn ask_card(props: &AskCardProps) -> Html {
    let no_btn_ref = use_node_ref();
    let prompt = &props.prompt;

    let on_yes = {
        let prompt = prompt.clone();
        Callback::from(move |_: MouseEvent| prompt.dispatch(PromptAction::YesPressed))
    };

    // Shared NO press path for mouse and touch: float a heart just above
    // the button, then let the reducer move the scales.
    let press_no = {
        let prompt = prompt.clone();
        let fx = props.fx.clone();
        let no_btn_ref = no_btn_ref.clone();
        Rc::new(move || {
            if let Some(btn) = no_btn_ref.cast::<HtmlElement>() {
                let r = btn.get_bounding_client_rect();
                fx.borrow_mut()
                    .spawn_float(r.left() + r.width() / 2.0, r.top() - 10.0, now_ms());
            }
            prompt.dispatch(PromptAction::NoPressed);
        })
    };
    let on_no_click = {
        let press_no = press_no.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            press_no();
        })
    };
    // touchstart with default prevented also suppresses the synthetic click.
    let on_no_touch = {
        let press_no = press_no.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            press_no();
        })
    };

    let yes_style = format!("--btn-scale:{:.3};", prompt.yes_scale);
    let no_style = format!("--btn-scale:{:.3};", prompt.no_scale);
    let yes_class = classes!(
        "btn",
        "btn-yes",
        prompt.popped().then_some("is-popping")
    );
    // Two identical keyframe sets so consecutive presses restart the wobble.
    let no_class = classes!(
        "btn",
        "btn-no",
        (prompt.no_clicks > 0).then(|| {
            if prompt.no_clicks % 2 == 1 {
                "wobble-a"
            } else {
                "wobble-b"
            }
        })
    );

    html! {
        <div id="ask-card" style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
            <div style="background:rgba(22,27,34,0.92); border:1px solid #30363d; border-radius:16px; padding:32px 40px; text-align:center; max-width:420px; width:90%;">
                <h1 style="margin:0 0 8px 0; font-size:26px; color:#ff4f7a;">{"Will you be my Valentine?"}</h1>
                <p style="margin:0 0 24px 0; opacity:0.8;">{"Choose wisely. One of these buttons is very persuasive."}</p>
                <div style="display:flex; gap:20px; justify-content:center; align-items:center;">
                    <button class={yes_class} style={yes_style} onclick={on_yes}>{"YES"}</button>
                    <button
                        ref={no_btn_ref}
                        class={no_class}
                        style={no_style}
                        title={format!("{} left", clicks_to_pop().saturating_sub(prompt.no_clicks))}
                        onclick={on_no_click}
                        ontouchstart={on_no_touch}
                    >{"NO"}</button>
                </div>
            </div>
        </div>
    }
}
