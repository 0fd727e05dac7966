use yew::prelude::*;

use crate::model::{Density, Settings};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_close: Callback<()>,
    pub on_toggle_reduce_motion: Callback<()>,
    pub on_set_density: Callback<Density>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_motion_cb = {
        let cb = props.on_toggle_reduce_motion.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Reset saved settings to their defaults?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    let density_btn = |d: Density| {
        let active = props.settings.density == d;
        let cb = props.on_set_density.clone();
        let onclick = Callback::from(move |_| cb.emit(d));
        let style = if active {
            "flex:1; background:#ff4f7a; border:1px solid #ff4f7a; color:#fff;"
        } else {
            "flex:1;"
        };
        html! { <button {onclick} {style}>{ d.label() }</button> }
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:440px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                <input type="checkbox" checked={props.settings.reduce_motion} onclick={toggle_motion_cb} />
                <span>{"Reduce motion (no heart effects)"}</span>
            </label>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <span style="font-size:13px; opacity:0.8;">{"Heart shower density"}</span>
                <div style="display:flex; gap:8px;">
                    { density_btn(Density::Low) }
                    { density_btn(Density::Normal) }
                    { density_btn(Density::High) }
                </div>
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={reset_cb} style="flex:1;">{"Reset saved settings"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
