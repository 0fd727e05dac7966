use yew::prelude::*;

/// Celebration image shown (and preloaded) for the affirmative panel.
pub const YES_IMAGE_SRC: &str = "assets/yes.jpg";

#[derive(Properties, PartialEq, Clone)]
pub struct YesPanelProps {
    pub on_restart: Callback<()>,
}

#[function_component(YesPanel)]
pub fn yes_panel(props: &YesPanelProps) -> Html {
    let restart = {
        let cb = props.on_restart.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div id="yes-panel" style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
            <div style="background:rgba(22,27,34,0.92); border:1px solid #30363d; border-radius:16px; padding:32px 40px; text-align:center; max-width:460px; width:90%;">
                <h1 style="margin:0 0 12px 0; font-size:28px; color:#ff4f7a;">{"Yes! ❤"}</h1>
                <img
                    class="yes-img"
                    src={YES_IMAGE_SRC}
                    alt="celebration"
                    style="max-width:100%; border-radius:12px; margin-bottom:16px;"
                />
                <p style="margin:0 0 20px 0; opacity:0.85;">{"Best decision you've made all year."}</p>
                <button class="btn" onclick={restart}>{"Ask me again"}</button>
            </div>
        </div>
    }
}
