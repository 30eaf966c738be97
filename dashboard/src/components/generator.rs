//! Generator form, loading card and result card

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use script_url_controller::GENERATED_URL_ID;
use shared::ScriptInfo;

use crate::surface::{
    UiSignals, EXPIRY_TIME_ID, GENERATE_BTN_ID, GENERATE_FORM_ID, LOADING_CARD_ID, RESULT_CARD_ID,
    SCRIPT_SELECT_ID,
};
use crate::SharedController;

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

#[component]
pub fn GeneratorPanel(controller: SharedController, ui: UiSignals) -> impl IntoView {
    // submit action
    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let script_id = ui.selected.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.submit_generation(&script_id).await;
        });
    };

    let select_changed = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        controller.with_value(|c| c.selection_changed(&value));
        ui.selected.set(value);
    };

    let copy = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.copy_to_clipboard().await;
        });
    };

    let open = move |_| {
        controller.with_value(|c| {
            c.open_generated_url();
        });
    };

    let generate_new = move |_| controller.with_value(|c| c.reset_form());

    view! {
        <div class="card">
            <h2>"🔗 Generate a trigger URL"</h2>
            <p style="color: var(--text-secondary); margin-bottom: 1rem; font-size: 0.875rem;">
                "Pick a script. The link runs it once and stops working when the timer runs out."
            </p>

            <form id=GENERATE_FORM_ID on:submit=submit style:display=move || display(!ui.loading.get())>
                <div class="input-group">
                    <select
                        id=SCRIPT_SELECT_ID
                        name="script_id"
                        prop:value=move || ui.selected.get()
                        on:change=select_changed
                    >
                        <option value="">"Choose a script..."</option>
                        <For
                            each=move || ui.scripts.get()
                            key=|script| script.entity_id.clone()
                            children=move |script: ScriptInfo| {
                                let ScriptInfo { entity_id, name } = script;
                                view! { <option value=entity_id>{name}</option> }
                            }
                        />
                    </select>
                    <button
                        id=GENERATE_BTN_ID
                        type="submit"
                        disabled=move || !ui.submit_enabled.get()
                        style:opacity=move || if ui.submit_enabled.get() { "1" } else { "0.6" }
                    >
                        "Generate URL"
                    </button>
                </div>
            </form>
        </div>

        <div id=LOADING_CARD_ID class="card" style:display=move || display(ui.loading.get())>
            <span class="spinner"></span>
            " Generating URL..."
        </div>

        <div id=RESULT_CARD_ID class="card result success" style:display=move || display(ui.result_visible.get())>
            <div class="result-label">"Generated URL"</div>
            <div class="input-group">
                <input
                    id=GENERATED_URL_ID
                    type="text"
                    readonly=true
                    prop:value=move || ui.generated_url.get()
                />
                <button on:click=copy>"Copy"</button>
            </div>
            <div class="stats-row" style="margin-top: 1rem;">
                <div class="stat">
                    <div class="stat-value" id=EXPIRY_TIME_ID>{move || ui.countdown.get()}</div>
                    <div class="stat-label">"Expires in"</div>
                </div>
            </div>
            <div class="input-group" style="margin-top: 1rem;">
                <button on:click=open>"Test URL"</button>
                <button on:click=generate_new>"Generate New"</button>
            </div>
        </div>
    }
}
