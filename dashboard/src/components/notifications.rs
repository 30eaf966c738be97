//! Transient notification stack

use leptos::prelude::*;
use script_url_controller::NoticeKind;

use crate::surface::UiSignals;

#[component]
pub fn Notifications(ui: UiSignals) -> impl IntoView {
    view! {
        <div class="notifications">
            <For
                each=move || ui.notifications.get()
                key=|(id, _)| *id
                children=move |(_, notice)| {
                    let class = match notice.kind {
                        NoticeKind::Success => "copy-feedback",
                        NoticeKind::Error => "copy-feedback error",
                    };
                    view! { <div class=class>{notice.message}</div> }
                }
            />
        </div>
    }
}
