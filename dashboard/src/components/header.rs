//! Page header with the service the links are minted by

use leptos::prelude::*;
use script_url_controller::format_seconds;

use crate::SharedController;

#[component]
pub fn Header(controller: SharedController) -> impl IntoView {
    let (service, refresh) = controller.with_value(|c| {
        let config = c.config();
        let service = if config.api_base.is_empty() {
            "this server".to_string()
        } else {
            config.api_base.trim_end_matches('/').to_string()
        };
        (service, config.tick_interval().as_secs().max(1))
    });

    view! {
        <header class="header">
            <div>
                <h1>"🔗 Script URL Generator"</h1>
                <p class="subtitle">"One-shot trigger links from " {service}</p>
            </div>
            <span class="badge" title="countdown refresh period">
                "Refresh " {format_seconds(refresh)}
            </span>
        </header>
    }
}
