use crate::components::utils::{debounce, render_spinner};
use crate::pages::disease::{DiseasePage, Msg};
use shared::ModelVariant;
use shared::format::truncate_name;
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_preview_area(page: &DiseasePage, ctx: &Context<DiseasePage>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            { render_selected_image_preview(page) }
            <div class="model-selector">
                <span class="model-selector-title">{"Model"}</span>
                { for ModelVariant::iter().map(|variant| html! {
                    <label key={variant.as_ref()}>
                        <input type="radio" name="model_type"
                               value={variant.as_ref().to_string()}
                               checked={page.workflow.variant() == variant}
                               onchange={ctx.link().callback(move |_| Msg::SetVariant(variant))} />
                        <span class="radio-label-text">{ variant.label() }</span>
                    </label>
                })}
            </div>
            <div class="button-container">
                <button
                    class="analyze-btn primary"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Analyze)
                    })}
                    disabled={!page.workflow.can_submit()}
                >
                    { render_analyze_button_content(page) }
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(page: &DiseasePage) -> Html {
    match (&page.preview_url, page.workflow.selected()) {
        (Some(url), Some(file)) => html! {
            <img id="actual-image-preview"
                src={url.to_string()}
                alt={file.name()} />
        },
        _ => html! {
            <div class="select-preview">
                <p>{"No leaf image selected yet"}</p>
            </div>
        },
    }
}

fn render_analyze_button_content(page: &DiseasePage) -> Html {
    if page.workflow.state().is_submitting() {
        render_spinner("Analyzing...")
    } else {
        let name = page
            .workflow
            .selected()
            .map(|file| truncate_name(&file.name(), 20))
            .unwrap_or_else(|| "Disease".to_string());

        html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", name) }</> }
    }
}
