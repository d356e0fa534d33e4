use crate::components::utils::{debounce, partition_image_files};
use crate::pages::disease::{DiseasePage, Msg};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(page: &DiseasePage, ctx: &Context<DiseasePage>) -> Html {
    let link = ctx.link();
    let busy = page.workflow.state().is_submitting();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let (images, rejected) = input
            .files()
            .as_ref()
            .map(partition_image_files)
            .unwrap_or_default();

        // allow picking the same file again
        input.set_value("");

        match images.into_iter().next() {
            Some(file) => Some(Msg::FileSelected(file)),
            None if !rejected.is_empty() => Some(Msg::FilesRejected(rejected)),
            None => None,
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(move |_: ()| {
        if busy {
            return;
        }
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("leaf-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="leaf-input"
                accept="image/*"
                style="display: none;"
                disabled={busy}
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="analyze-btn"
                disabled={busy}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <i class="fa-solid fa-cloud-arrow-up"></i> {" Upload Leaf Image"}
            </button>

            <div
                id="drop-zone"
                class={classes!("upload-area", page.is_dragging.then_some("drag-over"), busy.then_some("disabled"))}
                aria-disabled={busy.to_string()}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-leaf"></i>
                    <p>{"Drag & drop a leaf photo here, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG, WEBP"}</p>
                </div>
            </div>
        </div>
    }
}
