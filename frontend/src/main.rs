mod api;
mod app;
mod components;
mod config;
mod pages;
mod router;
mod session;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<app::App>::new().render();
}
