mod app;

use eframe::egui;

use app::OutfitApp;

fn main() {
    env_logger::init();

    let server = std::env::var("OUTFIT_SERVER")
        .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    log::info!("outfit server: {}", server);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 780.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MisMatch — Outfit Generator",
        options,
        Box::new(move |cc| {
            let mut app = OutfitApp::new(&server)?;
            app.start_load_catalog(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .expect("Failed to start outfit browser");
}
