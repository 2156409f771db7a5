mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod worker;

use std::path::Path;

use lotview_client::ClientConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ClientConfig::load_or_default(Path::new("lotview.toml")).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to read lotview.toml, using defaults");
        ClientConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Lotview"),
        ..Default::default()
    };

    eframe::run_native(
        "Lotview",
        options,
        Box::new(move |cc| Ok(Box::new(app::LotviewApp::new(&cc.egui_ctx, config)))),
    )
}
