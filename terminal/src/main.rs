use terminal::{logging, ui::theme::Theme, App, ClientConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    // egui owns the main thread; network tasks run on this runtime.
    let runtime = tokio::runtime::Runtime::new()?;
    let _enter = runtime.enter();

    let config = ClientConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        rest_url = %config.rest_url,
        realtime_url = %config.realtime_url,
        "Starting chat terminal"
    );
    let app = App::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chat")
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Chat",
        options,
        Box::new(move |cc| {
            Theme::default().apply(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    tracing::info!("Chat terminal exited");
    Ok(())
}
