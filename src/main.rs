mod app;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the layout server.
    #[arg(long, default_value = "http://127.0.0.1:4600")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "factory-planner",
        options,
        Box::new(move |cc| Ok(Box::new(app::PlannerApp::new(cc, args.server_url.clone())))),
    )
}
