use booklist::Application;
use booklist_config::ServerSettings;
use booklist_log::{error, info};

#[tokio::main]
async fn main() {
    let settings = match ServerSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(target: "booklist", "failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    Application::init_logging(&settings);
    info!(
        target: "booklist",
        "starting booklist {} with store {}",
        env!("CARGO_PKG_VERSION"),
        settings.database_url
    );

    let app = match Application::bootstrap(settings).await {
        Ok(app) => app,
        Err(e) => {
            error!(target: "booklist", "startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.listen().await {
        error!(target: "booklist", "{}", e);
        std::process::exit(1);
    }
}
