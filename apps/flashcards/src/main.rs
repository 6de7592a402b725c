use actix_web::{web, HttpServer};
use flashcards::app::build_app;
use flashcards::config::AppConfig;
use flashcards::platform::select_platform;
use flashcards::state::build_state;
use flashcards::telemetry::{init_tracing, startup_span};
use tracing::{error, info, Instrument};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging depends on the platform, so configuration errors go to stderr.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let platform = select_platform(&config);
    init_tracing(&platform.log_format());

    let address = platform.listen_address();
    let startup = startup_span();

    let state = async {
        info!(
            platform = platform.name(),
            store = %platform.data_store().summary(),
            "starting flashcards"
        );
        let template_dir = config.resolve_template_dir()?;
        info!(template_dir = %template_dir.display(), "using templates");

        build_state()
            .with_store(platform.data_store())
            .with_template_dir(template_dir)
            .with_demo_data(platform.seeds_demo_data())
            .build()
            .await
    }
    .instrument(startup.clone())
    .await;

    let app_state = match state {
        Ok(state) => state,
        Err(e) => {
            startup.in_scope(|| error!(error = %e, "failed to build application state"));
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    let server = match HttpServer::new(move || build_app(data.clone())).bind(&address) {
        Ok(server) => server,
        Err(e) => {
            startup.in_scope(|| error!(address = %address, error = %e, "failed to bind"));
            std::process::exit(1);
        }
    };

    startup.in_scope(|| info!(address = %address, "listening"));
    server.run().await
}
