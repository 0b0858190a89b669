//! Single binary web server: bracket API backed by the Spotify catalog.
//! Run with: cargo run --bin web
//! Requires SPOTIFY_MADNESS_ID and SPOTIFY_MADNESS_SECRET. Listens on 0.0.0.0:8000 by default;
//! override with env: HOST, PORT. See `AppConfig` for the remaining variables.

use actix_web::{
    middleware::{Logger, NormalizePath},
    web::Data,
    App, HttpServer,
};
use madness_bracket::{
    configure, http_client, AppConfig, AppState, CatalogSource, ClientCredentialsProvider,
    CredentialProvider, SpotifyCatalog,
};
use std::sync::Arc;

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    log::error!("{}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(startup_error)?;

    let http = http_client(config.catalog_timeout).map_err(startup_error)?;
    let credentials: Arc<dyn CredentialProvider> = Arc::new(ClientCredentialsProvider::new(
        http.clone(),
        &config.token_url,
        &config.client_id,
        &config.client_secret,
    ));
    let catalog: Arc<dyn CatalogSource> = Arc::new(SpotifyCatalog::new(
        http,
        &config.api_url,
        &config.market,
        credentials.clone(),
    ));

    // Background task: keep the catalog token warm so requests rarely wait on the token endpoint
    let refresher = credentials.clone();
    let refresh_every = config.token_refresh;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(refresh_every);
        loop {
            interval.tick().await;
            if let Err(e) = refresher.current_token().await {
                log::warn!("Catalog token refresh failed: {}", e);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState { catalog, config });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
