use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use samaki_api::config::ApiConfig;
use samaki_api::{handlers, AppState};
use samaki_assistant::engine::AssistantEngine;
use samaki_assistant::mistral::MistralClient;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (config, config_path) = ApiConfig::load()?;
    info!("Loaded config from {}", config_path.display());

    let api_key = config.mistral_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "MISTRAL_API_KEY is not set and api_keys.mistral_api_key is missing from {}",
            config_path.display()
        )
    })?;

    let model = MistralClient::new(api_key)?.with_model(config.assistant.model.clone());
    let engine = AssistantEngine::new(Arc::new(model))
        .with_max_steps(config.assistant.max_steps)
        .with_max_tokens(config.assistant.max_tokens);
    let state = web::Data::new(AppState::new(Arc::new(engine)));

    let allowed_origins = config.allowed_origins();
    let bind_addr = (config.server.host.clone(), config.server.port);
    info!(
        "Starting samaki-api server at http://{}:{}",
        bind_addr.0, bind_addr.1
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(handlers::chat::chat)
            .service(handlers::health::health)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
