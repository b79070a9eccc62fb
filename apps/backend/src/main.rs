use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use deckbot::config::Settings;
use deckbot::strategy::TurnRegistry;
use deckbot::{configure_routes, init_tracing, load_dotenv};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    info!(
        service = %settings.service_name,
        bot_name = %settings.bot_name,
        strategy = %settings.strategy,
        "starting deckbot on {}:{}",
        settings.host,
        settings.port
    );

    let bind_addr = (settings.host.clone(), settings.port);
    let settings = web::Data::new(settings);
    // One registry for every worker so a match can hop between them
    let registry = web::Data::new(TurnRegistry::new());

    if !settings.game_ttl.is_zero() {
        let sweeper = registry.clone();
        let ttl = settings.game_ttl;
        actix_web::rt::spawn(async move {
            let mut tick = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                tick.tick().await;
                let dropped = sweeper.sweep_idle(ttl).await;
                if dropped > 0 {
                    info!(dropped, ttl_secs = ttl.as_secs(), "dropped idle games");
                }
            }
        });
    }

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&settings.cors_allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
            .allowed_header("X-Game-Id")
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(settings.clone())
            .app_data(registry.clone())
            .configure(configure_routes)
    })
    .bind(bind_addr.clone())
    .with_context(|| format!("failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run()
    .await?;

    Ok(())
}
