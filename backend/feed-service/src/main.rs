use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_service::config::{Config, StoreKind};
use feed_service::db::{
    ContentStore, FollowGraph, InMemoryStore, PgContentRepository, PgFollowRepository,
};
use feed_service::handlers::{self, AppState};
use feed_service::services::{ContentService, FeedService, FollowService};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();
}

async fn build_stores(
    config: &Config,
) -> anyhow::Result<(Arc<dyn ContentStore>, Arc<dyn FollowGraph>)> {
    match config.store.kind {
        StoreKind::Postgres => {
            let db = config
                .database
                .as_ref()
                .context("database configuration missing for postgres store")?;

            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .min_connections(db.min_connections)
                .acquire_timeout(Duration::from_secs(10))
                .connect(&db.url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            if db.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                info!("Database migrations applied");
            }

            let content: Arc<dyn ContentStore> = Arc::new(PgContentRepository::new(pool.clone()));
            let graph: Arc<dyn FollowGraph> = Arc::new(PgFollowRepository::new(pool));
            Ok((content, graph))
        }
        StoreKind::Memory => {
            let store = match &config.store.seed_path {
                Some(path) => InMemoryStore::from_seed_file(path)
                    .await
                    .context("Failed to seed in-memory store")?,
                None => InMemoryStore::new(),
            };
            let store = Arc::new(store);
            tracing::warn!("Using in-memory store; data is lost on restart");
            let content: Arc<dyn ContentStore> = store.clone();
            let graph: Arc<dyn FollowGraph> = store;
            Ok((content, graph))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let (content_store, follow_graph) = match build_stores(&config).await {
        Ok(stores) => stores,
        Err(e) => {
            tracing::error!("Store initialization failed: {:#}", e);
            eprintln!("ERROR: Failed to initialize store: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        feed: FeedService::new(
            content_store.clone(),
            follow_graph.clone(),
            config.feed.max_candidates,
        ),
        content: ContentService::new(content_store),
        follow: FollowService::new(follow_graph),
    });

    let bind_addr = (config.app.host.clone(), config.app.port);
    info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
