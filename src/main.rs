mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod routes;
mod store;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use crate::config::Config;
use crate::store::{DepartmentStore, InMemoryDepartmentStore, PgDepartmentStore};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::other(format!("{}: {}", context, err))
}

async fn build_store(config: &Config) -> io::Result<Arc<dyn DepartmentStore>> {
    match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(config, database_url)
                .await
                .map_err(|err| startup_error("Failed to connect to the database", err))?;
            db::init_schema(&pool)
                .await
                .map_err(|err| startup_error("Failed to create the dept table", err))?;
            info!("Using Postgres store (max {} connections)", config.max_connections);
            Ok(Arc::new(PgDepartmentStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, departments are kept in memory only");
            Ok(Arc::new(InMemoryDepartmentStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| startup_error("Invalid configuration", err))?;
    let store = web::Data::from(build_store(&config).await?);

    info!("Starting server at {}", config.bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(routes::configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(config.bind_addr)?.run().await
}
