mod error;
mod polls;
mod web;

use std::env;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = env::var("PORT")
        .ok()
        .map(|p| p.parse::<u16>().expect("Environment variable 'PORT' must be a valid port number"))
        .unwrap_or(3000);

    web::setup(port).await;
}
