use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::backend::SchedulingBackend;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::http::start_server;
use crate::local_store::LocalStore;

mod backend;
mod booking;
mod clock;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod lifecycle;
mod local_store;
mod slots;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
struct AppState<T: SchedulingBackend> {
    scheduler: T,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConfigurationHandler::parse();
    let store = LocalStore::default();
    if config.seed_example_data() {
        store.insert_example_tutor();
    }
    let state = AppState { scheduler: store };
    start_server(state, config).await;
}
