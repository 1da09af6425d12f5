use actix::{Actor, Addr};
use configuration::ImporterConfiguration;

pub mod configuration;
pub mod constants;
pub mod errors;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
#[cfg(feature = "test")]
pub mod test;
mod utils;

pub use services::database::Database;

#[derive(Clone)]
pub struct AppState<T>
where
    T: Actor,
{
    pub database_address: Addr<T>,
    pub importer: ImporterConfiguration,
}
