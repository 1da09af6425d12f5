pub mod package;

use crate::{
    constants::SQLITE_BUSY_TIMEOUT_MILLISECONDS, errors::PackageServerError, utils::run_migrations,
};
use actix::Actor;
use anyhow::{anyhow, Error, Result};
use diesel::{
    connection::SimpleConnection,
    helper_types::{AsSelect, Select},
    query_builder::InsertStatement,
    r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection},
    result::{DatabaseErrorKind, Error as DieselError},
    sqlite::{Sqlite, SqliteConnection},
    Insertable,
};

pub type All<Table, T> = Select<Table, AsSelect<T, Sqlite>>;
pub type Create<Type, Table> = InsertStatement<Table, <Type as Insertable<Table>>::Values>;

#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {};", self.busy_timeout))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Turns unique constraint violations into [`PackageServerError::PackageConflict`].
pub(crate) fn map_write_error(error: DieselError) -> Error {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PackageServerError::PackageConflict.into()
        }
        error => error.into(),
    }
}

#[derive(Clone)]
pub struct Database {
    connection_pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Actor for Database {
    type Context = actix::Context<Self>;
}

impl Database {
    pub fn try_new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        Ok(Self {
            connection_pool: Pool::builder()
                .connection_customizer(Box::new(ConnectionOptions {
                    busy_timeout: SQLITE_BUSY_TIMEOUT_MILLISECONDS,
                }))
                .build(manager)
                .map_err(|error| anyhow!("Failed to create database connection pool: {}", error))?,
        })
    }

    pub fn get_connection(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.connection_pool.get()?)
    }

    pub fn run_migrations(&self) -> Result<()> {
        let mut connection = self.get_connection()?;
        run_migrations(&mut *connection)
            .map_err(|error| anyhow!("Failed to run database migrations: {}", error))
    }
}
