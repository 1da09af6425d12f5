use crate::{configuration::ImporterConfiguration, models::NewPackage, AppState, Database};
use actix::{Actor, Addr};
use actix_web::web::Data;
use anyhow::{anyhow, Result};
use tempfile::TempDir;

pub const TEST_DATABASE_FILE: &str = "pkgmirror-test.sqlite";

/// Starts a migrated database actor backed by a file in a fresh temporary
/// directory. The directory is removed when the returned guard is dropped.
pub fn create_test_database() -> Result<(TempDir, Addr<Database>)> {
    let database_folder = TempDir::new()?;
    let database_url = database_folder
        .path()
        .join(TEST_DATABASE_FILE)
        .to_str()
        .ok_or_else(|| anyhow!("Failed to create the test database path"))?
        .to_string();

    let database = Database::try_new(&database_url)?;
    database.run_migrations()?;
    Ok((database_folder, database.start()))
}

pub fn create_test_app_state(
    importer: ImporterConfiguration,
) -> Result<(TempDir, Data<AppState<Database>>)> {
    let (database_folder, database_address) = create_test_database()?;
    Ok((
        database_folder,
        Data::new(AppState {
            database_address,
            importer,
        }),
    ))
}

pub fn create_test_new_package(name: &str, version: &str) -> NewPackage {
    NewPackage {
        name: name.to_string(),
        version: version.to_string(),
        published_date: "2023-01-03 12:30:05 UTC".to_string(),
        title: format!("Title of {name}"),
        description: format!("Description of {name}"),
        authors: format!("Author of {name}"),
        maintainers: format!("Maintainer of {name}"),
    }
}
