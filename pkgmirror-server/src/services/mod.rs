pub mod database;
pub mod importer;
