use crate::{
    errors::PackageServerError,
    models::NewPackage,
    services::database::package::{CreatePackage, GetPackagesByNameAndVersion},
};
use actix::{dev::ToEnvelope, Actor, Addr, Handler};
use actix_web::web::block;
use anyhow::Result;
use log::{debug, info, warn};
use pkgmirror_library::{archiver::read_description, client::PackageSource, index::IndexEntry};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ImportSummary {
    pub processed: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Mirrors every index entry that is not stored yet.
///
/// Entries are handled one at a time and the first failure aborts the run;
/// packages inserted before the failure stay in the database.
pub async fn import_packages<S, T>(source: &S, database_address: &Addr<T>) -> Result<ImportSummary>
where
    S: PackageSource,
    T: Actor + Handler<GetPackagesByNameAndVersion> + Handler<CreatePackage>,
    <T as Actor>::Context: ToEnvelope<T, GetPackagesByNameAndVersion>,
    <T as Actor>::Context: ToEnvelope<T, CreatePackage>,
{
    let entries = source.fetch_index_entries().await?;
    info!("Index lists {} packages", entries.len());

    let mut summary = ImportSummary::default();
    for entry in entries {
        summary.processed += 1;
        if package_exists(database_address, &entry).await? {
            debug!("Package {entry} is already mirrored");
            summary.skipped += 1;
            continue;
        }

        info!("Fetching new package {entry}");
        let archive = source.fetch_archive(&entry).await?;
        let description = block(move || read_description(&archive)).await??;
        if save_package(database_address, description.into()).await? {
            summary.inserted += 1;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

async fn package_exists<T>(database_address: &Addr<T>, entry: &IndexEntry) -> Result<bool>
where
    T: Actor + Handler<GetPackagesByNameAndVersion>,
    <T as Actor>::Context: ToEnvelope<T, GetPackagesByNameAndVersion>,
{
    let packages = database_address
        .send(GetPackagesByNameAndVersion {
            name: entry.name.clone(),
            version: entry.version.clone(),
        })
        .await??;
    Ok(!packages.is_empty())
}

/// Inserts the package unless its own name and version are already stored.
async fn save_package<T>(database_address: &Addr<T>, new_package: NewPackage) -> Result<bool>
where
    T: Actor + Handler<GetPackagesByNameAndVersion> + Handler<CreatePackage>,
    <T as Actor>::Context: ToEnvelope<T, GetPackagesByNameAndVersion>,
    <T as Actor>::Context: ToEnvelope<T, CreatePackage>,
{
    let entry = new_package.index_entry();
    if package_exists(database_address, &entry).await? {
        warn!("Package {entry} already exists under a different index entry");
        return Ok(false);
    }

    match database_address.send(CreatePackage(new_package)).await? {
        Ok(package) => {
            debug!("Saved package {} with id {}", entry, package.id);
            Ok(true)
        }
        Err(error) if PackageServerError::is_conflict(&error) => {
            warn!("Package {entry} was saved concurrently, skipping");
            Ok(false)
        }
        Err(error) => Err(error),
    }
}
