use crate::{
    constants::IMPORT_SUCCESS_RESPONSE,
    errors::{PackageServerError, ServerResponseError},
    models::{NewPackage, Package, PackageSearchQuery},
    services::{
        database::package::{
            CreatePackage, DeletePackage, GetPackage, GetPackages, GetPackagesByNameAndVersion,
            SearchPackages, UpdatePackage,
        },
        importer,
    },
    AppState,
};
use actix::{dev::ToEnvelope, Actor, Handler};
use actix_web::{
    web::{Data, Json, Path, Query},
    Error, HttpResponse,
};
use anyhow::Result;
use log::{debug, error, info};
use pkgmirror_library::client::Client;

pub async fn add_package<T>(
    app_state: Data<AppState<T>>,
    new_package: Json<NewPackage>,
) -> Result<Json<Package>, Error>
where
    T: Actor + Handler<CreatePackage>,
    <T as Actor>::Context: ToEnvelope<T, CreatePackage>,
{
    let package = app_state
        .database_address
        .send(CreatePackage(new_package.into_inner()))
        .await
        .map_err(|error| {
            error!("Failed to add package: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to add package: {error}");
            ServerResponseError::or_else(error, PackageServerError::PackageSave)
        })?;
    debug!("Added package {} {} with id {}", package.name, package.version, package.id);

    Ok(Json(package))
}

pub async fn get_all_packages<T>(app_state: Data<AppState<T>>) -> Result<Json<Vec<Package>>, Error>
where
    T: Actor + Handler<GetPackages>,
    <T as Actor>::Context: ToEnvelope<T, GetPackages>,
{
    let packages = app_state
        .database_address
        .send(GetPackages)
        .await
        .map_err(|error| {
            error!("Failed to get all packages: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to get all packages: {error}");
            ServerResponseError(PackageServerError::DatabaseQueryFailed.into())
        })?;

    Ok(Json(packages))
}

pub async fn get_package<T>(
    path_variables: Path<i32>,
    app_state: Data<AppState<T>>,
) -> Result<Json<Option<Package>>, Error>
where
    T: Actor + Handler<GetPackage>,
    <T as Actor>::Context: ToEnvelope<T, GetPackage>,
{
    let id = path_variables.into_inner();
    let package = app_state
        .database_address
        .send(GetPackage(id))
        .await
        .map_err(|error| {
            error!("Failed to get package: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to get package: {error}");
            ServerResponseError(PackageServerError::DatabaseQueryFailed.into())
        })?;

    Ok(Json(package))
}

pub async fn update_package<T>(
    path_variables: Path<i32>,
    app_state: Data<AppState<T>>,
    package: Json<NewPackage>,
) -> Result<Json<Package>, Error>
where
    T: Actor + Handler<UpdatePackage>,
    <T as Actor>::Context: ToEnvelope<T, UpdatePackage>,
{
    let id = path_variables.into_inner();
    let package = app_state
        .database_address
        .send(UpdatePackage {
            id,
            package: package.into_inner(),
        })
        .await
        .map_err(|error| {
            error!("Failed to update package: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to update package {id}: {error}");
            ServerResponseError::or_else(error, PackageServerError::PackageUpdate)
        })?;
    debug!("Updated package with id {id}");

    Ok(Json(package))
}

pub async fn delete_package<T>(
    path_variables: Path<i32>,
    app_state: Data<AppState<T>>,
) -> Result<Json<Package>, Error>
where
    T: Actor + Handler<DeletePackage>,
    <T as Actor>::Context: ToEnvelope<T, DeletePackage>,
{
    let id = path_variables.into_inner();
    let package = app_state
        .database_address
        .send(DeletePackage(id))
        .await
        .map_err(|error| {
            error!("Failed to delete package: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to delete package {id}: {error}");
            ServerResponseError::or_else(error, PackageServerError::PackageDelete)
        })?;
    debug!("Deleted package {} {}", package.name, package.version);

    Ok(Json(package))
}

pub async fn search_packages<T>(
    query: Query<PackageSearchQuery>,
    app_state: Data<AppState<T>>,
) -> Result<Json<Vec<Package>>, Error>
where
    T: Actor + Handler<SearchPackages>,
    <T as Actor>::Context: ToEnvelope<T, SearchPackages>,
{
    let packages = app_state
        .database_address
        .send(SearchPackages(query.into_inner().name))
        .await
        .map_err(|error| {
            error!("Failed to search packages: {error}");
            ServerResponseError(PackageServerError::MailboxError.into())
        })?
        .map_err(|error| {
            error!("Failed to search packages: {error}");
            ServerResponseError(PackageServerError::DatabaseQueryFailed.into())
        })?;

    Ok(Json(packages))
}

pub async fn import_packages<T>(app_state: Data<AppState<T>>) -> Result<HttpResponse, Error>
where
    T: Actor + Handler<GetPackagesByNameAndVersion> + Handler<CreatePackage>,
    <T as Actor>::Context: ToEnvelope<T, GetPackagesByNameAndVersion>,
    <T as Actor>::Context: ToEnvelope<T, CreatePackage>,
{
    let configuration = &app_state.importer;
    let client = Client::try_new(
        &configuration.index_url,
        &configuration.archive_base_url,
        configuration.timeout,
    )
    .map_err(|error| {
        error!("Failed to create the import client: {error}");
        ServerResponseError(PackageServerError::ImportFailed.into())
    })?;

    let summary = importer::import_packages(&client, &app_state.database_address)
        .await
        .map_err(|error| {
            error!("Failed to import packages: {error:?}");
            ServerResponseError(PackageServerError::ImportFailed.into())
        })?;
    info!(
        "Import finished: {} processed, {} inserted, {} skipped",
        summary.processed, summary.inserted, summary.skipped
    );

    Ok(HttpResponse::Ok().body(IMPORT_SUCCESS_RESPONSE))
}
