use super::{map_write_error, Database};
use crate::{
    errors::PackageServerError,
    models::{NewPackage, Package},
    schema::packages,
};
use actix::{Handler, Message, ResponseActFuture, WrapFuture};
use actix_web::web::block;
use anyhow::{Ok, Result};
use diesel::{delete, update, OptionalExtension, QueryDsl, RunQueryDsl};

#[derive(Message)]
#[rtype(result = "Result<Package>")]
pub struct CreatePackage(pub NewPackage);

impl Handler<CreatePackage> for Database {
    type Result = ResponseActFuture<Self, Result<Package>>;

    fn handle(&mut self, msg: CreatePackage, _ctx: &mut Self::Context) -> Self::Result {
        let new_package = msg.0;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let package = block(move || {
                    new_package
                        .create_insert()
                        .execute(&mut connection)
                        .map_err(map_write_error)?;
                    let package: Package =
                        Package::by_name_and_version(new_package.name, new_package.version)
                            .first(&mut connection)?;
                    Ok(package)
                })
                .await??;
                Ok(package)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Vec<Package>>")]
pub struct GetPackages;

impl Handler<GetPackages> for Database {
    type Result = ResponseActFuture<Self, Result<Vec<Package>>>;

    fn handle(&mut self, _: GetPackages, _ctx: &mut Self::Context) -> Self::Result {
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let packages = block(move || {
                    let packages: Vec<Package> = Package::all()
                        .order(packages::id)
                        .load(&mut connection)?;
                    Ok(packages)
                })
                .await??;
                Ok(packages)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Option<Package>>")]
pub struct GetPackage(pub i32);

impl Handler<GetPackage> for Database {
    type Result = ResponseActFuture<Self, Result<Option<Package>>>;

    fn handle(&mut self, msg: GetPackage, _ctx: &mut Self::Context) -> Self::Result {
        let GetPackage(id) = msg;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let package = block(move || {
                    let package: Option<Package> =
                        Package::by_id(id).first(&mut connection).optional()?;
                    Ok(package)
                })
                .await??;
                Ok(package)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Vec<Package>>")]
pub struct GetPackagesByNameAndVersion {
    pub name: String,
    pub version: String,
}

impl Handler<GetPackagesByNameAndVersion> for Database {
    type Result = ResponseActFuture<Self, Result<Vec<Package>>>;

    fn handle(
        &mut self,
        msg: GetPackagesByNameAndVersion,
        _ctx: &mut Self::Context,
    ) -> Self::Result {
        let GetPackagesByNameAndVersion { name, version } = msg;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let packages = block(move || {
                    let packages: Vec<Package> =
                        Package::by_name_and_version(name, version).load(&mut connection)?;
                    Ok(packages)
                })
                .await??;
                Ok(packages)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Vec<Package>>")]
pub struct SearchPackages(pub String);

impl Handler<SearchPackages> for Database {
    type Result = ResponseActFuture<Self, Result<Vec<Package>>>;

    fn handle(&mut self, msg: SearchPackages, _ctx: &mut Self::Context) -> Self::Result {
        let SearchPackages(name) = msg;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let packages = block(move || {
                    let packages = Package::search_by_name(name, &mut connection)?;
                    Ok(packages)
                })
                .await??;
                Ok(packages)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Package>")]
pub struct UpdatePackage {
    pub id: i32,
    pub package: NewPackage,
}

impl Handler<UpdatePackage> for Database {
    type Result = ResponseActFuture<Self, Result<Package>>;

    fn handle(&mut self, msg: UpdatePackage, _ctx: &mut Self::Context) -> Self::Result {
        let UpdatePackage { id, package } = msg;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let package = block(move || {
                    let updated_rows = update(packages::table.find(id))
                        .set(&package)
                        .execute(&mut connection)
                        .map_err(map_write_error)?;
                    if updated_rows == 0 {
                        return Err(PackageServerError::DatabaseRecordNotFound.into());
                    }
                    let package: Package = Package::by_id(id).first(&mut connection)?;
                    Ok(package)
                })
                .await??;
                Ok(package)
            }
            .into_actor(self),
        )
    }
}

#[derive(Message)]
#[rtype(result = "Result<Package>")]
pub struct DeletePackage(pub i32);

impl Handler<DeletePackage> for Database {
    type Result = ResponseActFuture<Self, Result<Package>>;

    fn handle(&mut self, msg: DeletePackage, _ctx: &mut Self::Context) -> Self::Result {
        let DeletePackage(id) = msg;
        let connection_result = self.get_connection();

        Box::pin(
            async move {
                let mut connection = connection_result?;
                let package = block(move || {
                    let package: Package = Package::by_id(id)
                        .first(&mut connection)
                        .optional()?
                        .ok_or(PackageServerError::DatabaseRecordNotFound)?;
                    delete(packages::table.find(id)).execute(&mut connection)?;
                    Ok(package)
                })
                .await??;
                Ok(package)
            }
            .into_actor(self),
        )
    }
}
