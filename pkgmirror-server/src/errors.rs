use actix_http::{body::BoxBody, StatusCode};
use actix_web::{error::ResponseError, HttpResponse};
use anyhow::Error;
use std::fmt::{Display, Formatter, Result};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum PackageServerError {
    #[error("Failed to save the package")]
    PackageSave,
    #[error("Failed to update the package")]
    PackageUpdate,
    #[error("Failed to delete the package")]
    PackageDelete,
    #[error("Package with the same name and version already exists")]
    PackageConflict,
    #[error("Failed to import packages")]
    ImportFailed,
    #[error("Actix mailbox full")]
    MailboxError,
    #[error("Not found")]
    DatabaseRecordNotFound,
    #[error("Database query failed")]
    DatabaseQueryFailed,
}

impl PackageServerError {
    pub fn is_conflict(error: &Error) -> bool {
        matches!(
            error.root_cause().downcast_ref::<PackageServerError>(),
            Some(PackageServerError::PackageConflict)
        )
    }
}

#[derive(Debug)]
pub struct ServerResponseError(pub(crate) Error);

impl ServerResponseError {
    /// Keeps errors that already carry a [`PackageServerError`] and replaces
    /// anything else with `fallback`.
    pub(crate) fn or_else(error: Error, fallback: PackageServerError) -> Self {
        if error.root_cause().is::<PackageServerError>() {
            return Self(error);
        }
        Self(fallback.into())
    }
}

impl Display for ServerResponseError {
    fn fmt(&self, formatter: &mut Formatter) -> Result {
        write!(formatter, "{:?}", self.0)
    }
}

impl ResponseError for ServerResponseError {
    fn status_code(&self) -> StatusCode {
        if let Some(package_server_error) = self.0.root_cause().downcast_ref::<PackageServerError>()
        {
            return match package_server_error {
                PackageServerError::PackageConflict => StatusCode::CONFLICT,
                PackageServerError::DatabaseRecordNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::with_body(self.status_code(), format!("{}", self.0)).map_into_boxed_body()
    }
}

impl From<Error> for ServerResponseError {
    fn from(error: Error) -> ServerResponseError {
        ServerResponseError(error)
    }
}
