use actix::Actor;
use actix_web::{
    middleware::Logger,
    web::{delete, get, post, put, scope, Data},
    App, HttpServer,
};
use anyhow::Result;
use env_logger::Env;
use log::info;
use pkgmirror_server::{
    configuration::read_configuration,
    routes::{
        basic::{status, version},
        package::{
            add_package, delete_package, get_all_packages, get_package, import_packages,
            search_packages, update_package,
        },
    },
    AppState, Database,
};
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let configuration = read_configuration(env::args().collect())?;

    let database = Database::try_new(&configuration.database_url)?;
    database.run_migrations()?;
    let app_state = AppState {
        database_address: database.start(),
        importer: configuration.importer.clone(),
    };

    info!(
        "Starting package mirror server on {}:{}",
        configuration.host, configuration.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(app_state.clone()))
            .wrap(Logger::default())
            .service(status)
            .service(version)
            .service(
                scope("/package")
                    .route("/search", get().to(search_packages::<Database>))
                    .route("/import", get().to(import_packages::<Database>))
                    .route("/{id}", get().to(get_package::<Database>))
                    .route("/{id}", put().to(update_package::<Database>))
                    .route("/{id}", delete().to(delete_package::<Database>))
                    .route("", get().to(get_all_packages::<Database>))
                    .route("", post().to(add_package::<Database>)),
            )
    })
    .bind((configuration.host, configuration.port))?
    .run()
    .await?;

    Ok(())
}
