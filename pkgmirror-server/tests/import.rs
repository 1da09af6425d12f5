mod common;

#[cfg(test)]
mod tests {
    use crate::common::{names_of, start_test_registry, BodyTest};
    use actix_web::{
        http::StatusCode,
        test,
        web::{get, scope},
        App,
    };
    use anyhow::Result;
    use pkgmirror_library::test::{create_test_archive, MockPackageSource};
    use pkgmirror_server::{
        configuration::ImporterConfiguration,
        routes::package::{get_all_packages, import_packages},
        services::{
            database::package::{CreatePackage, GetPackages},
            importer::{self, ImportSummary},
        },
        test::{create_test_app_state, create_test_database, create_test_new_package},
        Database,
    };
    use serde_json::Value;

    const TWO_PACKAGE_INDEX: &str = "Package: foo\nVersion: 1.0\nPackage: bar\nVersion: 2.0\n";

    #[actix_web::test]
    async fn fetches_an_archive_for_every_new_package() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        let source = MockPackageSource::new(TWO_PACKAGE_INDEX).with_generated_archives()?;

        let summary = importer::import_packages(&source, &database_address).await?;
        let packages = database_address.send(GetPackages).await??;

        database_folder.close()?;
        assert_eq!(source.requested_archives(), vec!["foo_1.0", "bar_2.0"]);
        assert_eq!(
            summary,
            ImportSummary {
                processed: 2,
                inserted: 2,
                skipped: 0,
            }
        );
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "foo");
        assert_eq!(packages[0].title, "Title of foo");
        assert_eq!(packages[1].version, "2.0");
        assert_eq!(packages[1].published_date, "2023-01-03 12:30:05 UTC");
        Ok(())
    }

    #[actix_web::test]
    async fn second_import_inserts_nothing() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        let source = MockPackageSource::new(TWO_PACKAGE_INDEX).with_generated_archives()?;

        importer::import_packages(&source, &database_address).await?;
        let summary = importer::import_packages(&source, &database_address).await?;
        let packages = database_address.send(GetPackages).await??;

        database_folder.close()?;
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(source.requested_archives().len(), 2);
        assert_eq!(packages.len(), 2);
        Ok(())
    }

    #[actix_web::test]
    async fn skips_packages_already_stored() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        database_address
            .send(CreatePackage(create_test_new_package("foo", "1.0")))
            .await??;
        let source = MockPackageSource::new(TWO_PACKAGE_INDEX).with_generated_archives()?;

        let summary = importer::import_packages(&source, &database_address).await?;

        database_folder.close()?;
        assert_eq!(source.requested_archives(), vec!["bar_2.0"]);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 1);
        Ok(())
    }

    #[actix_web::test]
    async fn other_versions_of_a_package_are_imported() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        database_address
            .send(CreatePackage(create_test_new_package("foo", "0.9")))
            .await??;
        let source = MockPackageSource::new("Package: foo\nVersion: 1.0\n")
            .with_generated_archives()?;

        let summary = importer::import_packages(&source, &database_address).await?;
        let packages = database_address.send(GetPackages).await??;

        database_folder.close()?;
        assert_eq!(summary.inserted, 1);
        assert_eq!(packages.len(), 2);
        Ok(())
    }

    #[actix_web::test]
    async fn description_mismatch_is_not_duplicated() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        database_address
            .send(CreatePackage(create_test_new_package("foo", "1.0")))
            .await??;
        let stale_archive = create_test_archive(&[("foo/DESCRIPTION", "Package: foo\nVersion: 1.0\n")])?;
        let source = MockPackageSource::new("Package: foo\nVersion: 1.0-1\n")
            .with_archive("foo_1.0-1", stale_archive);

        let summary = importer::import_packages(&source, &database_address).await?;
        let packages = database_address.send(GetPackages).await??;

        database_folder.close()?;
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(packages.len(), 1);
        Ok(())
    }

    #[actix_web::test]
    async fn failing_package_aborts_the_import() -> Result<()> {
        let (database_folder, database_address) = create_test_database()?;
        let foo_archive = pkgmirror_library::test::create_test_package_archive("foo", "1.0")?;
        let broken_archive = create_test_archive(&[("bar/NAMESPACE", "export()\n")])?;
        let source = MockPackageSource::new(
            "Package: foo\nVersion: 1.0\nPackage: bar\nVersion: 2.0\nPackage: baz\nVersion: 3.0\n",
        )
        .with_archive("foo_1.0", foo_archive)
        .with_archive("bar_2.0", broken_archive);

        let result = importer::import_packages(&source, &database_address).await;
        let packages = database_address.send(GetPackages).await??;

        database_folder.close()?;
        assert!(result.is_err());
        assert_eq!(source.requested_archives(), vec!["foo_1.0", "bar_2.0"]);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "foo");
        Ok(())
    }

    #[actix_web::test]
    async fn import_endpoint_mirrors_the_registry() -> Result<()> {
        let (_registry, importer_configuration) =
            start_test_registry(TWO_PACKAGE_INDEX, &[("foo", "1.0"), ("bar", "2.0")])?;
        let (database_folder, app_state) = create_test_app_state(importer_configuration)?;
        let app = test::init_service(
            App::new().app_data(app_state).service(
                scope("/package")
                    .route("/import", get().to(import_packages::<Database>))
                    .route("", get().to(get_all_packages::<Database>)),
            ),
        )
        .await;

        let request = test::TestRequest::get().uri("/package/import").to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = test::read_body(response).await;
        assert_eq!(body.as_str(), "success");

        let request = test::TestRequest::get().uri("/package").to_request();
        let packages: Value = test::call_and_read_body_json(&app, request).await;

        database_folder.close()?;
        assert_eq!(names_of(&packages), vec!["foo", "bar"]);
        Ok(())
    }

    #[actix_web::test]
    async fn import_endpoint_reports_unreachable_registry() -> Result<()> {
        let (_registry, mut importer_configuration) =
            start_test_registry(TWO_PACKAGE_INDEX, &[("foo", "1.0")])?;
        importer_configuration.index_url = importer_configuration.index_url.replace("PACKAGES", "MISSING");
        let (database_folder, app_state) = create_test_app_state(importer_configuration)?;
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .route("/package/import", get().to(import_packages::<Database>)),
        )
        .await;

        let request = test::TestRequest::get().uri("/package/import").to_request();
        let response = test::call_service(&app, request).await;

        database_folder.close()?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[actix_web::test]
    async fn import_endpoint_rejects_invalid_configuration() -> Result<()> {
        let (database_folder, app_state) = create_test_app_state(ImporterConfiguration {
            index_url: "not a url".to_string(),
            ..Default::default()
        })?;
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .route("/package/import", get().to(import_packages::<Database>)),
        )
        .await;

        let request = test::TestRequest::get().uri("/package/import").to_request();
        let response = test::call_service(&app, request).await;

        database_folder.close()?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }
}
