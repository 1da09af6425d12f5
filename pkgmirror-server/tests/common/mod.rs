#![allow(dead_code)]

use actix_web::web::Bytes;
use anyhow::Result;
use pkgmirror_library::test::create_test_package_archive;
use pkgmirror_server::configuration::ImporterConfiguration;
use serde_json::Value;

pub trait BodyTest {
    fn as_str(&self) -> &str;
}

impl BodyTest for Bytes {
    fn as_str(&self) -> &str {
        std::str::from_utf8(self).unwrap()
    }
}

pub fn package_json(name: &str, version: &str) -> Value {
    serde_json::json!({
        "name": name,
        "version": version,
        "publishedDate": "2023-01-03 12:30:05 UTC",
        "title": format!("Title of {name}"),
        "description": format!("Description of {name}"),
        "authors": format!("Author of {name}"),
        "maintainers": format!("Maintainer of {name}"),
    })
}

pub fn names_of(packages: &Value) -> Vec<String> {
    packages
        .as_array()
        .unwrap()
        .iter()
        .map(|package| package["name"].as_str().unwrap().to_string())
        .collect()
}

/// Serves `/PACKAGES` with `index` and an archive for every `(name, version)`.
pub fn start_test_registry(
    index: &'static str,
    packages: &'static [(&'static str, &'static str)],
) -> Result<(actix_test::TestServer, ImporterConfiguration)> {
    use actix_web::{web, App, HttpResponse};

    let mut archives = Vec::new();
    for (name, version) in packages {
        archives.push((
            format!("/contrib/{name}_{version}.tar.gz"),
            create_test_package_archive(name, version)?,
        ));
    }

    let server = actix_test::start(move || {
        let mut app = App::new().route(
            "/PACKAGES",
            web::get().to(move || async move { HttpResponse::Ok().body(index) }),
        );
        for (path, archive) in archives.clone() {
            app = app.route(
                &path,
                web::get().to(move || {
                    let archive = archive.clone();
                    async move { HttpResponse::Ok().body(archive) }
                }),
            );
        }
        app
    });

    let configuration = ImporterConfiguration {
        index_url: server.url("/PACKAGES"),
        archive_base_url: server.url("/contrib/"),
        timeout: 10,
    };
    Ok((server, configuration))
}
