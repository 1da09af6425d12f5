use crate::{
    schema::packages,
    services::database::{All, Create},
};
use diesel::{
    define_sql_function,
    helper_types::FindBy,
    insert_into,
    prelude::*,
};
use pkgmirror_library::{description::PackageDescription, index::IndexEntry};
use serde::{Deserialize, Serialize};

define_sql_function! {
    /// 1-based position of `needle` in `haystack`, 0 when absent. Case-sensitive.
    fn instr(
        haystack: diesel::sql_types::Text,
        needle: diesel::sql_types::Text,
    ) -> diesel::sql_types::Integer;
}

#[derive(
    Queryable, Selectable, Identifiable, Clone, Debug, Eq, PartialEq, Deserialize, Serialize,
)]
#[diesel(table_name = packages)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub published_date: String,
    pub title: String,
    pub description: String,
    pub authors: String,
    pub maintainers: String,
}

type ByName<Source> = FindBy<Source, packages::name, String>;
type ByNameAndVersion<Source> = FindBy<ByName<Source>, packages::version, String>;

impl Package {
    pub fn all() -> All<packages::table, Self> {
        packages::table.select(Self::as_select())
    }

    pub fn by_id(id: i32) -> FindBy<All<packages::table, Self>, packages::id, i32> {
        Self::all().filter(packages::id.eq(id))
    }

    pub fn by_name_and_version(
        name: String,
        version: String,
    ) -> ByNameAndVersion<All<packages::table, Self>> {
        Self::all()
            .filter(packages::name.eq(name))
            .filter(packages::version.eq(version))
    }

    pub fn search_by_name(
        name: String,
        connection: &mut SqliteConnection,
    ) -> QueryResult<Vec<Self>> {
        Self::all()
            .filter(instr(packages::name, name).gt(0))
            .order(packages::id)
            .load(connection)
    }
}

#[derive(Insertable, AsChangeset, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[diesel(table_name = packages)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub name: String,
    pub version: String,
    pub published_date: String,
    pub title: String,
    pub description: String,
    pub authors: String,
    pub maintainers: String,
}

impl NewPackage {
    pub fn create_insert(&self) -> Create<&Self, packages::table> {
        insert_into(packages::table).values(self)
    }

    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry::new(&self.name, &self.version)
    }
}

impl From<PackageDescription> for NewPackage {
    fn from(description: PackageDescription) -> Self {
        Self {
            name: description.name,
            version: description.version,
            published_date: description.published_date,
            title: description.title,
            description: description.description,
            authors: description.authors,
            maintainers: description.maintainers,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct PackageSearchQuery {
    pub name: String,
}
