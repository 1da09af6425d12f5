pub const DESCRIPTION_FILE: &str = "DESCRIPTION";
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

pub const DEFAULT_INDEX_URL: &str = "https://cran.r-project.org/src/contrib/PACKAGES";
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://cran.r-project.org/src/contrib/";
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 300;

pub mod fields {
    pub const PACKAGE: &str = "Package: ";
    pub const VERSION: &str = "Version: ";
    pub const TITLE: &str = "Title: ";
    pub const DESCRIPTION: &str = "Description: ";
    pub const PUBLICATION_DATE: &str = "Date/Publication: ";
    pub const AUTHOR: &str = "Author: ";
    pub const MAINTAINER: &str = "Maintainer: ";
}
