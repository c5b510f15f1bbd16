//! Field validation following the SPDX 2.2 grammar.

use regex::Regex;
use std::sync::LazyLock;

static DOWNLOAD_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    let url = concat!(
        r"(http://www\.|https://www\.|http://|https://|ssh://|git://|svn://|sftp://|ftp://)?",
        r"([\w\-.!~*'()%;:&=+$,]+@)?",
        r"[a-z0-9]+([\-.][a-z0-9]+){0,100}\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?",
    );
    let git = r"git\+git@[a-zA-Z0-9.\-]+:[a-zA-Z0-9/\\.@\-]+";
    let bazaar = r"bzr\+lp:[a-zA-Z0-9.\-]+";
    Regex::new(&format!(r"^(((git|hg|svn|bzr)\+)?{url}|{git}|{bazaar})$"))
        .expect("static regex")
});

/// Check a package download location (excluding the NOASSERTION/NONE sentinels).
#[must_use]
pub fn is_valid_download_location(location: &str) -> bool {
    DOWNLOAD_LOCATION.is_match(location)
}
