//! Static SPDX license table.
//!
//! Archival metadata only accepts licenses from the SPDX list. The table
//! maps an SPDX details URL (as written into `codemeta.json`, e.g.
//! `https://spdx.org/licenses/MIT`) back to its identifier. The sentinel
//! `Custom` is a member of the table so stored custom licenses resolve and
//! can then be rejected explicitly by the synthesizer.

/// SPDX identifiers accepted for archival metadata, plus the `Custom` sentinel.
///
/// Subset of the SPDX license list covering the identifiers GitHub's
/// license detection emits; sorted for binary search.
pub const SPDX_LICENSE_IDS: &[&str] = &[
    "0BSD",
    "AFL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "Apache-1.1",
    "Apache-2.0",
    "Artistic-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-3-Clause-Clear",
    "BSD-4-Clause",
    "BSL-1.0",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "CDDL-1.0",
    "CECILL-2.1",
    "Custom",
    "ECL-2.0",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.1",
    "EUPL-1.2",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "LPPL-1.3c",
    "MIT",
    "MIT-0",
    "MPL-2.0",
    "MS-PL",
    "MS-RL",
    "MulanPSL-2.0",
    "NCSA",
    "ODbL-1.0",
    "OFL-1.1",
    "OSL-3.0",
    "PostgreSQL",
    "Python-2.0",
    "UPL-1.0",
    "Unlicense",
    "Vim",
    "WTFPL",
    "Zlib",
];

/// Resolve an SPDX details URL to its license identifier.
///
/// Accepts `https://spdx.org/licenses/<id>` with an optional `.json` or
/// `.html` suffix (the details URL the original license table carries ends
/// in `.json`). Returns `None` when the URL is not an SPDX details URL or
/// the identifier is not in the table.
#[must_use]
pub fn license_id_from_url(url: &str) -> Option<&'static str> {
    let rest = url
        .strip_prefix("https://spdx.org/licenses/")
        .or_else(|| url.strip_prefix("http://spdx.org/licenses/"))?;
    let id = rest
        .trim_end_matches(".json")
        .trim_end_matches(".html")
        .trim_matches('/');
    SPDX_LICENSE_IDS
        .binary_search(&id)
        .ok()
        .map(|idx| SPDX_LICENSE_IDS[idx])
}

/// Check whether `id` is a known SPDX identifier (or the `Custom` sentinel).
#[must_use]
pub fn is_known_license_id(id: &str) -> bool {
    SPDX_LICENSE_IDS.binary_search(&id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_is_sorted() {
        let mut sorted = SPDX_LICENSE_IDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SPDX_LICENSE_IDS);
    }

    #[test]
    fn resolves_plain_details_url() {
        assert_eq!(
            license_id_from_url("https://spdx.org/licenses/MIT"),
            Some("MIT")
        );
    }

    #[test]
    fn resolves_json_details_url() {
        assert_eq!(
            license_id_from_url("https://spdx.org/licenses/Apache-2.0.json"),
            Some("Apache-2.0")
        );
    }

    #[test]
    fn custom_sentinel_resolves() {
        assert_eq!(
            license_id_from_url("https://spdx.org/licenses/Custom"),
            Some("Custom")
        );
    }

    #[test]
    fn unknown_license_does_not_resolve() {
        assert_eq!(
            license_id_from_url("https://spdx.org/licenses/Not-A-License"),
            None
        );
        assert_eq!(license_id_from_url("https://example.com/MIT"), None);
    }
}
