//! Active-entry matching.
//!
//! An href matches a location when they are equal or when the location is a
//! child path of the href (`href + "/"` prefix). Substring matches such as
//! `/admin` against `/administrators` never count.

use serde::{Deserialize, Serialize};

use crate::routes::RouteItem;

/// How to pick one entry when several hrefs match the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Longest matching href wins.
    #[default]
    MostSpecific,
    /// First matching entry in table order wins.
    FirstMatch,
}

/// Whether `href` matches `location` exactly or as a parent path segment.
pub fn is_active(href: &str, location: &str) -> bool {
    if location == href {
        return true;
    }
    location
        .strip_prefix(href)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Index of the single active entry in `routes`, if any.
pub fn active_index(
    routes: &[RouteItem],
    location: &str,
    strategy: MatchStrategy,
) -> Option<usize> {
    let mut matches = routes
        .iter()
        .enumerate()
        .filter(|(_, item)| is_active(&item.href, location));

    match strategy {
        MatchStrategy::FirstMatch => matches.next().map(|(i, _)| i),
        // Matching hrefs are prefixes of one location, so lengths are distinct.
        MatchStrategy::MostSpecific => matches
            .max_by_key(|(_, item)| item.href.len())
            .map(|(i, _)| i),
    }
}
