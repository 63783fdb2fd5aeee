//! Link enrichment — derives YouTube search links from each day's search terms.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::schedule::models::{ResourceLink, Schedule};

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";
/// Appended to every term so results lean towards instructional videos.
const SEARCH_QUALIFIER: &str = "tutorial education";
/// Everything but unreserved characters and `/` is escaped; spaces become `%20`.
const QUERY_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Rebuilds `youtube_links` for every day from its `youtube_searches`.
///
/// Deterministic: the same terms always produce the same URLs. Existing links
/// are replaced, never appended to.
pub fn enrich(mut schedule: Schedule) -> Schedule {
    for day in schedule.weeks.iter_mut().flat_map(|w| w.days.iter_mut()) {
        day.youtube_links = day
            .youtube_searches
            .iter()
            .map(|term| ResourceLink {
                term: term.clone(),
                url: search_url(term),
            })
            .collect();
    }
    schedule
}

/// Percent-encoded search URL for `term` plus the qualifier.
pub fn search_url(term: &str) -> String {
    let query = format!("{term} {SEARCH_QUALIFIER}");
    format!(
        "{YOUTUBE_SEARCH_URL}?search_query={}",
        utf8_percent_encode(&query, QUERY_ESCAPES)
    )
}
