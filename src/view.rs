/// Derived projections over the saved-tabs state

use std::collections::BTreeSet;

use crate::record::{OpenTab, TabRecord};
use crate::reducer::TabState;

/// Upper bound on the number of records the page shows
pub const SHOWN_LIMIT: usize = 40;

/// Records to display: not deleted, not archived, ordered by url, capped.
/// The sort is stable, so equal urls keep their id order from the
/// collection and the result is the same for any fixed state.
pub fn shown_tabs(state: &TabState) -> Vec<TabRecord> {
    let mut shown: Vec<TabRecord> = state
        .records
        .values()
        .filter(|record| !record.deleted && !record.archived)
        .cloned()
        .collect();

    shown.sort_by(|a, b| a.url.cmp(&b.url));
    shown.truncate(SHOWN_LIMIT);
    shown
}

/// Selection summary over the shown records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionFlags {
    pub has_any: bool,
    pub has_all: bool,
    pub has_some: bool,
}

pub fn selection_flags(shown: &[TabRecord], selected: &BTreeSet<String>) -> SelectionFlags {
    let has_any = !shown.is_empty();

    SelectionFlags {
        has_any,
        has_all: has_any && shown.iter().all(|record| selected.contains(&record.id)),
        has_some: has_any && shown.iter().any(|record| selected.contains(&record.id)),
    }
}

/// The shown records whose ids are currently selected
pub fn selected_records(shown: &[TabRecord], selected: &BTreeSet<String>) -> Vec<TabRecord> {
    shown
        .iter()
        .filter(|record| selected.contains(&record.id))
        .cloned()
        .collect()
}

/// Inner join on url between selected records and live tabs, in both
/// directions: record ids to archive, and host tab ids to close. Every
/// live tab sharing a url with a selected record is included, not just
/// the first match.
pub fn match_open_tabs(selected: &[TabRecord], open: &[OpenTab]) -> (Vec<String>, Vec<i32>) {
    let open_urls: BTreeSet<&str> = open.iter().map(|tab| tab.url.as_str()).collect();
    let selected_urls: BTreeSet<&str> = selected.iter().map(|record| record.url.as_str()).collect();

    let record_ids = selected
        .iter()
        .filter(|record| open_urls.contains(record.url.as_str()))
        .map(|record| record.id.clone())
        .collect();
    let tab_ids = open
        .iter()
        .filter(|tab| selected_urls.contains(tab.url.as_str()))
        .map(|tab| tab.id)
        .collect();

    (record_ids, tab_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::TabEvent;

    fn record(id: &str, url: &str) -> TabRecord {
        TabRecord::new(id.to_string(), url.to_string(), format!("title {}", id))
    }

    fn flagged(id: &str, url: &str, archived: bool, deleted: bool) -> TabRecord {
        TabRecord {
            archived,
            deleted,
            ..record(id, url)
        }
    }

    fn state_of(records: Vec<TabRecord>) -> TabState {
        TabState::default().apply(TabEvent::Load(records))
    }

    fn open_tab(id: i32, url: &str) -> OpenTab {
        OpenTab {
            id,
            url: url.to_string(),
            index: id,
            window_id: 1,
        }
    }

    fn select(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_shown_tabs_sorts_ascending_by_url() {
        let state = state_of(vec![
            record("a", "https://c.com"),
            record("b", "https://a.com"),
            record("c", "https://b.com"),
        ]);

        let shown = shown_tabs(&state);
        let urls: Vec<&str> = shown.iter().map(|r| r.url.as_str()).collect();

        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_shown_tabs_sort_is_case_sensitive() {
        let state = state_of(vec![
            record("a", "https://b.com"),
            record("b", "https://A.com"),
            record("c", "https://a.com"),
        ]);

        let shown = shown_tabs(&state);
        let urls: Vec<&str> = shown.iter().map(|r| r.url.as_str()).collect();

        assert_eq!(urls, vec!["https://A.com", "https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_shown_tabs_duplicate_urls_keep_collection_order() {
        let state = state_of(vec![
            record("c", "https://same.com"),
            record("a", "https://same.com"),
            record("b", "https://same.com"),
        ]);

        let shown = shown_tabs(&state);
        let ids: Vec<&str> = shown.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shown_tabs_caps_at_limit() {
        let records = (0..SHOWN_LIMIT + 5)
            .map(|n| record(&format!("id{:03}", n), &format!("https://{:03}.com", n)))
            .collect();

        let shown = shown_tabs(&state_of(records));

        assert_eq!(shown.len(), SHOWN_LIMIT);
        assert_eq!(shown[0].url, "https://000.com");
    }

    #[test]
    fn test_shown_tabs_excludes_archived_and_deleted() {
        let state = state_of(vec![
            flagged("a", "https://a.com", false, false),
            flagged("b", "https://b.com", true, false),
            flagged("c", "https://c.com", false, true),
            flagged("d", "https://d.com", true, true),
        ]);

        let shown = shown_tabs(&state);
        let ids: Vec<&str> = shown.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_shown_tabs_archived_record_hidden_even_when_url_sorts_first() {
        let state = state_of(vec![
            flagged("a", "https://b.com", false, false),
            flagged("b", "https://a.com", true, false),
        ]);

        let shown = shown_tabs(&state);
        let ids: Vec<&str> = shown.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_selection_flags_empty_view() {
        let flags = selection_flags(&[], &select(&["a"]));

        assert!(!flags.has_any);
        assert!(!flags.has_all);
        assert!(!flags.has_some);
    }

    #[test]
    fn test_selection_flags_partial_selection() {
        let shown = vec![record("a", "https://a.com"), record("b", "https://b.com")];

        let flags = selection_flags(&shown, &select(&["a"]));

        assert!(flags.has_any);
        assert!(!flags.has_all);
        assert!(flags.has_some);
    }

    #[test]
    fn test_selection_flags_full_selection_sets_both() {
        let shown = vec![record("a", "https://a.com"), record("b", "https://b.com")];

        let flags = selection_flags(&shown, &select(&["a", "b"]));

        assert!(flags.has_all);
        assert!(flags.has_some);
    }

    #[test]
    fn test_selection_flags_ignore_ids_outside_view() {
        let shown = vec![record("a", "https://a.com")];

        let flags = selection_flags(&shown, &select(&["z"]));

        assert!(flags.has_any);
        assert!(!flags.has_all);
        assert!(!flags.has_some);
    }

    #[test]
    fn test_selected_records_skips_inert_ids() {
        let shown = vec![record("a", "https://a.com"), record("b", "https://b.com")];

        let picked = selected_records(&shown, &select(&["b", "ghost"]));

        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "b");
    }

    #[test]
    fn test_match_open_tabs_joins_on_url_both_directions() {
        let selected = vec![
            record("a", "https://a.com"),
            record("b", "https://b.com"),
            record("c", "https://c.com"),
        ];
        let open = vec![
            open_tab(1, "https://a.com"),
            open_tab(2, "https://b.com"),
            open_tab(3, "https://x.com"),
        ];

        let (record_ids, tab_ids) = match_open_tabs(&selected, &open);

        assert_eq!(record_ids, vec!["a", "b"]);
        assert_eq!(tab_ids, vec![1, 2]);
    }

    #[test]
    fn test_match_open_tabs_includes_every_duplicate_url() {
        let selected = vec![record("a", "https://a.com")];
        let open = vec![
            open_tab(1, "https://a.com"),
            open_tab(2, "https://a.com"),
            open_tab(3, "https://b.com"),
        ];

        let (record_ids, tab_ids) = match_open_tabs(&selected, &open);

        assert_eq!(record_ids, vec!["a"]);
        assert_eq!(tab_ids, vec![1, 2]);
    }

    #[test]
    fn test_match_open_tabs_empty_when_nothing_overlaps() {
        let selected = vec![record("a", "https://a.com")];
        let open = vec![open_tab(1, "https://b.com")];

        let (record_ids, tab_ids) = match_open_tabs(&selected, &open);

        assert!(record_ids.is_empty());
        assert!(tab_ids.is_empty());
    }
}
