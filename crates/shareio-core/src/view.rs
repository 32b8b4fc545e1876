//! Dashboard list view: search, type filter, sort and pagination.
//!
//! [`filter_and_sort`] is a pure function of its inputs. [`ListView`] holds
//! the user's inputs plus the current page and resets to page 1 whenever an
//! input changes.

use std::fmt;
use std::str::FromStr;

use crate::model::FileRecord;

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// MIME filter choices offered in the toolbar: `(value, label)`.
pub const TYPE_FILTER_OPTIONS: &[(&str, &str)] = &[
    ("all", "All Types"),
    ("application/pdf", "PDF"),
    ("image/png", "PNG"),
    ("image/jpeg", "JPEG"),
    ("text/plain", "TXT"),
];

// =============================================================================
// Inputs
// =============================================================================

/// Exact MIME-type filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Mime(String),
}

impl TypeFilter {
    /// Parse a toolbar value; `"all"` is the sentinel.
    pub fn from_value(value: &str) -> Self {
        match value {
            "all" | "" => Self::All,
            mime => Self::Mime(mime.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Mime(mime) => mime,
        }
    }

    fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Self::All => true,
            Self::Mime(mime) => record.mime_type == *mime,
        }
    }
}

/// Sort order for the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Creation time, newest first.
    #[default]
    Newest,
    Oldest,
    SizeAsc,
    SizeDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Newest, Self::Oldest, Self::SizeAsc, Self::SizeDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::SizeAsc => "sizeAsc",
            Self::SizeDesc => "sizeDesc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::SizeAsc => "Size: Small → Large",
            Self::SizeDesc => "Size: Large → Small",
        }
    }

    fn sort(&self, records: &mut [FileRecord]) {
        // `sort_by` is stable: ties keep snapshot order.
        match self {
            Self::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::Oldest => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            Self::SizeAsc => records.sort_by(|a, b| a.size.cmp(&b.size)),
            Self::SizeDesc => records.sort_by(|a, b| b.size.cmp(&a.size)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Search, type and sort inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub type_filter: TypeFilter,
    pub sort: SortKey,
}

impl ListQuery {
    fn matches(&self, term: &str, record: &FileRecord) -> bool {
        let hit = term.is_empty()
            || record.name.to_lowercase().contains(term)
            || record.share_id.to_lowercase().contains(term);
        hit && self.type_filter.matches(record)
    }
}

/// Filter then sort a snapshot.
///
/// Search is a case-insensitive substring match on the file name or the
/// share id.
pub fn filter_and_sort(records: &[FileRecord], query: &ListQuery) -> Vec<FileRecord> {
    let term = query.search.to_lowercase();
    let mut result: Vec<FileRecord> = records
        .iter()
        .filter(|record| query.matches(&term, record))
        .cloned()
        .collect();
    query.sort.sort(&mut result);
    result
}

// =============================================================================
// Pagination
// =============================================================================

/// One rendered page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub items: Vec<FileRecord>,
    /// 1-based, clamped to `total_pages` (1 for an empty list).
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages.
    pub total: usize,
}

impl PageView {
    /// Pagination controls only make sense with more than one page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The record with `id` on this page.
    pub fn find(&self, id: &str) -> Option<&FileRecord> {
        self.items.iter().find(|r| r.id == id)
    }
}

/// `ceil(total / page_size)`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// List view controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    query: ListQuery,
    page: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ListQuery::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.page = 1;
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.query.type_filter = filter;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Compute the visible page for a snapshot.
    pub fn view(&self, records: &[FileRecord]) -> PageView {
        let matched = filter_and_sort(records, &self.query);
        let total = matched.len();
        let total_pages = total_pages(total, self.page_size);
        let page = self.page.min(total_pages).max(1);

        let items = matched
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        PageView {
            items,
            page,
            total_pages,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(share_id: &str, index: usize, name: &str, size: u64, created_at: i64) -> FileRecord {
        FileRecord {
            id: FileRecord::record_id(share_id, index),
            share_id: share_id.to_string(),
            file_index: index,
            created_at,
            expires_at: None,
            name: name.to_string(),
            size,
            mime_type: if name.ends_with(".pdf") {
                "application/pdf".to_string()
            } else {
                "image/png".to_string()
            },
            url: String::new(),
        }
    }

    fn sample() -> Vec<FileRecord> {
        vec![
            record("1700000001", 0, "Report.pdf", 300, 10),
            record("1700000001", 1, "photo.png", 100, 10),
            record("1700000002", 0, "notes.pdf", 200, 20),
            record("abc", 0, "logo.png", 100, 5),
        ]
    }

    fn ids(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_recomputed_page_carries_changed_fields() {
        let mut records = sample();
        let view = ListView::default();
        let before = view.view(&records);
        assert_eq!(before.find("abc-0").map(|r| r.expires_at), Some(None));

        records[3].expires_at = Some(99);
        records[3].size = 2048;
        let after = view.view(&records);
        let changed = after.find("abc-0").unwrap();
        assert_eq!(changed.expires_at, Some(99));
        assert_eq!(changed.size, 2048);
        assert_eq!(changed.name, "logo.png");
        assert!(after.find("missing-0").is_none());
    }

    #[test]
    fn test_search_matches_name_or_share_id() {
        let records = sample();
        let query = ListQuery {
            search: "REPORT".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &query)), ["1700000001-0"]);

        let query = ListQuery {
            search: "00002".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &query)), ["1700000002-0"]);

        let query = ListQuery {
            search: "ABC".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &query)), ["abc-0"]);
    }

    #[test]
    fn test_search_is_exactly_the_substring_set() {
        let records = sample();
        for term in ["", "o", "PDF", "17", "x", ".png"] {
            let query = ListQuery {
                search: term.to_string(),
                sort: SortKey::Oldest,
                ..Default::default()
            };
            let result = filter_and_sort(&records, &query);
            let lower = term.to_lowercase();
            let expected = records
                .iter()
                .filter(|r| {
                    r.name.to_lowercase().contains(&lower) || r.share_id.to_lowercase().contains(&lower)
                })
                .count();
            assert_eq!(result.len(), expected, "term {:?}", term);
        }
    }

    #[test]
    fn test_type_filter() {
        let records = sample();
        let query = ListQuery {
            type_filter: TypeFilter::from_value("application/pdf"),
            ..Default::default()
        };
        let result = filter_and_sort(&records, &query);
        assert!(result.iter().all(|r| r.mime_type == "application/pdf"));
        assert_eq!(result.len(), 2);

        assert_eq!(TypeFilter::from_value("all"), TypeFilter::All);
        assert_eq!(TypeFilter::from_value("image/png").value(), "image/png");
    }

    #[test]
    fn test_sort_orders() {
        let records = sample();
        let sorted = |sort| {
            filter_and_sort(
                &records,
                &ListQuery {
                    sort,
                    ..Default::default()
                },
            )
        };

        let newest = sorted(SortKey::Newest);
        assert!(newest.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        let oldest = sorted(SortKey::Oldest);
        assert!(oldest.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        let asc = sorted(SortKey::SizeAsc);
        assert!(asc.windows(2).all(|w| w[0].size <= w[1].size));
        let desc = sorted(SortKey::SizeDesc);
        assert!(desc.windows(2).all(|w| w[0].size >= w[1].size));
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let records = sample();
        // photo.png and logo.png both have size 100; Report.pdf and photo.png share a timestamp.
        let asc = filter_and_sort(
            &records,
            &ListQuery {
                sort: SortKey::SizeAsc,
                ..Default::default()
            },
        );
        assert_eq!(ids(&asc)[..2], ["1700000001-1", "abc-0"]);

        let newest = filter_and_sort(&records, &ListQuery::default());
        assert_eq!(ids(&newest), ["1700000002-0", "1700000001-0", "1700000001-1", "abc-0"]);
    }

    #[test]
    fn test_sort_key_strings() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("largest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::Newest);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 8), 0);
        assert_eq!(total_pages(1, 8), 1);
        assert_eq!(total_pages(8, 8), 1);
        assert_eq!(total_pages(9, 8), 2);
        assert_eq!(total_pages(17, 8), 3);
    }

    #[test]
    fn test_pagination_slices_pages() {
        let records: Vec<FileRecord> = (0..19)
            .map(|i| record("s", i, &format!("f{}.pdf", i), i as u64, 0))
            .collect();
        let mut view = ListView::new(8);
        view.set_sort(SortKey::SizeAsc);

        let first = view.view(&records);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 8);
        assert!(first.shows_controls());
        assert!(!first.has_prev());

        view.set_page(3);
        let last = view.view(&records);
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[0].file_index, 16);
        assert!(!last.has_next());
    }

    #[test]
    fn test_input_changes_reset_page() {
        let mut view = ListView::new(8);
        view.set_page(3);
        view.set_search("x");
        assert_eq!(view.page(), 1);

        view.set_page(2);
        view.set_type_filter(TypeFilter::All);
        assert_eq!(view.page(), 1);

        view.set_page(2);
        view.set_sort(SortKey::Oldest);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_page_clamps_when_list_shrinks() {
        let records: Vec<FileRecord> = (0..10).map(|i| record("s", i, "f.pdf", 1, 0)).collect();
        let mut view = ListView::new(8);
        view.set_page(2);
        assert_eq!(view.view(&records).page, 2);
        assert_eq!(view.view(&records[..3]).page, 1);
    }

    #[test]
    fn test_empty_view_has_no_controls() {
        let page = ListView::default().view(&[]);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(!page.shows_controls());
    }
}
