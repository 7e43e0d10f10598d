use chrono::NaiveDate;

pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RELEASE_DATE_FORMAT).ok()
}

/// Newest first by a `YYYY-MM-DD` string. Entries without a usable date go
/// last; ties keep their current order.
pub fn sort_newest_first<T>(items: &mut [T], release_date: impl Fn(&T) -> &str) {
    sort_by_date_desc(items, |item| parse_release_date(release_date(item)));
}

pub fn sort_by_date_desc<T>(items: &mut [T], date: impl Fn(&T) -> Option<NaiveDate>) {
    // None < Some, so reversing puts undated entries at the end.
    items.sort_by(|a, b| date(b).cmp(&date(a)));
}
