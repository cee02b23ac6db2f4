//! Pure derived views over the visitor collection.
//!
//! These functions never touch the network or the store lock; callers pass a
//! snapshot. Collections are small-to-moderate (one gym's prospect list), so
//! linear scans are the right tool and nothing is paginated.

use gymflow_gateway::{Visitor, VisitorStatus};

use crate::types::{
    DateCount, GroupCount, StatusTotals, UNKNOWN_DATE_BUCKET, VisitorFilter, VisitorStats,
    palette_color,
};

/// Applies the list filter, preserving input order.
#[must_use]
pub fn filter_visitors(visitors: &[Visitor], filter: &VisitorFilter) -> Vec<Visitor> {
    let needle = filter.search.trim().to_lowercase();
    visitors
        .iter()
        .filter(|v| {
            filter.status.matches(v.status)
                && filter.source.matches(&v.source)
                && (needle.is_empty() || matches_search(v, &needle))
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match over the searchable fields.
fn matches_search(visitor: &Visitor, needle: &str) -> bool {
    visitor.name.to_lowercase().contains(needle)
        || visitor.surname.to_lowercase().contains(needle)
        || visitor.phone.to_lowercase().contains(needle)
        || visitor.cin.to_lowercase().contains(needle)
}

/// Builds the three chart groupings.
///
/// Dates sort chronologically with the unknown bucket last; source and
/// interest groups keep encounter order. Colors cycle through the fixed
/// palette by group index.
#[must_use]
pub fn aggregate_visitors(visitors: &[Visitor]) -> VisitorStats {
    let mut date_keys: Vec<(String, usize)> = Vec::new();
    for visitor in visitors {
        let key = visitor
            .visit_date
            .map_or_else(|| UNKNOWN_DATE_BUCKET.to_string(), |d| d.date_naive().to_string());
        match date_keys.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => date_keys.push((key, 1)),
        }
    }
    // "Unknown" sorts after ISO dates, which is exactly where it belongs.
    date_keys.sort_by(|(a, _), (b, _)| a.cmp(b));
    let by_date = date_keys
        .into_iter()
        .enumerate()
        .map(|(i, (date, count))| DateCount {
            date,
            count,
            color: palette_color(i),
        })
        .collect();

    VisitorStats {
        by_date,
        by_source: count_groups(visitors.iter().map(|v| v.source.as_str())),
        by_interest: count_groups(visitors.iter().map(|v| v.interest.as_str())),
    }
}

/// Counts labels in encounter order, assigning palette colors by index.
fn count_groups<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    for label in labels {
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                label: label.to_string(),
                count: 1,
                color: palette_color(groups.len()),
            }),
        }
    }
    groups
}

/// Headline per-status counts.
#[must_use]
pub fn status_totals(visitors: &[Visitor]) -> StatusTotals {
    let mut totals = StatusTotals {
        total: visitors.len(),
        ..StatusTotals::default()
    };
    for visitor in visitors {
        match visitor.status {
            VisitorStatus::New => totals.new += 1,
            VisitorStatus::InProgress => totals.in_progress += 1,
            VisitorStatus::Converted => totals.converted += 1,
            VisitorStatus::Lost => totals.lost += 1,
        }
    }
    totals
}
