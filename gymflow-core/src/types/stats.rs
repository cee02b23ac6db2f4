//! Chart-ready aggregation types.

use serde::Serialize;

/// Fixed display palette; groups take colors cycling by index.
pub const CHART_PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#b07aa1", "#9c755f",
];

/// Bucket key used when a visitor has no visit date.
pub const UNKNOWN_DATE_BUCKET: &str = "Unknown";

/// The palette color for a group at `index`.
#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Visitor count for one visit date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    /// Date portion of the visit timestamp, or [`UNKNOWN_DATE_BUCKET`].
    pub date: String,
    /// Number of visitors in the bucket.
    pub count: usize,
    /// Display color.
    pub color: &'static str,
}

/// Visitor count for one label (source or interest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// Group label.
    pub label: String,
    /// Number of visitors in the group.
    pub count: usize,
    /// Display color.
    pub color: &'static str,
}

/// The three chart groupings derived from the visitor collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitorStats {
    /// Counts by visit date, chronological, unknown dates last.
    pub by_date: Vec<DateCount>,
    /// Counts by information source, in encounter order.
    pub by_source: Vec<GroupCount>,
    /// Counts by primary interest, in encounter order.
    pub by_interest: Vec<GroupCount>,
}

/// Headline per-status counts for the stats header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotals {
    /// All visitors.
    pub total: usize,
    /// Status `Nouveau`.
    pub new: usize,
    /// Status `En cours`.
    pub in_progress: usize,
    /// Status `Converti`.
    pub converted: usize,
    /// Status `Perdu`.
    pub lost: usize,
}
