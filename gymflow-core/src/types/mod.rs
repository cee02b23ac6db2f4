//! Core-layer types

mod conversion;
mod filter;
mod stats;

pub use conversion::generate_club_code;
pub use filter::{ALL_SOURCES, ALL_STATUSES, SourceFilter, StatusFilter, VisitorFilter};
pub use stats::{
    CHART_PALETTE, DateCount, GroupCount, StatusTotals, UNKNOWN_DATE_BUCKET, VisitorStats,
    palette_color,
};
