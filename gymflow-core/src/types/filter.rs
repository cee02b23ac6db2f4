//! Filter criteria for the visitor list.

use gymflow_gateway::VisitorStatus;

/// Raw sentinel the UI sends for "no status filtering".
pub const ALL_STATUSES: &str = "Tous";
/// Raw sentinel the UI sends for "no source filtering".
pub const ALL_SOURCES: &str = "Toutes";

/// Status dimension of the visitor filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering on this dimension.
    #[default]
    All,
    /// Keep only visitors with this status.
    Only(VisitorStatus),
}

impl StatusFilter {
    /// Parses a raw UI value. The sentinel and any unrecognized value both
    /// mean "no filtering", so a stale dropdown never hides the whole list.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw == ALL_STATUSES {
            return Self::All;
        }
        VisitorStatus::from_wire(raw).map_or(Self::All, Self::Only)
    }

    /// Whether a visitor with `status` passes this dimension.
    #[must_use]
    pub fn matches(&self, status: VisitorStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// Source dimension of the visitor filter. Matches by exact equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceFilter {
    /// No filtering on this dimension.
    #[default]
    All,
    /// Keep only visitors whose source equals this value exactly.
    Only(String),
}

impl SourceFilter {
    /// Parses a raw UI value; the sentinel means "no filtering".
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw == ALL_SOURCES {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    /// Whether a visitor with `source` passes this dimension.
    #[must_use]
    pub fn matches(&self, source: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == source,
        }
    }
}

/// Combined filter over the in-memory visitor collection.
///
/// `search` matches case-insensitively as a substring of name, surname,
/// phone, and CIN; an empty search keeps every record.
#[derive(Debug, Clone, Default)]
pub struct VisitorFilter {
    /// Status dimension.
    pub status: StatusFilter,
    /// Source dimension.
    pub source: SourceFilter,
    /// Free-text search term.
    pub search: String,
}
