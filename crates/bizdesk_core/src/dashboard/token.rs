//! Period selection and supersession tokens for dashboard queries.
//!
//! # Invariants
//! - Exactly one generation is current; issuing or invalidating bumps it.
//! - A query is authoritative only while its generation is current,
//!   regardless of when its responses arrive.

use serde::{Serialize, Serializer};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Aggregation window selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    All,
    Year(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPeriod(pub String);

impl Display for InvalidPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid period selector `{}`", self.0)
    }
}

impl Error for InvalidPeriod {}

impl PeriodKey {
    /// Maps a year selector value; an empty value selects all years.
    pub fn from_selector(value: &str) -> Result<Self, InvalidPeriod> {
        value.parse()
    }

    pub fn year(self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year(year) => Some(year),
        }
    }

    /// Caption shown under each summary card.
    pub fn label(self) -> String {
        match self {
            Self::All => "All years".to_string(),
            Self::Year(year) => format!("Year {year}"),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = InvalidPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| InvalidPeriod(trimmed.to_string()))
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Serializes as the selector value (`all` or the year).
impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One outstanding stats query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightQuery {
    generation: u64,
    period: PeriodKey,
}

impl InFlightQuery {
    pub fn period(&self) -> PeriodKey {
        self.period
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Source of cancellation tokens for one loader.
#[derive(Debug, Default)]
pub struct QueryTokens {
    current: Cell<u64>,
}

impl QueryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new current query, superseding any previous one.
    pub fn issue(&self, period: PeriodKey) -> InFlightQuery {
        let generation = self.current.get().wrapping_add(1);
        self.current.set(generation);
        InFlightQuery { generation, period }
    }

    /// Supersedes the current query without issuing a new one.
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }

    pub fn is_current(&self, query: &InFlightQuery) -> bool {
        query.generation == self.current.get()
    }
}
