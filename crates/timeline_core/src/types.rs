use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(u32),
}

/// Media count for one year of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    pub count: u64,
}

/// Media count for one month, with its English display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub count: u64,
    pub month_name: &'static str,
}

impl MonthSummary {
    /// Fails when `month` falls outside the calendar range. The backend is
    /// expected to only ever send 1..=12, but nothing enforces that upstream.
    pub fn new(year: i32, month: u32, count: u64) -> Result<Self, SelectionError> {
        let month_name = *MONTH_NAMES
            .get((month as usize).wrapping_sub(1))
            .ok_or(SelectionError::MonthOutOfRange(month))?;
        Ok(Self {
            year,
            month,
            count,
            month_name,
        })
    }
}

/// Media count for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub count: u64,
}

/// A single archived media file as reported by the catalog.
///
/// The caller owns fetched lists; duplicates reported by the backend are
/// passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub description: String,
}
