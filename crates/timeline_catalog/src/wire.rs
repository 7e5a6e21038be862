//! Row structs matching the backend's JSON payloads, plus the substring
//! parsing the backend's date encodings require.

use serde::Deserialize;
use timeline_core::{DaySummary, MediaFile, MonthSummary, SelectionError, YearSummary};

use crate::catalog::{BatchJob, CatalogStats, ImportFile, ImportJobState};
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
pub(crate) struct YearCountRow {
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthCountRow {
    pub year_month: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayCountRow {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaFileRow {
    pub file_name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaFileListBody {
    pub media_files: Vec<MediaFileRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsBody {
    pub most_recent_year_month: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchRow {
    pub title: String,
    pub start_time: String,
    pub closed: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportStateBody {
    pub state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportFileRow {
    pub id: String,
    pub name: String,
    pub datetime_original: String,
    pub description: String,
    pub import_result: String,
    pub media_file_type: String,
    pub album: String,
}

/// The backend encodes months as `"YYYY-MM"`; the month is everything after
/// offset 5.
pub(crate) fn month_from_year_month(value: &str) -> Result<u32, CatalogError> {
    value
        .get(5..)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| CatalogError::Parse(format!("malformed yearMonth {value:?}")))
}

/// The backend encodes days as `"YYYY-MM-DD"`; the day is everything after
/// offset 8.
pub(crate) fn day_from_date(value: &str) -> Result<u32, CatalogError> {
    value
        .get(8..)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| CatalogError::Parse(format!("malformed date {value:?}")))
}

impl YearCountRow {
    pub(crate) fn into_summary(self) -> YearSummary {
        YearSummary {
            year: self.year,
            count: self.count,
        }
    }
}

impl MonthCountRow {
    pub(crate) fn into_summary(self, year: i32) -> Result<MonthSummary, CatalogError> {
        let month = month_from_year_month(&self.year_month)?;
        Ok(MonthSummary::new(year, month, self.count)?)
    }
}

impl DayCountRow {
    pub(crate) fn into_summary(self, year: i32, month: u32) -> Result<DaySummary, CatalogError> {
        let day = day_from_date(&self.date)?;
        Ok(DaySummary {
            year,
            month,
            day,
            count: self.count,
        })
    }
}

impl MediaFileRow {
    pub(crate) fn into_media_file(self) -> MediaFile {
        MediaFile {
            file_name: self.file_name,
            description: self.description,
        }
    }
}

impl StatsBody {
    /// An empty `mostRecentYearMonth` means the archive holds no media yet.
    pub(crate) fn into_stats(self) -> Result<CatalogStats, CatalogError> {
        if self.most_recent_year_month.is_empty() {
            return Ok(CatalogStats {
                most_recent_year_month: None,
            });
        }
        let value = &self.most_recent_year_month;
        let year = value
            .get(..4)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| CatalogError::Parse(format!("malformed yearMonth {value:?}")))?;
        let month = month_from_year_month(value)?;
        if !(1..=12).contains(&month) {
            return Err(SelectionError::MonthOutOfRange(month).into());
        }
        Ok(CatalogStats {
            most_recent_year_month: Some((year, month)),
        })
    }
}

impl BatchRow {
    pub(crate) fn into_job(self) -> Result<BatchJob, CatalogError> {
        let closed = match self.closed.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(CatalogError::Parse(format!(
                    "malformed closed flag {other:?}"
                )))
            }
        };
        Ok(BatchJob {
            title: self.title,
            start_time: self.start_time,
            closed,
        })
    }
}

impl ImportFileRow {
    pub(crate) fn into_import_file(self) -> ImportFile {
        ImportFile {
            id: self.id,
            name: self.name,
            datetime_original: self.datetime_original,
            description: self.description,
            import_result: self.import_result,
            media_file_type: self.media_file_type,
            album: self.album,
        }
    }
}

impl ImportStateBody {
    pub(crate) fn into_state(self) -> Result<ImportJobState, CatalogError> {
        match self.state.as_str() {
            "running" => Ok(ImportJobState { running: true }),
            "stopped" => Ok(ImportJobState { running: false }),
            other => Err(CatalogError::Parse(format!(
                "malformed import state {other:?}"
            ))),
        }
    }
}
