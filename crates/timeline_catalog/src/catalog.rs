use std::time::Duration;

use serde::de::DeserializeOwned;
use timeline_core::{DaySummary, MediaFile, MonthSummary, YearSummary};

use crate::error::{map_reqwest_error, CatalogError};
use crate::wire::{
    BatchRow, DayCountRow, ImportFileRow, ImportStateBody, MediaFileListBody, MediaFileRow,
    MonthCountRow, StatsBody, YearCountRow,
};

/// Connection settings for the REST catalog.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Archive-wide statistics reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Year and month of the most recent archived media file, `None` when
    /// the archive is empty.
    pub most_recent_year_month: Option<(i32, u32)>,
}

/// A server-side batch job, read-only from the client's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub title: String,
    pub start_time: String,
    pub closed: bool,
}

/// Whether the server-side bulk import job is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportJobState {
    pub running: bool,
}

/// A file sitting in the import folder, waiting for the bulk import.
///
/// Attributes the user has not filled in yet arrive as empty strings from
/// the backend and are kept that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub id: String,
    pub name: String,
    pub datetime_original: String,
    pub description: String,
    pub import_result: String,
    pub media_file_type: String,
    pub album: String,
}

/// Read access to the media timeline backend.
///
/// Each fetch is a single GET with no retry, no cache and no deduplication;
/// repeated calls re-fetch. Fetches that depend on an unset selection level
/// resolve to an empty list without touching the network, mirroring how the
/// selectors behave before the user has narrowed the timeline that far.
#[async_trait::async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Media counts grouped by year, over the whole archive.
    async fn fetch_year_counts(&self) -> Result<Vec<YearSummary>, CatalogError>;

    /// Media counts grouped by month within `year`.
    async fn fetch_month_counts(
        &self,
        year: Option<i32>,
    ) -> Result<Vec<MonthSummary>, CatalogError>;

    /// Media counts grouped by day within `year`/`month`.
    async fn fetch_day_counts(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<DaySummary>, CatalogError>;

    /// The media files of one fully specified day.
    async fn fetch_media_files(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Vec<MediaFile>, CatalogError>;

    /// Media files whose description matches `query`, across the whole
    /// archive.
    async fn fetch_search(&self, query: &str) -> Result<Vec<MediaFile>, CatalogError>;

    async fn fetch_stats(&self) -> Result<CatalogStats, CatalogError>;

    async fn fetch_batches(&self) -> Result<Vec<BatchJob>, CatalogError>;

    async fn fetch_import_state(&self) -> Result<ImportJobState, CatalogError>;

    /// Files uploaded to the import folder, with their editable metadata.
    async fn fetch_import_files(&self) -> Result<Vec<ImportFile>, CatalogError>;
}

/// `RemoteCatalog` over HTTP, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl RestCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        self.get_json_query(path, &[]).await
    }

    async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        log::debug!("GET {url}");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus(status.as_u16()));
        }

        response.json().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl RemoteCatalog for RestCatalog {
    async fn fetch_year_counts(&self) -> Result<Vec<YearSummary>, CatalogError> {
        let rows: Vec<YearCountRow> = self.get_json("/rest/mediafiles/").await?;
        Ok(rows.into_iter().map(YearCountRow::into_summary).collect())
    }

    async fn fetch_month_counts(
        &self,
        year: Option<i32>,
    ) -> Result<Vec<MonthSummary>, CatalogError> {
        let Some(year) = year else {
            return Ok(Vec::new());
        };
        let rows: Vec<MonthCountRow> =
            self.get_json(&format!("/rest/mediafiles/{year}/")).await?;
        rows.into_iter().map(|row| row.into_summary(year)).collect()
    }

    async fn fetch_day_counts(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<DaySummary>, CatalogError> {
        let (Some(year), Some(month)) = (year, month) else {
            return Ok(Vec::new());
        };
        let rows: Vec<DayCountRow> = self
            .get_json(&format!("/rest/mediafiles/{year}/{month}/"))
            .await?;
        rows.into_iter()
            .map(|row| row.into_summary(year, month))
            .collect()
    }

    async fn fetch_media_files(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Vec<MediaFile>, CatalogError> {
        let (Some(year), Some(month), Some(day)) = (year, month, day) else {
            return Ok(Vec::new());
        };
        let body: MediaFileListBody = self
            .get_json(&format!("/rest/mediafiles/{year}/{month}/{day}/"))
            .await?;
        Ok(body
            .media_files
            .into_iter()
            .map(MediaFileRow::into_media_file)
            .collect())
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<MediaFile>, CatalogError> {
        let body: MediaFileListBody = self
            .get_json_query("/rest/search/", &[("q", query)])
            .await?;
        Ok(body
            .media_files
            .into_iter()
            .map(MediaFileRow::into_media_file)
            .collect())
    }

    async fn fetch_stats(&self) -> Result<CatalogStats, CatalogError> {
        let body: StatsBody = self.get_json("/rest/mediafiles/stats/").await?;
        body.into_stats()
    }

    async fn fetch_batches(&self) -> Result<Vec<BatchJob>, CatalogError> {
        let rows: Vec<BatchRow> = self.get_json("/rest/batch/").await?;
        rows.into_iter().map(BatchRow::into_job).collect()
    }

    async fn fetch_import_state(&self) -> Result<ImportJobState, CatalogError> {
        let body: ImportStateBody = self.get_json("/rest/import/job/state").await?;
        body.into_state()
    }

    async fn fetch_import_files(&self) -> Result<Vec<ImportFile>, CatalogError> {
        let rows: Vec<ImportFileRow> = self.get_json("/rest/import/files/").await?;
        Ok(rows
            .into_iter()
            .map(ImportFileRow::into_import_file)
            .collect())
    }
}
