use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use timeline_core::{DaySummary, MediaFile, MonthSummary, YearSummary};

use crate::catalog::{
    BatchJob, CatalogSettings, CatalogStats, ImportFile, ImportJobState, RemoteCatalog,
    RestCatalog,
};
use crate::error::CatalogError;

enum CatalogCommand {
    LoadYears,
    LoadMonths { year: i32 },
    LoadDays { year: i32, month: u32 },
    LoadMediaFiles { year: i32, month: u32, day: u32 },
    LoadSearch { query: String },
    LoadStats,
    LoadBatches,
    LoadImportState,
    LoadImportFiles,
}

/// Completed fetch results, delivered in completion order.
///
/// A request issued after another one may complete first; the consumer sees
/// whichever arrives last (last response wins). Each event echoes the
/// selection it was fetched for so stale responses can be recognized.
#[derive(Debug)]
pub enum CatalogEvent {
    Years(Result<Vec<YearSummary>, CatalogError>),
    Months {
        year: i32,
        result: Result<Vec<MonthSummary>, CatalogError>,
    },
    Days {
        year: i32,
        month: u32,
        result: Result<Vec<DaySummary>, CatalogError>,
    },
    MediaFiles {
        year: i32,
        month: u32,
        day: u32,
        result: Result<Vec<MediaFile>, CatalogError>,
    },
    Search {
        query: String,
        result: Result<Vec<MediaFile>, CatalogError>,
    },
    Stats(Result<CatalogStats, CatalogError>),
    Batches(Result<Vec<BatchJob>, CatalogError>),
    ImportState(Result<ImportJobState, CatalogError>),
    ImportFiles(Result<Vec<ImportFile>, CatalogError>),
}

/// Bridge between a synchronous front end and the async REST catalog.
///
/// Owns a worker thread running a Tokio runtime. Requests go in over an mpsc
/// channel, completed `CatalogEvent`s come back over another. This is the
/// single asynchronous boundary of the application; everything downstream of
/// the event receiver is synchronous. In-flight fetches are not cancelled.
pub struct CatalogHandle {
    cmd_tx: mpsc::Sender<CatalogCommand>,
    event_rx: mpsc::Receiver<CatalogEvent>,
}

impl CatalogHandle {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let catalog = Arc::new(RestCatalog::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let catalog = catalog.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = run_command(catalog.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn request_years(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadYears);
    }

    pub fn request_months(&self, year: i32) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadMonths { year });
    }

    pub fn request_days(&self, year: i32, month: u32) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadDays { year, month });
    }

    pub fn request_media_files(&self, year: i32, month: u32, day: u32) {
        let _ = self
            .cmd_tx
            .send(CatalogCommand::LoadMediaFiles { year, month, day });
    }

    pub fn request_search(&self, query: &str) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadSearch {
            query: query.to_string(),
        });
    }

    pub fn request_stats(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadStats);
    }

    pub fn request_batches(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadBatches);
    }

    pub fn request_import_state(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadImportState);
    }

    pub fn request_import_files(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::LoadImportFiles);
    }

    /// Non-blocking poll for the next completed fetch.
    pub fn try_recv(&self) -> Option<CatalogEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks the calling thread until a fetch completes or `timeout` passes.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<CatalogEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_command(catalog: &dyn RemoteCatalog, command: CatalogCommand) -> CatalogEvent {
    match command {
        CatalogCommand::LoadYears => CatalogEvent::Years(catalog.fetch_year_counts().await),
        CatalogCommand::LoadMonths { year } => CatalogEvent::Months {
            year,
            result: catalog.fetch_month_counts(Some(year)).await,
        },
        CatalogCommand::LoadDays { year, month } => CatalogEvent::Days {
            year,
            month,
            result: catalog.fetch_day_counts(Some(year), Some(month)).await,
        },
        CatalogCommand::LoadMediaFiles { year, month, day } => CatalogEvent::MediaFiles {
            year,
            month,
            day,
            result: catalog
                .fetch_media_files(Some(year), Some(month), Some(day))
                .await,
        },
        CatalogCommand::LoadSearch { query } => {
            let result = catalog.fetch_search(&query).await;
            CatalogEvent::Search { query, result }
        }
        CatalogCommand::LoadStats => CatalogEvent::Stats(catalog.fetch_stats().await),
        CatalogCommand::LoadBatches => CatalogEvent::Batches(catalog.fetch_batches().await),
        CatalogCommand::LoadImportState => {
            CatalogEvent::ImportState(catalog.fetch_import_state().await)
        }
        CatalogCommand::LoadImportFiles => {
            CatalogEvent::ImportFiles(catalog.fetch_import_files().await)
        }
    }
}
