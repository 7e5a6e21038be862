//! Timeline core: pure selection-state coordination and notification channels.
mod channel;
mod selection;
mod types;
mod viewer;

pub use channel::{Channel, Subscription};
pub use selection::{SelectionState, DEFAULT_THUMBNAIL_SIZE, THUMBNAIL_SIZES};
pub use types::{DaySummary, MediaFile, MonthSummary, SelectionError, YearSummary};
pub use viewer::FileViewer;
