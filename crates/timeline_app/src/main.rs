//! Terminal browser for the media timeline: narrow the selection year ->
//! month -> day, list the media files of a day, zoom into one of them.

mod logging;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use timeline_catalog::{CatalogEvent, CatalogHandle, CatalogSettings};
use timeline_core::{FileViewer, MediaFile, SelectionState, THUMBNAIL_SIZES};
use viewer_logging::{viewer_error, viewer_info, viewer_warn};

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Years,
    Year(Option<i32>),
    Month(Option<u32>),
    Day(Option<u32>),
    Size(u32),
    Files,
    Show(usize),
    Search(String),
    Stats,
    Batches,
    Import,
    Imports,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    // `search` takes the rest of the line verbatim; queries may hold spaces.
    if let Some(query) = line.trim().strip_prefix("search ") {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        return Some(Command::Search(query.to_string()));
    }
    let mut parts = line.split_whitespace();
    let keyword = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }
    let command = match (keyword, arg) {
        ("years", None) => Command::Years,
        ("year", Some("none")) => Command::Year(None),
        ("year", Some(value)) => Command::Year(Some(value.parse().ok()?)),
        ("month", Some("none")) => Command::Month(None),
        ("month", Some(value)) => Command::Month(Some(value.parse().ok()?)),
        ("day", Some("none")) => Command::Day(None),
        ("day", Some(value)) => Command::Day(Some(value.parse().ok()?)),
        ("size", Some(value)) => Command::Size(value.parse().ok()?),
        ("files", None) => Command::Files,
        ("show", Some(value)) => Command::Show(value.parse().ok()?),
        ("stats", None) => Command::Stats,
        ("batches", None) => Command::Batches,
        ("import", None) => Command::Import,
        ("imports", None) => Command::Imports,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn catalog_settings_from_env() -> CatalogSettings {
    let mut settings = CatalogSettings::default();
    if let Ok(base_url) = std::env::var("TIMELINE_BASE_URL") {
        if !base_url.is_empty() {
            settings.base_url = base_url;
        }
    }
    settings
}

struct App {
    state: SelectionState,
    viewer: FileViewer,
    handle: CatalogHandle,
    /// Files of the most recent day listing or search, indexed by `show`.
    media_files: Vec<MediaFile>,
}

impl App {
    fn new(handle: CatalogHandle) -> Self {
        let mut state = SelectionState::new();
        state
            .year_changed
            .subscribe(|year| viewer_info!("year selected: {year:?}"));
        state
            .month_changed
            .subscribe(|month| viewer_info!("month selected: {month:?}"));
        state
            .day_changed
            .subscribe(|day| viewer_info!("day selected: {day:?}"));
        state
            .thumbnail_size_changed
            .subscribe(|size| viewer_info!("thumbnail size selected: {size}"));

        let mut viewer = FileViewer::new();
        viewer.file_set.subscribe(|file| {
            println!();
            println!("=== {}", file.file_name);
            println!("    {}", file.description);
        });

        Self {
            state,
            viewer,
            handle,
            media_files: Vec::new(),
        }
    }

    /// Applies one command; returns `false` when the session should end.
    fn apply(&mut self, command: Command) -> bool {
        self.drain_pending_events();
        match command {
            Command::Years => {
                self.handle.request_years();
                self.await_event();
            }
            Command::Year(year) => {
                self.state.select_year(year);
                self.media_files.clear();
                if let Some(year) = year {
                    self.handle.request_months(year);
                    self.await_event();
                }
            }
            Command::Month(month) => {
                let Some(year) = self.state.selected_year() else {
                    println!("select a year first");
                    return true;
                };
                self.state.select_month(month);
                self.media_files.clear();
                if let Some(month) = month {
                    self.handle.request_days(year, month);
                    self.await_event();
                }
            }
            Command::Day(day) => {
                let (Some(year), Some(month)) =
                    (self.state.selected_year(), self.state.selected_month())
                else {
                    println!("select a year and a month first");
                    return true;
                };
                self.state.select_day(day);
                if let Some(day) = day {
                    self.handle.request_media_files(year, month, day);
                    self.await_event();
                }
            }
            Command::Size(size) => {
                if !THUMBNAIL_SIZES.contains(&size) {
                    println!("note: offered sizes are {THUMBNAIL_SIZES:?}");
                }
                self.state.select_thumbnail_size(size);
            }
            Command::Files => {
                let (Some(year), Some(month), Some(day)) = (
                    self.state.selected_year(),
                    self.state.selected_month(),
                    self.state.selected_day(),
                ) else {
                    println!("select a year, month and day first");
                    return true;
                };
                self.handle.request_media_files(year, month, day);
                self.await_event();
            }
            Command::Show(index) => match self.media_files.get(index) {
                Some(file) => self.viewer.show(file.clone()),
                None => println!("no file at index {index}; run `files` first"),
            },
            Command::Search(query) => {
                self.handle.request_search(&query);
                self.await_event();
            }
            Command::Stats => {
                self.handle.request_stats();
                self.await_event();
            }
            Command::Batches => {
                self.handle.request_batches();
                self.await_event();
            }
            Command::Import => {
                self.handle.request_import_state();
                self.await_event();
            }
            Command::Imports => {
                self.handle.request_import_files();
                self.await_event();
            }
            Command::Help => print_help(),
            Command::Quit => return false,
        }
        true
    }

    /// Discards responses that arrived after a previous `await_event` gave
    /// up, so they cannot be rendered as the answer to the next command.
    fn drain_pending_events(&mut self) {
        while let Some(event) = self.handle.try_recv() {
            viewer_warn!("discarding late catalog response {event:?}");
        }
    }

    fn await_event(&mut self) {
        match self.handle.recv_timeout(EVENT_TIMEOUT) {
            Some(event) => self.render_event(event),
            None => {
                viewer_warn!("no response from the backend within {EVENT_TIMEOUT:?}");
                println!("backend did not answer in time");
            }
        }
    }

    fn render_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Years(Ok(years)) => {
                for summary in &years {
                    println!("{}  ({} files)", summary.year, summary.count);
                }
                if years.is_empty() {
                    println!("the archive is empty");
                }
            }
            CatalogEvent::Months { year, result: Ok(months) } => {
                if self.state.selected_year() != Some(year) {
                    viewer_warn!("dropping stale month response for {year}");
                    return;
                }
                for summary in &months {
                    println!(
                        "{} {}  ({} files)",
                        summary.year, summary.month_name, summary.count
                    );
                }
            }
            CatalogEvent::Days { year, month, result: Ok(days) } => {
                if self.state.selected_year() != Some(year)
                    || self.state.selected_month() != Some(month)
                {
                    viewer_warn!("dropping stale day response for {year}-{month}");
                    return;
                }
                for summary in &days {
                    println!(
                        "{:04}-{:02}-{:02}  ({} files)",
                        summary.year, summary.month, summary.day, summary.count
                    );
                }
            }
            CatalogEvent::MediaFiles { year, month, day, result: Ok(files) } => {
                if self.state.selected_year() != Some(year)
                    || self.state.selected_month() != Some(month)
                    || self.state.selected_day() != Some(day)
                {
                    viewer_warn!("dropping stale file list for {year}-{month}-{day}");
                    return;
                }
                println!(
                    "thumbnails at {}px:",
                    self.state.selected_thumbnail_size()
                );
                for (index, file) in files.iter().enumerate() {
                    println!("[{index}] {}  {}", file.file_name, file.description);
                }
                self.media_files = files;
            }
            CatalogEvent::Search { query, result: Ok(files) } => {
                println!("results for {query:?}:");
                for (index, file) in files.iter().enumerate() {
                    println!("[{index}] {}  {}", file.file_name, file.description);
                }
                if files.is_empty() {
                    println!("no matches");
                }
                self.media_files = files;
            }
            CatalogEvent::Stats(Ok(stats)) => match stats.most_recent_year_month {
                Some((year, month)) => println!("most recent media: {year:04}-{month:02}"),
                None => println!("the archive is empty"),
            },
            CatalogEvent::Batches(Ok(batches)) => {
                for batch in &batches {
                    let status = if batch.closed { "done" } else { "running" };
                    println!("{}  started {}  [{status}]", batch.title, batch.start_time);
                }
                if batches.is_empty() {
                    println!("no batch jobs");
                }
            }
            CatalogEvent::ImportState(Ok(import)) => {
                println!(
                    "import job is {}",
                    if import.running { "running" } else { "stopped" }
                );
            }
            CatalogEvent::ImportFiles(Ok(files)) => {
                for file in &files {
                    println!(
                        "{}  {}  {}  [{}]",
                        file.name, file.datetime_original, file.description, file.import_result
                    );
                }
                if files.is_empty() {
                    println!("no files in the import folder");
                }
            }
            CatalogEvent::Years(Err(err))
            | CatalogEvent::Months { result: Err(err), .. }
            | CatalogEvent::Days { result: Err(err), .. }
            | CatalogEvent::MediaFiles { result: Err(err), .. }
            | CatalogEvent::Search { result: Err(err), .. }
            | CatalogEvent::Stats(Err(err))
            | CatalogEvent::Batches(Err(err))
            | CatalogEvent::ImportState(Err(err))
            | CatalogEvent::ImportFiles(Err(err)) => {
                viewer_error!("catalog fetch failed: {err}");
                println!("error: {err}");
            }
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  years            list years with media counts");
    println!("  year N|none      select a year (lists its months)");
    println!("  month N|none     select a month (lists its days)");
    println!("  day N|none       select a day (lists its files)");
    println!("  size N           set the thumbnail size ({THUMBNAIL_SIZES:?})");
    println!("  files            re-list the files of the selected day");
    println!("  show I           zoom into file I of the last listing");
    println!("  search TEXT      search descriptions across the whole archive");
    println!("  stats            show archive statistics");
    println!("  batches          list server-side batch jobs");
    println!("  import           show the import job state");
    println!("  imports          list the files waiting in the import folder");
    println!("  quit             leave");
}

fn main() {
    logging::initialize();
    let settings = catalog_settings_from_env();
    viewer_info!("timeline viewer starting against {}", settings.base_url);

    let handle = match CatalogHandle::new(settings) {
        Ok(handle) => handle,
        Err(err) => {
            viewer_error!("failed to start catalog client: {err}");
            eprintln!("failed to start catalog client: {err}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(handle);
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(command) => {
                if !app.apply(command) {
                    break;
                }
            }
            None => println!("unknown command; try `help`"),
        }
    }
    viewer_info!("timeline viewer shutting down");
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};

    #[test]
    fn commands_parse_with_and_without_arguments() {
        assert_eq!(parse_command("years"), Some(Command::Years));
        assert_eq!(parse_command("year 2018"), Some(Command::Year(Some(2018))));
        assert_eq!(parse_command("year none"), Some(Command::Year(None)));
        assert_eq!(parse_command("month 8"), Some(Command::Month(Some(8))));
        assert_eq!(parse_command("day 4"), Some(Command::Day(Some(4))));
        assert_eq!(parse_command("size 300"), Some(Command::Size(300)));
        assert_eq!(parse_command("show 2"), Some(Command::Show(2)));
        assert_eq!(parse_command("imports"), Some(Command::Imports));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn search_takes_the_rest_of_the_line_as_query() {
        assert_eq!(
            parse_command("search viaduct harbour"),
            Some(Command::Search("viaduct harbour".to_string()))
        );
        assert_eq!(parse_command("search"), None);
        assert_eq!(parse_command("search   "), None);
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert_eq!(parse_command("year"), None);
        assert_eq!(parse_command("year twenty"), None);
        assert_eq!(parse_command("years 2018"), None);
        assert_eq!(parse_command("show"), None);
        assert_eq!(parse_command("teleport 9"), None);
        assert_eq!(parse_command("year 2018 extra"), None);
    }
}
