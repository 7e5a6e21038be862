use crate::channel::Channel;

/// Thumbnail edge length used until the user picks another one.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Sizes offered by the thumbnail size selector.
pub const THUMBNAIL_SIZES: [u32; 2] = [200, 300];

/// Hierarchical selection coordinator for the year/month/day timeline.
///
/// One instance lives for the whole application session and is shared by the
/// views that need it. Setting a level clears every deeper level: selecting a
/// year unsets month and day, selecting a month unsets day. Thumbnail size is
/// orthogonal to the calendar hierarchy and is never cleared by it.
///
/// Each setter emits exactly once, on its own channel. Chained clearing of
/// derived view state is a consumer responsibility.
pub struct SelectionState {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    thumbnail_size: u32,
    /// Fired with the new value on every `select_year` call.
    pub year_changed: Channel<Option<i32>>,
    /// Fired with the new value on every `select_month` call.
    pub month_changed: Channel<Option<u32>>,
    /// Fired with the new value on every `select_day` call.
    pub day_changed: Channel<Option<u32>>,
    /// Fired with the new value on every `select_thumbnail_size` call.
    pub thumbnail_size_changed: Channel<u32>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            year_changed: Channel::new(),
            month_changed: Channel::new(),
            day_changed: Channel::new(),
            thumbnail_size_changed: Channel::new(),
        }
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
    }

    pub fn selected_month(&self) -> Option<u32> {
        self.month
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.day
    }

    pub fn selected_thumbnail_size(&self) -> u32 {
        self.thumbnail_size
    }

    /// Sets the year and unsets month and day.
    pub fn select_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.month = None;
        self.day = None;
        self.year_changed.emit(&year);
    }

    /// Sets the month and unsets day.
    pub fn select_month(&mut self, month: Option<u32>) {
        self.month = month;
        self.day = None;
        self.month_changed.emit(&month);
    }

    pub fn select_day(&mut self, day: Option<u32>) {
        self.day = day;
        self.day_changed.emit(&day);
    }

    /// Sets the thumbnail size. Leaves the calendar selection untouched.
    pub fn select_thumbnail_size(&mut self, size: u32) {
        self.thumbnail_size = size;
        self.thumbnail_size_changed.emit(&size);
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
