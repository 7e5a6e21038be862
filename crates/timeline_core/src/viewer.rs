use crate::channel::Channel;
use crate::types::MediaFile;

/// Single-slot coordinator for the zoom view.
///
/// Holds the media file currently on display and notifies subscribers every
/// time it is replaced. Last write wins; there is no history and no queue.
pub struct FileViewer {
    current: Option<MediaFile>,
    /// Fired with the newly shown file on every `show` call.
    pub file_set: Channel<MediaFile>,
}

impl FileViewer {
    pub fn new() -> Self {
        Self {
            current: None,
            file_set: Channel::new(),
        }
    }

    /// Replaces the shown file and notifies subscribers.
    pub fn show(&mut self, media_file: MediaFile) {
        self.current = Some(media_file.clone());
        self.file_set.emit(&media_file);
    }

    pub fn current(&self) -> Option<&MediaFile> {
        self.current.as_ref()
    }
}

impl Default for FileViewer {
    fn default() -> Self {
        Self::new()
    }
}
