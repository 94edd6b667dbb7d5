use crate::backend::{ImageId, ImageRecord, ImportSource, SourceFilter};
use crate::utils::file_size::format_size;
use derivative::Derivative;

pub const EMPTY_URL_MESSAGE: &str = "Please enter a valid folder URL";
pub const IMPORT_STARTED_MESSAGE: &str = "Import started successfully";
pub const IMPORT_FAILED_MESSAGE: &str = "Import failed. Please check URL or backend.";
pub const LIST_FAILED_MESSAGE: &str = "Failed to load images";
pub const NO_IMAGES_PLACEHOLDER: &str = "No images found";

/// Lifecycle of one kind of backend request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// The single status line under the import form. Error and success are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error {
        message: String,
        cause: Option<String>,
    },
    Success(String),
}

impl Notice {
    pub fn error(message: &str) -> Self {
        Notice::Error {
            message: message.to_string(),
            cause: None,
        }
    }

    /// An error raised by a failed request; `cause` is shown on hover.
    pub fn failure(message: &str, cause: String) -> Self {
        Notice::Error {
            message: message.to_string(),
            cause: Some(cause),
        }
    }
}

#[derive(Debug, Derivative)]
#[derivative(Default)]
pub struct UiState {
    pub url: String,
    #[derivative(Default(value = "ImportSource::GoogleDrive"))]
    pub import_source: ImportSource,
    pub filter: SourceFilter,
    pub images: Vec<ImageRecord>,
    pub import: RequestState,
    pub listing: RequestState,
    pub notice: Option<Notice>,
}

pub enum GalleryView<'a> {
    Empty,
    Tiles(Vec<Tile<'a>>),
}

pub struct Tile<'a> {
    pub key: &'a ImageId,
    pub source_uri: &'a str,
    pub caption: &'a str,
    pub badge: Option<&'a str>,
    pub details: String,
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        self.import == RequestState::Pending
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn import_button_label(&self) -> &'static str {
        if self.is_loading() {
            "Importing..."
        } else {
            "Import"
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error { message, .. }) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Success(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Cause of the request failure behind the current error, for hover text.
    pub fn failure_cause(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error {
                cause: Some(cause), ..
            }) => Some(cause.as_str()),
            _ => None,
        }
    }

    pub fn gallery(&self) -> GalleryView<'_> {
        if self.images.is_empty() {
            return GalleryView::Empty;
        }
        GalleryView::Tiles(self.images.iter().map(Tile::from_record).collect())
    }
}

impl<'a> Tile<'a> {
    fn from_record(record: &'a ImageRecord) -> Self {
        let badge = if record.is_completed() {
            None
        } else {
            record.status.as_deref()
        };

        Self {
            key: &record.id,
            source_uri: &record.storage_path,
            caption: &record.name,
            badge,
            details: Self::details(record),
        }
    }

    fn details(record: &ImageRecord) -> String {
        let source = match (record.import_source(), record.source.as_deref()) {
            (Some(source), _) => source.label(),
            (None, Some(raw)) => raw,
            (None, None) => "unknown",
        };

        let mut lines = vec![record.name.clone(), format!("Source: {}", source)];
        if let Some(source_file_id) = &record.source_file_id {
            lines.push(format!("Source file: {}", source_file_id));
        }
        if let Some(mime_type) = &record.mime_type {
            lines.push(format!("Type: {}", mime_type));
        }
        if let Some(size) = record.size {
            lines.push(format!("Size: {}", format_size(size)));
        }
        if let Some(status) = &record.status {
            lines.push(format!("Status: {}", status));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(id: i64, name: &str) -> ImageRecord {
        ImageRecord {
            id: ImageId::Number(id),
            name: name.to_string(),
            storage_path: format!("https://cdn.example.com/{}", name),
            source: Some("dropbox".to_string()),
            source_file_id: None,
            size: None,
            mime_type: None,
            status: None,
        }
    }

    #[test]
    fn defaults_match_initial_screen() {
        let state = UiState::default();

        assert_eq!(state.import_source, ImportSource::GoogleDrive);
        assert_eq!(state.filter, SourceFilter::All);
        assert_eq!(state.import, RequestState::Idle);
        assert!(state.notice.is_none());
        assert_eq!(state.import_button_label(), "Import");
    }

    #[test]
    fn empty_gallery_renders_placeholder() {
        let state = UiState::default();

        assert!(matches!(state.gallery(), GalleryView::Empty));
    }

    #[test]
    fn one_tile_per_record_with_unique_keys() {
        let state = UiState {
            images: vec![record(1, "a.jpg"), record(2, "b.jpg"), record(3, "c.jpg")],
            ..UiState::default()
        };

        let GalleryView::Tiles(tiles) = state.gallery() else {
            panic!("expected tiles");
        };
        assert_eq!(tiles.len(), 3);
        let keys: HashSet<_> = tiles.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(tiles[1].caption, "b.jpg");
        assert_eq!(tiles[1].source_uri, "https://cdn.example.com/b.jpg");
    }

    #[test]
    fn pending_import_disables_submit() {
        let state = UiState {
            import: RequestState::Pending,
            ..UiState::default()
        };

        assert!(state.is_loading());
        assert!(!state.can_submit());
        assert_eq!(state.import_button_label(), "Importing...");
    }

    #[test]
    fn notice_exposes_exactly_one_message() {
        let mut state = UiState {
            notice: Some(Notice::error(LIST_FAILED_MESSAGE)),
            ..UiState::default()
        };
        assert_eq!(state.error_message(), Some(LIST_FAILED_MESSAGE));
        assert_eq!(state.success_message(), None);

        state.notice = Some(Notice::Success(IMPORT_STARTED_MESSAGE.to_string()));
        assert_eq!(state.error_message(), None);
        assert_eq!(state.success_message(), Some(IMPORT_STARTED_MESSAGE));
    }

    #[test]
    fn failure_cause_comes_from_the_shown_notice() {
        let mut state = UiState {
            import: RequestState::Failed("HTTP 502 from old import".to_string()),
            listing: RequestState::Failed("listing down".to_string()),
            notice: Some(Notice::failure(LIST_FAILED_MESSAGE, "listing down".to_string())),
            ..UiState::default()
        };
        assert_eq!(state.failure_cause(), Some("listing down"));

        state.notice = Some(Notice::error(EMPTY_URL_MESSAGE));
        assert_eq!(state.failure_cause(), None);

        state.notice = Some(Notice::Success(IMPORT_STARTED_MESSAGE.to_string()));
        assert_eq!(state.failure_cause(), None);
    }

    #[test]
    fn unfinished_records_get_a_badge_and_details() {
        let mut processing = record(9, "raw.png");
        processing.status = Some("processing".to_string());
        processing.size = Some(2048);
        processing.source_file_id = Some("id:Xk9".to_string());
        processing.mime_type = Some("image/png".to_string());
        let state = UiState {
            images: vec![processing, record(10, "done.png")],
            ..UiState::default()
        };

        let GalleryView::Tiles(tiles) = state.gallery() else {
            panic!("expected tiles");
        };
        assert_eq!(tiles[0].badge, Some("processing"));
        assert_eq!(
            tiles[0].details,
            "raw.png\nSource: Dropbox\nSource file: id:Xk9\nType: image/png\nSize: 2.00 KB\nStatus: processing"
        );
        assert_eq!(tiles[1].badge, None);
    }
}
