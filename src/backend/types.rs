use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportSource {
    GoogleDrive,
    Dropbox,
}

impl ImportSource {
    pub const ALL: [ImportSource; 2] = [ImportSource::GoogleDrive, ImportSource::Dropbox];

    /// Wire name, as used in `/images/source/{source}` and in `ImageRecord::source`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportSource::GoogleDrive => "google_drive",
            ImportSource::Dropbox => "dropbox",
        }
    }

    /// Path of the import endpoint, relative to the API base.
    pub fn import_path(&self) -> &'static str {
        match self {
            ImportSource::GoogleDrive => "import/google-drive",
            ImportSource::Dropbox => "import/dropbox",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportSource::GoogleDrive => "Google Drive",
            ImportSource::Dropbox => "Dropbox",
        }
    }
}

impl FromStr for ImportSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google_drive" => Ok(ImportSource::GoogleDrive),
            "dropbox" => Ok(ImportSource::Dropbox),
            other => Err(format!("Unknown import source: {}", other)),
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Only(ImportSource),
}

impl SourceFilter {
    pub const ALL: [SourceFilter; 3] = [
        SourceFilter::All,
        SourceFilter::Only(ImportSource::GoogleDrive),
        SourceFilter::Only(ImportSource::Dropbox),
    ];

    /// Path of the listing endpoint, relative to the API base.
    pub fn images_path(&self) -> String {
        match self {
            SourceFilter::All => "images".to_string(),
            SourceFilter::Only(source) => format!("images/source/{}", source.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFilter::All => "All",
            SourceFilter::Only(source) => source.label(),
        }
    }
}

/// Backend identifier of an image. The client never interprets it, it only
/// needs it to be unique within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub name: String,
    pub storage_path: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_file_id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ImageRecord {
    pub fn import_source(&self) -> Option<ImportSource> {
        self.source.as_deref().and_then(|s| s.parse().ok())
    }

    /// True once the backend has finished copying the file into storage.
    /// Records without a status are treated as complete.
    pub fn is_completed(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("completed"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub source: ImportSource,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_backend_record() {
        let json = r#"{
            "id": 7,
            "name": "beach.jpg",
            "source_file_id": "1AbC",
            "size": 204800,
            "mime_type": "image/jpeg",
            "storage_path": "https://bucket.s3.amazonaws.com/uuid-beach.jpg",
            "source": "google_drive",
            "status": "completed"
        }"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, ImageId::Number(7));
        assert_eq!(record.import_source(), Some(ImportSource::GoogleDrive));
        assert_eq!(record.size, Some(204800));
        assert_eq!(record.source_file_id.as_deref(), Some("1AbC"));
        assert!(record.is_completed());
    }

    #[test]
    fn deserializes_minimal_record_with_string_id() {
        let json = r#"{"id": "a1", "name": "x.png", "storage_path": "/x.png"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, ImageId::Text("a1".to_string()));
        assert_eq!(record.import_source(), None);
        assert_eq!(record.mime_type, None);
        assert!(record.is_completed());
    }

    #[test]
    fn unknown_source_does_not_fail_deserialization() {
        let json = r#"{"id": 1, "name": "x", "storage_path": "p", "source": "onedrive", "status": "failed"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.import_source(), None);
        assert!(!record.is_completed());
    }

    #[test]
    fn filter_paths_match_backend_routes() {
        assert_eq!(SourceFilter::All.images_path(), "images");
        assert_eq!(
            SourceFilter::Only(ImportSource::GoogleDrive).images_path(),
            "images/source/google_drive"
        );
        assert_eq!(
            SourceFilter::Only(ImportSource::Dropbox).images_path(),
            "images/source/dropbox"
        );
    }

    #[test]
    fn import_source_round_trips_through_wire_name() {
        for source in ImportSource::ALL {
            assert_eq!(source.as_str().parse::<ImportSource>(), Ok(source));
        }
        assert!("all".parse::<ImportSource>().is_err());
    }
}
