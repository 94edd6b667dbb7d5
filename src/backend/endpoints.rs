use crate::backend::types::{ImportRequest, SourceFilter};
use url::Url;

/// Resolves backend routes against the configured base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(api_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(api_url)?;
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn images(&self, filter: SourceFilter) -> Result<Url, url::ParseError> {
        self.base.join(&filter.images_path())
    }

    pub fn import(&self, request: &ImportRequest) -> Result<Url, url::ParseError> {
        let mut url = self.base.join(request.source.import_path())?;
        url.query_pairs_mut().append_pair("url", &request.url);
        Ok(url)
    }
}
