//! Relative link resolution

use url::Url;

/// Resolves link and image destinations against an optional base URL
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkResolver {
    base: Option<Url>,
}

impl LinkResolver {
    /// An unparseable base URL is ignored.
    pub fn new(base_url: Option<&str>) -> Self {
        let base = base_url
            .filter(|b| !b.is_empty())
            .and_then(|b| match Url::parse(b) {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::debug!(base_url = b, error = %err, "ignoring invalid base URL");
                    None
                }
            });
        Self { base }
    }

    pub fn resolve(&self, destination: &str) -> String {
        let Some(base) = &self.base else {
            return destination.to_string();
        };

        if destination.is_empty() || destination.starts_with('#') {
            return destination.to_string();
        }
        if Url::parse(destination).is_ok() {
            return destination.to_string();
        }

        match base.join(destination) {
            Ok(url) => url.to_string(),
            Err(_) => destination.to_string(),
        }
    }
}
