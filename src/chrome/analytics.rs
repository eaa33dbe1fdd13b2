//! Fire-and-forget pageview beacon.
//!
//! One beacon per page load, sent to the analytics collection endpoint in
//! measurement-protocol form. The send happens on a detached thread and its
//! outcome is discarded entirely — analytics must never affect the page.

use url::Url;

/// Default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/collect";

/// A single pageview hit.
#[derive(Debug, Clone)]
pub struct Pageview {
    /// Property the hit is billed to (e.g. `UA-000000-1`).
    pub tracking_id: String,
    /// Anonymous client identifier.
    pub client_id: String,
    /// Path of the viewed page.
    pub page: String,
    /// Document title, when known.
    pub title: Option<String>,
}

impl Pageview {
    pub fn new(
        tracking_id: impl Into<String>,
        client_id: impl Into<String>,
        page: impl Into<String>,
    ) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            client_id: client_id.into(),
            page: page.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The full beacon URL against the given endpoint.
    pub fn url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("v", "1"),
            ("t", "pageview"),
            ("tid", self.tracking_id.as_str()),
            ("cid", self.client_id.as_str()),
            ("dp", self.page.as_str()),
        ];
        if let Some(title) = &self.title {
            params.push(("dt", title.as_str()));
        }
        Url::parse_with_params(endpoint, params)
    }
}

/// Send the beacon to the default endpoint and forget about it: the request
/// runs on a detached thread and every outcome, including transport errors,
/// is ignored.
pub fn send(pageview: &Pageview) {
    let Ok(url) = pageview.url(DEFAULT_ENDPOINT) else {
        return;
    };
    std::thread::spawn(move || {
        let _ = ureq::get(url.as_str()).call();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_measurement_fields() {
        let hit = Pageview::new("UA-000000-1", "cid-123", "/archive.html");
        let url = hit.url(DEFAULT_ENDPOINT).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("v".into(), "1".into())));
        assert!(pairs.contains(&("t".into(), "pageview".into())));
        assert!(pairs.contains(&("tid".into(), "UA-000000-1".into())));
        assert!(pairs.contains(&("cid".into(), "cid-123".into())));
        assert!(pairs.contains(&("dp".into(), "/archive.html".into())));
    }

    #[test]
    fn title_is_optional_and_encoded() {
        let hit = Pageview::new("UA-000000-1", "cid-123", "/").with_title("Posts & Notes");
        let url = hit.url(DEFAULT_ENDPOINT).unwrap();
        assert!(url.query().unwrap().contains("dt=Posts+%26+Notes"));

        let bare = Pageview::new("UA-000000-1", "cid-123", "/");
        let url = bare.url(DEFAULT_ENDPOINT).unwrap();
        assert!(!url.query().unwrap().contains("dt="));
    }

    #[test]
    fn invalid_endpoint_is_an_error_not_a_panic() {
        let hit = Pageview::new("UA-000000-1", "cid-123", "/");
        assert!(hit.url("not a url").is_err());
    }
}
