//! In-app navigation targets and their path form.

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Search {
        query: Option<String>,
    },
    Watch {
        id: String,
    },
    Preferences,
}

impl Route {
    pub fn search(query: &str) -> Self {
        let query = query.trim();
        Self::Search {
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    pub fn watch(id: impl Into<String>) -> Self {
        Self::Watch { id: id.into() }
    }

    /// Path form, e.g. `/search?query=one+piece` or `/watch/21`.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/home".into(),
            Self::Search { query: None } => "/search".into(),
            Self::Search { query: Some(q) } => {
                let encoded: String = form_urlencoded::byte_serialize(q.as_bytes()).collect();
                format!("/search?query={encoded}")
            }
            Self::Watch { id } => format!("/watch/{id}"),
            Self::Preferences => "/preferences".into(),
        }
    }

    /// Inverse of [`Route::path`]. Anything unrecognised lands on home.
    pub fn parse(path: &str) -> Self {
        let (path, query_string) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let path = path.trim_end_matches('/');

        match path {
            "/search" => {
                let query = query_string.and_then(|qs| {
                    form_urlencoded::parse(qs.as_bytes())
                        .find(|(k, _)| k == "query")
                        .map(|(_, v)| v.into_owned())
                });
                Self::search(query.as_deref().unwrap_or_default())
            }
            "/preferences" => Self::Preferences,
            p => match p.strip_prefix("/watch/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::watch(id),
                _ => Self::Home,
            },
        }
    }

    /// The query a search route carries, for mirroring into the search box.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Search { query } => query.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
