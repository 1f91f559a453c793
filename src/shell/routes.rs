use std::fmt;

use url::Url;

use crate::catalog::BrowseParams;

const ORIGIN: &str = "http://shoutout.local/";

/// The five client-side pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Browse(BrowseParams),
    Celebrity(String),
    RequestVideo(String),
    Dashboard,
}

impl Route {
    /// Resolves a path (optionally with query and fragment) to a page.
    /// Paths outside the table give `None`; nothing is rendered for them.
    pub fn parse(target: &str) -> Option<Route> {
        let url = Url::parse(ORIGIN).ok()?.join(target).ok()?;
        let mut segments: Vec<&str> = url.path_segments()?.collect();
        // One trailing slash is ignored.
        if segments.len() > 1 && segments.last() == Some(&"") {
            segments.pop();
        }

        match segments.as_slice() {
            [""] => Some(Route::Home),
            ["browse"] => Some(Route::Browse(BrowseParams::from_query(
                url.query().unwrap_or(""),
            ))),
            ["celebrity", id] if !id.is_empty() => Some(Route::Celebrity(decode_segment(id)?)),
            ["request", id] if !id.is_empty() => Some(Route::RequestVideo(decode_segment(id)?)),
            ["dashboard"] => Some(Route::Dashboard),
            _ => None,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Browse(params) => params.to_path(),
            Route::Celebrity(id) => format!("/celebrity/{}", urlencoding::encode(id)),
            Route::RequestVideo(id) => format!("/request/{}", urlencoding::encode(id)),
            Route::Dashboard => "/dashboard".to_string(),
        }
    }
}

/// Path parameters arrive percent-encoded; ids that are not valid UTF-8 once
/// decoded match no route.
fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|id| id.into_owned())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
