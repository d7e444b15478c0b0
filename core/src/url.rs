use serde::{Deserialize, Serialize};

/// Structured view of a navigation target.
///
/// `PageUrl` keeps the raw `href` alongside its parsed components so that
/// collaborators can compare pages at the granularity they need: the history
/// log compares paths, the prevent engine compares origins, transitions read
/// the whole thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageUrl {
    /// The address exactly as it was requested.
    pub href: String,
    /// Host name, empty for relative hrefs.
    pub host: String,
    /// Port, scheme-defaulted for absolute hrefs.
    pub port: Option<u16>,
    /// Path component, `/` when absent.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    pub hash: String,
}

impl PageUrl {
    pub fn parse(href: &str) -> Self {
        let mut rest = href;
        let mut host = String::new();
        let mut port = None;

        if let Some(idx) = rest.find("://") {
            let scheme = &rest[..idx];
            rest = &rest[idx + 3..];
            let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            let authority = &rest[..authority_end];
            rest = &rest[authority_end..];

            match authority.rsplit_once(':') {
                Some((h, p)) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                    host = h.to_string();
                    port = p.parse().ok();
                }
                _ => host = authority.to_string(),
            }
            if port.is_none() {
                port = default_port(scheme);
            }
        }

        let hash_at = rest.find('#');
        let hash = hash_at
            .map(|i| rest[i + 1..].to_string())
            .unwrap_or_default();
        let rest = &rest[..hash_at.unwrap_or(rest.len())];

        let query_at = rest.find('?');
        let query = query_at
            .map(|i| rest[i + 1..].to_string())
            .unwrap_or_default();
        let path = &rest[..query_at.unwrap_or(rest.len())];
        let path = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };

        Self {
            href: href.to_string(),
            host,
            port,
            path,
            query,
            hash,
        }
    }

    /// Path-only comparison, used for history replay.
    pub fn path_eq(&self, other: &PageUrl) -> bool {
        self.path == other.path
    }

    /// Same logical page: path and query match, fragment is ignored.
    pub fn same_page(&self, other: &PageUrl) -> bool {
        self.path == other.path && self.query == other.query
    }

    /// Loose origin check. A relative href (empty host) always belongs to
    /// the current origin.
    pub fn same_origin(&self, other: &PageUrl) -> bool {
        if self.host.is_empty() || other.host.is_empty() {
            return true;
        }
        if self.host != other.host {
            return false;
        }
        match (self.port, other.port) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.href.is_empty()
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}
