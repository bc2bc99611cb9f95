use std::fmt;

use url::{form_urlencoded, Url};

use super::{CacheError, Result};

/// Path segment that introduces a camp-scoped resource.
const CAMPS_SEGMENT: &str = "camps";

/// Tag used in place of the token when the request is anonymous.
const NO_TOKEN_TAG: &str = "no-token";

/// Deterministic fingerprint of a cacheable request.
///
/// Renders as `"<METHOD>:<path>:<sorted-query>:<token-tag>"` where the token
/// tag is `token:<value>` or `no-token`. Two requests with the same method,
/// path, query pairs and token always produce equal keys; different tokens
/// never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: String,
    path: String,
    query: String,
    token_tag: String,
}

impl CacheKey {
    /// The upper-cased HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The URL path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query string with pairs sorted by name, then value.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns true if the key's path contains `/{entity_type}`.
    ///
    /// Prefix matches count: `campers` also covers `/campers-archive`.
    pub fn matches_entity_type(&self, entity_type: &str) -> bool {
        !entity_type.is_empty() && self.path.contains(&format!("/{}", entity_type))
    }

    /// The camp-scoped entity type this key belongs to, if any.
    pub fn entity_type(&self) -> Option<&str> {
        entity_type_from_path(&self.path)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.method, self.path, self.query, self.token_tag
        )
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}

/// Computes the cache key for a request.
///
/// The URL must be absolute. Query pairs are sorted so that parameter order
/// does not matter, and the token is embedded so that cached payloads are
/// never shared between principals.
///
/// # Examples
///
/// ```
/// use campsync_core::cache::compute_key;
///
/// let key = compute_key("get", "http://api.test/camps/1/campers?b=2&a=1", Some("abc")).unwrap();
/// assert_eq!(key.to_string(), "GET:/camps/1/campers:a=1&b=2:token:abc");
///
/// let anonymous = compute_key("GET", "http://api.test/camps/1/campers", None).unwrap();
/// assert_eq!(anonymous.to_string(), "GET:/camps/1/campers::no-token");
///
/// assert!(compute_key("GET", "/camps/1/campers", None).is_err());
/// ```
pub fn compute_key(method: &str, url: &str, token: Option<&str>) -> Result<CacheKey> {
    let parsed = Url::parse(url).map_err(|e| CacheError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    pairs.sort();
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    let token_tag = match token {
        Some(token) => format!("token:{}", token),
        None => NO_TOKEN_TAG.to_string(),
    };

    Ok(CacheKey {
        method: method.to_ascii_uppercase(),
        path: parsed.path().to_string(),
        query,
        token_tag,
    })
}

/// Extracts the entity type from a URL path of the form
/// `/camps/{id}/{entity}[/...]`.
///
/// Returns `None` for paths without a camp-scoped entity segment
/// (including `/camps/{id}` on its own).
///
/// # Examples
///
/// ```
/// use campsync_core::cache::entity_type_from_path;
///
/// assert_eq!(entity_type_from_path("/api/camps/123/campers"), Some("campers"));
/// assert_eq!(entity_type_from_path("/api/camps/123/groups/456"), Some("groups"));
/// assert_eq!(entity_type_from_path("/api/camps/123"), None);
/// assert_eq!(entity_type_from_path("/api/users"), None);
/// ```
pub fn entity_type_from_path(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .windows(3)
        .find(|w| w[0] == CAMPS_SEGMENT && !w[1].is_empty() && !w[2].is_empty())
        .map(|w| w[2])
}

/// Extracts the entity type from an absolute URL.
///
/// Malformed URLs are logged and yield `None`, which callers treat as
/// "not cacheable".
///
/// # Examples
///
/// ```
/// use campsync_core::cache::entity_type_from_url;
///
/// assert_eq!(
///     entity_type_from_url("http://api.test/camps/123/staff-members"),
///     Some("staff-members".to_string())
/// );
/// assert_eq!(entity_type_from_url("not a url"), None);
/// ```
pub fn entity_type_from_url(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => entity_type_from_path(parsed.path()).map(str::to_string),
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "Failed to parse URL for entity type");
            None
        }
    }
}
