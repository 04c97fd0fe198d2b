//! URL builders for the CMS routes.

use crate::config::NavigationConfig;
use crate::error::{NavigationError, NavigationResult};
use crate::paths::normalize;
use std::borrow::Cow;

/// Escapes `urlencoding` applies that URI components leave literal, plus `/` and `#`.
const KEPT_LITERAL: [(&str, &str); 7] = [
    ("%2F", "/"),
    ("%23", "#"),
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// URI-component encoding of the normalized path that keeps `/` and `#` literal.
pub fn encode_path(input: &str) -> String {
    KEPT_LITERAL
        .iter()
        .fold(urlencoding::encode(normalize(input)).into_owned(), |encoded, (escape, literal)| {
            encoded.replace(escape, literal)
        })
}

/// Stable identity of a side panel: `path[/entity_id]`, both normalized.
pub fn side_panel_key(path: &str, entity_id: Option<&str>) -> String {
    match entity_id {
        Some(id) => format!("{}/{}", normalize(path), normalize(id)),
        None => normalize(path).to_string(),
    }
}

/// Builds and parses CMS URLs for one [`NavigationConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationUrls {
    base_path: String,
    base_collection_path: String,
}

impl NavigationUrls {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            base_path: normalize(&config.base_path).to_string(),
            base_collection_path: normalize(&config.base_collection_path).to_string(),
        }
    }

    /// `/base`, or `/` when mounted at the root.
    pub fn home_url(&self) -> String {
        format!("/{}", self.base_path)
    }

    /// `/base/collections`, the prefix of every collection URL.
    pub fn full_collection_path(&self) -> String {
        if self.base_path.is_empty() {
            format!("/{}", self.base_collection_path)
        } else {
            format!("/{}/{}", self.base_path, self.base_collection_path)
        }
    }

    pub fn is_url_collection_path(&self, url: &str) -> bool {
        let prefix = format!("{}/", normalize(&self.full_collection_path()));
        normalize(&format!("{url}/")).starts_with(&prefix)
    }

    /// Data path addressed by a collection URL:
    /// `/base/c/products/123` gives `products/123`.
    pub fn url_path_to_data_path(&self, url: &str) -> NavigationResult<String> {
        let expected = self.full_collection_path();
        let rest = url
            .strip_prefix(&expected)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| NavigationError::PathPrefixMismatch {
                path: url.to_string(),
                expected: expected.clone(),
            })?;
        let rest = normalize(rest);
        let decoded = urlencoding::decode(rest).unwrap_or(Cow::Borrowed(rest));
        Ok(decoded.into_owned())
    }

    /// URL of the collection at `path`.
    pub fn build_url_collection_path(&self, path: &str) -> String {
        format!("{}/{}", self.full_collection_path(), encode_path(path))
    }

    /// URL of any CMS route under the base path.
    pub fn build_cms_url_path(&self, path: &str) -> String {
        if self.base_path.is_empty() {
            format!("/{}", encode_path(path))
        } else {
            format!("/{}/{}", self.base_path, encode_path(path))
        }
    }

    /// URL of the collection editor for `path`.
    pub fn build_url_edit_collection_path(&self, path: &str) -> String {
        self.build_cms_url_path(&format!("s/edit/{}", normalize(path)))
    }
}

impl Default for NavigationUrls {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}
