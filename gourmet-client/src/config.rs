//! Catalog configuration
//!
//! The namespace token and the read-only flag come from the current
//! page address, not from a config file: `?list=xxxx` selects the
//! catalog (absent means the default one) and `?view=public` turns the
//! session into a viewing-only one.

use url::Url;

use crate::error::CatalogResult;

/// Namespace used when the address carries no `list` token.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Query parameter naming the catalog namespace.
const LIST_PARAM: &str = "list";
/// Query parameter carrying the read-only flag.
const VIEW_PARAM: &str = "view";
/// The only `view` value that enables read-only mode.
const VIEW_PUBLIC: &str = "public";

/// Configuration for one catalog session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Which shared catalog to load
    pub namespace: String,
    /// Display convention only: mutations are refused client-side, the
    /// store itself enforces nothing
    pub read_only: bool,
}

impl CatalogConfig {
    /// Create a configuration for an editable catalog session
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            read_only: false,
        }
    }

    /// Mark the session read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Derive the configuration from a page address.
    ///
    /// An absent or empty `list` parameter selects [`DEFAULT_NAMESPACE`];
    /// any `view` value other than `public` leaves the session editable.
    pub fn from_url(address: &str) -> CatalogResult<Self> {
        let url = Url::parse(address)?;
        let mut namespace = None;
        let mut read_only = false;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                LIST_PARAM if !value.is_empty() => namespace = Some(value.into_owned()),
                VIEW_PARAM => read_only = value == VIEW_PUBLIC,
                _ => {}
            }
        }
        Ok(Self {
            namespace: namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            read_only,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_uses_defaults() {
        let config = CatalogConfig::from_url("https://example.com/").unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(!config.read_only);
    }

    #[test]
    fn list_param_selects_the_namespace() {
        let config = CatalogConfig::from_url("https://example.com/?list=team-tokyo").unwrap();
        assert_eq!(config.namespace, "team-tokyo");
    }

    #[test]
    fn view_public_enables_read_only() {
        let config =
            CatalogConfig::from_url("https://example.com/?list=a&view=public").unwrap();
        assert!(config.read_only);
    }

    #[test]
    fn other_view_values_stay_editable() {
        let config = CatalogConfig::from_url("https://example.com/?view=private").unwrap();
        assert!(!config.read_only);
    }

    #[test]
    fn empty_list_param_falls_back_to_default() {
        let config = CatalogConfig::from_url("https://example.com/?list=").unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn garbage_address_is_rejected() {
        assert!(CatalogConfig::from_url("not an address").is_err());
    }
}
