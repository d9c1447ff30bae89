use serde::Deserialize;

use crate::filtering::PageMode;

/// Search defaults and limits.
///
/// Deserializes from any serde source; missing keys take the defaults.
///
/// ```rust,ignore
/// let config: SearchConfig = serde_json::from_str(r#"{"maxLimit": 200}"#)?;
/// assert_eq!(config.default_limit, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Page size used when the caller gives none.
    pub default_limit: u64,
    /// Largest page size a caller may ask for.
    pub max_limit: u64,
    /// Mode used when the caller does not choose one.
    pub default_mode: PageMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 1000,
            default_mode: PageMode::Exact,
        }
    }
}
