use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_SEPARATOR: &str = "__";
pub const DEFAULT_TYPENAME_KEY: &str = "__typename";

/// Controls what a fragment spread contributes to the accessor object built
/// for the selection set it appears in.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMode {
    /// The spread fragment's fields are merged into the enclosing accessor
    /// (when the fragment's type condition applies to the payload).
    #[default]
    Inline,

    /// The spread fragment's fields stay hidden. They only become reachable
    /// by casting the enclosing accessor to the spread fragment.
    Masked,
}

/// Settings shared by every component of a [`Client`](crate::Client).
///
/// All fields have defaults, so a partial config can be deserialized:
///
/// ```
/// use libgraphql_client::ClientConfig;
/// use libgraphql_client::SpreadMode;
///
/// let config: ClientConfig =
///     serde_json::from_str(r#"{ "spread_mode": "masked" }"#).unwrap();
/// assert_eq!(config.separator, "__");
/// assert_eq!(config.spread_mode, SpreadMode::Masked);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Joins scope-path segments (and the local name) into a global name.
    pub separator: String,

    /// Payload key carrying the concrete runtime type of an object.
    pub typename_key: String,

    pub spread_mode: SpreadMode,

    /// Expose `firstName` as `first_name` on accessor objects. Lookups by the
    /// raw response key keep working either way.
    pub snake_case_accessors: bool,
}
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            typename_key: DEFAULT_TYPENAME_KEY.to_string(),
            spread_mode: SpreadMode::default(),
            snake_case_accessors: true,
        }
    }
}
