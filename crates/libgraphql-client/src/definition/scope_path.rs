use std::str::FromStr;
use thiserror::Error;

type Result<T> = std::result::Result<T, ScopePathError>;

const SCOPE_DELIMITER: &str = "::";
const LOCAL_NAME_DELIMITER: char = '.';

pub(crate) fn is_name_start(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic()
}

pub(crate) fn is_name_continue(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

/// Whether `text` is a valid GraphQL `Name`.
pub fn is_graphql_name(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) =>
            is_name_start(*first) && rest.iter().all(|b| is_name_continue(*b)),
        None => false,
    }
}

/// The ordered lexical scope under which a definition is declared (e.g. the
/// enclosing modules down to the binding that holds the source).
///
/// The path is the identity of a definition: its global name is derived from
/// the path alone (plus the definition's own name, if it has one).
///
/// ```
/// use libgraphql_client::ScopePath;
///
/// let path: ScopePath = "TestClient::Temp::UserDocument".parse().unwrap();
/// assert_eq!(
///     path.global_name("__", Some("getUser")),
///     "TestClient__Temp__UserDocument__getUser",
/// );
/// assert_eq!(path.global_name("__", None), "TestClient__Temp__UserDocument");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScopePath {
    segments: Vec<String>,
}
impl ScopePath {
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ScopePathError::EmptyScopePath);
        }
        if let Some(invalid) = segments.iter().find(|s| !is_graphql_name(s)) {
            return Err(ScopePathError::InvalidSegment {
                path: segments.join(SCOPE_DELIMITER),
                segment: invalid.to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// Produce the global name for a definition declared at this path.
    ///
    /// Anonymous definitions (`local_name == None`) take the joined path as
    /// their name; named definitions append their own name as a final
    /// segment.
    pub fn global_name(&self, separator: &str, local_name: Option<&str>) -> String {
        let mut name = self.segments.join(separator);
        if let Some(local_name) = local_name {
            name.push_str(separator);
            name.push_str(local_name);
        }
        name
    }

    /// A new path one scope deeper than this one.
    pub fn join(&self, segment: impl Into<String>) -> Result<Self> {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::new(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
impl FromStr for ScopePath {
    type Err = ScopePathError;

    fn from_str(text: &str) -> Result<Self> {
        Self::new(text.split(SCOPE_DELIMITER).map(str::trim))
    }
}
impl std::fmt::Display for ScopePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join(SCOPE_DELIMITER))
    }
}

/// A fragment reference written as a scope path inside a fragment spread:
/// `...App::Fragments::User` refers to the definition registered at that
/// path, and `...App::Fragments.userFields` refers to the `userFields`
/// fragment declared inside the source registered at `App::Fragments`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ScopeReference {
    pub(crate) local_name: Option<String>,
    pub(crate) path: ScopePath,
}
impl ScopeReference {
    pub fn global_name(&self, separator: &str) -> String {
        self.path.global_name(separator, self.local_name.as_deref())
    }

    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn path(&self) -> &ScopePath {
        &self.path
    }
}
impl FromStr for ScopeReference {
    type Err = ScopePathError;

    fn from_str(text: &str) -> Result<Self> {
        let (path_text, local_name) = match text.rsplit_once(LOCAL_NAME_DELIMITER) {
            Some((path_text, local_name)) => {
                if !is_graphql_name(local_name) {
                    return Err(ScopePathError::InvalidSegment {
                        path: text.to_string(),
                        segment: local_name.to_string(),
                    });
                }
                (path_text, Some(local_name.to_string()))
            },
            None => (text, None),
        };

        Ok(Self {
            local_name,
            path: path_text.parse()?,
        })
    }
}
impl std::fmt::Display for ScopeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.local_name {
            Some(local_name) => write!(f, "{}{LOCAL_NAME_DELIMITER}{local_name}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScopePathError {
    #[error("A scope path must contain at least one segment")]
    EmptyScopePath,

    #[error(
        "`{segment}` in scope path `{path}` is not a valid GraphQL name"
    )]
    InvalidSegment {
        path: String,
        segment: String,
    },
}
