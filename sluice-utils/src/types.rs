// Wrapper types making it harder to accidentaly use the wrong underlying type.

use std::{
    borrow::Cow,
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

/// A namespaced key such as `minecraft:water`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The namespace, `minecraft` for vanilla content.
    pub namespace: Cow<'static, str>,
    /// The path inside the namespace.
    pub path: Cow<'static, str>,
}

/// Why a string could not be parsed into an [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The string was not of the form `namespace:path`.
    #[error("invalid identifier: {0}")]
    Malformed(String),
    /// The namespace contains characters outside `[a-z0-9_.-]`.
    #[error("invalid namespace: {0}")]
    Namespace(String),
    /// The path contains characters outside `[a-z0-9_./-]`.
    #[error("invalid path: {0}")]
    Path(String),
}

impl Identifier {
    /// The namespace used by vanilla content.
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";

    /// Creates an identifier in the vanilla namespace.
    #[must_use]
    pub fn vanilla(path: String) -> Self {
        Identifier {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Owned(path),
        }
    }

    /// Creates an identifier in the vanilla namespace from a static path.
    #[must_use]
    pub const fn vanilla_static(path: &'static str) -> Self {
        Identifier {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// Returns true if the character may appear in a namespace.
    #[must_use]
    pub fn valid_namespace_char(namespace_char: char) -> bool {
        namespace_char == '_'
            || namespace_char == '-'
            || namespace_char.is_ascii_lowercase()
            || namespace_char.is_ascii_digit()
            || namespace_char == '.'
    }

    /// Returns true if the character may appear in a path.
    #[must_use]
    pub fn valid_path_char(path_char: char) -> bool {
        Self::valid_namespace_char(path_char) || path_char == '/'
    }

    /// Returns true if the whole namespace is valid.
    #[must_use]
    pub fn validate_namespace(namespace: &str) -> bool {
        !namespace.is_empty() && namespace.chars().all(Self::valid_namespace_char)
    }

    /// Returns true if the whole path is valid.
    #[must_use]
    pub fn validate_path(path: &str) -> bool {
        !path.is_empty() && path.chars().all(Self::valid_path_char)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    /// Parses `namespace:path`. A bare path is taken to be in the vanilla namespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (Self::VANILLA_NAMESPACE, s),
        };

        if path.contains(':') {
            return Err(IdentifierError::Malformed(s.to_string()));
        }
        if !Self::validate_namespace(namespace) {
            return Err(IdentifierError::Namespace(namespace.to_string()));
        }
        if !Self::validate_path(path) {
            return Err(IdentifierError::Path(path.to_string()));
        }

        Ok(Identifier {
            namespace: Cow::Owned(namespace.to_string()),
            path: Cow::Owned(path.to_string()),
        })
    }
}
