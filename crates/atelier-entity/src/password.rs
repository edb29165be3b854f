//! Password field normalization shared by galleries and artworks.

/// An entity that may carry its own access password.
pub trait Protected {
    /// The stored password credential, if one is set.
    ///
    /// Empty strings are reported as `None`; legacy rows written before
    /// normalization must not count as protected.
    fn own_password(&self) -> Option<&str>;

    /// Whether the entity defines a password of its own (as opposed to
    /// inheriting one from an ancestor gallery).
    fn has_own_password(&self) -> bool {
        self.own_password().is_some()
    }
}

/// Treat an optional stored password as set only when non-empty.
pub fn non_empty(password: Option<&String>) -> Option<&str> {
    password.map(String::as_str).filter(|p| !p.is_empty())
}

/// Normalize a submitted password: trim surrounding whitespace and map
/// the empty string to `None` ("no password").
pub fn normalize_password(password: Option<&str>) -> Option<String> {
    password
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}
