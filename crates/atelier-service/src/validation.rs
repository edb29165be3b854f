//! Input normalization and validation shared by the services.

use atelier_auth::password::PasswordHasher;
use atelier_core::error::AppError;
use atelier_entity::artwork::{MAX_ARTWORK_TITLE_LEN, NewArtworkImage};
use atelier_entity::gallery::MAX_GALLERY_NAME_LEN;

/// Trim a gallery name and check its length.
pub fn gallery_name(raw: &str) -> Result<String, AppError> {
    bounded_text(raw, MAX_GALLERY_NAME_LEN, "Gallery name")
}

/// Trim an artwork title and check its length.
pub fn artwork_title(raw: &str) -> Result<String, AppError> {
    bounded_text(raw, MAX_ARTWORK_TITLE_LEN, "Title")
}

fn bounded_text(raw: &str, max: usize, field: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject negative or non-finite prices.
pub fn price(value: Option<f64>) -> Result<Option<f64>, AppError> {
    match value {
        Some(p) if !p.is_finite() || p < 0.0 => {
            Err(AppError::validation("Price must be a non-negative number"))
        }
        other => Ok(other),
    }
}

/// Trim optional free text; blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim image URLs and reject blank ones.
pub fn images(images: Vec<NewArtworkImage>) -> Result<Vec<NewArtworkImage>, AppError> {
    images
        .into_iter()
        .map(|image| {
            let url = image.image_url.trim();
            if url.is_empty() {
                return Err(AppError::validation("Image URL cannot be empty"));
            }
            Ok(NewArtworkImage {
                image_url: url.to_string(),
                display_order: image.display_order,
            })
        })
        .collect()
}

/// What a write does to an entity's own password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordChange {
    /// Leave the stored hash as it is.
    Keep,
    /// Remove the entity's own password.
    Clear,
    /// Replace it with the hash of this (trimmed) password.
    Set(String),
}

impl PasswordChange {
    /// Interpret a submitted field: absent keeps, blank clears, anything
    /// else sets.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None => Self::Keep,
            Some("") => Self::Clear,
            Some(p) => Self::Set(p.to_string()),
        }
    }

    /// Produce the hash to store, given the currently stored one.
    pub fn apply(
        self,
        current: Option<String>,
        hasher: &PasswordHasher,
    ) -> Result<Option<String>, AppError> {
        match self {
            Self::Keep => Ok(current.filter(|h| !h.is_empty())),
            Self::Clear => Ok(None),
            Self::Set(password) => hasher.hash_password(&password).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::error::ErrorKind;

    #[test]
    fn test_gallery_name_bounds() {
        assert_eq!(gallery_name("  Oils  ").unwrap(), "Oils");
        assert_eq!(gallery_name("   ").unwrap_err().kind, ErrorKind::Validation);
        assert!(gallery_name(&"é".repeat(200)).is_ok());
        assert!(gallery_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price(None).unwrap(), None);
        assert_eq!(price(Some(0.0)).unwrap(), Some(0.0));
        assert!(price(Some(-1.0)).is_err());
        assert!(price(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_blank_image_url_rejected() {
        let input = vec![NewArtworkImage {
            image_url: "  ".to_string(),
            display_order: None,
        }];
        assert!(images(input).is_err());
    }

    #[test]
    fn test_password_change_from_input() {
        assert_eq!(PasswordChange::from_input(None), PasswordChange::Keep);
        assert_eq!(PasswordChange::from_input(Some(" ")), PasswordChange::Clear);
        assert_eq!(
            PasswordChange::from_input(Some(" pw ")),
            PasswordChange::Set("pw".to_string())
        );
    }

    #[test]
    fn test_password_change_apply() {
        let hasher = PasswordHasher::new();
        let current = Some("$argon2id$existing".to_string());
        assert_eq!(
            PasswordChange::Keep.apply(current.clone(), &hasher).unwrap(),
            current
        );
        assert_eq!(PasswordChange::Keep.apply(Some(String::new()), &hasher).unwrap(), None);
        assert_eq!(PasswordChange::Clear.apply(current, &hasher).unwrap(), None);

        let stored = PasswordChange::Set("pw".to_string())
            .apply(None, &hasher)
            .unwrap()
            .unwrap();
        assert!(hasher.verify_password("pw", &stored).unwrap());
    }
}
