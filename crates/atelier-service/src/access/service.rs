//! Verifies submitted passwords and extends the visitor's unlock grant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use atelier_auth::password::PasswordHasher;
use atelier_auth::protection::ProtectionIndex;
use atelier_auth::unlock::{UnlockGrant, UnlockTokens};
use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_database::repositories::{ArtworkRepository, GalleryRepository};
use atelier_entity::artwork::ArtworkPost;
use atelier_entity::gallery::Gallery;
use atelier_entity::password::Protected;

/// Result of a password check.
///
/// A wrong password is a normal outcome (`is_valid: false`), not an error.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    /// Whether the password matched the effective credential.
    pub is_valid: bool,
    /// Token covering everything unlocked so far, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_token: Option<String>,
    /// When the token expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl VerifyOutcome {
    fn rejected() -> Self {
        Self {
            is_valid: false,
            unlock_token: None,
            expires_at: None,
        }
    }
}

/// What a successful check unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Nothing,
    Gallery(Uuid),
    Post(Uuid),
}

/// The stored credential governing a gallery, and what matching it unlocks.
fn gallery_credential<'a>(
    gallery: &'a Gallery,
    index: &ProtectionIndex<'a>,
) -> Option<(&'a str, Target)> {
    let source = index.governing(gallery)?;
    let hash = source.own_password()?;
    Some((hash, Target::Gallery(source.id)))
}

/// The stored credential governing an artwork: its own, else its gallery's.
fn post_credential<'a>(
    post: &'a ArtworkPost,
    index: &ProtectionIndex<'a>,
) -> Option<(&'a str, Target)> {
    if let Some(own) = post.own_password() {
        return Some((own, Target::Post(post.id)));
    }
    let gallery = post.gallery_id.and_then(|id| index.gallery(id))?;
    gallery_credential(gallery, index)
}

/// Checks passwords for galleries and artworks.
#[derive(Debug, Clone)]
pub struct AccessService {
    gallery_repo: Arc<GalleryRepository>,
    artwork_repo: Arc<ArtworkRepository>,
    hasher: PasswordHasher,
    tokens: UnlockTokens,
}

impl AccessService {
    /// Create a new access service.
    pub fn new(
        gallery_repo: Arc<GalleryRepository>,
        artwork_repo: Arc<ArtworkRepository>,
        tokens: UnlockTokens,
    ) -> Self {
        Self {
            gallery_repo,
            artwork_repo,
            hasher: PasswordHasher::new(),
            tokens,
        }
    }

    /// Decode a presented unlock token; invalid tokens grant nothing.
    pub fn grant_from_token(&self, token: Option<&str>) -> UnlockGrant {
        token.map(|t| self.tokens.verify(t)).unwrap_or_default()
    }

    /// Check a password against a gallery's effective password.
    pub async fn verify_gallery(
        &self,
        gallery_id: Uuid,
        password: &str,
        grant: UnlockGrant,
    ) -> AppResult<VerifyOutcome> {
        let all = self.gallery_repo.find_all().await?;
        let gallery = all
            .iter()
            .find(|g| g.id == gallery_id)
            .ok_or_else(|| AppError::not_found(format!("Gallery {gallery_id} not found")))?;
        let index = ProtectionIndex::new(&all);

        let credential = gallery_credential(gallery, &index);
        self.check(password, credential, grant)
    }

    /// Check a password against an artwork's effective password.
    pub async fn verify_post(
        &self,
        artwork_id: Uuid,
        password: &str,
        grant: UnlockGrant,
    ) -> AppResult<VerifyOutcome> {
        let post = self
            .artwork_repo
            .find_by_id(artwork_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Artwork {artwork_id} not found")))?;
        let all = self.gallery_repo.find_all().await?;
        let index = ProtectionIndex::new(&all);

        let credential = post_credential(&post, &index);
        self.check(password, credential, grant)
    }

    fn check(
        &self,
        password: &str,
        credential: Option<(&str, Target)>,
        mut grant: UnlockGrant,
    ) -> AppResult<VerifyOutcome> {
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let target = match credential {
            None => Target::Nothing,
            Some((hash, target)) => {
                if !self.hasher.verify_password(password, hash)? {
                    debug!(unlocks = ?target, "Password rejected");
                    return Ok(VerifyOutcome::rejected());
                }
                target
            }
        };

        match target {
            Target::Gallery(id) => {
                grant.unlock_gallery(id);
                info!(gallery_id = %id, "Gallery unlocked");
            }
            Target::Post(id) => {
                grant.unlock_post(id);
                info!(artwork_id = %id, "Artwork unlocked");
            }
            Target::Nothing => {}
        }

        let (token, expires_at) = self.tokens.issue(&grant)?;
        Ok(VerifyOutcome {
            is_valid: true,
            unlock_token: Some(token),
            expires_at: Some(expires_at),
        })
    }
}
