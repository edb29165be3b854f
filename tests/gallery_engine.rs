//! End-to-end checks of the gallery engine through the public crate APIs:
//! hierarchy, password inheritance, unlock tokens, and the view boundary.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use atelier_auth::protection::{effective_password, effective_password_for_post};
use atelier_auth::{JwtEncoder, PasswordHasher, ProtectionIndex, UnlockGrant, UnlockTokens};
use atelier_core::config::AuthConfig;
use atelier_entity::ArtworkPost;
use atelier_entity::gallery::{
    Gallery, build_gallery_tree, flatten_gallery_tree, gallery_path, plan_cascade_delete,
    sort_galleries, would_create_circular_reference,
};
use atelier_service::{ArtworkView, GalleryView, Viewer};

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn gallery(n: u128, name: &str, parent: Option<u128>, password: Option<&str>) -> Gallery {
    let created = Utc::now() - Duration::minutes(n as i64);
    Gallery {
        id: id(n),
        name: name.to_string(),
        parent_id: parent.map(id),
        password_hash: password.map(str::to_string),
        cover_image_url: None,
        display_order: None,
        created_at: created,
        updated_at: created,
    }
}

fn post(n: u128, gallery_id: Option<u128>, password: Option<&str>) -> ArtworkPost {
    ArtworkPost {
        id: id(n),
        title: format!("Artwork {n}"),
        description: Some("<p>Oil on canvas</p>".to_string()),
        price: Some(1200.0),
        gallery_id: gallery_id.map(id),
        password_hash: password.map(str::to_string),
        is_pinned: false,
        display_order: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A("secret") > B > C, plus an unprotected sibling root D.
fn chain() -> Vec<Gallery> {
    vec![
        gallery(1, "A", None, Some("secret")),
        gallery(2, "B", Some(1), None),
        gallery(3, "C", Some(2), None),
        gallery(4, "D", None, None),
    ]
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "engine-test-secret".to_string(),
        ..AuthConfig::default()
    }
}

#[test]
fn test_inheritance_and_cycles_on_reference_chain() {
    let all = chain();

    assert_eq!(effective_password(&all[2], &all), Some("secret"));
    assert_eq!(effective_password(&all[3], &all), None);
    assert!(would_create_circular_reference(id(1), Some(id(3)), &all));
    assert!(!would_create_circular_reference(id(3), Some(id(1)), &all));
    assert_eq!(gallery_path(&all[2], &all), "A > B > C");
}

#[test]
fn test_nearest_ancestor_password_wins() {
    let mut all = chain();
    all[1].password_hash = Some("inner".to_string());
    // Legacy empty string counts as no password.
    all[2].password_hash = Some(String::new());

    assert_eq!(effective_password(&all[2], &all), Some("inner"));
    let index = ProtectionIndex::new(&all);
    assert_eq!(index.password_source(&all[2]), Some(id(2)));
    assert_eq!(index.password_source(&all[0]), Some(id(1)));
}

#[test]
fn test_post_inherits_unless_it_has_its_own_password() {
    let all = chain();
    let inherited = post(10, Some(3), None);
    let own = post(11, Some(4), Some("mine"));
    let unfiled = post(12, None, None);

    assert_eq!(effective_password_for_post(&inherited, &all), Some("secret"));
    assert_eq!(effective_password_for_post(&own, &all), Some("mine"));
    assert_eq!(effective_password_for_post(&unfiled, &all), None);
}

#[test]
fn test_hashed_password_verifies_through_inheritance() {
    let hasher = PasswordHasher::new();
    let mut all = chain();
    all[0].password_hash = hasher.hash_optional(Some("  secret  ")).unwrap();

    let credential = effective_password(&all[2], &all).unwrap();
    assert!(hasher.verify_password("secret", credential).unwrap());
    assert!(!hasher.verify_password("Secret", credential).unwrap());
    assert!(hasher.hash_optional(Some("   ")).unwrap().is_none());
}

#[test]
fn test_unlock_token_round_trip_unlocks_descendants() {
    let all = chain();
    let tokens = UnlockTokens::new(&auth_config());

    let mut grant = UnlockGrant::default();
    grant.unlock_gallery(id(1));
    let (token, expires_at) = tokens.issue(&grant).unwrap();
    assert!(expires_at > Utc::now());

    let presented = tokens.verify(&token);
    let index = ProtectionIndex::new(&all);
    assert!(index.is_gallery_unlocked(&all[2], &presented));
    assert!(index.is_gallery_unlocked(&all[3], &UnlockGrant::default()));
    assert!(!index.is_gallery_unlocked(&all[2], &UnlockGrant::default()));
}

#[test]
fn test_descendant_with_own_password_needs_its_own_unlock() {
    let mut all = chain();
    all[2].password_hash = Some("deeper".to_string());
    let index = ProtectionIndex::new(&all);

    let mut grant = UnlockGrant::default();
    grant.unlock_gallery(id(1));
    assert!(index.is_gallery_unlocked(&all[1], &grant));
    assert!(!index.is_gallery_unlocked(&all[2], &grant));

    let guarded = post(20, Some(2), Some("own"));
    assert!(!index.is_post_unlocked(&guarded, &grant));
    grant.unlock_post(id(20));
    assert!(index.is_post_unlocked(&guarded, &grant));
}

#[test]
fn test_foreign_tokens_grant_nothing() {
    let tokens = UnlockTokens::new(&auth_config());
    assert!(tokens.verify("garbage").is_empty());

    let (admin_token, _) = JwtEncoder::new(&auth_config())
        .generate_access_token("admin")
        .unwrap();
    assert!(tokens.verify(&admin_token).is_empty());

    let other = UnlockTokens::new(&AuthConfig {
        jwt_secret: "someone-else".to_string(),
        ..AuthConfig::default()
    });
    let mut grant = UnlockGrant::default();
    grant.unlock_gallery(id(1));
    let (forged, _) = other.issue(&grant).unwrap();
    assert!(tokens.verify(&forged).is_empty());
}

#[test]
fn test_cascade_plan_and_flatten_invariants() {
    let mut all = chain();
    all.push(gallery(5, "E", Some(1), None));
    all.push(gallery(6, "Orphan", Some(99), None));
    sort_galleries(&mut all);

    let plan = plan_cascade_delete(id(1), &all);
    assert_eq!(plan, vec![id(3), id(2), id(5)]);

    let flat = flatten_gallery_tree(&build_gallery_tree(&all));
    assert_eq!(flat.len(), all.len());
    let position = |g: Uuid| flat.iter().position(|f| f.id == g).unwrap();
    assert!(position(id(1)) < position(id(2)));
    assert!(position(id(2)) < position(id(3)));
    assert_eq!(flat[position(id(6))].indent, 0);
}

#[test]
fn test_views_never_expose_passwords_and_withhold_locked_content() {
    let all = chain();
    let index = ProtectionIndex::new(&all);
    let grant = UnlockGrant::default();
    let previews = HashMap::from([(id(3), "/media/c.jpg".to_string())]);

    let view = GalleryView::build(&all[2], &index, Viewer::Visitor(&grant), &previews);
    assert!(view.locked);
    assert!(view.password_protected);
    assert!(!view.has_own_password);
    assert!(view.preview_image_url.is_none());

    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(!json.to_string().contains("secret"));

    let admin = GalleryView::build(&all[2], &index, Viewer::Admin, &previews);
    assert!(!admin.locked);
    assert_eq!(admin.preview_image_url.as_deref(), Some("/media/c.jpg"));

    let artwork = ArtworkView::build(
        &post(30, Some(3), None),
        Vec::new(),
        &index,
        Viewer::Visitor(&grant),
    );
    assert!(artwork.locked);
    assert!(artwork.description.is_none());
    assert_eq!(artwork.price, Some(1200.0));
    let json = serde_json::to_value(&artwork).unwrap();
    assert!(json.get("password_hash").is_none());
}
