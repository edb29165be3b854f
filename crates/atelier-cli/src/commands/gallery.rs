//! Gallery hierarchy inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use atelier_auth::ProtectionIndex;
use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_database::repositories::GalleryRepository;
use atelier_entity::gallery::{
    Gallery, build_gallery_tree, flatten_gallery_tree, gallery_path, sort_galleries,
};
use atelier_entity::Protected;

use crate::output::{self, OutputFormat};

/// Arguments for gallery commands
#[derive(Debug, Args)]
pub struct GalleryArgs {
    /// Gallery subcommand
    #[command(subcommand)]
    pub command: GalleryCommand,
}

/// Gallery subcommands
#[derive(Debug, Subcommand)]
pub enum GalleryCommand {
    /// Show the whole gallery tree
    Tree,
    /// Show the path of one gallery
    Path {
        /// Gallery ID
        id: Uuid,
    },
}

/// Gallery tree display row
#[derive(Debug, Serialize, Tabled)]
struct GalleryRow {
    /// Indented name
    #[tabled(rename = "gallery")]
    display_name: String,
    /// Gallery ID
    id: String,
    /// Password state
    protection: String,
    /// Full path
    path: String,
}

/// Password state of a gallery as shown in the tree.
fn protection_label<'a>(gallery: &'a Gallery, index: &ProtectionIndex<'a>) -> &'static str {
    if gallery.has_own_password() {
        "own"
    } else if index.password_source(gallery).is_some() {
        "inherited"
    } else {
        "-"
    }
}

fn tree_rows(mut galleries: Vec<Gallery>) -> Vec<GalleryRow> {
    sort_galleries(&mut galleries);
    let index = ProtectionIndex::new(&galleries);

    flatten_gallery_tree(&build_gallery_tree(&galleries))
        .into_iter()
        .map(|entry| {
            let protection = index
                .gallery(entry.id)
                .map(|g| protection_label(g, &index))
                .unwrap_or("-");
            GalleryRow {
                display_name: entry.display_name,
                id: entry.id.to_string(),
                protection: protection.to_string(),
                path: entry.full_path,
            }
        })
        .collect()
}

/// Execute gallery commands
pub async fn execute(
    args: &GalleryArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(&config).await?;
    let galleries = GalleryRepository::new(db.pool().clone()).find_all().await?;
    db.close().await;

    match &args.command {
        GalleryCommand::Tree => {
            output::print_list(&tree_rows(galleries), format);
        }
        GalleryCommand::Path { id } => {
            let gallery = galleries
                .iter()
                .find(|g| g.id == *id)
                .ok_or_else(|| AppError::not_found(format!("Gallery {id} not found")))?;
            output::print_value(&gallery_path(gallery, &galleries), format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(id: u128, name: &str, parent: Option<u128>, password: Option<&str>) -> Gallery {
        Gallery {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            parent_id: parent.map(Uuid::from_u128),
            password_hash: password.map(str::to_string),
            cover_image_url: None,
            display_order: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn test_tree_rows_mark_inherited_protection() {
        let rows = tree_rows(vec![
            gallery(3, "C", Some(2), None),
            gallery(1, "A", None, Some("$argon2id$stub")),
            gallery(2, "B", Some(1), None),
            gallery(4, "Open", None, None),
        ]);

        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.path.as_str(), r.protection.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", "own"),
                ("A > B", "inherited"),
                ("A > B > C", "inherited"),
                ("Open", "-"),
            ]
        );
        assert_eq!(rows[2].display_name, "    └─ C");
    }
}
