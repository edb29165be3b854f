//! Ancestor walks, cycle checks, and cascade-delete planning over a
//! snapshot of all galleries.
//!
//! Every walk tolerates a broken chain (a `parent_id` that resolves to
//! nothing) by stopping there, and stops on a revisited gallery so that
//! a cycle already present in stored data cannot hang a request.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::model::Gallery;
use super::tree::PATH_SEPARATOR;

fn index(all: &[Gallery]) -> HashMap<Uuid, &Gallery> {
    all.iter().map(|g| (g.id, g)).collect()
}

/// Walk upward from `start`'s parent, yielding each resolved ancestor,
/// nearest first.
fn walk_up<'a>(
    start: Option<Uuid>,
    origin: Uuid,
    by_id: &HashMap<Uuid, &'a Gallery>,
) -> Vec<&'a Gallery> {
    let mut chain = Vec::new();
    let mut seen = HashSet::from([origin]);
    let mut cursor = start;

    while let Some(id) = cursor {
        if !seen.insert(id) {
            break;
        }
        let Some(gallery) = by_id.get(&id) else {
            break;
        };
        chain.push(*gallery);
        cursor = gallery.parent_id;
    }

    chain
}

/// IDs of every ancestor of `gallery_id`, nearest first.
///
/// The walk starts at the gallery's parent, not the gallery itself. An
/// unknown `gallery_id` has no ancestors.
pub fn ancestor_ids(gallery_id: Uuid, all: &[Gallery]) -> Vec<Uuid> {
    let by_id = index(all);
    let parent = by_id.get(&gallery_id).and_then(|g| g.parent_id);
    walk_up(parent, gallery_id, &by_id)
        .into_iter()
        .map(|g| g.id)
        .collect()
}

/// Ancestor galleries of `gallery`, root first (breadcrumb order).
pub fn ancestors<'a>(gallery: &Gallery, all: &'a [Gallery]) -> Vec<&'a Gallery> {
    let by_id = index(all);
    let mut chain = walk_up(gallery.parent_id, gallery.id, &by_id);
    chain.reverse();
    chain
}

/// Human-readable path of a gallery: root-first names joined by `" > "`,
/// ending with the gallery's own name.
pub fn gallery_path(gallery: &Gallery, all: &[Gallery]) -> String {
    let mut names: Vec<&str> = ancestors(gallery, all)
        .into_iter()
        .map(|g| g.name.as_str())
        .collect();
    names.push(gallery.name.as_str());
    names.join(PATH_SEPARATOR)
}

/// Whether making `new_parent_id` the parent of `gallery_id` would create
/// a cycle.
///
/// Detaching (`None`) is always safe and self-parenting never is.
/// Otherwise the move is circular exactly when the gallery being moved
/// is already an ancestor of the candidate parent.
pub fn would_create_circular_reference(
    gallery_id: Uuid,
    new_parent_id: Option<Uuid>,
    all: &[Gallery],
) -> bool {
    let Some(new_parent_id) = new_parent_id else {
        return false;
    };
    if gallery_id == new_parent_id {
        return true;
    }
    ancestor_ids(new_parent_id, all).contains(&gallery_id)
}

/// Every descendant of `gallery_id`, ordered so that deleting in sequence
/// never removes a parent before its children.
///
/// For each direct child, the child's own descendants come first
/// (recursively), then the child. The target itself is not included.
pub fn plan_cascade_delete(gallery_id: Uuid, all: &[Gallery]) -> Vec<Uuid> {
    let mut children_of: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for gallery in all {
        if let Some(parent_id) = gallery.parent_id {
            children_of.entry(parent_id).or_default().push(gallery.id);
        }
    }

    let mut plan = Vec::new();
    let mut seen = HashSet::from([gallery_id]);
    collect_descendants(gallery_id, &children_of, &mut seen, &mut plan);
    plan
}

fn collect_descendants(
    parent_id: Uuid,
    children_of: &HashMap<Uuid, Vec<Uuid>>,
    seen: &mut HashSet<Uuid>,
    plan: &mut Vec<Uuid>,
) {
    let Some(children) = children_of.get(&parent_id) else {
        return;
    };
    for &child in children {
        if !seen.insert(child) {
            continue;
        }
        collect_descendants(child, children_of, seen, plan);
        plan.push(child);
    }
}
