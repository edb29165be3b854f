//! Gallery tree structures: building a forest from the flat table and
//! flattening it back into an indented picker list.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Gallery;

/// Separator between gallery names in a human-readable path.
pub const PATH_SEPARATOR: &str = " > ";

/// Marker placed before nested names in picker lists.
const NESTED_MARKER: &str = "└─ ";

/// A node in a gallery tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryNode<T = Gallery> {
    /// The gallery at this node.
    #[serde(flatten)]
    pub gallery: T,
    /// Child gallery nodes, in input order.
    pub children: Vec<GalleryNode<T>>,
}

impl<T> GalleryNode<T> {
    /// Transform every gallery in this subtree, preserving shape and order.
    pub fn map<U, F: FnMut(T) -> U>(self, f: &mut F) -> GalleryNode<U> {
        let gallery = f(self.gallery);
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            children.push(child.map(f));
        }
        GalleryNode { gallery, children }
    }

    /// Number of galleries in this subtree, including this node.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(GalleryNode::size).sum::<usize>()
    }
}

/// One entry of a flattened tree, ready for a `<select>`-style picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatGallery {
    /// Gallery ID.
    pub id: Uuid,
    /// Parent gallery ID as stored.
    pub parent_id: Option<Uuid>,
    /// Bare gallery name.
    pub name: String,
    /// Depth in the tree (0 for roots).
    pub indent: usize,
    /// Name with visual nesting applied.
    pub display_name: String,
    /// Root-first names joined by `" > "`, including this gallery.
    pub full_path: String,
}

/// Build a forest from a flat list of galleries.
///
/// A gallery is a root when it has no parent or when its `parent_id`
/// does not resolve to any gallery in the input. Siblings keep their input
/// order, so callers sort before building. Galleries caught in a stored
/// parent cycle cannot be reached from any root; they are promoted to
/// roots so that nothing is dropped.
pub fn build_gallery_tree(galleries: &[Gallery]) -> Vec<GalleryNode> {
    let known: HashSet<Uuid> = galleries.iter().map(|g| g.id).collect();

    let mut children_of: HashMap<Uuid, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (idx, gallery) in galleries.iter().enumerate() {
        match gallery.parent_id {
            Some(parent_id) if known.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(idx);
            }
            _ => roots.push(idx),
        }
    }

    let mut placed = vec![false; galleries.len()];
    let mut forest: Vec<GalleryNode> = roots
        .into_iter()
        .map(|idx| build_node(idx, galleries, &children_of, &mut placed))
        .collect();

    for idx in 0..galleries.len() {
        if !placed[idx] {
            forest.push(build_node(idx, galleries, &children_of, &mut placed));
        }
    }

    forest
}

fn build_node(
    idx: usize,
    galleries: &[Gallery],
    children_of: &HashMap<Uuid, Vec<usize>>,
    placed: &mut [bool],
) -> GalleryNode {
    placed[idx] = true;
    let gallery = &galleries[idx];

    let mut children = Vec::new();
    if let Some(kids) = children_of.get(&gallery.id) {
        for &kid in kids {
            if !placed[kid] {
                children.push(build_node(kid, galleries, children_of, placed));
            }
        }
    }

    GalleryNode {
        gallery: gallery.clone(),
        children,
    }
}

/// Flatten a forest into a pre-order list with indentation and full paths.
pub fn flatten_gallery_tree(forest: &[GalleryNode]) -> Vec<FlatGallery> {
    let mut out = Vec::new();
    let mut trail = Vec::new();
    for node in forest {
        flatten_node(node, 0, &mut trail, &mut out);
    }
    out
}

fn flatten_node<'a>(
    node: &'a GalleryNode,
    indent: usize,
    trail: &mut Vec<&'a str>,
    out: &mut Vec<FlatGallery>,
) {
    let name = node.gallery.name.as_str();
    trail.push(name);

    let display_name = if indent > 0 {
        format!("{}{}{}", "  ".repeat(indent), NESTED_MARKER, name)
    } else {
        name.to_string()
    };

    out.push(FlatGallery {
        id: node.gallery.id,
        parent_id: node.gallery.parent_id,
        name: name.to_string(),
        indent,
        display_name,
        full_path: trail.join(PATH_SEPARATOR),
    });

    for child in &node.children {
        flatten_node(child, indent + 1, trail, out);
    }

    trail.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn gallery(id: u128, name: &str, parent: Option<u128>) -> Gallery {
        Gallery {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            parent_id: parent.map(Uuid::from_u128),
            password_hash: None,
            cover_image_url: None,
            display_order: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_nests_children_in_input_order() {
        let all = vec![
            gallery(1, "Paintings", None),
            gallery(2, "Oils", Some(1)),
            gallery(3, "Sculpture", None),
            gallery(4, "Watercolours", Some(1)),
            gallery(5, "Landscapes", Some(2)),
        ];
        let forest = build_gallery_tree(&all);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].gallery.name, "Paintings");
        let kids: Vec<&str> = forest[0]
            .children
            .iter()
            .map(|c| c.gallery.name.as_str())
            .collect();
        assert_eq!(kids, vec!["Oils", "Watercolours"]);
        assert_eq!(forest[0].children[0].children[0].gallery.name, "Landscapes");
        assert_eq!(forest[0].size(), 4);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let all = vec![gallery(1, "Orphan", Some(99)), gallery(2, "Root", None)];
        let forest = build_gallery_tree(&all);
        let roots: Vec<&str> = forest.iter().map(|n| n.gallery.name.as_str()).collect();
        assert_eq!(roots, vec!["Orphan", "Root"]);
    }

    #[test]
    fn test_stored_cycle_does_not_lose_galleries() {
        let all = vec![
            gallery(1, "A", Some(2)),
            gallery(2, "B", Some(1)),
            gallery(3, "Self", Some(3)),
        ];
        let forest = build_gallery_tree(&all);
        let total: usize = forest.iter().map(GalleryNode::size).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_flatten_display_names_and_paths() {
        let all = vec![
            gallery(1, "Paintings", None),
            gallery(2, "Oils", Some(1)),
            gallery(3, "Landscapes", Some(2)),
        ];
        let flat = flatten_gallery_tree(&build_gallery_tree(&all));

        assert_eq!(flat[0].display_name, "Paintings");
        assert_eq!(flat[0].indent, 0);
        assert_eq!(flat[1].display_name, "  └─ Oils");
        assert_eq!(flat[2].display_name, "    └─ Landscapes");
        assert_eq!(flat[2].indent, 2);
        assert_eq!(flat[2].full_path, "Paintings > Oils > Landscapes");
    }

    #[test]
    fn test_flatten_keeps_every_id_once_with_parent_first() {
        let all = vec![
            gallery(5, "E", Some(4)),
            gallery(4, "D", Some(1)),
            gallery(1, "A", None),
            gallery(2, "B", Some(1)),
            gallery(3, "C", Some(42)),
        ];
        let flat = flatten_gallery_tree(&build_gallery_tree(&all));

        let mut ids: Vec<Uuid> = flat.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), all.len());
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());

        let position = |id: Uuid| flat.iter().position(|f| f.id == id).unwrap();
        for entry in &flat {
            if let Some(parent) = entry.parent_id {
                if flat.iter().any(|f| f.id == parent) {
                    assert!(position(parent) < position(entry.id));
                }
            }
        }
    }

    #[test]
    fn test_map_preserves_shape() {
        let all = vec![gallery(1, "A", None), gallery(2, "B", Some(1))];
        let forest = build_gallery_tree(&all);
        let names: Vec<GalleryNode<String>> = forest
            .into_iter()
            .map(|n| n.map(&mut |g: Gallery| g.name))
            .collect();
        assert_eq!(names[0].gallery, "A");
        assert_eq!(names[0].children[0].gallery, "B");
    }
}
