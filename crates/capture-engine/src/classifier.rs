//! Partitioning a snapshot into per-kind anchor groups.

use landon_anchor_model::{Anchor, AnchorKind, FaceAnchor, MeshAnchor, PlaneAnchor, SessionSnapshot};

/// Same-kind anchors borrowed from one snapshot, in snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorGroup<'a> {
    Mesh(Vec<&'a MeshAnchor>),
    Plane(Vec<&'a PlaneAnchor>),
    Face(Vec<&'a FaceAnchor>),
}

impl AnchorGroup<'_> {
    pub fn kind(&self) -> AnchorKind {
        match self {
            AnchorGroup::Mesh(_) => AnchorKind::Mesh,
            AnchorGroup::Plane(_) => AnchorKind::Plane,
            AnchorGroup::Face(_) => AnchorKind::Face,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnchorGroup::Mesh(a) => a.len(),
            AnchorGroup::Plane(a) => a.len(),
            AnchorGroup::Face(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A snapshot partitioned by anchor kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedAnchors<'a> {
    pub mesh: Vec<&'a MeshAnchor>,
    pub plane: Vec<&'a PlaneAnchor>,
    pub face: Vec<&'a FaceAnchor>,
}

impl<'a> ClassifiedAnchors<'a> {
    pub fn total(&self) -> usize {
        self.mesh.len() + self.plane.len() + self.face.len()
    }

    /// Non-empty groups in mesh, plane, face order.
    pub fn into_groups(self) -> Vec<AnchorGroup<'a>> {
        [
            AnchorGroup::Mesh(self.mesh),
            AnchorGroup::Plane(self.plane),
            AnchorGroup::Face(self.face),
        ]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect()
    }
}

/// Partition a snapshot's anchors by kind, keeping snapshot order.
pub fn classify(snapshot: &SessionSnapshot) -> ClassifiedAnchors<'_> {
    let mut classified = ClassifiedAnchors::default();
    for anchor in snapshot {
        match anchor {
            Anchor::Mesh(a) => classified.mesh.push(a),
            Anchor::Plane(a) => classified.plane.push(a),
            Anchor::Face(a) => classified.face.push(a),
        }
    }
    classified
}

/// The mesh anchor with the most faces. Ties go to the first one seen.
pub fn largest_mesh_anchor<'a>(anchors: &[&'a MeshAnchor]) -> Option<&'a MeshAnchor> {
    let mut largest: Option<&'a MeshAnchor> = None;
    for &anchor in anchors {
        match largest {
            Some(current) if anchor.face_count() <= current.face_count() => {}
            _ => largest = Some(anchor),
        }
    }
    largest
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use landon_anchor_model::{FaceGeometry, MeshGeometry, PlaneGeometry};
    use proptest::prelude::*;

    fn mesh(id: &str, faces: usize) -> MeshAnchor {
        MeshAnchor {
            id: id.to_string(),
            transform: Mat4::IDENTITY,
            geometry: MeshGeometry {
                vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                faces: vec![[0, 1, 2]; faces],
                classifications: None,
            },
        }
    }

    fn anchor_of(kind: u8, n: usize) -> Anchor {
        let id = format!("a-{n}");
        match kind % 3 {
            0 => Anchor::Mesh(mesh(&id, n % 5)),
            1 => Anchor::Plane(PlaneAnchor {
                id,
                transform: Mat4::IDENTITY,
                alignment: Default::default(),
                classification: Default::default(),
                center: Vec3::ZERO,
                extent: Vec3::ONE,
                geometry: PlaneGeometry::default(),
            }),
            _ => Anchor::Face(FaceAnchor {
                id,
                transform: Mat4::IDENTITY,
                is_tracked: true,
                geometry: FaceGeometry::default(),
            }),
        }
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let snapshot = SessionSnapshot::new(vec![Anchor::Mesh(mesh("m", 1))]);
        let groups = classify(&snapshot).into_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind(), AnchorKind::Mesh);
    }

    #[test]
    fn test_groups_follow_kind_order() {
        let snapshot = SessionSnapshot::new(vec![anchor_of(2, 0), anchor_of(1, 1), anchor_of(0, 2)]);
        let kinds: Vec<AnchorKind> = classify(&snapshot)
            .into_groups()
            .iter()
            .map(|g| g.kind())
            .collect();
        assert_eq!(kinds, vec![AnchorKind::Mesh, AnchorKind::Plane, AnchorKind::Face]);
    }

    #[test]
    fn test_largest_mesh_prefers_most_faces() {
        let small = mesh("small", 10);
        let large = mesh("large", 30);
        assert_eq!(largest_mesh_anchor(&[&small, &large]).unwrap().id, "large");
    }

    #[test]
    fn test_largest_mesh_tie_goes_to_first_seen() {
        let first = mesh("first", 30);
        let second = mesh("second", 30);
        let small = mesh("small", 2);
        assert_eq!(
            largest_mesh_anchor(&[&small, &first, &second]).unwrap().id,
            "first"
        );
    }

    #[test]
    fn test_largest_mesh_of_nothing() {
        assert!(largest_mesh_anchor(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_every_anchor_lands_in_exactly_its_own_group(kinds in proptest::collection::vec(0u8..3, 0..40)) {
            let anchors: Vec<Anchor> = kinds.iter().enumerate().map(|(n, k)| anchor_of(*k, n)).collect();
            let snapshot = SessionSnapshot::new(anchors.clone());
            let classified = classify(&snapshot);

            prop_assert_eq!(classified.total(), anchors.len());

            let mesh_ids: Vec<&str> = classified.mesh.iter().map(|a| a.id.as_str()).collect();
            let plane_ids: Vec<&str> = classified.plane.iter().map(|a| a.id.as_str()).collect();
            let face_ids: Vec<&str> = classified.face.iter().map(|a| a.id.as_str()).collect();

            for kind in AnchorKind::ALL {
                let expected: Vec<&str> = anchors
                    .iter()
                    .filter(|a| a.kind() == kind)
                    .map(|a| a.id())
                    .collect();
                let actual = match kind {
                    AnchorKind::Mesh => &mesh_ids,
                    AnchorKind::Plane => &plane_ids,
                    AnchorKind::Face => &face_ids,
                };
                prop_assert_eq!(&expected, actual);
            }
        }
    }
}
