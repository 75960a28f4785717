//! End-to-end capture scenarios against real filesystem bookmarks.

use std::path::Path;
use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2, Vec3};
use landon_anchor_model::{
    Anchor, FaceAnchor, FaceGeometry, MeshAnchor, MeshGeometry, PlaneAlignment, PlaneAnchor,
    PlaneClassification, PlaneGeometry, SessionSnapshot,
};
use landon_capture_engine::{
    CaptureEvent, CaptureOrchestrator, DestinationResolver, EncoderDispatch, ExportFormat,
    ExportPipeline, ExportWriter, FormatRegistry, SnapshotSource,
};
use landon_common::config::ExportMode;
use landon_encoders::{
    BinaryEncodeResult, BinaryGeometryEncoder, EncoderOptions, EncoderStatusCode, ObjEncoder,
};
use landon_platform_core::ReferenceStore;
use landon_platform_linux::{FileReferenceStore, FsBookmarker};

/// Binary codec whose payload names the anchors it was given.
struct ManifestCodec;

impl BinaryGeometryEncoder for ManifestCodec {
    fn name(&self) -> &str {
        "manifest"
    }

    fn encode_mesh_anchors(&self, anchors: &[&MeshAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        let parts: Vec<String> = anchors
            .iter()
            .map(|a| format!("{}={}", a.id, a.face_count()))
            .collect();
        BinaryEncodeResult::success(parts.join(";").into_bytes())
    }

    fn encode_plane_anchors(&self, anchors: &[&PlaneAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        BinaryEncodeResult::success(format!("planes={}", anchors.len()).into_bytes())
    }

    fn encode_face_anchors(&self, _: &[&FaceAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        BinaryEncodeResult::failure(EncoderStatusCode::UnsupportedFeature, "faces not supported")
    }
}

/// Snapshot source the test can swap under the orchestrator.
#[derive(Default)]
struct SharedSession {
    current: Mutex<Option<SessionSnapshot>>,
}

impl SharedSession {
    fn set(&self, snapshot: Option<SessionSnapshot>) {
        *self.current.lock().unwrap() = snapshot;
    }
}

impl SnapshotSource for SharedSession {
    fn current_snapshot(&self) -> Option<SessionSnapshot> {
        self.current.lock().unwrap().clone()
    }
}

struct Harness {
    root: tempfile::TempDir,
    default_dir: std::path::PathBuf,
    preferences: std::path::PathBuf,
    session: Arc<SharedSession>,
    orchestrator: CaptureOrchestrator,
}

impl Harness {
    fn new(mode: ExportMode) -> Self {
        let root = tempfile::tempdir().unwrap();
        let default_dir = root.path().join("default-exports");
        let preferences = root.path().join("config").join("preferences.json");
        let session = Arc::new(SharedSession::default());
        let orchestrator = build_orchestrator(&default_dir, &preferences, mode, session.clone());
        Self {
            root,
            default_dir,
            preferences,
            session,
            orchestrator,
        }
    }

    fn root(&self) -> &Path {
        self.root.path()
    }
}

fn build_orchestrator(
    default_dir: &Path,
    preferences: &Path,
    mode: ExportMode,
    session: Arc<SharedSession>,
) -> CaptureOrchestrator {
    let resolver = DestinationResolver::new(
        Arc::new(FileReferenceStore::new(preferences)),
        Arc::new(FsBookmarker::new()),
    );
    let writer = ExportWriter::new(Arc::new(resolver), default_dir).unwrap();
    let dispatch = EncoderDispatch::new(
        Arc::new(ManifestCodec),
        Arc::new(ObjEncoder::new()),
        EncoderOptions::default(),
    );
    let pipeline = ExportPipeline::new(Arc::new(FormatRegistry::new()), dispatch, writer, mode);
    CaptureOrchestrator::new(session, Arc::new(pipeline))
}

fn mesh(id: &str, faces: usize) -> Anchor {
    Anchor::Mesh(MeshAnchor {
        id: id.to_string(),
        transform: Mat4::IDENTITY,
        geometry: MeshGeometry {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            faces: vec![[0, 1, 2]; faces],
            classifications: None,
        },
    })
}

fn plane(id: &str) -> Anchor {
    Anchor::Plane(PlaneAnchor {
        id: id.to_string(),
        transform: Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        alignment: PlaneAlignment::Horizontal,
        classification: PlaneClassification::Floor,
        center: Vec3::ZERO,
        extent: Vec3::new(2.0, 0.0, 2.0),
        geometry: PlaneGeometry {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(1.0, 0.0, 1.0)],
            triangle_indices: vec![[0, 1, 2], [1, 3, 2]],
            boundary_vertices: vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z],
        },
    })
}

fn face(id: &str) -> Anchor {
    Anchor::Face(FaceAnchor {
        id: id.to_string(),
        transform: Mat4::IDENTITY,
        is_tracked: true,
        geometry: FaceGeometry {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            texture_coordinates: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            triangle_indices: vec![[0, 1, 2]],
        },
    })
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_largest_mesh_mode_writes_single_mesh_file() {
    let harness = Harness::new(ExportMode::LargestMesh);
    harness
        .session
        .set(Some(SessionSnapshot::new(vec![mesh("ten", 10), mesh("thirty", 30)])));

    assert!(harness.orchestrator.capture().is_some());
    harness.orchestrator.flush().await;

    assert_eq!(file_names(&harness.default_dir), vec!["mesh-anchors.drc"]);
    let payload = std::fs::read(harness.default_dir.join("mesh-anchors.drc")).unwrap();
    assert_eq!(payload, b"thirty=30");
}

#[tokio::test]
async fn test_batch_mode_combines_group_and_skips_failed_codec() {
    let harness = Harness::new(ExportMode::Batch);
    harness.session.set(Some(SessionSnapshot::new(vec![
        mesh("a", 1),
        plane("floor"),
        face("f"),
        mesh("b", 2),
    ])));
    let mut events = harness.orchestrator.subscribe();

    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert_eq!(
        file_names(&harness.default_dir),
        vec!["mesh-anchors.drc", "plane-anchors.drc"]
    );
    assert_eq!(
        std::fs::read(harness.default_dir.join("mesh-anchors.drc")).unwrap(),
        b"a=1;b=2"
    );

    let mut skipped = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let CaptureEvent::Skipped { role, .. } = event {
            skipped.push(role);
        }
    }
    assert_eq!(skipped, vec!["face-anchors"]);
}

#[tokio::test]
async fn test_empty_and_missing_snapshots_write_nothing() {
    let harness = Harness::new(ExportMode::Batch);

    assert_eq!(harness.orchestrator.capture(), None);
    harness.session.set(Some(SessionSnapshot::new(Vec::new())));
    assert_eq!(harness.orchestrator.capture(), None);
    harness.orchestrator.flush().await;

    assert!(file_names(&harness.default_dir).is_empty());
}

#[tokio::test]
async fn test_selected_destination_receives_exports() {
    let harness = Harness::new(ExportMode::Batch);
    let selected = harness.root().join("picked");
    std::fs::create_dir(&selected).unwrap();
    harness.orchestrator.select_destination(&selected).unwrap();
    harness.session.set(Some(SessionSnapshot::new(vec![plane("p")])));

    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert_eq!(file_names(&selected), vec!["plane-anchors.drc"]);
    assert!(file_names(&harness.default_dir).is_empty());
}

#[tokio::test]
async fn test_removed_destination_falls_back_to_default() {
    let harness = Harness::new(ExportMode::Batch);
    let selected = harness.root().join("picked");
    std::fs::create_dir(&selected).unwrap();
    harness.orchestrator.select_destination(&selected).unwrap();
    std::fs::remove_dir(&selected).unwrap();
    harness.session.set(Some(SessionSnapshot::new(vec![mesh("m", 3)])));

    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert!(!selected.exists());
    assert_eq!(file_names(&harness.default_dir), vec!["mesh-anchors.drc"]);
}

#[tokio::test]
async fn test_replaced_destination_is_stale_and_kept() {
    let harness = Harness::new(ExportMode::Batch);
    let selected = harness.root().join("picked");
    std::fs::create_dir(&selected).unwrap();
    harness.orchestrator.select_destination(&selected).unwrap();

    // Same path, different directory. The replacement exists before the
    // original is removed so it cannot reuse the inode.
    let replacement = harness.root().join("other");
    std::fs::create_dir(&replacement).unwrap();
    std::fs::remove_dir(&selected).unwrap();
    std::fs::rename(&replacement, &selected).unwrap();
    harness.session.set(Some(SessionSnapshot::new(vec![mesh("m", 1)])));

    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert!(file_names(&selected).is_empty());
    assert_eq!(file_names(&harness.default_dir), vec!["mesh-anchors.drc"]);
    let store = FileReferenceStore::new(&harness.preferences);
    assert!(store.get().is_some());
}

#[tokio::test]
async fn test_selection_survives_restart() {
    let harness = Harness::new(ExportMode::Batch);
    let selected = harness.root().join("picked");
    std::fs::create_dir(&selected).unwrap();
    harness.orchestrator.select_destination(&selected).unwrap();

    let session = Arc::new(SharedSession::default());
    session.set(Some(SessionSnapshot::new(vec![mesh("m", 1)])));
    let restarted = build_orchestrator(
        &harness.default_dir,
        &harness.preferences,
        ExportMode::Batch,
        session,
    );
    restarted.capture();
    restarted.shutdown().await;

    assert_eq!(file_names(&selected), vec!["mesh-anchors.drc"]);
}

#[tokio::test]
async fn test_rotation_switches_codec_path() {
    let harness = Harness::new(ExportMode::Batch);
    harness.session.set(Some(SessionSnapshot::new(vec![mesh("m", 1)])));

    assert_eq!(harness.orchestrator.rotate_format(), ExportFormat::Obj);
    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert_eq!(file_names(&harness.default_dir), vec!["mesh-anchors.obj"]);
    let text = std::fs::read_to_string(harness.default_dir.join("mesh-anchors.obj")).unwrap();
    assert!(text.contains("o anchor-m"));
}

#[tokio::test]
async fn test_repeated_captures_overwrite_in_order() {
    let harness = Harness::new(ExportMode::Batch);

    harness.session.set(Some(SessionSnapshot::new(vec![mesh("first", 1)])));
    harness.orchestrator.capture();
    harness.session.set(Some(SessionSnapshot::new(vec![mesh("second", 2)])));
    harness.orchestrator.capture();
    harness.orchestrator.flush().await;

    assert_eq!(file_names(&harness.default_dir), vec!["mesh-anchors.drc"]);
    assert_eq!(
        std::fs::read(harness.default_dir.join("mesh-anchors.drc")).unwrap(),
        b"second=2"
    );
}
