//! Unit tests for obj_loader.rs
//!
//! Covers deduplication, quad fan triangulation and every failure kind.

use super::*;
use glam::{Vec2, Vec3};

const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

/// Cube with 8 positions, 4 texcoords and 12 triangles (two per side)
const CUBE_OBJ: &str = "\
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 -1
vn 0 0 1
vn -1 0 0
vn 1 0 0
vn 0 1 0
vn 0 -1 0
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
f 6/1/2 5/2/2 8/3/2
f 6/1/2 8/3/2 7/4/2
f 5/1/3 1/2/3 4/3/3
f 5/1/3 4/3/3 8/4/3
f 2/1/4 6/2/4 7/3/4
f 2/1/4 7/3/4 3/4/4
f 4/1/5 3/2/5 7/3/5
f 4/1/5 7/3/5 8/4/5
f 5/1/6 6/2/6 2/3/6
f 5/1/6 2/3/6 1/4/6
";

fn assert_valid(mesh: &MeshData) {
    assert_eq!(mesh.indices().len() % 3, 0);
    assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertices().len()));
}

// ============================================================================
// SUCCESSFUL PARSES
// ============================================================================

#[test]
fn test_quad_end_to_end() {
    let mesh = ObjMeshLoader::parse(QUAD_OBJ).unwrap();

    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
    assert_eq!(mesh.vertices()[2], Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 1.0)));
    assert_valid(&mesh);
}

#[test]
fn test_triangle_face() {
    let mesh = ObjMeshLoader::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\n").unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.indices(), &[0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn test_repeated_corner_reuses_vertex() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\n\
                f 1/1/1 2/1/1 3/1/1\nf 2/1/1 4/1/1 3/1/1\n";
    let mesh = ObjMeshLoader::parse(text).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices(), &[0, 1, 2, 1, 3, 2]);
}

#[test]
fn test_identical_values_different_triples_stay_distinct() {
    // Positions 1 and 2 hold the same coordinates, but the corners differ
    let text = "v 0 0 0\nv 0 0 0\nv 1 0 0\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\n";
    let mesh = ObjMeshLoader::parse(text).unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.vertices()[0], mesh.vertices()[1]);
}

#[test]
fn test_dedup_key_is_raw_corner_string() {
    // 1/1/1 and 1/1/2 resolve to the same position and texcoord
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nvn 0 0 1\n\
                f 1/1/1 2/1/1 3/1/1\nf 1/1/2 2/1/1 3/1/1\n";
    let mesh = ObjMeshLoader::parse(text).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices(), &[0, 1, 2, 3, 1, 2]);
}

#[test]
fn test_cube_vertex_count_is_unique_corner_count() {
    let mesh = ObjMeshLoader::parse(CUBE_OBJ).unwrap();

    // 36 face corners, each side uses 4 distinct triples
    assert_eq!(mesh.index_count(), 36);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    assert_valid(&mesh);
}

#[test]
fn test_unknown_tags_and_blank_lines_are_ignored() {
    let text = "# comment\no cube\ng side\nmtllib cube.mtl\n\n   \nusemtl stone\n".to_string() + QUAD_OBJ;
    let mesh = ObjMeshLoader::parse(&text).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.index_count(), 6);
}

#[test]
fn test_extra_whitespace_between_tokens() {
    let text = "v  0\t0   0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf   1/1/1\t2/1/1  3/1/1  \n";
    let mesh = ObjMeshLoader::parse(text).unwrap();

    assert_eq!(mesh.vertex_count(), 3);
}

#[test]
fn test_empty_text_gives_empty_mesh() {
    let mesh = ObjMeshLoader::parse("").unwrap();

    assert!(mesh.is_empty());
}

#[test]
fn test_parse_named_keeps_name() {
    let mesh = ObjMeshLoader::parse_named("quad", QUAD_OBJ).unwrap();
    assert_eq!(mesh.name, "quad");
}

#[test]
fn test_normals_are_not_required() {
    // Normal index 7 does not exist; normals are not part of the vertex
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1/7 2/1/7 3/1/7\n";
    assert!(ObjMeshLoader::parse(text).is_ok());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_five_corner_face_fails() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 2 0\nvt 0 0\n\
                f 1/1/1 2/1/1 3/1/1 4/1/1 5/1/1\n";
    match ObjMeshLoader::parse(text) {
        Err(Error::MalformedFace { line, reason }) => {
            assert_eq!(line, 7);
            assert!(reason.contains("5 corners"));
        }
        other => panic!("Expected MalformedFace, got {:?}", other),
    }
}

#[test]
fn test_two_corner_face_fails() {
    let text = "v 0 0 0\nv 1 0 0\nvt 0 0\nf 1/1/1 2/1/1\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { line: 4, .. })));
}

#[test]
fn test_corner_missing_indices_fails() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { line: 5, .. })));

    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1//1 2//1 3//1\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { line: 5, .. })));

    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1 2 3\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { line: 5, .. })));
}

#[test]
fn test_out_of_range_position_fails() {
    let text = "v 0 0 0\nv 1 0 0\nvt 0 0\nf 1/1/1 2/1/1 9/1/1\n";
    match ObjMeshLoader::parse(text) {
        Err(Error::MalformedFace { line, reason }) => {
            assert_eq!(line, 4);
            assert!(reason.contains("position 9"));
        }
        other => panic!("Expected MalformedFace, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_texcoord_fails() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1/1 2/2/1 3/1/1\n";
    match ObjMeshLoader::parse(text) {
        Err(Error::MalformedFace { reason, .. }) => assert!(reason.contains("texcoord 2")),
        other => panic!("Expected MalformedFace, got {:?}", other),
    }
}

#[test]
fn test_zero_and_negative_indices_fail() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 0/1/1 2/1/1 3/1/1\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { .. })));

    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf -1/1/1 2/1/1 3/1/1\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { .. })));
}

#[test]
fn test_face_before_positions_fails() {
    let text = "f 1/1/1 2/1/1 3/1/1\nv 0 0 0\n";
    assert!(matches!(ObjMeshLoader::parse(text), Err(Error::MalformedFace { line: 1, .. })));
}

#[test]
fn test_malformed_coordinate_fails() {
    match ObjMeshLoader::parse("v 0 abc 0\n") {
        Err(Error::MalformedNumber { line, token }) => {
            assert_eq!(line, 1);
            assert_eq!(token, "abc");
        }
        other => panic!("Expected MalformedNumber, got {:?}", other),
    }
}

#[test]
fn test_missing_coordinate_fails() {
    assert!(matches!(
        ObjMeshLoader::parse("vt 0.5\n"),
        Err(Error::MalformedNumber { line: 1, .. })
    ));
}

#[test]
fn test_non_numeric_corner_index_fails() {
    let text = "v 0 0 0\nvt 0 0\nf 1/a/1 1/1/1 1/1/1\n";
    match ObjMeshLoader::parse(text) {
        Err(Error::MalformedNumber { line, token }) => {
            assert_eq!(line, 3);
            assert_eq!(token, "a");
        }
        other => panic!("Expected MalformedNumber, got {:?}", other),
    }
}

#[test]
fn test_parse_errors_are_classified() {
    let err = ObjMeshLoader::parse("v x 0 0\n").unwrap_err();
    assert!(err.is_parse_error());
}

// ============================================================================
// FILE LOADING
// ============================================================================

#[test]
fn test_load_missing_file_fails_with_not_found() {
    let path = std::env::temp_dir().join("onkos_missing_mesh_does_not_exist.obj");
    match ObjMeshLoader::load_file(&path) {
        Err(Error::NotFound { path: reported, .. }) => {
            assert!(reported.ends_with("onkos_missing_mesh_does_not_exist.obj"));
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_load_file_names_mesh_after_stem() {
    let path = std::env::temp_dir().join(format!("onkos_unit_quad_{}.obj", std::process::id()));
    std::fs::write(&path, QUAD_OBJ).unwrap();

    let result = ObjMeshLoader::load_file(&path);
    std::fs::remove_file(&path).unwrap();

    let mesh = result.unwrap();
    assert_eq!(mesh.name, format!("onkos_unit_quad_{}", std::process::id()));
    assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
}
