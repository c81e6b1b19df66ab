//! Minimal OBJ loader: positions and faces only.
//!
//! Loading runs in two stages. [`parse_obj_records`] collects raw positions and
//! face records line by line; [`resolve`] fan-triangulates every face and turns
//! each triangle corner into an [`EmittedVertex`] with a random color.
//! Texture coordinates, normals and materials are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{ObjError, ObjResult},
    mesh::{EmittedVertex, ObjMesh},
};

/// Position components with a smaller magnitude are emitted as exactly `0.0`.
pub const SNAP_EPSILON: f32 = 1e-20;

/// One `f` line: 1-based position references in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceRecord {
    pub refs: Vec<i64>,
    /// 1-based source line, kept for error reporting.
    pub line: usize,
}

/// Output of the parsing stage, before index resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjRecords {
    pub positions: Vec<[f32; 3]>,
    pub faces: Vec<FaceRecord>,
}

impl ObjRecords {
    /// Number of triangles the faces fan out into.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.refs.len().saturating_sub(2))
            .sum()
    }
}

/// How every group on an `f` line is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceMode {
    /// `f 1 2 3`
    Bare,
    /// `f 1/2/3 4//6 7/8`
    Slashed,
}

impl FaceMode {
    /// One `/` anywhere on the line switches every group on it to slashed parsing.
    pub fn detect(rest: &str) -> Self {
        if rest.contains('/') {
            FaceMode::Slashed
        } else {
            FaceMode::Bare
        }
    }
}

/// Load an OBJ mesh from a file path. Colors come from an entropy-seeded generator.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<ObjMesh> {
    let reader = open(path.as_ref())?;
    load_obj_from_reader(reader, &mut StdRng::from_entropy())
}

/// Same as [`load_obj_from_path`], with reproducible colors.
pub fn load_obj_from_path_seeded(path: impl AsRef<Path>, seed: u64) -> ObjResult<ObjMesh> {
    let reader = open(path.as_ref())?;
    load_obj_from_reader(reader, &mut StdRng::seed_from_u64(seed))
}

/// Load an OBJ mesh from a [`BufRead`] implementation, drawing colors from `rng`.
pub fn load_obj_from_reader<R: BufRead, G: Rng>(reader: R, rng: &mut G) -> ObjResult<ObjMesh> {
    let records = parse_obj_records(reader)?;
    resolve(&records, rng)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<ObjMesh> {
    load_obj_from_reader(io::Cursor::new(contents), &mut StdRng::from_entropy())
}

fn open(path: &Path) -> ObjResult<BufReader<File>> {
    let file = File::open(path).map_err(|source| ObjError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading OBJ mesh from {:?}", path);
    Ok(BufReader::new(file))
}

/// Parsing stage: collect positions and face records without resolving indices.
pub fn parse_obj_records<R: BufRead>(mut reader: R) -> ObjResult<ObjRecords> {
    let mut records = ObjRecords::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        line_no += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ObjError::Io {
                line: line_no,
                source,
            })?;
        if read == 0 {
            break;
        }
        // Lines we skip may carry any encoding; only v/f payloads need to be numeric.
        let line = String::from_utf8_lossy(&buf);
        let (header, rest) = split_header(line.trim_start());

        match header {
            "v" => records.positions.push(parse_position(rest, line_no)?),
            "f" => {
                let refs = parse_face_refs(rest, FaceMode::detect(rest), line_no)?;
                if refs.len() < 3 {
                    log::warn!(
                        "Skipping face with {} reference(s) on line {}",
                        refs.len(),
                        line_no
                    );
                    continue;
                }
                records.faces.push(FaceRecord {
                    refs,
                    line: line_no,
                });
            }
            _ => {
                // Ignore everything else (#, vn, vt, g, o, s, usemtl, mtllib, blank)
            }
        }
    }

    log::debug!(
        "OBJ records: {} positions, {} faces",
        records.positions.len(),
        records.faces.len()
    );
    Ok(records)
}

fn split_header(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], &line[at..]),
        None => (line, ""),
    }
}

fn parse_position(rest: &str, line: usize) -> ObjResult<[f32; 3]> {
    let mut parts = rest.split_whitespace();
    let mut next = |what: &'static str| {
        let token = parts.next().unwrap_or("");
        token
            .parse::<f32>()
            .map_err(|_| malformed(line, what, token))
    };
    // Trailing components (e.g. `w`) are ignored.
    Ok([
        next("x coordinate")?,
        next("y coordinate")?,
        next("z coordinate")?,
    ])
}

/// Read the position references of one `f` line (everything after the header).
///
/// In [`FaceMode::Slashed`] each group is `v`, `v/t`, `v//n` or `v/t/n`; the
/// texture and normal fields must be empty or integers and are discarded.
pub fn parse_face_refs(rest: &str, mode: FaceMode, line: usize) -> ObjResult<Vec<i64>> {
    rest.split_whitespace()
        .map(|group| match mode {
            FaceMode::Bare => parse_index(group, line, "vertex index"),
            FaceMode::Slashed => parse_slashed_group(group, line),
        })
        .collect()
}

fn parse_slashed_group(group: &str, line: usize) -> ObjResult<i64> {
    let mut fields = group.split('/');
    let vertex = parse_index(fields.next().unwrap_or(""), line, "vertex index")?;
    for what in ["texture index", "normal index"] {
        if let Some(field) = fields.next().filter(|f| !f.is_empty()) {
            parse_index(field, line, what)?;
        }
    }
    if fields.next().is_some() {
        return Err(malformed(line, "face group", group));
    }
    Ok(vertex)
}

fn parse_index(token: &str, line: usize, what: &'static str) -> ObjResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_| malformed(line, what, token))
}

fn malformed(line: usize, what: &'static str, token: &str) -> ObjError {
    ObjError::MalformedNumericField {
        line,
        what,
        token: token.to_owned(),
    }
}

/// Fan triangulation around the first reference: `(r0, ri, ri+1)` for `i` in `1..k-1`.
/// Fewer than 3 references yield nothing. Non-convex polygons are not detected.
pub fn triangulate_fan(refs: &[i64]) -> impl Iterator<Item = [i64; 3]> + '_ {
    (1..refs.len().saturating_sub(1)).map(move |i| [refs[0], refs[i], refs[i + 1]])
}

/// Resolution stage: one emitted vertex per triangle corner, in triangle order.
///
/// References are checked against the total position count; the 1-based to
/// 0-based translation happens only here.
pub fn resolve<G: Rng>(records: &ObjRecords, rng: &mut G) -> ObjResult<ObjMesh> {
    let mut vertices = Vec::with_capacity(records.triangle_count() * 3);

    for face in &records.faces {
        for triangle in triangulate_fan(&face.refs) {
            for index in triangle {
                let position = lookup(&records.positions, index, face.line)?;
                vertices.push(EmittedVertex::new(
                    position.map(snap_near_zero),
                    random_color(rng),
                ));
            }
        }
    }

    log::info!(
        "Loaded OBJ: {} positions, {} faces -> {} triangles ({} vertices)",
        records.positions.len(),
        records.faces.len(),
        vertices.len() / 3,
        vertices.len()
    );
    Ok(ObjMesh::new(vertices))
}

fn lookup(positions: &[[f32; 3]], index: i64, line: usize) -> ObjResult<[f32; 3]> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| positions.get(i))
        .copied()
        .ok_or(ObjError::OutOfRangeIndex {
            index,
            vertex_count: positions.len(),
            line,
        })
}

#[inline]
pub fn snap_near_zero(c: f32) -> f32 {
    if c.abs() < SNAP_EPSILON { 0.0 } else { c }
}

fn random_color<G: Rng>(rng: &mut G) -> [f32; 3] {
    [
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_seeded(src: &str) -> ObjMesh {
        let mut rng = StdRng::seed_from_u64(7);
        load_obj_from_reader(io::Cursor::new(src), &mut rng).expect("parse obj")
    }

    fn positions(mesh: &ObjMesh) -> Vec<[f32; 3]> {
        mesh.vertices.iter().map(|v| v.position).collect()
    }

    const SQUARE: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n";

    #[test]
    fn parse_simple_triangle() {
        let mesh = load_seeded("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n");
        assert_eq!(
            positions(&mesh),
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn quad_fans_around_first_reference() {
        let mesh = load_seeded(&format!("{SQUARE}f 1 2 3 4\n"));
        assert_eq!(
            positions(&mesh),
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ]
        );
    }

    #[test]
    fn fan_triangle_counts() {
        assert_eq!(triangulate_fan(&[1, 2, 3]).collect::<Vec<_>>(), vec![[1, 2, 3]]);
        assert_eq!(
            triangulate_fan(&[1, 2, 3, 4]).collect::<Vec<_>>(),
            vec![[1, 2, 3], [1, 3, 4]]
        );
        assert_eq!(triangulate_fan(&[5, 6, 7, 8, 9, 10]).count(), 4);
        assert_eq!(triangulate_fan(&[1, 2]).count(), 0);
        assert_eq!(triangulate_fan(&[]).count(), 0);
    }

    #[test]
    fn vertex_count_scales_with_face_count() {
        let tris = format!("{SQUARE}f 1 2 3\nf 1 3 4\nf 2 3 4\n");
        assert_eq!(load_seeded(&tris).vertex_count(), 9);

        let quads = format!("{SQUARE}f 1 2 3 4\nf 4 3 2 1\n");
        let mesh = load_seeded(&quads);
        assert_eq!(mesh.vertex_count(), 12);
        for quad in mesh.vertices.chunks_exact(6) {
            // both triangles share the (0th, 2nd) corner pair
            assert_eq!(quad[0].position, quad[3].position);
            assert_eq!(quad[2].position, quad[4].position);
        }
    }

    #[test]
    fn no_faces_is_empty_not_error() {
        let mesh = load_seeded("# only vertices\nv 1 2 3\nv 4 5 6\n");
        assert!(mesh.is_empty());
        assert!(load_seeded("").is_empty());
    }

    #[test]
    fn near_zero_components_snap_to_zero() {
        let mesh = load_seeded("v 1e-25 -1e-30 -0.0\nv 1e-19 2 3\nv 4 5 6\nf 1 2 3\n");
        let first = mesh.vertices[0].position;
        for c in first {
            assert_eq!(c.to_bits(), 0.0f32.to_bits());
        }
        assert_eq!(mesh.vertices[1].position[0], 1e-19);
    }

    #[test]
    fn shared_position_gets_independent_colors() {
        let mesh = load_seeded(&format!("{SQUARE}f 1 2 3\nf 1 3 4\n"));
        let a = mesh.vertices[0];
        let b = mesh.vertices[3];
        assert_eq!(a.position, b.position);
        assert_ne!(a.color, b.color);
    }

    #[test]
    fn colors_are_unit_range_and_seed_reproducible() {
        let src = format!("{SQUARE}f 1 2 3 4\n");
        let a = load_seeded(&src);
        let b = load_seeded(&src);
        assert_eq!(a, b);
        assert!(
            a.vertices
                .iter()
                .flat_map(|v| v.color)
                .all(|c| (0.0..1.0).contains(&c))
        );
    }

    #[test]
    fn slashed_and_bare_faces_agree_on_positions() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 2 2\nv 3 3 3\nv 4 4 4\n";
        let slashed = load_seeded(&format!("{src}vt 0 0\nvn 0 0 1\nf 1/2/3 4/5/6 7/8/9\n"));
        let bare = load_seeded(&format!("{src}f 1 4 7\n"));
        assert_eq!(positions(&slashed), positions(&bare));
    }

    #[test]
    fn slashed_groups_with_missing_fields() {
        assert_eq!(
            parse_face_refs(" 1//3 2//3 3//3", FaceMode::Slashed, 1).unwrap(),
            vec![1, 2, 3]
        );
        assert_eq!(
            parse_face_refs(" 4/1 5/2 6/3 7/4", FaceMode::Slashed, 1).unwrap(),
            vec![4, 5, 6, 7]
        );
        // a bare group on a slashed line is still just a vertex index
        assert_eq!(
            parse_face_refs(" 1 2/2/2 3", FaceMode::Slashed, 1).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn face_mode_is_decided_per_line() {
        assert_eq!(FaceMode::detect(" 1 2 3"), FaceMode::Bare);
        assert_eq!(FaceMode::detect(" 1 2/5 3"), FaceMode::Slashed);
        assert!(matches!(
            parse_face_refs(" 1 2/5 3", FaceMode::Bare, 9),
            Err(ObjError::MalformedNumericField { line: 9, .. })
        ));
    }

    #[test]
    fn unknown_headers_are_ignored() {
        let src = "mtllib table.mtl\no Table\ng top\nusemtl wood\ns off\n\
                   v 0 0 0\nvt 0.5 0.5\nvn 0 1 0\nv 1 0 0\nv 1 1 0\n\n   \nf 1 2 3\n";
        assert_eq!(load_seeded(src).vertex_count(), 3);
    }

    #[test]
    fn non_utf8_skipped_lines_do_not_abort() {
        let mut src = b"# caf\xE9\nv 0 0 0\nv 1 0 0\r\nv 1 1 0\n".to_vec();
        src.extend_from_slice(b"g t\xFAble\nf 1 2 3");
        let mut rng = StdRng::seed_from_u64(3);
        let mesh = load_obj_from_reader(io::Cursor::new(src), &mut rng).unwrap();
        assert_eq!(
            positions(&mesh),
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn short_faces_are_skipped() {
        let records = parse_obj_records(io::Cursor::new("v 0 0 0\nv 1 0 0\nf 1 2\nf\n")).unwrap();
        assert!(records.faces.is_empty());
        assert_eq!(records.positions.len(), 2);
    }

    #[test]
    fn records_keep_source_lines() {
        let records =
            parse_obj_records(io::Cursor::new(format!("{SQUARE}# quad\nf 1 2 3 4\n"))).unwrap();
        assert_eq!(
            records.faces,
            vec![FaceRecord {
                refs: vec![1, 2, 3, 4],
                line: 6
            }]
        );
        assert_eq!(records.triangle_count(), 2);
    }

    #[test]
    fn out_of_range_indices_are_reported() {
        for face in ["f 1 2 4", "f 0 1 2", "f -1 1 2"] {
            let err = load_obj_from_str(&format!("v 0 0 0\nv 1 0 0\nv 1 1 0\n{face}\n"))
                .unwrap_err();
            match err {
                ObjError::OutOfRangeIndex {
                    vertex_count, line, ..
                } => {
                    assert_eq!(vertex_count, 3);
                    assert_eq!(line, 4);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn forward_references_resolve_after_full_read() {
        let mesh = load_seeded("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 1 1 0\n");
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn malformed_numbers_are_reported() {
        assert!(matches!(
            load_obj_from_str("v 1.0 abc 2.0\n"),
            Err(ObjError::MalformedNumericField {
                line: 1,
                what: "y coordinate",
                ..
            })
        ));
        assert!(matches!(
            load_obj_from_str("v 1.0 2.0\n"),
            Err(ObjError::MalformedNumericField {
                what: "z coordinate",
                ..
            })
        ));
        assert!(matches!(
            load_obj_from_str("v 0 0 0\nf 1 x 1\n"),
            Err(ObjError::MalformedNumericField { line: 2, .. })
        ));
        assert!(matches!(
            load_obj_from_str("v 0 0 0\nf 1/a/1 1/1/1 1/1/1\n"),
            Err(ObjError::MalformedNumericField {
                what: "texture index",
                ..
            })
        ));
        assert!(matches!(
            load_obj_from_str("v 0 0 0\nf 1/1/1/1 1 1\n"),
            Err(ObjError::MalformedNumericField {
                what: "face group",
                ..
            })
        ));
    }

    #[test]
    fn extra_position_components_are_ignored() {
        let mesh = load_seeded("v 1 2 3 1.0\nv 0 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.vertices[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn bundled_cube_loads_as_twelve_triangles() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/models/cube.obj");
        let mesh = load_obj_from_path_seeded(path, 1).expect("bundled cube");
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.bounds(), Some(([-1.0; 3], [1.0; 3])));
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let err = load_obj_from_path("no/such/dir/model.obj").unwrap_err();
        assert!(matches!(err, ObjError::ResourceNotFound { .. }));
        assert!(err.to_string().contains("model.obj"));
    }

    #[test]
    fn load_from_path_seeded_is_reproducible() {
        let path = std::env::temp_dir().join(format!("asset-obj-{}.obj", std::process::id()));
        std::fs::write(&path, format!("{SQUARE}f 1 2 3 4\n")).unwrap();
        let a = load_obj_from_path_seeded(&path, 42).unwrap();
        let b = load_obj_from_path_seeded(&path, 42).unwrap();
        let c = load_obj_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(a, b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(positions(&a), positions(&c));
    }
}
