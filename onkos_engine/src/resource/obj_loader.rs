//! Wavefront OBJ mesh loader.
//!
//! Supported records: `v x y z`, `vt u v`, `vn x y z` and
//! `f p/t/n p/t/n p/t/n [p/t/n]`. Every other tag is ignored.
//!
//! Vertices are deduplicated on the raw corner string: `1/2/3` seen twice maps
//! to one output vertex, while two corners with different index triples stay
//! distinct even if their positions and texcoords are equal. Quads are split
//! into the fan (0,1,2) (0,2,3). Any other corner count is rejected.

use std::path::Path;
use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::resource::mesh::{MeshData, Vertex};
use crate::{engine_debug, engine_error, engine_info};

const LOG_SOURCE: &str = "onkos::ObjMeshLoader";

/// OBJ text to `MeshData` converter
pub struct ObjMeshLoader;

impl ObjMeshLoader {
    /// Parse OBJ text into an unnamed mesh
    pub fn parse(text: &str) -> Result<MeshData> {
        Self::parse_named("", text)
    }

    /// Parse OBJ text into a mesh called `name`
    pub fn parse_named(name: &str, text: &str) -> Result<MeshData> {
        let mut parser = ObjParser::new(name);
        for (line_index, line) in text.lines().enumerate() {
            if let Err(err) = parser.parse_line(line_index + 1, line) {
                engine_error!(LOG_SOURCE, "parse of mesh '{}' failed: {}", name, err);
                return Err(err);
            }
        }
        let normal_count = parser.normals.len();
        let mesh = parser.finish();
        engine_debug!(LOG_SOURCE, "Parsed mesh '{}': {} vertices, {} indices ({} normals ignored)",
            mesh.name, mesh.vertex_count(), mesh.index_count(), normal_count);
        Ok(mesh)
    }

    /// Read and parse an OBJ file; the mesh is named after the file stem
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<MeshData> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            let err = Error::NotFound {
                path: path.display().to_string(),
                reason: e.to_string(),
            };
            engine_error!(LOG_SOURCE, "load_file: {}", err);
            err
        })?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mesh = Self::parse_named(&name, &text)?;
        engine_info!(LOG_SOURCE, "Loaded '{}' ({} vertices, {} triangles)",
            path.display(), mesh.vertex_count(), mesh.triangle_count());
        Ok(mesh)
    }
}

// ============================================================================
// PARSER STATE
// ============================================================================

/// State of a single parse pass
struct ObjParser {
    positions: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    /// Parsed and kept for layout changes; the output vertex has no normal
    normals: Vec<Vec3>,
    /// Raw corner string -> output vertex index
    corner_indices: FxHashMap<String, u32>,
    mesh: MeshData,
}

impl ObjParser {
    fn new(name: &str) -> Self {
        Self {
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            corner_indices: FxHashMap::default(),
            mesh: MeshData::new(name),
        }
    }

    fn parse_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            return Ok(());
        };

        match tag {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line_number)?;
                self.positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&mut tokens, line_number)?;
                self.texcoords.push(Vec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line_number)?;
                self.normals.push(Vec3::new(x, y, z));
            }
            "f" => self.parse_face(tokens, line_number)?,
            _ => {}
        }
        Ok(())
    }

    fn parse_face<'a>(
        &mut self,
        corners: impl Iterator<Item = &'a str>,
        line_number: usize,
    ) -> Result<()> {
        let mut face = Vec::with_capacity(4);
        for corner in corners {
            face.push(self.resolve_corner(corner, line_number)?);
        }

        match face.as_slice() {
            &[a, b, c] => self.mesh.push_triangle(a, b, c),
            &[a, b, c, d] => {
                self.mesh.push_triangle(a, b, c);
                self.mesh.push_triangle(a, c, d);
            }
            _ => {
                return Err(Error::MalformedFace {
                    line: line_number,
                    reason: format!(
                        "{} corners; only triangles and quads are supported",
                        face.len()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Output index of a corner, creating the vertex on first sight
    fn resolve_corner(&mut self, corner: &str, line_number: usize) -> Result<u32> {
        if let Some(&index) = self.corner_indices.get(corner) {
            return Ok(index);
        }

        let [pos, tex, _norm] = parse_corner(corner, line_number)?;
        let position = lookup(&self.positions, pos, "position", corner, line_number)?;
        let texcoord = lookup(&self.texcoords, tex, "texcoord", corner, line_number)?;

        let index = self.mesh.push_vertex(Vertex::new(position, texcoord));
        self.corner_indices.insert(corner.to_string(), index);
        Ok(index)
    }

    fn finish(self) -> MeshData {
        self.mesh
    }
}

// ============================================================================
// TOKEN HELPERS
// ============================================================================

fn parse_floats<'a, const N: usize>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_number: usize,
) -> Result<[f32; N]> {
    let mut values = [0.0f32; N];
    for value in values.iter_mut() {
        let token = tokens.next().ok_or_else(|| Error::MalformedNumber {
            line: line_number,
            token: String::new(),
        })?;
        *value = token.parse::<f32>().map_err(|_| Error::MalformedNumber {
            line: line_number,
            token: token.to_string(),
        })?;
    }
    Ok(values)
}

/// Split `p/t/n` into three 1-based indices
fn parse_corner(corner: &str, line_number: usize) -> Result<[i64; 3]> {
    let segments: Vec<&str> = corner.split('/').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(Error::MalformedFace {
            line: line_number,
            reason: format!("corner '{}' must have the form pos/tex/norm", corner),
        });
    }

    let mut indices = [0i64; 3];
    for (slot, segment) in indices.iter_mut().zip(&segments) {
        *slot = segment.parse::<i64>().map_err(|_| Error::MalformedNumber {
            line: line_number,
            token: segment.to_string(),
        })?;
    }
    Ok(indices)
}

/// Bounds-checked lookup of a 1-based OBJ reference
fn lookup<T: Copy>(
    items: &[T],
    one_based: i64,
    what: &str,
    corner: &str,
    line_number: usize,
) -> Result<T> {
    one_based
        .checked_sub(1)
        .and_then(|zero_based| usize::try_from(zero_based).ok())
        .and_then(|index| items.get(index).copied())
        .ok_or_else(|| Error::MalformedFace {
            line: line_number,
            reason: format!(
                "corner '{}' references {} {} but only {} are declared",
                corner, what, one_based, items.len()
            ),
        })
}

#[cfg(test)]
#[path = "obj_loader_tests.rs"]
mod tests;
