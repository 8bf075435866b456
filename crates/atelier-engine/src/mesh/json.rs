use std::path::Path;

use serde::Deserialize;

use super::{MeshData, Vertex};

/// Errors raised while loading a JSON mesh.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to read mesh file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mesh JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vertexPositions has {0} floats, not a multiple of 3")]
    PositionArity(usize),

    #[error("vertexNormals has {normals} floats, expected {expected}")]
    NormalCount { normals: usize, expected: usize },

    #[error("vertexTextureCoords has {coords} floats, expected {expected}")]
    TexCoordCount { coords: usize, expected: usize },

    #[error("index {index} at position {at} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, at: usize, vertices: usize },

    #[error("indices has {0} entries, not a multiple of 3")]
    IndexArity(usize),

    #[error("mesh has no triangles")]
    Empty,
}

/// On-disk layout: flat float arrays plus a flat triangle index list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeshJson {
    vertex_positions: Vec<f32>,
    vertex_normals: Vec<f32>,
    #[serde(default)]
    vertex_texture_coords: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MeshError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, MeshError> {
        let raw: MeshJson = serde_json::from_str(text)?;
        raw.into_mesh()
    }
}

impl MeshJson {
    fn into_mesh(self) -> Result<MeshData, MeshError> {
        let positions = self.vertex_positions;
        if positions.len() % 3 != 0 {
            return Err(MeshError::PositionArity(positions.len()));
        }
        let count = positions.len() / 3;

        if self.vertex_normals.len() != positions.len() {
            return Err(MeshError::NormalCount {
                normals: self.vertex_normals.len(),
                expected: positions.len(),
            });
        }

        let coords = self.vertex_texture_coords;
        if !coords.is_empty() && coords.len() != count * 2 {
            return Err(MeshError::TexCoordCount {
                coords: coords.len(),
                expected: count * 2,
            });
        }

        if self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexArity(self.indices.len()));
        }
        if let Some((at, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                at,
                vertices: count,
            });
        }

        let vertices = (0..count)
            .map(|i| {
                let p = &positions[i * 3..i * 3 + 3];
                let n = &self.vertex_normals[i * 3..i * 3 + 3];
                let uv = coords
                    .get(i * 2..i * 2 + 2)
                    .map_or([0.0, 0.0], |t| [t[0], t[1]]);
                Vertex::new([p[0], p[1], p[2]], [n[0], n[1], n[2]], uv)
            })
            .collect();

        log::debug!("loaded JSON mesh: {count} vertices, {} triangles", self.indices.len() / 3);

        Ok(MeshData {
            vertices,
            indices: self.indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"{
        "vertexPositions": [0, 0, 0, 1, 0, 0, 0, 1, 0],
        "vertexNormals": [0, 0, 1, 0, 0, 1, 0, 0, 1],
        "vertexTextureCoords": [0, 0, 1, 0, 0, 1],
        "indices": [0, 1, 2]
    }"#;

    // ── accepted input ────────────────────────────────────────────────────

    #[test]
    fn loads_minimal_triangle() {
        let mesh = MeshData::from_json_str(TRIANGLE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[2].uv, [0.0, 1.0]);
    }

    #[test]
    fn missing_texcoords_default_to_zero() {
        let text = r#"{
            "vertexPositions": [0, 0, 0, 1, 0, 0, 0, 1, 0],
            "vertexNormals": [0, 0, 1, 0, 0, 1, 0, 0, 1],
            "indices": [0, 1, 2]
        }"#;
        let mesh = MeshData::from_json_str(text).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.uv == [0.0, 0.0]));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let text = TRIANGLE.replacen('{', r#"{ "name": "tri", "#, 1);
        assert!(MeshData::from_json_str(&text).is_ok());
    }

    // ── rejected input ────────────────────────────────────────────────────

    #[test]
    fn rejects_ragged_positions() {
        let text = r#"{
            "vertexPositions": [0, 0, 0, 1],
            "vertexNormals": [0, 0, 1, 0],
            "indices": [0, 0, 0]
        }"#;
        assert!(matches!(MeshData::from_json_str(text), Err(MeshError::PositionArity(4))));
    }

    #[test]
    fn rejects_normal_mismatch() {
        let text = r#"{
            "vertexPositions": [0, 0, 0, 1, 0, 0, 0, 1, 0],
            "vertexNormals": [0, 0, 1],
            "indices": [0, 1, 2]
        }"#;
        assert!(matches!(
            MeshData::from_json_str(text),
            Err(MeshError::NormalCount { normals: 3, expected: 9 })
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let text = TRIANGLE.replace("[0, 1, 2]", "[0, 1, 3]");
        assert!(matches!(
            MeshData::from_json_str(&text),
            Err(MeshError::IndexOutOfRange { index: 3, at: 2, vertices: 3 })
        ));
    }

    #[test]
    fn rejects_partial_triangle() {
        let text = TRIANGLE.replace("[0, 1, 2]", "[0, 1]");
        assert!(matches!(MeshData::from_json_str(&text), Err(MeshError::IndexArity(2))));
    }

    #[test]
    fn rejects_missing_field() {
        let text = r#"{ "vertexPositions": [], "indices": [] }"#;
        assert!(matches!(MeshData::from_json_str(text), Err(MeshError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MeshData::from_json_path("/definitely/not/here/teapot.json").unwrap_err();
        assert!(matches!(err, MeshError::Io { .. }));
        assert!(err.to_string().contains("teapot.json"));
    }
}
