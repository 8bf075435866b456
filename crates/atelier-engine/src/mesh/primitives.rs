use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::{MeshData, Vertex};

/// Rim points used by the landscape's circles.
pub const CIRCLE_SEGMENTS: u32 = 50;

impl MeshData {
    /// Unit square centred on the origin.
    pub fn square() -> Self {
        let corners = [(0.5, 0.5), (-0.5, 0.5), (-0.5, -0.5), (0.5, -0.5)];
        Self {
            vertices: corners
                .iter()
                .map(|&(x, y)| Vertex::new([x, y, 0.0], [0.0, 0.0, 1.0], [x + 0.5, y + 0.5]))
                .collect(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Isoceles triangle pointing up, base at y = -0.5.
    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                Vertex::flat(0.0, 0.5),
                Vertex::flat(-0.5, -0.5),
                Vertex::flat(0.5, -0.5),
            ],
            indices: vec![0, 1, 2],
        }
    }

    /// Unit-radius disc as a fan: vertex 0 is the centre, 1..=segments the rim
    /// starting at +X. Fan triangles are `(0, i, i+1)` for `i in 0..segments`
    /// plus `(0, segments, 1)` closing the seam; the first of those is
    /// degenerate and rasterizes nothing.
    pub fn circle(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(segments as usize + 1);
        vertices.push(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]));
        for i in 0..segments {
            let a = i as f32 / segments as f32 * TAU;
            let (s, c) = a.sin_cos();
            vertices.push(Vertex::new([c, s, 0.0], [0.0, 0.0, 1.0], [0.5 + 0.5 * c, 0.5 + 0.5 * s]));
        }

        let mut indices = Vec::with_capacity(3 * (segments as usize + 1));
        for i in 0..segments {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
        indices.extend_from_slice(&[0, segments, 1]);

        Self { vertices, indices }
    }

    /// Unit cube centred on the origin: four vertices per face so every face
    /// carries its own normal and a full (0,0)..(1,1) texture square.
    pub fn cube() -> Self {
        // (normal, u axis, v axis) per face; corners are n/2 ± u/2 ± v/2.
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),  // front
            ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),  // top
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]), // bottom
            ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),  // right
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]), // left
        ];
        const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face, (n, u, v)) in FACES.iter().enumerate() {
            for &(cu, cv) in &CORNERS {
                let p = [
                    n[0] * 0.5 + u[0] * cu + v[0] * cv,
                    n[1] * 0.5 + u[1] * cu + v[1] * cv,
                    n[2] * 0.5 + u[2] * cu + v[2] * cv,
                ];
                vertices.push(Vertex::new(p, *n, [cu + 0.5, cv + 0.5]));
            }
            let base = face as u32 * 4;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Sphere built from latitude rings between replicated pole rows.
    ///
    /// Rows: `nslices` copies of the south pole, `nstacks - 2` rings at
    /// latitude `j * 2π / nslices - π/2`, then `nslices` copies of the north
    /// pole. With `nstacks = nslices / 2 + 1` the rings are evenly spaced pole
    /// to pole. Texture coordinates are not generated.
    pub fn pole_sphere(nslices: u32, nstacks: u32, radius: f32) -> Self {
        let nslices = nslices.max(3);
        let nstacks = nstacks.max(2);
        let mut vertices = Vec::with_capacity((nslices * nstacks) as usize);

        let pole = |y: f32| Vertex::new([0.0, y * radius, 0.0], [0.0, y, 0.0], [0.0, 0.0]);

        vertices.extend((0..nslices).map(|_| pole(-1.0)));
        for j in 1..nstacks - 1 {
            let theta1 = j as f32 * TAU / nslices as f32 - FRAC_PI_2;
            let (s1, c1) = theta1.sin_cos();
            for i in 0..nslices {
                let theta2 = i as f32 * TAU / nslices as f32;
                let (s2, c2) = theta2.sin_cos();
                let n = [c1 * c2, s1, c1 * s2];
                vertices.push(Vertex::new([n[0] * radius, n[1] * radius, n[2] * radius], n, [0.0, 0.0]));
            }
        }
        vertices.extend((0..nslices).map(|_| pole(1.0)));

        let mut indices = Vec::with_capacity(((nstacks - 1) * 6 * (nslices + 1)) as usize);
        for j in 0..nstacks - 1 {
            for i in 0..=nslices {
                let mi = i % nslices;
                let mi2 = (i + 1) % nslices;
                indices.extend_from_slice(&[
                    (j + 1) * nslices + mi,
                    j * nslices + mi,
                    j * nslices + mi2,
                    (j + 1) * nslices + mi,
                    j * nslices + mi2,
                    (j + 1) * nslices + mi2,
                ]);
            }
        }

        Self { vertices, indices }
    }

    /// Latitude/longitude sphere with a texture seam: `(nslices+1)(nstacks+1)`
    /// vertices, ring `i` at polar angle `iπ/nslices`, meridian `j` at
    /// azimuth `2πj/nstacks`, uv `(1 - j/nstacks, 1 - i/nslices)`.
    pub fn uv_sphere(nslices: u32, nstacks: u32, radius: f32) -> Self {
        let nslices = nslices.max(2);
        let nstacks = nstacks.max(3);
        let mut vertices = Vec::with_capacity(((nslices + 1) * (nstacks + 1)) as usize);

        for i in 0..=nslices {
            let (s1, c1) = (i as f32 * PI / nslices as f32).sin_cos();
            for j in 0..=nstacks {
                let (s2, c2) = (j as f32 * TAU / nstacks as f32).sin_cos();
                let n = [c2 * s1, c1, s2 * s1];
                vertices.push(Vertex::new(
                    [n[0] * radius, n[1] * radius, n[2] * radius],
                    n,
                    [1.0 - j as f32 / nstacks as f32, 1.0 - i as f32 / nslices as f32],
                ));
            }
        }

        let mut indices = Vec::with_capacity((6 * nslices * nstacks) as usize);
        for i in 0..nslices {
            for j in 0..nstacks {
                let id1 = i * (nstacks + 1) + j;
                let id2 = id1 + nstacks + 1;
                indices.extend_from_slice(&[id1, id2, id1 + 1, id2, id2 + 1, id1 + 1]);
            }
        }

        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &MeshData) {
        for v in &mesh.vertices {
            let [x, y, z] = v.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal {:?} has length {len}", v.normal);
        }
    }

    // ── 2D shapes ─────────────────────────────────────────────────────────

    #[test]
    fn square_is_two_triangles() {
        let sq = MeshData::square();
        assert_eq!(sq.vertex_count(), 4);
        assert_eq!(sq.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(sq.vertices.iter().all(|v| v.position[0].abs() == 0.5 && v.position[1].abs() == 0.5));
    }

    #[test]
    fn triangle_apex_up() {
        let tri = MeshData::triangle();
        assert_eq!(tri.vertices[0].position, [0.0, 0.5, 0.0]);
        assert_eq!(tri.triangle_count(), 1);
    }

    #[test]
    fn circle_fan_layout() {
        let c = MeshData::circle(CIRCLE_SEGMENTS);
        assert_eq!(c.vertex_count(), 51);
        assert_eq!(c.indices.len(), 3 * 51);
        assert_eq!(&c.indices[..6], &[0, 0, 1, 0, 1, 2]);
        assert_eq!(&c.indices[c.indices.len() - 3..], &[0, 50, 1]);
        assert!(c.indices_in_bounds());
    }

    #[test]
    fn circle_rim_is_on_unit_circle() {
        let c = MeshData::circle(12);
        for v in &c.vertices[1..] {
            let [x, y, _] = v.position;
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-5);
        }
        assert_eq!(c.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    // ── cube ──────────────────────────────────────────────────────────────

    #[test]
    fn cube_counts() {
        let cube = MeshData::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices_in_bounds());
        assert_unit_normals(&cube);
    }

    #[test]
    fn cube_face_vertices_lie_on_their_face() {
        let cube = MeshData::cube();
        for v in &cube.vertices {
            let n = v.normal;
            let p = v.position;
            let along = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!((along - 0.5).abs() < 1e-6);
            assert!(p.iter().all(|c| c.abs() <= 0.5 + 1e-6));
        }
    }

    // ── spheres ───────────────────────────────────────────────────────────

    #[test]
    fn pole_sphere_counts() {
        let s = MeshData::pole_sphere(30, 16, 1.0);
        assert_eq!(s.vertex_count(), 30 * 16);
        assert_eq!(s.indices.len(), 15 * 6 * 31);
        assert!(s.indices_in_bounds());
        assert_unit_normals(&s);
    }

    #[test]
    fn pole_sphere_poles() {
        let s = MeshData::pole_sphere(30, 16, 2.0);
        assert_eq!(s.vertices[0].position, [0.0, -2.0, 0.0]);
        assert_eq!(s.vertices.last().map(|v| v.position), Some([0.0, 2.0, 0.0]));
    }

    #[test]
    fn uv_sphere_counts_and_radius() {
        let s = MeshData::uv_sphere(50, 50, 1.5);
        assert_eq!(s.vertex_count(), 51 * 51);
        assert_eq!(s.indices.len(), 6 * 50 * 50);
        assert!(s.indices_in_bounds());
        for v in &s.vertices {
            let [x, y, z] = v.position;
            assert!(((x * x + y * y + z * z).sqrt() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn uv_sphere_texcoords_span_unit_square() {
        let s = MeshData::uv_sphere(8, 8, 1.0);
        assert_eq!(s.vertices[0].uv, [1.0, 1.0]);
        assert_eq!(s.vertices.last().map(|v| v.uv), Some([0.0, 0.0]));
    }

    // ── outline ───────────────────────────────────────────────────────────

    #[test]
    fn outline_closes_the_loop() {
        let sq = MeshData::square();
        assert_eq!(
            sq.outline_indices(),
            vec![0, 1, 1, 2, 2, 0, 0, 2, 2, 3, 3, 0]
        );
    }

    #[test]
    fn outline_of_empty_mesh_is_empty() {
        assert!(MeshData::default().outline_indices().is_empty());
    }
}
