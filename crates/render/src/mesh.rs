use glam::Vec3;
use std::f32::consts::PI;

use crate::backend::{DrawBackend, Primitive};

/// Largest accepted `slices` or `stacks` count.
///
/// At this bound the cache holds about 16.8 million vertices per buffer.
pub const MAX_SUBDIVISIONS: u32 = 4096;

/// Errors from sphere generation and emission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

/// Cached unit-sphere tessellation, emitted as scaled triangle strips.
///
/// Vertices are laid out row-major: row `i` is stack `0..=stacks` from the
/// north pole (+Y) to the south pole, column `j` is slice `0..=slices` around
/// the Y axis. The seam column and both pole rows are duplicated rather than
/// shared, so every row has exactly `slices + 1` entries.
///
/// The cache holds radius-1 geometry only; the radius is applied per emission,
/// so one cached mesh serves every radius with the same `(slices, stacks)`.
#[derive(Debug, Default)]
pub struct SphereMesh {
    dimensions: Option<(u32, u32)>,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    generation: u64,
}

impl SphereMesh {
    /// An empty cache. Nothing is generated until the first request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached `(slices, stacks)`, or `None` while the cache is empty.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Number of times the cache has been rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flat index of `(row, col)` for the cached slice count.
    pub fn vertex_index(&self, row: u32, col: u32) -> Option<usize> {
        let (slices, stacks) = self.dimensions?;
        if row > stacks || col > slices {
            return None;
        }
        Some(row as usize * (slices as usize + 1) + col as usize)
    }

    /// Make sure the cache holds a `(slices, stacks)` tessellation.
    ///
    /// Both counts must lie in `1..=MAX_SUBDIVISIONS`; anything else is
    /// rejected before the cache is touched. A matching cache is left
    /// untouched. Any mismatch throws the old buffers away and rebuilds them
    /// from scratch.
    pub fn ensure_generated(&mut self, slices: u32, stacks: u32) -> Result<(), MeshError> {
        if slices == 0 || slices > MAX_SUBDIVISIONS {
            return Err(MeshError::InvalidParameter {
                name: "slices",
                value: slices.to_string(),
            });
        }
        if stacks == 0 || stacks > MAX_SUBDIVISIONS {
            return Err(MeshError::InvalidParameter {
                name: "stacks",
                value: stacks.to_string(),
            });
        }
        let count = (slices as usize)
            .checked_add(1)
            .zip((stacks as usize).checked_add(1))
            .and_then(|(cols, rows)| cols.checked_mul(rows))
            .ok_or_else(|| MeshError::InvalidParameter {
                name: "vertex count",
                value: format!("{slices}x{stacks}"),
            })?;

        if self.dimensions == Some((slices, stacks))
            && !self.vertices.is_empty()
            && !self.normals.is_empty()
        {
            return Ok(());
        }

        self.vertices.clear();
        self.normals.clear();
        self.vertices.reserve(count);
        self.normals.reserve(count);

        for i in 0..=stacks {
            let phi = PI * i as f32 / stacks as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            for j in 0..=slices {
                let theta = 2.0 * PI * j as f32 / slices as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();

                // On a unit sphere at the origin the normal is the position.
                let p = Vec3::new(cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
                self.normals.push(p);
                self.vertices.push(p);
            }
        }

        self.dimensions = Some((slices, stacks));
        self.generation += 1;
        tracing::debug!(
            slices,
            stacks,
            vertices = self.vertices.len(),
            generation = self.generation,
            "sphere mesh regenerated"
        );
        Ok(())
    }

    /// Emit the sphere as one triangle strip per stack, scaled by `radius`.
    ///
    /// Each strip walks the slices of rows `i` and `i + 1`, alternating
    /// between them. Normals are submitted unscaled.
    pub fn emit(
        &mut self,
        backend: &mut dyn DrawBackend,
        radius: f32,
        slices: u32,
        stacks: u32,
    ) -> Result<(), MeshError> {
        if !radius.is_finite() {
            return Err(MeshError::InvalidParameter {
                name: "radius",
                value: radius.to_string(),
            });
        }
        self.ensure_generated(slices, stacks)?;

        let row_len = slices as usize + 1;
        for i in 0..stacks as usize {
            backend.begin_primitive(Primitive::TriangleStrip);
            for j in 0..row_len {
                let current = i * row_len + j;
                let next = current + row_len;

                backend.set_normal(self.normals[current]);
                backend.emit_vertex(self.vertices[current] * radius);

                backend.set_normal(self.normals[next]);
                backend.emit_vertex(self.vertices[next] * radius);
            }
            backend.end_primitive();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingBackend;

    const EPS: f32 = 1e-5;

    #[test]
    fn starts_empty() {
        let mesh = SphereMesh::new();
        assert_eq!(mesh.dimensions(), None);
        assert!(mesh.vertices().is_empty());
        assert!(mesh.normals().is_empty());
        assert_eq!(mesh.generation(), 0);
    }

    #[test]
    fn vertex_count_matches_grid() {
        let mut mesh = SphereMesh::new();
        for (slices, stacks) in [(1, 1), (3, 2), (4, 2), (16, 16), (32, 32), (7, 5)] {
            mesh.ensure_generated(slices, stacks).unwrap();
            let expected = (slices as usize + 1) * (stacks as usize + 1);
            assert_eq!(mesh.vertices().len(), expected);
            assert_eq!(mesh.normals().len(), expected);
        }
    }

    #[test]
    fn vertices_on_unit_sphere_with_matching_normals() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(32, 16).unwrap();
        for (v, n) in mesh.vertices().iter().zip(mesh.normals()) {
            assert_eq!(v, n);
            assert!((v.length() - 1.0).abs() < EPS, "|{v}| != 1");
        }
    }

    #[test]
    fn poles_of_four_by_two() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(4, 2).unwrap();
        assert_eq!(mesh.vertices().len(), 15);

        for j in 0..=4 {
            let north = mesh.vertices()[mesh.vertex_index(0, j).unwrap()];
            let south = mesh.vertices()[mesh.vertex_index(2, j).unwrap()];
            assert!((north - Vec3::Y).length() < EPS, "north {north}");
            assert!((south - Vec3::NEG_Y).length() < EPS, "south {south}");
        }

        // Equator, first column points along +X.
        let equator = mesh.vertices()[mesh.vertex_index(1, 0).unwrap()];
        assert!((equator - Vec3::X).length() < EPS);
    }

    #[test]
    fn seam_column_duplicates_first_column() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(8, 4).unwrap();
        for row in 0..=4 {
            let first = mesh.vertices()[mesh.vertex_index(row, 0).unwrap()];
            let last = mesh.vertices()[mesh.vertex_index(row, 8).unwrap()];
            assert!((first - last).length() < EPS);
        }
    }

    #[test]
    fn vertex_index_bounds() {
        let mut mesh = SphereMesh::new();
        assert_eq!(mesh.vertex_index(0, 0), None);
        mesh.ensure_generated(4, 2).unwrap();
        assert_eq!(mesh.vertex_index(1, 2), Some(7));
        assert_eq!(mesh.vertex_index(2, 4), Some(14));
        assert_eq!(mesh.vertex_index(3, 0), None);
        assert_eq!(mesh.vertex_index(0, 5), None);
    }

    #[test]
    fn matching_request_is_a_cache_hit() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(12, 6).unwrap();
        let vertices = mesh.vertices().to_vec();
        let normals = mesh.normals().to_vec();
        let ptr = mesh.vertices().as_ptr();

        mesh.ensure_generated(12, 6).unwrap();
        assert_eq!(mesh.generation(), 1);
        assert_eq!(mesh.vertices(), vertices.as_slice());
        assert_eq!(mesh.normals(), normals.as_slice());
        assert_eq!(mesh.vertices().as_ptr(), ptr);
    }

    #[test]
    fn mismatched_request_rebuilds_fully() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(32, 32).unwrap();
        mesh.ensure_generated(16, 16).unwrap();
        assert_eq!(mesh.dimensions(), Some((16, 16)));
        assert_eq!(mesh.vertices().len(), 17 * 17);
        assert_eq!(mesh.normals().len(), 17 * 17);
        assert_eq!(mesh.generation(), 2);

        // Only one dimension differs.
        mesh.ensure_generated(16, 8).unwrap();
        assert_eq!(mesh.vertices().len(), 17 * 9);
        assert_eq!(mesh.generation(), 3);
    }

    #[test]
    fn zero_counts_rejected_and_cache_kept() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(4, 2).unwrap();

        let err = mesh.ensure_generated(0, 2).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "slices", .. }));
        let err = mesh.ensure_generated(4, 0).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "stacks", .. }));

        assert_eq!(mesh.dimensions(), Some((4, 2)));
        assert_eq!(mesh.vertices().len(), 15);
    }

    #[test]
    fn oversized_counts_rejected_and_cache_kept() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(4, 2).unwrap();

        assert!(mesh.ensure_generated(u32::MAX, u32::MAX).is_err());
        let err = mesh.ensure_generated(MAX_SUBDIVISIONS + 1, 2).unwrap_err();
        assert_eq!(err.to_string(), "invalid slices: 4097");
        let err = mesh.ensure_generated(4, MAX_SUBDIVISIONS + 1).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "stacks", .. }));

        let mut rec = RecordingBackend::new();
        assert!(mesh.emit(&mut rec, 1.0, u32::MAX, 2).is_err());
        assert!(rec.commands().is_empty());

        assert_eq!(mesh.dimensions(), Some((4, 2)));
        assert_eq!(mesh.vertices().len(), 15);
        assert_eq!(mesh.generation(), 1);
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(MAX_SUBDIVISIONS, 1).unwrap();
        assert_eq!(mesh.vertices().len(), (MAX_SUBDIVISIONS as usize + 1) * 2);
    }

    #[test]
    fn non_finite_radius_rejected() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        let err = mesh.emit(&mut rec, f32::NAN, 4, 2).unwrap_err();
        assert_eq!(err.to_string(), "invalid radius: NaN");
        assert!(mesh.emit(&mut rec, f32::INFINITY, 4, 2).is_err());
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn emit_four_by_two_at_radius_two() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, 2.0, 4, 2).unwrap();

        let strips = rec.strips();
        assert_eq!(strips.len(), 2);
        assert!(strips.iter().all(|s| s.len() == 10));
        assert_eq!(strips.iter().map(Vec::len).sum::<usize>(), 20);

        for (position, normal) in strips.iter().flatten() {
            assert!((position.length() - 2.0).abs() < EPS);
            assert!((normal.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn emission_order_alternates_rows() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, 1.5, 6, 3).unwrap();

        let strips = rec.strips();
        assert_eq!(strips.len(), 3);
        for (i, strip) in strips.iter().enumerate() {
            for j in 0..=6u32 {
                let upper = mesh.vertex_index(i as u32, j).unwrap();
                let lower = mesh.vertex_index(i as u32 + 1, j).unwrap();
                let (p0, n0) = strip[2 * j as usize];
                let (p1, n1) = strip[2 * j as usize + 1];
                assert!((p0 - mesh.vertices()[upper] * 1.5).length() < EPS);
                assert!((p1 - mesh.vertices()[lower] * 1.5).length() < EPS);
                assert_eq!(n0, mesh.normals()[upper]);
                assert_eq!(n1, mesh.normals()[lower]);
            }
        }
    }

    #[test]
    fn one_cache_serves_many_radii() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, 1.0, 8, 8).unwrap();
        mesh.emit(&mut rec, 0.2, 8, 8).unwrap();
        mesh.emit(&mut rec, 5.0, 8, 8).unwrap();
        assert_eq!(mesh.generation(), 1);
        assert_eq!(rec.strips().len(), 24);
    }

    #[test]
    fn negative_radius_inverts_but_keeps_normals() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, -1.0, 4, 2).unwrap();
        let strips = rec.strips();
        let (p, n) = strips[0][0];
        assert!((p + n).length() < EPS);
    }

    #[test]
    fn degenerate_single_slice_and_stack() {
        let mut mesh = SphereMesh::new();
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, 1.0, 1, 1).unwrap();
        let strips = rec.strips();
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].len(), 4);
    }
}
