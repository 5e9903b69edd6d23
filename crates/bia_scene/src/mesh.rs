use bia_core::ExtractError;
use glam::Vec3;

/// A static triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl MeshData {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A mesh without vertices carries no geometry worth keeping.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.positions.is_empty()
    }

    /// Checks that the mesh can stand on its own as a scene mesh.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.indices.len() % 3 != 0 {
            return Err(ExtractError::PartialTriangle(self.indices.len()));
        }
        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(ExtractError::NonFiniteVertex(i));
        }
        let vertex_count = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ExtractError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Axis-aligned box centred on the origin, 8 shared corners.
    #[must_use]
    pub fn new_box(width: f32, height: f32, depth: f32) -> Self {
        let w = width / 2.0;
        let h = height / 2.0;
        let d = depth / 2.0;

        let positions = vec![
            Vec3::new(-w, -h, d),
            Vec3::new(w, -h, d),
            Vec3::new(w, h, d),
            Vec3::new(-w, h, d),
            Vec3::new(-w, -h, -d),
            Vec3::new(w, -h, -d),
            Vec3::new(w, h, -d),
            Vec3::new(-w, h, -d),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3, // front (+Z)
            5, 4, 7, 5, 7, 6, // back (-Z)
            3, 2, 6, 3, 6, 7, // top (+Y)
            4, 5, 1, 4, 1, 0, // bottom (-Y)
            1, 5, 6, 1, 6, 2, // right (+X)
            4, 0, 3, 4, 3, 7, // left (-X)
        ];

        Self { positions, indices }
    }

    /// Square in the XY plane centred on the origin.
    #[must_use]
    pub fn new_plane(size: f32) -> Self {
        let s = size / 2.0;
        Self {
            positions: vec![
                Vec3::new(-s, -s, 0.0),
                Vec3::new(s, -s, 0.0),
                Vec3::new(s, s, 0.0),
                Vec3::new(-s, s, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}
