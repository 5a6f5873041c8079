//! Generated mesh artifacts: flat vertex data plus width-adaptive indices.

/// Index data in either narrow (u16) or wide (u32) form.
///
/// The narrow form is chosen whenever every index of the mesh fits in 16
/// bits; this is a memory/bandwidth optimization only, both forms encode
/// the same traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshIndices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl MeshIndices {
    /// Largest vertex count that the narrow index form can address.
    pub const NARROW_LIMIT: usize = 1 << 16;

    /// Pack index values, picking the narrowest width that can address
    /// `vertex_count` vertices.
    pub fn for_vertex_count(values: Vec<u32>, vertex_count: usize) -> Self {
        if vertex_count <= Self::NARROW_LIMIT {
            MeshIndices::U16(values.into_iter().map(|v| v as u16).collect())
        } else {
            MeshIndices::U32(values)
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            MeshIndices::U16(values) => values.len(),
            MeshIndices::U32(values) => values.len(),
        }
    }

    /// Returns true if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one index as u32 regardless of storage width.
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            MeshIndices::U16(values) => values.get(i).map(|&v| u32::from(v)),
            MeshIndices::U32(values) => values.get(i).copied(),
        }
    }

    /// Iterate the indices as u32 values.
    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            MeshIndices::U16(values) => Box::new(values.iter().map(|&v| u32::from(v))),
            MeshIndices::U32(values) => Box::new(values.iter().copied()),
        }
    }

    /// Raw byte view for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MeshIndices::U16(values) => bytemuck::cast_slice(values),
            MeshIndices::U32(values) => bytemuck::cast_slice(values),
        }
    }
}

/// A generated mesh: homogeneous vertex quadruples and optional indices.
///
/// Vertices are a flat `x, y, z, w` sequence with `w` always `1.0`.
/// Spheres carry a triangle-strip index buffer; circles carry none and are
/// consumed as a closed line loop over their vertices in order. A mesh is
/// immutable once generated; the fingerprint cache owns it for the life of
/// the animation session.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub indices: Option<MeshIndices>,
}

impl Mesh {
    /// Number of vertices (quadruples) in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Read one vertex quadruple. Panics if out of range.
    pub fn position(&self, index: usize) -> [f32; 4] {
        let base = index * 4;
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
            self.vertices[base + 3],
        ]
    }

    /// Raw byte view of the vertex data for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
