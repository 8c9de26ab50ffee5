use std::collections::HashMap;

use procedural::MeshData;
use procedural::mesh::{torus, uv_sphere};
use procedural::ring::polar_ring_mesh;
use procedural::stars::starfield;
use scene::components::MeshKind;

/// Interleaved vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Hashable identity of a [`MeshKind`]; float parameters compare by bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeshKey {
    Sphere(u32, u32),
    Torus(u64, u64, u32, u32),
    PolarRing(u64, u64, u32, u32),
    Starfield(u32, u64),
}

impl From<&MeshKind> for MeshKey {
    fn from(kind: &MeshKind) -> Self {
        match *kind {
            MeshKind::Sphere {
                lat_segments,
                lon_segments,
            } => MeshKey::Sphere(lat_segments, lon_segments),
            MeshKind::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => MeshKey::Torus(
                radius.to_bits(),
                tube.to_bits(),
                radial_segments,
                tubular_segments,
            ),
            MeshKind::PolarRing {
                inner_radius,
                outer_radius,
                theta_segments,
                radial_segments,
            } => MeshKey::PolarRing(
                inner_radius.to_bits(),
                outer_radius.to_bits(),
                theta_segments,
                radial_segments,
            ),
            MeshKind::Starfield { count, extent } => MeshKey::Starfield(count, extent.to_bits()),
        }
    }
}

/// Unit-radius geometry for `kind`; drawables carry radius in their transform.
///
/// A starfield is a point list: one vertex per star, `uv.x` holding its size.
pub fn build_mesh(kind: &MeshKind) -> MeshData {
    match *kind {
        MeshKind::Sphere {
            lat_segments,
            lon_segments,
        } => uv_sphere(1.0, lat_segments, lon_segments),
        MeshKind::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments, tubular_segments),
        MeshKind::PolarRing {
            inner_radius,
            outer_radius,
            theta_segments,
            radial_segments,
        } => polar_ring_mesh(inner_radius, outer_radius, theta_segments, radial_segments),
        MeshKind::Starfield { count, extent } => {
            let mut mesh = MeshData::default();
            for star in starfield(count, extent) {
                mesh.positions.push(star.position.to_f32());
                mesh.normals.push([0.0, 1.0, 0.0]);
                mesh.uvs.push([star.size as f32, 0.0]);
            }
            mesh
        }
    }
}

pub fn interleave(mesh: &MeshData) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.uvs)
        .map(|((&position, &normal), &uv)| Vertex {
            position,
            normal,
            uv,
        })
        .collect()
}

/// Builds each distinct mesh once.
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: HashMap<MeshKey, MeshData>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, kind: &MeshKind) -> (MeshKey, &MeshData) {
        let key = MeshKey::from(kind);
        let mesh = self.meshes.entry(key).or_insert_with(|| build_mesh(kind));
        (key, mesh)
    }

    pub fn get(&self, key: &MeshKey) -> Option<&MeshData> {
        self.meshes.get(key)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_kinds_share_one_mesh() {
        let mut cache = MeshCache::new();
        let a = MeshKind::Sphere {
            lat_segments: 48,
            lon_segments: 48,
        };
        let (ka, _) = cache.get_or_build(&a);
        let (kb, _) = cache.get_or_build(&a);
        assert_eq!(ka, kb);
        assert_eq!(cache.len(), 1);

        cache.get_or_build(&MeshKind::Torus {
            radius: 1.22,
            tube: 0.005,
            radial_segments: 16,
            tubular_segments: 128,
        });
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn starfield_is_one_point_per_star() {
        let mesh = build_mesh(&MeshKind::Starfield {
            count: 64,
            extent: 120.0,
        });
        assert_eq!(mesh.vertex_count(), 64);
        assert!(mesh.indices.is_empty());
        assert!(mesh.uvs.iter().all(|uv| uv[0] >= 0.015 && uv[0] <= 0.075));
    }

    #[test]
    fn interleave_keeps_vertex_order() {
        let mesh = build_mesh(&MeshKind::Sphere {
            lat_segments: 4,
            lon_segments: 6,
        });
        let verts = interleave(&mesh);
        assert_eq!(verts.len(), mesh.vertex_count());
        assert_eq!(verts[3].position, mesh.positions[3]);
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
