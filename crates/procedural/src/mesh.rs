use std::f64::consts::{PI, TAU};

/// Indexed triangle mesh, CCW-front, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: [f64; 3], normal: [f64; 3], uv: [f64; 2]) {
        self.positions
            .push([position[0] as f32, position[1] as f32, position[2] as f32]);
        self.normals
            .push([normal[0] as f32, normal[1] as f32, normal[2] as f32]);
        self.uvs.push([uv[0] as f32, uv[1] as f32]);
    }
}

/// Latitude/longitude sphere with +Y as the pole axis.
pub fn uv_sphere(radius: f64, lat_segments: u32, lon_segments: u32) -> MeshData {
    let lat_segments = lat_segments.max(3);
    let lon_segments = lon_segments.max(3);

    let mut mesh = MeshData::default();
    for lat in 0..=lat_segments {
        let v = lat as f64 / lat_segments as f64;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();

        for lon in 0..=lon_segments {
            let u = lon as f64 / lon_segments as f64;
            let (sin_p, cos_p) = (u * TAU).sin_cos();

            let n = [sin_t * cos_p, cos_t, sin_t * sin_p];
            mesh.push([n[0] * radius, n[1] * radius, n[2] * radius], n, [u, v]);
        }
    }

    let stride = lon_segments + 1;
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let i0 = lat * stride + lon;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            mesh.indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }
    mesh
}

/// Torus around the local Z axis (ring in the XY plane).
pub fn torus(radius: f64, tube: f64, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);

    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        let v = j as f64 / radial_segments as f64 * TAU;
        let (sin_v, cos_v) = v.sin_cos();
        for i in 0..=tubular_segments {
            let u = i as f64 / tubular_segments as f64 * TAU;
            let (sin_u, cos_u) = u.sin_cos();

            let ring = radius + tube * cos_v;
            let p = [ring * cos_u, ring * sin_u, tube * sin_v];
            let n = [cos_v * cos_u, cos_v * sin_u, sin_v];
            mesh.push(
                p,
                n,
                [
                    i as f64 / tubular_segments as f64,
                    j as f64 / radial_segments as f64,
                ],
            );
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}
