//! Triangle meshes for the globe, the atmosphere shell and the marker
//! cylinders. Front faces wind counter-clockwise seen from outside.

use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, Default)]
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

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    fn push(&mut self, p: [f32; 3], n: [f32; 3], uv: [f32; 2]) -> u32 {
        let i = self.positions.len() as u32;
        self.positions.push(p);
        self.normals.push(n);
        self.uvs.push(uv);
        i
    }
}

/// Latitude/longitude sphere.
///
/// Texture coordinates follow an equirectangular image with row 0 at the
/// north pole: `u = (lon + 180) / 360`, `v = (90 - lat) / 180`, which is the
/// same parametrisation as [`crate::geo::lat_lon_to_cartesian`].
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(hs as usize + 1);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // pole rows share a point; centre their u on the triangle they cap
        let u_offset = if iy == 0 {
            0.5 / ws as f32
        } else if iy == hs {
            -0.5 / ws as f32
        } else {
            0.0
        };
        let mut row = Vec::with_capacity(ws as usize + 1);
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let (sin_p, cos_p) = (v * PI).sin_cos();
            let n = [-cos_t * sin_p, cos_p, sin_t * sin_p];
            let p = [n[0] * radius, n[1] * radius, n[2] * radius];
            row.push(mesh.push(p, n, [u + u_offset, v]));
        }
        grid.push(row);
    }

    for iy in 0..hs as usize {
        for ix in 0..ws as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Closed cylinder of `radius` spanning `y ∈ [0, 1]`; markers scale it along
/// `y` to their height.
pub fn unit_cylinder(radius: f32, segments: u32) -> MeshData {
    let n = segments.max(3);
    let mut mesh = MeshData::default();

    // side wall, duplicated seam column for clean uvs
    let mut bottom = Vec::with_capacity(n as usize + 1);
    let mut top = Vec::with_capacity(n as usize + 1);
    for i in 0..=n {
        let u = i as f32 / n as f32;
        let (s, c) = (u * TAU).sin_cos();
        let normal = [s, 0.0, c];
        bottom.push(mesh.push([radius * s, 0.0, radius * c], normal, [u, 1.0]));
        top.push(mesh.push([radius * s, 1.0, radius * c], normal, [u, 0.0]));
    }
    for i in 0..n as usize {
        mesh.indices
            .extend_from_slice(&[bottom[i], bottom[i + 1], top[i + 1]]);
        mesh.indices.extend_from_slice(&[bottom[i], top[i + 1], top[i]]);
    }

    // caps
    for (y, ny) in [(1.0_f32, 1.0_f32), (0.0, -1.0)] {
        let center = mesh.push([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]);
        let ring: Vec<u32> = (0..n)
            .map(|i| {
                let (s, c) = (i as f32 / n as f32 * TAU).sin_cos();
                mesh.push(
                    [radius * s, y, radius * c],
                    [0.0, ny, 0.0],
                    [0.5 + 0.5 * s, 0.5 - 0.5 * c],
                )
            })
            .collect();
        for i in 0..n as usize {
            let j = (i + 1) % n as usize;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, ring[i], ring[j]]);
            } else {
                mesh.indices.extend_from_slice(&[center, ring[j], ring[i]]);
            }
        }
    }
    mesh
}
