use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use scrollscape_scene::Shape;

/// Vertex layout shared by every scene-object mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
}

/// CPU-side mesh, ready for upload.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Bit-exact cache key for the mesh generated from a shape. Two shapes
/// with identical parameters share one GPU mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MeshKey([u32; 5]);

pub fn key(shape: &Shape) -> MeshKey {
    match *shape {
        Shape::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => MeshKey([
            0,
            radius.to_bits(),
            tube.to_bits(),
            radial_segments,
            tubular_segments,
        ]),
        Shape::Sphere {
            radius,
            width_segments,
            height_segments,
        } => MeshKey([1, radius.to_bits(), width_segments, height_segments, 0]),
        Shape::Cuboid {
            width,
            height,
            depth,
        } => MeshKey([2, width.to_bits(), height.to_bits(), depth.to_bits(), 0]),
    }
}

pub fn build(shape: &Shape) -> MeshData {
    match *shape {
        Shape::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments, tubular_segments),
        Shape::Sphere {
            radius,
            width_segments,
            height_segments,
        } => uv_sphere(radius, width_segments, height_segments),
        Shape::Cuboid {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
    }
}

/// Triangulate a (rows + 1) x (cols + 1) row-major vertex lattice.
fn grid_indices(rows: u32, cols: u32) -> Vec<u32> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);
    for j in 0..rows {
        for i in 0..cols {
            let a = j * stride + i;
            let b = (j + 1) * stride + i;
            let c = (j + 1) * stride + i + 1;
            let d = j * stride + i + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

/// Ring in the XY plane; `u` runs along the ring, `v` around the tube.
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=tubular {
        let u = j as f32 / tubular as f32 * TAU;
        let (sin_u, cos_u) = u.sin_cos();
        for i in 0..=radial {
            let v = i as f32 / radial as f32 * TAU;
            let (sin_v, cos_v) = v.sin_cos();
            let ring = radius + tube * cos_v;
            vertices.push(Vertex {
                position: [ring * cos_u, ring * sin_u, tube * sin_v],
                normal: [cos_v * cos_u, cos_v * sin_u, sin_v],
                uv: [j as f32 / tubular as f32, i as f32 / radial as f32],
                tangent: [-sin_u, cos_u, 0.0],
            });
        }
    }
    MeshData {
        vertices,
        indices: grid_indices(tubular, radial),
    }
}

/// Latitude/longitude sphere with poles on the Y axis. The pole rows
/// collapse to points; their triangles are degenerate and harmless.
fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    for y in 0..=height {
        let v = y as f32 / height as f32;
        let (sin_phi, cos_phi) = (v * PI).sin_cos();
        for x in 0..=width {
            let u = x as f32 / width as f32;
            let (sin_theta, cos_theta) = (u * TAU).sin_cos();
            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(Vertex {
                position: [
                    radius * normal[0],
                    radius * normal[1],
                    radius * normal[2],
                ],
                normal,
                uv: [u, v],
                tangent: [-sin_theta, 0.0, cos_theta],
            });
        }
    }
    MeshData {
        vertices,
        indices: grid_indices(height, width),
    }
}

/// Axis-aligned box: four vertices per face so normals and UVs stay sharp.
fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let half = [width * 0.5, height * 0.5, depth * 0.5];
    // (normal, u axis, v axis) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u_axis, v_axis) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0_f32, -1.0_f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut position = [0.0; 3];
            for k in 0..3 {
                position[k] = (normal[k] + su * u_axis[k] + sv * v_axis[k]) * half[k];
            }
            vertices.push(Vertex {
                position,
                normal,
                uv: [(su + 1.0) * 0.5, (1.0 - sv) * 0.5],
                tangent: u_axis,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    MeshData { vertices, indices }
}
