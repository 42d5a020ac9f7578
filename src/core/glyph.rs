// Extruded text geometry from a pre-parsed glyph outline.
//
// The outline is compile-time contour data in em units (y up). Each
// contour is a simple polygon; ear clipping triangulates the caps and the
// contour edges become side walls and the wireframe line list.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

pub const TEXT_SIZE: f32 = 200.0;
pub const TEXT_DEPTH: f32 = 20.0;

pub struct GlyphOutline {
    pub contours: &'static [&'static [[f32; 2]]],
}

/// Block letters "HAO", stencil style so every contour stays a simple
/// polygon without holes. Advance width 2.42 em.
pub const GLYPH_HAO: GlyphOutline = GlyphOutline {
    contours: &[
        // H
        &[[0.00, 0.00], [0.16, 0.00], [0.16, 1.00], [0.00, 1.00]],
        &[[0.54, 0.00], [0.70, 0.00], [0.70, 1.00], [0.54, 1.00]],
        &[[0.16, 0.42], [0.54, 0.42], [0.54, 0.58], [0.16, 0.58]],
        // A (legs meet at the apex, stencil crossbar)
        &[[0.85, 0.00], [1.01, 0.00], [1.20, 1.00], [1.12, 1.00]],
        &[[1.39, 0.00], [1.55, 0.00], [1.28, 1.00], [1.20, 1.00]],
        &[[1.10, 0.30], [1.34, 0.30], [1.34, 0.44], [1.10, 0.44]],
        // O (ring as four bars)
        &[[1.70, 0.00], [1.86, 0.00], [1.86, 1.00], [1.70, 1.00]],
        &[[2.26, 0.00], [2.42, 0.00], [2.42, 1.00], [2.26, 1.00]],
        &[[1.86, 0.00], [2.26, 0.00], [2.26, 0.16], [1.86, 0.16]],
        &[[1.86, 0.84], [2.26, 0.84], [2.26, 1.00], [1.86, 1.00]],
    ],
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Solid mesh plus the unique-edge wireframe of the same extrusion.
pub struct TextGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub edge_positions: Vec<[f32; 3]>,
    pub edge_indices: Vec<u32>,
    pub min: Vec3,
    pub max: Vec3,
}

pub fn polygon_area(points: &[[f32; 2]]) -> f32 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let [x0, y0] = points[i];
        let [x1, y1] = points[(i + 1) % points.len()];
        sum += x0 * y1 - x1 * y0;
    }
    0.5 * sum
}

#[inline]
fn cross(o: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

fn point_in_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ear-clip a simple polygon. Indices reference the input slice; triangles
/// come out counter-clockwise regardless of the input winding. A simple
/// n-gon yields exactly n - 2 triangles.
pub fn triangulate(points: &[[f32; 2]]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let mut ring: Vec<u32> = if polygon_area(points) >= 0.0 {
        (0..n as u32).collect()
    } else {
        (0..n as u32).rev().collect()
    };
    let mut tris = Vec::with_capacity(n - 2);
    while ring.len() > 3 {
        let m = ring.len();
        let mut clipped = false;
        for i in 0..m {
            let ia = ring[(i + m - 1) % m];
            let ib = ring[i];
            let ic = ring[(i + 1) % m];
            let (a, b, c) = (
                points[ia as usize],
                points[ib as usize],
                points[ic as usize],
            );
            if cross(a, b, c) <= 0.0 {
                continue; // reflex corner, not an ear
            }
            let blocked = ring.iter().any(|&ip| {
                ip != ia && ip != ib && ip != ic && point_in_triangle(points[ip as usize], a, b, c)
            });
            if blocked {
                continue;
            }
            tris.push([ia, ib, ic]);
            ring.remove(i);
            clipped = true;
            break;
        }
        if !clipped {
            // degenerate input; stop instead of spinning
            break;
        }
    }
    if ring.len() == 3 {
        tris.push([ring[0], ring[1], ring[2]]);
    }
    tris
}

#[derive(Default)]
struct EdgeSet {
    positions: Vec<[f32; 3]>,
    lookup: FnvHashMap<[i32; 3], u32>,
    segments: FnvHashSet<(u32, u32)>,
}

impl EdgeSet {
    fn key(p: [f32; 3]) -> [i32; 3] {
        p.map(|v| (v * 1024.0).round() as i32)
    }

    fn vertex(&mut self, p: [f32; 3]) -> u32 {
        let key = Self::key(p);
        if let Some(&i) = self.lookup.get(&key) {
            return i;
        }
        let i = self.positions.len() as u32;
        self.positions.push(p);
        self.lookup.insert(key, i);
        i
    }

    fn insert(&mut self, a: [f32; 3], b: [f32; 3]) {
        let ia = self.vertex(a);
        let ib = self.vertex(b);
        if ia == ib {
            return;
        }
        self.segments
            .insert(if ia < ib { (ia, ib) } else { (ib, ia) });
    }

    fn into_buffers(self) -> (Vec<[f32; 3]>, Vec<u32>) {
        let EdgeSet {
            positions,
            segments,
            ..
        } = self;
        let mut segs: Vec<(u32, u32)> = segments.into_iter().collect();
        segs.sort_unstable();
        let mut indices = Vec::with_capacity(segs.len() * 2);
        for (a, b) in segs {
            indices.push(a);
            indices.push(b);
        }
        (positions, indices)
    }
}

/// Build the extruded mesh and its wireframe. The back cap sits at z = 0
/// and the front cap at z = `depth`, matching an outline extruded toward
/// the viewer.
pub fn extrude_glyph(outline: &GlyphOutline, size: f32, depth: f32) -> TextGeometry {
    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut edges = EdgeSet::default();

    for contour in outline.contours {
        let scaled: Vec<[f32; 2]> = contour.iter().map(|[x, y]| [x * size, y * size]).collect();
        let tris = triangulate(&scaled);

        let front_base = vertices.len() as u32;
        for [x, y] in &scaled {
            vertices.push(MeshVertex {
                position: [*x, *y, depth],
                normal: [0.0, 0.0, 1.0],
            });
        }
        for [a, b, c] in &tris {
            indices.extend_from_slice(&[front_base + a, front_base + b, front_base + c]);
        }

        let back_base = vertices.len() as u32;
        for [x, y] in &scaled {
            vertices.push(MeshVertex {
                position: [*x, *y, 0.0],
                normal: [0.0, 0.0, -1.0],
            });
        }
        for [a, b, c] in &tris {
            indices.extend_from_slice(&[back_base + c, back_base + b, back_base + a]);
        }

        // side walls with flat outward normals
        let k = scaled.len();
        let ccw = polygon_area(&scaled) >= 0.0;
        for i in 0..k {
            let (p0, p1) = if ccw {
                (scaled[i], scaled[(i + 1) % k])
            } else {
                (scaled[(i + 1) % k], scaled[i])
            };
            let ex = p1[0] - p0[0];
            let ey = p1[1] - p0[1];
            let len = (ex * ex + ey * ey).sqrt().max(f32::EPSILON);
            let normal = [ey / len, -ex / len, 0.0];
            let base = vertices.len() as u32;
            vertices.push(MeshVertex {
                position: [p0[0], p0[1], 0.0],
                normal,
            });
            vertices.push(MeshVertex {
                position: [p1[0], p1[1], 0.0],
                normal,
            });
            vertices.push(MeshVertex {
                position: [p1[0], p1[1], depth],
                normal,
            });
            vertices.push(MeshVertex {
                position: [p0[0], p0[1], depth],
                normal,
            });
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        // wireframe: both cap outlines plus the corner posts
        for i in 0..k {
            let p0 = scaled[i];
            let p1 = scaled[(i + 1) % k];
            edges.insert([p0[0], p0[1], depth], [p1[0], p1[1], depth]);
            edges.insert([p0[0], p0[1], 0.0], [p1[0], p1[1], 0.0]);
            edges.insert([p0[0], p0[1], 0.0], [p0[0], p0[1], depth]);
        }
    }

    let (edge_positions, edge_indices) = edges.into_buffers();

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for v in &vertices {
        min = min.min(Vec3::from(v.position));
        max = max.max(Vec3::from(v.position));
    }

    TextGeometry {
        vertices,
        indices,
        edge_positions,
        edge_indices,
        min,
        max,
    }
}
