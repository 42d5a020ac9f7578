// Host-side tests for glyph triangulation and extrusion.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod glyph {
    include!("../src/core/glyph.rs");
}

use glyph::*;

fn tri_area_sum(points: &[[f32; 2]], tris: &[[u32; 3]]) -> f32 {
    tris.iter()
        .map(|[a, b, c]| {
            let pa = points[*a as usize];
            let pb = points[*b as usize];
            let pc = points[*c as usize];
            0.5 * ((pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0])).abs()
        })
        .sum()
}

#[test]
fn convex_quad_triangulates_to_two_triangles() {
    let quad = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]];
    let tris = triangulate(&quad);
    assert_eq!(tris.len(), 2);
    assert!((tri_area_sum(&quad, &tris) - 2.0).abs() < 1e-5);
}

#[test]
fn nonconvex_polygon_triangulates_with_area_preserved() {
    let ell = [
        [0.0, 0.0],
        [3.0, 0.0],
        [3.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];
    let tris = triangulate(&ell);
    assert_eq!(tris.len(), ell.len() - 2);
    assert!((tri_area_sum(&ell, &tris) - 4.0).abs() < 1e-5);
}

#[test]
fn clockwise_input_is_normalized_to_ccw_triangles() {
    let quad_cw = [[0.0, 0.0], [0.0, 1.0], [2.0, 1.0], [2.0, 0.0]];
    let tris = triangulate(&quad_cw);
    assert_eq!(tris.len(), 2);
    for [a, b, c] in &tris {
        let pa = quad_cw[*a as usize];
        let pb = quad_cw[*b as usize];
        let pc = quad_cw[*c as usize];
        let cross = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
        assert!(cross > 0.0, "triangle not counter-clockwise");
    }
}

#[test]
fn degenerate_inputs_do_not_panic() {
    assert!(triangulate(&[]).is_empty());
    assert!(triangulate(&[[0.0, 0.0], [1.0, 0.0]]).is_empty());
}

#[test]
fn extrusion_spans_the_configured_depth_and_bounds() {
    let g = extrude_glyph(&GLYPH_HAO, TEXT_SIZE, TEXT_DEPTH);
    assert!((g.min.z - 0.0).abs() < 1e-6);
    assert!((g.max.z - TEXT_DEPTH).abs() < 1e-6);
    assert!((g.min.x - 0.0).abs() < 1e-6);
    assert!((g.max.x - 2.42 * TEXT_SIZE).abs() < 1e-3);
    assert!((g.min.y - 0.0).abs() < 1e-6);
    assert!((g.max.y - TEXT_SIZE).abs() < 1e-3);
}

#[test]
fn mesh_indices_are_well_formed() {
    let g = extrude_glyph(&GLYPH_HAO, TEXT_SIZE, TEXT_DEPTH);
    assert_eq!(g.indices.len() % 3, 0);
    assert!(!g.indices.is_empty());
    for &i in &g.indices {
        assert!((i as usize) < g.vertices.len());
    }
    for v in &g.vertices {
        let n = v.normal;
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-4);
    }
}

#[test]
fn wireframe_edges_are_unique_and_in_range() {
    let g = extrude_glyph(&GLYPH_HAO, TEXT_SIZE, TEXT_DEPTH);
    assert_eq!(g.edge_indices.len() % 2, 0);
    let mut seen = std::collections::HashSet::new();
    for pair in g.edge_indices.chunks(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_ne!(a, b);
        assert!((a as usize) < g.edge_positions.len());
        assert!((b as usize) < g.edge_positions.len());
        let key = if a < b { (a, b) } else { (b, a) };
        assert!(seen.insert(key), "duplicate edge {:?}", key);
    }
}

#[test]
fn single_square_contour_has_expected_face_and_edge_counts() {
    const SQUARE: GlyphOutline = GlyphOutline {
        contours: &[&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
    };
    let g = extrude_glyph(&SQUARE, 10.0, 2.0);
    // 2 front + 2 back + 8 side triangles
    assert_eq!(g.indices.len() / 3, 12);
    // 4 + 4 cap edges plus 4 corner posts
    assert_eq!(g.edge_indices.len() / 2, 12);
}
