//! Subdivided icosahedron mesh for the wireframe body.
//!
//! The mesh serves three roles: its edges are rendered as the wireframe,
//! its triangles are the raycast target for hover/pick, and its
//! per-face-corner vertices are the landing targets burst particles reform
//! onto.

use std::collections::HashSet;

use glam::Vec3;

use crate::ray::Ray;

/// Indexed triangle mesh on a sphere.
#[derive(Debug, Clone)]
pub struct TriMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Regular icosahedron with all vertices at `radius` from the origin.
    pub fn icosahedron(radius: f32) -> Self {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let vertices: Vec<Vec3> = [
            Vec3::new(-1.0, phi, 0.0),
            Vec3::new(1.0, phi, 0.0),
            Vec3::new(-1.0, -phi, 0.0),
            Vec3::new(1.0, -phi, 0.0),
            Vec3::new(0.0, -1.0, phi),
            Vec3::new(0.0, 1.0, phi),
            Vec3::new(0.0, -1.0, -phi),
            Vec3::new(0.0, 1.0, -phi),
            Vec3::new(phi, 0.0, -1.0),
            Vec3::new(phi, 0.0, 1.0),
            Vec3::new(-phi, 0.0, -1.0),
            Vec3::new(-phi, 0.0, 1.0),
        ]
        .iter()
        .map(|v| v.normalize() * radius)
        .collect();

        let faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        Self { vertices, faces }
    }

    /// Subdivided icosphere: each subdivision splits every face into four,
    /// with new vertices pushed out onto the sphere.
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let mut mesh = Self::icosahedron(radius);
        for _ in 0..subdivisions {
            mesh = mesh.subdivide_once(radius);
        }
        mesh
    }

    fn subdivide_once(&self, radius: f32) -> Self {
        let mut vertices = self.vertices.clone();
        let mut midpoints: std::collections::HashMap<(u32, u32), u32> =
            std::collections::HashMap::new();
        let mut faces = Vec::with_capacity(self.faces.len() * 4);

        let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vec3>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            *midpoints.entry(key).or_insert_with(|| {
                let m = (vertices[a as usize] + vertices[b as usize]) * 0.5;
                vertices.push(m.normalize() * radius);
                (vertices.len() - 1) as u32
            })
        };

        for &[a, b, c] in &self.faces {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            faces.push([a, ab, ca]);
            faces.push([b, bc, ab]);
            faces.push([c, ca, bc]);
            faces.push([ab, bc, ca]);
        }

        Self { vertices, faces }
    }

    /// Vertex positions listed per face corner, duplicates included.
    ///
    /// This is the landing-target pool for burst particles; indexing wraps
    /// modulo its length, so the duplicates just weight shared corners.
    pub fn corner_vertices(&self) -> Vec<Vec3> {
        self.faces
            .iter()
            .flat_map(|f| f.iter().map(|&i| self.vertices[i as usize]))
            .collect()
    }

    /// Unique undirected edges as endpoint pairs, for line rendering.
    pub fn edges(&self) -> Vec<(Vec3, Vec3)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for &[a, b, c] in &self.faces {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                let key = if i < j { (i, j) } else { (j, i) };
                if seen.insert(key) {
                    edges.push((self.vertices[i as usize], self.vertices[j as usize]));
                }
            }
        }
        edges
    }

    /// Nearest intersection of a local-space ray with the mesh surface.
    pub fn raycast(&self, ray: &Ray) -> Option<Vec3> {
        let mut nearest: Option<f32> = None;
        for &[a, b, c] in &self.faces {
            if let Some(t) = ray.intersect_triangle(
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ) {
                if nearest.map_or(true, |n| t < n) {
                    nearest = Some(t);
                }
            }
        }
        nearest.map(|t| ray.at(t))
    }
}
