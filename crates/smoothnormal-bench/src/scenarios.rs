//! Benchmark scenarios — a procedural mesh and a repeat count for each case.
//!
//! Four canonical scenarios:
//! 1. **Flat grid** — one position per vertex, no seams; pure throughput
//! 2. **Hard cubes** — every corner split three ways; adjacency merging
//! 3. **UV sphere** — seam and pole duplicates; the typical imported mesh
//! 4. **Dense sphere** — large enough that parallel dispatch pays off

use serde::{Deserialize, Serialize};

use smoothnormal_math::Vec3;
use smoothnormal_mesh::generators::{hard_cube, quad_grid, uv_sphere};
use smoothnormal_mesh::Mesh;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// 128×128 flat grid.
    FlatGrid,
    /// 16×16×16 lattice of hard-edged cubes merged into one mesh.
    HardCubes,
    /// 32-stack × 64-slice UV sphere.
    UvSphere,
    /// 256-stack × 512-slice UV sphere.
    DenseSphere,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::FlatGrid,
            ScenarioKind::HardCubes,
            ScenarioKind::UvSphere,
            ScenarioKind::DenseSphere,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::FlatGrid => "flat_grid",
            ScenarioKind::HardCubes => "hard_cubes",
            ScenarioKind::UvSphere => "uv_sphere",
            ScenarioKind::DenseSphere => "dense_sphere",
        }
    }

    /// Looks a scenario up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Mesh to compute smooth normals for.
    pub mesh: Mesh,
    /// Timed repetitions per engine.
    pub iterations: u32,
}

impl Scenario {
    /// Create the flat grid scenario.
    pub fn flat_grid() -> Self {
        Self {
            kind: ScenarioKind::FlatGrid,
            mesh: quad_grid(128, 128, 2.0, 2.0),
            iterations: 10,
        }
    }

    /// Create the hard cubes scenario.
    ///
    /// 4096 unit cubes on a lattice with spacing 1, so neighbouring cubes
    /// share faces and corners and position groups span up to 24 vertices.
    pub fn hard_cubes() -> Self {
        Self {
            kind: ScenarioKind::HardCubes,
            mesh: cube_lattice(16),
            iterations: 10,
        }
    }

    /// Create the UV sphere scenario.
    pub fn uv_sphere() -> Self {
        Self {
            kind: ScenarioKind::UvSphere,
            mesh: uv_sphere(1.0, 32, 64),
            iterations: 20,
        }
    }

    /// Create the dense sphere scenario.
    pub fn dense_sphere() -> Self {
        Self {
            kind: ScenarioKind::DenseSphere,
            mesh: uv_sphere(1.0, 256, 512),
            iterations: 3,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::FlatGrid => Self::flat_grid(),
            ScenarioKind::HardCubes => Self::hard_cubes(),
            ScenarioKind::UvSphere => Self::uv_sphere(),
            ScenarioKind::DenseSphere => Self::dense_sphere(),
        }
    }

    /// Overrides the repetition count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

/// `n³` unit hard cubes on an integer lattice, merged into one mesh.
fn cube_lattice(n: usize) -> Mesh {
    let cube = hard_cube(1.0);
    let count = n * n * n;
    let mut mesh = Mesh::with_capacity(
        "hard_cubes",
        cube.vertex_count() * count,
        cube.triangle_count() * count,
    );
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let offset = Vec3::new(x as f32, y as f32, z as f32);
                let base = mesh.vertex_count() as u32;
                for ((&p, &normal), &tangent) in cube.positions.iter().zip(&cube.normals).zip(&cube.tangents) {
                    mesh.push_vertex(p + offset, normal, tangent);
                }
                for tri in cube.indices.chunks_exact(3) {
                    mesh.push_triangle(base + tri[0], base + tri[1], base + tri[2]);
                }
            }
        }
    }
    mesh
}
