//! Lattice construction.
//!
//! One pass, four stages:
//!
//! ```text
//! weld shell vertices → seed fill grid → connect pairs → snapshot rest shape
//! ```
//!
//! Degenerate input (no vertices, flat bounds) produces an empty or
//! single-particle lattice instead of an error; callers check
//! [`Lattice::is_degenerate`] before simulating.

use glam::Vec3;
use squishy_geometry::Containment;
use squishy_math::Aabb;
use squishy_mesh::{weld_vertices, ClosedSurface, TriangleMesh, WeldedVertices};
use squishy_types::constants::MIN_SPRING_LENGTH;
use squishy_types::{ParticleId, SquishyResult};

use crate::config::LatticeConfig;
use crate::grid::PointGrid;
use crate::lattice::Lattice;
use crate::particle::{Particle, ParticleKind};
use crate::rest_shape::RestShape;
use crate::spring::{Spring, SpringParams};

/// Builds [`Lattice`]s from closed meshes.
#[derive(Debug, Clone, Default)]
pub struct LatticeBuilder {
    config: LatticeConfig,
    spring_params: SpringParams,
}

impl LatticeBuilder {
    pub fn new(config: LatticeConfig) -> Self {
        Self {
            config,
            spring_params: SpringParams::default(),
        }
    }

    /// Parameters copied onto every spring created.
    pub fn with_spring_params(mut self, params: SpringParams) -> Self {
        self.spring_params = params;
        self
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Builds a lattice from a closed triangle mesh, using the mesh's own
    /// parity-ray containment for the fill stage.
    pub fn build(&self, mesh: &TriangleMesh) -> SquishyResult<Lattice> {
        mesh.validate()?;
        let welded = weld_vertices(mesh);
        let surface = ClosedSurface::from_mesh(mesh);
        self.build_from_parts(&welded, mesh.bounds(), mesh.scale, &surface)
    }

    /// Builds a lattice from already welded shell points.
    ///
    /// `bounds` are the unscaled bounds of the source; `scale` maps them
    /// (and the grid step) into the space the welded positions and the
    /// `inside` predicate live in.
    pub fn build_from_parts<C: Containment + ?Sized>(
        &self,
        welded: &WeldedVertices,
        bounds: Option<Aabb>,
        scale: Vec3,
        inside: &C,
    ) -> SquishyResult<Lattice> {
        self.config.validate()?;
        self.spring_params.validate()?;

        let bounds = match bounds {
            Some(b) if !welded.is_empty() => b,
            _ => {
                tracing::warn!("lattice source has no vertices; built an empty lattice");
                return Ok(Lattice {
                    config: self.config.clone(),
                    ..Default::default()
                });
            }
        };

        let scaled_bounds = bounds.scaled(scale);
        if scaled_bounds.volume() <= 0.0 {
            tracing::warn!(
                vertices = welded.vertex_to_unique.len(),
                "lattice source has zero volume; collapsed to a single particle"
            );
            return Ok(self.single_particle(welded, scaled_bounds.center()));
        }

        // Shell
        let mut positions = welded.positions.clone();
        let mut kinds = vec![ParticleKind::Shell; positions.len()];
        let shell_count = positions.len();

        // Fill
        let step = self.config.grid_step(bounds.max_extent());
        let grid_step = scale.abs() * step;
        let fill_count = self.seed_fill(&scaled_bounds, grid_step, inside, &mut positions);
        kinds.resize(positions.len(), ParticleKind::Fill);

        // Connect
        let connection_distance = self
            .config
            .connection_distance
            .unwrap_or(step * scale.y.abs() * self.config.diagonal_factor);
        let springs = self.connect(&positions, connection_distance);

        // Snapshot
        let masses = vec![self.config.particle_mass; positions.len()];
        let rest_shape = RestShape::capture(&positions, &masses);

        let particles = positions
            .iter()
            .zip(&kinds)
            .enumerate()
            .map(|(i, (&p, &kind))| {
                Particle::new(ParticleId::from(i), p, self.config.particle_mass, kind)
            })
            .collect();

        tracing::info!(
            shell = shell_count,
            fill = fill_count,
            springs = springs.len(),
            connection_distance,
            "lattice built"
        );

        Ok(Lattice {
            particles,
            springs,
            rest_shape,
            shell_count,
            vertex_to_particle: welded.vertex_to_unique.iter().map(|&u| ParticleId(u)).collect(),
            connection_distance,
            grid_step,
            config: self.config.clone(),
        })
    }

    /// Sweeps a grid strictly inside `bounds` (y outermost, z innermost) and
    /// appends every sample that is far enough from existing particles and
    /// inside the surface. Returns the number of particles added.
    fn seed_fill<C: Containment + ?Sized>(
        &self,
        bounds: &Aabb,
        step: Vec3,
        inside: &C,
        positions: &mut Vec<Vec3>,
    ) -> usize {
        if step.min_element() <= 0.0 {
            return 0;
        }

        let min_spacing = self.config.min_spacing();
        let mut occupied = PointGrid::from_points(min_spacing, positions);
        let before = positions.len();

        for y in axis_samples(bounds.min.y, bounds.max.y, step.y) {
            for x in axis_samples(bounds.min.x, bounds.max.x, step.x) {
                for z in axis_samples(bounds.min.z, bounds.max.z, step.z) {
                    let p = Vec3::new(x, y, z);
                    if min_spacing > 0.0 && occupied.any_within(p, min_spacing) {
                        continue;
                    }
                    if !inside.contains(p) {
                        continue;
                    }
                    occupied.insert(p);
                    positions.push(p);
                }
            }
        }

        positions.len() - before
    }

    /// One spring per pair closer than `max_distance`, rest length = the
    /// measured distance. Coincident pairs get no spring.
    fn connect(&self, positions: &[Vec3], max_distance: f32) -> Vec<Spring> {
        PointGrid::from_points(max_distance, positions)
            .pairs_within(max_distance)
            .into_iter()
            .filter(|&(_, _, dist)| dist >= MIN_SPRING_LENGTH)
            .filter_map(|(a, b, dist)| {
                Spring::new(ParticleId(a), ParticleId(b), dist, &self.spring_params)
            })
            .collect()
    }

    fn single_particle(&self, welded: &WeldedVertices, at: Vec3) -> Lattice {
        let mass = self.config.particle_mass;
        let particle = Particle::new(ParticleId(0), at, mass, ParticleKind::Shell);
        Lattice {
            particles: vec![particle],
            springs: Vec::new(),
            rest_shape: RestShape::capture(&[at], &[self.config.particle_mass]),
            shell_count: 1,
            vertex_to_particle: vec![ParticleId(0); welded.vertex_to_unique.len()],
            connection_distance: 0.0,
            grid_step: Vec3::ZERO,
            config: self.config.clone(),
        }
    }
}

/// `lo + k·step` for `k ≥ 1` while strictly inside `(lo, hi)`. Samples
/// within a thousandth of a step of `hi` are dropped so that rounding
/// never puts one on the far face.
fn axis_samples(lo: f32, hi: f32, step: f32) -> impl Iterator<Item = f32> {
    let limit = hi - step * 1e-3;
    (1..)
        .map(move |k| lo + k as f32 * step)
        .take_while(move |&v| v < limit)
}
