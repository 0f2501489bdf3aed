//! Particle field
//!
//! A swarm of drifting points sized to the container's area. Each frame
//! every particle advances by its velocity and wraps toroidally; pairs
//! closer than the link distance are joined by a line that fades out
//! linearly with distance.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::Painter;
use crate::settings::{PageBindings, ParticleSettings};
use crate::surface::UiSurface;

/// A single drifting point
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

/// A proximity link between particles `a < b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// Particle count for a surface: one per `density` px², capped at `max`
pub fn particle_count(width: f32, height: f32, density: f32, max: usize) -> usize {
    let area = width * height;
    if !(area > 0.0) || !(density > 0.0) {
        return 0;
    }
    ((area / density).floor() as usize).min(max)
}

/// Wrap a coordinate into `[0, bound)`
#[inline]
pub fn wrap(v: f32, bound: f32) -> f32 {
    if !(bound > 0.0) {
        return 0.0;
    }
    if (0.0..bound).contains(&v) {
        return v;
    }
    let w = v.rem_euclid(bound);
    // rem_euclid can round up to `bound` for tiny negative inputs
    if w >= bound { 0.0 } else { w }
}

/// Link opacity at `distance`, or `None` if the pair is too far apart
#[inline]
pub fn link_opacity(distance: f32, max_distance: f32, alpha: f32) -> Option<f32> {
    (distance < max_distance).then(|| alpha * (1.0 - distance / max_distance))
}

/// The particle swarm bound to one drawing surface
#[derive(Debug, Clone)]
pub struct ParticleField {
    settings: ParticleSettings,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings, width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            settings,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        field.resize(width, height);
        field
    }

    /// Find the drawing surface and size a field to it
    ///
    /// `measure` sizes the element and returns `None` when it cannot be
    /// drawn on. Without a usable canvas there is no field.
    pub fn bind<S, F>(
        surface: &S,
        bindings: &PageBindings,
        settings: ParticleSettings,
        seed: u64,
        measure: F,
    ) -> Option<(Self, S::Element)>
    where
        S: UiSurface,
        F: FnOnce(&S::Element) -> Option<(f32, f32)>,
    {
        let canvas = surface.by_id(&bindings.canvas_id)?;
        let (w, h) = measure(&canvas)?;
        Some((Self::new(settings, w, h, seed), canvas))
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Adopt new surface dimensions and regenerate every particle
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let count = particle_count(
            self.width,
            self.height,
            self.settings.density,
            self.settings.max_count,
        );
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    fn spawn(&mut self) -> Particle {
        let s = &self.settings;
        let (r_lo, r_hi) = s.radius;
        let (o_lo, o_hi) = s.opacity;
        let speed = s.speed;
        let rng = &mut self.rng;
        Particle {
            pos: Vec2::new(
                wrap(rng.random::<f32>() * self.width, self.width),
                wrap(rng.random::<f32>() * self.height, self.height),
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * speed,
                (rng.random::<f32>() - 0.5) * speed,
            ),
            radius: r_lo + (r_hi - r_lo) * rng.random::<f32>(),
            opacity: o_lo + (o_hi - o_lo) * rng.random::<f32>(),
        }
    }

    /// Advance every particle by its velocity, wrapping at the edges
    pub fn update(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.pos += p.vel;
            p.pos.x = wrap(p.pos.x, w);
            p.pos.y = wrap(p.pos.y, h);
        }
    }

    /// Every unordered pair closer than the link distance.
    ///
    /// O(n²) over at most `max_count` particles.
    pub fn links(&self) -> Vec<Link> {
        let max = self.settings.link_distance;
        let alpha = self.settings.link_alpha;
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.pos.distance(b.pos);
                if let Some(opacity) = link_opacity(distance, max, alpha) {
                    out.push(Link { a: i, b: j, distance, opacity });
                }
            }
        }
        out
    }

    /// Clear the surface, draw particles, then links
    pub fn render<P: Painter>(&self, painter: &mut P) {
        painter.clear(self.width, self.height);
        for p in &self.particles {
            painter.fill_circle(p.pos, p.radius, self.settings.color(p.opacity));
        }
        for link in self.links() {
            painter.stroke_line(
                self.particles[link.a].pos,
                self.particles[link.b].pos,
                self.settings.link_width,
                self.settings.color(link.opacity),
            );
        }
    }

    /// One animation frame: update then render
    pub fn frame<P: Painter>(&mut self, painter: &mut P) {
        self.update();
        self.render(painter);
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}
