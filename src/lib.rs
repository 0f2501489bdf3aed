//! Portfolio FX - visual effects layer for a portfolio page
//!
//! Core modules:
//! - `particles`: Particle swarm with proximity links (per-frame update + render)
//! - `typewriter`: Looping type/delete text effect
//! - `scroll`: Navbar "scrolled" flag and active section link
//! - `menu`: Mobile menu toggle
//! - `reveal`: One-shot reveal-on-scroll
//! - `anchor`: Smooth scrolling for same-page fragment links
//! - `surface`: UI surface abstraction (real DOM or in-memory)
//! - `renderer`: 2D painter abstraction
//! - `schedule`: Cancellable tasks and virtual time
//! - `platform`: Browser glue (wasm32 only)

pub mod anchor;
pub mod error;
pub mod menu;
pub mod particles;
pub mod platform;
pub mod renderer;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod settings;
pub mod surface;
pub mod typewriter;

pub use error::{FxError, Result};
pub use particles::{Link, Particle, ParticleField};
pub use settings::FxSettings;
pub use surface::{MemorySurface, UiSurface};
pub use typewriter::{Typewriter, TypewriterPhase};

/// Effect tuning constants
pub mod consts {
    /// Surface area (px²) per particle
    pub const PARTICLE_DENSITY: f32 = 12_000.0;
    /// Hard cap on the particle count
    pub const MAX_PARTICLES: usize = 100;
    /// Particles closer than this are linked
    pub const LINK_DISTANCE: f32 = 120.0;
    /// Link opacity at zero distance
    pub const LINK_ALPHA: f32 = 0.08;
    pub const LINK_WIDTH: f32 = 0.5;
    /// Particle colour (cyan)
    pub const PARTICLE_RGB: (u8, u8, u8) = (0, 212, 255);
    pub const PARTICLE_MIN_RADIUS: f32 = 0.5;
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    pub const PARTICLE_MIN_OPACITY: f32 = 0.2;
    pub const PARTICLE_MAX_OPACITY: f32 = 0.7;
    /// Velocity components are drawn from [-SPEED/2, SPEED/2)
    pub const PARTICLE_SPEED: f32 = 0.4;

    /// Typewriter delays (ms)
    pub const TYPE_DELAY_MS: u32 = 80;
    pub const HOLD_FULL_MS: u32 = 2000;
    pub const DELETE_DELAY_MS: u32 = 40;
    pub const HOLD_EMPTY_MS: u32 = 400;

    /// Scroll offset past which the navbar is "scrolled"
    pub const SCROLLED_THRESHOLD: f64 = 50.0;
    /// A section becomes current this many px before its top reaches the viewport top
    pub const SECTION_LOOKAHEAD: f64 = 100.0;

    /// Visible fraction that triggers a reveal
    pub const REVEAL_THRESHOLD: f64 = 0.1;
    /// Bottom margin (px) shrinking the reveal viewport
    pub const REVEAL_BOTTOM_MARGIN: f64 = 40.0;
}
