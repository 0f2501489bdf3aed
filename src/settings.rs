//! Effect settings
//!
//! Read once at start from an optional in-page JSON element
//! (`<script type="application/json" id="fx-config">`). Any field left out
//! keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{FxError, Result};
use crate::renderer::Rgba;

/// Particle field tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Surface area (px²) per particle
    pub density: f32,
    pub max_count: usize,
    pub link_distance: f32,
    pub link_alpha: f32,
    pub link_width: f32,
    pub rgb: (u8, u8, u8),
    /// Radius range `[min, max)`
    pub radius: (f32, f32),
    /// Opacity range `[min, max)`
    pub opacity: (f32, f32),
    /// Velocity components fall in `[-speed/2, speed/2)`
    pub speed: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            density: PARTICLE_DENSITY,
            max_count: MAX_PARTICLES,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            link_width: LINK_WIDTH,
            rgb: PARTICLE_RGB,
            radius: (PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS),
            opacity: (PARTICLE_MIN_OPACITY, PARTICLE_MAX_OPACITY),
            speed: PARTICLE_SPEED,
        }
    }
}

impl ParticleSettings {
    pub fn color(&self, alpha: f32) -> Rgba {
        Rgba::from_rgb(self.rgb, alpha)
    }
}

/// Typewriter phrases and delays (ms)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterSettings {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub hold_full_ms: u32,
    pub delete_ms: u32,
    pub hold_empty_ms: u32,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            phrases: [
                "Game Developer",
                "Unity Specialist",
                "Roblox Developer",
                "Creative Coder",
                "AI Enthusiast",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            type_ms: TYPE_DELAY_MS,
            hold_full_ms: HOLD_FULL_MS,
            delete_ms: DELETE_DELAY_MS,
            hold_empty_ms: HOLD_EMPTY_MS,
        }
    }
}

/// Scroll tracking thresholds (px)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub scrolled_threshold: f64,
    pub section_lookahead: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            scrolled_threshold: SCROLLED_THRESHOLD,
            section_lookahead: SECTION_LOOKAHEAD,
        }
    }
}

/// Reveal observer options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_margin: REVEAL_BOTTOM_MARGIN,
        }
    }
}

impl RevealSettings {
    /// IntersectionObserver `rootMargin`
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

/// Element ids, selectors and flag names the effects bind to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBindings {
    pub canvas_id: String,
    pub typed_text_id: String,
    pub navbar_id: String,
    pub menu_toggle_id: String,
    pub menu_panel_id: String,
    pub nav_link_selector: String,
    pub section_selector: String,
    pub reveal_selector: String,
    pub anchor_selector: String,
    pub scrolled_flag: String,
    pub active_flag: String,
    pub open_flag: String,
    pub visible_flag: String,
}

impl Default for PageBindings {
    fn default() -> Self {
        Self {
            canvas_id: "particles-canvas".into(),
            typed_text_id: "typed-text".into(),
            navbar_id: "navbar".into(),
            menu_toggle_id: "navToggle".into(),
            menu_panel_id: "navLinks".into(),
            nav_link_selector: ".nav-links a".into(),
            section_selector: ".section, .hero".into(),
            reveal_selector: ".reveal, .reveal-stagger".into(),
            anchor_selector: "a[href^=\"#\"]".into(),
            scrolled_flag: "scrolled".into(),
            active_flag: "active".into(),
            open_flag: "open".into(),
            visible_flag: "visible".into(),
        }
    }
}

/// All effect settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FxSettings {
    pub particles: ParticleSettings,
    pub typewriter: TypewriterSettings,
    pub scroll: ScrollSettings,
    pub reveal: RevealSettings,
    pub bindings: PageBindings,
}

impl FxSettings {
    /// Element id of the in-page JSON config
    pub const CONFIG_ELEMENT_ID: &'static str = "fx-config";

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: FxSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse a config if present; fall back to defaults on any problem
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded effect settings from page");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring page settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.particles;
        if p.density <= 0.0 {
            return Err(FxError::InvalidSettings("particle density must be positive".into()));
        }
        if p.link_distance <= 0.0 {
            return Err(FxError::InvalidSettings("link distance must be positive".into()));
        }
        if p.radius.0 > p.radius.1 || p.opacity.0 > p.opacity.1 {
            return Err(FxError::InvalidSettings("inverted particle range".into()));
        }
        if self.typewriter.phrases.is_empty() {
            return Err(FxError::EmptyPhrases);
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(FxError::InvalidSettings("reveal threshold must be within [0, 1]".into()));
        }
        if self.reveal.bottom_margin < 0.0 {
            return Err(FxError::InvalidSettings("reveal bottom margin must not be negative".into()));
        }
        Ok(())
    }

    /// Read the in-page config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_json_or_default(json.as_deref())
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
