//! Portfolio FX entry point
//!
//! On wasm32 this attaches every effect to the page at start-up. Natively it
//! runs a short headless pass over the effect logic.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use portfolio_fx::FxSettings;
    use portfolio_fx::platform::web::PageEffects;

    thread_local! {
        static EFFECTS: RefCell<Option<PageEffects>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let settings = FxSettings::load();
        match PageEffects::attach(&settings) {
            Ok(effects) => EFFECTS.with(|cell| *cell.borrow_mut() = Some(effects)),
            Err(e) => log::error!("Failed to attach page effects: {}", e),
        }
    }

    pub fn teardown() {
        EFFECTS.with(|cell| {
            if let Some(mut effects) = cell.borrow_mut().take() {
                effects.teardown();
                log::info!("Page effects stopped");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

/// Stop every loop and listener (callable from JS)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_page::teardown();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the real page");

    if let Err(e) = headless_demo() {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() -> portfolio_fx::Result<()> {
    use portfolio_fx::renderer::RecordingPainter;
    use portfolio_fx::schedule::VirtualTimeline;
    use portfolio_fx::{FxSettings, MemorySurface, ParticleField, Typewriter};

    let settings = FxSettings::load();
    settings.validate()?;

    let mut field = ParticleField::new(settings.particles.clone(), 1280.0, 720.0, 42);
    let mut painter = RecordingPainter::new();
    let mut links = 0;
    for _ in 0..300 {
        painter.take();
        field.frame(&mut painter);
        links += painter.lines().count();
    }
    log::info!(
        "Particle field: {} particles, {:.1} links/frame over 300 frames",
        field.len(),
        links as f32 / 300.0
    );

    let mut surface = MemorySurface::new();
    let target = surface.insert(None, "span", &[("id", "typed-text")]);
    let mut writer = Typewriter::from_settings(&settings.typewriter)?;
    let mut timeline = VirtualTimeline::new(0);
    let steps = timeline.advance(10_000, || writer.step_into(&mut surface, &target));
    log::info!(
        "Typewriter: {} steps in 10s, showing {:?} (phrase {})",
        steps,
        surface.text(target),
        writer.phrase_index()
    );
    Ok(())
}
