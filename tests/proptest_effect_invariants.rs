//! Property-based invariant tests for the effect models.
//!
//! Verifies:
//! 1. Particle count is min(floor(w·h / 12000), 100), and follows resizes
//! 2. Positions stay inside [0, w) x [0, h) across frames
//! 3. Links exist exactly for pairs closer than 120, fading with distance
//! 4. Typewriter char count never leaves [0, phrase length]
//! 5. Mobile menu state follows toggle / close clicks
//! 6. Scroll tracker picks the last section at or above the scroll position

use portfolio_fx::menu::MobileMenu;
use portfolio_fx::particles::{link_opacity, particle_count};
use portfolio_fx::scroll::active_section;
use portfolio_fx::settings::{PageBindings, ParticleSettings};
use portfolio_fx::typewriter::TypewriterTiming;
use portfolio_fx::{MemorySurface, ParticleField, Typewriter, UiSurface};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_dims() -> impl Strategy<Value = (u32, u32)> {
    (0u32..3000, 0u32..3000)
}

fn arb_phrases() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z é]{0,12}", 1..5)
}

#[derive(Debug, Clone, Copy)]
enum MenuClick {
    Toggle,
    Link,
}

fn arb_clicks() -> impl Strategy<Value = Vec<MenuClick>> {
    prop::collection::vec(prop_oneof![Just(MenuClick::Toggle), Just(MenuClick::Link)], 0..20)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Particle count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn count_matches_area((w, h) in arb_dims()) {
        let expected = ((w as u64 * h as u64) / 12_000).min(100) as usize;
        prop_assert_eq!(particle_count(w as f32, h as f32, 12_000.0, 100), expected);
    }

    #[test]
    fn resize_recounts((w, h) in arb_dims(), (w2, h2) in arb_dims(), seed in any::<u64>()) {
        let mut field = ParticleField::new(ParticleSettings::default(), w as f32, h as f32, seed);
        field.resize(w2 as f32, h2 as f32);
        let expected = ((w2 as u64 * h2 as u64) / 12_000).min(100) as usize;
        prop_assert_eq!(field.len(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Wrap-around keeps particles in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn positions_stay_in_bounds(w in 110u32..2000, h in 110u32..2000, seed in any::<u64>(), frames in 1usize..400) {
        let (w, h) = (w as f32, h as f32);
        let mut field = ParticleField::new(ParticleSettings::default(), w, h, seed);
        for _ in 0..frames {
            field.update();
        }
        for p in field.particles() {
            prop_assert!(p.pos.x >= 0.0 && p.pos.x < w, "x out of bounds: {}", p.pos.x);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y < h, "y out of bounds: {}", p.pos.y);
        }
    }

    #[test]
    fn fast_particles_stay_in_bounds(seed in any::<u64>()) {
        let settings = ParticleSettings { speed: 5000.0, ..Default::default() };
        let mut field = ParticleField::new(settings, 400.0, 300.0, seed);
        for _ in 0..50 {
            field.update();
        }
        for p in field.particles() {
            prop_assert!((0.0..400.0).contains(&p.pos.x));
            prop_assert!((0.0..300.0).contains(&p.pos.y));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Links
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn links_iff_close(seed in any::<u64>(), frames in 0usize..50) {
        let mut field = ParticleField::new(ParticleSettings::default(), 900.0, 700.0, seed);
        for _ in 0..frames {
            field.update();
        }
        let ps = field.particles();
        let links = field.links();
        let mut close = 0;
        for i in 0..ps.len() {
            for j in i + 1..ps.len() {
                if ps[i].pos.distance(ps[j].pos) < 120.0 {
                    close += 1;
                }
            }
        }
        prop_assert_eq!(links.len(), close);
        for link in &links {
            prop_assert!(link.a < link.b);
            prop_assert!(link.distance < 120.0);
            prop_assert!(link.opacity > 0.0 && link.opacity <= 0.08);
        }
    }

    #[test]
    fn link_opacity_decreases(a in 0.0f32..120.0, b in 0.0f32..120.0) {
        prop_assume!((a - b).abs() > 1e-3);
        let (near, far) = if a < b { (a, b) } else { (b, a) };
        let near_op = link_opacity(near, 120.0, 0.08).unwrap();
        let far_op = link_opacity(far, 120.0, 0.08).unwrap();
        prop_assert!(near_op > far_op);
    }

    #[test]
    fn no_link_at_or_beyond_max(d in 120.0f32..5000.0) {
        prop_assert_eq!(link_opacity(d, 120.0, 0.08), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Typewriter char count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn char_count_in_range(phrases in arb_phrases(), steps in 0usize..200) {
        let mut tw = Typewriter::new(phrases.clone(), TypewriterTiming::default()).unwrap();
        for _ in 0..steps {
            tw.step();
            let len = phrases[tw.phrase_index()].chars().count();
            prop_assert!(tw.char_count() <= len);
            prop_assert_eq!(tw.text().chars().count(), tw.char_count());
            prop_assert!(phrases[tw.phrase_index()].starts_with(tw.text()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Mobile menu
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn menu_follows_clicks(clicks in arb_clicks()) {
        let mut s = MemorySurface::new();
        let toggle = s.insert(None, "button", &[("id", "navToggle")]);
        let panel = s.insert(None, "ul", &[("id", "navLinks")]);
        s.insert(Some(panel), "a", &[("href", "#about")]);
        let mut menu = MobileMenu::bind(&s, &PageBindings::default()).unwrap();

        let mut open = false;
        for click in clicks {
            match click {
                MenuClick::Toggle => {
                    menu.toggle(&mut s);
                    open = !open;
                }
                MenuClick::Link => {
                    menu.close(&mut s);
                    open = false;
                }
            }
            prop_assert_eq!(menu.is_open(), open);
            prop_assert_eq!(s.has_flag(&toggle, "active"), open);
            prop_assert_eq!(s.has_flag(&panel, "open"), open);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Active section
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn active_section_is_last_qualifying(
        mut tops in prop::collection::vec(0.0f64..10_000.0, 0..8),
        scroll_y in 0.0f64..12_000.0,
    ) {
        tops.sort_by(|a, b| a.total_cmp(b));
        match active_section(scroll_y, &tops, 100.0) {
            Some(i) => {
                prop_assert!(scroll_y >= tops[i] - 100.0);
                prop_assert!(tops[i + 1..].iter().all(|&t| scroll_y < t - 100.0));
            }
            None => prop_assert!(tops.iter().all(|&t| scroll_y < t - 100.0)),
        }
    }
}
