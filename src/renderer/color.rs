//! RGBA colour with a CSS serialisation

/// 8-bit RGB with a float alpha, as CSS `rgba()` takes it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb((r, g, b): (u8, u8, u8), a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `rgba(r, g, b, a)` for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        let c = Rgba::new(0, 212, 255, 0.5);
        assert_eq!(c.to_css(), "rgba(0, 212, 255, 0.5)");
        assert_eq!(Rgba::from_rgb((0, 212, 255), 0.25).to_css(), "rgba(0, 212, 255, 0.25)");
    }
}
