//! Display colors handed to newly generated shapes.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

/// Fill colors in cycle order. Mid-saturation so they read on both themes.
pub const COLORS: [&str; 6] = ["#4A90D9", "#E2725B", "#50B87A", "#F2B134", "#9B6FD6", "#3FB5B0"];

/// Round-robin cursor over [`COLORS`].
#[derive(Debug, Clone, Default)]
pub struct Palette {
    cursor: usize,
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next color, wrapping back to the first after the last.
    pub fn next_color(&mut self) -> &'static str {
        let color = COLORS[self.cursor % COLORS.len()];
        self.cursor = (self.cursor + 1) % COLORS.len();
        color
    }

    /// The entry that follows `color`, or the first entry if `color` is not in the list.
    #[must_use]
    pub fn after(color: Option<&str>) -> &'static str {
        let idx = color.and_then(|c| COLORS.iter().position(|p| p.eq_ignore_ascii_case(c)));
        match idx {
            Some(i) => COLORS[(i + 1) % COLORS.len()],
            None => COLORS[0],
        }
    }
}
