//! Color palette for the dashboard.

use crossterm::style::{style, Color, Stylize};

/// Colors used to decorate dashboard lines.
///
/// The palette is immutable; build one up front and pass it to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Section labels such as `[ UPT ]` and `HW:`.
    pub label: Color,
    /// Version and satellite values.
    pub value: Color,
    /// Progress bars.
    pub bar: Color,
    /// Dashboard title.
    pub title: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::starlink()
    }
}

impl Palette {
    /// The standard dashboard colors.
    pub fn starlink() -> Self {
        Self {
            label: Color::Rgb { r: 167, g: 139, b: 250 },
            value: Color::Rgb { r: 173, g: 255, b: 47 },
            bar: Color::Rgb { r: 34, g: 211, b: 238 },
            title: Color::Rgb { r: 0, g: 183, b: 235 },
        }
    }

    pub fn label(&self, text: &str) -> String {
        paint(text, self.label)
    }

    pub fn value(&self, text: &str) -> String {
        paint(text, self.value)
    }

    pub fn bar(&self, text: &str) -> String {
        paint(text, self.bar)
    }

    pub fn title(&self, text: &str) -> String {
        paint(text, self.title)
    }
}

fn paint(text: &str, color: Color) -> String {
    style(text).with(color).to_string()
}
