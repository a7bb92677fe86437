//! Display colors for scene elements.

use peniko::Color;

/// Colors a renderer should use for each kind of scene element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub anchor: Color,
    pub control: Color,
    pub curve: Color,
    /// Guides between anchors and control points (semi-transparent).
    pub handle_line: Color,
    pub label_background: Color,
    pub label_text: Color,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            anchor: Color::from_rgb8(0x00, 0x00, 0xff),
            control: Color::from_rgb8(0xff, 0x00, 0x00),
            curve: Color::from_rgb8(0x00, 0xff, 0x00),
            handle_line: Color::from_rgb8(0x88, 0x88, 0x88).with_alpha(0.6),
            label_background: Color::from_rgba8(0, 0, 0, 166),
            label_text: Color::from_rgb8(0xff, 0xff, 0xff),
        }
    }
}
