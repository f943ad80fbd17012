use crossterm::style::{Attribute, Color, ContentStyle};

pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGrey,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_style(&self) -> ContentStyle {
        Self::fg(self.primary)
    }

    pub fn success_style(&self) -> ContentStyle {
        Self::fg(self.success)
    }

    pub fn warning_style(&self) -> ContentStyle {
        Self::fg(self.warning)
    }

    pub fn muted_style(&self) -> ContentStyle {
        Self::fg(self.muted)
    }

    pub fn error_style(&self) -> ContentStyle {
        let mut style = Self::fg(self.error);
        style.attributes.set(Attribute::Bold);
        style
    }

    fn fg(color: Color) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(color),
            ..ContentStyle::default()
        }
    }
}
