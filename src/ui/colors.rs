use crate::models::ResourceLevel;
use ratatui::style::{Color, Modifier, Style};

pub struct ColorScheme {
    pub text: Color,
    pub header: Color,
    pub accent: Color,
    pub border: Color,
    pub muted: Color,
    pub low_usage: Color,
    pub medium_usage: Color,
    pub high_usage: Color,
    pub selected: Color,
    pub thread: Color,
    pub child_process: Color,
    pub success: Color,
    pub warning: Color,
}

impl ColorScheme {
    pub fn new() -> Self {
        Self {
            text: Color::White,
            header: Color::Yellow,
            accent: Color::Cyan,
            border: Color::DarkGray,
            muted: Color::Gray,
            low_usage: Color::Green,
            medium_usage: Color::Yellow,
            high_usage: Color::Red,
            selected: Color::Blue,
            thread: Color::Gray,
            child_process: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }

    pub fn process_color(&self, level: ResourceLevel) -> Color {
        match level {
            ResourceLevel::Low => self.low_usage,
            ResourceLevel::Medium => self.medium_usage,
            ResourceLevel::High => self.high_usage,
        }
    }

    pub fn style(&self, color: Color, selected: bool) -> Style {
        let style = Style::default().fg(color);
        if selected {
            style.bg(self.selected).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new()
    }
}
