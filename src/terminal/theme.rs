use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub selected: Color,
    pub star: Color,
    pub badge: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        bg: Color::White,
        fg: Color::Black,
        muted: Color::DarkGray,
        accent: Color::Red,
        selected: Color::Blue,
        star: Color::Yellow,
        badge: Color::Rgb(221, 157, 156),
    };

    pub const DARK: Theme = Theme {
        bg: Color::Black,
        fg: Color::White,
        muted: Color::Gray,
        accent: Color::LightRed,
        selected: Color::Green,
        star: Color::Yellow,
        badge: Color::Rgb(221, 157, 156),
    };

    pub fn for_mode(dark: bool) -> Theme {
        if dark { Self::DARK } else { Self::LIGHT }
    }
}
