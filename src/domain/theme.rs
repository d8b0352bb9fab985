use serde::Serialize;

pub const DEFAULT_THEME: &str = "Dark";
pub const DEFAULT_FONT: &str = "Roboto";
const FALLBACK_FONT_FAMILY: &str = "'Roboto', sans-serif";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub sidebar_background: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub text_color: &'static str,
    pub accent_color: &'static str,
}

static DARK: ThemePalette = ThemePalette {
    background: "#121212",
    sidebar_background: "#1E1E1E",
    primary_color: "#BB86FC",
    secondary_color: "#03DAC6",
    text_color: "#FFFFFF",
    accent_color: "#CF6679",
};

static LIGHT: ThemePalette = ThemePalette {
    background: "#FFFFFF",
    sidebar_background: "#F5F5F5",
    primary_color: "#6200EE",
    secondary_color: "#03DAC6",
    text_color: "#000000",
    accent_color: "#018786",
};

static BLUE: ThemePalette = ThemePalette {
    background: "#0A192F",
    sidebar_background: "#172A45",
    primary_color: "#64FFDA",
    secondary_color: "#8892B0",
    text_color: "#E6F1FF",
    accent_color: "#FF5757",
};

static GREEN: ThemePalette = ThemePalette {
    background: "#0C1D0C",
    sidebar_background: "#1E3323",
    primary_color: "#4CAF50",
    secondary_color: "#8BC34A",
    text_color: "#F1F8E9",
    accent_color: "#FF5722",
};

/// Catalogue order, as presented to the user.
static THEMES: &[(&str, &ThemePalette)] = &[
    ("Dark", &DARK),
    ("Light", &LIGHT),
    ("Blue", &BLUE),
    ("Green", &GREEN),
];

static FONTS: &[(&str, &str)] = &[
    ("Roboto", "'Roboto', sans-serif"),
    ("Open Sans", "'Open Sans', sans-serif"),
    ("Poppins", "'Poppins', sans-serif"),
    ("Inter", "'Inter', sans-serif"),
    ("Montserrat", "'Montserrat', sans-serif"),
];

pub fn theme_names() -> Vec<&'static str> {
    THEMES.iter().map(|(name, _)| *name).collect()
}

pub fn font_names() -> Vec<&'static str> {
    FONTS.iter().map(|(name, _)| *name).collect()
}

/// Palette for `name`, or the Dark palette when the name is unknown.
pub fn theme(name: &str) -> &'static ThemePalette {
    THEMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, palette)| *palette)
        .unwrap_or(&DARK)
}

pub fn font_family(name: &str) -> &'static str {
    FONTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, family)| *family)
        .unwrap_or(FALLBACK_FONT_FAMILY)
}
