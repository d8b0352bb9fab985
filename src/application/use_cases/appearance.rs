use crate::domain::theme::{font_family, font_names, theme, DEFAULT_FONT};

/// Render the CSS for a theme/font pair. Unknown names fall back to the
/// Dark theme and the Roboto font.
pub fn stylesheet(theme_name: &str, font_name: &str) -> String {
    let palette = theme(theme_name);
    let font_name = if font_names().contains(&font_name) {
        font_name
    } else {
        DEFAULT_FONT
    };
    let family = font_family(font_name);

    format!(
        r#"@import url('https://fonts.googleapis.com/css2?family={import}:wght@300;400;600;700&display=swap');

body {{
    font-family: {family};
    background-color: {background};
    color: {text};
}}

aside, nav, .sidebar {{
    background-color: {sidebar};
}}

h1, h2, h3, h4, h5, h6 {{
    font-family: {family};
    color: {primary};
}}

button, .button {{
    background-color: {primary} !important;
    color: {background} !important;
    border: none;
    border-radius: 4px;
}}

button:hover, .button:hover {{
    background-color: {accent} !important;
}}

input, textarea, select {{
    background-color: {sidebar} !important;
    color: {text} !important;
    border: 1px solid {secondary};
}}

a {{
    color: {secondary};
}}

.history-entry {{
    background-color: {sidebar};
    border-left: 4px solid {primary};
    border-radius: 5px;
    padding: 15px;
    margin-bottom: 10px;
}}

.badge {{
    background-color: {primary};
    color: {background};
    padding: 2px 8px;
    border-radius: 12px;
    font-size: 12px;
}}
"#,
        import = font_name.replace(' ', "+"),
        family = family,
        background = palette.background,
        sidebar = palette.sidebar_background,
        primary = palette.primary_color,
        secondary = palette.secondary_color,
        text = palette.text_color,
        accent = palette.accent_color,
    )
}
