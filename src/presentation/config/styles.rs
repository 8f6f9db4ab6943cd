use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::{de, Deserialize, Deserializer};

/// Styles of the three things on screen, each written as a style line such
/// as `"bold yellow on black"`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Styles {
    #[serde(deserialize_with = "deserialize_style")]
    pub text: Style,
    #[serde(deserialize_with = "deserialize_style")]
    pub cursor: Style,
    #[serde(deserialize_with = "deserialize_style")]
    pub headline: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            text: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(Color::LightYellow),
            headline: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

fn deserialize_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Style, D::Error> {
    let line = String::deserialize(deserializer)?;
    parse_style(&line).map_err(de::Error::custom)
}

/// Parses `[modifiers...] [foreground] [on background]`.
pub fn parse_style(line: &str) -> Result<Style, String> {
    let mut style = Style::default();
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        let token = token.to_lowercase();
        if token == "on" {
            let bg = tokens
                .next()
                .ok_or_else(|| format!("missing background color in `{line}`"))?;
            style = style.bg(parse_color(bg)?);
        } else if let Some(modifier) = parse_modifier(&token) {
            style = style.add_modifier(modifier);
        } else {
            style = style.fg(parse_color(&token)?);
        }
    }
    Ok(style)
}

fn parse_modifier(token: &str) -> Option<Modifier> {
    match token {
        "bold" => Some(Modifier::BOLD),
        "dim" => Some(Modifier::DIM),
        "italic" => Some(Modifier::ITALIC),
        "underline" | "underlined" => Some(Modifier::UNDERLINED),
        "blink" => Some(Modifier::SLOW_BLINK),
        "reverse" | "reversed" => Some(Modifier::REVERSED),
        "strikethrough" | "crossed_out" => Some(Modifier::CROSSED_OUT),
        _ => None,
    }
}

fn parse_color(token: &str) -> Result<Color, String> {
    Color::from_str(token).map_err(|_| format!("unknown color `{token}`"))
}
