use std::fmt;

/// A background color normalized to `#RRGGBB` or `#RRGGBBAA` (uppercase).
///
/// The alpha channel is only kept when it is not fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a hex color (#RGB, #RGBA, #RRGGBB or #RRGGBBAA)",
            self.0
        )
    }
}

impl std::error::Error for InvalidColor {}

impl HexColor {
    pub fn parse(input: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(input.to_string());
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let mut normalized = expanded.to_ascii_uppercase();
        if normalized.len() == 8 && normalized.ends_with("FF") {
            normalized.truncate(6);
        }

        Ok(HexColor(format!("#{normalized}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
