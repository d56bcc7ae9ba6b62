use std::fmt;

/// Mana colors in canonical WUBRG order, with `C` for colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Self::White,
        Self::Blue,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Colorless,
    ];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'U',
            Self::Black => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Colorless => 'C',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Colorless => "Colorless",
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'W' => Some(Self::White),
            'U' => Some(Self::Blue),
            'B' => Some(Self::Black),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'C' => Some(Self::Colorless),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of deck colors; always rendered in WUBRGC order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(u8);

impl ColorSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Parse the wire form (e.g. `"UBG"`); unknown letters are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.chars()
            .filter_map(Color::from_letter)
            .fold(Self::empty(), Self::with)
    }

    #[must_use]
    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    #[must_use]
    pub const fn toggled(self, color: Color) -> Self {
        Self(self.0 ^ color.bit())
    }

    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Wire form sent to the API; empty when nothing is selected.
    #[must_use]
    pub fn to_code(self) -> String {
        self.iter().map(Color::letter).collect()
    }
}

/// Display form: the letters, or `C` when empty.
impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("C");
        }
        f.write_str(&self.to_code())
    }
}

/// Display a raw wire color string, normalized to WUBRGC order.
#[must_use]
pub fn display_colors(raw: &str) -> String {
    ColorSet::parse(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_canonical_order_regardless_of_selection_order() {
        let set = ColorSet::empty()
            .with(Color::Green)
            .with(Color::White)
            .with(Color::Black);
        assert_eq!(set.to_code(), "WBG");
        assert_eq!(ColorSet::parse("gruw").to_code(), "WURG");
    }

    #[test]
    fn empty_set_displays_as_colorless() {
        assert_eq!(ColorSet::empty().to_string(), "C");
        assert_eq!(display_colors(""), "C");
        assert_eq!(ColorSet::empty().to_code(), "");
    }

    #[test]
    fn toggling_removes_and_adds() {
        let set = ColorSet::parse("UB").toggled(Color::Blue);
        assert_eq!(set.to_code(), "B");
        assert_eq!(set.toggled(Color::Colorless).to_code(), "BC");
        assert!(ColorSet::parse("x").is_empty());
    }
}
