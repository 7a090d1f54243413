use crate::layout::GridSize;
use std::fmt;

/// Quick-size choices offered in the widget size menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizePreset {
    /// 3×2
    Small,
    /// 4×2
    Medium,
    /// 6×3
    Large,
    /// 12×2, a full-width strip.
    Wide,
    /// 8×4
    ExtraLarge,
}

impl SizePreset {
    /// All presets in menu order.
    pub const ALL: [SizePreset; 5] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::Wide,
        SizePreset::ExtraLarge,
    ];

    /// Short menu label.
    pub fn label(&self) -> &'static str {
        match self {
            SizePreset::Small => "S",
            SizePreset::Medium => "M",
            SizePreset::Large => "L",
            SizePreset::Wide => "W",
            SizePreset::ExtraLarge => "XL",
        }
    }

    /// Size the preset applies.
    pub fn size(&self) -> GridSize {
        let (w, h) = match self {
            SizePreset::Small => (3, 2),
            SizePreset::Medium => (4, 2),
            SizePreset::Large => (6, 3),
            SizePreset::Wide => (12, 2),
            SizePreset::ExtraLarge => (8, 4),
        };
        GridSize { w, h }
    }

    /// Preset bound to the digit key `n` (1-based, in menu order).
    pub fn from_digit(n: u32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sizes() {
        let sizes: Vec<(&str, i32, i32)> = SizePreset::ALL
            .iter()
            .map(|p| (p.label(), p.size().w, p.size().h))
            .collect();
        assert_eq!(
            sizes,
            vec![
                ("S", 3, 2),
                ("M", 4, 2),
                ("L", 6, 3),
                ("W", 12, 2),
                ("XL", 8, 4)
            ]
        );
    }

    #[test]
    fn digits_map_to_presets() {
        assert_eq!(SizePreset::from_digit(1), Some(SizePreset::Small));
        assert_eq!(SizePreset::from_digit(5), Some(SizePreset::ExtraLarge));
        assert_eq!(SizePreset::from_digit(0), None);
        assert_eq!(SizePreset::from_digit(6), None);
    }

    #[test]
    fn display_shows_label_and_size() {
        assert_eq!(SizePreset::Wide.to_string(), "W (12×2)");
    }
}
