//! Built-in color palettes addressed by the `colorScale` config id.

use crate::scene::Color;

/// A named, fixed ordered color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub id: &'static str,
    colors: &'static [&'static str],
}

impl Palette {
    /// Color for a bar index, cycling when the palette is exhausted.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        let hex = self.colors[index % self.colors.len()];
        Color::from_hex(hex).unwrap_or(Color::BLACK)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

const SCHEME_CATEGORY_10: Palette = Palette {
    id: "schemeCategory10",
    colors: &[
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ],
};

const SCHEME_CATEGORY_20: Palette = Palette {
    id: "schemeCategory20",
    colors: &[
        "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
        "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
        "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
    ],
};

const SCHEME_ACCENT: Palette = Palette {
    id: "schemeAccent",
    colors: &[
        "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
    ],
};

const PALETTES: &[Palette] = &[SCHEME_CATEGORY_10, SCHEME_CATEGORY_20, SCHEME_ACCENT];

/// Resolves a palette id from the config's `colorScale` field.
#[must_use]
pub fn palette_lookup(id: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|palette| palette.id == id)
}
