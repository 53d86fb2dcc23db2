use eframe::egui::Color32;

/// Fill for matrix cells whose department pair has no links at all.
pub const EMPTY_CELL: Color32 = Color32::from_rgb(0xDA, 0xDA, 0xD9);

/// Piecewise-linear balance color scale: teaching-heavy pairs stay cyan,
/// balanced pairs are gray, research-heavy pairs run through red to yellow.
const BALANCE_DOMAIN: [f64; 5] = [-9.0, -2.0, 0.0, 4.5, 9.0];
const BALANCE_RANGE: [Color32; 5] = [
    Color32::from_rgb(0x35, 0xB7, 0xE5),
    Color32::from_rgb(0x35, 0xB7, 0xE5),
    Color32::from_rgb(0x80, 0x80, 0x80),
    Color32::from_rgb(0xFF, 0x00, 0x00),
    Color32::from_rgb(0xFF, 0xFF, 0x00),
];

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub title_size: f32,
    pub label_size: f32,
    pub legend_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            title_size: 22.0,
            label_size: 13.0,
            legend_size: 11.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            title_size: 22.0,
            label_size: 13.0,
            legend_size: 11.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Categorical fill for department `i`, stable across orders. The
    /// palette wraps after twenty departments.
    pub fn department_color(&self, i: usize) -> Color32 {
        DEPARTMENT_PALETTE[i % DEPARTMENT_PALETTE.len()]
    }

    /// Color for a matrix cell's research/teaching balance. Values outside
    /// the domain clamp to the end colors.
    pub fn balance_color(balance: f64) -> Color32 {
        if balance <= BALANCE_DOMAIN[0] {
            return BALANCE_RANGE[0];
        }
        for w in 0..BALANCE_DOMAIN.len() - 1 {
            let (lo, hi) = (BALANCE_DOMAIN[w], BALANCE_DOMAIN[w + 1]);
            if balance <= hi {
                let t = ((balance - lo) / (hi - lo)) as f32;
                return lerp(BALANCE_RANGE[w], BALANCE_RANGE[w + 1], t);
            }
        }
        BALANCE_RANGE[BALANCE_RANGE.len() - 1]
    }
}

fn lerp(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Twenty categorical fills for department arcs and cells.
const DEPARTMENT_PALETTE: [Color32; 20] = [
    Color32::from_rgb(0x31, 0x82, 0xBD),
    Color32::from_rgb(0x6B, 0xAE, 0xD6),
    Color32::from_rgb(0x9E, 0xCA, 0xE1),
    Color32::from_rgb(0xC6, 0xDB, 0xEF),
    Color32::from_rgb(0xE6, 0x55, 0x0D),
    Color32::from_rgb(0xFD, 0x8D, 0x3C),
    Color32::from_rgb(0xFD, 0xAE, 0x6B),
    Color32::from_rgb(0xFD, 0xD0, 0xA2),
    Color32::from_rgb(0x31, 0xA3, 0x54),
    Color32::from_rgb(0x74, 0xC4, 0x76),
    Color32::from_rgb(0xA1, 0xD9, 0x9B),
    Color32::from_rgb(0xC7, 0xE9, 0xC0),
    Color32::from_rgb(0x75, 0x6B, 0xB1),
    Color32::from_rgb(0x9E, 0x9A, 0xC8),
    Color32::from_rgb(0xBC, 0xBD, 0xDC),
    Color32::from_rgb(0xDA, 0xDA, 0xEB),
    Color32::from_rgb(0x63, 0x63, 0x63),
    Color32::from_rgb(0x96, 0x96, 0x96),
    Color32::from_rgb(0xBD, 0xBD, 0xBD),
    Color32::from_rgb(0xD9, 0xD9, 0xD9),
];
