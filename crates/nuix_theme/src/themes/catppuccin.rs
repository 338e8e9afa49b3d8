//! Catppuccin palettes
//!
//! Latte is the light flavor, Mocha the dark one.

use nuix_core::Color;

/// The subset of a Catppuccin flavor the built-in themes draw from
pub struct Palette {
    pub mauve: Color,
    pub peach: Color,
    pub yellow: Color,
    pub sapphire: Color,
    pub blue: Color,

    pub text: Color,
    pub subtext0: Color,
    pub overlay0: Color,
    pub surface2: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,
}

/// Catppuccin Latte palette (light theme)
pub mod latte {
    use super::Palette;
    use nuix_core::Color;

    pub const PALETTE: Palette = Palette {
        mauve: Color::rgb(136.0 / 255.0, 57.0 / 255.0, 239.0 / 255.0),
        peach: Color::rgb(254.0 / 255.0, 100.0 / 255.0, 11.0 / 255.0),
        yellow: Color::rgb(223.0 / 255.0, 142.0 / 255.0, 29.0 / 255.0),
        sapphire: Color::rgb(32.0 / 255.0, 159.0 / 255.0, 181.0 / 255.0),
        blue: Color::rgb(30.0 / 255.0, 102.0 / 255.0, 245.0 / 255.0),

        text: Color::rgb(76.0 / 255.0, 79.0 / 255.0, 105.0 / 255.0),
        subtext0: Color::rgb(108.0 / 255.0, 111.0 / 255.0, 133.0 / 255.0),
        overlay0: Color::rgb(156.0 / 255.0, 160.0 / 255.0, 176.0 / 255.0),
        surface2: Color::rgb(172.0 / 255.0, 176.0 / 255.0, 190.0 / 255.0),
        surface1: Color::rgb(188.0 / 255.0, 192.0 / 255.0, 204.0 / 255.0),
        surface0: Color::rgb(204.0 / 255.0, 208.0 / 255.0, 218.0 / 255.0),
        base: Color::rgb(239.0 / 255.0, 241.0 / 255.0, 245.0 / 255.0),
        mantle: Color::rgb(230.0 / 255.0, 233.0 / 255.0, 239.0 / 255.0),
        crust: Color::rgb(220.0 / 255.0, 224.0 / 255.0, 232.0 / 255.0),
    };
}

/// Catppuccin Mocha palette (dark theme)
pub mod mocha {
    use super::Palette;
    use nuix_core::Color;

    pub const PALETTE: Palette = Palette {
        mauve: Color::rgb(203.0 / 255.0, 166.0 / 255.0, 247.0 / 255.0),
        peach: Color::rgb(250.0 / 255.0, 179.0 / 255.0, 135.0 / 255.0),
        yellow: Color::rgb(249.0 / 255.0, 226.0 / 255.0, 175.0 / 255.0),
        sapphire: Color::rgb(116.0 / 255.0, 199.0 / 255.0, 236.0 / 255.0),
        blue: Color::rgb(137.0 / 255.0, 180.0 / 255.0, 250.0 / 255.0),

        text: Color::rgb(205.0 / 255.0, 214.0 / 255.0, 244.0 / 255.0),
        subtext0: Color::rgb(166.0 / 255.0, 173.0 / 255.0, 200.0 / 255.0),
        overlay0: Color::rgb(108.0 / 255.0, 112.0 / 255.0, 134.0 / 255.0),
        surface2: Color::rgb(88.0 / 255.0, 91.0 / 255.0, 112.0 / 255.0),
        surface1: Color::rgb(69.0 / 255.0, 71.0 / 255.0, 90.0 / 255.0),
        surface0: Color::rgb(49.0 / 255.0, 50.0 / 255.0, 68.0 / 255.0),
        base: Color::rgb(30.0 / 255.0, 30.0 / 255.0, 46.0 / 255.0),
        mantle: Color::rgb(24.0 / 255.0, 24.0 / 255.0, 37.0 / 255.0),
        crust: Color::rgb(17.0 / 255.0, 17.0 / 255.0, 27.0 / 255.0),
    };
}
