//! Distance-driven scenery themes
//!
//! The run rolls through a fixed cycle of settings as distance accumulates.
//! Each theme carries a palette for the renderer and a message pool for the
//! end-of-run narrator. Lookups are exhaustive matches so a new theme cannot
//! ship without colors and messages.

use crate::consts::THEME_SPAN;

/// RGBA palette for a theme's scenery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Clear color behind everything
    pub sky: [f32; 4],
    /// Ground band
    pub ground: [f32; 4],
    /// Accent used for particles and scenery details
    pub accent: [f32; 4],
}

/// The settings Cookie runs through, in distance order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Neighborhood,
    DogPark,
    Lakeside,
}

impl Theme {
    /// Cycle order; `for_distance` walks this and wraps
    pub const ALL: [Theme; 3] = [Theme::Neighborhood, Theme::DogPark, Theme::Lakeside];

    /// Theme active after travelling `distance` units
    pub fn for_distance(distance: f32) -> Theme {
        let milestone = (distance / THEME_SPAN).floor() as usize;
        Self::ALL[milestone % Self::ALL.len()]
    }

    /// Position in the cycle
    pub fn index(self) -> usize {
        match self {
            Theme::Neighborhood => 0,
            Theme::DogPark => 1,
            Theme::Lakeside => 2,
        }
    }

    /// Display name for the HUD and narrator prompts
    pub fn label(self) -> &'static str {
        match self {
            Theme::Neighborhood => "Neighborhood",
            Theme::DogPark => "Dog Park",
            Theme::Lakeside => "Lakeside",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            // Cream skies over a brown dirt path
            Theme::Neighborhood => &Palette {
                sky: [0.733, 0.871, 0.984, 1.0],
                ground: [0.553, 0.431, 0.388, 1.0],
                accent: [0.631, 0.533, 0.498, 1.0],
            },
            // Grass and picket-fence greens
            Theme::DogPark => &Palette {
                sky: [0.890, 0.949, 0.992, 1.0],
                ground: [0.400, 0.733, 0.416, 1.0],
                accent: [0.298, 0.686, 0.314, 1.0],
            },
            // Sand underfoot, water on the horizon
            Theme::Lakeside => &Palette {
                sky: [0.702, 0.898, 0.988, 1.0],
                ground: [0.941, 0.902, 0.549, 1.0],
                accent: [0.302, 0.816, 0.882, 1.0],
            },
        }
    }

    /// Narrator lines specific to this setting
    pub fn messages(self) -> &'static [&'static str] {
        match self {
            Theme::Neighborhood => &[
                "Cookie trotted past every mailbox like she owned the street!",
                "The neighbors all waved at Cookie from their porches.",
                "Cookie found the sunniest sidewalk square and claimed it.",
            ],
            Theme::DogPark => &[
                "Cookie made three new friends at the park today!",
                "The whole dog park watched Cookie zoom by in awe.",
                "Cookie rolled in the good grass, the really good grass.",
            ],
            Theme::Lakeside => &[
                "Cookie splashed in the shallows and shook off a tiny rainbow.",
                "A duck quacked approvingly as Cookie raced along the shore.",
                "Cookie dug the world's finest hole right by the water.",
            ],
        }
    }
}
