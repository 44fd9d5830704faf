// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Season lookup and the cosmetic palette attached to each season.

use chrono::{DateTime, Datelike, TimeZone};

/// Meteorological season of the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    Autumn,
    /// December to February.
    Winter
}

/// Palette, glyph and label rendered into the name banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Background colour.
    pub background: &'static str,
    /// Foreground colour used for the heading gradient start.
    pub foreground: &'static str,
    /// Accent colour used for the heading gradient end.
    pub accent:     &'static str,
    /// Glyph scattered over the banner.
    pub emoji:      &'static str,
    /// Human readable season name.
    pub label:      &'static str
}

impl Season {
    /// Maps a month number (`1..=12`) to its season.
    ///
    /// Values outside the range fall into [`Season::Winter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_svg::Season;
    ///
    /// assert_eq!(Season::from_month(4,), Season::Spring);
    /// assert_eq!(Season::from_month(12,), Season::Winter);
    /// ```
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter
        }
    }

    /// Season of `instant` as observed in its time zone.
    pub fn at<Tz>(instant: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone
    {
        Self::from_month(instant.month())
    }

    /// Theme rendered for this season.
    pub fn theme(self) -> Theme {
        match self {
            Self::Spring => Theme {
                background: "#ecfdf5",
                foreground: "#065f46",
                accent:     "#22c55e",
                emoji:      "🌸",
                label:      "Spring"
            },
            Self::Summer => Theme {
                background: "#fff7ed",
                foreground: "#7c2d12",
                accent:     "#f59e0b",
                emoji:      "☀️",
                label:      "Summer"
            },
            Self::Autumn => Theme {
                background: "#fffbeb",
                foreground: "#78350f",
                accent:     "#d97706",
                emoji:      "🍂",
                label:      "Autumn"
            },
            Self::Winter => Theme {
                background: "#eff6ff",
                foreground: "#1e3a8a",
                accent:     "#60a5fa",
                emoji:      "❄️",
                label:      "Winter"
            }
        }
    }
}
