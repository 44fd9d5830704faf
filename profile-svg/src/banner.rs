// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Seasonal name banner generation.
//!
//! The banner is a static SVG with the display name as heading and the
//! season glyph falling across it. Output is deterministic for a given name
//! and season so reruns within the same season leave the file untouched.

use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::Path
};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    config::BannerConfig,
    document::UpdateOutcome,
    error::{self, Error},
    season::{Season, Theme},
    template::escape_xml
};

/// Number of animated glyphs scattered over the banner.
pub const FLAKE_COUNT: usize = 8;

/// Renders the banner for `name` using `theme`.
///
/// # Examples
///
/// ```
/// use profile_svg::{Season, render_banner};
///
/// let svg = render_banner("Ada & Co", &Season::Winter.theme());
/// assert!(svg.contains("<h1>Ada &amp; Co</h1>"));
/// ```
pub fn render_banner(name: &str, theme: &Theme) -> String {
    use std::fmt::Write as _;

    let mut buffer = String::with_capacity(2048);
    let escaped_name = escape_xml(name);

    let _ = writeln!(
        buffer,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg fill=\"none\" viewBox=\"0 0 800 100\" width=\"800\" height=\"100\" xmlns=\"http://www.w3.org/2000/svg\">",
    );
    let _ = writeln!(
        buffer,
        "  <rect width=\"800\" height=\"100\" rx=\"12\" fill=\"{}\"/>",
        theme.background
    );
    buffer.push_str("  <foreignObject width=\"100%\" height=\"100%\">\n");
    buffer.push_str("    <div xmlns=\"http://www.w3.org/1999/xhtml\">\n");
    buffer.push_str("      <style>\n");
    buffer.push_str(
        "        @keyframes gradientText { 0% { background-position: 0% 50%; } 50% { background-position: 100% 50%; } 100% { background-position: 0% 50%; } }\n"
    );
    let _ = writeln!(
        buffer,
        "        h1 {{ font-family: 'Inter', -apple-system, 'Segoe UI', 'Roboto', 'Helvetica Neue', sans-serif; margin: 0; font-size: 4em; font-weight: 900; letter-spacing: -.05em; text-align: center; background: linear-gradient(270deg, {} 0, {}); background-size: 200%; background-clip: text; -webkit-background-clip: text; -webkit-text-fill-color: transparent; animation: gradientText 3s ease infinite; }}",
        theme.accent, theme.foreground
    );
    buffer.push_str(
        "        @keyframes flakes-fall { 0% { top: -10%; } 100% { top: 100%; } }\n        @keyframes flakes-shake { 0% { transform: translateX(0px); } 50% { transform: translateX(80px); } 100% { transform: translateX(0px); } }\n"
    );
    let _ = writeln!(
        buffer,
        "        .flake {{ position: fixed; top: -10%; font-size: 1em; color: {}; user-select: none; animation-name: flakes-fall, flakes-shake; animation-duration: 10s, 3s; animation-timing-function: linear, ease-in-out; animation-iteration-count: infinite, infinite; }}",
        theme.foreground
    );
    for index in 0..FLAKE_COUNT {
        let _ = writeln!(
            buffer,
            "        .flake:nth-of-type({}) {{ left: {}%; animation-delay: {}s, {}s; }}",
            index + 1,
            index * 12 + 4,
            (index * 5) % 9,
            index % 3
        );
    }
    buffer.push_str("      </style>\n");
    let _ = writeln!(buffer, "      <h1>{escaped_name}</h1>");
    for _ in 0..FLAKE_COUNT {
        let _ = writeln!(buffer, "      <div class=\"flake\">{}</div>", theme.emoji);
    }
    buffer.push_str("    </div>\n  </foreignObject>\n</svg>\n");

    buffer
}

/// Writes `svg` to `path` unless the file already holds the same content.
///
/// Leading and trailing whitespace is ignored in the comparison. Missing
/// parent directories are created.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when an existing file cannot be read or when
/// the directories or the file cannot be written.
pub fn write_banner(path: &Path, svg: &str) -> Result<UpdateOutcome, Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| error::template_io_error(parent, source))?;
    }

    let previous = match fs::read_to_string(path) {
        Ok(previous) => previous,
        Err(source) if source.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => return Err(error::template_io_error(path, source))
    };
    if previous.trim() == svg.trim() {
        info!("No change in SVG. Skipping write.");
        return Ok(UpdateOutcome::Unchanged);
    }

    let file = File::create(path).map_err(|source| error::template_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(svg.as_bytes())
        .map_err(|source| error::template_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::template_io_error(path, source))?;

    Ok(UpdateOutcome::Updated)
}

/// Runs the banner job at `now`.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when the banner cannot be written.
pub fn run_banner(config: &BannerConfig, now: DateTime<Utc>) -> Result<UpdateOutcome, Error> {
    let season = Season::at(&now.with_timezone(&config.time_zone));
    let theme = season.theme();
    let svg = render_banner(&config.name, &theme);

    let outcome = write_banner(&config.output_path, &svg)?;
    if outcome == UpdateOutcome::Updated {
        info!(
            "Wrote {} for season: {}",
            config.output_path.display(),
            theme.label
        );
    }
    Ok(outcome)
}
