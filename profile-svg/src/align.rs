// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Dot-leader filler computation for monospaced SVG lines.
//!
//! Two strategies are provided. [`AlignmentMode::Fixed`] pads every line to
//! the same total width from literal prefix and suffix strings.
//! [`AlignmentMode::Column`] measures the document itself and pads each
//! filler so that every value slot starts at the same column. Both are a
//! single pass over the document: measurements are taken before any filler is
//! rewritten.

use clap::ValueEnum;
use regex::Regex;
use tracing::{debug, warn};

use crate::template::{SlotLookup, SvgDocument, visible_text};

/// Total visible width of a line under [`AlignmentMode::Fixed`].
pub const DEFAULT_LINE_WIDTH: usize = 99;
/// Character repeated inside filler slots.
pub const FILLER_CHAR: char = '.';

/// Strategy used to size filler slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlignmentMode {
    /// Align value slots on the widest existing label column.
    #[default]
    Column,
    /// Pad every line to a fixed total width.
    Fixed
}

/// Filler rule for [`AlignmentMode::Fixed`].
///
/// `prefix` and `suffix` are the exact visible strings before and after the
/// filler, including any spaces that render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidthRule<'a> {
    /// Slot receiving the dot leader.
    pub filler_slot: &'a str,
    /// Visible text before the filler.
    pub prefix:      &'a str,
    /// Visible text after the filler, with final values already rendered.
    pub suffix:      String
}

/// Filler rule for [`AlignmentMode::Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule<'a> {
    /// Slot receiving the dot leader.
    pub filler_slot: &'a str,
    /// Slot whose start column is aligned.
    pub value_slot:  &'a str
}

/// Visible lengths measured for a [`ColumnRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeasure {
    /// Visible characters between the line start and the filler.
    pub prefix_len: usize,
    /// Characters currently inside the filler slot.
    pub filler_len: usize
}

impl ColumnMeasure {
    /// Column at which the value following the filler starts.
    pub fn column(&self) -> usize {
        self.prefix_len + self.filler_len
    }
}

/// Filler lengths computed for a batch of [`ColumnRule`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnPlan<'a> {
    /// Shared column every value slot is pinned to.
    pub target_column: usize,
    /// New filler length per participating filler slot.
    pub fillers:       Vec<(&'a str, usize)>
}

/// Number of filler characters that pads `prefix` and `suffix` to `width`.
///
/// Clamps at zero when the text alone already reaches the width.
///
/// # Examples
///
/// ```
/// use profile_svg::filler_count;
///
/// assert_eq!(filler_count(20, ". Stars:", " 42"), 9);
/// assert_eq!(filler_count(4, ". Stars:", " 42"), 0);
/// ```
pub fn filler_count(width: usize, prefix: &str, suffix: &str) -> usize {
    width.saturating_sub(prefix.chars().count() + suffix.chars().count())
}

/// Builds a dot leader of `count` characters.
pub fn filler(count: usize) -> String {
    std::iter::repeat_n(FILLER_CHAR, count).collect()
}

/// Rewrites each rule's filler so `prefix + filler + suffix` spans `width`.
pub fn apply_fixed_width(
    document: SvgDocument,
    width: usize,
    rules: &[FixedWidthRule<'_>]
) -> SvgDocument {
    rules.iter().fold(document, |document, rule| {
        let count = filler_count(width, rule.prefix, &rule.suffix);
        debug!("{}: {} filler characters", rule.filler_slot, count);
        document.with_slot(rule.filler_slot, &filler(count))
    })
}

/// Measures the visible prefix and filler length of a column rule.
///
/// The prefix is the text between the nearest preceding line-start element
/// (`<text>` or a `<tspan>` positioned with an `x` attribute) and the filler
/// slot. Returns `None` when either slot is missing or duplicated, or when no
/// line start precedes the filler.
pub fn measure_column(document: &SvgDocument, rule: &ColumnRule<'_>) -> Option<ColumnMeasure> {
    locate_column(document, rule).map(|located| located.measure)
}

/// Computes filler lengths that pin every value slot to one column.
///
/// The target column is the widest `prefix + filler` found in the document
/// as it is now. Rules whose slots cannot be measured do not participate.
///
/// A rule whose prefix holds another participating filler (a second value
/// inline on the same line) never sets the target column. Its prefix is
/// re-measured with the new lengths of the fillers before it, and it keeps
/// its current filler when that prefix already passes the target.
pub fn plan_column_alignment<'a>(
    document: &SvgDocument,
    rules: &[ColumnRule<'a>]
) -> ColumnPlan<'a> {
    let mut located: Vec<LocatedColumn<'a>> = rules
        .iter()
        .filter_map(|rule| locate_column(document, rule))
        .collect();
    located.sort_by_key(|column| column.filler_start);

    let inline: Vec<bool> = located
        .iter()
        .map(|column| {
            located
                .iter()
                .any(|other| column.contains_filler(other.filler_start))
        })
        .collect();

    let target_column = located
        .iter()
        .zip(&inline)
        .filter(|(_, inline)| !**inline)
        .map(|(column, _)| column.measure.column())
        .max()
        .unwrap_or(0);

    let mut fillers = Vec::with_capacity(located.len());
    let mut rewritten: Vec<(usize, usize, usize)> = Vec::with_capacity(located.len());
    for (column, inline) in located.iter().zip(inline) {
        let prefix_len = if inline {
            rewritten
                .iter()
                .filter(|(start, ..)| column.contains_filler(*start))
                .fold(column.measure.prefix_len, |len, (_, old, new)| {
                    (len + new).saturating_sub(*old)
                })
        } else {
            column.measure.prefix_len
        };

        let count = match target_column.checked_sub(prefix_len) {
            Some(count) => {
                fillers.push((column.filler_slot, count));
                count
            }
            None => {
                debug!(
                    "{} already passes column {}, filler kept",
                    column.filler_slot, target_column
                );
                column.measure.filler_len
            }
        };
        rewritten.push((column.filler_start, column.measure.filler_len, count));
    }

    ColumnPlan {
        target_column,
        fillers
    }
}

/// Rewrites filler slots so every value slot starts on the same column.
pub fn apply_column_alignment(document: SvgDocument, rules: &[ColumnRule<'_>]) -> SvgDocument {
    let plan = plan_column_alignment(&document, rules);
    debug!(
        "aligning {} lines on column {}",
        plan.fillers.len(),
        plan.target_column
    );

    plan.fillers
        .iter()
        .fold(document, |document, (slot, count)| {
            document.with_slot(slot, &filler(*count))
        })
}

struct LocatedColumn<'a> {
    filler_slot:  &'a str,
    line_start:   usize,
    filler_start: usize,
    measure:      ColumnMeasure
}

impl LocatedColumn<'_> {
    fn contains_filler(&self, offset: usize) -> bool {
        self.line_start < offset && offset < self.filler_start
    }
}

fn locate_column<'a>(document: &SvgDocument, rule: &ColumnRule<'a>) -> Option<LocatedColumn<'a>> {
    let span = match document.locate(rule.filler_slot) {
        SlotLookup::Found(span) => span,
        SlotLookup::Missing => {
            warn!("filler slot \"{}\" not found, line skipped", rule.filler_slot);
            return None;
        }
        SlotLookup::Duplicate(count) => {
            warn!(
                "filler slot \"{}\" appears {count} times, line skipped",
                rule.filler_slot
            );
            return None;
        }
    };

    if !matches!(document.locate(rule.value_slot), SlotLookup::Found(_)) {
        warn!(
            "value slot \"{}\" not found exactly once, line skipped",
            rule.value_slot
        );
        return None;
    }

    let content = document.as_str();
    let Some(line_start) = line_start_before(content, span.element_start) else {
        warn!(
            "no line start precedes filler slot \"{}\", line skipped",
            rule.filler_slot
        );
        return None;
    };

    let prefix = visible_text(&content[line_start..span.element_start]);
    let filler_text = visible_text(&content[span.inner_start..span.inner_end]);

    Some(LocatedColumn {
        filler_slot: rule.filler_slot,
        line_start,
        filler_start: span.element_start,
        measure: ColumnMeasure {
            prefix_len: prefix.chars().count(),
            filler_len: filler_text.chars().count()
        }
    })
}

fn line_start_before(content: &str, offset: usize) -> Option<usize> {
    let pattern = Regex::new(r#"<text\b[^>]*>|<tspan\b[^>]*\sx="[^"]*"[^>]*>"#).ok()?;
    pattern
        .find_iter(&content[..offset])
        .last()
        .map(|found| found.start())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn line(y: usize, label: &str, dots: usize, value: &str, id: &str) -> String {
        format!(
            r#"<tspan x="15" y="{y}" class="cc">. </tspan><tspan class="key">{label}</tspan>:<tspan id="{id}_dots" class="cc">{}</tspan> <tspan class="value" id="{id}">{value}</tspan>"#,
            filler(dots)
        )
    }

    fn card(lines: &[String]) -> SvgDocument {
        SvgDocument::new(format!(
            "<svg><text x=\"15\" y=\"30\" fill=\"#c9d1d9\">\n{}\n</text></svg>",
            lines.join("\n")
        ))
    }

    #[test]
    fn filler_count_pads_to_width() {
        assert_eq!(filler_count(99, ". Commits:", " 1,234"), 99 - 10 - 6);
    }

    #[test]
    fn filler_count_clamps_to_zero() {
        assert_eq!(filler_count(10, ". Lines of Code on GitHub:", " 1"), 0);
    }

    #[test]
    fn filler_count_counts_characters_not_bytes() {
        assert_eq!(filler_count(10, "é", "ü"), 8);
    }

    #[test]
    fn apply_fixed_width_writes_dot_leaders() {
        let document = card(&[line(30, "Stars", 3, "42", "star_data")]);
        let rules = [FixedWidthRule {
            filler_slot: "star_data_dots",
            prefix:      ". Stars:",
            suffix:      " 42".to_owned()
        }];

        let updated = apply_fixed_width(document, 20, &rules);
        assert_eq!(updated.slot_text("star_data_dots"), Some("........."));
    }

    #[test]
    fn measure_column_reads_visible_prefix() {
        let document = card(&[line(30, "Followers", 4, "7", "follower_data")]);
        let measure = measure_column(
            &document,
            &ColumnRule {
                filler_slot: "follower_data_dots",
                value_slot:  "follower_data"
            }
        )
        .expect("expected measurable line");

        assert_eq!(measure.prefix_len, ". Followers:".len());
        assert_eq!(measure.filler_len, 4);
    }

    #[test]
    fn measure_column_skips_missing_value_slot() {
        let document = card(&[line(30, "Stars", 4, "7", "star_data")]);
        let rule = ColumnRule {
            filler_slot: "star_data_dots",
            value_slot:  "absent"
        };
        assert!(measure_column(&document, &rule).is_none());
    }

    #[test]
    fn column_alignment_pins_values_to_widest_line() {
        let document = card(&[
            line(30, "Repos", 10, "12", "repo_data"),
            line(50, "Lines of Code on GitHub", 2, "900", "loc_data"),
            line(70, "Stars", 1, "3", "star_data")
        ]);
        let rules = [
            ColumnRule {
                filler_slot: "repo_data_dots",
                value_slot:  "repo_data"
            },
            ColumnRule {
                filler_slot: "loc_data_dots",
                value_slot:  "loc_data"
            },
            ColumnRule {
                filler_slot: "star_data_dots",
                value_slot:  "star_data"
            }
        ];

        let plan = plan_column_alignment(&document, &rules);
        assert_eq!(plan.target_column, ". Lines of Code on GitHub:".len() + 2);

        let updated = apply_column_alignment(document, &rules);
        for rule in &rules {
            let measure = measure_column(&updated, rule).expect("measurable");
            assert_eq!(measure.column(), plan.target_column);
        }
        assert_eq!(updated.slot_text("loc_data_dots"), Some(".."));
    }

    #[test]
    fn column_alignment_ignores_missing_rules() {
        let document = card(&[line(30, "Stars", 2, "3", "star_data")]);
        let rules = [
            ColumnRule {
                filler_slot: "star_data_dots",
                value_slot:  "star_data"
            },
            ColumnRule {
                filler_slot: "contrib_data_dots",
                value_slot:  "contrib_data"
            }
        ];

        let plan = plan_column_alignment(&document, &rules);
        assert_eq!(plan.fillers, vec![("star_data_dots", 2)]);
    }

    #[test]
    fn column_alignment_is_stable_on_second_pass() {
        let document = card(&[
            line(30, "Commits", 9, "1", "commit_data"),
            line(50, "Followers", 1, "2", "follower_data")
        ]);
        let rules = [
            ColumnRule {
                filler_slot: "commit_data_dots",
                value_slot:  "commit_data"
            },
            ColumnRule {
                filler_slot: "follower_data_dots",
                value_slot:  "follower_data"
            }
        ];

        let first = apply_column_alignment(document, &rules);
        let second = apply_column_alignment(first.clone(), &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn inline_filler_does_not_set_target_column() {
        let repos = r#"<tspan x="15" y="30" class="cc">. </tspan><tspan class="key">Repos</tspan>:<tspan id="repo_data_dots" class="cc">..</tspan> <tspan class="value" id="repo_data">12</tspan> {<tspan class="key">Contributed</tspan>:<tspan id="contrib_data_dots" class="cc"> </tspan><tspan class="value" id="contrib_data">4</tspan>}"#;
        let document = card(&[repos.to_owned(), line(50, "Commits", 5, "1", "commit_data")]);
        let rules = [
            ColumnRule {
                filler_slot: "repo_data_dots",
                value_slot:  "repo_data"
            },
            ColumnRule {
                filler_slot: "contrib_data_dots",
                value_slot:  "contrib_data"
            },
            ColumnRule {
                filler_slot: "commit_data_dots",
                value_slot:  "commit_data"
            }
        ];

        let plan = plan_column_alignment(&document, &rules);
        assert_eq!(plan.target_column, ". Commits:".len() + 5);
        assert_eq!(
            plan.fillers,
            vec![("repo_data_dots", 7), ("commit_data_dots", 5)]
        );

        let first = apply_column_alignment(document, &rules);
        let second = apply_column_alignment(first.clone(), &rules);
        let third = apply_column_alignment(second.clone(), &rules);
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(first.slot_text("contrib_data_dots"), Some(" "));
        assert_eq!(first.slot_text("repo_data_dots"), Some("......."));
    }

    #[test]
    fn line_start_prefers_nearest_positioned_tspan() {
        let content = r#"<text x="1"><tspan x="1" y="1">. A:</tspan><tspan id="f">..</tspan>"#;
        let offset = content.find(r#"<tspan id="f""#).expect("filler present");
        let start = line_start_before(content, offset).expect("line start");
        assert_eq!(&content[start..start + 6], "<tspan");
    }

    proptest! {
        #[test]
        fn fixed_width_lines_reach_width(
            prefix in "[A-Za-z .:]{0,40}",
            suffix in "[0-9 ,(){}+-]{0,70}",
            width in 0usize..140
        ) {
            let count = filler_count(width, &prefix, &suffix);
            let total = prefix.chars().count() + count + suffix.chars().count();
            prop_assert_eq!(count, width.saturating_sub(prefix.len() + suffix.len()));
            if prefix.len() + suffix.len() <= width {
                prop_assert_eq!(total, width);
            }
        }

        #[test]
        fn column_alignment_equalizes_every_line(
            specs in proptest::collection::vec(("[A-Za-z ]{1,24}", 0usize..30), 1..6)
        ) {
            let lines: Vec<String> = specs
                .iter()
                .enumerate()
                .map(|(index, (label, dots))| line(index * 20, label, *dots, "1", &format!("slot{index}")))
                .collect();
            let document = card(&lines);
            let filler_ids: Vec<String> = (0..specs.len()).map(|i| format!("slot{i}_dots")).collect();
            let value_ids: Vec<String> = (0..specs.len()).map(|i| format!("slot{i}")).collect();
            let rules: Vec<ColumnRule<'_>> = filler_ids
                .iter()
                .zip(&value_ids)
                .map(|(filler_slot, value_slot)| ColumnRule { filler_slot, value_slot })
                .collect();

            let expected = specs
                .iter()
                .map(|(label, dots)| 2 + label.len() + 1 + dots)
                .max()
                .unwrap_or(0);

            let updated = apply_column_alignment(document, &rules);
            for rule in &rules {
                let measure = measure_column(&updated, rule).expect("measurable");
                prop_assert_eq!(measure.column(), expected);
            }
        }
    }
}
