// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use profile_svg::{
    PROFILE_COLUMNS, SvgDocument, apply_column_alignment, apply_fixed_width, calendar_diff,
    format_grouped, uptime_fixed_rule, visible_text,
};

fn card() -> String
{
    let labels = [
        ("repo_data", "Repos"),
        ("contrib_data", "Contributed"),
        ("commit_data", "Commits"),
        ("loc_data", "Lines of Code on GitHub"),
        ("star_data", "Stars"),
        ("follower_data", "Followers"),
        ("age_data", "Uptime"),
    ];

    let mut svg = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\">\n<text x=\"15\" y=\"30\">\n",);
    for (index, (id, label,),) in labels.iter().enumerate() {
        svg.push_str(&format!(
            "<tspan x=\"15\" y=\"{}\" class=\"cc\">. </tspan><tspan class=\"key\">{label}</tspan>:<tspan id=\"{id}_dots\" class=\"cc\">....</tspan> <tspan class=\"value\" id=\"{id}\">0</tspan>\n",
            50 + index * 20
        ),);
    }
    svg.push_str("</text>\n</svg>\n",);
    svg
}

fn benchmark_slot_substitution(c: &mut Criterion,)
{
    let template = card();
    let values = [
        ("repo_data", "42"),
        ("contrib_data", "17"),
        ("commit_data", "1,234"),
        ("loc_data", "150,000"),
        ("star_data", "999"),
        ("follower_data", "12,345"),
    ];

    c.bench_function("substitute_stats_slots", |b| {
        b.iter(|| {
            let document = SvgDocument::new(black_box(template.as_str(),),);
            black_box(document.with_slots(values,),)
        },)
    },);
}

fn benchmark_column_alignment(c: &mut Criterion,)
{
    let template = card();

    c.bench_function("align_profile_columns", |b| {
        b.iter(|| {
            let document = SvgDocument::new(black_box(template.as_str(),),);
            black_box(apply_column_alignment(document, &PROFILE_COLUMNS,),)
        },)
    },);
}

fn benchmark_fixed_width(c: &mut Criterion,)
{
    let template = card();
    let rules = [uptime_fixed_rule("24 years, 2 months, 10 days",)];

    c.bench_function("pad_fixed_width_line", |b| {
        b.iter(|| {
            let document = SvgDocument::new(black_box(template.as_str(),),);
            black_box(apply_fixed_width(document, 99, &rules,),)
        },)
    },);
}

fn benchmark_helpers(c: &mut Criterion,)
{
    let template = card();
    let origin = chrono::NaiveDate::from_ymd_opt(2001, 8, 6,).expect("valid date",);
    let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 2,).expect("valid date",);

    c.bench_function("visible_text_card", |b| b.iter(|| visible_text(black_box(&template,),),),);
    c.bench_function("format_grouped", |b| b.iter(|| format_grouped(black_box(9_876_543_210,),),),);
    c.bench_function("calendar_diff", |b| {
        b.iter(|| calendar_diff(black_box(origin,), black_box(today,),),)
    },);
}

criterion_group!(
    benches,
    benchmark_slot_substitution,
    benchmark_column_alignment,
    benchmark_fixed_width,
    benchmark_helpers
);
criterion_main!(benches);
