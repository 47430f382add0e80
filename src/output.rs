use crate::colors::Colors;
use crate::compare::{ComparisonRecord, DiffReport};
use crate::loader::{RawConfig, RawValue};
use similar::{ChangeTag, TextDiff};

/// Marker printed for a side where the key is absent
const MISSING: &str = "MISSING";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub show_matches: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, show_matches: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            show_matches,
        }
    }
}

fn side(value: &Option<RawValue>) -> String {
    value
        .as_ref()
        .map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn print_record(record: &ComparisonRecord, label: &str, color: &str, names: (&str, &str), ctx: &OutputContext) {
    println!(
        "{}{}:{} [{}] {} | {}: {} | {}: {}",
        color,
        label,
        ctx.colors.reset(),
        record.section,
        record.key,
        names.0,
        side(&record.left),
        names.1,
        side(&record.right),
    );
}

/// Print the per-key report for `diff` in normal or quiet mode.
pub fn print_report(report: &DiffReport, left_name: &str, right_name: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        for record in &report.differences {
            println!("{}.{}", record.section, record.key);
        }
        return;
    }

    for record in &report.differences {
        print_record(record, "Diff", ctx.colors.diff, (left_name, right_name), ctx);
    }

    if ctx.show_matches {
        for record in &report.matches {
            print_record(record, "Match", ctx.colors.matched, (left_name, right_name), ctx);
        }
    }

    print_summary(report, ctx);
}

pub fn print_summary(report: &DiffReport, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    if report.has_differences() {
        println!(
            "{}{} differences{}, {} matches",
            ctx.colors.diff,
            report.differences.len(),
            ctx.colors.reset(),
            report.matches.len()
        );
    } else {
        println!(
            "{}no differences{}, {} matches",
            ctx.colors.matched,
            ctx.colors.reset(),
            report.matches.len()
        );
    }
}

pub fn print_warning(message: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    eprintln!("{}Warning:{} {}", ctx.colors.warning, ctx.colors.reset(), message);
}

/// Render a configuration as canonical INI text: sorted sections and keys,
/// bare flags for boolean-true values. Used by the unified diff view.
pub fn render_text(config: &RawConfig) -> String {
    let mut out = String::new();
    for (section, keys) in &config.sections {
        out.push_str(&format!("[{section}]\n"));
        for (key, value) in keys {
            match value {
                RawValue::Bool(true) => out.push_str(&format!("{key}\n")),
                other => out.push_str(&format!("{key} = {other}\n")),
            }
        }
    }
    out
}

/// Print a unified diff of the two configurations' canonical renderings.
pub fn print_config_diff(left_label: &str, right_label: &str, left: &RawConfig, right: &RawConfig) {
    let left_text = render_text(left);
    let right_text = render_text(right);
    let diff = TextDiff::from_lines(&left_text, &right_text);

    println!("--- {left_label}");
    println!("+++ {right_label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
            }
        }
    }
}
