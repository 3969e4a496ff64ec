//! Human-readable summary renderer for diff reports.

use crate::compare::model::{DiffReport, FieldDiff, FieldDiffs};
use crate::model::{FieldValue, RecordDiff};

/// Render a line-oriented text summary of a [`DiffReport`].
///
/// Informational only; the structured report is authoritative.
pub fn render_human_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    out.push_str("## Snapshot Diff\n\n");

    if report.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Changed identities**: {}\n\n",
        report.change_count()
    ));

    for (kind, identities) in report.iter() {
        if identities.is_empty() {
            continue;
        }
        out.push_str(&format!("### {} ({})\n\n", kind, identities.len()));
        for (identity, diffs) in identities {
            out.push_str(&format!("- `{}`\n", identity));
            render_fields(&mut out, diffs, 1);
        }
        out.push('\n');
    }

    out
}

fn render_fields(out: &mut String, diffs: &FieldDiffs, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, diff) in diffs {
        match diff {
            FieldDiff::Value { old, new } => {
                let show = |v: &Option<FieldValue>| match v {
                    Some(v) => format!("`{}`", v),
                    None => "_none_".to_string(),
                };
                out.push_str(&format!(
                    "{indent}- **{}**: {} → {}\n",
                    name,
                    show(old),
                    show(new)
                ));
            }
            FieldDiff::Record(RecordDiff::Changed { old, new }) => {
                out.push_str(&format!("{indent}- **{}**: `{}` → `{}`\n", name, old, new));
            }
            FieldDiff::Record(RecordDiff::Membership { missing, gained }) => {
                out.push_str(&format!("{indent}- **{}**:", name));
                if !missing.is_empty() {
                    out.push_str(&format!(" missing {}", missing.join(", ")));
                }
                if !gained.is_empty() {
                    if !missing.is_empty() {
                        out.push(';');
                    }
                    out.push_str(&format!(" gained {}", gained.join(", ")));
                }
                out.push('\n');
            }
            FieldDiff::Nested(nested) => {
                out.push_str(&format!("{indent}- **{}**\n", name));
                render_fields(out, nested, depth + 1);
            }
        }
    }
}
