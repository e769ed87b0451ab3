//! Console summary lines.

use crate::types::{PassLocation, PassingSummary};

/// Placeholder printed for a ratio whose denominator is zero.
pub const NOT_AVAILABLE: &str = "n/a";

/// Human form of an abbreviated passer name: "J.Dart" -> "J. Dart".
pub fn display_name(player: &str) -> String {
    match player.split_once('.') {
        Some((initials, surname)) if !surname.starts_with(' ') => {
            format!("{}. {}", initials, surname)
        }
        _ => player.to_string(),
    }
}

fn two_decimals(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}", v))
}

/// `fraction` as a percentage with two decimals and a `%` sign.
fn percent(fraction: Option<f64>) -> String {
    fraction.map_or_else(|| NOT_AVAILABLE.to_string(), |f| format!("{:.2}%", f * 100.0))
}

/// Lines printed for a summary, in print order.
///
/// The yardage line is followed by an empty line.
pub fn summary_lines(player: &str, summary: &PassingSummary) -> Vec<String> {
    let name = display_name(player);
    let mut lines = vec![
        format!(
            "{} has thrown {} passes in run-leaning situations.",
            name, summary.run_leaning_passes
        ),
        format!(
            "{} has thrown for {} yards this season over {} attempts, at an average of {} yards per throw.",
            name,
            summary.total_passing_yards,
            summary.attempts,
            two_decimals(summary.yards_per_attempt)
        ),
        String::new(),
        format!(
            "{} has thrown {} incomplete passes and has a completion percentage of {}.",
            name,
            summary.incompletions,
            percent(summary.completion_ratio)
        ),
        format!(
            "Excluding the incomplete passes, {} has an average yards per completion of {} yards.",
            name,
            two_decimals(summary.yards_per_completion)
        ),
    ];

    for location in PassLocation::ALL {
        let (count, percentage) = summary
            .location(location)
            .map_or((0, None), |share| (share.count, share.percentage));
        lines.push(format!(
            "{} has thrown passes to the {} {} times, or on {} of snaps.",
            name,
            location,
            count,
            percent(percentage.map(|p| p / 100.0))
        ));
    }

    lines.push(format!(
        "{} has been sacked {} times, or on {} of passing snaps.",
        name,
        summary.sacks,
        percent(summary.sack_rate)
    ));

    lines
}

/// Print the summary to stdout.
pub fn print_summary(player: &str, summary: &PassingSummary) {
    for line in summary_lines(player, summary) {
        println!("{}", line);
    }
}
