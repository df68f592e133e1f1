//! Report generation for simulated sessions.

use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use crate::simulation::SessionReport;

/// Cross-session rollup for the console and markdown reports.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub sessions: usize,
    pub mean_score: f64,
    pub max_score: u32,
    pub mean_accuracy_pct: f64,
    pub mean_questions: f64,
    pub end_reasons: BTreeMap<&'static str, usize>,
}

#[must_use]
pub fn aggregate(reports: &[SessionReport]) -> Aggregate {
    let sessions = reports.len();
    let mut end_reasons: BTreeMap<&'static str, usize> = BTreeMap::new();
    for report in reports {
        *end_reasons.entry(report.end_reason).or_insert(0) += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = sessions.max(1) as f64;
    Aggregate {
        sessions,
        mean_score: reports.iter().map(|r| f64::from(r.score)).sum::<f64>() / denom,
        max_score: reports.iter().map(|r| r.score).max().unwrap_or(0),
        mean_accuracy_pct: reports
            .iter()
            .map(|r| f64::from(r.accuracy_pct))
            .sum::<f64>()
            / denom,
        mean_questions: reports
            .iter()
            .map(|r| f64::from(r.questions_answered))
            .sum::<f64>()
            / denom,
        end_reasons,
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[SessionReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Session Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;

    for report in reports {
        writeln!(
            out,
            "{} seed {} ({}) — {} | score {} | accuracy {}% | {}/{} rounds",
            "▶".blue(),
            report.seed,
            report.share_code.bold(),
            report.strategy,
            report.score.to_string().green(),
            report.accuracy_pct,
            report.questions_answered,
            report.rounds_total,
        )?;
        writeln!(out, "   ended: {}", report.end_reason.yellow())?;
    }

    let rollup = aggregate(reports);
    writeln!(out)?;
    writeln!(out, "{}", "⚡ Aggregate".bright_yellow().bold())?;
    writeln!(out, "{}", "===========".yellow())?;
    writeln!(out, "Sessions: {}", rollup.sessions)?;
    writeln!(out, "Mean score: {:.1}", rollup.mean_score)?;
    writeln!(out, "Max score: {}", rollup.max_score)?;
    writeln!(out, "Mean accuracy: {:.1}%", rollup.mean_accuracy_pct)?;
    writeln!(out, "Mean questions answered: {:.1}", rollup.mean_questions)?;
    for (reason, count) in &rollup.end_reasons {
        writeln!(out, "  {reason} × {count}")?;
    }
    writeln!(out, "Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[SessionReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, reports: &[SessionReport]) -> Result<()> {
    writeln!(out, "# CityGuess Simulation Results\n")?;

    let rollup = aggregate(reports);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Sessions**: {}", rollup.sessions)?;
    writeln!(out, "- **Mean score**: {:.1}", rollup.mean_score)?;
    writeln!(out, "- **Max score**: {}", rollup.max_score)?;
    writeln!(out, "- **Mean accuracy**: {:.1}%\n", rollup.mean_accuracy_pct)?;

    writeln!(out, "## Sessions\n")?;
    writeln!(
        out,
        "| Seed | Share code | Strategy | End | Score | Accuracy | Answered |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for report in reports {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {}% | {}/{} |",
            report.seed,
            report.share_code,
            report.strategy,
            report.end_reason,
            report.score,
            report.accuracy_pct,
            report.questions_answered,
            report.rounds_total,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(seed: u64, score: u32, end_reason: &'static str) -> SessionReport {
        SessionReport {
            seed,
            share_code: format!("GG-PARIS{seed:02}"),
            strategy: "mixed",
            end_reason,
            score,
            best_score: score,
            questions_answered: 6,
            correct_answers: 4,
            accuracy_pct: 67,
            ticks_used: 12,
            rounds_total: 10,
        }
    }

    #[test]
    fn aggregate_counts_end_reasons_and_means() {
        let reports = vec![
            sample_report(1, 300, "No more series!"),
            sample_report(2, 100, "No lives left!"),
            sample_report(3, 200, "No more series!"),
        ];
        let rollup = aggregate(&reports);
        assert_eq!(rollup.sessions, 3);
        assert!((rollup.mean_score - 200.0).abs() < f64::EPSILON);
        assert_eq!(rollup.max_score, 300);
        assert_eq!(rollup.end_reasons["No more series!"], 2);
        assert_eq!(rollup.end_reasons["No lives left!"], 1);
    }

    #[test]
    fn aggregate_of_nothing_is_all_zero() {
        let rollup = aggregate(&[]);
        assert_eq!(rollup.sessions, 0);
        assert_eq!(rollup.max_score, 0);
        assert!(rollup.end_reasons.is_empty());
    }

    #[test]
    fn json_report_round_trips_fields() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample_report(7, 230, "Time is over!")]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"share_code\": \"GG-PARIS07\""));
        assert!(text.contains("\"score\": 230"));
    }

    #[test]
    fn markdown_report_tabulates_sessions() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample_report(7, 230, "Time is over!")]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# CityGuess Simulation Results"));
        assert!(text.contains("| 7 | GG-PARIS07 | mixed | Time is over! | 230 | 67% | 6/10 |"));
    }

    #[test]
    fn console_report_writes_summary_sections() {
        let mut buf = Vec::new();
        generate_console_report(
            &mut buf,
            &[sample_report(7, 230, "Time is over!")],
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Session Results Summary"));
        assert!(text.contains("Aggregate"));
    }
}
