//! `qsynth check`: generate a dataset and run the consistency battery on it.

use std::time::Instant;

use qsynth_core::{ExperimentParameters, ExperimentResult, fingerprint, generate};
use qsynth_tests::{TestResult, calculate_quality_score, run_all_checks};

use super::{exit_on_error, write_text};

pub fn run(params: ExperimentParameters, output_path: Option<&str>) {
    let t0 = Instant::now();
    let result = exit_on_error(generate(&params).map_err(Into::into));
    let checks = run_all_checks(&result);
    let elapsed = t0.elapsed().as_secs_f64();

    println!(
        "Checking {} dataset: {} measurements, {} shots [{elapsed:.2}s]\n",
        result.kind(),
        result.metadata.total_measurements,
        result.metadata.total_shots
    );
    print!("{}", render_table(&checks));

    let score = calculate_quality_score(&checks);
    let passed = checks.iter().filter(|r| r.passed).count();
    println!("\nScore: {score:.1}/100 ({passed}/{} passed)", checks.len());

    if let Some(path) = output_path {
        exit_on_error(write_text(path, &generate_report(&result, &checks)));
        println!("Report saved to: {path}");
    }

    if passed < checks.len() {
        std::process::exit(1);
    }
}

/// Plain-text pass/fail table.
fn render_table(checks: &[TestResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>4} {:>5} {:>10} {:>12}\n",
        "Check", "Pass", "Grade", "p-value", "Statistic"
    ));
    out.push_str(&format!("{}\n", "-".repeat(59)));
    for t in checks {
        out.push_str(&format!(
            "{:<24} {:>4} {:>5} {:>10} {:>12.4}\n",
            t.name,
            if t.passed { "ok" } else { "FAIL" },
            t.grade,
            format_p(t.p_value),
            t.statistic
        ));
    }
    out
}

fn format_p(p: Option<f64>) -> String {
    p.map(|p| format!("{p:.6}")).unwrap_or_else(|| "-".to_string())
}

/// Markdown report with the dataset parameters and one row per check.
fn generate_report(result: &ExperimentResult, checks: &[TestResult]) -> String {
    let mut report = String::new();
    report.push_str(&format!("# qsynth consistency report: {}\n\n", result.kind()));
    report.push_str(&format!(
        "- Parameters: `{}`\n- Measurements: {}\n- Total shots: {}\n- Fingerprint: `{}`\n- Score: {:.1}/100\n\n",
        serde_json::to_string(&result.parameters).unwrap_or_default(),
        result.metadata.total_measurements,
        result.metadata.total_shots,
        fingerprint(result),
        calculate_quality_score(checks)
    ));
    report.push_str("| Check | P | Grade | p-value | Statistic | Details |\n");
    report.push_str("|-------|---|-------|---------|-----------|---------|\n");
    for t in checks {
        report.push_str(&format!(
            "| {} | {} | {} | {} | {:.4} | {} |\n",
            t.name,
            if t.passed { "✓" } else { "✗" },
            t.grade,
            format_p(t.p_value),
            t.statistic,
            t.details
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsynth_core::BellParams;

    fn bell() -> ExperimentResult {
        generate(&ExperimentParameters::Bell(BellParams {
            seed: Some(12),
            ..Default::default()
        }))
        .unwrap()
    }

    #[test]
    fn table_has_row_per_check() {
        let checks = run_all_checks(&bell());
        let table = render_table(&checks);
        assert_eq!(table.lines().count(), checks.len() + 2);
        assert!(table.contains("CHSH Ceiling"));
    }

    #[test]
    fn report_written_to_file() {
        let result = bell();
        let checks = run_all_checks(&result);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_text(path.to_str().unwrap(), &generate_report(&result, &checks)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# qsynth consistency report: bell_state"));
        assert!(text.contains(&fingerprint(&result)));
        assert!(text.contains("| Count Conservation | ✓ | A |"));
    }

    #[test]
    fn missing_p_value_renders_dash() {
        assert_eq!(format_p(None), "-");
        assert_eq!(format_p(Some(0.5)), "0.500000");
    }
}
