//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use edgefit_core::model::{Recommendation, Section, WiscarDimension};
use edgefit_core::report::AssessmentReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a finished assessment.
pub fn generate_html(report: &AssessmentReport) -> String {
    let b = &report.breakdown;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} results</title>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{}</h1>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Report {} | {}</p>\n",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Overall verdict
    html.push_str("<section class=\"verdict\">\n");
    html.push_str(&format!(
        "<div class=\"overall\">{}<span>/100</span></div>\n",
        b.overall_score
    ));
    html.push_str(&format!(
        "<div class=\"badge {}\">{}</div>\n",
        band_class(b.recommendation),
        b.recommendation
    ));
    if !report.guidance.summary.is_empty() {
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&report.guidance.summary)
        ));
    }
    html.push_str("</section>\n");

    // Sub-scores
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Scores</h2>\n");
    let mut bars = vec![
        ("Psychometric Fit".to_string(), b.psychometric_fit),
        ("Technical Readiness".to_string(), b.technical_readiness),
    ];
    bars.extend(
        WiscarDimension::ALL
            .into_iter()
            .map(|d| (format!("WISCAR: {}", d.title()), b.wiscar_scores.get(d))),
    );
    html.push_str(&generate_bar_chart(&bars));
    html.push_str(&format!(
        "<p class=\"meta\">WISCAR average: {:.2} / {}</p>\n",
        b.wiscar_average, report.catalog.scale_max
    ));
    html.push_str("</section>\n");

    // Guidance
    html.push_str("<section class=\"guidance\">\n");
    html.push_str("<h2>Next Steps</h2>\n<ol>\n");
    for step in &report.guidance.next_steps {
        html.push_str(&format!("<li>{}</li>\n", html_escape(step)));
    }
    html.push_str("</ol>\n");
    html.push_str("<h2>Suggested Roles</h2>\n<ul>\n");
    for role in &report.guidance.career_roles {
        html.push_str(&format!("<li>{}</li>\n", html_escape(role)));
    }
    html.push_str("</ul>\n");
    html.push_str("</section>\n");

    // Answers
    html.push_str("<section class=\"answers\">\n");
    for section in Section::ALL {
        html.push_str("<details>\n");
        html.push_str(&format!(
            "<summary>{}</summary>\n",
            html_escape(section.title())
        ));
        html.push_str("<table>\n");
        html.push_str(
            "<thead><tr><th>Question</th><th>Answer</th><th>Points</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");
        for a in report.answers_for(section) {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
                html_escape(&a.prompt),
                html_escape(&a.label),
                a.points,
                a.max_points
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str("</details>\n");
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn band_class(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Yes => "yes",
        Recommendation::Maybe => "maybe",
        Recommendation::NotYet => "not-yet",
    }
}

/// Horizontal bars for 0–100 scores.
fn generate_bar_chart(bars: &[(String, u8)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, score)) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = usize::from(*score) * max_width / 100;

        let color = if *score >= 80 {
            "#22c55e"
        } else if *score >= 60 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 960px; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
.verdict { text-align: center; padding: 1rem; border: 1px solid var(--border); border-radius: 8px; }
.overall { font-size: 3rem; font-weight: bold; }
.overall span { font-size: 1.25rem; color: var(--muted); }
.badge { display: inline-block; padding: 0.25rem 1rem; border-radius: 999px; color: #fff; font-weight: bold; }
.badge.yes { background: #16a34a; }
.badge.maybe { background: #ca8a04; }
.badge.not-yet { background: #dc2626; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
