//! Argument parsing and text rendering for the `seolens` command
//!
//! Kept in a library so the pieces can be tested without spawning the binary.

use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use seolens_core::simulated::{KeywordAnalysis, default_keywords, simulate_keywords};
use seolens_core::technical::AccessLevel;
use seolens_core::{Fetcher, Report, UniquenessReport, seo_report, uniqueness_report};
use serde::Serialize;
use url::Url;

pub const APP_NAME: &str = "seolens";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full report
    Report,
    /// Lexical-diversity score only
    Uniqueness,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub domain: String,
    pub mode: OutputMode,
    pub json: bool,
    pub include_keywords: bool,
    /// `Some` when output should also be written to disk
    pub save_target: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

pub fn parse_arguments(args: &[String]) -> Result<CliCommand> {
    if args.is_empty() {
        return Ok(CliCommand::Help);
    }

    let mut domain: Option<String> = None;
    let mut mode = OutputMode::Report;
    let mut json = false;
    let mut include_keywords = false;
    let mut save_target: Option<PathBuf> = None;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if matches!(arg.as_str(), "-h" | "--help") {
            return Ok(CliCommand::Help);
        }

        if matches!(arg.as_str(), "-v" | "--version") {
            return Ok(CliCommand::Version);
        }

        if matches!(arg.as_str(), "-u" | "--uniqueness") {
            mode = OutputMode::Uniqueness;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-j" | "--json") {
            json = true;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-k" | "--keywords") {
            include_keywords = true;
            i += 1;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--save=").or_else(|| arg.strip_prefix("-s=")) {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            save_target = Some(PathBuf::from(value));
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-s" | "--save") {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            let next_is_path = domain.is_some()
                && args
                    .get(i + 1)
                    .map(|next| !next.starts_with('-'))
                    .unwrap_or(false);

            if next_is_path {
                save_target = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            } else {
                // Resolved to a file name once the output format is known
                save_target = Some(PathBuf::new());
                i += 1;
            }
            continue;
        }

        if arg.starts_with('-') {
            return Err(anyhow!("unknown flag: {arg}"));
        }

        if domain.is_none() {
            domain = Some(arg.clone());
        } else {
            return Err(anyhow!("unexpected additional argument: {arg}"));
        }

        i += 1;
    }

    let domain = domain.ok_or_else(|| anyhow!("missing <DOMAIN> argument"))?;

    if mode == OutputMode::Uniqueness && include_keywords {
        return Err(anyhow!("--keywords cannot be combined with --uniqueness"));
    }

    let save_target = save_target.map(|path| {
        if path.as_os_str().is_empty() || path.is_dir() {
            path.join(default_file_name(&domain, json))
        } else {
            path
        }
    });

    Ok(CliCommand::Run(CliOptions {
        domain,
        mode,
        json,
        include_keywords,
        save_target,
    }))
}

/// `seolens-<host>.txt` or `.json`
pub fn default_file_name(domain: &str, json: bool) -> String {
    let host = Url::parse(domain)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| domain.to_string());
    let slug: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let ext = if json { "json" } else { "txt" };
    format!("{APP_NAME}-{slug}.{ext}")
}

pub fn help_text() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{APP_NAME} - static SEO analysis of a single page");
    let _ = writeln!(out, "Usage: {APP_NAME} [OPTIONS] <DOMAIN>\n");
    let _ = writeln!(out, "Options:");
    let _ = writeln!(out, "  -u, --uniqueness        Only report the lexical-diversity score");
    let _ = writeln!(out, "  -k, --keywords          Append simulated keyword rankings");
    let _ = writeln!(out, "  -j, --json              Print JSON instead of text");
    let _ = writeln!(out, "  -s, --save [PATH]       Also write the output to a file");
    let _ = writeln!(out, "  -v, --version           Show version information");
    let _ = writeln!(out, "  -h, --help              Show this help message");
    out
}

pub fn version_text() -> String {
    format!("{APP_NAME} {VERSION}")
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<&'a KeywordAnalysis>,
}

/// Run the analysis selected by `options` and return the rendered output
pub async fn run(fetcher: &Fetcher, options: &CliOptions) -> Result<String> {
    match options.mode {
        OutputMode::Uniqueness => {
            let report = uniqueness_report(fetcher, &options.domain).await?;
            if options.json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(render_uniqueness(&report))
            }
        }
        OutputMode::Report => {
            let report = seo_report(fetcher, &options.domain).await?;
            let keywords = options.include_keywords.then(|| {
                let host = Url::parse(&report.url)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_string))
                    .unwrap_or_else(|| report.domain.clone());
                let mut rng = rand::thread_rng();
                KeywordAnalysis::new(simulate_keywords(&default_keywords(&host), &mut rng))
            });

            if options.json {
                let output = JsonOutput {
                    report: &report,
                    keywords: keywords.as_ref(),
                };
                Ok(serde_json::to_string_pretty(&output)?)
            } else {
                let mut out = render_report(&report);
                if let Some(keywords) = &keywords {
                    out.push_str(&render_keywords(keywords));
                }
                Ok(out)
            }
        }
    }
}

pub fn render_uniqueness(report: &UniquenessReport) -> String {
    let mut out = String::new();
    push_section_header(&mut out, "🔎", &format!("Uniqueness: {}", report.domain));
    push_key_value(&mut out, "Score", &format!("{}/100", report.score));
    push_key_value(&mut out, "Words", &report.word_count.to_string());
    push_key_value(&mut out, "Unique words", &report.unique_words.to_string());
    push_sample(&mut out, &report.sample);
    out
}

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    push_section_header(&mut out, "🔎", &format!("SEO Report: {}", report.domain));
    push_key_value(&mut out, "URL", &report.url);
    push_key_value(&mut out, "Generated", &report.timestamp.to_rfc3339());
    out.push('\n');

    let meta = &report.meta;
    push_section_header(&mut out, "🏷", "Meta");
    push_key_value(&mut out, "Title", meta.title.as_deref().unwrap_or("(missing)"));
    push_key_value(
        &mut out,
        "Description",
        meta.description.as_deref().unwrap_or("(missing)"),
    );
    push_key_value(&mut out, "Canonical", meta.canonical.as_deref().unwrap_or(""));
    push_key_value(&mut out, "Robots", meta.robots.as_deref().unwrap_or(""));
    push_key_value(&mut out, "Charset", meta.charset.as_deref().unwrap_or(""));
    push_key_value(&mut out, "Viewport", meta.viewport.as_deref().unwrap_or(""));
    for (key, value) in &meta.open_graph {
        push_key_value(&mut out, &format!("og:{key}"), value);
    }
    out.push('\n');

    let metrics = &report.metrics;
    push_section_header(&mut out, "📝", "Content");
    push_key_value(&mut out, "Words", &metrics.word_count.to_string());
    push_key_value(&mut out, "Unique words", &metrics.unique_words.to_string());
    push_key_value(&mut out, "Uniqueness", &format!("{}/100", metrics.uniqueness_score));
    push_key_value(&mut out, "Links", &metrics.links.len().to_string());
    push_sample(&mut out, &metrics.sample);
    out.push('\n');

    let perf = &report.performance;
    push_section_header(&mut out, "⚡", "Performance (static estimate)");
    push_key_value(&mut out, "HTML size", &format!("{} bytes", perf.html_size_bytes));
    push_key_value(&mut out, "Scripts", &perf.js_files.to_string());
    push_key_value(&mut out, "Stylesheets", &perf.css_files.to_string());
    push_key_value(&mut out, "Inline styles", &perf.inline_styles_count.to_string());
    push_key_value(&mut out, "Score", &format!("{}/100", perf.performance_score_est));
    out.push('\n');

    let technical = &report.technical;
    push_section_header(&mut out, "🛠", "Technical");
    push_key_value(&mut out, "HTTPS", yes_no(technical.security.https));
    let robots = match (&technical.robots, technical.sitemap) {
        (Some(_), _) => "found",
        (None, Some(_)) => "missing",
        (None, None) => "unreachable",
    };
    push_key_value(&mut out, "robots.txt", robots);
    let sitemap = match technical.sitemap {
        Some(true) => "found",
        Some(false) => "missing",
        None => "unreachable",
    };
    push_key_value(&mut out, "sitemap.xml", sitemap);
    push_key_value(
        &mut out,
        "X-Frame-Options",
        technical.security.x_frame_options.as_deref().unwrap_or("(not set)"),
    );
    push_key_value(
        &mut out,
        "CSP",
        technical
            .security
            .content_security_policy
            .as_deref()
            .unwrap_or("(not set)"),
    );
    if let Some(rules) = &technical.robots_rules {
        let blocked: Vec<&str> = rules
            .crawler_access
            .iter()
            .filter(|c| c.access == AccessLevel::Blocked)
            .map(|c| c.name.as_str())
            .collect();
        push_key_value(&mut out, "Blocked bots", &blocked.join(", "));
        push_key_value(&mut out, "Sitemaps", &rules.sitemaps.join(", "));
    }
    out.push('\n');

    let audit = &report.content;
    push_section_header(&mut out, "✅", &format!("Content audit: {}/100", audit.score));
    if audit.issues.is_empty() {
        let _ = writeln!(out, "No issues found.");
    }
    for issue in &audit.issues {
        let _ = writeln!(
            out,
            "• [{}] {}: {}",
            issue.severity.as_str(),
            issue.kind,
            issue.message
        );
    }

    out
}

pub fn render_keywords(analysis: &KeywordAnalysis) -> String {
    let mut out = String::new();
    out.push('\n');
    push_section_header(&mut out, "🔑", "Keywords (simulated)");
    let summary = &analysis.summary;
    push_key_value(&mut out, "Tracked", &summary.total.to_string());
    push_key_value(&mut out, "Top 10", &summary.in_top10.to_string());
    push_key_value(&mut out, "Top 50", &summary.in_top50.to_string());
    push_key_value(&mut out, "Avg position", &summary.avg_position.to_string());
    push_key_value(&mut out, "Total volume", &summary.total_volume.to_string());
    out.push('\n');
    for row in &analysis.keywords {
        let _ = writeln!(
            out,
            "| {:<32} | #{:<3} | {:>6}/mo | difficulty {:>2} |",
            row.keyword, row.position, row.search_volume, row.difficulty
        );
    }
    out
}

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;
const SAMPLE_PREVIEW: usize = 160;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn push_sample(buf: &mut String, sample: &str) {
    if sample.is_empty() {
        return;
    }
    let preview: String = sample.chars().take(SAMPLE_PREVIEW).collect();
    let ellipsis = if sample.chars().count() > SAMPLE_PREVIEW { "…" } else { "" };
    let _ = writeln!(buf, "\n> {preview}{ellipsis}");
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
