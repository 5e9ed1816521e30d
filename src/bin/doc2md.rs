//! CLI binary for doc2md.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use doc2md::{
    convert, convert_to_file, inspect, validate_sitemap, ConversionConfig, SourceFormat,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout); format auto-detected
  doc2md data.json
  doc2md page.html -o page.md

  # Convert from URL
  doc2md https://example.com/pricing.html -o pricing.md

  # Force a format when detection would guess wrong
  doc2md --format xml export.dat

  # Extract a sitemap into a Markdown table of URLs
  doc2md https://example.com/sitemap.xml

  # Validate a sitemap without converting
  doc2md --check-sitemap sitemap.xml

  # Detect the format only
  doc2md --detect mystery.bin

  # Structured JSON output (ConversionOutput envelope)
  doc2md --json data.json > result.json

SUPPORTED FORMATS:
  Format    Strategy
  ────────  ─────────────────────────────────────────────
  json      built-in renderer: table / nested list / fenced fallback
  html      HTML-to-Markdown transpiler
  xml       same transpiler as html (text content survives)
  sitemap   <urlset>/<sitemapindex> extraction to a URL table
  pdf       text extraction
"#;

/// Convert JSON, HTML, XML, sitemap, and PDF documents to Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "doc2md",
    version,
    about = "Convert JSON, HTML, XML, sitemap, and PDF documents to Markdown",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local file path or HTTP/HTTPS URL.
    input: String,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long, env = "DOC2MD_OUTPUT")]
    output: Option<PathBuf>,

    /// Source format: json, html, xml, sitemap, pdf. Auto-detected if unset.
    #[arg(short, long, env = "DOC2MD_FORMAT")]
    format: Option<String>,

    /// Maximum input size in bytes.
    #[arg(long, env = "DOC2MD_MAX_BYTES", default_value_t = doc2md::DEFAULT_MAX_INPUT_BYTES)]
    max_bytes: usize,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "DOC2MD_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Skip the Markdown cleanup passes on transpiler/extractor output.
    #[arg(long, env = "DOC2MD_RAW")]
    raw: bool,

    /// Prepend YAML front-matter with source and format.
    #[arg(long, env = "DOC2MD_METADATA")]
    metadata: bool,

    /// Output structured JSON (ConversionOutput) instead of Markdown.
    #[arg(long, env = "DOC2MD_JSON")]
    json: bool,

    /// Detect and print the source format only, no conversion.
    #[arg(long)]
    detect: bool,

    /// Parse the input as a sitemap and print a validation report.
    #[arg(long)]
    check_sitemap: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOC2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Detect-only mode ─────────────────────────────────────────────────
    if cli.detect {
        let info = inspect(&cli.input).await.context("Failed to inspect input")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise info")?
            );
        } else {
            println!("Source:  {}", info.source);
            println!("Format:  {}", info.format);
            println!("Size:    {} bytes", info.input_bytes);
        }
        return Ok(());
    }

    let config = build_config(&cli)?;

    // ── Sitemap validation mode ──────────────────────────────────────────
    if cli.check_sitemap {
        let report = validate_sitemap(&cli.input, &config)
            .await
            .context("Failed to validate sitemap")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialise report")?
            );
        } else if report.is_valid() {
            println!(
                "{} {} entries, no protocol violations",
                green("✔"),
                bold(&report.entry_count.to_string())
            );
        } else {
            println!(
                "{} {} entries, {} issue(s):",
                red("✘"),
                report.entry_count,
                report.issues.len()
            );
            for issue in &report.issues {
                println!("  - {issue}");
            }
        }
        if !report.is_valid() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = convert_to_file(&cli.input, output_path, &config)
            .await
            .context("Conversion failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} bytes in, {} lines out, {}ms  →  {}",
                green("✔"),
                stats.input_bytes,
                stats.output_lines,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let output = convert(&cli.input, &config)
            .await
            .context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.markdown.as_bytes())
                .context("Failed to write to stdout")?;
            // Keep the shell prompt off the last content line.
            if !output.markdown.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "{}",
                dim(&format!(
                    "{} → {} bytes of Markdown in {}ms",
                    output.format, output.stats.output_bytes, output.stats.total_duration_ms
                ))
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .max_input_bytes(cli.max_bytes)
        .download_timeout_secs(cli.download_timeout)
        .postprocess(!cli.raw)
        .include_metadata(cli.metadata);

    if let Some(ref fmt) = cli.format {
        let parsed: SourceFormat = fmt
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid --format value")?;
        builder = builder.format(parsed);
    }

    builder.build().context("Invalid configuration")
}
