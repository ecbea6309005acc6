//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use svgdok_convert::ConverterRegistry;
use svgdok_ooxml::{replace_vector_images, ReplaceReport};

/// Output format for the conversion report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "svgdok")]
#[command(author, version, about = "Replace EMF/WMF images in DOCX files with SVG", long_about = None)]
struct Cli {
    /// Input DOCX file
    input: PathBuf,

    /// Output DOCX file
    #[arg(short, long)]
    output: PathBuf,

    /// Wall-clock limit per converter invocation, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Run the CLI with arguments from the environment
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    convert_command(
        &cli.input,
        &cli.output,
        Duration::from_secs(cli.timeout_secs),
        cli.format,
    )
}

/// Rewrite one package and print the report
pub fn convert_command(
    input: &PathBuf,
    output: &PathBuf,
    timeout: Duration,
    format: OutputFormat,
) -> Result<()> {
    let registry = ConverterRegistry::with_timeout(timeout);
    let report = replace_vector_images(input, output, &registry)
        .with_context(|| format!("Failed to rewrite {}", input.display()))?;

    match format {
        OutputFormat::Text => print!("{}", render_text_report(&report, output)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Format the human-readable report
fn render_text_report(report: &ReplaceReport, output: &PathBuf) -> String {
    let mut text = String::new();
    for replacement in &report.replacements {
        text.push_str(&format!(
            "Replaced {} with {}\n",
            replacement.from, replacement.to
        ));
    }
    text.push_str(&format!(
        "{} image(s) replaced\nCreated: {}\n",
        report.len(),
        output.display()
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgdok_ooxml::Replacement;

    #[test]
    fn test_render_text_report() {
        let report = ReplaceReport {
            replacements: vec![
                Replacement {
                    from: "image1.emf".to_string(),
                    to: "image1.svg".to_string(),
                },
                Replacement {
                    from: "image2.wmf".to_string(),
                    to: "image2.svg".to_string(),
                },
            ],
        };

        let text = render_text_report(&report, &PathBuf::from("out.docx"));
        assert!(text.contains("Replaced image1.emf with image1.svg"));
        assert!(text.contains("Replaced image2.wmf with image2.svg"));
        assert!(text.contains("2 image(s) replaced"));
        assert!(text.contains("Created: out.docx"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = ReplaceReport::default();
        let text = render_text_report(&report, &PathBuf::from("out.docx"));
        assert!(text.starts_with("0 image(s) replaced"));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
