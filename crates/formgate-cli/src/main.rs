//! formgate - replay simulated input against a page's validated forms
//!
//! Loads an HTML page, enables validation with the given configuration,
//! applies `--input` edits (each fires an `input` event), then `--clear`
//! resets and `--submit` attempts, and prints the resulting form state.

mod report;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use formgate::{FormValidator, ValidationConfig};
use tracing_subscriber::EnvFilter;

use report::FormReport;

#[derive(Parser)]
#[command(name = "formgate", version, about = "Live form validation harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the forms of an HTML page
    Check {
        /// HTML page to load
        page: PathBuf,

        /// JSON validation config (defaults to the popup-form convention)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Type a value into an input: `<element-id>=<value>` (repeatable)
        #[arg(short, long = "input", value_name = "ID=VALUE")]
        inputs: Vec<String>,

        /// Reset a form after the inputs are applied (repeatable)
        #[arg(long = "clear", value_name = "FORM_ID")]
        clears: Vec<String>,

        /// Attempt to submit a form after the inputs are applied (repeatable)
        #[arg(long = "submit", value_name = "FORM_ID")]
        submits: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            page,
            config,
            inputs,
            clears,
            submits,
            json,
        } => check(page, config, &inputs, &clears, &submits, json),
    }
}

fn check(
    page: PathBuf,
    config: Option<PathBuf>,
    inputs: &[String],
    clears: &[String],
    submits: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => ValidationConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ValidationConfig::default(),
    };
    let mut doc = formgate_html::load_file(&page)
        .with_context(|| format!("loading page {}", page.display()))?;

    let validator = FormValidator::new(config)?;
    let bindings = validator.enable_validation(&mut doc)?;
    tracing::info!("Validating {} form(s) in {}", bindings.len(), page.display());

    for edit in inputs {
        let Some((id, value)) = edit.split_once('=') else {
            bail!("--input expects ID=VALUE, got {edit:?}");
        };
        let input = doc
            .get_element_by_id(id)
            .with_context(|| format!("no element with id {id:?}"))?;
        doc.user_input(input, value)?;
    }

    for id in clears {
        let form = doc
            .get_element_by_id(id)
            .with_context(|| format!("no form with id {id:?}"))?;
        validator.clear_validation(&mut doc, form)?;
    }

    for id in submits {
        let form = doc
            .get_element_by_id(id)
            .with_context(|| format!("no form with id {id:?}"))?;
        let proceeded = doc.submit(form)?;
        println!(
            "submit #{id}: {}",
            if proceeded { "sent" } else { "prevented" }
        );
    }

    let reports = bindings
        .iter()
        .map(|binding| FormReport::collect(&doc, &validator, binding))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{report}");
        }
    }
    Ok(())
}
