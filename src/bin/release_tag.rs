//! Release tag helper for the publish workflow.
//!
//! Validates that the crate version matches the next tag for the given
//! release branch, emits GitHub Actions outputs, and with `--create` makes
//! the annotated tag. Pushing the tag is left to the workflow.

use std::io::Write;
use std::process::{Command, ExitCode};

use clap::Parser;

use colada::version::{extract_version_prefix, release_tags, tag_for, validate_version};

/// Compute and create release tags
#[derive(Parser, Debug)]
#[command(name = "release-tag", version, about)]
struct Args {
    /// Release branch name (e.g. release-1.0)
    release_branch: String,

    /// Create the annotated tag after validation
    #[arg(long)]
    create: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let prefix = extract_version_prefix(&args.release_branch)?;

    let existing = list_tags(prefix)?;
    let series = release_tags(&existing, prefix);
    if let Some(latest) = series.last() {
        println!("Latest tag in series: {latest}");
    }

    let check = validate_version(&args.release_branch, &series, env!("CARGO_PKG_VERSION"))?;

    println!("Release branch: {}", args.release_branch);
    println!("Expected version: {}", check.expected);
    println!("Actual version: {}", check.actual);

    set_github_output("version_valid", &check.valid.to_string())?;
    set_github_output("expected_version", &check.expected)?;
    set_github_output("actual_version", &check.actual)?;

    if !check.valid {
        eprintln!(
            "Version validation failed: Cargo.toml has {} but the next tag for {} is {}",
            check.actual, args.release_branch, check.expected
        );
        return Ok(ExitCode::FAILURE);
    }

    let tag = tag_for(&check.expected);
    set_github_output("new_tag", &tag)?;
    println!("Tag: {tag}");

    if args.create {
        create_tag(&tag, &check.expected)?;
        println!("Tag {tag} created");
    }

    Ok(ExitCode::SUCCESS)
}

/// List existing tags of the series via `git tag -l`.
///
/// Arguments go through an argument vector, never a shell; the prefix was
/// already validated to contain only digits and a dot.
fn list_tags(prefix: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = Command::new("git")
        .args(["tag", "-l", &format!("v{prefix}.*")])
        .output()?;
    if !output.status.success() {
        return Err(format!("git tag -l failed with status {}", output.status).into());
    }
    let stdout = String::from_utf8(output.stdout)?;
    Ok(stdout.lines().map(str::to_string).collect())
}

fn create_tag(tag: &str, version: &str) -> Result<(), Box<dyn std::error::Error>> {
    let status = Command::new("git")
        .args(["tag", "-a", tag, "-m", &format!("Release {version}")])
        .status()?;
    if !status.success() {
        return Err(format!("git tag failed with status {status}").into());
    }
    Ok(())
}

/// Append a `name=value` line to `$GITHUB_OUTPUT` when running in Actions.
fn set_github_output(name: &str, value: &str) -> std::io::Result<()> {
    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        writeln!(file, "{name}={value}")?;
    }
    Ok(())
}
