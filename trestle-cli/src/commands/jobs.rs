//! Job command handlers
//!
//! Read-only views: folder listings and single builds.

use anyhow::{Context, Result};
use colored::*;
use trestle_core::domain::build::Build;
use trestle_core::domain::job::{JobPath, JobSummary};

use crate::config::Config;

/// List the jobs in a folder
pub async fn list_jobs(config: &Config, folder: &str) -> Result<()> {
    let client = config.client()?;
    let folder = JobPath::parse(folder);

    let jobs = client
        .list_jobs(&folder)
        .await
        .context("Failed to list jobs")?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

/// Get and display a single build
///
/// The job is looked up first so a missing job and a missing build report
/// different errors.
pub async fn show_build(config: &Config, job: &str, number: u64) -> Result<()> {
    let client = config.client()?;
    let job = JobPath::parse(job);

    let summary = client
        .get_job(&job)
        .await
        .with_context(|| format!("Failed to get job {}", job))?;
    print_job_summary(&summary);

    let build = client
        .get_build(&job, number)
        .await
        .with_context(|| format!("Failed to get build {} #{}", job, number))?;

    print_build_details(&job, number, &build);

    Ok(())
}

fn print_job_summary(job: &JobSummary) {
    let color = job.color.as_deref().unwrap_or("");
    println!("  {} {} {}", "▸".cyan(), job.name, colorize_ball(color));
    if !job.url.is_empty() {
        println!("    {}", job.url.dimmed());
    }
}

fn print_build_details(job: &JobPath, number: u64, build: &Build) {
    println!("{}", format!("{} #{}", job, number).bold());
    println!("  Status: {}", status_label(build));
    if !build.url.is_empty() {
        println!("  URL:    {}", build.url.dimmed());
    }
}

fn status_label(build: &Build) -> ColoredString {
    if !build.is_finished() {
        return "RUNNING".blue();
    }
    match build.result.as_ref() {
        Some(r) if r.is_success() => r.as_str().green(),
        Some(r) => r.as_str().red(),
        None => "UNKNOWN".yellow(),
    }
}

/// Jenkins ball colours: `blue` is success, `red` failure, `*_anime` building
fn colorize_ball(color: &str) -> ColoredString {
    let base = color.trim_end_matches("_anime");
    let label = match base {
        "blue" => "passing".green(),
        "red" => "failing".red(),
        "yellow" => "unstable".yellow(),
        "aborted" => "aborted".dimmed(),
        "disabled" => "disabled".dimmed(),
        "notbuilt" => "not built".dimmed(),
        "" => "folder".normal(),
        other => other.normal(),
    };
    if color.ends_with("_anime") {
        format!("{} (building)", label).normal()
    } else {
        label
    }
}
