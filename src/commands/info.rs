use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;
use serde::Serialize;

use crate::config::Config;
use crate::core::vault_info;

#[derive(Serialize)]
struct InfoReport {
    vault_path: String,
    exists: bool,
    is_directory: bool,
    note_count: usize,
    context_types: Vec<String>,
}

pub fn run(config_path: &Path, vault: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let vault_path = vault.unwrap_or_else(|| config.vault_path.clone());

    let info = vault_info(&vault_path);
    let report = InfoReport {
        vault_path: info.path.display().to_string(),
        exists: info.exists,
        is_directory: info.is_directory,
        note_count: info.note_count,
        context_types: config.contexts.keys().cloned().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_directory {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &InfoReport) {
    println!("{}", "Vault Info".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("   {:<12} {}", "Path", report.vault_path);
    if report.is_directory {
        println!("   {:<12} {}", "Status", "ok".green());
        println!("   {:<12} {}", "Notes", report.note_count);
    } else if report.exists {
        println!("   {:<12} {}", "Status", "not a directory".red());
    } else {
        println!("   {:<12} {}", "Status", "missing".red());
    }
    println!();
    println!("{}", "Context Types".cyan());
    println!("{}", "-".repeat(30));
    if report.context_types.is_empty() {
        println!("   {}", "(none configured)".dimmed());
    } else {
        for name in &report.context_types {
            println!("   {}", name);
        }
    }
}
