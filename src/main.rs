mod commands;
mod config;
mod core;
mod error;
#[cfg(feature = "mcp")]
mod mcp;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "construe")]
#[command(about = "Load personal context from an Obsidian vault by filtering note frontmatter", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        default_value = "config.yaml",
        help = "Configuration file path"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch notes by named context type or explicit filters
    Fetch {
        #[arg(long, help = "Named context type from the configuration")]
        context: Option<String>,
        #[arg(
            short = 'p',
            long = "property",
            value_name = "KEY=VALUE",
            conflicts_with = "context",
            help = "Require a frontmatter property (repeatable)"
        )]
        property: Vec<String>,
        #[arg(
            short = 't',
            long = "tag",
            conflicts_with = "context",
            help = "Require a tag (repeatable)"
        )]
        tag: Vec<String>,
        #[arg(
            long,
            conflicts_with = "context",
            help = "Require all tags instead of any"
        )]
        all_tags: bool,
        #[arg(long, help = "Vault path (overrides configuration)")]
        vault: Option<PathBuf>,
        #[arg(long, help = "List matching paths without content")]
        dry_run: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show vault statistics and configured context types
    Info {
        #[arg(long, help = "Vault path (overrides configuration)")]
        vault: Option<PathBuf>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Start MCP server for Claude integration
    #[cfg(feature = "mcp")]
    Mcp {
        #[arg(long, help = "Show Claude configuration instructions")]
        install: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            context,
            property,
            tag,
            all_tags,
            vault,
            dry_run,
            json,
        } => commands::fetch::run(
            &cli.config,
            context,
            property,
            tag,
            all_tags,
            vault,
            dry_run,
            json,
        ),
        Commands::Info { vault, json } => commands::info::run(&cli.config, vault, json),

        #[cfg(feature = "mcp")]
        Commands::Mcp { install } => {
            if install {
                print_mcp_install_instructions();
                Ok(())
            } else {
                run_mcp_server(&cli.config)
            }
        }
    }
}

#[cfg(feature = "mcp")]
fn run_mcp_server(config_path: &std::path::Path) -> anyhow::Result<()> {
    let config = config::Config::load(config_path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(mcp::run_mcp_server(config))
}

#[cfg(feature = "mcp")]
fn print_mcp_install_instructions() {
    use colored::Colorize;

    let binary_path = std::env::current_exe()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| "construe".to_string());

    let config_path = std::env::current_dir()
        .map(|p| p.join("config.yaml").to_string_lossy().to_string())
        .unwrap_or_else(|_| "/path/to/config.yaml".to_string());

    println!("{}", "MCP Server Installation Guide".bold().cyan());
    println!();
    println!("Add the following to your Claude configuration:");
    println!();
    println!("{}", "For Claude Desktop (~/.config/claude/claude_desktop_config.json):".dimmed());
    println!(r#"{{
  "mcpServers": {{
    "construe": {{
      "command": "{}",
      "args": ["--config", "{}", "mcp"]
    }}
  }}
}}"#, binary_path, config_path);
    println!();
    println!("{}", "For Claude Code (~/.claude/settings.json):".dimmed());
    println!(r#"{{
  "mcpServers": {{
    "construe": {{
      "command": "{}",
      "args": ["--config", "{}", "mcp"]
    }}
  }}
}}"#, binary_path, config_path);
    println!();
    println!("{}", "Available tools:".bold());
    println!("  • {} - Load notes for a named context type", "fetch_context".green());
    println!("  • {} - Load notes matching property/tag filters", "fetch_matching_files".green());
    println!("  • {} - Vault statistics and configured contexts", "vault_info".green());
}
