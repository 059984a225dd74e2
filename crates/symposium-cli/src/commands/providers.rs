//! Providers command - List completion backends
//!
//! Usage:
//! ```bash
//! symposium providers
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use symposium_llm::{LlmConfig, ProviderKind};

/// Arguments for the providers command
#[derive(Args)]
pub struct ProvidersArgs;

/// Run the providers command
pub fn run(_args: ProvidersArgs) -> Result<()> {
    let config = LlmConfig::from_env();

    println!("{}", "Completion Providers".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    for kind in ProviderKind::ALL {
        let status = if config.is_configured(kind.as_str()) {
            "configured".green()
        } else {
            "missing API key".red()
        };
        let note = match kind {
            ProviderKind::Local => format!(" ({})", config.ollama_url),
            ProviderKind::Mock => " (testing)".to_string(),
            _ => String::new(),
        };
        println!("  {} {:<10} {}{}", "•".cyan(), kind.as_str().bold(), status, note.dimmed());
    }
    println!();

    println!("{}", "Configuration:".bold());
    println!(
        "  {} {}s (local providers get twice that)",
        "Timeout:".dimmed(),
        config.timeout_secs
    );
    if let Err(e) = config.validate() {
        crate::print_warning(&e.to_string());
    }
    println!();

    Ok(())
}
