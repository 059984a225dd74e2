//! Terminal rendering of debates, turns and verdicts

use colored::Colorize;

use symposium_debate::{DebateOrchestrator, Phase, Turn, Verdict, VerdictRecord};

pub fn print_header(debate: &DebateOrchestrator) {
    let config = debate.config();
    println!("{}", "Symposium Debate".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!(
        "  {} {}",
        "Type:".dimmed(),
        config.debate_type.to_string().green()
    );
    if config.opposition_mode {
        println!("  {} {}", "Mode:".dimmed(), "opposition".green());
    }
    for agent in debate.agents() {
        let stance = debate.stance_of(&agent.name).unwrap_or_default();
        println!(
            "  {} {} ({}/{}, {})",
            "•".cyan(),
            agent.name.bold(),
            agent.provider_name,
            agent.model,
            stance
        );
    }
    println!(
        "  {} {} ({}/{})",
        "Judge:".dimmed(),
        debate.judge().name().bold(),
        config.judge_cfg.provider_name,
        config.judge_cfg.model
    );
    println!();
}

pub fn print_status(debate: &DebateOrchestrator) {
    let status = match debate.stop_reason() {
        Some(reason) if debate.is_stopped() => format!("stopped ({})", reason).red().to_string(),
        _ if debate.is_stopped() => "stopped".red().to_string(),
        _ => "running".green().to_string(),
    };
    println!(
        "{} next phase {}, round {}, {}",
        "Status:".bold(),
        debate.phase().to_string().yellow(),
        debate.round(),
        status
    );
}

/// Print every agent's latest turn for a phase that just completed
pub fn print_phase(debate: &DebateOrchestrator, phase: Phase, round: u32) {
    println!(
        "{}",
        format!("── {} phase, round {} ──", phase, round).bold().magenta()
    );
    for agent in debate.agents() {
        if let Some(turn) = agent.latest() {
            print_turn(&agent.name, turn);
        }
    }
}

pub fn print_turn(name: &str, turn: &Turn) {
    println!("{} {}", format!("[{}]", turn.phase).dimmed(), name.bold());
    if turn.content.trim().is_empty() {
        println!("  {}", "(empty reply)".dimmed());
    } else {
        for line in turn.content.lines() {
            println!("  {}", line);
        }
    }
    println!();
}

pub fn print_transcripts(debate: &DebateOrchestrator) {
    for agent in debate.agents() {
        let heading = format!("{} ({} turns)", agent.name, agent.transcript().len());
        println!("{}", heading.bold().cyan());
        for turn in agent.transcript() {
            print_turn(&agent.name, turn);
        }
    }
}

pub fn print_verdict(record: &VerdictRecord) {
    println!("{}", format!("Verdict for round {}", record.round).bold().yellow());

    let verdict = &record.verdict;
    match verdict {
        Verdict::Consensus(v) => {
            println!(
                "  {} {} (mean {:.2})",
                "Agreement:".dimmed(),
                v.agreement,
                v.mean_agreement
            );
        }
        Verdict::Fallback { .. } => {
            println!("  {}", "Judge reply was not valid JSON".yellow());
        }
        _ => {
            if let Some(leader) = verdict.leader() {
                println!("  {} {}", "Leader:".dimmed(), leader.green().bold());
            }
            if let Some(scores) = verdict.scores() {
                for (name, score) in scores {
                    println!("  {} {:<16} {:.2}", "•".cyan(), name, score);
                }
            }
        }
    }

    let points: &[String] = match verdict {
        Verdict::Binary(v) => &v.key_facts,
        Verdict::NonBinary(v) => &v.key_insights,
        _ => &[],
    };
    for point in points {
        println!("  {} {}", "-".dimmed(), point);
    }
    if let Some(explanation) = verdict.explanation() {
        println!("  {} {}", "Why:".dimmed(), explanation);
    }
    println!();
}
