//! Dilemma Binary
//!
//! Plays one match (or a round robin) and prints the result tables.
//!
//! Options: play [--config FILE] [--rounds N], tournament [--rounds N] [--self-play]

use anyhow::Context;
use clap::Parser;
use dilemma_engine::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Play a single match and print its tables")]
    Play {
        /// JSON match configuration; defaults to tit-for-tat against Joss
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Override the round budget
        #[arg(long)]
        rounds: Option<u32>,
    },
    #[command(about = "Round robin between one player of each strategy")]
    Tournament {
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        #[arg(long)]
        self_play: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    match Command::parse() {
        Command::Play { config, rounds } => play(config, rounds),
        Command::Tournament { rounds, self_play } => tournament(rounds, self_play),
    }
}

fn play(path: Option<std::path::PathBuf>, rounds: Option<u32>) -> anyhow::Result<()> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            MatchConfig::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => MatchConfig::demo(),
    };
    if let Some(rounds) = rounds {
        config.rounds = rounds;
    }

    let game = Match::from_config(&config)?;
    let report = MatchReport::from_match(&game)?;
    print!("{}", report);
    Ok(())
}

fn tournament(rounds: u32, self_play: bool) -> anyhow::Result<()> {
    let entrants = StrategyConfig::all_defaults()
        .iter()
        .map(|config| Player::from_config(config.name(), *config))
        .collect::<Result<Vec<_>, _>>()?;
    let config = TournamentConfig { rounds, payoffs: PayoffMatrix::default(), self_play };
    let result = run_round_robin(&entrants, &config)?;

    let width = result.standings.iter().map(|s| s.name.len()).max().unwrap_or(0);
    println!("Standings ({} rounds per match):", rounds);
    for (rank, standing) in result.standings.iter().enumerate() {
        println!(
            "{:>2}. {:<width$}  {:>8}  ({} matches)",
            rank + 1,
            standing.name,
            format_score(standing.total_score),
            standing.matches,
            width = width
        );
    }
    Ok(())
}
