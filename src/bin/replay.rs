//! Replay a scripted Quoridor game.
//!
//! Reads a YAML replay file, applies each action for the player whose turn
//! it is, and prints the final board along with the winner, if any.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quoridor_rules::config::{load_config, ScriptedAction};
use quoridor_rules::{QuoridorEngine, TablegameEngine, WallPiece};

#[derive(Parser, Debug)]
#[command(
    name = "quoridor-replay",
    about = "Replay a scripted Quoridor game and print the final board",
    version
)]
struct Args {
    /// YAML replay file
    #[arg(long)]
    script: PathBuf,

    /// Print the board after every action
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn apply_action(engine: &mut QuoridorEngine, action: &ScriptedAction) -> Result<()> {
    let current = engine.current_player();
    let current_name = engine.players()[current].name.clone();

    match action {
        ScriptedAction::Move { player, to } => {
            ensure!(
                *player == current_name,
                "{} tried to move during {}'s turn",
                player,
                current_name
            );
            engine.move_player(player, *to)?;
        }
        ScriptedAction::Wall { at, orientation } => {
            debug!(player = %current_name, %at, %orientation, "Placing wall");
            engine.add_wall(WallPiece::new(*at, *orientation))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args.script)?;

    let mut engine =
        QuoridorEngine::with_board_side(&config.quoridor.players, config.quoridor.board_side)
            .context("Failed to set up the game")?;
    info!(
        script = %args.script.display(),
        actions = config.actions.len(),
        "Replaying game"
    );

    for (turn, action) in config.actions.iter().enumerate() {
        apply_action(&mut engine, action)
            .with_context(|| format!("Action {} ({:?}) was rejected", turn + 1, action))?;

        if args.verbose {
            println!("After action {}:\n{}\n", turn + 1, engine);
        }
        if engine.is_game_over() {
            info!(turn = turn + 1, "Game finished");
            break;
        }
        engine.next_turn();
    }

    println!("{}", engine);
    match engine.find_winner() {
        Some(winner) => println!("\nWinner: {}", winner),
        None => println!("\nNo winner yet."),
    }
    Ok(())
}
