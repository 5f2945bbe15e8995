/*
 * Darts Simulation
 *
 * Darts wander a wrap-around plane, fleeing darts that come too close,
 * answering the headings of nearby darts and steering towards or away from
 * checkpoints placed with the mouse:
 * - Left click: attracting checkpoint
 * - Right click: repelling checkpoint
 *
 * Set RUST_LOG=debug for per-tick statistics.
 */

use anyhow::Result;
use clap::Parser;
use darts::config::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.resolve()?;
    darts::app::run(config);
    Ok(())
}
