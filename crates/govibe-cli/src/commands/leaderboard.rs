use govibe_core::{leaderboard, Config};

use super::{client, print_json, runtime, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let config = Config::load()?;
    let api = client(&config)?;
    let participants = runtime()?.block_on(api.participants())?;
    let rows = leaderboard::rows(participants);

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No participants yet.");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:>3}. {:<30} {:>4} reps  {}",
            row.rank, row.name, row.repetitions, row.participated_at
        );
    }
    Ok(())
}
