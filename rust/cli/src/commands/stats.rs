//! Statistics command handler.
//!
//! This module renders the persistent ledger: lifetime totals, streaks,
//! records and the per-classification tallies. The same report is printed
//! when a play session ends, so the formatting lives here and the play
//! command borrows it.

use crate::config;
use crate::error::CliError;
use pokermachine_engine::hand::HandRank;
use pokermachine_engine::payout;
use pokermachine_engine::stats::{JsonFileStore, StatsRecord};
use std::io::Write;

/// Handle the stats command.
///
/// Loads the record from the given path (or the configured one) and prints
/// the report. A missing or unreadable file renders as a fresh record; the
/// command never fails over the file's absence.
///
/// # Arguments
///
/// * `data` - Statistics file to read; the configured `data_file` when omitted
/// * `out` - Output stream for the report
pub fn handle_stats_command(data: Option<String>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let store = JsonFileStore::new(data.unwrap_or(cfg.data_file));
    let record = store.load();

    writeln!(out, "Record: {}", store.path().display())?;
    render_report(out, &record)
}

/// Print the full ledger report: totals, streaks, records, and the tally
/// for every classification in payout order, best first.
pub fn render_report(out: &mut dyn Write, record: &StatsRecord) -> Result<(), CliError> {
    writeln!(out, "Launches: {}", record.launches)?;
    writeln!(out, "Hands played: {}", record.hands_played)?;
    writeln!(
        out,
        "Current streak: {} hand(s), longest {}",
        record.hands_since_bust, record.longest_streak
    )?;
    writeln!(out, "Busts: {}", record.busts)?;
    writeln!(out, "Bankroll: {}", record.bankroll)?;
    writeln!(
        out,
        "Total won: {}, total lost: {}",
        record.total_won, record.total_lost
    )?;
    writeln!(
        out,
        "Biggest win: {} ({})",
        record.biggest_win,
        fmt_ts(&record.biggest_win_at)
    )?;
    writeln!(
        out,
        "Biggest loss: {} ({})",
        record.biggest_loss,
        fmt_ts(&record.biggest_loss_at)
    )?;
    writeln!(out, "Last bust: {}", fmt_ts(&record.last_bust_at))?;
    writeln!(out, "Last played: {}", fmt_ts(&record.last_played_at))?;
    writeln!(
        out,
        "Killer hands this streak: {}",
        record.killer_count
    )?;
    writeln!(out, "Hands:")?;
    for &rank in HandRank::ALL.iter().rev() {
        let tally = record.rank_totals.get(&rank).cloned().unwrap_or_default();
        writeln!(
            out,
            "  {:<22} {:>4}:1 {:>8}  last {}",
            rank.name(),
            payout::multiplier(rank),
            tally.count,
            fmt_ts(&tally.last_seen)
        )?;
    }
    Ok(())
}

fn fmt_ts(ts: &Option<String>) -> &str {
    ts.as_deref().unwrap_or("never")
}
