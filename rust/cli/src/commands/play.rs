//! # Play Command
//!
//! The interactive machine loop. Loads the persistent record, registers the
//! launch, and runs hands through wager, deal, hold and resolve until the
//! player leaves the table or the bankroll hits zero.
//!
//! Two prompts block on stdin: the wager prompt (which also accepts the
//! percentage shortcuts and quit) and the hold prompt. Invalid lines
//! reprompt with an error instead of ending the session. The record is
//! checkpointed after every resolved hand; a failed checkpoint prints a
//! warning and play continues in memory.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand_numbered, format_hand_with_holds};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_hold_input, parse_wager_input, HoldInput, WagerInput};
use pokermachine_engine::killer::KillerOutcome;
use pokermachine_engine::payout;
use pokermachine_engine::session::{AcceptedWager, HandOutcome, HoldMask, Session};
use pokermachine_engine::stats::JsonFileStore;
use std::io::{BufRead, Write};

use super::stats::render_report;

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - Seed for the shoe shuffle; the configured seed, then a random
///   one, when omitted
/// * `data` - Statistics file to load and checkpoint; the configured
///   `data_file` when omitted
/// * `out` - Output stream for prompts and results
/// * `err` - Output stream for errors and warnings
/// * `stdin` - Input stream for the prompts (supports both TTY and piped stdin)
///
/// # Returns
///
/// `Ok(())` when the sitting ends normally, by cashing out or by busting.
/// An `Err` means the machine itself failed (broken configuration, an
/// exhausted shoe) and maps to exit code 2.
pub fn handle_play_command(
    seed: Option<u64>,
    data: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let data_file = data.unwrap_or_else(|| cfg.data_file.clone());
    let game_cfg = cfg.to_game_config();

    let store = JsonFileStore::new(&data_file);
    let mut record = store.load();
    let launch = record.register_launch(&game_cfg);

    writeln!(out, "pokermachine (seed {})", seed)?;
    writeln!(
        out,
        "Record: {} (launch #{})",
        store.path().display(),
        launch.launch_number
    )?;
    if launch.refilled {
        writeln!(
            out,
            "The last sitting ended broke; the bankroll is restored to {}.",
            game_cfg.base_stake
        )?;
    }

    let mut session = Session::new(game_cfg, record, Box::new(store), Some(seed))?;

    loop {
        let start = session.begin_hand()?;

        writeln!(out)?;
        writeln!(
            out,
            "Hand {} (streak hand {})",
            start.session_hand, start.streak_hand
        )?;
        if start.reshuffled {
            writeln!(out, "The shoe ran low and was rebuilt.")?;
        }
        if let Some(k) = start.killer {
            writeln!(
                out,
                "KILLER HAND #{}: a win pays {}x net, a loss forfeits another {}% of the bankroll.",
                k.ordinal,
                session.config().killer_win_multiplier,
                k.penalty_percent
            )?;
        }
        writeln!(
            out,
            "Bankroll: {} (table minimum {})",
            start.bankroll, start.min_wager
        )?;

        let Some(accepted) = prompt_wager(&mut session, out, err, stdin)? else {
            let summary = session.finish()?;
            writeln!(out)?;
            writeln!(
                out,
                "Cashing out after {} hand(s): bankroll {} (sat down with {}).",
                summary.hands_played, summary.final_bankroll, summary.starting_bankroll
            )?;
            if let Some(w) = &summary.persist_warning {
                ui::display_warning(err, &format!("statistics were not saved: {}", w))?;
            }
            writeln!(out)?;
            render_report(out, session.record())?;
            return Ok(());
        };

        if let Some(from) = accepted.corrected_from {
            writeln!(
                out,
                "Raised to the table minimum of {} (asked for {}).",
                accepted.amount, from
            )?;
        }
        writeln!(
            out,
            "Wagered {}; bankroll {}.",
            accepted.amount,
            session.bankroll()
        )?;

        let dealt = session.deal()?;
        writeln!(out, "Dealt: {}", format_hand_numbered(&dealt))?;
        session.offer_draw()?;

        let hold = prompt_hold(out, err, stdin)?;
        let outcome = session.resolve(hold)?;
        report_outcome(&outcome, hold, out, err)?;

        if outcome.busted {
            writeln!(out)?;
            writeln!(out, "BUST. The bankroll hit zero and the streak is over.")?;
            writeln!(
                out,
                "A fresh stake of {} chips is waiting for the next sitting.",
                outcome.bankroll
            )?;
            writeln!(out)?;
            render_report(out, session.record())?;
            return Ok(());
        }
    }
}

/// Run the wager prompt until a wager is booked or the player leaves.
/// Returns `None` when the player quits, explicitly or via EOF.
fn prompt_wager(
    session: &mut Session,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<AcceptedWager>, CliError> {
    loop {
        write!(out, "Wager> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(None);
        };
        match parse_wager_input(&line) {
            WagerInput::Quit => return Ok(None),
            WagerInput::Help => print_wager_help(out)?,
            WagerInput::Invalid(msg) => ui::write_error(err, &msg)?,
            WagerInput::Request(request) => match session.place_wager(request) {
                Ok(accepted) => return Ok(Some(accepted)),
                Err(e) => ui::write_error(err, &e.to_string())?,
            },
        }
    }
}

fn print_wager_help(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Wager entry:")?;
    writeln!(out, "  <number>        chips to put on the hand")?;
    writeln!(out, "  -  ,  .  ;  +   10% 25% 50% 75% 100% of the bankroll")?;
    writeln!(out, "  m or min        the table minimum")?;
    writeln!(out, "  q or empty      leave the table")?;
    Ok(())
}

/// Run the hold prompt until a selection parses. EOF settles the hand with
/// every card replaced.
fn prompt_hold(
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HoldMask, CliError> {
    loop {
        write!(out, "Hold (1-5, empty replaces all)> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(HoldMask::NONE);
        };
        match parse_hold_input(&line) {
            HoldInput::Keep(mask) => return Ok(mask),
            HoldInput::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

fn report_outcome(
    outcome: &HandOutcome,
    hold: HoldMask,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if outcome.replaced > 0 {
        writeln!(out, "Replaced {} card(s).", outcome.replaced)?;
    }
    writeln!(
        out,
        "Final: {}",
        format_hand_with_holds(&outcome.final_hand, hold)
    )?;

    if let Some(rank) = outcome.rank {
        use std::cmp::Ordering;
        match outcome.net.cmp(&0) {
            Ordering::Greater => writeln!(
                out,
                "{} pays {}:1, won {} chips.",
                rank.name(),
                payout::multiplier(rank),
                outcome.net
            )?,
            Ordering::Equal => writeln!(out, "{}: the wager comes back.", rank.name())?,
            Ordering::Less => writeln!(out, "{}: the wager is forfeited.", rank.name())?,
        }
    }
    match outcome.killer {
        Some(KillerOutcome::Bonus { extra }) => {
            writeln!(out, "Killer bonus: {} extra chips on top.", extra)?;
        }
        Some(KillerOutcome::Penalty { percent, amount }) => {
            writeln!(
                out,
                "Killer penalty: {}% of the bankroll, {} more chips gone.",
                percent, amount
            )?;
        }
        None => {}
    }
    if outcome.new_biggest_win {
        writeln!(out, "New biggest win: {} chips.", outcome.winnings)?;
    }
    if outcome.new_biggest_loss {
        writeln!(out, "New biggest loss: {} chips.", outcome.losses)?;
    }
    writeln!(out, "Bankroll: {}", outcome.bankroll)?;
    if let Some(w) = &outcome.persist_warning {
        ui::display_warning(err, &format!("statistics were not saved: {}", w))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokermachine_engine::stats::StatsRecord;
    use serial_test::serial;
    use std::io::Cursor;
    use std::path::Path;

    fn run_play(script: &str, data: &Path, seed: u64) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(script.as_bytes().to_vec());
        handle_play_command(
            Some(seed),
            Some(data.display().to_string()),
            &mut out,
            &mut err,
            &mut stdin,
        )
        .expect("play session should complete");
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn read_record(path: &Path) -> StatsRecord {
        JsonFileStore::new(path).load()
    }

    #[test]
    #[serial]
    fn test_quitting_immediately_plays_no_hands() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        let (out, _err) = run_play("q\n", &data, 42);

        assert!(out.contains("launch #1"));
        assert!(out.contains("Cashing out after 0 hand(s)"));
        assert!(out.contains("Launches: 1"), "exit report should render");

        let record = read_record(&data);
        assert_eq!(record.launches, 1);
        assert_eq!(record.hands_played, 0);
        assert_eq!(record.bankroll, 200);
    }

    #[test]
    #[serial]
    fn test_one_hand_session_checkpoints_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        // Wager 10, replace every card, then leave
        let (out, _err) = run_play("10\n\nq\n", &data, 42);

        assert!(out.contains("Hand 1 (streak hand 1)"));
        assert!(out.contains("Dealt:"));
        assert!(out.contains("Final:"));
        assert!(out.contains("Cashing out after 1 hand(s)"));

        let record = read_record(&data);
        assert_eq!(record.hands_played, 1);
        assert_eq!(record.launches, 1);
        assert!(record.bankroll > 0, "a 10-chip wager cannot bust 200");
    }

    #[test]
    #[serial]
    fn test_invalid_lines_reprompt_instead_of_ending() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        // Gibberish, then an oversized wager, then a valid one; the hold
        // prompt gets gibberish and then EOF (which replaces everything)
        let (_out, err) = run_play("xyz\n5000\n7\nq\n", &data, 42);

        assert!(err.contains("Unrecognized wager"));
        assert!(err.contains("exceeds bankroll 200"));
        assert!(err.contains("Invalid position"));

        let record = read_record(&data);
        assert_eq!(record.hands_played, 1);
    }

    #[test]
    #[serial]
    fn test_wager_help_lists_the_shortcuts() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        let (out, _err) = run_play("h\nq\n", &data, 42);

        assert!(out.contains("10% 25% 50% 75% 100%"));
        assert!(out.contains("m or min"));

        let record = read_record(&data);
        assert_eq!(record.hands_played, 0);
    }

    #[test]
    #[serial]
    fn test_below_minimum_wagers_are_raised() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        // Minimum on a 200 bankroll is 6
        let (out, _err) = run_play("2\n\nq\n", &data, 42);

        assert!(out.contains("Raised to the table minimum of 6 (asked for 2)."));

        let record = read_record(&data);
        assert_eq!(record.hands_played, 1);
    }

    #[test]
    #[serial]
    fn test_all_in_losses_end_in_a_bust() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        // Wager the whole bankroll and replace every card until the
        // machine takes it all; one lost all-in hand is a bust
        let script = "+\n\n".repeat(400);
        let (out, _err) = run_play(&script, &data, 7);

        assert!(out.contains("BUST."), "400 all-in hands should bust");
        let record = read_record(&data);
        assert_eq!(record.busts, 1);
        assert_eq!(record.bankroll, 200, "bust refills the base stake");
        assert_eq!(record.hands_since_bust, 0);
        assert!(record.hands_played >= 1);
    }

    #[test]
    #[serial]
    fn test_killer_preview_abandoned_by_quitting_costs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        // Streak hand 25 is next: the banner must show, but quitting at
        // the wager prompt must not count the killer hand
        let seeded = StatsRecord {
            hands_since_bust: 24,
            ..StatsRecord::default()
        };
        std::fs::write(&data, serde_json::to_string_pretty(&seeded).unwrap()).unwrap();

        let (out, _err) = run_play("q\n", &data, 42);

        assert!(out.contains("KILLER HAND #1"));
        let record = read_record(&data);
        assert_eq!(record.killer_count, 0);
        assert_eq!(record.hands_since_bust, 24);
    }

    #[test]
    #[serial]
    fn test_killer_hand_resolution_commits_the_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("stats.json");

        let seeded = StatsRecord {
            hands_since_bust: 24,
            ..StatsRecord::default()
        };
        std::fs::write(&data, serde_json::to_string_pretty(&seeded).unwrap()).unwrap();

        // Play the killer hand holding everything, then leave
        let (out, _err) = run_play("6\n12345\nq\n", &data, 42);

        assert!(out.contains("KILLER HAND #1"));
        let record = read_record(&data);
        assert_eq!(record.killer_count, 1);
        assert_eq!(record.hands_since_bust, 25);
    }

    #[test]
    #[serial]
    fn test_persistence_failures_warn_and_play_continues() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the store needs a directory makes every
        // checkpoint fail
        std::fs::write(dir.path().join("blocker"), b"x").unwrap();
        let data = dir.path().join("blocker").join("stats.json");

        let (out, err) = run_play("10\n\nq\n", &data, 42);

        assert!(err.contains("WARNING"));
        assert!(err.contains("statistics were not saved"));
        assert!(out.contains("Cashing out after 1 hand(s)"));
    }
}
