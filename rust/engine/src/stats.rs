use std::collections::BTreeMap;
use std::fs::{create_dir_all, read_to_string, write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::hand::HandRank;

/// Record format version written by this build.
pub const RECORD_VERSION: u32 = 1;

/// Bankroll a brand-new record starts with.
pub const DEFAULT_BANKROLL: u64 = 200;

fn default_version() -> u32 {
    RECORD_VERSION
}

fn default_bankroll() -> u64 {
    DEFAULT_BANKROLL
}

/// Current UTC timestamp in RFC3339, second precision.
pub fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Occurrence tally for one hand classification.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankTally {
    /// How many times the classification has been scored
    #[serde(default)]
    pub count: u64,
    /// Timestamp of the most recent occurrence (RFC3339)
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// The whole persisted ledger for one player. Every field carries a serde
/// default so records written by older builds load without errors;
/// [`migrate`](StatsRecord::migrate) tops up whatever defaulting cannot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Format version of the record
    #[serde(default = "default_version")]
    pub version: u32,
    /// Times the game has been launched
    #[serde(default)]
    pub launches: u64,
    /// Hands resolved over the record's lifetime
    #[serde(default)]
    pub hands_played: u64,
    /// Hands resolved since the bankroll last hit zero (the current streak)
    #[serde(default)]
    pub hands_since_bust: u64,
    /// Longest bust-free streak ever recorded
    #[serde(default)]
    pub longest_streak: u64,
    /// Times the bankroll hit zero
    #[serde(default)]
    pub busts: u64,
    /// Lifetime chips won
    #[serde(default)]
    pub total_won: u64,
    /// Lifetime chips lost
    #[serde(default)]
    pub total_lost: u64,
    /// Current bankroll; the single source of truth for it
    #[serde(default = "default_bankroll")]
    pub bankroll: u64,
    /// Killer hands resolved during the current streak
    #[serde(default)]
    pub killer_count: u32,
    /// Per-classification tallies, always holding all twelve ranks
    #[serde(default)]
    pub rank_totals: BTreeMap<HandRank, RankTally>,
    /// Largest single-hand win (net, killer bonus included)
    #[serde(default)]
    pub biggest_win: u64,
    /// When the record win happened (RFC3339)
    #[serde(default)]
    pub biggest_win_at: Option<String>,
    /// Largest single-hand loss (wager plus killer penalty)
    #[serde(default)]
    pub biggest_loss: u64,
    /// When the record loss happened (RFC3339)
    #[serde(default)]
    pub biggest_loss_at: Option<String>,
    /// When the bankroll last hit zero (RFC3339)
    #[serde(default)]
    pub last_bust_at: Option<String>,
    /// When a hand was last resolved or a session closed (RFC3339)
    #[serde(default)]
    pub last_played_at: Option<String>,
}

impl Default for StatsRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            launches: 0,
            hands_played: 0,
            hands_since_bust: 0,
            longest_streak: 0,
            busts: 0,
            total_won: 0,
            total_lost: 0,
            bankroll: DEFAULT_BANKROLL,
            killer_count: 0,
            rank_totals: full_rank_table(),
            biggest_win: 0,
            biggest_win_at: None,
            biggest_loss: 0,
            biggest_loss_at: None,
            last_bust_at: None,
            last_played_at: None,
        }
    }
}

/// What [`StatsRecord::register_launch`] did besides counting the launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    /// 1-based launch number, this launch included
    pub launch_number: u64,
    /// True when an empty bankroll was settled as a bust and refilled
    pub refilled: bool,
}

impl StatsRecord {
    /// Runs once after load: fills in every classification the stored rank
    /// table is missing and stamps the current format version, so the rest
    /// of the code never needs per-access existence checks.
    pub fn migrate(&mut self) {
        for &rank in HandRank::ALL.iter() {
            self.rank_totals.entry(rank).or_default();
        }
        self.version = RECORD_VERSION;
    }

    /// Counts a launch. A bankroll already at zero means the previous run
    /// ended broke without settling the bust (a crash, or a record from an
    /// older build): settle it now and grant a fresh stake.
    pub fn register_launch(&mut self, cfg: &GameConfig) -> LaunchReport {
        self.launches += 1;
        let refilled = self.bankroll == 0;
        if refilled {
            self.busts += 1;
            self.hands_since_bust = 0;
            self.killer_count = 0;
            self.bankroll = cfg.base_stake;
            self.last_bust_at = Some(now_ts());
        }
        LaunchReport {
            launch_number: self.launches,
            refilled,
        }
    }
}

fn full_rank_table() -> BTreeMap<HandRank, RankTally> {
    HandRank::ALL
        .iter()
        .map(|&rank| (rank, RankTally::default()))
        .collect()
}

/// Where resolved hands get checkpointed. The engine only ever saves;
/// loading happens once at startup through the concrete store.
pub trait StatsStore {
    fn save(&mut self, record: &StatsRecord) -> std::io::Result<()>;
}

/// Statistics persisted as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and migrates the record. A missing, unreadable or corrupt file
    /// falls back to a fresh record rather than failing the launch.
    pub fn load(&self) -> StatsRecord {
        let mut record: StatsRecord = read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        record.migrate();
        record
    }
}

impl StatsStore for JsonFileStore {
    fn save(&mut self, record: &StatsRecord) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(record).map_err(std::io::Error::other)?;
        write(&self.path, body)
    }
}

/// In-memory store for tests and dry runs. Can be told to reject every save
/// to exercise the best-effort persistence path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Vec<StatsRecord>,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            saved: Vec::new(),
            fail_saves: true,
        }
    }

    pub fn last(&self) -> Option<&StatsRecord> {
        self.saved.last()
    }
}

impl StatsStore for MemoryStore {
    fn save(&mut self, record: &StatsRecord) -> std::io::Result<()> {
        if self.fail_saves {
            return Err(std::io::Error::other("saving disabled"));
        }
        self.saved.push(record.clone());
        Ok(())
    }
}
