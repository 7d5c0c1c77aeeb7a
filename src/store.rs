//! Persistent store: every tournament day plus the annual ranking, written
//! as one JSON snapshot so readers never see a half-updated state.

use crate::logic::INITIAL_PLAYERS;
use crate::models::Tournament;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Annual ranking: canonical player name to accumulated points.
pub type AnnualRanking = BTreeMap<String, u32>;

/// The whole tracked state: one tournament per date, one annual ranking.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub tournaments: HashMap<NaiveDate, Tournament>,
    #[serde(default)]
    pub annual_points: AnnualRanking,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// On-disk document: the database plus the selected-date pointer. Missing
/// fields deserialize to defaults so older snapshots stay readable.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    tournaments: HashMap<NaiveDate, Tournament>,
    #[serde(default)]
    annual_points: AnnualRanking,
    #[serde(default = "today")]
    selected_date: NaiveDate,
}

/// Borrowed view of the same document, for writing without cloning.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    tournaments: &'a HashMap<NaiveDate, Tournament>,
    annual_points: &'a AnnualRanking,
    selected_date: NaiveDate,
}

/// One row of the annual ranking projection, sorted for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub points: u32,
}

/// Owns the database and its snapshot file. Constructed once per process and
/// handed to every operation; loading and saving are explicit calls.
pub struct Store {
    path: Option<PathBuf>,
    pub db: Database,
    pub selected_date: NaiveDate,
}

impl Store {
    /// Store with no backing file (tests, or running without persistence).
    pub fn in_memory() -> Self {
        let mut store = Self {
            path: None,
            db: Database::default(),
            selected_date: today(),
        };
        store.ensure_seed_players();
        store
    }

    /// Load the snapshot at `path`; a missing file means a fresh state.
    pub fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let snapshot = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<Snapshot>(&raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Snapshot {
                tournaments: HashMap::new(),
                annual_points: AnnualRanking::new(),
                selected_date: today(),
            },
            Err(e) => return Err(e),
        };
        let mut store = Self {
            path: Some(path),
            db: Database {
                tournaments: snapshot.tournaments,
                annual_points: snapshot.annual_points,
            },
            selected_date: snapshot.selected_date,
        };
        store.ensure_seed_players();
        Ok(store)
    }

    /// Write the whole state as one atomic snapshot: temp file, then rename.
    pub fn save(&self) -> io::Result<()> {
        let path = match &self.path {
            Some(p) => p,
            None => return Ok(()),
        };
        let json = serde_json::to_string_pretty(&SnapshotRef {
            tournaments: &self.db.tournaments,
            annual_points: &self.db.annual_points,
            selected_date: self.selected_date,
        })
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)
    }

    /// Get-or-create the tournament for `date`. Never fails; older records
    /// get their fixed-length vectors restored on access.
    pub fn tournament_mut(&mut self, date: NaiveDate) -> &mut Tournament {
        let t = self.db.tournaments.entry(date).or_insert_with(Tournament::new);
        t.backfill();
        t
    }

    /// The tournament for `date` together with a read view of the annual
    /// ranking; operations that resolve player names need both at once.
    pub fn tournament_and_ranking(&mut self, date: NaiveDate) -> (&mut Tournament, &AnnualRanking) {
        let Database {
            tournaments,
            annual_points,
        } = &mut self.db;
        let t = tournaments.entry(date).or_insert_with(Tournament::new);
        t.backfill();
        (t, annual_points)
    }

    /// Move the active-date pointer. Does not touch any tournament.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Fixed-roster players always have a ranking entry, even at zero points.
    pub fn ensure_seed_players(&mut self) {
        for p in INITIAL_PLAYERS {
            self.db.annual_points.entry((*p).to_string()).or_insert(0);
        }
    }

    /// Annual ranking sorted by points descending (ties in name order).
    pub fn ranking_entries(&self) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = self
            .db
            .annual_points
            .iter()
            .map(|(name, &points)| RankingEntry {
                name: name.clone(),
                points,
            })
            .collect();
        entries.sort_by(|a, b| b.points.cmp(&a.points));
        entries
    }
}
