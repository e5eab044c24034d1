use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub source: Option<String>,
}

/// One submitted run. Rows are inserted with a server-assigned `played_at`
/// and never updated or deleted afterwards.
#[derive(Debug, FromRow)]
pub struct ScoreRecord {
    pub id: i64,
    pub user_id: i64,
    pub wpm: f64,
    pub accuracy: f64,
    pub quote_id: Option<i64>,
    pub played_at: DateTime<Utc>,
}

/// A score row joined to its username and quote length, as fetched for the
/// leaderboard window. `quote_length` is null for quote-less runs and for
/// dangling quote references.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub user_id: i64,
    pub username: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub played_at: DateTime<Utc>,
    pub quote_length: Option<i32>,
}

/// Independent per-metric maxima over a range. The max WPM and max accuracy
/// need not come from the same run.
#[derive(Debug, FromRow)]
pub struct BestScores {
    pub max_wpm: Option<f64>,
    pub max_accuracy: Option<f64>,
}

#[derive(Debug, FromRow)]
pub struct AllTimeStats {
    pub total_games: i64,
    pub avg_wpm: Option<f64>,
    pub best_wpm: Option<f64>,
    pub avg_accuracy: Option<f64>,
}

/// A past run with its quote joined for the history view.
#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub wpm: f64,
    pub accuracy: f64,
    pub played_at: DateTime<Utc>,
    pub quote_text: Option<String>,
    pub quote_source: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct HistoryStats {
    pub total_games: i64,
    pub best_wpm: Option<f64>,
    pub avg_wpm: Option<f64>,
    pub days_played: i64,
}
