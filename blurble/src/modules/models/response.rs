use crate::modules::models::tables::{
    AllTimeStats, BestScores, HistoryRow, HistoryStats, Quote, ScoreRecord, User,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    pub id: i64,
    pub wpm: f64,
    pub accuracy: f64,
    pub message: String,
}

/// One ranked leaderboard line: a user's best run of the day. `time` is the
/// run duration in seconds derived from the quote length, omitted for
/// quote-less runs.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub played_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub wpm: f64,
    pub accuracy: f64,
    pub played_at: DateTime<Utc>,
}

impl From<ScoreRecord> for ScoreSummary {
    fn from(record: ScoreRecord) -> Self {
        Self {
            wpm: record.wpm,
            accuracy: record.accuracy,
            played_at: record.played_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestToday {
    pub max_wpm: Option<f64>,
    pub max_accuracy: Option<f64>,
}

impl From<BestScores> for BestToday {
    fn from(best: BestScores) -> Self {
        Self {
            max_wpm: best.max_wpm,
            max_accuracy: best.max_accuracy,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyScoresResponse {
    pub scores: Vec<ScoreSummary>,
    pub best: BestToday,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyStatsResponse {
    pub total_games: i64,
    pub avg_wpm: Option<f64>,
    pub best_wpm: Option<f64>,
    pub avg_accuracy: Option<f64>,
}

impl From<AllTimeStats> for MyStatsResponse {
    fn from(stats: AllTimeStats) -> Self {
        Self {
            total_games: stats.total_games,
            avg_wpm: stats.avg_wpm,
            best_wpm: stats.best_wpm,
            avg_accuracy: stats.avg_accuracy,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub wpm: f64,
    pub accuracy: f64,
    pub played_at: DateTime<Utc>,
    pub quote_text: Option<String>,
    pub quote_source: Option<String>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            wpm: row.wpm,
            accuracy: row.accuracy,
            played_at: row.played_at,
            quote_text: row.quote_text,
            quote_source: row.quote_source,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatsResponse {
    pub total_games: i64,
    pub best_wpm: Option<f64>,
    pub avg_wpm: Option<f64>,
    pub days_played: i64,
}

impl From<HistoryStats> for HistoryStatsResponse {
    fn from(stats: HistoryStats) -> Self {
        Self {
            total_games: stats.total_games,
            best_wpm: stats.best_wpm,
            avg_wpm: stats.avg_wpm,
            days_played: stats.days_played,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub scores: Vec<HistoryEntry>,
    pub stats: HistoryStatsResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub text: String,
    pub source: Option<String>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
            source: quote.source,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
