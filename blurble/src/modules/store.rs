use crate::modules::models::tables::{
    AllTimeStats, BestScores, HistoryRow, HistoryStats, LeaderboardRow, Quote, ScoreRecord, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::Postgres, Pool};

type Result<T> = std::result::Result<T, sqlx::Error>;

const SCHEMA: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        username      VARCHAR(50) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS scores (
        id        BIGSERIAL PRIMARY KEY,
        user_id   BIGINT NOT NULL REFERENCES users(id),
        wpm       DOUBLE PRECISION NOT NULL,
        accuracy  DOUBLE PRECISION NOT NULL,
        quote_id  BIGINT,
        played_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS quotes (
        id     BIGSERIAL PRIMARY KEY,
        text   TEXT NOT NULL,
        source VARCHAR(255)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_scores_played_at ON scores(played_at)",
    "CREATE INDEX IF NOT EXISTS idx_scores_user_id ON scores(user_id)",
];

/// Creates the tables and indexes if they do not exist yet. Safe to run on
/// every startup.
pub async fn init_schema(pool: &Pool<Postgres>) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// The append-only score ledger. Records are inserted with a server-assigned
/// timestamp and never mutated; every read is a range scan or an aggregate
/// over `played_at`.
#[async_trait]
pub trait ScoreStore {
    /// Appends a run and returns the assigned record id.
    async fn insert(
        &self,
        user_id: i64,
        wpm: f64,
        accuracy: f64,
        quote_id: Option<i64>,
    ) -> Result<i64>;

    /// One user's runs with `played_at` in `[start, end]`, newest first.
    async fn query_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScoreRecord>>;

    /// Every user's runs in `[start, end]`, joined to usernames and quote
    /// lengths, unreduced. The leaderboard reduction happens in process.
    async fn leaderboard_rows(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardRow>>;

    /// Independent maxima of WPM and accuracy over the range. The two need
    /// not come from the same run.
    async fn aggregate_best(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BestScores>;

    async fn all_time_stats(&self, user_id: i64) -> Result<AllTimeStats>;

    /// The user's most recent runs with quote text joined, up to `limit`.
    async fn recent_with_quotes(&self, user_id: i64, limit: i64) -> Result<Vec<HistoryRow>>;

    async fn history_stats(&self, user_id: i64) -> Result<HistoryStats>;
}

pub struct PgScoreStore {
    pool: Pool<Postgres>,
}

impl PgScoreStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    async fn insert(
        &self,
        user_id: i64,
        wpm: f64,
        accuracy: f64,
        quote_id: Option<i64>,
    ) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "
            INSERT INTO scores (user_id, wpm, accuracy, quote_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(wpm)
        .bind(accuracy)
        .bind(quote_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn query_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScoreRecord>> {
        sqlx::query_as(
            "
            SELECT
                id,
                user_id,
                wpm,
                accuracy,
                quote_id,
                played_at
            FROM
                scores
            WHERE
                user_id = $1
                AND played_at >= $2
                AND played_at <= $3
            ORDER BY
                played_at DESC
            ",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
    }

    async fn leaderboard_rows(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardRow>> {
        sqlx::query_as(
            "
            SELECT
                scores.user_id AS user_id,
                users.username AS username,
                scores.wpm AS wpm,
                scores.accuracy AS accuracy,
                scores.played_at AS played_at,
                LENGTH(quotes.text) AS quote_length
            FROM
                scores
                JOIN users ON scores.user_id = users.id
                LEFT JOIN quotes ON scores.quote_id = quotes.id
            WHERE
                scores.played_at >= $1
                AND scores.played_at <= $2
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
    }

    async fn aggregate_best(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BestScores> {
        sqlx::query_as(
            "
            SELECT
                MAX(wpm) AS max_wpm,
                MAX(accuracy) AS max_accuracy
            FROM
                scores
            WHERE
                user_id = $1
                AND played_at >= $2
                AND played_at <= $3
            ",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
    }

    async fn all_time_stats(&self, user_id: i64) -> Result<AllTimeStats> {
        sqlx::query_as(
            "
            SELECT
                COUNT(*) AS total_games,
                AVG(wpm) AS avg_wpm,
                MAX(wpm) AS best_wpm,
                AVG(accuracy) AS avg_accuracy
            FROM
                scores
            WHERE
                user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn recent_with_quotes(&self, user_id: i64, limit: i64) -> Result<Vec<HistoryRow>> {
        sqlx::query_as(
            "
            SELECT
                scores.wpm AS wpm,
                scores.accuracy AS accuracy,
                scores.played_at AS played_at,
                quotes.text AS quote_text,
                quotes.source AS quote_source
            FROM
                scores
                LEFT JOIN quotes ON scores.quote_id = quotes.id
            WHERE
                scores.user_id = $1
            ORDER BY
                scores.played_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn history_stats(&self, user_id: i64) -> Result<HistoryStats> {
        sqlx::query_as(
            "
            SELECT
                COUNT(*) AS total_games,
                MAX(wpm) AS best_wpm,
                ROUND(AVG(wpm)) AS avg_wpm,
                COUNT(DISTINCT played_at::date) AS days_played
            FROM
                scores
            WHERE
                user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}

/// Identity collaborator: the score core only ever reads usernames back out
/// of this table through the leaderboard join.
pub struct PgUserStore {
    pool: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        sqlx::query_as(
            "
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as(
            "
            SELECT
                id,
                username,
                password_hash,
                created_at
            FROM
                users
            WHERE
                username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Quote collaborator: opaque (id, text, source) rows; the score core only
/// cares about character length.
pub struct PgQuoteStore {
    pool: Pool<Postgres>,
}

impl PgQuoteStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn random(&self) -> Result<Option<Quote>> {
        sqlx::query_as(
            "
            SELECT id, text, source FROM quotes ORDER BY RANDOM() LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// The quote at `offset` in stable id order. Drives the daily pick.
    pub async fn nth(&self, offset: i64) -> Result<Option<Quote>> {
        sqlx::query_as(
            "
            SELECT id, text, source FROM quotes ORDER BY id LIMIT 1 OFFSET $1
            ",
        )
        .bind(offset)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a quote unless the same text is already present. Returns
    /// whether a row was written.
    pub async fn insert_if_missing(&self, text: &str, source: &str) -> Result<bool> {
        let result = sqlx::query(
            "
            INSERT INTO quotes (text, source)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM quotes WHERE text = $1)
            ",
        )
        .bind(text)
        .bind(source)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
