use crate::error::{ApiError, ApiResult};
use crate::modules::{
    auth::AuthenticatedUser,
    leaderboard::{LeaderboardAggregator, DEFAULT_LEADERBOARD_SIZE},
    models::{
        request::SubmitScoreRequest,
        response::{
            BestToday, HistoryResponse, LeaderboardEntry, MyScoresResponse, MyStatsResponse,
            ScoreSummary, SubmitScoreResponse,
        },
    },
    store::{PgScoreStore, ScoreStore},
};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, Extension, FromRequest},
    http::Request,
    Json,
};
use blurble_libs::window;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

const HISTORY_LIMIT: i64 = 100;

type SharedAggregator = Arc<LeaderboardAggregator<PgScoreStore>>;

/// A score claim that made it past the submission gate: well-formed JSON
/// with numeric fields, and both values in their domain ranges. Checked in
/// that order, before anything touches the store.
pub struct ValidatedScore(pub SubmitScoreRequest);

#[async_trait]
impl<S, B> FromRequest<S, B> for ValidatedScore
where
    B: Send + 'static,
    S: Send + Sync,
    Json<SubmitScoreRequest>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(claim) = Json::<SubmitScoreRequest>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::error!("Parsing error: {}", rejection);
                ApiError::InvalidScoreData
            })?;

        claim.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            ApiError::ScoreOutOfRange
        })?;

        Ok(ValidatedScore(claim))
    }
}

pub async fn submit(
    user: AuthenticatedUser,
    Extension(store): Extension<Arc<PgScoreStore>>,
    ValidatedScore(claim): ValidatedScore,
) -> ApiResult<Json<SubmitScoreResponse>> {
    let id = store
        .insert(user.id, claim.wpm, claim.accuracy, claim.quote_id)
        .await?;

    tracing::info!(
        target: "scorelog",
        "user_id={} wpm={} accuracy={} quote_id={:?}",
        user.id, claim.wpm, claim.accuracy, claim.quote_id
    );

    Ok(Json(SubmitScoreResponse {
        id,
        wpm: claim.wpm,
        accuracy: claim.accuracy,
        message: String::from("Score submitted successfully"),
    }))
}

pub async fn leaderboard(
    Extension(aggregator): Extension<SharedAggregator>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let entries = aggregator
        .top_n(Utc::now(), DEFAULT_LEADERBOARD_SIZE)
        .await?;
    Ok(Json(entries))
}

pub async fn my_scores(
    user: AuthenticatedUser,
    Extension(store): Extension<Arc<PgScoreStore>>,
) -> ApiResult<Json<MyScoresResponse>> {
    let window = window::day_window_at(Utc::now());

    let scores = store
        .query_range(user.id, window.start, window.end)
        .await?
        .into_iter()
        .map(ScoreSummary::from)
        .collect();
    let best = store
        .aggregate_best(user.id, window.start, window.end)
        .await?;

    Ok(Json(MyScoresResponse {
        scores,
        best: BestToday::from(best),
    }))
}

pub async fn my_stats(
    user: AuthenticatedUser,
    Extension(store): Extension<Arc<PgScoreStore>>,
) -> ApiResult<Json<MyStatsResponse>> {
    let stats = store.all_time_stats(user.id).await?;
    Ok(Json(MyStatsResponse::from(stats)))
}

pub async fn history(
    user: AuthenticatedUser,
    Extension(store): Extension<Arc<PgScoreStore>>,
) -> ApiResult<Json<HistoryResponse>> {
    let scores = store
        .recent_with_quotes(user.id, HISTORY_LIMIT)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let stats = store.history_stats(user.id).await?;

    Ok(Json(HistoryResponse {
        scores,
        stats: stats.into(),
    }))
}
