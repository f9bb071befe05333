//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::codec;
use crate::error::ApiError;
use crate::grade::grade_multiplication;
use crate::pool::generate_pool;
use crate::progression::play_round;
use crate::protocol::*;
use crate::select::select_question;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(level = q.level))]
pub async fn http_get_question(
    State(state): State<Arc<AppState>>,
    Query(q): Query<QuestionQuery>,
) -> Result<Json<QuestionOut>, ApiError> {
    let settings = &state.settings;
    if !settings.level_allowed(q.level) {
        return Err(ApiError::InvalidLevel(q.level));
    }
    let solved = codec::parse_solved(q.solved.as_deref().unwrap_or(""))?;
    let pool = generate_pool(q.level, settings.default_max_multiplier);
    let mut rng = rand::thread_rng();
    let question = select_question(
        &pool,
        &solved,
        q.level,
        &settings.low_probability_factors,
        settings.low_factor_chance_percent,
        &mut rng,
    );
    info!(target: "game", level = q.level, question = %question.key(), exhausted = question.is_exhausted(), "HTTP question served");
    Ok(Json(question.into()))
}

#[instrument(level = "info", skip(body), fields(a = body.a, b = body.b))]
pub async fn http_post_answer(Json(body): Json<AnswerIn>) -> Json<AnswerOut> {
    let graded = grade_multiplication(body.user_answer, body.a, body.b);
    info!(target: "game", a = body.a, b = body.b, correct = graded.is_correct, "HTTP answer graded");
    Json(AnswerOut {
        is_correct: graded.is_correct,
        correct: graded.correct_answer as i64,
    })
}

#[instrument(level = "info", skip(state, body), fields(level = body.level, next = body.next_question))]
pub async fn http_post_round(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RoundIn>,
) -> Result<Json<RoundOut>, ApiError> {
    let settings = &state.settings;
    if !settings.level_allowed(body.level) {
        return Err(ApiError::InvalidLevel(body.level));
    }
    let now = Utc::now();
    let (mut session, input) = body.into_session(now)?;
    let mut rng = rand::thread_rng();
    play_round(&mut session, &input, settings, &mut rng, now)?;
    info!(
        target: "game",
        game = %session.game_id,
        streak = session.streak,
        attempts_left = session.attempts_left,
        won = session.game_won,
        lost = session.game_lost,
        answer = %trunc_for_log(&session.user_answer, 32),
        "HTTP round evaluated"
    );
    Ok(Json(to_round_out(&session, now)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsOut> {
    Json((&state.settings).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::routes::build_router;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_with(settings: GameSettings) -> TestServer {
        let state = Arc::new(AppState::with_settings(settings));
        TestServer::new(build_router(state)).expect("test server")
    }

    fn server() -> TestServer {
        server_with(GameSettings::default())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let res = server().get("/api/v1/health").await;
        res.assert_status_ok();
        assert_eq!(res.json::<Value>()["ok"], json!(true));
    }

    #[tokio::test]
    async fn question_rejects_unconfigured_level() {
        let res = server().get("/api/v1/question").add_query_param("level", 7).await;
        res.assert_status_bad_request();
        let body: Value = res.json();
        assert!(body["message"].as_str().unwrap().contains("level 7"));
    }

    #[tokio::test]
    async fn question_respects_level_bound() {
        let server = server();
        for _ in 0..20 {
            let res = server.get("/api/v1/question").add_query_param("level", 50).await;
            res.assert_status_ok();
            let q: Value = res.json();
            let (a, b) = (q["a"].as_u64().unwrap(), q["b"].as_u64().unwrap());
            assert!(a * b <= 50);
            assert_eq!(q["level"], json!(50));
        }
    }

    #[tokio::test]
    async fn question_rejects_undecodable_solved_string() {
        let res = server()
            .get("/api/v1/question")
            .add_query_param("level", 100)
            .add_query_param("solved", "1-1;2-2")
            .await;
        res.assert_status_bad_request();
    }

    #[tokio::test]
    async fn fully_solved_pool_yields_sentinel() {
        let server = server_with(GameSettings {
            levels: vec![2],
            ..GameSettings::default()
        });
        // level 2 pool is (1,1), (1,2), (2,1)
        let res = server
            .get("/api/v1/question")
            .add_query_param("level", 2)
            .add_query_param("solved", r#"["1-1","1-2","2-1"]"#)
            .await;
        res.assert_status_ok();
        let q: Value = res.json();
        assert_eq!(q["a"], json!(0));
        assert_eq!(q["b"], json!(0));
        assert_eq!(q["level"], json!(2));
    }

    #[tokio::test]
    async fn answer_endpoint_grades_exactly() {
        let server = server();
        let res = server
            .post("/api/v1/answer")
            .json(&json!({"a": 7, "b": 8, "userAnswer": 56}))
            .await;
        res.assert_status_ok();
        let out: Value = res.json();
        assert_eq!(out["isCorrect"], json!(true));
        assert_eq!(out["correct"], json!(56));

        let res = server
            .post("/api/v1/answer")
            .json(&json!({"a": 7, "b": 8, "userAnswer": 57}))
            .await;
        assert_eq!(res.json::<Value>()["isCorrect"], json!(false));
    }

    #[tokio::test]
    async fn round_starts_a_game_then_grades_a_correct_answer() {
        let server = server();

        // no question yet: a = b = 0 starts a new game, nothing graded
        let res = server.post("/api/v1/round").json(&json!({"level": 100})).await;
        res.assert_status_ok();
        let round: Value = res.json();
        let a = round["a"].as_u64().unwrap();
        let b = round["b"].as_u64().unwrap();
        assert!(a >= 1 && b >= 1 && a * b <= 100);
        assert_eq!(round["attemptsLeft"], json!(3));
        assert_eq!(round["streak"], json!(0));
        assert_eq!(round["answerChecked"], json!(false));
        assert_eq!(round["gameWon"], json!(false));

        // round-trip the opaque state and answer correctly
        let res = server
            .post("/api/v1/round")
            .json(&json!({
                "level": 100,
                "a": a,
                "b": b,
                "streak": 0,
                "attemptsLeft": round["attemptsLeft"],
                "solved": round["solved"],
                "history": round["history"],
                "gameId": round["gameId"],
                "gameStart": round["gameStart"],
                "userAnswer": (a * b).to_string(),
            }))
            .await;
        res.assert_status_ok();
        let next: Value = res.json();
        assert_eq!(next["streak"], json!(1));
        assert_eq!(next["gameLost"], json!(false));
        // new question fetched, solved set grew
        let history: Vec<Value> =
            serde_json::from_str(next["history"].as_str().unwrap()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["isCorrect"], json!(true));
        let solved: Vec<String> = serde_json::from_str(next["solved"].as_str().unwrap()).unwrap();
        assert_eq!(solved, vec![format!("{}-{}", a, b)]);
    }

    #[tokio::test]
    async fn round_rejects_malformed_answer_text() {
        let server = server();
        let res = server
            .post("/api/v1/round")
            .json(&json!({
                "level": 100,
                "a": 3,
                "b": 4,
                "attemptsLeft": 3,
                "userAnswer": "twelve",
            }))
            .await;
        res.assert_status_bad_request();
    }

    #[tokio::test]
    async fn settings_endpoint_exposes_active_configuration() {
        let res = server().get("/api/v1/settings").await;
        res.assert_status_ok();
        let out: Value = res.json();
        assert_eq!(out["requiredCorrectAnswers"], json!(10));
        assert_eq!(out["initialAttempts"], json!(3));
        assert_eq!(out["levels"], json!([20, 50, 100, 1000]));
    }
}
