//! Integration tests for the games resource.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_game_then_fetch_empty_history() {
    let repository = common::new_repository();

    // POST /api/v1/games
    let app = common::build_test_app(Arc::clone(&repository));
    let (status, json) = common::post_empty(app, "/api/v1/games").await;

    assert_eq!(status, StatusCode::CREATED);
    let game_id: Uuid = json["game_id"].as_str().unwrap().parse().unwrap();
    assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);

    // GET /api/v1/games/{game_id}
    let app = common::build_test_app(repository);
    let (status, json) = common::get_json(app, &format!("/api/v1/games/{game_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["game_id"], game_id.to_string());
    assert_eq!(json["rolls"], json!([]));
    assert_eq!(json["version"], 1);
    assert_eq!(json["created_at"], "2026-01-15T10:00:00Z");
}

#[tokio::test]
async fn test_games_have_distinct_identifiers() {
    let repository = common::new_repository();

    let first = common::create_game(&repository).await;
    let second = common::create_game(&repository).await;

    assert_ne!(first, second);
    assert_eq!(repository.stream_count().unwrap(), 2);
}

#[tokio::test]
async fn test_record_roll_returns_history_with_sequence_numbers() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[7]).await;

    let app = common::build_test_app(repository);
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/games/{game_id}/rolls"),
        &json!({ "pins": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["rolls"],
        json!([
            { "sequence_number": 1, "pins": 7 },
            { "sequence_number": 2, "pins": 2 },
        ])
    );
}

#[tokio::test]
async fn test_gutter_game_scores_zero_in_every_frame() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[0; 20]).await;

    let app = common::build_test_app(repository);
    let (status, json) = common::get_json(app, &format!("/api/v1/games/{game_id}/score")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_score"], 0);
    assert_eq!(json["is_complete"], true);
    let frames = json["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 10);
    for frame in frames {
        assert_eq!(frame["label"], "Open frame");
        assert_eq!(frame["score"], json!({ "status": "resolved", "value": 0 }));
    }
}

#[tokio::test]
async fn test_all_nines_scores_ninety() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    let pins: Vec<i64> = [5, 4].repeat(10);
    common::roll_all(&repository, game_id, &pins).await;

    let app = common::build_test_app(repository);
    let (_, json) = common::get_json(app, &format!("/api/v1/games/{game_id}/score")).await;

    let cumulative: Vec<i64> = json["frames"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["score"]["value"].as_i64().unwrap())
        .collect();
    assert_eq!(cumulative, vec![9, 18, 27, 36, 45, 54, 63, 72, 81, 90]);
    assert_eq!(json["current_score"], 90);
}

#[tokio::test]
async fn test_perfect_game_scores_three_hundred() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[10; 12]).await;

    let app = common::build_test_app(repository);
    let (status, json) = common::get_json(app, &format!("/api/v1/games/{game_id}/score")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_score"], 300);
    assert_eq!(json["is_complete"], true);
    let frames = json["frames"].as_array().unwrap();
    assert!(frames.iter().all(|f| f["label"] == "Strike"));
    assert_eq!(frames[9]["rolls"], json!([10, 10, 10]));
}

#[tokio::test]
async fn test_spare_stays_pending_until_next_roll() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    let score_uri = format!("/api/v1/games/{game_id}/score");

    common::roll_all(&repository, game_id, &[5, 5]).await;
    let (_, json) = common::get_json(common::build_test_app(Arc::clone(&repository)), &score_uri).await;
    assert_eq!(json["frames"][0]["label"], "Spare");
    assert_eq!(json["frames"][0]["score"], json!({ "status": "pending" }));
    assert_eq!(json["current_score"], 0);

    common::roll_all(&repository, game_id, &[3, 4]).await;
    let (_, json) = common::get_json(common::build_test_app(repository), &score_uri).await;
    assert_eq!(json["frames"][0]["score"]["value"], 13);
    assert_eq!(json["frames"][1]["label"], "Open frame");
    assert_eq!(json["frames"][1]["score"]["value"], 20);
    assert_eq!(json["current_score"], 20);
}

#[tokio::test]
async fn test_out_of_range_pins_rejected_and_history_unchanged() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[3]).await;

    for bad in [json!(11), json!(-1), json!(4.5), json!("ten")] {
        let app = common::build_test_app(Arc::clone(&repository));
        let (status, json) = common::post_json(
            app,
            &format!("/api/v1/games/{game_id}/rolls"),
            &json!({ "pins": bad }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "pins {bad} accepted");
        assert_eq!(json["error"], "invalid_roll");
    }

    let app = common::build_test_app(repository);
    let (_, json) = common::get_json(app, &format!("/api/v1/games/{game_id}")).await;
    assert_eq!(json["rolls"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_roll_exceeding_standing_pins_is_rejected() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[6]).await;

    let app = common::build_test_app(Arc::clone(&repository));
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/games/{game_id}/rolls"),
        &json!({ "pins": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_roll");
    assert_eq!(json["message"], "invalid roll: only 4 pins standing, cannot knock down 5");
}

#[tokio::test]
async fn test_roll_after_game_complete_is_rejected() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[10; 12]).await;

    let app = common::build_test_app(Arc::clone(&repository));
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/games/{game_id}/rolls"),
        &json!({ "pins": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_roll");

    let app = common::build_test_app(repository);
    let (_, json) = common::get_json(app, &format!("/api/v1/games/{game_id}")).await;
    assert_eq!(json["rolls"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_unknown_game_returns_404_for_every_operation() {
    let repository = common::new_repository();
    let game_id = Uuid::new_v4();

    for uri in [
        format!("/api/v1/games/{game_id}"),
        format!("/api/v1/games/{game_id}/score"),
        format!("/api/v1/games/{game_id}/summary"),
    ] {
        let app = common::build_test_app(Arc::clone(&repository));
        let (status, json) = common::get_json(app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["error"], "game_not_found");
    }

    let app = common::build_test_app(repository);
    let (status, _) = common::post_json(
        app,
        &format!("/api/v1/games/{game_id}/rolls"),
        &json!({ "pins": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repeated_score_reads_are_identical() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[10, 7, 3, 9, 0, 10]).await;
    let score_uri = format!("/api/v1/games/{game_id}/score");

    let (_, first) = common::get_json(common::build_test_app(Arc::clone(&repository)), &score_uri).await;
    let (_, second) = common::get_json(common::build_test_app(repository), &score_uri).await;

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
    assert_eq!(first["current_score"], 48);
}

#[tokio::test]
async fn test_summary_uses_configured_summarizer() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[10, 3, 4]).await;

    let app = common::build_test_app_with_summarizer(
        Arc::clone(&repository),
        Arc::new(common::StubSummarizer),
    );
    let (status, json) =
        common::get_json(app, &format!("/api/v1/games/{game_id}/summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["game_id"], game_id.to_string());
    assert_eq!(json["current_score"], 24);
    assert_eq!(json["summary"], "stub summary: 24 after 3 roll(s)");
}

#[tokio::test]
async fn test_default_summary_describes_score_sheet() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[10; 12]).await;

    let app = common::build_test_app(repository);
    let (status, json) =
        common::get_json(app, &format!("/api/v1/games/{game_id}/summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["summary"].as_str().unwrap().starts_with("Final score: 300."));
}

#[tokio::test]
async fn test_summary_failure_returns_502_and_leaves_game_usable() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;
    common::roll_all(&repository, game_id, &[4, 5]).await;

    let app = common::build_test_app_with_summarizer(
        Arc::clone(&repository),
        Arc::new(common::FailingSummarizer),
    );
    let (status, json) =
        common::get_json(app, &format!("/api/v1/games/{game_id}/summary")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "summary_unavailable");

    common::roll_all(&repository, game_id, &[6]).await;
    let app = common::build_test_app(repository);
    let (status, json) = common::get_json(app, &format!("/api/v1/games/{game_id}/score")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_score"], 9);
    assert_eq!(json["rolls"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_rolls_keep_history_consistent() {
    let repository = common::new_repository();
    let game_id = common::create_game(&repository).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = common::build_test_app(Arc::clone(&repository));
            let uri = format!("/api/v1/games/{game_id}/rolls");
            tokio::spawn(async move { common::post_json(app, &uri, &json!({ "pins": 1 })).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        let (status, json) = handle.await.unwrap();
        match status {
            StatusCode::OK => accepted += 1,
            StatusCode::CONFLICT => assert_eq!(json["error"], "concurrency_conflict"),
            other => panic!("unexpected status {other}: {json}"),
        }
    }

    let app = common::build_test_app(repository);
    let (_, json) = common::get_json(app, &format!("/api/v1/games/{game_id}")).await;
    let rolls = json["rolls"].as_array().unwrap();
    assert!(accepted >= 1);
    assert_eq!(rolls.len(), accepted);
    for (i, roll) in rolls.iter().enumerate() {
        assert_eq!(roll["sequence_number"], i + 1);
    }
}
