//! Job board invariants against the Postgres stores
//!
//! Each test returns early when no database is configured. Usernames are
//! unique per run since the database outlives the test process.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{unique_username, TestApp, TEST_PASSWORD};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_concurrent_duplicate_apply() {
    let Some(app) = TestApp::postgres().await.unwrap() else {
        return;
    };
    let employer = app.employer(&unique_username("acme")).await;
    let worker = app.worker(&unique_username("wanda")).await;
    let job_id = app.post_job(&employer, "Plumber", "Fix sink").await;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let app = app.clone();
            let worker = worker.clone();
            tokio::spawn(async move { app.apply(&worker, job_id).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => {
                assert_eq!(body["error"]["message"], "You have already applied to this job");
                conflicts += 1;
            }
            other => panic!("unexpected status {other}: {body}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 9);

    let (status, applications) = app.applications(&employer, job_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(applications.as_array().unwrap().len(), 1);
    assert_eq!(applications[0]["worker_id"], worker.id);
}

#[tokio::test]
async fn test_pg_apply_to_closed_job() {
    let Some(app) = TestApp::postgres().await.unwrap() else {
        return;
    };
    let employer = app.employer(&unique_username("acme")).await;
    let applied = app.worker(&unique_username("wanda")).await;
    let late = app.worker(&unique_username("walter")).await;
    let job_id = app.post_job(&employer, "Plumber", "Fix sink").await;

    let (status, _) = app.apply(&applied, job_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, job) = app
        .send(
            Method::POST,
            &format!("/api/jobs/{job_id}/close"),
            Some(employer.token.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["status"], "closed");

    // Closed is reported ahead of duplicate
    let (status, body) = app.apply(&applied, job_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Job is closed");

    let (status, body) = app.apply(&late, job_id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Job is closed");

    let (_, applications) = app.applications(&employer, job_id).await;
    assert_eq!(applications.as_array().unwrap().len(), 1);

    let (_, open) = app.send(Method::GET, "/api/jobs", None, None).await;
    assert!(open
        .as_array()
        .unwrap()
        .iter()
        .all(|j| j["id"].as_i64() != Some(job_id)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_concurrent_close_succeeds_once() {
    let Some(app) = TestApp::postgres().await.unwrap() else {
        return;
    };
    let employer = app.employer(&unique_username("acme")).await;
    let job_id = app.post_job(&employer, "Plumber", "Fix sink").await;
    let uri = format!("/api/jobs/{job_id}/close");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let app = app.clone();
            let token = employer.token.clone();
            let uri = uri.clone();
            tokio::spawn(async move {
                app.send(Method::POST, &uri, Some(token.as_str()), None)
                    .await
                    .0
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count(),
        3
    );
}

#[tokio::test]
async fn test_pg_delete_cascades_to_own_applications() {
    let Some(app) = TestApp::postgres().await.unwrap() else {
        return;
    };
    let employer = app.employer(&unique_username("acme")).await;
    let first = app.worker(&unique_username("wanda")).await;
    let second = app.worker(&unique_username("walter")).await;

    let doomed = app.post_job(&employer, "Plumber", "Fix sink").await;
    let survivor = app.post_job(&employer, "Painter", "Paint fence").await;
    for worker in [&first, &second] {
        let (status, _) = app.apply(worker, doomed).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = app.apply(&first, survivor).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/jobs/{doomed}"),
            Some(employer.token.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.applications(&employer, doomed).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::GET, &format!("/api/jobs/{doomed}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, applications) = app.applications(&employer, survivor).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(applications.as_array().unwrap().len(), 1);

    let (status, _) = app.apply(&second, doomed).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/jobs/{doomed}"),
            Some(employer.token.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pg_duplicate_signup_conflicts() {
    let Some(app) = TestApp::postgres().await.unwrap() else {
        return;
    };
    let username = unique_username("wanda");
    let worker = app.worker(&username).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "username": username, "password": TEST_PASSWORD, "role": "employer" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Username already taken");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "worker");

    let (status, mine) = app
        .send(Method::GET, "/api/jobs/my-jobs", Some(worker.token.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{mine}");
}
