//! Runs the real server on an ephemeral port.

use blog_shared::dto::{AuthorPayload, CreatePostRequest, PostResponse};

use api_server::{AppConfig, start_with_state};

use crate::common::{SEED_COUNT, TestContext};

#[actix_web::test]
async fn serves_over_tcp_until_stopped() {
    let ctx = TestContext::seeded().await;
    let server = start_with_state(&AppConfig::ephemeral(), ctx.state.clone()).unwrap();
    let base = format!("http://{}", server.addr());
    // No pooled keep-alive connections to hold up graceful shutdown.
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();

    let res = client.get(format!("{base}/posts")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let posts: Vec<PostResponse> = res.json().await.unwrap();
    assert_eq!(posts.len(), SEED_COUNT);

    let res = client
        .post(format!("{base}/posts"))
        .json(&CreatePostRequest {
            title: Some("Over the wire".to_string()),
            content: Some("Sent with reqwest".to_string()),
            author: Some(AuthorPayload::new("Radia", "Perlman")),
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: PostResponse = res.json().await.unwrap();
    assert_eq!(created.author, "Radia Perlman");

    server.stop().await.unwrap();

    assert!(client.get(format!("{base}/posts")).send().await.is_err());
}
