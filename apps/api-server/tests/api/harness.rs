use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use blog_core::domain::Post;

use crate::common::{SEED_COUNT, TestContext, generate_blog_data};

#[actix_web::test]
async fn reset_discards_leftover_posts() {
    let mut ctx = TestContext::seeded().await;
    let stale: Vec<Post> = ctx.seeded.clone();

    ctx.repo()
        .insert_many((0..5).map(|_| generate_blog_data()).collect())
        .await
        .expect("insert extra posts");
    assert_eq!(ctx.repo().count().await.unwrap(), (SEED_COUNT + 5) as u64);

    ctx.reset().await;
    assert_eq!(ctx.seeded.len(), SEED_COUNT);
    assert_eq!(ctx.repo().count().await.unwrap(), SEED_COUNT as u64);

    for post in &stale {
        assert!(ctx.repo().find_by_id(post.id).await.unwrap().is_none());
    }

    let app = test_app!(ctx.state);
    let req = test::TestRequest::get().uri("/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = test::read_body_json(resp).await;
    let mut listed: Vec<String> = body
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_owned())
        .collect();
    let mut seeded: Vec<String> = ctx.seeded.iter().map(|p| p.id.to_string()).collect();
    listed.sort();
    seeded.sort();
    assert_eq!(listed, seeded);
}
