use std::time::{SystemTime, UNIX_EPOCH};

use blog_client::{BlogClient, BlogClientError, PostPatch};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("BLOG_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    let client = BlogClient::new(base_url).expect("client must build");

    let endpoints = client.endpoints().await.expect("endpoints must succeed");
    assert!(endpoints.posts.ends_with("/api/posts/"));
    assert!(endpoints.categories.ends_with("/api/categories/"));

    let suffix = unique_suffix();
    let category_title = format!("smoke category {suffix}");
    let category_id = client
        .create_category(&category_title)
        .await
        .expect("create_category must succeed")
        .expect("server must return Location");

    let post_id = client
        .create_post("smoke title", "smoke body", category_id)
        .await
        .expect("create_post must succeed")
        .expect("server must return Location");

    let fetched = client.get_post(post_id).await.expect("get_post must succeed");
    assert_eq!(fetched.title, "smoke title");
    assert_eq!(fetched.category_id, Some(category_id));

    let listed = client.list_posts().await.expect("list_posts must succeed");
    assert!(listed.data.iter().any(|post| post.id == post_id));

    let patch = PostPatch {
        title: Some("smoke title updated".to_string()),
        ..PostPatch::default()
    };
    client
        .update_post(post_id, &patch)
        .await
        .expect("update_post must succeed");
    let updated = client.get_post(post_id).await.expect("get_post must succeed");
    assert_eq!(updated.title, "smoke title updated");
    assert_eq!(updated.body, "smoke body");

    let category = client
        .get_category(category_id)
        .await
        .expect("get_category must succeed");
    assert_eq!(category.title, category_title);
    assert_eq!(category.posts.len(), 1);

    let blocked = client.delete_category(category_id).await;
    assert!(matches!(blocked, Err(BlogClientError::Conflict(_))));

    let rejected = client.create_post("", "body", category_id).await;
    assert!(matches!(rejected, Err(BlogClientError::InvalidRequest(_))));

    client
        .delete_post(post_id)
        .await
        .expect("delete_post must succeed");
    let after_delete = client.get_post(post_id).await;
    assert!(matches!(after_delete, Err(BlogClientError::NotFound)));

    client
        .update_category(category_id, "renamed")
        .await
        .expect("update_category must succeed");
    client
        .delete_category(category_id)
        .await
        .expect("delete_category must succeed");
    let gone = client.get_category(category_id).await;
    assert!(matches!(gone, Err(BlogClientError::NotFound)));
}
