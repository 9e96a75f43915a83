use crate::helpers::{TestApp, tags_body};
use popular_tags::domain::{QueryWindow, TagRecord};
use popular_tags::stack_exchange::FetchError;
use std::time::Duration;
use wiremock::matchers::{any, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn january_2023() -> QueryWindow {
    QueryWindow::parse("2023-01-01", "2023-01-31").unwrap()
}

#[tokio::test]
async fn fetch_sends_the_window_as_epoch_seconds() {
    // Arrange
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(query_param("site", "stackoverflow"))
        .and(query_param("fromdate", "1672531200"))
        .and(query_param("todate", "1675123200"))
        .and(query_param("order", "desc"))
        .and(query_param("sort", "popular"))
        .and(query_param("pagesize", "10"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(&[("rust", 120)])))
        .expect(1)
        .mount(&app.api_server)
        .await;

    // Act
    let tags = app.tag_client().fetch_popular_tags(&january_2023()).await;

    // Assert
    assert_eq!(tags.unwrap(), vec![TagRecord::new("rust".into(), 120)]);
}

#[tokio::test]
async fn fetch_preserves_the_order_and_count_of_items() {
    // Arrange
    let app = TestApp::spawn().await;
    let items = [
        ("javascript", 2_528_942),
        ("python", 2_192_541),
        ("java", 1_917_346),
        ("c#", 1_615_091),
        ("c++", 806_223),
    ];
    Mock::given(path("/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(&items)))
        .expect(1)
        .mount(&app.api_server)
        .await;

    // Act
    let tags = app
        .tag_client()
        .fetch_popular_tags(&january_2023())
        .await
        .unwrap();

    // Assert
    assert_eq!(tags.len(), items.len());
    for (tag, (name, count)) in tags.iter().zip(items) {
        assert_eq!(tag.name, name);
        assert_eq!(tag.count, count);
    }
    assert_eq!(tags[3].link, "https://stackoverflow.com/tags/c%23/info");
    assert_eq!(tags[4].link, "https://stackoverflow.com/tags/c%2B%2B/info");
}

#[tokio::test]
async fn fetch_uses_the_configured_site_and_page_size() {
    // Arrange
    let mut app = TestApp::spawn().await;
    app.settings.api.site = "superuser".into();
    app.settings.api.page_size = 25;
    Mock::given(path("/tags"))
        .and(query_param("site", "superuser"))
        .and(query_param("pagesize", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(&[])))
        .expect(1)
        .mount(&app.api_server)
        .await;

    // Act
    let tags = app.tag_client().fetch_popular_tags(&january_2023()).await;

    // Assert
    assert!(tags.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_reports_an_error_status_distinctly_from_an_empty_result() {
    // Arrange
    let app = TestApp::spawn().await;
    let error_body = serde_json::json!({
        "error_id": 400,
        "error_message": "fromdate",
        "error_name": "bad_parameter"
    });
    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body))
        .expect(1)
        .mount(&app.api_server)
        .await;

    // Act
    let outcome = app.tag_client().fetch_popular_tags(&january_2023()).await;

    // Assert
    match outcome {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 400),
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_rejects_a_body_without_items() {
    // Arrange
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&app.api_server)
        .await;

    // Act
    let outcome = app.tag_client().fetch_popular_tags(&january_2023()).await;

    // Assert
    assert!(matches!(outcome, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn fetch_gives_up_after_the_configured_timeout() {
    // Arrange
    let mut app = TestApp::spawn().await;
    app.settings.api.timeout_seconds = 1;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tags_body(&[("rust", 120)]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&app.api_server)
        .await;

    // Act
    let outcome = app.tag_client().fetch_popular_tags(&january_2023()).await;

    // Assert
    assert!(matches!(outcome, Err(FetchError::Request(_))));
}
