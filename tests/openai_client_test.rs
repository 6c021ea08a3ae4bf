use chrono::{Duration, Local};
use mockito::Matcher;
use serde_json::json;
use travel_agent_rs::{OpenAIClient, TravelAgent, TravelError, TravelPreferences};

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn preferences() -> TravelPreferences {
    let today = Local::now().date_naive();
    TravelPreferences {
        destination: "Lisbon".to_string(),
        departure_date: (today + Duration::days(10)).format("%Y-%m-%d").to_string(),
        return_date: (today + Duration::days(14)).format("%Y-%m-%d").to_string(),
        budget: 1500.0,
        travelers: 1,
        accommodation_type: "hostel".to_string(),
        activities: vec!["Food Tours".to_string()],
        dietary_restrictions: vec!["Vegetarian".to_string()],
    }
}

fn agent_for(server: &mockito::ServerGuard) -> TravelAgent {
    let client =
        OpenAIClient::new("test-key").with_base_url(format!("{}/v1", server.url()));
    TravelAgent::with_generator(client)
}

#[tokio::test]
async fn test_plan_request_over_http() {
    let mut server = mockito::Server::new_async().await;
    let plan = json!({
        "itinerary": [{"day": 1, "activities": ["Time Out Market"], "estimated_cost": 60.0}],
        "estimated_total_cost": 900.0
    })
    .to_string();

    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4",
            "max_tokens": 2000,
            "temperature": 0.7
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(&plan))
        .create_async()
        .await;

    let plan = agent_for(&server)
        .generate_plan(&preferences())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(plan.destination, "Lisbon");
    assert_eq!(plan.itinerary[0].activities, vec!["Time Out Market"]);
    assert_eq!(plan.estimated_cost, 900.0);
}

#[tokio::test]
async fn test_http_error_becomes_transport_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let error = agent_for(&server)
        .generate_plan(&preferences())
        .await
        .unwrap_err();

    assert!(matches!(error, TravelError::Transport(_)));
    assert!(error.to_string().contains("Incorrect API key provided"));
    assert!(error.to_string().contains("401"));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .expect(1)
        .create_async()
        .await;

    let error = agent_for(&server)
        .generate_plan(&preferences())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(error, TravelError::RateLimit { retry_after: 7 }));
}

#[tokio::test]
async fn test_tips_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 800
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(
            "- Wear comfortable shoes for the hills\n- Try pastéis de nata in Belém",
        ))
        .create_async()
        .await;

    let tips = agent_for(&server).get_tips("Lisbon").await;
    assert_eq!(
        tips,
        vec![
            "Wear comfortable shoes for the hills",
            "Try pastéis de nata in Belém"
        ]
    );
}

#[tokio::test]
async fn test_tips_server_error_degrades() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let tips = agent_for(&server).get_tips("Lisbon").await;
    assert_eq!(tips.len(), 1);
    assert!(tips[0].contains("upstream unavailable"));
}
