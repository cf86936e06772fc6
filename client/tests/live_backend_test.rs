//! Live Backend Tests
//!
//! These tests are disabled by default (#[ignore]) and are meant to be run
//! manually against a running question/categorization backend.
//!
//! To run these tests:
//!     cargo test --test live_backend_test -- --ignored
//!
//! Requirements:
//! - Backend running (default: http://localhost:5000)
//! - Set BACKEND_URL environment variable if not using default
//! - Set SCRAPE_URL to change the page that is submitted

use std::env;
use visitor_scraper_client::{backend::BackendClient, model::ModelChoice};

fn get_backend_url() -> String {
    env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

fn get_scrape_url() -> String {
    env::var("SCRAPE_URL").unwrap_or_else(|_| "https://www.rust-lang.org".to_string())
}

/// Fetch questions, answer each with its first option and categorize.
async fn run_round_trip(model: ModelChoice) -> Result<(), Box<dyn std::error::Error>> {
    let client = BackendClient::new(get_backend_url());

    println!("\n=== Testing backend: {} ===", model);
    println!("Backend URL: {}", client.base_url());

    let start = std::time::Instant::now();
    let questions = client.generate_questions(model, &get_scrape_url()).await?;
    println!("  questions: {} ({:.2}s)", questions.len(), start.elapsed().as_secs_f64());

    assert!(!questions.is_empty(), "Backend returned no questions");
    for question in &questions {
        assert!(
            !question.options.is_empty(),
            "Question without options: {}",
            question.question
        );
    }

    let user_response = questions
        .iter()
        .map(|q| q.options[0].as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let start = std::time::Instant::now();
    let category = client.categorize(model, &user_response).await?;
    println!("  category: {} ({:.2}s)", category, start.elapsed().as_secs_f64());

    assert!(!category.trim().is_empty(), "Empty category");

    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_openai_backend_round_trip() {
    run_round_trip(ModelChoice::OpenAi)
        .await
        .expect("OpenAI backend round trip failed");
}

#[tokio::test]
#[ignore]
async fn test_ollama_backend_round_trip() {
    run_round_trip(ModelChoice::Ollama)
        .await
        .expect("Ollama backend round trip failed");
}
