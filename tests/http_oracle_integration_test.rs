use faculty_linker::classifier::{ClassificationOracle, HttpOracle};
use faculty_linker::config::Config;
use std::time::Duration;

#[tokio::test]
async fn http_oracle_zero_shot_integration() {
    let api_key = match std::env::var("FACULTY_ORACLE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("FACULTY_ORACLE_API_KEY not set; skipping integration test");
            return;
        }
    };

    let endpoint = std::env::var("FACULTY_ORACLE_ENDPOINT").unwrap_or_else(|_| Config::default().oracle_endpoint);
    let oracle = HttpOracle::new(endpoint, Some(api_key), Duration::from_secs(60)).expect("client build failed");

    let labels = vec!["Renewable Energy".to_string(), "Medieval History".to_string()];
    let scores = oracle
        .classify(
            "Degree: PhD in Electrical Engineering. Research on photovoltaic panels and wind farms.",
            &labels,
        )
        .await
        .expect("oracle call failed");

    assert_eq!(scores.len(), labels.len());
    let energy = scores
        .iter()
        .find(|(label, _)| label == "Renewable Energy")
        .map(|(_, score)| *score)
        .expect("missing label");
    let history = scores
        .iter()
        .find(|(label, _)| label == "Medieval History")
        .map(|(_, score)| *score)
        .expect("missing label");
    assert!(energy > history, "energy {} vs history {}", energy, history);
}
