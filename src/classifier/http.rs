//! Zero-shot classification over HTTP
//!
//! Request body follows the inference-API convention:
//! `{"inputs": text, "parameters": {"candidate_labels": [...], "multi_label": true}}`.
//! Responses may be `{labels, scores}`, a one-element list of that, or a
//! list of `{label, score}` objects.

use super::oracle::{ClassificationOracle, LabelScores};
use crate::error::{LinkerError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpOracle {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LinkerError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        })
    }
}

#[async_trait]
impl ClassificationOracle for HttpOracle {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "candidate_labels": labels,
                "multi_label": true
            }
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LinkerError::OracleTimeout(self.timeout.as_secs())
            } else {
                LinkerError::OracleUnavailable(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LinkerError::OracleUnavailable(format!("status {}: {}", status, text)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LinkerError::OracleUnavailable(format!("invalid JSON response: {}", e)))?;

        parse_response(&payload)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Read label/score pairs out of a zero-shot response
pub fn parse_response(payload: &Value) -> Result<LabelScores> {
    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        return Err(LinkerError::OracleUnavailable(error.to_string()));
    }

    match payload {
        Value::Object(_) => parse_parallel(payload),
        Value::Array(items) => match items.first() {
            None => Ok(Vec::new()),
            Some(first) if first.get("labels").is_some() => parse_parallel(first),
            Some(_) => items.iter().map(parse_pair).collect(),
        },
        _ => Err(unexpected("response is neither an object nor a list")),
    }
}

fn parse_parallel(value: &Value) -> Result<LabelScores> {
    let labels = value
        .get("labels")
        .and_then(Value::as_array)
        .ok_or_else(|| unexpected("missing `labels`"))?;
    let scores = value
        .get("scores")
        .and_then(Value::as_array)
        .ok_or_else(|| unexpected("missing `scores`"))?;

    if labels.len() != scores.len() {
        return Err(unexpected("`labels` and `scores` differ in length"));
    }

    labels
        .iter()
        .zip(scores)
        .map(|(label, score)| {
            let label = label.as_str().ok_or_else(|| unexpected("label is not a string"))?;
            let score = score.as_f64().ok_or_else(|| unexpected("score is not a number"))?;
            Ok((label.to_string(), score))
        })
        .collect()
}

fn parse_pair(value: &Value) -> Result<(String, f64)> {
    let label = value
        .get("label")
        .and_then(Value::as_str)
        .ok_or_else(|| unexpected("missing `label`"))?;
    let score = value
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| unexpected("missing `score`"))?;
    Ok((label.to_string(), score))
}

fn unexpected(reason: &str) -> LinkerError {
    LinkerError::OracleUnavailable(format!("unexpected response: {}", reason))
}
