pub(crate) mod events;
pub(crate) mod profile;
pub(crate) mod rooms;

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ShowroomError};

pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; EventParticipantsChecker/1.0; +https://example.com)";

/// Fetch a URL and decode the response body as JSON.
pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<Value> {
    debug!(url, "fetching json");

    let response = client
        .get(url)
        .query(query)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| ShowroomError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShowroomError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.json().await.map_err(|e| ShowroomError::Json {
        url: url.to_owned(),
        source: e,
    })
}

/// Fetch a CSV document and parse every row into a string-valued JSON
/// object keyed by the header row.
///
/// The archive is served as UTF-8 with an optional BOM.
pub(crate) async fn get_csv_rows(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<Value>> {
    debug!(url, "fetching csv");

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| ShowroomError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShowroomError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ShowroomError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

    parse_csv(body.strip_prefix('\u{feff}').unwrap_or(&body))
}

fn parse_csv(text: &str) -> Result<Vec<Value>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut object = serde_json::Map::new();
        for (key, field) in headers.iter().zip(row.iter()) {
            object.insert(key.to_string(), Value::String(field.to_string()));
        }
        rows.push(Value::Object(object));
    }
    Ok(rows)
}
