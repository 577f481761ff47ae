use crate::core::dates::date_for_offset;
use crate::core::{DayOutcome, DayRates, Period, RatesProvider};
use anyhow::Context;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.privatbank.ua";

/// Archive rates endpoint of the PrivatBank public API.
pub struct PrivatBankProvider {
    base_url: String,
    timeout: Option<Duration>,
}

impl PrivatBankProvider {
    pub fn new(base_url: &str) -> Self {
        PrivatBankProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Bounds each request. Without it the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn day_url(&self, date: &str) -> String {
        format!("{}/p24api/exchange_rates?json&date={}", self.base_url, date)
    }

    fn build_client(&self) -> anyhow::Result<Client> {
        let mut builder = Client::builder().user_agent("pbrates/1.0");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .with_context(|| format!("Failed to build HTTP client for {}", self.base_url))
    }
}

/// Fetches a single day. Every failure is captured in the returned outcome.
#[instrument(name = "PrivatBankDayFetch", skip(client))]
pub async fn fetch_day(client: &Client, url: &str) -> DayOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Request failed");
            return DayOutcome::Failure(format!("Connection error: {:#}", anyhow::Error::new(e)));
        }
    };

    let status = response.status();
    debug!(%status, "Received response");
    if status != StatusCode::OK {
        return DayOutcome::Failure(format!("Error status: {} for {}", status.as_u16(), url));
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "Failed to read response body");
            return DayOutcome::Failure(format!("Connection error: {:#}", anyhow::Error::new(e)));
        }
    };

    match serde_json::from_str::<DayRates>(&text) {
        Ok(day) => {
            debug!(date = %day.date, quotes = day.exchange_rates.len(), "Parsed rates");
            DayOutcome::Success(day)
        }
        Err(e) => {
            error!(error = ?e, response = %text, "Failed to parse rates response");
            DayOutcome::Failure(format!("Invalid response for {url}: {e}"))
        }
    }
}

#[async_trait]
impl RatesProvider for PrivatBankProvider {
    #[instrument(
        name = "PrivatBankPeriodFetch",
        skip(self, period),
        fields(days = period.days())
    )]
    async fn fetch_period(&self, period: Period) -> Vec<DayOutcome> {
        // One client per batch, dropped once every request has finished
        let client = match self.build_client() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client");
                let message = format!("Connection error: {e:#}");
                return period
                    .offsets()
                    .map(|_| DayOutcome::Failure(message.clone()))
                    .collect();
            }
        };

        let urls: Vec<String> = period
            .offsets()
            .map(|offset| self.day_url(&date_for_offset(offset)))
            .collect();

        // join_all yields results in input order, whatever the completion order
        let outcomes = join_all(urls.iter().map(|url| fetch_day(&client, url))).await;

        debug!(
            failures = outcomes.iter().filter(|o| o.is_failure()).count(),
            "Batch complete"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RATES_PATH: &str = "/p24api/exchange_rates";

    fn day_body(date: &str) -> String {
        format!(
            r#"{{
                "date": "{date}",
                "bank": "PB",
                "baseCurrency": 980,
                "baseCurrencyLit": "UAH",
                "exchangeRate": [
                    {{"baseCurrency": "UAH", "saleRateNB": 0.0, "purchaseRateNB": 0.0}},
                    {{"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 15.05, "purchaseRateNB": 15.05, "saleRate": 15.7, "purchaseRate": 15.35}},
                    {{"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 18.79, "purchaseRateNB": 18.79}}
                ]
            }}"#
        )
    }

    async fn mount_day(server: &MockServer, date: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(RATES_PATH))
            .and(query_param("date", date))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn test_day_url() {
        let provider = PrivatBankProvider::new("https://api.privatbank.ua/");
        assert_eq!(
            provider.day_url("01.12.2014"),
            "https://api.privatbank.ua/p24api/exchange_rates?json&date=01.12.2014"
        );
    }

    #[test]
    fn test_build_client_with_timeout() {
        let provider = PrivatBankProvider::new("https://api.privatbank.ua")
            .with_timeout(Duration::from_secs(5));
        assert!(provider.build_client().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_day_success() {
        let server = MockServer::start().await;
        mount_day(
            &server,
            "01.12.2014",
            ResponseTemplate::new(200).set_body_string(day_body("01.12.2014")),
        )
        .await;
        let provider = PrivatBankProvider::new(&server.uri());

        let outcome = fetch_day(&Client::new(), &provider.day_url("01.12.2014")).await;

        let DayOutcome::Success(day) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(day.date, "01.12.2014");
        assert_eq!(day.exchange_rates.len(), 3);
        assert_eq!(day.exchange_rates[1].currency, "USD");
        assert_eq!(day.exchange_rates[1].sale_rate, Some(15.7));
        assert_eq!(day.exchange_rates[2].purchase_rate_nb, Some(18.79));
    }

    #[tokio::test]
    async fn test_fetch_day_non_ok_status() {
        let server = MockServer::start().await;
        mount_day(&server, "01.12.2014", ResponseTemplate::new(404)).await;
        let provider = PrivatBankProvider::new(&server.uri());
        let url = provider.day_url("01.12.2014");

        let outcome = fetch_day(&Client::new(), &url).await;

        assert_eq!(
            outcome,
            DayOutcome::Failure(format!("Error status: 404 for {url}"))
        );
    }

    #[tokio::test]
    async fn test_fetch_day_connection_refused() {
        // Nothing listens on port 1
        let provider = PrivatBankProvider::new("http://127.0.0.1:1");

        let outcome = fetch_day(&Client::new(), &provider.day_url("01.12.2014")).await;

        let DayOutcome::Failure(message) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(message.starts_with("Connection error: "), "{message}");
        assert!(message.contains("error sending request"), "{message}");
    }

    #[tokio::test]
    async fn test_fetch_day_invalid_json() {
        let server = MockServer::start().await;
        mount_day(
            &server,
            "01.12.2014",
            ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        )
        .await;
        let provider = PrivatBankProvider::new(&server.uri());

        let outcome = fetch_day(&Client::new(), &provider.day_url("01.12.2014")).await;

        let DayOutcome::Failure(message) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(message.starts_with("Invalid response for "), "{message}");
    }

    #[tokio::test]
    async fn test_fetch_period_keeps_request_order() {
        let server = MockServer::start().await;
        let dates: Vec<String> = (0..4).map(date_for_offset).collect();
        for (offset, date) in dates.iter().enumerate() {
            // Earlier offsets answer later so completion order is reversed
            let delay = Duration::from_millis(50 * (4 - offset as u64));
            mount_day(
                &server,
                date,
                ResponseTemplate::new(200)
                    .set_body_string(day_body(date))
                    .set_delay(delay),
            )
            .await;
        }
        let provider = PrivatBankProvider::new(&server.uri());

        let outcomes = provider.fetch_period(Period::new(4).unwrap()).await;

        assert_eq!(outcomes.len(), 4);
        for (outcome, date) in outcomes.iter().zip(&dates) {
            match outcome {
                DayOutcome::Success(day) => assert_eq!(&day.date, date),
                DayOutcome::Failure(message) => panic!("unexpected failure: {message}"),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_period_isolates_failures() {
        let server = MockServer::start().await;
        let dates: Vec<String> = (0..3).map(date_for_offset).collect();
        mount_day(
            &server,
            &dates[0],
            ResponseTemplate::new(200).set_body_string(day_body(&dates[0])),
        )
        .await;
        mount_day(&server, &dates[1], ResponseTemplate::new(500)).await;
        mount_day(
            &server,
            &dates[2],
            ResponseTemplate::new(200).set_body_string(day_body(&dates[2])),
        )
        .await;
        let provider = PrivatBankProvider::new(&server.uri());

        let outcomes = provider.fetch_period(Period::new(3).unwrap()).await;

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_failure());
        assert_eq!(
            outcomes[1],
            DayOutcome::Failure(format!(
                "Error status: 500 for {}",
                provider.day_url(&dates[1])
            ))
        );
        assert!(!outcomes[2].is_failure());
    }

    #[tokio::test]
    async fn test_fetch_period_timeout_is_a_connection_error() {
        let server = MockServer::start().await;
        let date = date_for_offset(0);
        mount_day(
            &server,
            &date,
            ResponseTemplate::new(200)
                .set_body_string(day_body(&date))
                .set_delay(Duration::from_secs(2)),
        )
        .await;
        let provider =
            PrivatBankProvider::new(&server.uri()).with_timeout(Duration::from_millis(200));

        let outcomes = provider.fetch_period(Period::new(1).unwrap()).await;

        assert_eq!(outcomes.len(), 1);
        let DayOutcome::Failure(message) = &outcomes[0] else {
            panic!("expected failure, got {:?}", outcomes[0]);
        };
        assert!(message.starts_with("Connection error: "), "{message}");
    }
}
