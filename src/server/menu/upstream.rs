use anyhow::Context;
use derive_more::{Display, Error};
use log::{info, warn};
use reqwest::{Client, Url};
use serde_json::Value;
use crate::server::model::config::UpstreamConfig;
use crate::server::model::restaurant::RestaurantQuery;

#[derive(Debug, Display, Error, PartialEq)]
pub(crate) enum UpstreamError {
    #[display("menu api timed out")]
    Timeout,
    #[display("menu api request failed: {_0}")]
    Request(#[error(not(source))] String),
    #[display("menu api responded with status {_0}")]
    Status(#[error(not(source))] u16),
    #[display("menu api returned malformed json: {_0}")]
    Decode(#[error(not(source))] String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            UpstreamError::Status(status.as_u16())
        } else {
            UpstreamError::Request(e.to_string())
        }
    }
}

/// Client for the third party restaurant menu api, built once and shared across requests
#[derive(Clone)]
pub(crate) struct MenuClient {
    http: Client,
    /// parsed template, placeholders still in its query values
    base: Url,
}

impl MenuClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, anyhow::Error> {
        let base = Url::parse(&config.url_template)
            .with_context(|| format!("invalid menu api url {}", config.url_template))?;
        if config.accept_invalid_certs {
            warn!("certificate validation is DISABLED for the menu api");
        }
        let http = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self { http, base })
    }

    /// Substitute the coordinates into the template's query values and append the
    /// restaurant id to the last one, percent encoded. Without a query the id becomes
    /// the last path segment.
    pub fn menu_url(&self, query: &RestaurantQuery) -> Url {
        // debug formatting keeps the fraction of whole coordinates, `12.0` not `12`
        let (lat, lng) = (format!("{:?}", query.latitude), format!("{:?}", query.longitude));
        let mut pairs: Vec<(String, String)> = self
            .base
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.replace("{lat}", &lat).replace("{lng}", &lng)))
            .collect();
        let mut url = self.base.clone();
        if let Some((_, last)) = pairs.last_mut() {
            last.push_str(&query.restaurant_id);
            url.query_pairs_mut().clear().extend_pairs(&pairs);
        } else if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&query.restaurant_id);
        }
        url
    }

    /// GET the raw menu document for one restaurant
    pub async fn fetch(&self, query: &RestaurantQuery) -> Result<Value, UpstreamError> {
        let url = self.menu_url(query);
        info!("fetching menu, url={}", url);
        let res = self.http.get(url).send().await?.error_for_status()?;
        // read as bytes first so a bad body is reported as a decode error
        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpResponse;
    use serde_json::json;
    use std::time::Duration;
    use crate::server::testing::{menu_client, spawn_menu_api};

    fn query() -> RestaurantQuery {
        RestaurantQuery {
            latitude: 12.9716,
            longitude: 77.5946,
            restaurant_id: "229".to_string(),
        }
    }

    #[test]
    fn url_substitutes_coordinates_and_appends_id() {
        let client = menu_client(UpstreamConfig::DEFAULT_URL_TEMPLATE, Duration::from_secs(1));
        assert_eq!(
            client.menu_url(&query()).as_str(),
            "https://foodfire.onrender.com/api/menu?page-type=REGULAR_MENU&complete-menu=true&lat=12.9716&lng=77.5946&restaurantId=229"
        );
    }

    #[test]
    fn url_encodes_restaurant_id() {
        let client = menu_client("http://menu.local/api?lat={lat}&lng={lng}&id=", Duration::from_secs(1));
        let query = RestaurantQuery {
            restaurant_id: "1&x=2 3".to_string(),
            ..query()
        };
        let url = client.menu_url(&query);
        assert_eq!(url.as_str(), "http://menu.local/api?lat=12.9716&lng=77.5946&id=1%26x%3D2+3");
        assert_eq!(url.query_pairs().count(), 3);
    }

    #[test]
    fn url_keeps_fraction_of_whole_coordinates() {
        let client = menu_client("http://menu.local/api?lat={lat}&lng={lng}&id=", Duration::from_secs(1));
        let query = RestaurantQuery {
            latitude: 12.0,
            longitude: -77.0,
            ..query()
        };
        assert_eq!(client.menu_url(&query).as_str(), "http://menu.local/api?lat=12.0&lng=-77.0&id=229");
    }

    #[test]
    fn url_without_query_appends_path_segment() {
        let client = menu_client("http://menu.local/restaurants/", Duration::from_secs(1));
        assert_eq!(client.menu_url(&query()).as_str(), "http://menu.local/restaurants/229");
    }

    #[test]
    fn invalid_template_is_rejected() {
        let config = UpstreamConfig {
            url_template: "not a url".to_string(),
            timeout: Duration::from_secs(1),
            accept_invalid_certs: false,
        };
        assert!(MenuClient::new(&config).is_err());
    }

    #[actix_web::test]
    async fn fetch_parses_json() {
        let base = spawn_menu_api(|| async { HttpResponse::Ok().json(json!({"data": {"cards": []}})) });
        let client = menu_client(&format!("{base}/menu?lat={{lat}}&lng={{lng}}&id="), Duration::from_secs(2));
        assert_eq!(client.fetch(&query()).await, Ok(json!({"data": {"cards": []}})));
    }

    #[actix_web::test]
    async fn fetch_reports_bad_body() {
        let base = spawn_menu_api(|| async { HttpResponse::Ok().body("<html>not json</html>") });
        let client = menu_client(&format!("{base}/menu?id="), Duration::from_secs(2));
        assert!(matches!(client.fetch(&query()).await, Err(UpstreamError::Decode(_))));
    }

    #[actix_web::test]
    async fn fetch_reports_status() {
        let base = spawn_menu_api(|| async { HttpResponse::NotFound().finish() });
        let client = menu_client(&format!("{base}/menu?id="), Duration::from_secs(2));
        assert_eq!(client.fetch(&query()).await, Err(UpstreamError::Status(404)));
    }

    #[actix_web::test]
    async fn fetch_times_out() {
        let base = spawn_menu_api(|| async {
            actix_web::rt::time::sleep(Duration::from_secs(5)).await;
            HttpResponse::Ok().json(json!({}))
        });
        let client = menu_client(&format!("{base}/menu?id="), Duration::from_millis(200));
        assert_eq!(client.fetch(&query()).await, Err(UpstreamError::Timeout));
    }

    #[actix_web::test]
    async fn unreachable_upstream_is_a_request_error() {
        // nothing listens on port 9 locally
        let client = menu_client("http://127.0.0.1:9/menu?id=", Duration::from_secs(2));
        assert!(matches!(client.fetch(&query()).await, Err(UpstreamError::Request(_))));
    }
}
