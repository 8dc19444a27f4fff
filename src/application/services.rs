use crate::domain::entities::{Request, Response};
use crate::domain::errors::CarError;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Sends one car API request and classifies the outcome
pub struct HttpRequestService {
    http_client: Box<dyn HttpClient>,
}

impl HttpRequestService {
    pub fn new(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Sends the request. Transport failures and non-2xx statuses both
    /// surface as `CarError::Remote`.
    pub async fn send_request(&self, request: Request) -> Result<Response, CarError> {
        RequestValidator::validate(&request)?;

        info!("{} {}", request.method, request.url.as_str());
        if let Some(body) = &request.body {
            debug!("request body: {}", body.0);
        }

        let response = self.http_client.send(request).await.map_err(|e| {
            warn!("request failed: {:#}", e);
            CarError::Remote {
                message: e.to_string(),
                response: None,
            }
        })?;

        debug!("response status: {}", response.status);
        if !response.status.is_success() {
            warn!("API answered {}", response.status);
            return Err(CarError::Remote {
                message: response.status.to_string(),
                response: Some(response.body).filter(|body| !body.is_empty()),
            });
        }

        Ok(response)
    }
}

/// Sanity rules every outgoing request must satisfy
pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(request: &Request) -> Result<()> {
        Self::validate_url(&request.url)?;
        Self::validate_method_body_combination(request)?;
        Ok(())
    }

    fn validate_url(url: &crate::domain::value_objects::Url) -> Result<()> {
        let url_str = url.as_str();

        if url_str.is_empty() {
            return Err(anyhow::anyhow!("URL cannot be empty"));
        }
        if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
            return Err(anyhow::anyhow!("URL must start with http:// or https://"));
        }
        Ok(())
    }

    fn validate_method_body_combination(request: &Request) -> Result<()> {
        if request.body.is_some() && !request.method.allows_body() {
            return Err(anyhow::anyhow!(
                "{} requests should not have a body",
                request.method
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Method;
    use crate::domain::value_objects::{JsonBody, Url};
    use hyper::StatusCode;

    fn request(method: Method, url: &str, body: Option<&str>) -> Request {
        Request {
            method,
            url: Url::new(url).unwrap(),
            headers: Vec::new(),
            body: body.map(|b| JsonBody::new(b).unwrap()),
        }
    }

    fn service_answering(status: StatusCode, body: &'static str) -> HttpRequestService {
        let mut client = MockHttpClient::new();
        client.expect_send().times(1).returning(move |_| {
            Ok(Response {
                status,
                body: body.to_string(),
            })
        });
        HttpRequestService::new(Box::new(client))
    }

    #[tokio::test]
    async fn success_passes_response_through() {
        let service = service_answering(StatusCode::OK, "[]");
        let response = service
            .send_request(request(Method::Get, "http://localhost:3000/api/car", None))
            .await
            .unwrap();
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn error_status_carries_response_text() {
        let service = service_answering(StatusCode::NOT_FOUND, "{\"error\":\"car not found\"}");
        let err = service
            .send_request(request(Method::Get, "http://localhost:3000/api/car/7", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "404 Not Found");
        assert_eq!(err.response_text(), Some("{\"error\":\"car not found\"}"));
    }

    #[tokio::test]
    async fn error_status_with_empty_body_has_no_text() {
        let service = service_answering(StatusCode::INTERNAL_SERVER_ERROR, "");
        let err = service
            .send_request(request(Method::Delete, "http://localhost:3000/api/car/7", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CarError::Remote { response: None, .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_remote_error() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let service = HttpRequestService::new(Box::new(client));

        let err = service
            .send_request(request(Method::Get, "http://localhost:3000/api/car", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CarError::Remote { response: None, .. }));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_client() {
        let mut client = MockHttpClient::new();
        client.expect_send().times(0);
        let service = HttpRequestService::new(Box::new(client));

        let err = service
            .send_request(request(Method::Get, "http://localhost/api/car", Some("{}")))
            .await
            .unwrap_err();
        assert!(matches!(err, CarError::Internal(_)));
    }

    #[test]
    fn validator_rules() {
        let post = request(Method::Post, "http://h/api/car", Some("{}"));
        assert!(RequestValidator::validate(&post).is_ok());

        let delete_with_body = request(Method::Delete, "http://h/api/car/1", Some("{}"));
        assert!(RequestValidator::validate(&delete_with_body).is_err());

        let relative = request(Method::Get, "/api/car", None);
        assert!(RequestValidator::validate(&relative).is_err());
    }
}
