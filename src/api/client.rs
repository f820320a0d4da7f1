use crate::api::logging::{Endpoint, LoggingSettings};
use crate::api::models::{
    ApiErrorBody, CreateServiceInput, Service, ServiceDetail, StatusReply, UpdateVersionInput,
    Verification, Version,
};
use crate::constants;
use crate::error::Error;
use crate::logging::{get_max_body_len, log_request, log_response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// HTTP client for the configuration API. One instance per invocation.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

/// Installs the process-wide rustls crypto provider.
fn install_crypto_provider() {
    #[cfg(not(windows))]
    let provider = rustls::crypto::ring::default_provider();
    #[cfg(windows)]
    let provider = rustls::crypto::aws_lc_rs::default_provider();
    // Err means a provider is already installed.
    let _ = provider.install_default();
}

impl Client {
    /// Creates a client authenticating with `token` against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or not a valid header value,
    /// or if the HTTP client cannot be built.
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, Error> {
        if token.trim().is_empty() {
            return Err(Error::NoToken);
        }

        let mut key = HeaderValue::from_str(token.trim()).map_err(|_| {
            Error::Validation("API token contains characters not allowed in a header".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(constants::HEADER_API_KEY, key);
        headers.insert(ACCEPT, HeaderValue::from_static(constants::CONTENT_TYPE_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

        install_crypto_provider();
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.endpoint))
    }

    /// Sends the request and decodes a JSON reply, mapping non-2xx statuses
    /// to [`Error::Api`].
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, Error> {
        let request = builder.build()?;
        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(|b| String::from_utf8_lossy(b).to_string());
        log_request(
            request.method().as_str(),
            request.url().as_str(),
            request.headers(),
            body.as_deref(),
        );

        let start = Instant::now();
        let response = self.http.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        log_response(
            status.as_u16(),
            start.elapsed().as_millis(),
            &headers,
            &text,
            get_max_body_len(),
        );

        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_status(&self, builder: RequestBuilder) -> Result<(), Error> {
        let reply: StatusReply = self.send(builder).await?;
        if reply.status == "ok" {
            Ok(())
        } else {
            Err(anyhow::anyhow!("API replied with status '{}'", reply.status).into())
        }
    }

    /// Identifies the owner of the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn verify(&self) -> Result<Verification, Error> {
        self.send(self.request(Method::GET, "/verify")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_services(&self) -> Result<Vec<Service>, Error> {
        self.send(self.request(Method::GET, "/service")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the service does not exist.
    pub async fn get_service_details(&self, service_id: &str) -> Result<ServiceDetail, Error> {
        let path = format!("/service/{}/details", segment(service_id));
        self.send(self.request(Method::GET, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or no service has that name.
    pub async fn search_service(&self, name: &str) -> Result<Service, Error> {
        self.send(
            self.request(Method::GET, "/service/search")
                .query(&[("name", name)]),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_service(&self, input: &CreateServiceInput) -> Result<Service, Error> {
        self.send(self.request(Method::POST, "/service").form(input))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_service(&self, service_id: &str) -> Result<(), Error> {
        let path = format!("/service/{}", segment(service_id));
        self.send_status(self.request(Method::DELETE, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_versions(&self, service_id: &str) -> Result<Vec<Version>, Error> {
        let path = format!("/service/{}/version", segment(service_id));
        self.send(self.request(Method::GET, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_version(
        &self,
        service_id: &str,
        version: u32,
        input: &UpdateVersionInput,
    ) -> Result<Version, Error> {
        let path = version_path(service_id, version);
        self.send(self.request(Method::PUT, &path).form(input)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clone_version(&self, service_id: &str, version: u32) -> Result<Version, Error> {
        self.version_action(service_id, version, "clone").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn activate_version(&self, service_id: &str, version: u32) -> Result<Version, Error> {
        self.version_action(service_id, version, "activate").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn deactivate_version(
        &self,
        service_id: &str,
        version: u32,
    ) -> Result<Version, Error> {
        self.version_action(service_id, version, "deactivate").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn lock_version(&self, service_id: &str, version: u32) -> Result<Version, Error> {
        self.version_action(service_id, version, "lock").await
    }

    async fn version_action(
        &self,
        service_id: &str,
        version: u32,
        action: &str,
    ) -> Result<Version, Error> {
        let path = format!("{}/{action}", version_path(service_id, version));
        self.send(self.request(Method::PUT, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_logging<S: LoggingSettings>(
        &self,
        service_id: &str,
        version: u32,
    ) -> Result<Vec<Endpoint<S>>, Error> {
        let path = logging_path::<S>(service_id, version);
        self.send(self.request(Method::GET, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint does not exist.
    pub async fn get_logging<S: LoggingSettings>(
        &self,
        service_id: &str,
        version: u32,
        name: &str,
    ) -> Result<Endpoint<S>, Error> {
        let path = format!("{}/{}", logging_path::<S>(service_id, version), segment(name));
        self.send(self.request(Method::GET, &path)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_logging<S: LoggingSettings>(
        &self,
        service_id: &str,
        version: u32,
        settings: &S,
    ) -> Result<Endpoint<S>, Error> {
        let path = logging_path::<S>(service_id, version);
        self.send(self.request(Method::POST, &path).form(settings))
            .await
    }

    /// Replaces the settings of the endpoint currently called `name`. A
    /// different `settings.name()` renames it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_logging<S: LoggingSettings>(
        &self,
        service_id: &str,
        version: u32,
        name: &str,
        settings: &S,
    ) -> Result<Endpoint<S>, Error> {
        let path = format!("{}/{}", logging_path::<S>(service_id, version), segment(name));
        self.send(self.request(Method::PUT, &path).form(settings))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_logging<S: LoggingSettings>(
        &self,
        service_id: &str,
        version: u32,
        name: &str,
    ) -> Result<(), Error> {
        let path = format!("{}/{}", logging_path::<S>(service_id, version), segment(name));
        self.send_status(self.request(Method::DELETE, &path)).await
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn version_path(service_id: &str, version: u32) -> String {
    format!("/service/{}/version/{version}", segment(service_id))
}

fn logging_path<S: LoggingSettings>(service_id: &str, version: u32) -> String {
    format!("{}/logging/{}", version_path(service_id, version), S::KIND)
}

fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .msg
        .filter(|m| !m.is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    Error::Api {
        status: status.as_u16(),
        message,
        detail: parsed.detail.filter(|d| !d.is_empty()),
    }
}
