use crate::constants::api;
use crate::errors::{ClockodoError, ClockodoResult};
use crate::models::{
    wire_fields, wire_query_pairs, ClockResponse, ClockStartResponse, ClockStop,
    CreateEntryParams, Customer, CustomersResponse, DeleteResponse, EditEntryParams, EntriesPage,
    EntryResponse, ListEntriesParams, ListProjectsParams, Project, ProjectsResponse, Service,
    ServicesResponse, StartClockParams, TimeEntry, User, UsersResponse,
};
use crate::services::config::ClockodoConfig;
use crate::services::logger::Logger;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

/// Authenticated client for the Clockodo REST API. Holds no state between calls
/// beyond the immutable credentials and the connection pool.
#[derive(Debug, Clone)]
pub struct ClockodoClient {
    logger: Logger,
    config: ClockodoConfig,
    http: Client,
    headers: HeaderMap,
}

impl ClockodoClient {
    pub fn new(logger: Logger, config: ClockodoConfig) -> ClockodoResult<Self> {
        let headers = build_headers(&config)?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClockodoError::Request(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self {
            logger: logger.child("client"),
            config,
            http,
            headers,
        })
    }

    pub fn config(&self) -> &ClockodoConfig {
        &self.config
    }

    pub async fn list_entries(&self, params: &ListEntriesParams) -> ClockodoResult<EntriesPage> {
        self.send(Method::GET, api::PATH_ENTRIES, Some(wire_fields(params)?))
            .await
    }

    pub async fn create_entry(&self, params: &CreateEntryParams) -> ClockodoResult<TimeEntry> {
        let response: EntryResponse = self
            .send(Method::POST, api::PATH_ENTRIES, Some(wire_fields(params)?))
            .await?;
        Ok(response.entry)
    }

    pub async fn edit_entry(&self, id: u64, params: &EditEntryParams) -> ClockodoResult<TimeEntry> {
        let path = format!("{}/{}", api::PATH_ENTRIES, id);
        let response: EntryResponse = self
            .send(Method::PUT, &path, Some(wire_fields(params)?))
            .await?;
        Ok(response.entry)
    }

    pub async fn delete_entry(&self, id: u64) -> ClockodoResult<bool> {
        let path = format!("{}/{}", api::PATH_ENTRIES, id);
        let response: DeleteResponse = self.send(Method::DELETE, &path, None).await?;
        Ok(response.success)
    }

    pub async fn list_users(&self) -> ClockodoResult<Vec<User>> {
        let response: UsersResponse = self.send(Method::GET, api::PATH_USERS, None).await?;
        Ok(response.users)
    }

    pub async fn list_customers(&self) -> ClockodoResult<Vec<Customer>> {
        let response: CustomersResponse =
            self.send(Method::GET, api::PATH_CUSTOMERS, None).await?;
        Ok(response.customers)
    }

    pub async fn list_projects(&self, customers_id: Option<u64>) -> ClockodoResult<Vec<Project>> {
        let params = ListProjectsParams { customers_id };
        let response: ProjectsResponse = self
            .send(Method::GET, api::PATH_PROJECTS, Some(wire_fields(&params)?))
            .await?;
        Ok(response.projects)
    }

    pub async fn list_services(&self) -> ClockodoResult<Vec<Service>> {
        let response: ServicesResponse = self.send(Method::GET, api::PATH_SERVICES, None).await?;
        Ok(response.services)
    }

    pub async fn get_running_clock(&self) -> ClockodoResult<Option<TimeEntry>> {
        let response: ClockResponse = self.send(Method::GET, api::PATH_CLOCK, None).await?;
        Ok(response.running)
    }

    pub async fn start_clock(&self, params: &StartClockParams) -> ClockodoResult<TimeEntry> {
        let response: ClockStartResponse = self
            .send(Method::POST, api::PATH_CLOCK, Some(wire_fields(params)?))
            .await?;
        Ok(response.running)
    }

    pub async fn stop_clock(&self, id: u64) -> ClockodoResult<ClockStop> {
        let path = format!("{}/{}", api::PATH_CLOCK, id);
        self.send(Method::DELETE, &path, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        fields: Option<Map<String, Value>>,
    ) -> ClockodoResult<T> {
        let mut url = self
            .config
            .endpoint(path)
            .map_err(|err| ClockodoError::Request(format!("invalid URL for {}: {}", path, err)))?;

        let mut body = None;
        if method == Method::GET {
            if let Some(fields) = fields.as_ref().filter(|f| !f.is_empty()) {
                url.query_pairs_mut().extend_pairs(wire_query_pairs(fields));
            }
        } else if method == Method::POST || method == Method::PUT {
            body = fields.map(Value::Object);
        }

        let mut req = self
            .http
            .request(method.clone(), url)
            .headers(self.headers.clone());
        if let Some(body) = body.as_ref() {
            req = req.json(body);
        }

        let started = Instant::now();
        let response = req.send().await.map_err(|err| {
            self.logger.warn(
                "request failed",
                Some(&serde_json::json!({
                    "method": method.as_str(),
                    "path": path,
                    "error": err.to_string(),
                })),
            );
            ClockodoError::from(err)
        })?;
        let status = response.status();
        let text = response.text().await?;
        self.logger.debug(
            "request",
            Some(&serde_json::json!({
                "method": method.as_str(),
                "path": path,
                "status": status.as_u16(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );

        if !status.is_success() {
            return Err(ClockodoError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|source| ClockodoError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

fn build_headers(config: &ClockodoConfig) -> ClockodoResult<HeaderMap> {
    let pairs = [
        (api::HEADER_API_USER, config.api_user.as_str(), false),
        (api::HEADER_API_KEY, config.api_key(), true),
        (
            api::HEADER_EXTERNAL_APPLICATION,
            config.external_application.as_str(),
            false,
        ),
    ];
    let mut headers = HeaderMap::new();
    for (name, value, sensitive) in pairs {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClockodoError::Request(format!("invalid header name {}", name)))?;
        let mut value = HeaderValue::from_str(value).map_err(|_| {
            ClockodoError::Request(format!("{} contains characters not allowed in headers", name))
        })?;
        value.set_sensitive(sensitive);
        headers.insert(header, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}
