//! PostgREST implementation of [`RowStore`].

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{parse_api_error, Query, RemoteError, RemoteResult, RowStore, Table};
use crate::config::ClientConfig;
use crate::util::is_http_url;

/// Authenticated handle to `<project>/rest/v1`.
///
/// Requests always send the public `apikey`; the bearer is the signed-in
/// user's access token when one is attached, otherwise the anon key.
#[derive(Clone)]
pub struct RestClient {
    rest_url: String,
    anon_key: String,
    access_token: Option<String>,
    client: Client,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> RemoteResult<Self> {
        Self::from_parts(config.rest_url(), config.supabase_anon_key())
    }

    pub fn from_parts(rest_url: impl AsRef<str>, anon_key: impl Into<String>) -> RemoteResult<Self> {
        let rest_url = rest_url.as_ref().trim().trim_end_matches('/').to_string();
        if !is_http_url(&rest_url) {
            return Err(RemoteError::InvalidConfiguration(
                "REST URL must include http:// or https://",
            ));
        }
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(RemoteError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            rest_url,
            anon_key,
            access_token: None,
            client: Client::builder().build()?,
        })
    }

    /// Attach the current session's access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.client
            .request(method, format!("{}/{}", self.rest_url, table.as_str()))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }
        Ok(response)
    }
}

impl RowStore for RestClient {
    async fn select<T: DeserializeOwned>(&self, table: Table, query: &Query) -> RemoteResult<Vec<T>> {
        tracing::debug!(%table, filters = ?query.filters(), "select");
        let request = self
            .request(Method::GET, table)
            .query(&[("select", "*")])
            .query(&query.to_query_pairs());
        Ok(Self::send(request).await?.json::<Vec<T>>().await?)
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &B,
    ) -> RemoteResult<T> {
        tracing::debug!(%table, "insert");
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row);
        let mut rows = Self::send(request).await?.json::<Vec<T>>().await?;
        if rows.is_empty() {
            return Err(RemoteError::EmptyResponse(table));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        filter: &Query,
        patch: &B,
    ) -> RemoteResult<Vec<T>> {
        tracing::debug!(%table, filters = ?filter.filters(), "update");
        let request = self
            .request(Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&filter.to_query_pairs())
            .json(patch);
        Ok(Self::send(request).await?.json::<Vec<T>>().await?)
    }

    async fn delete(&self, table: Table, filter: &Query) -> RemoteResult<()> {
        tracing::debug!(%table, filters = ?filter.filters(), "delete");
        let request = self
            .request(Method::DELETE, table)
            .header("Prefer", "return=minimal")
            .query(&filter.to_query_pairs());
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::testing::spawn_one_shot_server;

    async fn spawn_rest_server(
        status_line: &str,
        body: &str,
    ) -> (String, tokio::sync::oneshot::Receiver<String>) {
        let (base_url, request_rx) = spawn_one_shot_server(status_line, body).await;
        (format!("{base_url}/rest/v1"), request_rx)
    }

    const TASK_ROW: &str = r#"[{
        "id": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
        "user_id": "user-1",
        "title": "Read chapter 3",
        "completed": false,
        "created_at": "2026-10-19T08:00:00.000000+00:00"
    }]"#;

    #[test]
    fn from_parts_rejects_invalid_configuration() {
        assert!(RestClient::from_parts("demo.supabase.co/rest/v1", "anon").is_err());
        assert!(RestClient::from_parts("https://demo.supabase.co/rest/v1", "  ").is_err());
    }

    #[tokio::test]
    async fn select_sends_owner_filter_and_auth_headers() {
        let (url, request_rx) = spawn_rest_server("200 OK", TASK_ROW).await;
        let client = RestClient::from_parts(url, "anon-key")
            .unwrap()
            .with_access_token("user-token");

        let tasks: Vec<Task> = client
            .select(
                Table::Tasks,
                &Query::owned_by("user-1").order_desc("created_at"),
            )
            .await
            .unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Read chapter 3");

        let request = request_rx.await.unwrap();
        let request_line = request.lines().next().unwrap_or_default().to_string();
        assert!(request_line.starts_with("GET /rest/v1/tasks?"));
        assert!(request_line.contains("user_id=eq.user-1"));
        assert!(request_line.contains("order=created_at.desc"));
        let lowered = request.to_ascii_lowercase();
        assert!(lowered.contains("apikey: anon-key"));
        assert!(lowered.contains("authorization: bearer user-token"));
    }

    #[tokio::test]
    async fn insert_returns_the_stored_row() {
        let (url, request_rx) = spawn_rest_server("201 Created", TASK_ROW).await;
        let client = RestClient::from_parts(url, "anon-key").unwrap();

        let task: Task = client
            .insert(
                Table::Tasks,
                &crate::models::NewTask {
                    user_id: "user-1",
                    title: "Read chapter 3",
                },
            )
            .await
            .unwrap();
        assert_eq!(task.user_id, "user-1");

        let request = request_rx.await.unwrap();
        assert!(request.starts_with("POST /rest/v1/tasks"));
        assert!(request.to_ascii_lowercase().contains("prefer: return=representation"));
        assert!(request.contains("\"title\":\"Read chapter 3\""));
    }

    #[tokio::test]
    async fn insert_without_returned_row_is_an_error() {
        let (url, _request_rx) = spawn_rest_server("201 Created", "[]").await;
        let client = RestClient::from_parts(url, "anon-key").unwrap();

        let error = client
            .insert::<_, Task>(
                Table::Tasks,
                &crate::models::NewTask {
                    user_id: "user-1",
                    title: "x",
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(error, RemoteError::EmptyResponse(Table::Tasks)));
    }

    #[tokio::test]
    async fn api_errors_carry_status_and_message() {
        let (url, _request_rx) = spawn_rest_server(
            "409 Conflict",
            r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
        )
        .await;
        let client = RestClient::from_parts(url, "anon-key").unwrap();

        let error = client
            .delete(Table::Notes, &Query::owned_by("user-1"))
            .await
            .unwrap_err();
        assert!(error.is_conflict());
        assert!(error.to_string().contains("duplicate key value"));
    }

    #[tokio::test]
    async fn refused_connection_is_classified_as_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = RestClient::from_parts(format!("http://{address}/rest/v1"), "anon").unwrap();
        let error = client
            .select::<Task>(Table::Tasks, &Query::owned_by("user-1"))
            .await
            .unwrap_err();
        assert!(error.is_connection());
    }
}
