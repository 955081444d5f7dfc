use log::warn;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::env_config::Config;

/// PostgREST code for a table missing from the schema cache.
const PGRST_UNDEFINED_TABLE: &str = "PGRST205";
/// PostgREST code for a function missing from the schema cache.
const PGRST_UNDEFINED_FUNCTION: &str = "PGRST202";
const PG_UNDEFINED_TABLE: &str = "42P01";
const PG_UNDEFINED_FUNCTION: &str = "42883";

/// Error body returned by PostgREST on a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

#[derive(Error, Debug)]
pub enum RestError {
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "{message} (status {status}, code {code})",
        message = .body.message,
        code = .body.code.as_deref().unwrap_or("none")
    )]
    Api { status: u16, body: ApiErrorBody },
}

impl RestError {
    pub fn code(&self) -> Option<&str> {
        match self {
            RestError::Api { body, .. } => body.code.as_deref(),
            _ => None,
        }
    }

    pub fn is_undefined_table(&self) -> bool {
        matches!(self.code(), Some(PGRST_UNDEFINED_TABLE | PG_UNDEFINED_TABLE))
    }

    pub fn is_undefined_function(&self) -> bool {
        matches!(self.code(), Some(PGRST_UNDEFINED_FUNCTION | PG_UNDEFINED_FUNCTION))
    }
}

/// Thin client for the Supabase REST (PostgREST) API.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    client: Client,
    url: String,
    key: String,
}

/// Creates a client scoped to the anonymous key.
pub fn create_public_client(config: &Config) -> SupabaseClient {
    create_client(&config.supabase.url, &config.supabase.anon_key)
}

/// Creates a client scoped to the service-role key.
/// Must never be handed to untrusted callers.
pub fn create_admin_client(config: &Config) -> SupabaseClient {
    create_client(&config.supabase.url, &config.supabase.service_role_key)
}

pub fn create_client(url: &str, key: &str) -> SupabaseClient {
    if url.is_empty() {
        warn!("Supabase URL is empty, REST calls will fail");
    }
    if key.is_empty() {
        warn!("Supabase key is empty, REST calls will fail");
    }
    SupabaseClient::new(url, key)
}

impl SupabaseClient {
    pub fn new(url: &str, key: &str) -> Self {
        SupabaseClient {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.url, path))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Calls a Postgres function exposed under `/rpc`.
    ///
    /// Functions returning `void` answer with an empty body, which decodes as
    /// JSON `null` (so `T = ()` works).
    pub async fn rpc<P, T>(&self, function: &str, params: &P) -> Result<T, RestError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, &format!("rpc/{}", function))
            .json(params)
            .send()
            .await?;
        decode(response).await
    }

    /// `GET /<table>?select=<columns>&<filters>`.
    ///
    /// Filters use PostgREST operators, e.g. `("amount", "eq.666")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, RestError> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", columns)])
            .query(filters)
            .send()
            .await?;
        decode(response).await
    }

    /// Inserts `rows`, merging with existing rows that collide on `on_conflict`.
    pub async fn upsert<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        on_conflict: &str,
    ) -> Result<(), RestError> {
        let response = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}

/// Builds an `in.(..)` filter value.
pub fn in_filter<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let joined = values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

async fn check(response: Response) -> Result<Response, RestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice::<ApiErrorBody>(&bytes).unwrap_or_else(|_| ApiErrorBody {
        message: String::from_utf8_lossy(&bytes).into_owned(),
        ..Default::default()
    });
    Err(RestError::Api {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RestError> {
    let bytes = check(response).await?.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, headers, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::env_config::SupabaseConfig;

    fn config(url: &str) -> Config {
        let mut config = Config::from_lookup(|_| None);
        config.supabase = SupabaseConfig {
            url: url.to_string(),
            anon_key: "anon-key".to_string(),
            service_role_key: "service-key".to_string(),
        };
        config
    }

    #[test]
    fn factories_pick_the_matching_credential() {
        let config = config("https://project.supabase.co/");
        let public = create_public_client(&config);
        let admin = create_admin_client(&config);

        assert_eq!(public.key, "anon-key");
        assert_eq!(admin.key, "service-key");
        assert_eq!(admin.url, "https://project.supabase.co");
    }

    #[test]
    fn empty_configuration_still_builds_a_client() {
        let client = create_admin_client(&Config::from_lookup(|_| None));
        assert_eq!(client.key, "");
        assert_eq!(client.url, "");
    }

    #[test]
    fn in_filter_joins_values() {
        assert_eq!(in_filter(["a", "b", "c"]), "in.(a,b,c)");
    }

    #[tokio::test]
    async fn rpc_posts_params_with_both_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/get_invoices_by_amount"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer service-key"))
            .and(body_json(json!({ "amount_param": 666 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "amount": 666, "name": "Evil Rabbit" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        let rows: Vec<serde_json::Value> = client
            .rpc("get_invoices_by_amount", &json!({ "amount_param": 666 }))
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({ "amount": 666, "name": "Evil Rabbit" })]);
    }

    #[tokio::test]
    async fn void_rpc_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/execute_sql"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        let result: Result<(), RestError> = client
            .rpc("execute_sql", &json!({ "sql": "SELECT 1" }))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn select_sends_columns_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/invoices"))
            .and(query_param("select", "amount,customer_id"))
            .and(query_param("amount", "eq.666"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        let rows: Vec<serde_json::Value> = client
            .select("invoices", "amount,customer_id", &[("amount", "eq.666".to_string())])
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn upsert_asks_for_merge_on_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/revenue"))
            .and(query_param("on_conflict", "month"))
            .and(headers(
                "prefer",
                vec!["resolution=merge-duplicates", "return=minimal"],
            ))
            .and(body_json(json!([{ "month": "Jan", "revenue": 2000 }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        client
            .upsert("revenue", &[json!({ "month": "Jan", "revenue": 2000 })], "month")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn api_errors_keep_their_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/create_table_if_not_exists"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "PGRST202",
                "message": "Could not find the function public.create_table_if_not_exists",
                "details": null,
                "hint": null
            })))
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        let error = client
            .rpc::<_, ()>("create_table_if_not_exists", &json!({}))
            .await
            .unwrap_err();

        assert!(error.is_undefined_function());
        assert!(!error.is_undefined_table());
        assert!(error.to_string().contains("PGRST202"));
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_the_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = create_admin_client(&config(&server.uri()));
        let error = client
            .select::<serde_json::Value>("users", "id", &[])
            .await
            .unwrap_err();

        match error {
            RestError::Api { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.message, "bad gateway");
                assert!(body.code.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
