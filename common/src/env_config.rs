use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds the REST endpoint and its two credentials, the direct Postgres
/// connection string, and the HTTP server settings. Database values are
/// never validated here: an empty value produces a client that fails on
/// first use.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// Configuration for the Supabase REST endpoint.
    pub supabase: SupabaseConfig,
    /// Connection string for the direct Postgres client.
    pub postgres_url: String,
    /// Whether the direct Postgres connection must use TLS.
    pub postgres_require_ssl: bool,
    /// Which store the seeder writes through.
    pub seed_backend: SeedBackend,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger mirrors its output to.
    pub log_file: String,
}

#[derive(Clone, Debug, Default)]
/// Endpoint and credentials for the Supabase REST API.
pub struct SupabaseConfig {
    /// Base URL of the project, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous key, safe to hand to untrusted contexts.
    pub anon_key: String,
    /// Service-role key. Server-only.
    pub service_role_key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedBackend {
    Rest,
    Postgres,
}

impl SeedBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "pg" | "sql" => SeedBackend::Postgres,
            _ => SeedBackend::Rest,
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads a `.env` file first when one is present.
    ///
    /// # Environment Variables
    ///
    /// All optional:
    /// - `ENVIRONMENT`: "development" or "production" (default: "development")
    /// - `SUPABASE_URL` / `NEXT_PUBLIC_SUPABASE_URL`: REST endpoint (default: "")
    /// - `SUPABASE_ANON_KEY` / `NEXT_PUBLIC_SUPABASE_ANON_KEY`: anonymous key (default: "")
    /// - `SUPABASE_SERVICE_ROLE_KEY`: privileged key (default: "")
    /// - `POSTGRES_URL`: direct connection string (default: "")
    /// - `POSTGRES_REQUIRE_SSL`: (default: true)
    /// - `SEED_BACKEND`: "rest" or "postgres" (default: "rest")
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path (default: "dashboard.log")
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();
        Arc::new(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let first_of = |keys: &[&str]| {
            keys.iter()
                .find_map(|&key| lookup(key).filter(|value| !value.is_empty()))
                .unwrap_or_default()
        };

        Config {
            environment: var_or("ENVIRONMENT", "development"),
            supabase: SupabaseConfig {
                url: first_of(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
                anon_key: first_of(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
                service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            },
            postgres_url: var("POSTGRES_URL"),
            postgres_require_ssl: var_or("POSTGRES_REQUIRE_SSL", "true").to_lowercase() == "true",
            seed_backend: SeedBackend::parse(&var_or("SEED_BACKEND", "rest")),
            server_host: var_or("IP", "127.0.0.1"),
            server_port: var_or("PORT", "8080").parse().unwrap_or(8080),
            num_workers: var_or("WORKERS", "4").parse().unwrap_or(4),
            cors_allowed_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            console_logging_enabled: var_or("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
            log_file: var_or("LOG_FILE", "dashboard.log"),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
