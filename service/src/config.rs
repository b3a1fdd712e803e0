use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use secrecy::SecretString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default authorization server endpoints used by the local demo setup.
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "http://localhost:8002/authorize";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "http://localhost:8002/token";
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:8002/api/profile";

/// Lifetime of the access token cookie, counted from the moment it is issued.
pub const SESSION_COOKIE_TTL_SECS: u64 = 3600;

/// Value of the `SameSite` attribute attached to the session cookie when one is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CookieSameSite {
    Lax,
    Strict,
    None,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CookieSameSiteParseError;

impl FromStr for CookieSameSite {
    type Err = CookieSameSiteParseError;
    fn from_str(value: &str) -> Result<CookieSameSite, Self::Err> {
        match value.to_lowercase().as_str() {
            "lax" => Ok(CookieSameSite::Lax),
            "strict" => Ok(CookieSameSite::Strict),
            "none" => Ok(CookieSameSite::None),
            _ => Err(CookieSameSiteParseError),
        }
    }
}

impl fmt::Display for CookieSameSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CookieSameSite::Lax => write!(f, "Lax"),
            CookieSameSite::Strict => write!(f, "Strict"),
            CookieSameSite::None => write!(f, "None"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The client identifier registered with the authorization server
    #[arg(long, env, default_value = "demo")]
    client_id: String,

    /// The client secret registered with the authorization server
    #[arg(long, env, default_value = "demo", hide_default_value = true)]
    client_secret: SecretString,

    /// The redirect URI the authorization server sends the user back to
    #[arg(long, env, default_value = "http://oauth2-client.tld/callback")]
    redirect_uri: String,

    /// The authorization server's authorize endpoint
    #[arg(long, env, default_value = DEFAULT_AUTHORIZATION_ENDPOINT)]
    authorization_endpoint: String,

    /// The authorization server's token endpoint
    #[arg(long, env, default_value = DEFAULT_TOKEN_ENDPOINT)]
    token_endpoint: String,

    /// The protected API endpoint called with the stored access token
    #[arg(long, env, default_value = DEFAULT_API_ENDPOINT)]
    api_endpoint: String,

    /// The scope requested when redirecting to the authorization server
    #[arg(long, env, default_value = "profile")]
    scope: String,

    /// Timeout in seconds applied to every outbound call (token exchange and API call)
    #[arg(long, env, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Skip TLS certificate verification on outbound calls. Only meant for local
    /// demo setups with self-signed certificates.
    #[arg(long, env, default_value_t = false)]
    pub danger_accept_invalid_certs: bool,

    /// Mark the session cookie HttpOnly
    #[arg(long, env, default_value_t = false)]
    pub cookie_http_only: bool,

    /// Mark the session cookie Secure
    #[arg(long, env, default_value_t = false)]
    pub cookie_secure: bool,

    /// SameSite attribute for the session cookie. Omitted when not set.
    #[arg(
        long,
        env,
        value_parser = clap::builder::PossibleValuesParser::new([
            "LAX", "STRICT", "NONE",
            "Lax", "Strict", "None",
            "lax", "strict", "none"
        ])
            .map(|s| s.parse::<CookieSameSite>().unwrap()),
    )]
    pub cookie_same_site: Option<CookieSameSite>,

    /// Path to an HTML page shell containing a single `[BODY]` placeholder.
    /// The built-in shell is used when not set.
    #[arg(long, env)]
    page_template: Option<PathBuf>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the page template override, if configured.
    pub fn page_template(&self) -> Option<&Path> {
        self.page_template.as_deref()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn session_cookie_ttl(&self) -> Duration {
        Duration::from_secs(SESSION_COOKIE_TTL_SECS)
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }
}
