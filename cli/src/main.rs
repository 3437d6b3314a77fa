use clap::{Args, Parser, Subcommand};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

const SESSION_COOKIE: &str = "loremap-session";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; run `loremap login` and set LOREMAP_SESSION_TOKEN")]
    MissingSessionToken,
    #[error("coordinates must be within [0, 1]: ({x}, {y})")]
    OutOfRange { x: f64, y: f64 },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("server response did not set a session cookie")]
    NoSessionCookie,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "loremap", about = "Loremap pins API CLI")]
struct Cli {
    #[arg(long, env = "LOREMAP_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "LOREMAP_SESSION_TOKEN")]
    session_token: Option<String>,

    /// Log HTTP traffic to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Pins(PinsCommand),
    /// Log in as an editor and print the session token.
    Login {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, env = "LOREMAP_EDITOR_PASSWORD")]
        password: String,
    },
    Auth(AuthCommand),
}

#[derive(Args, Debug)]
struct PinsCommand {
    #[command(subcommand)]
    command: PinsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PinsSubcommand {
    List {
        /// Bypass the server-side pin cache.
        #[arg(long, default_value_t = false)]
        refresh: bool,
        /// Only show pins without a position.
        #[arg(long, default_value_t = false)]
        unplaced: bool,
    },
    Place {
        pin_id: String,
        x: f64,
        y: f64,
    },
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Status,
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let ctx = CliContext { base_url: cli.base_url, session_token: cli.session_token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Pins(pins) => run_pins(&ctx, pins).await,
        Command::Login { name, password } => run_login(&ctx, name, password).await,
        Command::Auth(auth) => run_auth(&ctx, auth).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let response = reqwest::Client::new().get(url(cli, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_pins(cli: &CliContext, pins: PinsCommand) -> Result<(), CliError> {
    match pins.command {
        PinsSubcommand::List { refresh, unplaced } => {
            let path = if refresh { "/api/pins?refresh=true" } else { "/api/pins" };
            let json = api_request(cli, reqwest::Method::GET, path, None, false).await?;
            let json = if unplaced { only_unplaced(json) } else { json };
            print_json(&json)
        }
        PinsSubcommand::Place { pin_id, x, y } => {
            if !in_unit_range(x) || !in_unit_range(y) {
                return Err(CliError::OutOfRange { x, y });
            }
            let body = serde_json::json!({ "pin_id": pin_id, "x": x, "y": y });
            let json = api_request(cli, reqwest::Method::POST, "/api/place", Some(body), true).await?;
            print_json(&json)
        }
    }
}

async fn run_login(cli: &CliContext, name: Option<String>, password: String) -> Result<(), CliError> {
    let body = serde_json::json!({ "name": name, "password": password });
    let response = reqwest::Client::new().post(url(cli, "/api/auth")).json(&body).send().await?;
    let status = response.status();
    let token = session_token_from_set_cookie(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok()),
    );
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&value) });
    }

    let token = token.ok_or(CliError::NoSessionCookie)?;
    let author = value.get("name").and_then(Value::as_str).unwrap_or("Anonymous");
    eprintln!("logged in as {author}");
    println!("export LOREMAP_SESSION_TOKEN={token}");
    Ok(())
}

async fn run_auth(cli: &CliContext, auth: AuthCommand) -> Result<(), CliError> {
    match auth.command {
        AuthSubcommand::Status => {
            let json = api_request(cli, reqwest::Method::GET, "/api/auth", None, false).await?;
            print_json(&json)
        }
        AuthSubcommand::Logout => {
            api_request(cli, reqwest::Method::POST, "/api/auth/logout", None, true).await?;
            println!("logged out");
            Ok(())
        }
    }
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
    require_session: bool,
) -> Result<Value, CliError> {
    let mut headers = HeaderMap::new();
    match cli.session_token.as_deref() {
        Some(token) => {
            headers.insert(COOKIE, HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}"))?);
        }
        None if require_session => return Err(CliError::MissingSessionToken),
        None => {}
    }

    let client = reqwest::Client::builder().default_headers(headers).build()?;
    let url = url(cli, path);
    debug!(%method, %url, "request");

    let request = client.request(method, &url);
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    debug!(status = status.as_u16(), "response");
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&value) });
    }

    Ok(value)
}

fn url(cli: &CliContext, path: &str) -> String {
    format!("{}{}", cli.base_url.trim_end_matches('/'), path)
}

fn in_unit_range(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Prefer the server's `{"error": ..}` message; fall back to the raw body.
fn error_message(value: &Value) -> String {
    value
        .get("error")
        .and_then(Value::as_str)
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}

/// Keep only pins whose `x` or `y` is missing or null.
fn only_unplaced(value: Value) -> Value {
    let Value::Array(pins) = value else {
        return value;
    };
    let is_unplaced = |pin: &Value| ["x", "y"].iter().any(|k| pin.get(k).is_none_or(Value::is_null));
    Value::Array(pins.into_iter().filter(is_unplaced).collect())
}

fn session_token_from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<String> {
    headers.into_iter().find_map(|raw| {
        let pair = raw.split(';').next()?.trim();
        let value = pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('=')?;
        (!value.is_empty()).then(|| value.to_owned())
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
