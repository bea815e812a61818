//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, EtlConfig, SqliteConfig};
use crate::config::secret_string;
use crate::domain::{IngestError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fhir-etl.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`EtlConfig`]
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use fhir_etl::config::load_config;
///
/// let config = load_config("fhir-etl.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EtlConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IngestError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        IngestError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    finish(config)
}

/// Loads `path` if given, otherwise `fhir-etl.toml` if it exists, otherwise
/// the built-in defaults. Environment overrides apply in every case.
///
/// # Errors
///
/// Returns an error if an explicit `path` does not exist or any loaded
/// configuration fails validation.
pub fn load_config_or_default(path: Option<&Path>) -> Result<EtlConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(EtlConfig::default())
        }
    }
}

/// Parses TOML text after `${VAR}` substitution, without overrides or validation
pub fn parse_config(contents: &str) -> Result<EtlConfig> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| IngestError::Configuration(format!("Failed to parse TOML: {e}")))
}

fn finish(mut config: EtlConfig) -> Result<EtlConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        IngestError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| IngestError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Placeholders inside comments are left alone
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(IngestError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env(name) {
        Some(val) => val.parse().map(Some).map_err(|_| {
            IngestError::Configuration(format!("Invalid value '{val}' for {name}"))
        }),
        None => Ok(None),
    }
}

/// Applies environment variable overrides
///
/// `FHIR_ETL_<SECTION>_<KEY>` variables override the matching file setting.
/// The `DATABASE_HOSTNAME`, `DATABASE_PORT`, `DATABASE_NAME`,
/// `DATABASE_USERNAME`, `DATABASE_PASSWORD` and `DATABASE_URL` variables
/// configure PostgreSQL directly and take precedence over the file.
fn apply_env_overrides(config: &mut EtlConfig) -> Result<()> {
    if let Some(val) = env("FHIR_ETL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env("FHIR_ETL_PIPELINE_INPUT_DIR") {
        config.pipeline.input_dir = val.into();
    }
    if let Some(interval) = parse_env("FHIR_ETL_PIPELINE_POLL_INTERVAL_SECONDS")? {
        config.pipeline.poll_interval_seconds = interval;
    }

    if let Some(val) = env("FHIR_ETL_DATABASE_TARGET") {
        config.database_target = DatabaseTarget::from_str(&val)?;
    }

    if let Some(val) = env("FHIR_ETL_SQLITE_PATH") {
        config.sqlite.get_or_insert_with(SqliteConfig::default).path = val;
    }

    let pg_vars = [
        "DATABASE_HOSTNAME",
        "DATABASE_PORT",
        "DATABASE_NAME",
        "DATABASE_USERNAME",
        "DATABASE_PASSWORD",
        "DATABASE_URL",
        "FHIR_ETL_POSTGRESQL_MAX_CONNECTIONS",
    ];
    if pg_vars.iter().any(|name| env(name).is_some()) {
        let pg = config.postgresql.get_or_insert_with(Default::default);
        if let Some(val) = env("DATABASE_HOSTNAME") {
            pg.host = val;
        }
        if let Some(port) = parse_env("DATABASE_PORT")? {
            pg.port = port;
        }
        if let Some(val) = env("DATABASE_NAME") {
            pg.database = val;
        }
        if let Some(val) = env("DATABASE_USERNAME") {
            pg.username = val;
        }
        if let Some(val) = env("DATABASE_PASSWORD") {
            pg.password = Some(secret_string(val));
        }
        if let Some(val) = env("DATABASE_URL") {
            pg.set_connection_string(val);
        }
        if let Some(max) = parse_env("FHIR_ETL_POSTGRESQL_MAX_CONNECTIONS")? {
            pg.max_connections = max;
        }
    }

    if let Some(enabled) = parse_env("FHIR_ETL_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = env("FHIR_ETL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
