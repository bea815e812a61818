//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they do not
//! observe each other's overrides.

use fhir_etl::config::{load_config, load_config_or_default, DatabaseTarget};
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "FHIR_ETL_APPLICATION_LOG_LEVEL",
    "FHIR_ETL_PIPELINE_INPUT_DIR",
    "FHIR_ETL_PIPELINE_POLL_INTERVAL_SECONDS",
    "FHIR_ETL_DATABASE_TARGET",
    "FHIR_ETL_SQLITE_PATH",
    "FHIR_ETL_POSTGRESQL_MAX_CONNECTIONS",
    "FHIR_ETL_LOGGING_LOCAL_ENABLED",
    "FHIR_ETL_LOGGING_LOCAL_PATH",
    "DATABASE_HOSTNAME",
    "DATABASE_PORT",
    "DATABASE_NAME",
    "DATABASE_USERNAME",
    "DATABASE_PASSWORD",
    "DATABASE_URL",
    "TEST_FHIR_ETL_PG_PASSWORD",
];

fn cleanup_env_vars() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
database_target = "postgresql"

[application]
log_level = "debug"

[pipeline]
input_dir = "/var/lib/fhir-etl/inbox"
poll_interval_seconds = 5
file_extension = "ndjson"

[postgresql]
host = "db.internal"
port = 5432
database = "warehouse"
username = "etl"
password = "s3cret"
max_connections = 4

[logging]
local_enabled = true
local_path = "/tmp/fhir-etl-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.pipeline.input_dir, PathBuf::from("/var/lib/fhir-etl/inbox"));
    assert_eq!(config.pipeline.poll_interval_seconds, 5);
    assert_eq!(config.pipeline.file_extension, "ndjson");
    assert_eq!(config.database_target, DatabaseTarget::PostgreSQL);

    let pg = config.postgresql_or_default();
    assert_eq!(pg.host, "db.internal");
    assert_eq!(pg.port, 5432);
    assert_eq!(pg.database, "warehouse");
    assert_eq!(pg.username, "etl");
    assert_eq!(pg.password.unwrap().expose_secret().as_str(), "s3cret");
    assert_eq!(pg.max_connections, 4);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.pipeline.input_dir, PathBuf::from("data"));
    assert_eq!(config.pipeline.poll_interval_seconds, 1);
    assert_eq!(config.pipeline.file_extension, "json");
    assert_eq!(config.database_target, DatabaseTarget::PostgreSQL);

    let pg = config.postgresql_or_default();
    assert_eq!(pg.host, "localhost");
    assert_eq!(pg.port, 5433);
    assert_eq!(pg.database, "patientdata");
    assert_eq!(pg.username, "postgres");
    assert!(pg.password.is_none());

    assert_eq!(config.sqlite_or_default().path, "fhir-etl.db");
}

#[test]
fn test_sqlite_target() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
database_target = "sqlite"

[sqlite]
path = ":memory:"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.database_target, DatabaseTarget::SQLite);
    assert!(config.sqlite_or_default().is_memory());
}

#[test]
fn test_database_env_vars_override_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DATABASE_HOSTNAME", "pg.example.org");
    std::env::set_var("DATABASE_PORT", "6543");
    std::env::set_var("DATABASE_NAME", "fhir");
    std::env::set_var("DATABASE_USERNAME", "loader");
    std::env::set_var("DATABASE_PASSWORD", "from-env");

    let file = write_config(
        r#"
[postgresql]
host = "ignored"
database = "ignored"
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();

    let pg = config.unwrap().postgresql_or_default();
    assert_eq!(pg.host, "pg.example.org");
    assert_eq!(pg.port, 6543);
    assert_eq!(pg.database, "fhir");
    assert_eq!(pg.username, "loader");
    assert_eq!(pg.password.as_ref().unwrap().expose_secret().as_str(), "from-env");
    assert_eq!(pg.describe(), "postgresql://loader@pg.example.org:6543/fhir");
}

#[test]
fn test_database_url_hides_credentials() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DATABASE_URL", "postgresql://etl:hunter2@db:5432/fhir");
    let config = load_config_or_default(Some(write_config("").path()));
    cleanup_env_vars();

    let pg = config.unwrap().postgresql_or_default();
    assert_eq!(pg.describe(), "postgresql://***@db:5432/fhir");
    assert!(pg.to_pg_config().is_ok());
}

#[test]
fn test_fhir_etl_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("FHIR_ETL_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("FHIR_ETL_PIPELINE_INPUT_DIR", "/srv/bundles");
    std::env::set_var("FHIR_ETL_PIPELINE_POLL_INTERVAL_SECONDS", "30");
    std::env::set_var("FHIR_ETL_DATABASE_TARGET", "sqlite");
    std::env::set_var("FHIR_ETL_SQLITE_PATH", "/srv/fhir.db");

    let file = write_config("[application]\nlog_level = \"debug\"\n");
    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.pipeline.input_dir, PathBuf::from("/srv/bundles"));
    assert_eq!(config.pipeline.poll_interval_seconds, 30);
    assert_eq!(config.database_target, DatabaseTarget::SQLite);
    assert_eq!(config.sqlite_or_default().path, "/srv/fhir.db");
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_FHIR_ETL_PG_PASSWORD", "substituted");
    let file = write_config(
        r#"
# password = "${NOT_SET_ANYWHERE}"
[postgresql]
password = "${TEST_FHIR_ETL_PG_PASSWORD}"
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();

    let pg = config.unwrap().postgresql_or_default();
    assert_eq!(pg.password.unwrap().expose_secret().as_str(), "substituted");
}

#[test]
fn test_missing_substitution_variable() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[postgresql]\npassword = \"${TEST_FHIR_ETL_PG_PASSWORD}\"\n");
    let err = load_config(file.path()).unwrap_err();

    assert!(err.to_string().contains("TEST_FHIR_ETL_PG_PASSWORD"));
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"verbose\"\n",
        "[pipeline]\npoll_interval_seconds = 0\n",
        "[pipeline]\nfile_extension = \".json\"\n",
        "[postgresql]\nmax_connections = 0\n",
        "[postgresql]\nconnection_string = \"mysql://db/fhir\"\n",
        "database_target = \"mysql\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_bad_env_value_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DATABASE_PORT", "not-a-port");
    let result = load_config(write_config("").path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("DATABASE_PORT"));
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/fhir-etl.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}
