//! # Demo Records
//!
//! Record kinds the CLI can check documents against. They exercise every
//! adapter family: bounded scalars, field-level constraints, enumerations,
//! optional maps, lists, nested records and whitelisted vectors.

use std::collections::BTreeMap;

use clap::ValueEnum;
use yamlmeta_schema::{
    field, record, schema_enum, BoundedInt, BoundedString, FieldInfo, Length, Range, Record,
    Whitelist, WhitelistVector,
};

/// Deployment targets a [`ServiceConfig`] may list.
pub const ENVIRONMENTS: [&str; 3] = ["dev", "staging", "prod"];

/// A person with bounded name, age and score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: BoundedString<1, 100>,
    pub age: BoundedInt<0, 150>,
    pub score: BoundedInt<0, 100>,
}

record!(Person {
    field!(Person, name, "Full name", Required),
    field!(Person, age, "Age in years", Required),
    field!(Person, score, "Score out of 100", Optional),
});

/// A user account with plain fields and field-level constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub active: bool,
}

record!(User {
    field!(User, username, "User login name", Required).with_constraint(Length::new(1, 32)),
    field!(User, email, "User email address", Required).with_constraint(Length::new(5, 255)),
    field!(User, age, "User age in years", Required).with_constraint(Range::new(0, 150)),
    field!(User, active, "Is user account active", Required),
});

/// Application log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

schema_enum!(LogLevel {
    Debug => "debug",
    Info => "info",
    Warning => "warning",
    Error => "error",
    Fatal => "fatal",
});

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub log_level: LogLevel,
    pub max_connections: i32,
    pub timeout_seconds: f64,
    pub env_vars: Option<BTreeMap<String, String>>,
}

record!(AppConfig {
    field!(AppConfig, app_name, "Application name", Required).with_constraint(Length::new(1, 64)),
    field!(AppConfig, log_level, "Logging level", Required),
    field!(AppConfig, max_connections, "Maximum concurrent connections", Required)
        .with_constraint(Range::new(1, 10000)),
    field!(AppConfig, timeout_seconds, "Request timeout in seconds", Required)
        .with_constraint(Range::new(0.1, 3600.0)),
    field!(AppConfig, env_vars, "Environment variables", Optional),
});

/// Database connection settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: i32,
    pub database: String,
    pub backup_hosts: Vec<String>,
}

record!(DatabaseConfig {
    field!(DatabaseConfig, host, "Database host", Required).with_constraint(Length::new(1, 255)),
    field!(DatabaseConfig, port, "Database port", Required).with_constraint(Range::new(1, 65535)),
    field!(DatabaseConfig, database, "Database name", Required).with_constraint(Length::new(1, 64)),
    field!(DatabaseConfig, backup_hosts, "Backup database hosts", Optional)
        .with_constraint(Length::new(0, 5)),
});

/// A service with nested database and application settings.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
    pub db: DatabaseConfig,
    pub app: AppConfig,
    pub features: Vec<String>,
    pub environments: WhitelistVector<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            db: DatabaseConfig::default(),
            app: AppConfig::default(),
            features: Vec::new(),
            environments: WhitelistVector::with_allowed(Whitelist::new(ENVIRONMENTS)),
        }
    }
}

record!(ServiceConfig {
    field!(ServiceConfig, service_name, "Service identifier", Required)
        .with_constraint(Length::new(1, 128)),
    field!(ServiceConfig, db => "database", "Database configuration", Required),
    field!(ServiceConfig, app => "application", "Application configuration", Required),
    field!(ServiceConfig, features, "Enabled features", Optional)
        .with_constraint(Length::new(0, 50)),
    field!(ServiceConfig, environments, "Deployment targets", Optional),
});

/// Log severity, spelled in upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

schema_enum!(Severity {
    Debug => "DEBUG",
    Info => "INFO",
    Warning => "WARNING",
    Error => "ERROR",
});

/// One structured log line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEntry {
    pub message: String,
    pub level: Severity,
    pub line_number: i64,
}

record!(LogEntry {
    field!(LogEntry, message, "Log message", Required),
    field!(LogEntry, level, "Log level", Required),
    field!(LogEntry, line_number, "Line number", Required),
});

/// Record kinds selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Person,
    User,
    AppConfig,
    DatabaseConfig,
    ServiceConfig,
    LogEntry,
}

impl RecordKind {
    /// Name of the record type.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Person => Person::schema().type_name(),
            Self::User => User::schema().type_name(),
            Self::AppConfig => AppConfig::schema().type_name(),
            Self::DatabaseConfig => DatabaseConfig::schema().type_name(),
            Self::ServiceConfig => ServiceConfig::schema().type_name(),
            Self::LogEntry => LogEntry::schema().type_name(),
        }
    }

    /// Descriptor summary of the record type.
    pub fn describe(self) -> Vec<FieldInfo> {
        match self {
            Self::Person => Person::schema().describe(),
            Self::User => User::schema().describe(),
            Self::AppConfig => AppConfig::schema().describe(),
            Self::DatabaseConfig => DatabaseConfig::schema().describe(),
            Self::ServiceConfig => ServiceConfig::schema().describe(),
            Self::LogEntry => LogEntry::schema().describe(),
        }
    }
}
