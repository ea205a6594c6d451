// ABOUTME: Tests for logging configuration and global subscriber installation
// ABOUTME: Environment parsing, filter construction, and single initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use hawkerlens::errors::ErrorCode;
use hawkerlens::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;
use std::env;

const LOGGING_VARS: [&str; 6] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_SPANS",
    "SERVICE_NAME",
];

fn clear_logging_env() {
    for key in LOGGING_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_development_defaults() {
    clear_logging_env();
    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, SERVICE_NAME);
    assert!(!config.include_location);
    assert!(!config.include_spans);
}

#[test]
#[serial]
fn test_production_enables_detail() {
    clear_logging_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");

    let config = LoggingConfig::from_env();
    clear_logging_env();

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");
    assert!(config.include_location);
    assert!(config.include_thread);
}

#[test]
#[serial]
fn test_unknown_format_falls_back_to_pretty() {
    clear_logging_env();
    env::set_var("LOG_FORMAT", "xml");
    let config = LoggingConfig::from_env();
    clear_logging_env();

    assert_eq!(config.format, LogFormat::Pretty);
}

#[test]
fn test_filter_keeps_configured_level() {
    let config = LoggingConfig {
        level: "warn".to_owned(),
        ..LoggingConfig::default()
    };
    let rendered = config.env_filter().to_string();
    assert!(rendered.contains("warn"));
    assert!(rendered.contains("redis=warn"));
}

#[test]
fn test_subscriber_installs_once() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    config.init().unwrap();
    let err = config.init().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}
