//! CLI integration tests
//!
//! Parsing of the agent and reporter subcommands and their environment
//! variable fallbacks.

use clap::Parser;
use serial_test::serial;
use telemetry_client::cli::reporter::ReporterCommand;
use telemetry_client::cli::{Cli, Commands, SchemaVersion};

/// --version output is available
#[test]
fn test_version_available() {
    let result = Cli::try_parse_from(["telemetry-client", "--version"]);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

/// --help is available
#[test]
fn test_help_available() {
    let result = Cli::try_parse_from(["telemetry-client", "--help"]);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

/// reporter requires a destination
#[test]
fn test_reporter_requires_destination() {
    assert!(Cli::try_parse_from(["telemetry-client", "reporter"]).is_err());
}

/// client UUID falls back to CLIENT_UUID
#[test]
#[serial]
fn test_client_uuid_from_env() {
    std::env::set_var("CLIENT_UUID", "from-env");

    let cli = Cli::try_parse_from(["telemetry-client", "reporter", "stdout"]).unwrap();
    let Commands::Reporter(args) = cli.command else {
        panic!("expected reporter");
    };
    let ReporterCommand::Stdout(args) = args.command else {
        panic!("expected stdout");
    };
    assert_eq!(args.client_uuid, "from-env");
    assert_eq!(args.report_version, SchemaVersion::V2);

    std::env::remove_var("CLIENT_UUID");
}

/// client UUID is mandatory
#[test]
#[serial]
fn test_client_uuid_required() {
    std::env::remove_var("CLIENT_UUID");
    assert!(Cli::try_parse_from(["telemetry-client", "reporter", "stdout"]).is_err());
}

/// http destination needs a URL, from the flag or TELEMETRY_REPORT_URL
#[test]
#[serial]
fn test_report_url_from_env() {
    std::env::remove_var("TELEMETRY_REPORT_URL");
    assert!(Cli::try_parse_from([
        "telemetry-client",
        "reporter",
        "http",
        "--client-uuid",
        "c1"
    ])
    .is_err());

    std::env::set_var("TELEMETRY_REPORT_URL", "https://collector.example.com/");
    let cli = Cli::try_parse_from(["telemetry-client", "reporter", "http", "--client-uuid", "c1"])
        .unwrap();
    let Commands::Reporter(args) = cli.command else {
        panic!("expected reporter");
    };
    let ReporterCommand::Http(args) = args.command else {
        panic!("expected http");
    };
    assert_eq!(args.url, "https://collector.example.com/");

    std::env::remove_var("TELEMETRY_REPORT_URL");
}

/// record directory falls back to TELEMETRY_RECORD_DIR
#[test]
#[serial]
fn test_record_dir_from_env() {
    std::env::set_var("TELEMETRY_RECORD_DIR", "/data/records");

    let cli = Cli::try_parse_from(["telemetry-client", "kubermatic-agent"]).unwrap();
    let Commands::KubermaticAgent(args) = cli.command else {
        panic!("expected kubermatic-agent");
    };
    assert_eq!(args.record_dir.to_str(), Some("/data/records"));

    std::env::remove_var("TELEMETRY_RECORD_DIR");
}
