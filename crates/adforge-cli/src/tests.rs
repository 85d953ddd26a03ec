use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["adforge-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.url_overrides().is_empty());
}

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["adforge-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Run)));
}

#[test]
fn url_flags_become_config_overrides() {
    let cli = Cli::try_parse_from([
        "adforge-cli",
        "run",
        "--discovery-url",
        "https://hooks.example.com/ads",
        "--generation-url",
        "https://hooks.example.com/content",
    ])
    .expect("expected valid cli args");

    let overrides = cli.url_overrides();
    assert_eq!(
        overrides.get("ADFORGE_DISCOVERY_URL").map(String::as_str),
        Some("https://hooks.example.com/ads")
    );
    assert_eq!(
        overrides.get("ADFORGE_GENERATION_URL").map(String::as_str),
        Some("https://hooks.example.com/content")
    );
}

#[test]
fn url_flags_are_accepted_before_the_subcommand() {
    let cli = Cli::try_parse_from([
        "adforge-cli",
        "--discovery-url",
        "https://hooks.example.com/ads",
    ])
    .expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert_eq!(cli.url_overrides().len(), 1);
}

#[test]
fn parses_discover_with_defaults() {
    let cli = Cli::try_parse_from([
        "adforge-cli",
        "discover",
        "--product",
        "Fitness App",
        "--country",
        "US",
        "--audience",
        "Sports Fans",
        "--start",
        "2025-01-01",
        "--end",
        "2025-01-31",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Discover {
            ref status,
            ref media,
            max_items: 10,
            ..
        }) if status == "Active" && media.is_empty()
    ));
}

#[test]
fn discover_requires_product() {
    let result = Cli::try_parse_from([
        "adforge-cli",
        "discover",
        "--country",
        "US",
        "--audience",
        "Sports Fans",
        "--start",
        "2025-01-01",
        "--end",
        "2025-01-31",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_validate_with_file() {
    let cli =
        Cli::try_parse_from(["adforge-cli", "validate", "ads.json"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Validate { ref file }) if file == std::path::Path::new("ads.json")
    ));
}
