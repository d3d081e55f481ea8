// ABOUTME: Integration tests for configuration parsing and credential loading.
// ABOUTME: Tests YAML parsing, defaults, env var validation, and name generation.

use nephos::config::*;
use nephos::error::Error;
use nephos::provision::DeployMode;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
template: https://example/template.json
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.template, "https://example/template.json");
        assert_eq!(config.region.as_str(), "eastus");
        assert_eq!(config.mode, DeployMode::Incremental);
        assert_eq!(config.poll.interval, Duration::from_secs(10));
        assert_eq!(config.poll.timeout, None);
        assert!(config.poll.wait);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
template: https://example/template.json
region: westeurope
mode: complete

prefix:
  container: myrg
  deployment: mydeploy

poll:
  interval: 30s
  timeout: 45m
  max_transient_retries: 5
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.region.as_str(), "westeurope");
        assert_eq!(config.mode, DeployMode::Complete);
        assert_eq!(config.prefix.container, "myrg");
        assert_eq!(config.prefix.deployment, "mydeploy");
        assert_eq!(config.poll.interval, Duration::from_secs(30));
        assert_eq!(config.poll.timeout, Some(Duration::from_secs(45 * 60)));
        assert_eq!(config.poll.max_transient_retries, 5);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let yaml = r#"
template: https://example/template.json
mode: replace-all
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown deployment mode"));
    }

    #[test]
    fn invalid_region_is_rejected() {
        let yaml = r#"
template: https://example/template.json
region: East US
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn missing_template_is_rejected() {
        assert!(Config::from_yaml("region: eastus\n").is_err());
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discover_finds_yml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "template: https://example/t.json\n",
        )
        .unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.template, "https://example/t.json");
    }

    #[test]
    fn discover_reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn init_writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some("https://example/t.json"), Some("westus2"), false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.template, "https://example/t.json");
        assert_eq!(config.region.as_str(), "westus2");
        assert_eq!(config.poll.timeout, Some(Duration::from_secs(30 * 60)));
    }
}

mod credentials {
    use super::*;

    const ALL_VARS: [&str; 4] = [
        TENANT_ID_VAR,
        CLIENT_ID_VAR,
        CLIENT_SECRET_VAR,
        SUBSCRIPTION_ID_VAR,
    ];

    #[test]
    fn loads_all_four_variables() {
        temp_env::with_vars(
            ALL_VARS.map(|v| (v, Some("value"))),
            || {
                let creds = Credentials::from_env().unwrap();
                assert_eq!(creds.tenant_id, "value");
                assert_eq!(creds.subscription_id, "value");
            },
        );
    }

    #[test]
    fn missing_variable_is_fatal() {
        temp_env::with_vars(
            [
                (TENANT_ID_VAR, Some("t")),
                (CLIENT_ID_VAR, Some("c")),
                (CLIENT_SECRET_VAR, None),
                (SUBSCRIPTION_ID_VAR, Some("s")),
            ],
            || {
                let err = Credentials::from_env().unwrap_err();
                match err {
                    Error::MissingEnvVar(name) => assert_eq!(name, CLIENT_SECRET_VAR),
                    other => panic!("unexpected error: {other}"),
                }
            },
        );
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        temp_env::with_vars(
            [
                (TENANT_ID_VAR, Some("")),
                (CLIENT_ID_VAR, Some("c")),
                (CLIENT_SECRET_VAR, Some("x")),
                (SUBSCRIPTION_ID_VAR, Some("s")),
            ],
            || {
                assert!(matches!(
                    Credentials::from_env(),
                    Err(Error::MissingEnvVar(_))
                ));
            },
        );
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        temp_env::with_vars(
            [
                (TENANT_ID_VAR, Some("t")),
                (CLIENT_ID_VAR, Some("c")),
                (CLIENT_SECRET_VAR, Some("hunter2")),
                (SUBSCRIPTION_ID_VAR, Some("s")),
            ],
            || {
                let creds = Credentials::from_env().unwrap();
                let debug = format!("{creds:?}");
                assert!(!debug.contains("hunter2"), "{debug}");
                assert!(debug.contains("<redacted>"));
            },
        );
    }
}

mod names {
    use nephos::types::random_name;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn generated_names_keep_their_prefix(prefix in "[a-z]{1,16}") {
            let name = random_name(&prefix);
            prop_assert!(name.starts_with(&prefix));
            prop_assert!(name[prefix.len()..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn collisions_are_improbable_across_many_draws() {
        let names: HashSet<String> = (0..100).map(|_| random_name("rg")).collect();
        assert_eq!(names.len(), 100);
    }
}
