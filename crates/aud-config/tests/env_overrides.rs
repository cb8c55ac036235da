use figment::Jail;
use aud_config::AuditConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("AUDITRAIL_REPORT__UNSECTIONED_LABEL", "Other");
        jail.set_env("AUDITRAIL_GENERAL__DEFAULT_LIMIT", "50");

        let config = AuditConfig::load().expect("config loads");
        assert_eq!(config.report.unsectioned_label, "Other");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".auditrail")?;
        jail.create_file(
            ".auditrail/config.toml",
            r#"
[report]
unsectioned_label = "From file"
"#,
        )?;
        jail.set_env("AUDITRAIL_REPORT__UNSECTIONED_LABEL", "From env");

        let config = AuditConfig::load().expect("config loads");
        assert_eq!(config.report.unsectioned_label, "From env");
        Ok(())
    });
}
