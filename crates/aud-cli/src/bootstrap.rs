use anyhow::Context;
use aud_config::AuditConfig;

/// Load layered configuration (`.env`, TOML files, `AUDITRAIL_*` env vars).
pub fn load_config() -> anyhow::Result<AuditConfig> {
    let config = AuditConfig::load_with_dotenv().context("failed to load auditrail configuration")?;
    tracing::debug!(
        unsectioned = %config.report.unsectioned_label,
        default_limit = config.general.default_limit,
        "configuration loaded"
    );
    Ok(config)
}
