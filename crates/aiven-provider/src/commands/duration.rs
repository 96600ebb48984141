use aiven_provider_core::ProviderError;
use aiven_provider_core::duration::{format_duration, parse_duration};

pub fn handle(value: &str) -> anyhow::Result<()> {
    let duration = parse_duration(value).map_err(|e| ProviderError::InvalidDuration {
        key: value.to_string(),
        reason: e.to_string(),
    })?;
    println!("{}", format_duration(duration));
    Ok(())
}
