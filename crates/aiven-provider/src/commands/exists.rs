use aiven_provider_client::{configure, paths};
use aiven_provider_core::{ApiRequest, ProviderConfig, ReadOutcome};
use colored::Colorize;

pub async fn handle(
    project: &str,
    service: Option<&str>,
    api_url: Option<String>,
) -> anyhow::Result<()> {
    let mut config = ProviderConfig::from_env()?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url);
    }
    let ctx = configure(&config)?;

    let (kind, name, path) = match service {
        Some(service) => (
            "service",
            format!("{}/{}", project, service),
            paths::service_path(project, service),
        ),
        None => ("project", project.to_string(), paths::project_path(project)),
    };

    match ReadOutcome::from(ctx.client().send(ApiRequest::get(path)).await) {
        ReadOutcome::Found(_) => {
            println!("{} {} {}", "✓".green(), kind, name.cyan());
            Ok(())
        }
        ReadOutcome::Gone => {
            eprintln!("{} {} {} does not exist", "✗".red(), kind, name.cyan());
            std::process::exit(1);
        }
        ReadOutcome::Failed(err) => Err(err.into()),
    }
}
