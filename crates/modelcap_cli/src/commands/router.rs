//! Router command - Validate a router name and its model-listing options.

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use modelcap_core::{to_router_name, GetModelsOptions, RouterName};

#[derive(Args)]
pub struct RouterArgs {
    /// Router name to validate
    name: Option<String>,

    /// Model-listing options as JSON, e.g. '{"provider":"ollama","baseUrl":"http://localhost:11434"}'
    #[arg(short, long)]
    options: Option<String>,

    /// List all known router names
    #[arg(long)]
    list: bool,
}

pub fn execute(args: RouterArgs) -> Result<()> {
    if args.list {
        for name in RouterName::ALL {
            let location = if name.is_local() { "local" } else { "remote" };
            println!("{:<20} {}", name.as_str(), location);
        }
        return Ok(());
    }

    let router = to_router_name(args.name.as_deref())?;
    println!("✅ {} is a known router", router);

    if let Some(raw) = args.options.as_deref() {
        let options = parse_options(router, raw)?;
        info!(router = %router, "validated model-listing options");
        match options.base_url() {
            Some(url) => println!("   options valid (base URL: {})", url),
            None => println!("   options valid"),
        }
    }

    Ok(())
}

/// Parse and validate options, and check they belong to `router`.
fn parse_options(router: RouterName, raw: &str) -> Result<GetModelsOptions> {
    let options: GetModelsOptions =
        serde_json::from_str(raw).context("Invalid model-listing options")?;

    if options.router_name() != Some(router) {
        bail!(
            "Options are for provider {}, not router {}",
            options.provider_name(),
            router
        );
    }

    options.validate()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matching_options() {
        let options = parse_options(
            RouterName::Ollama,
            r#"{"provider":"ollama","baseUrl":"http://localhost:11434"}"#,
        )
        .unwrap();
        assert_eq!(options.base_url(), Some("http://localhost:11434"));
    }

    #[test]
    fn test_parse_mismatched_options() {
        let err = parse_options(RouterName::Glama, r#"{"provider":"requesty"}"#).unwrap_err();
        assert!(err.to_string().contains("requesty"));
    }

    #[test]
    fn test_parse_cerebras_options_rejected() {
        assert!(parse_options(RouterName::OpenRouter, r#"{"provider":"cerebras"}"#).is_err());
    }

    #[test]
    fn test_parse_incomplete_litellm() {
        let result = parse_options(
            RouterName::LiteLlm,
            r#"{"provider":"litellm","apiKey":"","baseUrl":"http://localhost:4000"}"#,
        );
        assert!(result.is_err());
    }
}
