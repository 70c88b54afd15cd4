//! Models command - List built-in catalog models.

use anyhow::Result;
use clap::Args;

use modelcap_core::{ApiProvider, ModelCatalog, ModelInfo};

#[derive(Args)]
pub struct ModelsArgs {
    /// Only list models from this catalog provider
    #[arg(short, long)]
    provider: Option<String>,
}

pub fn execute(args: ModelsArgs) -> Result<()> {
    let catalog = ModelCatalog::builtin();

    let providers: Vec<ApiProvider> = match args.provider.as_deref() {
        Some(provider) => {
            let provider: ApiProvider = provider.parse()?;
            // fail early on providers without a built-in table
            catalog.models(provider)?;
            vec![provider]
        }
        None => catalog.providers().collect(),
    };

    for provider in providers {
        let default_id = catalog.default_model_id(provider)?;
        println!("📦 {}", provider);
        for (model_id, model) in catalog.models(provider)? {
            let marker = if model_id == default_id { "*" } else { " " };
            println!("  {} {}", marker, describe(model_id, model));
        }
        println!();
    }

    Ok(())
}

fn describe(model_id: &str, model: &ModelInfo) -> String {
    let cap = model
        .output_cap()
        .map(|tokens| tokens.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut flags = Vec::new();
    if model.supports_images {
        flags.push("images");
    }
    if model.supports_prompt_cache {
        flags.push("cache");
    }
    if model.required_reasoning_budget {
        flags.push("thinking");
    } else if model.supports_reasoning_budget {
        flags.push("hybrid");
    }
    if model.supports_reasoning_effort {
        flags.push("effort");
    }

    let pricing = match (model.input_price, model.output_price) {
        (Some(input), Some(output)) => format!("${:.2}/${:.2} per 1M", input, output),
        _ => "pricing n/a".to_string(),
    };

    format!(
        "{:<58} max {:>7}  ctx {:>9}  {:<24} [{}]",
        model_id,
        cap,
        model.context_window,
        pricing,
        flags.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_flags() {
        let model = ModelInfo::new(64_000, 200_000)
            .with_images()
            .with_reasoning_budget()
            .with_pricing(3.0, 15.0);
        let line = describe("claude-sonnet-4", &model);
        assert!(line.contains("64000"));
        assert!(line.contains("$3.00/$15.00"));
        assert!(line.contains("[images,hybrid]"));
    }

    #[test]
    fn test_describe_missing_cap() {
        let line = describe("mystery", &ModelInfo::new(0, 8192));
        assert!(line.contains("max       -"));
        assert!(line.contains("pricing n/a"));
    }
}
