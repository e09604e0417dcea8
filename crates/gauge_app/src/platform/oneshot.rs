//! Non-interactive subcommands.

use std::io::{self, Read};

use anyhow::{anyhow, bail, Context};
use gauge_core::{build_request, InputState, ModelCatalog};
use gauge_engine::{CountClient, ReqwestCountClient};

use super::catalog::load_catalog;
use super::config::Args;

pub fn count(
    args: &Args,
    chat: bool,
    model: Option<&str>,
    text: Option<&str>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(args.models.as_deref())?;
    let model_id = resolve_model(&catalog, model)?;
    let text = match text {
        Some(text) if text != "-" => text.to_string(),
        _ => read_stdin()?,
    };

    let snapshot = InputState {
        text,
        model_id,
        chat_mode: chat,
    };
    let client = ReqwestCountClient::new(args.client_settings())
        .context("failed to configure the counting service client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let line = runtime.block_on(count_line(&client, &snapshot))?;
    println!("{line}");
    Ok(())
}

/// Counts one snapshot and returns the line to print.
///
/// Empty input makes no request. A failed count becomes an `API error: ...`
/// error so the process exits non-zero.
async fn count_line(client: &dyn CountClient, snapshot: &InputState) -> anyhow::Result<String> {
    let Some(request) = build_request(snapshot) else {
        return Ok("No tokens (empty input)".to_string());
    };
    match client.count(&request).await {
        Ok(tokens) => Ok(format!("Tokens: {tokens}")),
        Err(failure) => Err(anyhow!("API error: {failure}")),
    }
}

pub fn list_models(args: &Args) -> anyhow::Result<()> {
    let catalog = load_catalog(args.models.as_deref())?;
    for profile in catalog.profiles() {
        println!(
            "{:<12} {:<12} {:>12}",
            profile.id,
            profile.label,
            catalog.limit_of(&profile.id)
        );
    }
    Ok(())
}

fn resolve_model(catalog: &ModelCatalog, requested: Option<&str>) -> anyhow::Result<String> {
    match requested {
        None => Ok(catalog.first().id.clone()),
        Some(id) if catalog.contains(id) => Ok(id.to_string()),
        Some(id) => {
            let known: Vec<_> = catalog.profiles().iter().map(|p| p.id.as_str()).collect();
            bail!("unknown model {id:?} (known: {})", known.join(", "))
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(text)
}
