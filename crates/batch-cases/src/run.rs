use {
    crate::{
        cases,
        domain::{
            Case,
            Context,
            PreviewTx,
            Tx,
            case::{self, Action, Metadata},
        },
        infra::{Ethereum, blockchain, cli, config, dex::Dexes},
    },
    anyhow::Context as _,
    clap::Parser,
    serde::Serialize,
    std::sync::Arc,
};

/// Runs the command line `args` and prints the JSON result to stdout. Exits
/// the process with a non-zero code when the command fails.
pub async fn start(args: impl IntoIterator<Item = String>) {
    let args = cli::Args::parse_from(args);
    let mut observe = observe::Config::default().with_env_filter(&args.log);
    if args.log_json {
        observe = observe.with_json_format();
    }
    observe::tracing::initialize(&observe);
    tracing::debug!("running batch cases with {args:#?}");

    match run(args).await {
        Ok(output) => println!("{output:#}"),
        Err(err) => {
            tracing::error!(?err, "command failed");
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Executes a command and returns its output.
pub async fn run(args: cli::Args) -> anyhow::Result<serde_json::Value> {
    let output = match args.command {
        cli::Command::List { chain_id } => {
            let cases = cases::all()
                .iter()
                .map(|case| case.metadata())
                .filter(|metadata| chain_id.is_none_or(|id| metadata.network_id == id))
                .collect::<Vec<_>>();
            serde_json::to_value(cases)?
        }
        cli::Command::Preview { id } => {
            let case = find(&id)?;
            serde_json::to_value(Preview {
                metadata: case.metadata(),
                preview: case.preview(),
                actions: case.actions(),
            })?
        }
        cli::Command::Validate { id, inputs } => {
            let case = find(&id)?;
            case::validate(&case.metadata(), &optional(inputs))?;
            serde_json::json!({ "valid": true })
        }
        cli::Command::Render {
            id,
            account,
            inputs,
        } => {
            let case = find(&id)?;
            let metadata = case.metadata();
            let inputs = optional(inputs);
            case::validate(&metadata, &inputs)?;

            let path = args
                .config
                .context("rendering needs a configuration file, pass it with --config")?;
            let config = config::file::load(&path).await?;
            let url = config
                .nodes
                .get(&metadata.network_id)
                .ok_or(blockchain::Error::NotConfigured(metadata.network_id))?;
            let node = Ethereum::connect(metadata.network_id, url).await?;

            let now = chrono::Utc::now();
            let ctx = Context {
                account,
                chain_id: metadata.network_id,
                inputs,
                node: Arc::new(node),
                dexes: Arc::new(Dexes::new(&config)?),
                now,
            };
            let transactions = case
                .render(&ctx)
                .await
                .with_context(|| format!("failed to render {id}"))?;
            tracing::info!(%id, %account, count = transactions.len(), "rendered batch");

            serde_json::to_value(Rendered {
                transactions,
                expires_at: metadata
                    .render_expiry
                    .and_then(|expiry| i64::try_from(expiry).ok())
                    .map(|expiry| now.timestamp().saturating_add(expiry)),
            })?
        }
    };
    Ok(output)
}

fn find(id: &str) -> anyhow::Result<Box<dyn Case>> {
    cases::find(id).with_context(|| format!("no case with ID {id}"))
}

/// Empty inputs are optional inputs that were skipped.
fn optional(inputs: Vec<String>) -> Vec<Option<String>> {
    inputs
        .into_iter()
        .map(|input| (!input.is_empty()).then_some(input))
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Preview {
    #[serde(flatten)]
    metadata: Metadata,
    preview: Vec<PreviewTx>,
    actions: Vec<Action>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Rendered {
    transactions: Vec<Tx>,
    /// Unix timestamp after which the batch has to be rendered again.
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    async fn run(args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let args = ["batch-cases"].iter().chain(args).map(|arg| arg.to_string());
        super::run(cli::Args::parse_from(args)).await
    }

    #[tokio::test]
    async fn lists_cases_per_chain() {
        let all = run(&["list"]).await.unwrap();
        let polygon = run(&["list", "--chain-id", "137"]).await.unwrap();

        assert_eq!(all.as_array().unwrap().len(), cases::all().len());
        let polygon = polygon.as_array().unwrap();
        assert_eq!(polygon.len(), 7);
        assert!(polygon.iter().all(|case| case["networkId"] == json!(137)));
    }

    #[tokio::test]
    async fn previews_a_case() {
        let preview = run(&["preview", "yearn_v3_dai_a"]).await.unwrap();
        assert_eq!(preview["id"], json!("yearn_v3_dai_a"));
        assert_eq!(preview["preview"].as_array().unwrap().len(), 2);
        assert_eq!(preview["actions"][0]["text"], json!("Manage Assets (Yearn)"));

        let err = run(&["preview", "unknown"]).await.unwrap_err();
        assert_eq!(err.to_string(), "no case with ID unknown");
    }

    #[tokio::test]
    async fn validates_inputs() {
        let valid = run(&["validate", "lido_multiplier", "--input", "1", "--input", "2"]).await;
        assert_eq!(valid.unwrap(), json!({ "valid": true }));

        let err = run(&["validate", "lido_multiplier", "--input", "1", "--input", "6"])
            .await
            .unwrap_err();
        assert!(err.to_string().ends_with("Number must be less than or equal to 5"));
    }

    #[tokio::test]
    async fn rendering_needs_a_config() {
        let err = run(&[
            "render",
            "yearn_v3_dai_a",
            "--account",
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            "--input",
            "1",
        ])
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("rendering needs a configuration file"));
    }
}
