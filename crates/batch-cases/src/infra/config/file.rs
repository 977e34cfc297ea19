use {
    crate::infra::dex::{kyberswap, oneinch, pendle},
    anyhow::Context,
    serde::Deserialize,
    serde_with::serde_as,
    std::{path::Path, time::Duration},
    tokio::fs,
    url::Url,
};

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// RPC endpoints of the chains cases are rendered for.
    #[serde(default)]
    node: Vec<Node>,

    /// Timeout for requests against aggregator APIs.
    #[serde(with = "humantime_serde", default = "default_http_timeout")]
    http_timeout: Duration,

    #[serde(default)]
    oneinch: OneInch,

    #[serde(default)]
    pendle: Pendle,

    #[serde(default)]
    kyberswap: KyberSwap,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Node {
    chain_id: u64,
    url: Url,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct OneInch {
    #[serde(default = "default_oneinch_endpoint")]
    endpoint: Url,

    /// API key sent as a bearer token.
    api_key: Option<String>,
}

impl Default for OneInch {
    fn default() -> Self {
        Self {
            endpoint: default_oneinch_endpoint(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Pendle {
    #[serde(default = "default_pendle_endpoint")]
    endpoint: Url,
}

impl Default for Pendle {
    fn default() -> Self {
        Self {
            endpoint: default_pendle_endpoint(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct KyberSwap {
    #[serde(default = "default_kyberswap_endpoint")]
    endpoint: Url,

    /// Identifies the integrator to the API.
    #[serde(default = "default_kyberswap_client_id")]
    client_id: String,
}

impl Default for KyberSwap {
    fn default() -> Self {
        Self {
            endpoint: default_kyberswap_endpoint(),
            client_id: default_kyberswap_client_id(),
        }
    }
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_oneinch_endpoint() -> Url {
    oneinch::DEFAULT_URL.parse().expect("valid default url")
}

fn default_pendle_endpoint() -> Url {
    pendle::DEFAULT_URL.parse().expect("valid default url")
}

fn default_kyberswap_endpoint() -> Url {
    kyberswap::DEFAULT_URL.parse().expect("valid default url")
}

fn default_kyberswap_client_id() -> String {
    "bentobatch".to_owned()
}

/// Loads the configuration from a TOML file.
pub async fn load(path: &Path) -> anyhow::Result<super::Config> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    from_str(&data).with_context(|| format!("invalid configuration in {path:?}"))
}

/// Parses the configuration from a TOML string.
pub fn from_str(data: &str) -> anyhow::Result<super::Config> {
    let config = toml::de::from_str::<Config>(data)?;

    let mut nodes = std::collections::HashMap::new();
    for node in config.node {
        anyhow::ensure!(
            nodes.insert(node.chain_id, node.url).is_none(),
            "more than one node configured for chain {}",
            node.chain_id
        );
    }

    Ok(super::Config {
        nodes,
        oneinch: oneinch::Config {
            endpoint: config.oneinch.endpoint,
            api_key: config.oneinch.api_key,
            timeout: config.http_timeout,
        },
        pendle: pendle::Config {
            endpoint: config.pendle.endpoint,
            timeout: config.http_timeout,
        },
        kyberswap: kyberswap::Config {
            endpoint: config.kyberswap.endpoint,
            client_id: config.kyberswap.client_id,
            timeout: config.http_timeout,
        },
    })
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[test]
    fn parses_full_config() {
        let config = from_str(
            r#"
            http-timeout = "3s"

            [[node]]
            chain-id = 1
            url = "http://localhost:8545"

            [[node]]
            chain-id = 137
            url = "http://localhost:8546"

            [oneinch]
            endpoint = "http://localhost:9000/swap/v6.0/"
            api-key = "secret"

            [kyberswap]
            client-id = "tests"
            "#,
        )
        .unwrap();

        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.nodes[&137].as_str(), "http://localhost:8546/");
        assert_eq!(config.oneinch.api_key.as_deref(), Some("secret"));
        assert_eq!(config.oneinch.timeout, Duration::from_secs(3));
        assert_eq!(config.pendle.endpoint.as_str(), pendle::DEFAULT_URL);
        assert_eq!(config.kyberswap.client_id, "tests");
    }

    #[test]
    fn rejects_unknown_fields_and_duplicate_nodes() {
        assert!(from_str("colour = \"blue\"").is_err());
        assert!(
            from_str(
                r#"
                [[node]]
                chain-id = 1
                url = "http://a"
                [[node]]
                chain-id = 1
                url = "http://b"
                "#
            )
            .is_err()
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pendle]\nendpoint = \"http://localhost:1234/\"").unwrap();

        let config = load(file.path()).await.unwrap();
        assert_eq!(config.pendle.endpoint.as_str(), "http://localhost:1234/");
        assert!(config.nodes.is_empty());

        assert!(load(Path::new("/does/not/exist.toml")).await.is_err());
    }
}
