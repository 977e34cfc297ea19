/// How log events are filtered and formatted.
#[derive(Debug, Clone)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `warn,batch_cases=debug`.
    pub(crate) env_filter: String,
    /// Emit one JSON object per event instead of human readable lines.
    pub(crate) use_json_format: bool,
}

impl Config {
    pub fn new(env_filter: &str, use_json_format: bool) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            use_json_format,
        }
    }

    pub fn with_json_format(self) -> Self {
        Self {
            use_json_format: true,
            ..self
        }
    }

    pub fn with_env_filter(self, env_filter: &str) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("info", false)
    }
}
