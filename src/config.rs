use secrecy::Secret;
use serde_aux::prelude::deserialize_number_from_string;

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other,
            )),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub enforce_https: bool,
    #[serde(default = "default_coc_url")]
    pub coc_url: String,
}

fn default_coc_url() -> String {
    "http://coc.golangbridge.org/".into()
}

#[derive(serde::Deserialize, Clone)]
pub struct SlackSettings {
    pub base_url: String,
    pub token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_ms: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct CaptchaSettings {
    pub base_url: String,
    pub sitekey: String,
    pub secret: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_ms: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct IdentitySettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_ms: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub app: AppConfig,
    pub slack: SlackSettings,
    pub captcha: CaptchaSettings,
    pub identity: IdentitySettings,
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    // initialize our configuration reader
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Read in default configuration
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    // Read in layer environment specific file.
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // Secrets (slack token, captcha secret) come in through APP__-prefixed
    // environment variables, e.g. APP__SLACK__TOKEN.
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    // try converting settings into `Configuration` object.
    return settings.try_into();
}
