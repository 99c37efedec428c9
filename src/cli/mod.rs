use clap::Parser;

use crate::llm::{ LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL };
use crate::theme::{ PageMetadata, Theme };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Address the HTTP server binds to
    #[arg(short = 'a', long, env = "SERVER_ADDR", default_value = "0.0.0.0:3000")]
    pub server_addr: String,

    // --- Gemini Args ---
    /// Gemini API key. When unset, GEMINI_API_KEY is read again on every call
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Base URL of the Gemini REST API (without the /models/... suffix)
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Gemini model used for generateContent
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    // --- Page Args ---
    /// Theme the page starts with (light, dark)
    #[arg(long, env = "DEFAULT_THEME", default_value = "light")]
    pub default_theme: Theme,

    /// Page title
    #[arg(long, env = "APP_TITLE", default_value = "Sona's_Chatbot")]
    pub app_title: String,

    /// Page description meta tag
    #[arg(long, env = "APP_DESCRIPTION", default_value = "Sona's_Chatbot")]
    pub app_description: String,

    // --- TLS Args ---
    /// Serve HTTPS instead of HTTP
    #[arg(long, env = "ENABLE_TLS", default_value_t = false)]
    pub enable_tls: bool,

    /// Path to the PEM certificate chain
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Path to the PEM private key
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,
}

impl Args {
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.gemini_api_key.clone().filter(|k| !k.trim().is_empty()),
            completion_model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
        }
    }

    pub fn page_metadata(&self) -> PageMetadata {
        PageMetadata {
            title: self.app_title.clone(),
            description: self.app_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.gemini_base_url).map_err(|e| {
            format!("Invalid GEMINI_BASE_URL '{}': {}", self.gemini_base_url, e)
        })?;
        if self.enable_tls {
            match (&self.tls_cert_path, &self.tls_key_path) {
                (Some(_), Some(_)) => {}
                _ => {
                    return Err(
                        "Both --tls-cert-path and --tls-key-path must be provided to enable TLS.".into()
                    );
                }
            }
        }
        Ok(())
    }
}
