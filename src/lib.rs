pub mod cli;
pub mod error;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;
pub mod theme;

use cli::Args;
use llm::chat::gemini::GeminiChatClient;
use log::{ info, warn };
use relay::ChatRelay;
use server::{ AppState, Server };
use std::error::Error;
use std::sync::Arc;
use theme::{ ThemeContext, ThemeShell };

pub fn build_state(args: &Args) -> AppState {
    let chat_client = GeminiChatClient::from_config(&args.llm_config());
    let shell = ThemeShell::new(ThemeContext::new(args.default_theme), args.page_metadata());
    AppState {
        relay: ChatRelay::new(Arc::new(chat_client)),
        shell,
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    args.validate()?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Gemini Base URL: {}", args.gemini_base_url);
    info!("Gemini Model: {}", args.gemini_model);
    info!("Default Theme: {}", args.default_theme);
    info!("Page Title: {}", args.app_title);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    if args.llm_config().api_key.is_none() {
        warn!("GEMINI_API_KEY is not set yet. It will be read again on each chat request.");
    }

    let state = build_state(&args);
    let server = Server::new(args.server_addr.clone(), state, args);
    server.run().await?;

    Ok(())
}
