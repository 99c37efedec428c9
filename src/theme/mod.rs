//! Theming shell: one shared theme preference, readable and settable by
//! anything rendered inside the shell.

mod page;

pub use page::ChatPage;

use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;
use std::sync::{ Arc, RwLock };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseThemeError {
    message: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ =>
                Err(ParseThemeError {
                    message: format!("Invalid theme: '{}'", s),
                }),
        }
    }
}

/// Cloneable handle to the theme value. Every clone sees the same value.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    inner: Arc<RwLock<Theme>>,
}

impl ThemeContext {
    pub fn new(initial: Theme) -> Self {
        Self { inner: Arc::new(RwLock::new(initial)) }
    }

    pub fn get(&self) -> Theme {
        *self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set(&self, theme: Theme) {
        *self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = theme;
    }

    /// Flips the theme and returns the new value.
    pub fn toggle(&self) -> Theme {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = guard.toggled();
        *guard
    }
}

/// Content rendered inside the shell.
pub trait Render {
    fn render(&self, ctx: &ThemeContext) -> String;
}

impl<F> Render for F where F: Fn(&ThemeContext) -> String {
    fn render(&self, ctx: &ThemeContext) -> String {
        self(ctx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: "Sona's_Chatbot".to_string(),
            description: "Sona's_Chatbot".to_string(),
        }
    }
}

/// Root layout. Owns the theme context for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct ThemeShell {
    ctx: ThemeContext,
    metadata: PageMetadata,
}

impl ThemeShell {
    pub fn new(ctx: ThemeContext, metadata: PageMetadata) -> Self {
        Self { ctx, metadata }
    }

    pub fn context(&self) -> &ThemeContext {
        &self.ctx
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    /// Renders `content` first so the body attribute reflects any theme
    /// change it made.
    pub fn wrap(&self, content: &dyn Render) -> String {
        let body = content.render(&self.ctx);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<meta name=\"description\" content=\"{}\">\n</head>\n<body data-theme=\"{}\">\n{}\n</body>\n</html>\n",
            escape_html(&self.metadata.title),
            escape_html(&self.metadata.description),
            self.ctx.get(),
            body
        )
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
