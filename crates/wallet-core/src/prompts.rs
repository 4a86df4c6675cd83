//! Persona prompt library for the chat coach
//!
//! Prompts are loaded with a two-layer resolution:
//! 1. Check for an override in the data dir
//!    (~/.local/share/chattywallet/prompts/overrides/)
//! 2. Fall back to embedded defaults (compiled into the binary)
//!
//! This lets users reword a persona without touching the source, while
//! still picking up new default prompts on upgrade.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const CATTY: &str = include_str!("../../../prompts/catty.md");
    pub const FUTURE_ME: &str = include_str!("../../../prompts/future_me.md");
}

/// Known coach personas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaId {
    /// Sarcastic anti-spending friend
    Catty,
    /// The user's future self, back to warn them
    FutureMe,
}

impl PersonaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catty => "catty",
            Self::FutureMe => "future_me",
        }
    }

    pub fn all() -> &'static [PersonaId] {
        &[Self::Catty, Self::FutureMe]
    }

    fn default_content(&self) -> &'static str {
        match self {
            Self::Catty => defaults::CATTY,
            Self::FutureMe => defaults::FUTURE_ME,
        }
    }
}

impl std::str::FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "catty" => Ok(Self::Catty),
            "future_me" | "futureme" => Ok(Self::FutureMe),
            _ => Err(format!("Unknown persona: {}", s)),
        }
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    /// Unique identifier
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
    /// Display name of the persona
    pub persona: String,
}

/// A loaded prompt with metadata and content
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Metadata from frontmatter
    pub metadata: PromptMetadata,
    /// The prompt content (system + user sections)
    pub content: String,
    /// Whether this came from an override file
    pub is_override: bool,
    /// Path to override file (if any)
    pub override_path: Option<PathBuf>,
}

impl Prompt {
    /// Get the system section of the prompt
    pub fn system_section(&self) -> Option<&str> {
        extract_section(&self.content, "# System")
    }

    /// Get the user section of the prompt
    pub fn user_section(&self) -> Option<&str> {
        extract_section(&self.content, "# User")
    }

    /// Render the prompt with template variables replaced
    ///
    /// Simple mustache-style replacement: `{{var}}`. Placeholders with no
    /// matching variable are left in place so a broken override is visible
    /// rather than silently blank.
    pub fn render(&self, vars: &HashMap<&str, String>) -> String {
        let mut result = self.content.clone();
        for (key, value) in vars {
            let pattern = format!("{{{{{}}}}}", key);
            result = result.replace(&pattern, value);
        }
        result
    }

    /// Render and split into (system, user) messages for a completion call
    pub fn render_messages(&self, vars: &HashMap<&str, String>) -> (Option<String>, String) {
        let rendered = self.render(vars);
        let system = extract_section(&rendered, "# System").map(|s| s.to_string());
        let user = extract_section(&rendered, "# User")
            .map(|s| s.to_string())
            .unwrap_or(rendered);
        (system, user)
    }
}

/// Prompt library for loading and caching persona prompts
pub struct PromptLibrary {
    /// Override directory path
    override_dir: Option<PathBuf>,
    /// Cached parsed prompts
    cache: HashMap<PersonaId, Prompt>,
}

impl PromptLibrary {
    /// Create a new prompt library with default paths
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
            cache: HashMap::new(),
        }
    }

    /// Create a prompt library with a custom override directory
    pub fn with_override_dir(path: PathBuf) -> Self {
        Self {
            override_dir: Some(path),
            cache: HashMap::new(),
        }
    }

    /// Create a prompt library with no override directory (embedded only)
    pub fn embedded_only() -> Self {
        Self {
            override_dir: None,
            cache: HashMap::new(),
        }
    }

    /// Get a prompt by persona, loading from override or default
    pub fn get(&mut self, id: PersonaId) -> Result<&Prompt> {
        if !self.cache.contains_key(&id) {
            let prompt = self.load(id)?;
            self.cache.insert(id, prompt);
        }
        Ok(self.cache.get(&id).unwrap())
    }

    /// Load a prompt (checking override first, then default)
    fn load(&self, id: PersonaId) -> Result<Prompt> {
        if let Some(ref override_dir) = self.override_dir {
            let override_path = override_dir.join(format!("{}.md", id.as_str()));
            if override_path.exists() {
                let content = fs::read_to_string(&override_path).map_err(|e| {
                    Error::Prompt(format!("Failed to read prompt override: {}", e))
                })?;
                let (metadata, body) = parse_prompt(&content)?;
                return Ok(Prompt {
                    metadata,
                    content: body,
                    is_override: true,
                    override_path: Some(override_path),
                });
            }
        }

        let (metadata, body) = parse_prompt(id.default_content())?;
        Ok(Prompt {
            metadata,
            content: body,
            is_override: false,
            override_path: None,
        })
    }

    /// Check if a persona has an override file
    pub fn has_override(&self, id: PersonaId) -> bool {
        if let Some(ref override_dir) = self.override_dir {
            override_dir.join(format!("{}.md", id.as_str())).exists()
        } else {
            false
        }
    }

    /// Get the override directory path
    pub fn override_dir(&self) -> Option<&PathBuf> {
        self.override_dir.as_ref()
    }

    /// Clear the cache (useful after editing override files)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Default prompts override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    data_dir().map(|d| d.join("prompts").join("overrides"))
}

/// Application data directory (~/.local/share/chattywallet on Linux/Mac)
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("chattywallet"))
}

/// Parse a prompt file into metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    if !content.starts_with("---") {
        return Err(Error::Prompt(
            "Prompt must start with YAML frontmatter (---)".into(),
        ));
    }

    let rest = &content[3..];
    let end = rest
        .find("\n---")
        .ok_or_else(|| Error::Prompt("Unterminated YAML frontmatter".into()))?;

    let frontmatter = &rest[..end];
    let body = rest[end + 4..].trim_start().to_string();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::Prompt(format!("Invalid prompt frontmatter: {}", e)))?;

    Ok((metadata, body))
}

/// Extract a markdown section by heading, up to the next `# ` heading
fn extract_section<'a>(content: &'a str, heading: &str) -> Option<&'a str> {
    let start = content.find(heading)? + heading.len();
    let rest = &content[start..];
    let end = rest.find("\n# ").unwrap_or(rest.len());
    let section = rest[..end].trim();
    if section.is_empty() {
        None
    } else {
        Some(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let mut lib = PromptLibrary::embedded_only();
        for &id in PersonaId::all() {
            let prompt = lib.get(id).unwrap();
            assert_eq!(prompt.metadata.id, id.as_str());
            assert!(prompt.metadata.version >= 1);
            assert!(!prompt.is_override);
            assert!(prompt.system_section().is_some(), "{} has no system", id);
            assert!(prompt.user_section().is_some(), "{} has no user", id);
        }
    }

    #[test]
    fn render_replaces_placeholders() {
        let mut lib = PromptLibrary::embedded_only();
        let prompt = lib.get(PersonaId::Catty).unwrap();

        let mut vars: HashMap<&str, String> = HashMap::new();
        vars.insert("week_total", "123.45".to_string());
        vars.insert("user_message", "I want to buy ice cream".to_string());
        let rendered = prompt.render(&vars);

        assert!(rendered.contains("123.45"));
        assert!(rendered.contains("I want to buy ice cream"));
        assert!(!rendered.contains("{{week_total}}"));
        assert!(!rendered.contains("{{user_message}}"));
    }

    #[test]
    fn override_takes_priority() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("catty.md"),
            "---\nid: catty\nversion: 99\npersona: Catty\n---\n# System\nShort.\n# User\n{{user_message}}\n",
        )
        .unwrap();

        let mut lib = PromptLibrary::with_override_dir(dir.path().to_path_buf());
        let prompt = lib.get(PersonaId::Catty).unwrap();
        assert!(prompt.is_override);
        assert_eq!(prompt.metadata.version, 99);
        assert_eq!(prompt.system_section(), Some("Short."));
    }

    #[test]
    fn persona_parses_cli_spellings() {
        assert_eq!("catty".parse::<PersonaId>(), Ok(PersonaId::Catty));
        assert_eq!("future-me".parse::<PersonaId>(), Ok(PersonaId::FutureMe));
        assert_eq!("FutureMe".parse::<PersonaId>(), Ok(PersonaId::FutureMe));
        assert!("ghost".parse::<PersonaId>().is_err());
    }

    #[test]
    fn malformed_frontmatter_is_an_error() {
        assert!(parse_prompt("no frontmatter here").is_err());
        assert!(parse_prompt("---\nid: x\n").is_err());
    }
}
