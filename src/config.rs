use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::export::{DEFAULT_OUTPUT, DEFAULT_TITLE};
use crate::sync::{DEFAULT_SERVER, DEFAULT_TIMEOUT};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub server: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            server: other.server.clone().or_else(|| self.server.clone()),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            output: other.output.clone().or_else(|| self.output.clone()),
            title: other.title.clone().or_else(|| self.title.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    pub fn server_url(&self) -> &str {
        self.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn document_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("sectionist").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("sectionist")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("sectionist").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("sectionist")
                .join("config");
        }
    }

    PathBuf::from(".sectionistrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".sectionistrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_rc_line)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# sectionist defaults (saved with --save)".to_string());
    if let Some(server) = &flags.server {
        lines.push(format!("--server {}", quote_rc_value(server)));
    }
    if let Some(secs) = flags.timeout_secs {
        lines.push(format!("--timeout {secs}"));
    }
    if let Some(output) = &flags.output {
        lines.push(format!("--output {}", quote_rc_value(&output.to_string_lossy())));
    }
    if let Some(title) = &flags.title {
        lines.push(format!("--title {}", quote_rc_value(title)));
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", quote_rc_value(&log_file.to_string_lossy())));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Split one rc line into words. Double quotes group a word that contains
/// whitespace; inside quotes a backslash escapes the next character.
fn split_rc_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            '\\' if quoted => {
                if let Some(next) = chars.next() {
                    word.push(next);
                }
            }
            ch if ch.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            ch => {
                word.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}

fn quote_rc_value(value: &str) -> String {
    let plain = !value.is_empty() && !value.chars().any(|ch| ch.is_whitespace() || ch == '"');
    if plain {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Pull known flags out of a token list (argv or rc-file words).
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--server" | "--timeout" | "--output" | "--title" | "--log-file"
        );
        if takes_value {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    i += 1;
                    tokens.get(i).cloned()
                }
            };
            if let Some(value) = value {
                match name {
                    "--server" => flags.server = Some(value),
                    "--timeout" => flags.timeout_secs = value.parse().ok(),
                    "--output" => flags.output = Some(PathBuf::from(value)),
                    "--title" => flags.title = Some(value),
                    _ => flags.log_file = Some(PathBuf::from(value)),
                }
            }
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_rc_words_respect_quotes() {
        assert_eq!(
            split_rc_line(r#"--title "My \"Big\" Book"   --output=out.md"#),
            args(&["--title", r#"My "Big" Book"#, "--output=out.md"])
        );
        assert_eq!(split_rc_line(r#"--title """#), args(&["--title", ""]));
        assert_eq!(
            split_rc_line(r"--output C:\docs\a.md"),
            args(&["--output", r"C:\docs\a.md"])
        );
    }

    #[test]
    fn test_rc_values_with_spaces_are_quoted() {
        assert_eq!(quote_rc_value("plain"), "plain");
        assert_eq!(quote_rc_value("My Book"), r#""My Book""#);
        assert_eq!(quote_rc_value(r"C:\my docs"), r#""C:\\my docs""#);
        assert_eq!(
            split_rc_line(&quote_rc_value(r#"a "b" \c"#)),
            args(&[r#"a "b" \c"#])
        );
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&args(&[
            "sectionist",
            "--server",
            "http://docs.local:9000",
            "--timeout=3",
            "--output",
            "book.md",
            "--log-file=trace.log",
            "--save",
        ]));
        assert_eq!(flags.server.as_deref(), Some("http://docs.local:9000"));
        assert_eq!(flags.timeout_secs, Some(3));
        assert_eq!(flags.output, Some(PathBuf::from("book.md")));
        assert_eq!(flags.log_file, Some(PathBuf::from("trace.log")));
    }

    #[test]
    fn test_defaults_when_unset() {
        let flags = ConfigFlags::default();
        assert_eq!(flags.server_url(), DEFAULT_SERVER);
        assert_eq!(flags.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(flags.output_path(), PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(flags.document_title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_bad_timeout_is_ignored() {
        let flags = parse_flag_tokens(&args(&["--timeout", "soon"]));
        assert_eq!(flags.timeout_secs, None);
    }

    #[test]
    fn test_config_union_prefers_later_values() {
        let file = ConfigFlags {
            server: Some("http://file".to_string()),
            timeout_secs: Some(5),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            server: Some("http://cli".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.server_url(), "http://cli");
        assert_eq!(merged.timeout_secs, Some(5));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".sectionistrc");
        let flags = ConfigFlags {
            server: Some("http://docs.local".to_string()),
            timeout_secs: Some(7),
            output: Some(PathBuf::from("out/book.md")),
            log_file: Some(PathBuf::from("sectionist.log")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
