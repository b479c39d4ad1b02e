use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::quirks::QuirkSet;

// Default configuration
pub const DEFAULT_THEME: &str = "Pesterchum 2.5";

/// User-facing client options, saved on edit and on exit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Options {
    /// Our display nick, used for mention detection.
    pub nick: String,
    pub theme: String,
    /// Senders whose messages are never displayed.
    #[serde(default)]
    pub ignored: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            nick: String::new(),
            theme: DEFAULT_THEME.to_string(),
            ignored: Vec::new(),
        }
    }
}

impl Options {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|n| n == name)
    }
}

/// A user profile: display color plus the quirk set applied to outgoing
/// messages.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    pub color: (u8, u8, u8),
    #[serde(default)]
    pub quirks: QuirkSet,
}

fn config_file(name: &str) -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "pester", "pester-client") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join(name));
    }
    None
}

pub fn options_path() -> Option<PathBuf> {
    config_file("options.json")
}

pub fn profile_path() -> Option<PathBuf> {
    config_file("profile.json")
}

/// Load options from disk; None means "use defaults" (first run or
/// unreadable file).
pub fn load_options() -> Option<Options> {
    let path = options_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_options(options: &Options) -> std::io::Result<()> {
    if let Some(path) = options_path() {
        write_json(&path, options)?;
    }
    Ok(())
}

/// Load the profile (and its quirk set) from disk.
pub fn load_profile() -> Option<Profile> {
    let path = profile_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_profile(profile: &Profile) -> std::io::Result<()> {
    if let Some(path) = profile_path() {
        write_json(&path, profile)?;
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &PathBuf, value: &T) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    file.write_all(data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quirks::{QuirkKind, QuirkRule};

    #[test]
    fn test_options_defaults() {
        let opts = Options::default();
        assert_eq!(opts.theme, DEFAULT_THEME);
        assert!(opts.ignored.is_empty());
        assert!(!opts.is_ignored("anyone"));
    }

    #[test]
    fn test_options_ignore_list() {
        let opts = Options {
            ignored: vec!["spam".to_string()],
            ..Options::default()
        };
        assert!(opts.is_ignored("spam"));
        assert!(!opts.is_ignored("ham"));
    }

    #[test]
    fn test_profile_round_trip_keeps_rule_order() {
        let mut profile = Profile {
            name: "caligulasAquarium".to_string(),
            color: (106, 0, 106),
            quirks: QuirkSet::new("wwavy"),
        };
        profile.quirks.add(QuirkRule::new(QuirkKind::Replace {
            find: "w".to_string(),
            with: "ww".to_string(),
        }));
        profile.quirks.add(QuirkRule::new(QuirkKind::Replace {
            find: "v".to_string(),
            with: "vv".to_string(),
        }));

        let json = serde_json::to_string_pretty(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }

    #[test]
    fn test_options_tolerate_missing_fields() {
        // Files written by older versions lack the ignore list.
        let json = r#"{ "nick": "gardenGnostic", "theme": "Trollian" }"#;
        let opts: Options = serde_json::from_str(json).unwrap();
        assert!(opts.ignored.is_empty());
        assert_eq!(opts.nick, "gardenGnostic");
    }
}
