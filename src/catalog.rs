//! Static knowledge about well-known applications: how to call them, which icon to show and
//! where their executables usually live. The table is data, so users can extend it from the
//! configuration without touching the tracker.

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::dir::current_user_name;

pub const DEFAULT_ICON: &str = "⚡";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub display_name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Likely executable locations. `{user}` expands to the current user name.
    #[serde(default)]
    pub candidate_paths: Vec<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl AppInfo {
    fn new(display_name: &str, icon: &str, candidate_paths: &[&str]) -> Self {
        Self {
            display_name: display_name.to_string(),
            icon: icon.to_string(),
            candidate_paths: candidate_paths.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Process name to [AppInfo]. Lookups ignore case, since Windows reports `Code.exe` and
/// `code.exe` interchangeably.
#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    apps: BTreeMap<String, AppInfo>,
}

impl AppCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        let entries = [
            (
                "chrome.exe",
                AppInfo::new(
                    "Google Chrome",
                    "🌐",
                    &[
                        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
                    ],
                ),
            ),
            (
                "firefox.exe",
                AppInfo::new(
                    "Mozilla Firefox",
                    "🦊",
                    &[
                        r"C:\Program Files\Mozilla Firefox\firefox.exe",
                        r"C:\Program Files (x86)\Mozilla Firefox\firefox.exe",
                    ],
                ),
            ),
            (
                "msedge.exe",
                AppInfo::new(
                    "Microsoft Edge",
                    "🌐",
                    &[r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe"],
                ),
            ),
            (
                "code.exe",
                AppInfo::new(
                    "Visual Studio Code",
                    "💻",
                    &[
                        r"C:\Users\{user}\AppData\Local\Programs\Microsoft VS Code\Code.exe",
                        r"C:\Program Files\Microsoft VS Code\Code.exe",
                    ],
                ),
            ),
            (
                "notepad.exe",
                AppInfo::new("Notepad", "📝", &[r"C:\Windows\System32\notepad.exe"]),
            ),
            ("explorer.exe", AppInfo::new("File Explorer", "📁", &[])),
            (
                "discord.exe",
                AppInfo::new(
                    "Discord",
                    "💬",
                    &[r"C:\Users\{user}\AppData\Local\Discord\Update.exe"],
                ),
            ),
            (
                "spotify.exe",
                AppInfo::new(
                    "Spotify",
                    "🎵",
                    &[r"C:\Users\{user}\AppData\Roaming\Spotify\Spotify.exe"],
                ),
            ),
            (
                "slack.exe",
                AppInfo::new(
                    "Slack",
                    "💼",
                    &[r"C:\Users\{user}\AppData\Local\slack\slack.exe"],
                ),
            ),
            (
                "teams.exe",
                AppInfo::new(
                    "Microsoft Teams",
                    "👥",
                    &[r"C:\Users\{user}\AppData\Local\Microsoft\Teams\current\Teams.exe"],
                ),
            ),
            (
                "zoom.exe",
                AppInfo::new(
                    "Zoom",
                    "📹",
                    &[r"C:\Users\{user}\AppData\Roaming\Zoom\bin\Zoom.exe"],
                ),
            ),
            ("photoshop.exe", AppInfo::new("Adobe Photoshop", "🎨", &[])),
            ("illustrator.exe", AppInfo::new("Adobe Illustrator", "✏️", &[])),
            (
                "figma.exe",
                AppInfo::new(
                    "Figma",
                    "🎨",
                    &[r"C:\Users\{user}\AppData\Local\Figma\Figma.exe"],
                ),
            ),
            (
                "notion.exe",
                AppInfo::new(
                    "Notion",
                    "📋",
                    &[r"C:\Users\{user}\AppData\Local\Notion\Notion.exe"],
                ),
            ),
        ];
        for (process, info) in entries {
            catalog.insert(process, info);
        }
        catalog
    }

    /// Adds an entry, replacing any previous one for the same process.
    pub fn insert(&mut self, process_name: &str, info: AppInfo) {
        self.apps.insert(process_name.to_lowercase(), info);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, AppInfo)>) {
        for (process, info) in entries {
            self.insert(&process, info);
        }
    }

    pub fn get(&self, process_name: &str) -> Option<&AppInfo> {
        self.apps.get(&process_name.to_lowercase())
    }

    pub fn display_name(&self, process_name: &str) -> String {
        match self.get(process_name) {
            Some(info) => info.display_name.clone(),
            None => fallback_display_name(process_name),
        }
    }

    pub fn icon(&self, process_name: &str) -> &str {
        self.get(process_name)
            .map(|v| v.icon.as_str())
            .unwrap_or(DEFAULT_ICON)
    }

    /// First candidate location of the executable that exists on this machine.
    pub fn first_existing_path(&self, process_name: &str) -> Option<PathBuf> {
        let user = current_user_name().unwrap_or_default();
        self.get(process_name)?
            .candidate_paths
            .iter()
            .map(|v| PathBuf::from(v.replace("{user}", &user)))
            .find(|v| v.exists())
    }
}

/// `foo_bar.exe` becomes `Foo_Bar`: the file stem with every word capitalized.
fn fallback_display_name(process_name: &str) -> String {
    let stem = process_name
        .strip_suffix(".exe")
        .or_else(|| process_name.strip_suffix(".EXE"))
        .unwrap_or(process_name);
    let mut result = String::with_capacity(stem.len());
    let mut word_start = true;
    for c in stem.chars() {
        if c.is_alphabetic() {
            if word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            result.push(c);
            word_start = true;
        }
    }
    result
}
