use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use anyhow::{anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keys that can take part in a global shortcut. Left and right modifiers are not told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Ctrl,
    Shift,
    Alt,
    Meta,
    /// Lowercase ASCII letter or digit.
    Char(char),
    Function(u8),
    Space,
    Escape,
}

impl Key {
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Ctrl | Key::Shift | Key::Alt | Key::Meta)
    }
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "ctrl" | "control" => Key::Ctrl,
            "shift" => Key::Shift,
            "alt" | "option" => Key::Alt,
            "meta" | "win" | "super" | "cmd" => Key::Meta,
            "space" => Key::Space,
            "esc" | "escape" => Key::Escape,
            single if single.len() == 1 => {
                let c = single.chars().next().ok_or_else(|| anyhow!("Empty key"))?;
                if !c.is_ascii_alphanumeric() {
                    bail!("Unsupported key {s:?}");
                }
                Key::Char(c)
            }
            function if function.starts_with('f') => match function[1..].parse::<u8>() {
                Ok(n @ 1..=12) => Key::Function(n),
                _ => bail!("Unsupported key {s:?}"),
            },
            _ => bail!("Unsupported key {s:?}"),
        };
        Ok(key)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Ctrl => write!(f, "ctrl"),
            Key::Shift => write!(f, "shift"),
            Key::Alt => write!(f, "alt"),
            Key::Meta => write!(f, "meta"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Function(n) => write!(f, "f{n}"),
            Key::Space => write!(f, "space"),
            Key::Escape => write!(f, "escape"),
        }
    }
}

/// Set of keys that must be held together, e.g. `ctrl+shift+q`. Exactly one non-modifier key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    keys: BTreeSet<Key>,
}

impl KeyCombination {
    pub fn keys(&self) -> &BTreeSet<Key> {
        &self.keys
    }
}

impl FromStr for KeyCombination {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = BTreeSet::new();
        for part in s.split('+') {
            let key: Key = part.parse()?;
            if !keys.insert(key) {
                bail!("Key {key} repeats in {s:?}");
            }
        }
        let main_keys = keys.iter().filter(|v| !v.is_modifier()).count();
        if main_keys != 1 {
            bail!("Shortcut {s:?} needs exactly one non-modifier key");
        }
        Ok(Self { keys })
    }
}

impl Display for KeyCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .keys
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("+");
        f.write_str(&text)
    }
}

impl Serialize for KeyCombination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyCombination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
