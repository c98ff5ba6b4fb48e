//! Boolean flag sets keyed by a fixed enum.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Top-level navigable pages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Page {
    Home,
    About,
    Contact,
    Services,
    Gallery,
    Blog,
}

impl Page {
    /// Key used in anchors and configuration files.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Navigation label: the key with its first letter capitalized.
    pub fn label(self) -> String {
        capitalize(self.key())
    }
}

/// Optional content blocks of the home page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Section {
    Hero,
    Features,
    Testimonials,
    Gallery,
    Cta,
    ContactForm,
    Team,
    Blog,
    Faq,
    Portfolio,
    Timeline,
}

impl Section {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// A set of boolean flags over every variant of `K`.
///
/// Keys missing from a configuration file read as `false` and unknown keys
/// are skipped. Serialization always writes the full key set in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet<K: Ord>(BTreeMap<K, bool>);

impl<K> FlagSet<K>
where
    K: Copy + Ord + IntoEnumIterator,
{
    /// A set with every flag off.
    pub fn none() -> Self {
        Self(K::iter().map(|k| (k, false)).collect())
    }

    /// A set with exactly the given flags on.
    pub fn from_enabled(enabled: impl IntoIterator<Item = K>) -> Self {
        let mut set = Self::none();
        for key in enabled {
            set.set(key, true);
        }
        set
    }

    pub fn get(&self, key: K) -> bool {
        self.0.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: K, value: bool) {
        self.0.insert(key, value);
    }

    /// Enabled keys in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = K> + '_ {
        K::iter().filter(move |k| self.get(*k))
    }
}

impl<K> Default for FlagSet<K>
where
    K: Copy + Ord + IntoEnumIterator,
{
    fn default() -> Self {
        Self::none()
    }
}

impl<K> Serialize for FlagSet<K>
where
    K: Copy + Ord + IntoEnumIterator + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keys: Vec<K> = K::iter().collect();
        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(&key, &self.get(key))?;
        }
        map.end()
    }
}

impl<'de, K> Deserialize<'de> for FlagSet<K>
where
    K: Copy + Ord + IntoEnumIterator + Into<&'static str>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut set = Self::none();

        for (name, value) in raw {
            match K::iter().find(|k| Into::<&'static str>::into(*k) == name) {
                Some(key) => set.set(key, value),
                None => tracing::warn!("Ignoring unknown flag '{}'", name),
            }
        }

        Ok(set)
    }
}

/// Capitalize the first letter of a string.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
