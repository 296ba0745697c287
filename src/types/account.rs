use serde::{Deserialize, Serialize};

/// One of the two isolated identities a window operates under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AccountType {
    #[default]
    Personal,
    Work,
}

impl AccountType {
    /// Parses a loosely-typed account name. Anything unrecognized is `Personal`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" | "business" | "school" => AccountType::Work,
            _ => AccountType::Personal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Personal => "personal",
            AccountType::Work => "work",
        }
    }
}

impl From<String> for AccountType {
    fn from(value: String) -> Self {
        AccountType::parse(&value)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An isolated storage scope (cookies, cache, local storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Personal,
    Work,
}

impl Partition {
    /// Stable partition identifier, also used as the profile directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Personal => "persist:personal",
            Partition::Work => "persist:work",
        }
    }

    /// Directory holding this partition's web data under `root`.
    pub fn data_dir(&self, root: &std::path::Path) -> std::path::PathBuf {
        let name = match self {
            Partition::Personal => "personal",
            Partition::Work => "work",
        };
        root.join("partitions").join(name)
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
