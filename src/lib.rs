use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod store;
pub mod terminal;

pub use cache::MemoCache;
pub use config::StoreConfig;
pub use error::StoreError;
pub use render::{display_width, format_package_results, ListingEntry};
pub use store::{HttpTransport, MirrorTransport, RegistryStore};

// Module category enum
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Adapter,
    Plugin,
    Driver,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Adapter, Category::Plugin, Category::Driver];

    // Key accepted on the command line
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Adapter => "adapter",
            Category::Plugin => "plugin",
            Category::Driver => "driver",
        }
    }

    /// Name of the registry dataset backing this category, as used in mirror URLs.
    #[must_use]
    pub fn module_name(self) -> &'static str {
        match self {
            Category::Adapter => "adapters",
            Category::Plugin => "plugins",
            Category::Driver => "drivers",
        }
    }

    // Wrap parsed info into the record variant for this category
    #[must_use]
    pub fn wrap(self, info: ModuleInfo) -> ModuleRecord {
        match self {
            Category::Adapter => ModuleRecord::Adapter(info),
            Category::Plugin => ModuleRecord::Plugin(info),
            Category::Driver => ModuleRecord::Driver(info),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| StoreError::InvalidCategory(s.to_string()))
    }
}

// One element of a registry JSON array
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub module_name: String,
    pub project_link: String,
    pub desc: String,
}

impl ModuleInfo {
    /// Case-insensitive substring match against every text field.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.module_name, &self.project_link, &self.desc]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModuleRecord {
    Adapter(ModuleInfo),
    Plugin(ModuleInfo),
    Driver(ModuleInfo),
}

impl ModuleRecord {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            ModuleRecord::Adapter(_) => Category::Adapter,
            ModuleRecord::Plugin(_) => Category::Plugin,
            ModuleRecord::Driver(_) => Category::Driver,
        }
    }

    #[must_use]
    pub fn info(&self) -> &ModuleInfo {
        match self {
            ModuleRecord::Adapter(info) | ModuleRecord::Plugin(info) | ModuleRecord::Driver(info) => info,
        }
    }
}

impl ListingEntry for ModuleInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_link(&self) -> &str {
        &self.project_link
    }

    fn desc(&self) -> &str {
        &self.desc
    }
}

impl ListingEntry for ModuleRecord {
    fn name(&self) -> &str {
        &self.info().name
    }

    fn project_link(&self) -> &str {
        &self.info().project_link
    }

    fn desc(&self) -> &str {
        &self.info().desc
    }
}
