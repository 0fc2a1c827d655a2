use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub const DEFAULT_BRANCHES: [&str; 5] = [
    "Head Office - Riyadh",
    "Jeddah Branch",
    "Dammam Branch",
    "Al-Kharj Warehouse",
    "Qassim Branch",
];

pub fn default_branches() -> Vec<Branch> {
    DEFAULT_BRANCHES
        .iter()
        .enumerate()
        .map(|(i, name)| Branch {
            id: (i + 1).to_string(),
            name: name.to_string(),
            location: None,
        })
        .collect()
}
