use serde::{Deserialize, Serialize};

use crate::pagination::PaginationInfo;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    #[serde(default)]
    pub name: AuthorName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FactRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub user: Option<Author>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FactsPage {
    #[serde(default)]
    pub records: Vec<FactRecord>,
    #[serde(rename = "_pagination")]
    pub pagination: PaginationInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactViewModel {
    pub text: String,
    pub author_name: String,
    pub upvotes: i64,
}

// an absent author renders as two empty names joined by a space
pub fn author_display_name(user: Option<&Author>) -> String {
    let name = user.map(|u| &u.name);
    format!(
        "{} {}",
        name.map(|n| n.first.as_str()).unwrap_or(""),
        name.map(|n| n.last.as_str()).unwrap_or("")
    )
}

pub fn project_record(record: &FactRecord) -> FactViewModel {
    FactViewModel {
        text: record.text.clone(),
        author_name: author_display_name(record.user.as_ref()),
        upvotes: record.upvotes,
    }
}

pub fn project(records: &[FactRecord]) -> Vec<FactViewModel> {
    records.iter().map(project_record).collect()
}
