mod document_client_negative_test;
mod storable_derive_test;

use docstash_derive::{Packable, Storable};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub affiliation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "doc_id", database = "library", collection = "papers")]
pub struct Paper {
    pub doc_id: String,
    pub title: String,
    pub year: i32,
    pub authors: HashMap<String, Author>,
    pub tags: Vec<String>,
}

impl Paper {
    pub fn new(doc_id: &str) -> Self {
        Paper {
            doc_id: doc_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, handle: &str, name: &str) -> Self {
        self.authors.insert(
            handle.to_string(),
            Author {
                name: name.to_string(),
                affiliation: None,
            },
        );
        self
    }

    pub fn fake(doc_id: &str) -> Self {
        let mut paper = Paper::new(doc_id);
        paper.title = Sentence(3..8).fake();
        paper.year = (1950..2025).fake();
        for _ in 0..(1..4).fake::<usize>() {
            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            paper.authors.insert(
                format!("{}{}", &first[..1], last).to_lowercase(),
                Author {
                    name: format!("{} {}", first, last),
                    affiliation: Some(CompanyName().fake()),
                },
            );
        }
        paper.tags = (0..(0..5).fake::<usize>())
            .map(|i| format!("tag-{}", i))
            .collect();
        paper
    }
}

/// Keyed on a nested attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "meta.code", database = "library", collection = "reports")]
pub struct Report {
    pub meta: ReportMeta,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub code: String,
    pub owner: String,
}

impl Report {
    pub fn fake(code: &str) -> Self {
        Report {
            meta: ReportMeta {
                code: code.to_string(),
                owner: Name().fake(),
            },
            body: Sentence(5..12).fake(),
        }
    }
}

/// Uses the record identifier itself as the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "_id", database = "library", collection = "labels")]
pub struct Label {
    #[serde(rename = "_id")]
    pub id: String,
    pub color: String,
}

/// Carries an attribute that is never stored, only injected on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "sku", database = "shop", collection = "items", journal = true)]
pub struct Item {
    pub sku: i64,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub warehouse: Option<String>,
}

/// Shares `Item`'s collection but keys on a 32-bit sku.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(key = "sku", database = "shop", collection = "items")]
pub struct LegacyItem {
    pub sku: i32,
    pub name: String,
}
