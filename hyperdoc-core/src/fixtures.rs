//! Shared test records for the marshal and unmarshal engine tests.
//!
//! The records cover the capability spectrum: identity-only, embedded
//! related structs, id-only relationships, not-loaded relationships, type
//! overrides, custom links/meta, and a cyclic graph.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::document::{Attributes, Identifier, Link, Links, Meta};
use crate::error::{DocumentError, DocumentResult};
use crate::resource::{
    Cardinality, Reference, ReferenceId, Resource, ResourceTarget, ServerInformation,
    encode_attributes,
};

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct Chocolate {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub taste: String,
}

impl Resource for Chocolate {
    fn kind(&self) -> &str {
        "chocolate"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new(&self.id)
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }
}

impl ResourceTarget for Chocolate {
    fn kind(&self) -> &str {
        "chocolate"
    }

    fn set_identifier(&mut self, identifier: Identifier) -> DocumentResult<()> {
        self.id = identifier.id;
        Ok(())
    }

    fn set_attributes(&mut self, attributes: &Attributes) -> DocumentResult<()> {
        if let Some(name) = attributes.get("name").and_then(|value| value.as_str()) {
            self.name = name.to_string();
        }
        if let Some(taste) = attributes.get("taste").and_then(|value| value.as_str()) {
            self.taste = taste.to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct Category {
    #[serde(skip)]
    pub id: String,
    pub name: String,
}

impl Resource for Category {
    fn kind(&self) -> &str {
        "category"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new(&self.id)
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct User {
    #[serde(skip)]
    pub id: String,
    pub username: String,
    #[serde(skip)]
    pub chocolates: Vec<Chocolate>,
    #[serde(skip)]
    pub chocolate_ids: Vec<String>,
    #[serde(skip)]
    pub type_override: Option<String>,
}

impl User {
    pub fn named(id: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for User {
    fn kind(&self) -> &str {
        "user"
    }

    fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.clone(),
            lid: None,
            type_name: self.type_override.clone(),
        }
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }

    fn references(&self) -> Option<Vec<Reference>> {
        Some(vec![Reference::new("chocolates", "sweets")])
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        let edges = if self.chocolates.is_empty() {
            self.chocolate_ids
                .iter()
                .map(|id| ReferenceId::new(id.as_str(), "chocolates", "sweets"))
                .collect()
        } else {
            self.chocolates
                .iter()
                .map(|chocolate| ReferenceId::new(chocolate.id.as_str(), "chocolates", "sweets"))
                .collect()
        };
        Some(edges)
    }

    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        Some(
            self.chocolates
                .iter()
                .map(|chocolate| chocolate as &dyn Resource)
                .collect(),
        )
    }
}

impl ResourceTarget for User {
    fn kind(&self) -> &str {
        "user"
    }

    fn set_identifier(&mut self, identifier: Identifier) -> DocumentResult<()> {
        self.id = identifier.id;
        Ok(())
    }

    fn set_attributes(&mut self, attributes: &Attributes) -> DocumentResult<()> {
        if let Some(username) = attributes.get("username").and_then(|value| value.as_str()) {
            self.username = username.to_string();
        }
        Ok(())
    }

    fn set_to_many_references(
        &mut self,
        name: &str,
        identifiers: &[Identifier],
    ) -> DocumentResult<()> {
        if name != "sweets" {
            return Err(DocumentError::UnknownRelationship(name.to_string()));
        }

        self.chocolate_ids = identifiers
            .iter()
            .map(|identifier| identifier.id.clone())
            .collect();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct Comment {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub lid: i64,
    pub text: String,
    #[serde(skip)]
    pub sub_comments: Vec<Comment>,
}

impl Comment {
    pub fn with_text(id: i64, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for Comment {
    fn kind(&self) -> &str {
        "comment"
    }

    fn identifier(&self) -> Identifier {
        Identifier {
            id: self.id.to_string(),
            lid: (self.lid != 0).then(|| self.lid.to_string()),
            type_name: None,
        }
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }

    fn references(&self) -> Option<Vec<Reference>> {
        Some(vec![Reference::new("comments", "comments")])
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        Some(
            self.sub_comments
                .iter()
                .map(|comment| ReferenceId {
                    id: comment.id.to_string(),
                    lid: (comment.lid != 0).then(|| comment.lid.to_string()),
                    type_name: "comments".to_string(),
                    name: "comments".to_string(),
                    cardinality: Cardinality::Default,
                })
                .collect(),
        )
    }

    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        Some(
            self.sub_comments
                .iter()
                .map(|comment| comment as &dyn Resource)
                .collect(),
        )
    }
}

impl ResourceTarget for Comment {
    fn kind(&self) -> &str {
        "comment"
    }

    fn set_identifier(&mut self, identifier: Identifier) -> DocumentResult<()> {
        if !identifier.id.is_empty() {
            self.id = identifier.id.parse()?;
        }
        if let Some(lid) = identifier.lid {
            self.lid = lid.parse()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct Post {
    #[serde(skip)]
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub comments: Vec<Comment>,
    #[serde(skip)]
    pub comment_ids: Vec<i64>,
    #[serde(skip)]
    pub comments_not_loaded: bool,
    #[serde(skip)]
    pub author: Option<User>,
    #[serde(skip)]
    pub author_id: Option<String>,
    #[serde(skip)]
    pub author_not_loaded: bool,
}

impl Post {
    pub fn titled(id: i64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for Post {
    fn kind(&self) -> &str {
        "post"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new(self.id.to_string())
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }

    fn references(&self) -> Option<Vec<Reference>> {
        Some(vec![
            Reference {
                type_name: "comments".to_string(),
                name: "comments".to_string(),
                not_loaded: self.comments_not_loaded,
                cardinality: Cardinality::Default,
            },
            Reference {
                type_name: "users".to_string(),
                name: "author".to_string(),
                not_loaded: self.author_not_loaded,
                cardinality: Cardinality::Default,
            },
        ])
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        let mut edges = Vec::new();

        if let Some(author) = &self.author {
            edges.push(ReferenceId::new(author.id.as_str(), "users", "author"));
        } else if let Some(author_id) = &self.author_id {
            edges.push(ReferenceId::new(author_id.as_str(), "users", "author"));
        }

        if self.comments.is_empty() {
            for id in &self.comment_ids {
                edges.push(ReferenceId::new(id.to_string(), "comments", "comments"));
            }
        } else {
            for comment in &self.comments {
                edges.push(ReferenceId {
                    id: comment.id.to_string(),
                    lid: (comment.lid != 0).then(|| comment.lid.to_string()),
                    type_name: "comments".to_string(),
                    name: "comments".to_string(),
                    cardinality: Cardinality::Default,
                });
            }
        }

        Some(edges)
    }

    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        let mut records: Vec<&dyn Resource> = Vec::new();

        if let Some(author) = &self.author {
            records.push(author);
        }
        for comment in &self.comments {
            records.push(comment);
        }

        Some(records)
    }
}

impl ResourceTarget for Post {
    fn kind(&self) -> &str {
        "post"
    }

    fn set_identifier(&mut self, identifier: Identifier) -> DocumentResult<()> {
        if !identifier.id.is_empty() {
            self.id = identifier.id.parse()?;
        }
        Ok(())
    }

    fn set_attributes(&mut self, attributes: &Attributes) -> DocumentResult<()> {
        if let Some(title) = attributes.get("title").and_then(|value| value.as_str()) {
            self.title = title.to_string();
        }
        Ok(())
    }

    fn set_to_one_reference(
        &mut self,
        name: &str,
        identifier: Option<&Identifier>,
    ) -> DocumentResult<()> {
        if name != "author" {
            return Err(DocumentError::UnknownRelationship(name.to_string()));
        }

        self.author_id = identifier.map(|identifier| identifier.id.clone());
        Ok(())
    }

    fn set_to_many_references(
        &mut self,
        name: &str,
        identifiers: &[Identifier],
    ) -> DocumentResult<()> {
        if name != "comments" {
            return Err(DocumentError::UnknownRelationship(name.to_string()));
        }

        self.comment_ids = identifiers
            .iter()
            .map(|identifier| identifier.id.parse())
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

/// A self-referential record; cycles are closed after construction through
/// the `inspiring` cell.
#[derive(Debug, Default, Serialize)]
pub(crate) struct Question {
    #[serde(skip)]
    pub id: String,
    pub text: String,
    #[serde(skip)]
    pub inspiring: OnceLock<Arc<Question>>,
}

impl Question {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            inspiring: OnceLock::new(),
        }
    }
}

impl Resource for Question {
    fn kind(&self) -> &str {
        "question"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new(&self.id)
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(self)
    }

    fn references(&self) -> Option<Vec<Reference>> {
        Some(vec![Reference::new("questions", "inspiringQuestion")])
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        Some(
            self.inspiring
                .get()
                .map(|question| {
                    vec![ReferenceId::new(
                        question.id.as_str(),
                        "questions",
                        "inspiringQuestion",
                    )]
                })
                .unwrap_or_default(),
        )
    }

    fn referenced_records(&self) -> Option<Vec<&dyn Resource>> {
        Some(
            self.inspiring
                .get()
                .map(|question| vec![&**question as &dyn Resource])
                .unwrap_or_default(),
        )
    }
}

/// A record exercising every cosmetic capability: custom links, resource
/// meta, relationship meta, and a permanently not-loaded author.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Article;

impl Resource for Article {
    fn kind(&self) -> &str {
        "article"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new("someID")
    }

    fn references(&self) -> Option<Vec<Reference>> {
        Some(vec![Reference {
            type_name: "users".to_string(),
            name: "author".to_string(),
            not_loaded: true,
            cardinality: Cardinality::ToOne,
        }])
    }

    fn reference_ids(&self) -> Option<Vec<ReferenceId>> {
        Some(Vec::new())
    }

    fn links(&self, base_url: &str) -> Option<Links> {
        let mut meta = Meta::new();
        meta.insert("format".to_string(), "pdf".into());

        let mut links = Links::new();
        links.insert("self".to_string(), Link::new(format!("{base_url}/canonical")));
        links.insert(
            "print".to_string(),
            Link::with_meta(format!("{base_url}/print"), meta),
        );
        Some(links)
    }

    fn meta(&self) -> Option<Meta> {
        let mut meta = Meta::new();
        meta.insert("access_count".to_string(), 15.into());
        Some(meta)
    }

    fn relationship_meta(&self, _base_url: &str) -> Option<BTreeMap<String, Meta>> {
        let mut author = Meta::new();
        author.insert("reviewed".to_string(), true.into());
        Some(BTreeMap::from([("author".to_string(), author)]))
    }
}

/// A record whose attribute payload does not encode to an object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrokenAttributes;

impl Resource for BrokenAttributes {
    fn kind(&self) -> &str {
        "broken"
    }

    fn identifier(&self) -> Identifier {
        Identifier::new("1")
    }

    fn attributes(&self) -> DocumentResult<Attributes> {
        encode_attributes(&serde_json::json!(42))
    }
}

pub(crate) struct DemoServer;

impl ServerInformation for DemoServer {
    fn base_url(&self) -> String {
        "http://my.domain".to_string()
    }

    fn path_prefix(&self) -> String {
        "v1".to_string()
    }
}

pub(crate) struct BareServer;

impl ServerInformation for BareServer {
    fn base_url(&self) -> String {
        "http://my.domain".to_string()
    }

    fn path_prefix(&self) -> String {
        String::new()
    }
}
