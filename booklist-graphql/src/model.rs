// Entity types exposed by the schema

use async_graphql::{ComplexObject, Context, Result, SimpleObject};
use booklist_store::{Collection, Entity};
use serde::{Deserialize, Serialize};

use crate::error::IntoFieldResult;
use crate::resolver::{AuthorBooks, BookAuthor, ContextExt, RelationResolver};

/// An author. Books reference authors by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl Entity for Author {
    const COLLECTION: Collection = Collection::new("authors");
}

#[ComplexObject]
impl Author {
    /// Every book whose author is this author
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        AuthorBooks::resolve(self, ctx.store()?)
            .await
            .into_field_result()
    }
}

/// A book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Not exposed; clients follow `author` instead.
    #[graphql(skip)]
    pub author_id: String,
}

impl Entity for Book {
    const COLLECTION: Collection = Collection::new("books");
}

#[ComplexObject]
impl Book {
    /// The referenced author, or null when the reference dangles
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        BookAuthor::resolve(self, ctx.store()?)
            .await
            .into_field_result()
    }
}

/// Fields persisted by `addAuthor`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAuthor {
    pub name: String,
    pub age: Option<i32>,
}

/// Fields persisted by `addBook`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub name: String,
    pub genre: Option<String>,
    pub author_id: String,
}
