// Relationship resolvers and context helpers

use async_graphql::{Context, Result};
use async_trait::async_trait;
use booklist_log::debug;
use booklist_store::{Entity, Filter, Repository, SharedStore};

use crate::error::GraphQLError;
use crate::model::{Author, Book};

/// A relationship field: given a parent record, produce the related
/// record(s) with a storage lookup.
///
/// Only invoked when the query selects the field, so unrequested
/// relationships cost nothing.
#[async_trait]
pub trait RelationResolver: Send + Sync {
    type Parent: Send + Sync;
    type Output: Send;

    async fn resolve(
        parent: &Self::Parent,
        store: &SharedStore,
    ) -> Result<Self::Output, GraphQLError>;
}

/// `Author.books`: books whose `authorId` equals the author's id.
pub struct AuthorBooks;

#[async_trait]
impl RelationResolver for AuthorBooks {
    type Parent = Author;
    type Output = Vec<Book>;

    async fn resolve(parent: &Author, store: &SharedStore) -> Result<Vec<Book>, GraphQLError> {
        debug!(target: "booklist::resolver", "books for author {}", parent.id.as_str());
        let books = Repository::<Book>::new(store.clone())
            .find(&Filter::eq("authorId", parent.id.as_str()))
            .await?;
        Ok(books)
    }
}

/// `Book.author`: the author named by `authorId`, if it exists.
pub struct BookAuthor;

#[async_trait]
impl RelationResolver for BookAuthor {
    type Parent = Book;
    type Output = Option<Author>;

    async fn resolve(parent: &Book, store: &SharedStore) -> Result<Option<Author>, GraphQLError> {
        debug!(target: "booklist::resolver", "author {} for book {}", parent.author_id.as_str(), parent.id.as_str());
        let author = Repository::<Author>::new(store.clone())
            .find_by_id(parent.author_id.as_str())
            .await?;
        Ok(author)
    }
}

/// Context extension for reaching the injected record store
pub trait ContextExt {
    fn store(&self) -> Result<&SharedStore>;

    fn repository<T: Entity>(&self) -> Result<Repository<T>> {
        Ok(Repository::new(self.store()?.clone()))
    }
}

impl ContextExt for Context<'_> {
    fn store(&self) -> Result<&SharedStore> {
        self.data::<SharedStore>()
    }
}
