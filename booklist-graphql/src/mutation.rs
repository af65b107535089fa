// Root mutation fields

use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use booklist_log::info;

use crate::error::{GraphQLError, IntoFieldResult};
use crate::model::{Author, Book, NewAuthor, NewBook};
use crate::resolver::ContextExt;

/// Create operations. Each successful call appends exactly one record.
#[derive(Default)]
pub struct MutationRoot {
    strict_references: bool,
}

impl MutationRoot {
    pub fn new(strict_references: bool) -> Self {
        Self { strict_references }
    }
}

#[Object]
impl MutationRoot {
    /// Create an author
    async fn add_author(&self, ctx: &Context<'_>, name: String, age: Option<i32>) -> Result<Author> {
        let author = ctx
            .repository::<Author>()?
            .insert(&NewAuthor { name, age })
            .await
            .into_field_result()?;

        info!(target: "booklist::mutation", "created author {}", author.id.as_str());
        Ok(author)
    }

    /// Create a book. `authorId` is only checked when strict references
    /// are enabled.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        genre: Option<String>,
        author_id: ID,
    ) -> Result<Book> {
        if self.strict_references {
            let exists = ctx
                .repository::<Author>()?
                .find_by_id(author_id.as_str())
                .await
                .into_field_result()?
                .is_some();
            if !exists {
                return Err(GraphQLError::AuthorNotFound(author_id.0).extend());
            }
        }

        let book = ctx
            .repository::<Book>()?
            .insert(&NewBook {
                name,
                genre,
                author_id: author_id.0,
            })
            .await
            .into_field_result()?;

        info!(target: "booklist::mutation", "created book {}", book.id.as_str());
        Ok(book)
    }
}
