// Root query fields

use async_graphql::{Context, ID, Object, Result};

use crate::error::IntoFieldResult;
use crate::model::{Author, Book};
use crate::resolver::ContextExt;

/// Entry points into the graph.
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A single book by id, or null if none matches
    async fn book(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Book>> {
        let Some(id) = id else {
            return Ok(None);
        };
        ctx.repository::<Book>()?
            .find_by_id(id.0)
            .await
            .into_field_result()
    }

    /// A single author by id, or null if none matches
    async fn author(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Author>> {
        let Some(id) = id else {
            return Ok(None);
        };
        ctx.repository::<Author>()?
            .find_by_id(id.0)
            .await
            .into_field_result()
    }

    /// Every stored book
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        ctx.repository::<Book>()?.all().await.into_field_result()
    }

    /// Every stored author
    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        ctx.repository::<Author>()?.all().await.into_field_result()
    }
}
