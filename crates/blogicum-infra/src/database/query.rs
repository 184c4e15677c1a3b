//! SQL rendition of the post visibility rules and the per-post aggregates.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blogicum_core::domain::{CategoryRef, Location, LocationRef, PostSummary};
use blogicum_core::error::RepoError;
use blogicum_core::visibility::{PostQuery, Visibility};

use super::entity::{category, comment, location, post, user};
use super::postgres_base::map_db_err;

/// Posts matching `query`, unordered.
///
/// Public mode joins categories so that a post without a category stays
/// visible while one in an unpublished category does not.
pub fn visible_posts(query: &PostQuery) -> Select<post::Entity> {
    let mut select = post::Entity::find();

    if let Visibility::Public { now } = query.visibility {
        select = select
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::PubDate.lte(now))
            .filter(
                Condition::any()
                    .add(post::Column::CategoryId.is_null())
                    .add(category::Column::IsPublished.eq(true)),
            );
    }
    if let Some(author_id) = query.author_id {
        select = select.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = query.category_id {
        select = select.filter(post::Column::CategoryId.eq(category_id));
    }

    select
}

#[derive(Debug, FromQueryResult)]
struct CommentCount {
    post_id: i64,
    comment_count: i64,
}

/// Number of comments per post id. Posts without comments are absent.
pub async fn comment_counts(db: &DbConn, post_ids: &[i64]) -> Result<HashMap<i64, i64>, RepoError> {
    let rows = comment::Entity::find()
        .select_only()
        .column(comment::Column::PostId)
        .column_as(comment::Column::Id.count(), "comment_count")
        .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
        .group_by(comment::Column::PostId)
        .into_model::<CommentCount>()
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(rows
        .into_iter()
        .map(|row| (row.post_id, row.comment_count))
        .collect())
}

/// Attach author names, category/location references and comment counts.
pub async fn summarize(
    db: &DbConn,
    posts: Vec<post::Model>,
) -> Result<Vec<PostSummary>, RepoError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let category_ids: Vec<i64> = posts.iter().filter_map(|p| p.category_id).collect();
    let location_ids: Vec<i64> = posts.iter().filter_map(|p| p.location_id).collect();

    let counts = comment_counts(db, &ids).await?;

    let authors: HashMap<Uuid, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids))
        .all(db)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let categories: HashMap<i64, CategoryRef> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|c| {
                let reference = CategoryRef {
                    title: c.title,
                    slug: c.slug,
                };
                (c.id, reference)
            })
            .collect()
    };

    let locations: HashMap<i64, Location> = if location_ids.is_empty() {
        HashMap::new()
    } else {
        location::Entity::find()
            .filter(location::Column::Id.is_in(location_ids))
            .all(db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|l| (l.id, Location::from(l)))
            .collect()
    };

    let summaries = posts
        .into_iter()
        .map(|model| {
            let author_username = authors.get(&model.author_id).cloned().unwrap_or_default();
            let category = model.category_id.and_then(|id| categories.get(&id).cloned());
            let location = model
                .location_id
                .and_then(|id| locations.get(&id))
                .and_then(LocationRef::visible);
            let comment_count = counts.get(&model.id).copied().unwrap_or(0).max(0) as u64;

            PostSummary {
                post: model.into(),
                author_username,
                category,
                location,
                comment_count,
            }
        })
        .collect();

    Ok(summaries)
}
