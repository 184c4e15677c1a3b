use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_categories::Categories;
use super::m20240101_000003_create_locations::Locations;

#[derive(DeriveMigrationName)]
pub struct Migration;

pub(crate) fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(crate::id_column(Posts::Id))
        .col(
            ColumnDef::new(Posts::Title)
                .string_len(256)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Posts::Text).text().not_null().unique_key())
        .col(
            ColumnDef::new(Posts::PubDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
        .col(ColumnDef::new(Posts::LocationId).big_integer().null())
        .col(ColumnDef::new(Posts::CategoryId).big_integer().null())
        .col(ColumnDef::new(Posts::Image).string().null())
        .col(
            ColumnDef::new(Posts::IsPublished)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(crate::created_at_column(Posts::CreatedAt))
        .foreign_key(
            ForeignKey::create()
                .name("fk-posts-author_id")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-posts-category_id")
                .from(Posts::Table, Posts::CategoryId)
                .to(Categories::Table, Categories::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-posts-location_id")
                .from(Posts::Table, Posts::LocationId)
                .to(Locations::Table, Locations::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;

        // Feeds filter on these and sort by pub_date.
        manager
            .create_index(
                Index::create()
                    .name("idx-posts-pub_date")
                    .table(Posts::Table)
                    .col(Posts::PubDate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-posts-author_id")
                    .table(Posts::Table)
                    .col(Posts::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Posts {
    Table,
    Id,
    Title,
    Text,
    PubDate,
    AuthorId,
    LocationId,
    CategoryId,
    Image,
    IsPublished,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_location_are_detached_on_delete() {
        let sql = posts_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "posts""#));
        assert_eq!(sql.matches("ON DELETE SET NULL").count(), 2);
        assert_eq!(sql.matches("ON DELETE CASCADE").count(), 1);
        assert!(sql.contains(r#"REFERENCES "users" ("id")"#));
    }
}
