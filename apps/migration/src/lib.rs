//! Database schema for users, categories, locations, posts and comments.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_categories;
mod m20240101_000003_create_locations;
mod m20240101_000004_create_posts;
mod m20240101_000005_create_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_categories::Migration),
            Box::new(m20240101_000003_create_locations::Migration),
            Box::new(m20240101_000004_create_posts::Migration),
            Box::new(m20240101_000005_create_comments::Migration),
        ]
    }
}

/// Auto-incrementing `BIGINT` primary key.
fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// `created_at` column filled in by the database.
fn created_at_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 5);
    }
}
