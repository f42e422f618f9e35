use sea_orm_migration::prelude::*;

mod m20260101_create_manga_list;
mod m20260102_add_created_at_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_create_manga_list::Migration),
            Box::new(m20260102_add_created_at_index::Migration),
        ]
    }
}
