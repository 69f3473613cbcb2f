pub use sea_orm_migration::prelude::*;

mod m20260712_000001_add_bingo_core;
mod m20260726_000001_add_reset_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260712_000001_add_bingo_core::Migration),
            Box::new(m20260726_000001_add_reset_history::Migration),
        ]
    }
}
