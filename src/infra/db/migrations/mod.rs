//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250805_000001_create_users_table;
mod m20250805_000002_create_work_order_tables;
mod m20250812_000001_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250805_000001_create_users_table::Migration),
            Box::new(m20250805_000002_create_work_order_tables::Migration),
            Box::new(m20250812_000001_create_notifications_table::Migration),
        ]
    }
}
