//! Table bootstrap
//!
//! Creates the `cities` and `customers` tables from the SeaORM entity
//! definitions when they are missing.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{cities, customers};

/// Create every table the API needs, skipping ones that already exist
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, cities::Entity).await?;
    create_table(db, customers::Entity).await?;
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = %table, "Table ensured");
    Ok(())
}
