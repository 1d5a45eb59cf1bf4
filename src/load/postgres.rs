use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, TransactionTrait,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::entity::users;
use super::sink::Sink;
use super::types::SinkError;
use crate::transform::User;

/// PostgreSQL sink writing [`User`] records into the `users` table.
///
/// Every write runs in its own transaction and is refused once `cancel` has
/// fired. A transaction dropped before `commit` is rolled back, so an error
/// anywhere in a batch leaves the table untouched.
pub struct PostgresSink {
    db: DatabaseConnection,
}

impl PostgresSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(connection_string: &str) -> Result<Self, SinkError> {
        let db = Database::connect(connection_string).await?;
        info!("connected to postgresql");
        Ok(Self::new(db))
    }

    /// Creates the `users` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), SinkError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut stmt = schema.create_table_from_entity(users::Entity);
        stmt.if_not_exists();

        self.db.execute(backend.build(&stmt)).await?;
        Ok(())
    }
}

fn to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: NotSet,
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        date_of_birth: Set(user.date_of_birth),
        city: Set(user.address.city.clone()),
        street_name: Set(user.address.street_name.clone()),
        street_address: Set(user.address.street_address.clone()),
        zip_code: Set(user.address.zip_code.clone()),
        state: Set(user.address.state.clone()),
        country: Set(user.address.country.clone()),
        latitude: Set(user.address.latitude),
        longitude: Set(user.address.longitude),
    }
}

#[async_trait]
impl Sink<User> for PostgresSink {
    async fn write_one(&self, cancel: &CancellationToken, item: &User) -> Result<(), SinkError> {
        if cancel.is_cancelled() {
            return Err(SinkError::Cancelled);
        }

        let txn = self.db.begin().await?;
        users::Entity::insert(to_active_model(item))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        debug!("inserted 1 user");
        Ok(())
    }

    async fn write_many(
        &self,
        cancel: &CancellationToken,
        items: &[User],
    ) -> Result<(), SinkError> {
        if items.is_empty() {
            return Ok(());
        }
        if cancel.is_cancelled() {
            return Err(SinkError::Cancelled);
        }

        let txn = self.db.begin().await?;
        users::Entity::insert_many(items.iter().map(to_active_model))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        debug!(count = items.len(), "bulk inserted users");
        Ok(())
    }
}
