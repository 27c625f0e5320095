use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use uuid::Uuid;

use crate::database::MongoDB;
use crate::models::{UpdateUserRequest, User};
use crate::utils::error::AppError;

pub const USERS_COLLECTION: &str = "users";

/// Storage contract for the user entity: row-level CRUD by identifier.
/// Each method is exactly one storage round-trip.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<User, AppError>;

    async fn select_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError>;

    /// Patches the supplied fields on an active user. Callers must supply
    /// at least one field (MongoDB rejects an empty `$set`).
    /// Returns the number of matched rows (0 = missing or already deleted).
    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &UpdateUserRequest,
    ) -> Result<u64, AppError>;

    /// Flips `is_active` to false. Matches on id alone, so repeated
    /// deletes keep matching. Returns the number of matched rows.
    async fn set_inactive(&self, user_id: Uuid) -> Result<u64, AppError>;
}

pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: User) -> Result<User, AppError> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(user)
    }

    async fn select_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "user_id": user_id.to_string() })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &UpdateUserRequest,
    ) -> Result<u64, AppError> {
        let mut set = Document::new();
        if let Some(name) = &fields.name {
            set.insert("name", name.as_str());
        }
        if let Some(surname) = &fields.surname {
            set.insert("surname", surname.as_str());
        }
        if let Some(email) = &fields.email {
            set.insert("email", email.as_str());
        }

        // Usuários deletados são imutáveis: o filtro só alcança linhas ativas
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id.to_string(), "is_active": true },
                doc! { "$set": set },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.matched_count)
    }

    async fn set_inactive(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id.to_string() },
                doc! { "$set": { "is_active": false } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.matched_count)
    }
}
