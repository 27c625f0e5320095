use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::users::UserStore;
use crate::models::{UpdateUserRequest, User};
use crate::utils::error::AppError;

/// In-memory `UserStore` backed by a `RwLock<HashMap>`. Used by the
/// test suites; mirrors the row-matching semantics of the Mongo store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AppError::Database(e.to_string()))?;
        users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn select_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let users = self
            .users
            .read()
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.get(&user_id).cloned())
    }

    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &UpdateUserRequest,
    ) -> Result<u64, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Só linhas ativas aceitam patch, igual ao filtro do Mongo
        match users.get_mut(&user_id).filter(|user| user.is_active) {
            Some(user) => {
                if let Some(name) = &fields.name {
                    user.name = name.clone();
                }
                if let Some(surname) = &fields.surname {
                    user.surname = surname.clone();
                }
                if let Some(email) = &fields.email {
                    user.email = email.clone();
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_inactive(&self, user_id: Uuid) -> Result<u64, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AppError::Database(e.to_string()))?;

        match users.get_mut(&user_id) {
            Some(user) => {
                user.is_active = false;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
