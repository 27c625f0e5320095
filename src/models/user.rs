use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Documento da collection "users". O `user_id` é o identificador primário
/// e é serializado como string no MongoDB.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// Partial update: somente os campos presentes são alterados.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateUserResponse {
    pub updated_user_id: Uuid,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteUserResponse {
    pub deleted_user_id: Uuid,
}
