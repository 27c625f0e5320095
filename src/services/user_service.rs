// ==================== USER MANAGEMENT ====================
// Ciclo de vida do usuário: criação, consulta, patch e soft delete
// Toda validação acontece aqui, antes de tocar o storage

use uuid::Uuid;

use crate::database::users::UserStore;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::error::AppError;
use crate::utils::validation::{
    validate_email, validate_name, validate_surname, validate_update_payload,
};

fn not_found(user_id: Uuid) -> AppError {
    AppError::NotFound(format!("User with id {} not found.", user_id))
}

/// POST /user/ - Valida os campos, gera o user_id e grava o usuário ativo
pub async fn create_user(
    store: &dyn UserStore,
    request: CreateUserRequest,
) -> Result<User, AppError> {
    log::info!("📝 Creating user {} {}", request.name, request.surname);

    validate_name(&request.name)?;
    validate_surname(&request.surname)?;
    validate_email(&request.email)?;

    let user = User {
        user_id: Uuid::new_v4(),
        name: request.name,
        surname: request.surname,
        email: request.email,
        is_active: true,
    };

    let user = store.insert(user).await?;
    log::info!("✅ User {} created successfully", user.user_id);

    Ok(user)
}

/// GET /user/ - Busca o usuário pelo id, ativo ou não
pub async fn get_user(store: &dyn UserStore, user_id: Uuid) -> Result<User, AppError> {
    log::info!("👤 Fetching user {}", user_id);

    store
        .select_by_id(user_id)
        .await?
        .ok_or_else(|| not_found(user_id))
}

/// PATCH /user/ - Aplica os campos informados sobre um usuário ativo
///
/// O payload é validado antes de consultar o storage; usuário deletado
/// conta como ausente.
pub async fn update_user(
    store: &dyn UserStore,
    user_id: Uuid,
    request: UpdateUserRequest,
) -> Result<Uuid, AppError> {
    log::info!("🔧 Updating user {}", user_id);

    validate_update_payload(&request)?;

    let matched = store.update_fields(user_id, &request).await?;
    if matched == 0 {
        return Err(not_found(user_id));
    }

    log::info!("✅ User {} updated successfully", user_id);

    Ok(user_id)
}

/// DELETE /user/ - Marca o usuário como inativo (soft delete, idempotente)
pub async fn delete_user(store: &dyn UserStore, user_id: Uuid) -> Result<Uuid, AppError> {
    log::info!("🗑️  Deleting user {}", user_id);

    let matched = store.set_inactive(user_id).await?;
    if matched == 0 {
        return Err(not_found(user_id));
    }

    log::info!("✅ User {} deleted successfully", user_id);

    Ok(user_id)
}
