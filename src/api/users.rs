use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::metrics;
use crate::database::users::UserStore;
use crate::models::{
    CreateUserRequest, DeleteUserResponse, UpdateUserRequest, UpdateUserResponse, User,
};
use crate::services::user_service;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Registra as quatro rotas de /user/ - chamado pelo main e pelos testes
pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/", web::post().to(create_user))
            .route("/", web::get().to(get_user))
            .route("/", web::patch().to(update_user))
            .route("/", web::delete().to(delete_user)),
    );
}

fn failure_response(operation: &str, e: AppError) -> HttpResponse {
    metrics::increment_error_count();
    if matches!(e, AppError::Database(_)) {
        log::error!("❌ Failed to {}: {}", operation, e);
    } else {
        log::warn!("⚠️ Failed to {}: {}", operation, e);
    }
    e.error_response()
}

#[utoipa::path(
    post,
    path = "/user/",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 422, description = "Validation failed"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("📝 POST /user/ - Creating {} {}", request.name, request.surname);

    match user_service::create_user(store.get_ref(), request.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User created: {}", user.user_id);
            HttpResponse::Ok().json(user)
        }
        Err(e) => failure_response("create user", e),
    }
}

#[utoipa::path(
    get,
    path = "/user/",
    tag = "Users",
    params(
        ("user_id" = Uuid, Query, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("👤 GET /user/?user_id={}", query.user_id);

    match user_service::get_user(store.get_ref(), query.user_id).await {
        Ok(user) => {
            log::info!("✅ User {} retrieved", user.user_id);
            HttpResponse::Ok().json(user)
        }
        Err(e) => failure_response("get user", e),
    }
}

#[utoipa::path(
    patch,
    path = "/user/",
    tag = "Users",
    params(
        ("user_id" = Uuid, Query, description = "User identifier")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponse),
        (status = 404, description = "User not found or already deleted"),
        (status = 422, description = "Validation failed"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserIdQuery>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("🔧 PATCH /user/?user_id={}", query.user_id);

    match user_service::update_user(store.get_ref(), query.user_id, request.into_inner()).await {
        Ok(updated_user_id) => {
            log::info!("✅ User {} updated", updated_user_id);
            HttpResponse::Ok().json(UpdateUserResponse { updated_user_id })
        }
        Err(e) => failure_response("update user", e),
    }
}

#[utoipa::path(
    delete,
    path = "/user/",
    tag = "Users",
    params(
        ("user_id" = Uuid, Query, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User marked inactive", body = DeleteUserResponse),
        (status = 404, description = "User not found"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("🗑️  DELETE /user/?user_id={}", query.user_id);

    match user_service::delete_user(store.get_ref(), query.user_id).await {
        Ok(deleted_user_id) => {
            log::info!("✅ User {} deleted", deleted_user_id);
            HttpResponse::Ok().json(DeleteUserResponse { deleted_user_id })
        }
        Err(e) => failure_response("delete user", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryUserStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn seed_user(store: &MemoryUserStore) -> Uuid {
        let user = User {
            user_id: Uuid::new_v4(),
            name: "Nikolai".to_string(),
            surname: "Sviridov".to_string(),
            email: "lol@kek.com".to_string(),
            is_active: true,
        };
        let user_id = user.user_id;
        store.insert(user).await.unwrap();
        user_id
    }

    macro_rules! init_user_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($store.clone() as Arc<dyn UserStore>))
                    .configure(user_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_user_endpoint() {
        let store = Arc::new(MemoryUserStore::new());
        let app = init_user_app!(store);

        let req = test::TestRequest::post()
            .uri("/user/")
            .set_json(json!({
                "name": "Nikolai",
                "surname": "Sviridov",
                "email": "lol@kek.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "Nikolai");
        assert_eq!(body["surname"], "Sviridov");
        assert_eq!(body["email"], "lol@kek.com");
        assert_eq!(body["is_active"], true);

        // O usuário criado é consultável pelo id retornado
        let user_id = body["user_id"].as_str().unwrap().to_string();
        let req = test::TestRequest::get()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["user_id"], user_id.as_str());
        assert_eq!(fetched["is_active"], true);
    }

    #[actix_web::test]
    async fn test_create_user_invalid_name_returns_422() {
        let store = Arc::new(MemoryUserStore::new());
        let app = init_user_app!(store);

        let req = test::TestRequest::post()
            .uri("/user/")
            .set_json(json!({
                "name": "Nik0lai",
                "surname": "Sviridov",
                "email": "lol@kek.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "detail": "Name should contains only letters" }));
    }

    #[actix_web::test]
    async fn test_get_missing_user_returns_404() {
        let store = Arc::new(MemoryUserStore::new());
        let app = init_user_app!(store);
        let user_id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "detail": format!("User with id {} not found.", user_id) })
        );
    }

    #[actix_web::test]
    async fn test_delete_user_endpoint_and_idempotency() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::delete()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "deleted_user_id": user_id.to_string() }));

        // A linha continua legível, só que inativa
        let req = test::TestRequest::get()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["is_active"], false);
        assert_eq!(fetched["name"], "Nikolai");

        // Repetir o delete responde 200 com o mesmo corpo
        let req = test::TestRequest::delete()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "deleted_user_id": user_id.to_string() }));
    }

    #[actix_web::test]
    async fn test_update_user_endpoint() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({
                "name": "Ivan",
                "surname": "Ivanov",
                "email": "cheburek@kek.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "updated_user_id": user_id.to_string() }));

        let req = test::TestRequest::get()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["name"], "Ivan");
        assert_eq!(fetched["surname"], "Ivanov");
        assert_eq!(fetched["email"], "cheburek@kek.com");
        assert_eq!(fetched["is_active"], true);
    }

    #[actix_web::test]
    async fn test_update_empty_payload_returns_422() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "detail": "At least one parameter for user update info should be provided" })
        );
    }

    #[actix_web::test]
    async fn test_update_numeric_name_returns_plain_detail() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({ "name": "123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "detail": "Name should contains only letters" }));
    }

    #[actix_web::test]
    async fn test_update_empty_surname_returns_string_too_short() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({ "surname": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "detail": [{
                    "type": "string_too_short",
                    "loc": ["body", "surname"],
                    "msg": "String should have at least 1 character",
                    "input": "",
                    "ctx": { "min_length": 1 },
                    "url": "https://errors.pydantic.dev/2.5/v/string_too_short"
                }]
            })
        );
    }

    #[actix_web::test]
    async fn test_update_empty_email_returns_value_error() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({ "email": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // value_error não carrega a chave "url"
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "detail": [{
                    "type": "value_error",
                    "loc": ["body", "email"],
                    "msg": "value is not a valid email address: The email address is not valid. It must have exactly one @-sign.",
                    "input": "",
                    "ctx": {
                        "reason": "The email address is not valid. It must have exactly one @-sign."
                    }
                }]
            })
        );
    }

    #[actix_web::test]
    async fn test_full_user_lifecycle() {
        let store = Arc::new(MemoryUserStore::new());
        let app = init_user_app!(store);

        // Criação: campos ecoados, usuário nasce ativo
        let req = test::TestRequest::post()
            .uri("/user/")
            .set_json(json!({
                "name": "Nikolai",
                "surname": "Sviridov",
                "email": "lol@kek.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], "Nikolai");
        assert_eq!(created["is_active"], true);
        let user_id = created["user_id"].as_str().unwrap().to_string();

        // Soft delete
        let req = test::TestRequest::delete()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "deleted_user_id": user_id.as_str() }));

        // O registro permanece legível com os campos intactos
        let req = test::TestRequest::get()
            .uri(&format!("/user/?user_id={}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["is_active"], false);
        assert_eq!(fetched["name"], "Nikolai");
        assert_eq!(fetched["surname"], "Sviridov");
        assert_eq!(fetched["email"], "lol@kek.com");

        // Payload inválido responde 422 antes de qualquer lookup,
        // mesmo com o usuário já deletado
        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({ "name": "123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "detail": "Name should contains only letters" }));
    }

    #[actix_web::test]
    async fn test_update_deleted_user_returns_404() {
        let store = Arc::new(MemoryUserStore::new());
        let user_id = seed_user(&store).await;
        store.set_inactive(user_id).await.unwrap();
        let app = init_user_app!(store);

        let req = test::TestRequest::patch()
            .uri(&format!("/user/?user_id={}", user_id))
            .set_json(json!({ "name": "Ivan" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "detail": format!("User with id {} not found.", user_id) })
        );
    }
}
