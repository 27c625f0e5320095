use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "API documentation for the User Service.\n\n**Features:**\n- User creation with field validation\n- User lookup by id\n- Partial updates of active users\n- Soft delete (users are marked inactive, never erased)\n- Health monitoring and metrics",
        contact(
            name = "User Service Team",
            email = "support@user-service.com"
        )
    ),
    paths(
        // Users
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::models::User,
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UpdateUserResponse,
            crate::models::DeleteUserResponse,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User lifecycle endpoints. Create, fetch, patch and soft-delete users addressed by user_id."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
