use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiPath, ApiQuery, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUserRequest, EmailQuery, MessageResponse, SearchQuery, UpdateUserRequest, User,
    UserListResponse, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const MISSING_SEARCH_PARAM: &str = "Missing search parameter: user_id or email is required";
pub const MISSING_EMAIL_PARAM: &str = "email query parameter is required";
pub const USER_DELETED: &str = "User deleted successfully";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        search_users,
        search_by_email,
        get_user,
        update_user,
        delete_user,
    ),
    components(
        schemas(
            UserResponse,
            UserListResponse,
            CreateUserRequest,
            UpdateUserRequest,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/search/email", get(search_by_email))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A lookup miss on the natural key or email is still a 404 over HTTP.
fn found(user: Option<User>, key: &str) -> UserResult<Json<UserResponse>> {
    user.map(|u| Json(u.into()))
        .ok_or_else(|| UserError::NotFound(key.to_string()))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserListResponse>> {
    let users = service.list_users().await?;
    Ok(Json(users.into()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Look a user up by `user_id`, or by `email` when `user_id` is absent
#[utoipa::path(
    get,
    path = "/search",
    tag = "Users",
    params(SearchQuery),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> UserResult<Json<UserResponse>> {
    match (non_empty(query.user_id), non_empty(query.email)) {
        (Some(user_id), _) => found(service.get_user_by_user_id(&user_id).await?, &user_id),
        (None, Some(email)) => found(service.get_user_by_email(&email).await?, &email),
        (None, None) => Err(UserError::Validation(MISSING_SEARCH_PARAM.to_string())),
    }
}

/// Look a user up by email
#[utoipa::path(
    get,
    path = "/search/email",
    tag = "Users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> UserResult<Json<UserResponse>> {
    let email = non_empty(query.email)
        .ok_or_else(|| UserError::Validation(MISSING_EMAIL_PARAM.to_string()))?;
    found(service.get_user_by_email(&email).await?, &email)
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID (24-character hex)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ApiPath(id): ApiPath<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(&id).await?;
    Ok(Json(user.into()))
}

/// Update a user; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID (24-character hex)")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(&id, input).await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID (24-character hex)")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ApiPath(id): ApiPath<String>,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(&id).await?;
    Ok(Json(MessageResponse {
        message: USER_DELETED.to_string(),
    }))
}
