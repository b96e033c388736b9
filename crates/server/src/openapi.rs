use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub introduction: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct ImageDoc { pub url: String, pub caption: String }

#[derive(ToSchema)]
pub struct AdInputDoc {
    pub title: String,
    pub introduction: String,
    pub content: String,
    pub cover_image: String,
    pub price: f64,
    pub rooms: i32,
    pub images: Vec<ImageDoc>,
}

#[derive(ToSchema)]
pub struct BookingInputDoc {
    #[schema(format = Date, example = "2030-07-01")]
    pub start_date: String,
    #[schema(format = Date, example = "2030-07-01")]
    pub end_date: String,
    pub comment: Option<String>,
}

#[derive(ToSchema)]
pub struct CommentInputDoc {
    /// 0 to 5
    pub rating: i32,
    pub content: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::home::home,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::ads::list,
        crate::routes::ads::create,
        crate::routes::ads::show,
        crate::routes::ads::update,
        crate::routes::ads::delete,
        crate::routes::ads::book,
        crate::routes::ads::comment,
        crate::routes::admin::bookings_index,
        crate::routes::admin::bookings_at,
        crate::routes::admin::booking_edit,
        crate::routes::admin::booking_delete,
        crate::routes::admin::comments_index,
        crate::routes::admin::comments_at,
        crate::routes::admin::comments_nav,
        crate::routes::admin::comment_edit,
        crate::routes::admin::comment_delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ImageDoc,
            AdInputDoc,
            BookingInputDoc,
            CommentInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "home"),
        (name = "auth"),
        (name = "ads"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
