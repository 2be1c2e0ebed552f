//! Blog handlers: listings, post detail, comments, categories, sharing.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use fable_core::domain::{Category, Comment, Post, Tag};
use fable_core::listing::{Listing, PostDetail};
use fable_core::workflows::FieldError;
use fable_core::workflows::category;
use fable_core::workflows::comment::{CommentInput, CommentOutcome};
use fable_core::workflows::share::ShareOutcome;
use fable_shared::dto::{
    CategoryResponse, CommentFormRequest, CommentResponse, CreateCategoryRequest, ListingResponse,
    PostDetailResponse, PostResponse, ShareRequest, TagResponse,
};
use fable_shared::{ApiResponse, ErrorResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    page: Option<u64>,
}

impl PageQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

/// GET / - paginated index, authenticated viewers only.
pub async fn index(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state.listing.index(query.page()).await?;
    Ok(HttpResponse::Ok().json(listing_response(listing)))
}

/// GET /tag/{slug} - posts carrying the tag.
pub async fn tagged(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state.listing.tagged(&path.into_inner(), query.page()).await?;
    Ok(HttpResponse::Ok().json(listing_response(listing)))
}

/// GET /category/{slug} - posts in the category.
pub async fn categorized(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state
        .listing
        .categorized(&path.into_inner(), query.page())
        .await?;
    Ok(HttpResponse::Ok().json(listing_response(listing)))
}

/// GET /post/{id} - post detail with comments and navigation context.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.listing.post_detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail_response(detail)))
}

/// POST /post/{id} - submit a comment as the authenticated actor.
///
/// Success answers 303 pointing at the post detail; validation failure
/// answers 422 echoing the submitted input.
pub async fn submit_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentFormRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = body.into_inner();

    let outcome = state
        .comments
        .submit_comment(
            post_id,
            identity.user_id,
            CommentInput {
                text: form.text,
                email: form.email,
            },
        )
        .await?;

    match outcome {
        CommentOutcome::Created { comment } => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, format!("/post/{}", comment.post_id)))
            .finish()),
        CommentOutcome::Rejected { input, errors } => {
            Ok(HttpResponse::UnprocessableEntity().json(
                ErrorResponse::validation_failed()
                    .with_errors(field_errors(errors))
                    .with_submitted(serde_json::json!(input)),
            ))
        }
    }
}

/// POST /share - mail a post summary to a recipient.
pub async fn share(
    state: web::Data<AppState>,
    body: web::Json<ShareRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    match state.sharing.share_post(req.post_id, &req.email).await? {
        ShareOutcome::Sent { post_id } => Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
            serde_json::json!({ "post_id": post_id }),
            "Post shared",
        ))),
        // Unknown post: silent redirect to the index, nothing sent.
        ShareOutcome::PostMissing => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .finish()),
        ShareOutcome::Rejected { recipient, errors } => {
            Ok(HttpResponse::UnprocessableEntity().json(
                ErrorResponse::validation_failed()
                    .with_errors(field_errors(errors))
                    .with_submitted(serde_json::json!({ "email": recipient })),
            ))
        }
        ShareOutcome::DeliveryFailed { reason, .. } => {
            Ok(HttpResponse::BadGateway().json(ErrorResponse::delivery_failed(reason)))
        }
    }
}

/// POST /category - create a category, assigning a slug when none is given.
pub async fn create_category(
    _identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let created = category::create_category(&*state.categories, &req.name, req.slug).await?;

    Ok(HttpResponse::Created().json(category_response(&created)))
}

// DTO conversions

fn field_errors(errors: Vec<FieldError>) -> Vec<(String, String)> {
    errors
        .into_iter()
        .map(|e| (e.field, e.message))
        .collect()
}

fn tag_response(tag: &Tag) -> TagResponse {
    TagResponse {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
    }
}

fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
    }
}

fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        body: post.body.clone(),
        date: post.date,
        author_id: post.author_id,
        status: post.status.as_str().to_string(),
        cover_image: post.cover_image.clone(),
        categories: post.categories.iter().map(category_response).collect(),
        tags: post.tags.iter().map(tag_response).collect(),
    }
}

fn comment_response(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author_id: comment.author_id,
        text: comment.text.clone(),
        email: comment.email.clone(),
        created_at: comment.created_at,
    }
}

fn listing_response(listing: Listing) -> ListingResponse {
    ListingResponse {
        posts: listing.page.items.iter().map(post_response).collect(),
        page: listing.page.page,
        page_size: listing.page.page_size,
        total: listing.page.total,
        total_pages: listing.page.total_pages(),
        tags: listing.tags.iter().map(tag_response).collect(),
        categories: listing.categories.iter().map(category_response).collect(),
        latest: listing.latest.iter().map(post_response).collect(),
    }
}

fn detail_response(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post_response(&detail.post),
        comments: detail.comments.iter().map(comment_response).collect(),
        images: detail.images.iter().map(|i| i.file.clone()).collect(),
        tags: detail.tags.iter().map(tag_response).collect(),
        categories: detail.categories.iter().map(category_response).collect(),
        latest: detail.latest.iter().map(post_response).collect(),
    }
}
