//! Post RPC handlers.
//!
//! Each route is one method of `posts.v1.PostService`, taking and returning JSON.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;

use posts_core::domain::Post;
use posts_shared::dto::{
    CreatePostRequest, DeletePostRequest, DeletePostResponse, GetPostRequest, ListPostsRequest,
    ListPostsResponse, PostDto, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts.v1.PostService/CreatePost
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create_post(req.title, req.content, req.author_id)
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: to_dto(&post),
    }))
}

/// POST /posts.v1.PostService/GetPost
pub async fn get_post(
    state: web::Data<AppState>,
    body: web::Json<GetPostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(&body.id).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: to_dto(&post),
    }))
}

/// POST /posts.v1.PostService/ListPosts
pub async fn list_posts(
    state: web::Data<AppState>,
    body: web::Json<ListPostsRequest>,
) -> AppResult<HttpResponse> {
    let page = state.posts.list_posts(body.page, body.page_size).await?;

    Ok(HttpResponse::Ok().json(ListPostsResponse {
        posts: page.items.iter().map(to_dto).collect(),
        total: page.total,
    }))
}

/// POST /posts.v1.PostService/UpdatePost
pub async fn update_post(
    state: web::Data<AppState>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .update_post(&req.id, req.title, req.content)
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: to_dto(&post),
    }))
}

/// POST /posts.v1.PostService/DeletePost
pub async fn delete_post(
    state: web::Data<AppState>,
    body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let success = state.posts.delete_post(&body.id).await?;

    Ok(HttpResponse::Ok().json(DeletePostResponse { success }))
}

fn to_dto(post: &Post) -> PostDto {
    PostDto {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        author_id: post.author_id.clone(),
        created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        updated_at: post.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
