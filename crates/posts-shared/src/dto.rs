//! Data Transfer Objects - request/response types for the posts RPC methods.

use serde::{Deserialize, Serialize};

/// A post as it appears on the wire. Timestamps are RFC 3339 in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for `CreatePost`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Request for `GetPost`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetPostRequest {
    pub id: String,
}

/// Request for `ListPosts`. `page` is zero-indexed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPostsRequest {
    pub page: i32,
    pub page_size: i32,
}

/// Request for `UpdatePost`. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Request for `DeletePost`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletePostRequest {
    pub id: String,
}

/// Response carrying a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: PostDto,
}

/// Response for `ListPosts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostDto>,
    pub total: u64,
}

/// Response for `DeletePost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostResponse {
    pub success: bool,
}
