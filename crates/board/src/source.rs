use std::future::Future;

use postboard_api::{Client, Error};
use postboard_types::post::{CreatePostRequest, Post, PostsPage, PostsParams, UpdatePostRequest};

/// The posts endpoints the board depends on.
/// Futures must be `Send` so fetches can run on spawned tasks.
pub trait PostsApi: Send + Sync + 'static {
    fn list_posts(
        &self,
        params: PostsParams,
    ) -> impl Future<Output = Result<PostsPage, Error>> + Send;

    fn create_post(
        &self,
        req: CreatePostRequest,
    ) -> impl Future<Output = Result<Post, Error>> + Send;

    fn update_post(
        &self,
        id: String,
        req: UpdatePostRequest,
    ) -> impl Future<Output = Result<Post, Error>> + Send;

    fn delete_post(&self, id: String) -> impl Future<Output = Result<(), Error>> + Send;
}

impl PostsApi for Client {
    fn list_posts(
        &self,
        params: PostsParams,
    ) -> impl Future<Output = Result<PostsPage, Error>> + Send {
        async move { self.get_posts(&params).await }
    }

    fn create_post(
        &self,
        req: CreatePostRequest,
    ) -> impl Future<Output = Result<Post, Error>> + Send {
        async move { Client::create_post(self, &req).await }
    }

    fn update_post(
        &self,
        id: String,
        req: UpdatePostRequest,
    ) -> impl Future<Output = Result<Post, Error>> + Send {
        async move { Client::update_post(self, &id, &req).await }
    }

    fn delete_post(&self, id: String) -> impl Future<Output = Result<(), Error>> + Send {
        async move { Client::delete_post(self, &id).await }
    }
}
