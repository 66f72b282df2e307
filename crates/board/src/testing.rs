//! Fakes of the posts API for unit tests.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Mutex, PoisonError},
};

use chrono::DateTime;
use postboard_api::Error as ApiError;
use postboard_types::post::{
    Category, CreatePostRequest, Post, PostsPage, PostsParams, UpdatePostRequest,
};
use tokio::sync::{mpsc, oneshot};

use crate::source::PostsApi;

pub fn post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        user_id: "u1".to_string(),
        title: format!("title {}", id),
        body: format!("body {}", id),
        category: Category::Free,
        tags: vec![],
        created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    }
}

pub fn page(ids: &[&str], next: Option<&str>) -> PostsPage {
    PostsPage {
        items: ids.iter().map(|id| post(id)).collect(),
        prev_cursor: None,
        next_cursor: next.map(str::to_string),
    }
}

fn closed() -> ApiError {
    ApiError::InvalidResponse("fake closed".to_string())
}

/// A list call waiting for the test to answer it.
pub struct PendingCall {
    pub params: PostsParams,
    reply: oneshot::Sender<Result<PostsPage, ApiError>>,
}

impl PendingCall {
    pub fn respond(self, result: Result<PostsPage, ApiError>) {
        let _ = self.reply.send(result);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(CreatePostRequest),
    Update(String, UpdatePostRequest),
    Delete(String),
}

/// List calls are handed to the test through a channel and block until answered.
/// Mutations succeed unless `fail_mutations` is set.
pub struct GatedApi {
    calls: mpsc::UnboundedSender<PendingCall>,
    pub mutations: Mutex<Vec<Mutation>>,
    pub fail_mutations: Mutex<bool>,
}

impl GatedApi {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = Self {
            calls: tx,
            mutations: Mutex::new(vec![]),
            fail_mutations: Mutex::new(false),
        };
        (api, rx)
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, mutation: Mutation) -> Result<(), ApiError> {
        if *self.fail_mutations.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(ApiError::Status {
                code: 500,
                message: "mutation failed".to_string(),
            });
        }
        self.mutations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mutation);
        Ok(())
    }
}

impl PostsApi for GatedApi {
    fn list_posts(
        &self,
        params: PostsParams,
    ) -> impl Future<Output = Result<PostsPage, ApiError>> + Send {
        let (reply, rx) = oneshot::channel();
        let sent = self.calls.send(PendingCall { params, reply });
        async move {
            sent.map_err(|_| closed())?;
            rx.await.map_err(|_| closed())?
        }
    }

    fn create_post(
        &self,
        req: CreatePostRequest,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send {
        let result = self.record(Mutation::Create(req.clone())).map(|_| {
            let mut created = post("new");
            created.title = req.title;
            created.body = req.body;
            created.category = req.category;
            created.tags = req.tags;
            created
        });
        async move { result }
    }

    fn update_post(
        &self,
        id: String,
        req: UpdatePostRequest,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send {
        let result = self
            .record(Mutation::Update(id.clone(), req.clone()))
            .map(|_| {
                let mut updated = post(&id);
                if let Some(title) = req.title {
                    updated.title = title;
                }
                updated
            });
        async move { result }
    }

    fn delete_post(&self, id: String) -> impl Future<Output = Result<(), ApiError>> + Send {
        let result = self.record(Mutation::Delete(id));
        async move { result }
    }
}

/// Answers list calls from a fixed script, in order.
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<PostsPage, ApiError>>>,
    pub seen: Mutex<Vec<PostsParams>>,
}

impl ScriptedApi {
    pub fn new(pages: Vec<Result<PostsPage, ApiError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn seen(&self) -> Vec<PostsParams> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PostsApi for ScriptedApi {
    fn list_posts(
        &self,
        params: PostsParams,
    ) -> impl Future<Output = Result<PostsPage, ApiError>> + Send {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params);
        let next = self
            .pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(closed()));
        async move { next }
    }

    fn create_post(
        &self,
        _req: CreatePostRequest,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send {
        async move { Err(closed()) }
    }

    fn update_post(
        &self,
        _id: String,
        _req: UpdatePostRequest,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send {
        async move { Err(closed()) }
    }

    fn delete_post(&self, _id: String) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move { Err(closed()) }
    }
}
