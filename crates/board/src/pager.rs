use std::sync::Arc;

use futures::{stream, Stream};
use postboard_types::post::PostsPage;
use tracing::debug;

use super::{error::Error, list::CursorState, query::QueryDescriptor, source::PostsApi};

/// Pull-based walk over the pages of one query.
///
/// `next` requests the page after the last one returned. After the last
/// page it keeps returning `Ok(None)` without touching the network. A failed
/// call leaves the cursor where it was, so calling `next` again retries.
pub struct PageCursor<A> {
    api: Arc<A>,
    descriptor: QueryDescriptor,
    cursor: CursorState,
}

impl<A: PostsApi> PageCursor<A> {
    pub fn new(api: Arc<A>, descriptor: QueryDescriptor) -> Self {
        Self {
            api,
            descriptor,
            cursor: CursorState::Start,
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn has_next(&self) -> bool {
        self.cursor != CursorState::Exhausted
    }

    pub async fn next(&mut self) -> Result<Option<PostsPage>, Error> {
        let params = match &self.cursor {
            CursorState::Exhausted => return Ok(None),
            CursorState::Start => self.descriptor.params(None),
            CursorState::Next(cursor) => self.descriptor.params(Some(cursor)),
        };
        let page = self
            .api
            .list_posts(params)
            .await
            .map_err(Error::ListLoad)?;
        debug!("Fetched page with {} posts", page.items.len());
        self.cursor = match &page.next_cursor {
            Some(cursor) => CursorState::Next(cursor.clone()),
            None => CursorState::Exhausted,
        };
        Ok(Some(page))
    }

    /// Pages as a stream. The stream ends after the last page or after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<PostsPage, Error>> {
        stream::unfold(Some(self), |state| async move {
            let mut pager = state?;
            match pager.next().await {
                Ok(Some(page)) => Some((Ok(page), Some(pager))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

pub fn pages<A: PostsApi>(
    api: Arc<A>,
    descriptor: QueryDescriptor,
) -> impl Stream<Item = Result<PostsPage, Error>> {
    PageCursor::new(api, descriptor).into_stream()
}
