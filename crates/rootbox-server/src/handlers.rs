//! Request handlers: map wire requests onto core filesystem operations.
//!
//! Each handler resolves the caller's path, runs the blocking operation on
//! a dedicated blocking task, and shapes the outcome into a wire response.
//! Destructive operations fetch the target's items first, since removal
//! destroys the information the response needs. Writes re-read the written
//! file in a separate step so failure attribution stays clear.

use std::sync::Arc;

use rootbox_core::{FsOps, FsResult};
use rootbox_types::{Item, ItemCollection, Request, Response, WriteSpec};

/// Dispatch one request to the matching operation.
pub async fn handle(ops: &Arc<FsOps>, request: Request) -> Response {
    let result = match request {
        Request::List { path } => list(ops, path).await,
        Request::Write { path, item } => write(ops, path, item).await,
        Request::MakeDir { path, name } => make_dir(ops, path, name).await,
        Request::RemoveDir { path, name } => remove_dir(ops, path, name).await,
        Request::RemoveFile { path, name } => remove_file(ops, path, name).await,
    };

    match result {
        Ok(collection) => Response::Ok(collection),
        Err(e) => Response::Err {
            kind: e.kind(),
            message: e.to_string(),
        },
    }
}

async fn list(ops: &Arc<FsOps>, path: Option<String>) -> FsResult<ItemCollection> {
    let ops = Arc::clone(ops);
    run_blocking(move || {
        let resolved = ops.root().resolve(path.as_deref().unwrap_or(""));
        ops.path_items(&resolved)
    })
    .await
}

async fn write(
    ops: &Arc<FsOps>,
    path: Option<String>,
    item: WriteSpec,
) -> FsResult<ItemCollection> {
    let ops = Arc::clone(ops);
    run_blocking(move || {
        let dir = ops.root().resolve(path.as_deref().unwrap_or(""));
        let file_path = ops.write_file(&dir, &item)?;
        // Second step on purpose: the response reflects what actually
        // landed on disk, and a read failure is reported as a read failure.
        let file = ops.read_file(&file_path)?;
        let host = ops.root().host_path(&file_path);
        Ok(ItemCollection::new(host, vec![Item::File(file)]))
    })
    .await
}

async fn make_dir(
    ops: &Arc<FsOps>,
    path: Option<String>,
    name: String,
) -> FsResult<ItemCollection> {
    let ops = Arc::clone(ops);
    run_blocking(move || {
        let parent = ops.root().resolve(path.as_deref().unwrap_or(""));
        let created = ops.make_dir(&parent, &name)?;
        ops.path_items(&created)
    })
    .await
}

async fn remove_dir(
    ops: &Arc<FsOps>,
    path: Option<String>,
    name: String,
) -> FsResult<ItemCollection> {
    let ops = Arc::clone(ops);
    run_blocking(move || {
        let target = ops.root().resolve(path.as_deref().unwrap_or("")).child(&name);
        // Fetch before removing; afterwards there is nothing left to show.
        let items = ops.path_items(&target)?;
        ops.remove_dir(&target)?;
        Ok(items)
    })
    .await
}

async fn remove_file(
    ops: &Arc<FsOps>,
    path: Option<String>,
    name: String,
) -> FsResult<ItemCollection> {
    let ops = Arc::clone(ops);
    run_blocking(move || {
        let target = ops.root().resolve(path.as_deref().unwrap_or("")).child(&name);
        let items = ops.path_items(&target)?;
        ops.remove_file(&target)?;
        Ok(items)
    })
    .await
}

async fn run_blocking<T, F>(f: F) -> FsResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> FsResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking filesystem task panicked")
}
