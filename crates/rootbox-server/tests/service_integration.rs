//! Integration tests for the rootbox TCP service.
//!
//! Each test binds a listener on an ephemeral port, rooted in a fresh
//! temporary directory, and drives it through the typed client.

use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;

use rootbox_client::{Client, ClientError};
use rootbox_core::RootDir;
use rootbox_server::{FileServer, ServerConfig};
use rootbox_types::{ErrorKind, Item, WriteSpec};

/// Bind a server rooted at `root` and return its address.
async fn start_server(root: &Path) -> SocketAddr {
    let config = ServerConfig::ephemeral(RootDir::new(root.to_str().unwrap()));
    let server = FileServer::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    addr
}

fn server_error(err: ClientError) -> (ErrorKind, String) {
    match err {
        ClientError::Server { kind, message } => (kind, message),
        other => panic!("expected a server error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_empty_root() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let collection = client.list(None).await.unwrap();
    assert_eq!(collection.host_path, "/");
    assert_eq!(collection.count, 0);
    assert!(collection.items.is_empty());
}

#[tokio::test]
async fn test_write_then_list_and_read() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let written = client
        .write(None, WriteSpec::content("tree.txt", "blabla"))
        .await
        .unwrap();
    assert_eq!(written.host_path, "/tree.txt");
    assert_eq!(written.count, 1);
    match &written.items[0] {
        Item::File(file) => assert_eq!(file.content, "blabla"),
        Item::Entry(_) => panic!("expected a file item"),
    }

    let listing = client.list(None).await.unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.items[0].name(), "tree.txt");

    let read = client.list(Some("tree.txt")).await.unwrap();
    match &read.items[0] {
        Item::File(file) => {
            assert_eq!(file.name, "tree.txt");
            assert_eq!(file.content, "blabla");
            assert_eq!(file.size, Some(6));
        }
        Item::Entry(_) => panic!("expected a file item"),
    }
}

#[tokio::test]
async fn test_write_appends_across_requests() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    client
        .write(None, WriteSpec::content("log.txt", "bla"))
        .await
        .unwrap();
    let second = client
        .write(None, WriteSpec::content("log.txt", "bla"))
        .await
        .unwrap();

    match &second.items[0] {
        Item::File(file) => assert_eq!(file.content, "blabla"),
        Item::Entry(_) => panic!("expected a file item"),
    }
}

#[tokio::test]
async fn test_make_dir_then_duplicate() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let created = client.make_dir(None, "work").await.unwrap();
    assert_eq!(created.host_path, "/work");
    assert_eq!(created.count, 0);
    assert!(dir.path().join("work").is_dir());

    let (kind, _message) = server_error(client.make_dir(None, "work").await.unwrap_err());
    assert_eq!(kind, ErrorKind::AlreadyExists);
}

#[tokio::test]
async fn test_remove_dir_non_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("full")).unwrap();
    std::fs::write(dir.path().join("full").join("keep.txt"), "x").unwrap();

    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let (kind, _message) = server_error(client.remove_dir(None, "full").await.unwrap_err());
    assert_eq!(kind, ErrorKind::NotEmpty);
    assert!(dir.path().join("full").join("keep.txt").exists());
}

#[tokio::test]
async fn test_remove_dir_empty_returns_final_listing() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("gone")).unwrap();

    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let collection = client.remove_dir(None, "gone").await.unwrap();
    assert_eq!(collection.host_path, "/gone");
    assert_eq!(collection.count, 0);
    assert!(!dir.path().join("gone").exists());
}

#[tokio::test]
async fn test_remove_file_returns_last_content() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bye.txt"), "farewell").unwrap();

    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let collection = client.remove_file(None, "bye.txt").await.unwrap();
    match &collection.items[0] {
        Item::File(file) => assert_eq!(file.content, "farewell"),
        Item::Entry(_) => panic!("expected a file item"),
    }
    assert!(!dir.path().join("bye.txt").exists());
}

#[tokio::test]
async fn test_not_found_reports_host_path_only() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let (kind, message) = server_error(client.list(Some("Documents/work")).await.unwrap_err());
    assert_eq!(kind, ErrorKind::NotFound);
    assert!(message.contains("`/Documents/work`"));
    assert!(!message.contains(dir.path().to_str().unwrap()));
}

#[tokio::test]
async fn test_non_txt_extension_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cat.png"), "meow").unwrap();

    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    let (kind, _message) = server_error(client.list(Some("cat.png")).await.unwrap_err());
    assert_eq!(kind, ErrorKind::UnsupportedContentType);
}

#[tokio::test]
async fn test_nested_flow() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;
    let mut client = Client::connect(addr).await.unwrap();

    client.make_dir(None, "docs").await.unwrap();
    client
        .write(Some("docs"), WriteSpec::content("readme.txt", "hi"))
        .await
        .unwrap();

    let listing = client.list(Some("docs")).await.unwrap();
    assert_eq!(listing.host_path, "/docs");
    assert_eq!(listing.count, 1);
    assert_eq!(listing.items[0].name(), "readme.txt");

    client.remove_file(Some("docs"), "readme.txt").await.unwrap();
    client.remove_dir(None, "docs").await.unwrap();

    let listing = client.list(None).await.unwrap();
    assert_eq!(listing.count, 0);
}

#[tokio::test]
async fn test_concurrent_clients() {
    let dir = TempDir::new().unwrap();
    let addr = start_server(dir.path()).await;

    let mut handles = Vec::new();
    for i in 0..4 {
        handles.push(tokio::spawn(async move {
            let mut client = Client::connect(addr).await.unwrap();
            let name = format!("file-{}.txt", i);
            client
                .write(None, WriteSpec::content(name.as_str(), "data"))
                .await
                .unwrap();
            client.list(Some(name.as_str())).await.unwrap()
        }));
    }

    for handle in handles {
        let collection = handle.await.unwrap();
        assert_eq!(collection.count, 1);
    }

    let mut client = Client::connect(addr).await.unwrap();
    let listing = client.list(None).await.unwrap();
    assert_eq!(listing.count, 4);
}
