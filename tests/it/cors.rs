use std::error::Error;
use std::fs;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::serve;

fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(headers["Access-Control-Allow-Methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["Access-Control-Allow-Headers"], "*");
}

#[tokio::test]
async fn headers_on_success() -> Result<(), Box<dyn Error>> {
    let tmp_dir = tempfile::tempdir()?;
    fs::write(tmp_dir.path().join("index.html"), "<html></html>")?;

    let server = serve(tmp_dir.path()).await?;

    let res = reqwest::get(&format!("http://{}/", server.addr())).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_cors_headers(res.headers());

    Ok(())
}

#[tokio::test]
async fn headers_on_not_found() -> Result<(), Box<dyn Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let server = serve(tmp_dir.path()).await?;

    let res = reqwest::get(&format!("http://{}/missing", server.addr())).await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_cors_headers(res.headers());

    Ok(())
}

#[tokio::test]
async fn headers_on_method_not_allowed() -> Result<(), Box<dyn Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let server = serve(tmp_dir.path()).await?;

    let client = reqwest::Client::new();
    let res = client
        .post(&format!("http://{}/anything", server.addr()))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(res.headers());

    Ok(())
}

#[tokio::test]
async fn preflight() -> Result<(), Box<dyn Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let server = serve(tmp_dir.path()).await?;

    let client = reqwest::Client::new();
    let res = client
        .request(
            Method::OPTIONS,
            &format!("http://{}/any/path", server.addr()),
        )
        .send()
        .await?;

    assert!(res.status().is_success());
    assert_cors_headers(res.headers());
    assert!(res.bytes().await?.is_empty());

    Ok(())
}
