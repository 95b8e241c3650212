use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_embed::RustEmbed;
use tower::ServiceExt;

use spa_serve::{Error, SpaServer};

#[derive(RustEmbed)]
#[folder = "tests/fixtures/dist"]
struct DistAssets;

#[derive(RustEmbed)]
#[folder = "tests/fixtures"]
struct FixtureTree;

const INDEX: &[u8] = include_bytes!("fixtures/dist/index.html");
const FALLBACK: &[u8] = include_bytes!("fixtures/dist/fallback.html");
const BUNDLE: &[u8] = include_bytes!("fixtures/dist/bundle.js");
const STYLES: &[u8] = include_bytes!("fixtures/dist/styles.css");
const LOGO: &[u8] = include_bytes!("fixtures/dist/assets/logo.svg");

async fn fetch(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, content_type, body)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    fetch(app, Request::get(path).body(Body::empty()).unwrap()).await
}

fn root_app() -> anyhow::Result<Router> {
    Ok(SpaServer::from_embedded::<DistAssets>("")?.into_router())
}

#[tokio::test]
async fn entry_served_at_root() -> anyhow::Result<()> {
    let app = root_app()?;
    let (status, ct, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);
    Ok(())
}

#[tokio::test]
async fn js_content_type_is_pinned() -> anyhow::Result<()> {
    let app = root_app()?;
    let (status, ct, body) = get(&app, "/bundle.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("application/javascript"));
    assert_eq!(body, BUNDLE);
    Ok(())
}

#[tokio::test]
async fn other_assets_use_guessed_type() -> anyhow::Result<()> {
    let app = root_app()?;

    let (status, ct, body) = get(&app, "/styles.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/css"));
    assert_eq!(body, STYLES);

    let (status, ct, body) = get(&app, "/assets/logo.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("image/svg+xml"));
    assert_eq!(body, LOGO);
    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_back_to_entry() -> anyhow::Result<()> {
    let app = root_app()?;

    // A client-side route
    let (status, ct, body) = get(&app, "/settings/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);

    // Looks like an asset, but none exists; still the entry, not a 404
    let (status, ct, body) = get(&app, "/missing.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);
    Ok(())
}

#[tokio::test]
async fn base_path_mount() -> anyhow::Result<()> {
    let app = SpaServer::from_embedded::<DistAssets>("")?
        .with_base_path("/app/")
        .into_router();

    let (status, _, _) = get(&app, "/other/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The base path matches as a whole prefix, trailing slash included
    let (status, _, _) = get(&app, "/app").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, ct, body) = get(&app, "/app/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);

    let (status, ct, body) = get(&app, "/app/bundle.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("application/javascript"));
    assert_eq!(body, BUNDLE);

    let (status, ct, body) = get(&app, "/app/missing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);
    Ok(())
}

#[tokio::test]
async fn base_path_is_normalized() -> anyhow::Result<()> {
    let bare = SpaServer::from_embedded::<DistAssets>("")?
        .with_base_path("app")
        .into_router();
    let slashed = SpaServer::from_embedded::<DistAssets>("")?
        .with_base_path("/app/")
        .into_router();

    for path in ["/app/", "/app/bundle.js", "/app/client/route", "/nope"] {
        let left = get(&bare, path).await;
        let right = get(&slashed, path).await;
        assert_eq!(left, right, "mismatch for {path}");
    }
    Ok(())
}

#[tokio::test]
async fn sub_directory_rooting() -> anyhow::Result<()> {
    let app = SpaServer::from_embedded::<FixtureTree>("dist")?.into_router();

    let (status, ct, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);

    let (status, _, body) = get(&app, "/bundle.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, BUNDLE);

    // Paths are relative to the sub-directory, not the embedded root
    let (status, ct, body) = get(&app, "/dist/bundle.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);
    Ok(())
}

#[test]
fn unknown_sub_directory_is_rejected() {
    let err = SpaServer::from_embedded::<FixtureTree>("build").expect_err("no such directory");
    assert!(matches!(err, Error::UnknownAssetDir(ref dir) if dir == "build"));
}

#[tokio::test]
async fn custom_entry_file() -> anyhow::Result<()> {
    let app = SpaServer::from_embedded::<DistAssets>("")?
        .with_entry_file("fallback.html")
        .into_router();

    let (status, ct, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, FALLBACK);

    let (_, _, body) = get(&app, "/client/route").await;
    assert_eq!(body, FALLBACK);

    // Literal assets are unaffected
    let (_, _, body) = get(&app, "/bundle.js").await;
    assert_eq!(body, BUNDLE);
    Ok(())
}

#[tokio::test]
async fn missing_entry_file_is_a_generic_500() -> anyhow::Result<()> {
    let app = SpaServer::from_embedded::<DistAssets>("")?
        .with_entry_file("nope.html")
        .into_router();

    let (status, _, body) = get(&app, "/client/route").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn repeated_requests_are_identical() -> anyhow::Result<()> {
    let app = root_app()?;
    let first = get(&app, "/settings/profile").await;
    let second = get(&app, "/settings/profile").await;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn method_does_not_change_routing() -> anyhow::Result<()> {
    let app = root_app()?;
    let (status, ct, body) = fetch(
        &app,
        Request::post("/client/route").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/html"));
    assert_eq!(body, INDEX);
    Ok(())
}
