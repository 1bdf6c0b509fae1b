// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the gallery server.
//!
//! `ApiClient` is cheap to clone (the underlying `reqwest::Client` is
//! reference counted) so every async task takes its own copy. Requests that
//! need authentication take a [`Session`] explicitly; there is no ambient
//! token.

pub mod models;
pub mod session;

pub use models::{
    Album, AlbumDetail, AlbumId, AlbumImage, ImageId, ImageMetadata, ModeMetadata,
};
pub use session::Session;

use crate::error::{Error, HttpError, Result};
use futures_util::StreamExt;
use models::{ImageMetadataEnvelope, LoginRequest, LoginResponse};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, Url};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Server routes consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Albums,
    Album(&'a str),
    ModeMetadata(&'a str),
    ImageMetadata(&'a str),
    AlbumImage {
        album_id: &'a str,
        image_id: &'a str,
    },
    Login,
    Verify,
}

impl<'a> Endpoint<'a> {
    fn segments(self) -> Vec<&'a str> {
        match self {
            Endpoint::Albums => vec!["api", "albums"],
            Endpoint::Album(id) => vec!["api", "albums", id],
            Endpoint::ModeMetadata(id) => vec!["api", "albums", id, "mode-metadata"],
            Endpoint::ImageMetadata(id) => vec!["api", "images", id, "metadata"],
            Endpoint::AlbumImage { album_id, image_id } => {
                vec!["api", "albums", album_id, "images", image_id]
            }
            Endpoint::Login => vec!["api", "login"],
            Endpoint::Verify => vec!["api", "verify"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: Url,
    upload_base: Url,
}

impl ApiClient {
    /// Creates a client for the given API origin and static-file origin.
    pub fn new(api_url: &str, upload_url: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: parse_base(api_url)?,
            upload_base: parse_base(upload_url)?,
        })
    }

    pub fn http(&self) -> reqwest::Client {
        self.http.clone()
    }

    /// Absolute URL of an endpoint. Every path segment is percent-encoded.
    pub fn endpoint_url(&self, endpoint: Endpoint<'_>) -> Url {
        join_segments(&self.api_base, &endpoint.segments())
    }

    /// Static URL of an uploaded image: `/uploads/<album>/<file>` with both
    /// names percent-encoded.
    pub fn upload_url(&self, album_name: &str, file_name: &str) -> Url {
        join_segments(&self.upload_base, &["uploads", album_name, file_name])
    }

    /// Starts a request, attaching the bearer token when a session is given.
    ///
    /// Fails with [`Error::Auth`] when a session is given but holds no token,
    /// so admin calls never go out unauthenticated.
    pub fn request(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        session: Option<&Session>,
    ) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.endpoint_url(endpoint));
        match session {
            None => Ok(builder),
            Some(session) => session
                .bearer()
                .map(|bearer| builder.header(AUTHORIZATION, bearer))
                .ok_or_else(|| Error::Auth("not signed in".into())),
        }
    }

    pub async fn list_albums(&self) -> Result<Vec<models::Album>> {
        let response = send(self.request(Method::GET, Endpoint::Albums, None)?).await?;
        Ok(response.json().await?)
    }

    pub async fn album(&self, album_id: &str) -> Result<AlbumDetail> {
        let response = send(self.request(Method::GET, Endpoint::Album(album_id), None)?).await?;
        Ok(response.json().await?)
    }

    pub async fn mode_metadata(&self, album_id: &str) -> Result<ModeMetadata> {
        let builder = self.request(Method::GET, Endpoint::ModeMetadata(album_id), None)?;
        let response = send(builder).await?;
        Ok(response.json().await?)
    }

    pub async fn image_metadata(&self, image_id: &str) -> Result<ImageMetadata> {
        let builder = self.request(Method::GET, Endpoint::ImageMetadata(image_id), None)?;
        let envelope: ImageMetadataEnvelope = send(builder).await?.json().await?;
        Ok(envelope.metadata)
    }

    pub async fn create_album(&self, session: &Session, form: Form) -> Result<()> {
        let builder = self.request(Method::POST, Endpoint::Albums, Some(session))?;
        send(builder.multipart(form)).await?;
        tracing::info!("album created");
        Ok(())
    }

    pub async fn update_album(&self, session: &Session, album_id: &str, form: Form) -> Result<()> {
        let builder = self.request(Method::PUT, Endpoint::Album(album_id), Some(session))?;
        send(builder.multipart(form)).await?;
        tracing::info!(album = %album_id, "album updated");
        Ok(())
    }

    pub async fn delete_album(&self, session: &Session, album_id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, Endpoint::Album(album_id), Some(session))?;
        send(builder).await?;
        tracing::info!(album = %album_id, "album deleted");
        Ok(())
    }

    pub async fn delete_image(&self, session: &Session, album_id: &str, image_id: &str) -> Result<()> {
        let endpoint = Endpoint::AlbumImage { album_id, image_id };
        send(self.request(Method::DELETE, endpoint, Some(session))?).await?;
        tracing::info!(album = %album_id, image = %image_id, "image deleted");
        Ok(())
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let builder = self
            .request(Method::POST, Endpoint::Login, None)?
            .json(&LoginRequest { username, password });
        match send(builder).await {
            Ok(response) => {
                let body: LoginResponse = response.json().await?;
                Ok(body.token)
            }
            Err(Error::Http(HttpError::Status { code: 401, message })) => Err(Error::Auth(message)),
            Err(err) => Err(err),
        }
    }

    /// Asks the server whether the session token is still valid.
    ///
    /// Network failures are reported as errors; a rejected token is `Ok(false)`.
    pub async fn verify(&self, session: &Session) -> Result<bool> {
        let builder = match self.request(Method::GET, Endpoint::Verify, Some(session)) {
            Ok(builder) => builder,
            Err(Error::Auth(_)) => return Ok(false),
            Err(err) => return Err(err),
        };
        match send(builder).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_auth() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Downloads a static file into memory.
    pub async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = send(self.http.get(url)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Streams a static file to `destination`, returning the bytes written.
    pub async fn download(&self, url: Url, destination: &Path) -> Result<u64> {
        let response = send(self.http.get(url.clone())).await?;
        let mut file = tokio::fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(%url, path = %destination.display(), bytes = written, "download finished");
        Ok(written)
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::Config(format!("invalid URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("URL {raw:?} cannot be used as a base")));
    }
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Sends a request and turns non-success statuses into [`HttpError::Status`].
async fn send(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = HttpError::from_status(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), error = %err, "request failed");
    Err(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8080", "http://cdn.local/").expect("client")
    }

    #[test]
    fn endpoints_map_to_server_routes() {
        let api = client();
        let cases = [
            (Endpoint::Albums, "/api/albums"),
            (Endpoint::Album("a1"), "/api/albums/a1"),
            (Endpoint::ModeMetadata("a1"), "/api/albums/a1/mode-metadata"),
            (Endpoint::ImageMetadata("i9"), "/api/images/i9/metadata"),
            (
                Endpoint::AlbumImage {
                    album_id: "a1",
                    image_id: "i9",
                },
                "/api/albums/a1/images/i9",
            ),
            (Endpoint::Login, "/api/login"),
            (Endpoint::Verify, "/api/verify"),
        ];
        for (endpoint, path) in cases {
            assert_eq!(api.endpoint_url(endpoint).path(), path);
        }
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let api = ApiClient::new("https://example.org/gallery/", "https://example.org").expect("client");
        assert_eq!(
            api.endpoint_url(Endpoint::Albums).as_str(),
            "https://example.org/gallery/api/albums"
        );
    }

    #[test]
    fn upload_url_encodes_both_segments() {
        let url = client().upload_url("Summer / 2024", "my photo#1.jpg");
        assert_eq!(
            url.as_str(),
            "http://cdn.local/uploads/Summer%20%2F%202024/my%20photo%231.jpg"
        );
    }

    #[test]
    fn authenticated_request_carries_bearer() {
        let mut session = Session::default();
        session.set_token("tok".into());
        let request = client()
            .request(Method::DELETE, Endpoint::Album("a1"), Some(&session))
            .expect("builder")
            .build()
            .expect("request");

        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer tok")
        );
    }

    #[test]
    fn admin_request_without_token_is_refused() {
        let err = client()
            .request(Method::POST, Endpoint::Albums, Some(&Session::default()))
            .expect_err("should refuse");
        assert!(err.is_auth());
    }

    #[test]
    fn public_request_has_no_auth_header() {
        let request = client()
            .request(Method::GET, Endpoint::Albums, None)
            .expect("builder")
            .build()
            .expect("request");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        assert!(matches!(
            ApiClient::new("not a url", "http://x"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:someone@example.org", "http://x"),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn verify_without_token_is_false_without_network() {
        let verified = client().verify(&Session::default()).await.expect("verify");
        assert!(!verified);
    }
}
