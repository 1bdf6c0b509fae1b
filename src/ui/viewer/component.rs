// SPDX-License-Identifier: MPL-2.0
//! Album screen: loads one album, its thumbnails and full-size images, and
//! drives the presentation state machine from input events and ticks.

use super::state::{self, Key, Mode, ViewerImage};
use crate::api::{Album, AlbumDetail, AlbumId, ApiClient, ImageId, Session};
use crate::error::Error;
use crate::media::image::{self as full_image, ImageData};
use crate::media::preview::{self, Preview, PreviewOutcome, PreviewSpec};
use crate::media::PreviewCache;
use iced::{event, keyboard, mouse, window, Element, Task};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum Message {
    AlbumLoaded {
        album_id: AlbumId,
        result: Result<AlbumDetail, Error>,
    },
    ThumbnailLoaded {
        image_id: ImageId,
        url: String,
        outcome: PreviewOutcome,
    },
    FullImageLoaded {
        image_id: ImageId,
        result: Result<ImageData, Error>,
    },
    Viewer(state::Message),
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    DownloadTargetChosen {
        image: ViewerImage,
        path: Option<PathBuf>,
    },
    DownloadFinished(Result<PathBuf, Error>),
    ImageDeleted {
        image_id: ImageId,
        result: Result<(), Error>,
    },
    Retry,
    Back,
}

/// Requests for the application shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SetFullscreen(bool),
    GoHome,
    ShowError(String),
    ShowSuccess(String),
    /// A full-size image was saved at this path.
    Downloaded(PathBuf),
    /// The user picked a new slideshow transition.
    TransitionChanged(Duration),
    /// The server rejected the session.
    SessionExpired,
}

/// Borrowed services the screen needs while handling a message.
pub struct Context<'a> {
    pub api: &'a ApiClient,
    pub session: &'a Session,
    pub cache: &'a mut PreviewCache,
    pub thumbnail_spec: PreviewSpec,
    pub download_dir: Option<&'a Path>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Load {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
enum FullImage {
    Loading(ImageId),
    Ready(ImageId, ImageData),
    Failed(ImageId),
}

impl FullImage {
    fn image_id(&self) -> &str {
        match self {
            FullImage::Loading(id) | FullImage::Ready(id, _) | FullImage::Failed(id) => id,
        }
    }
}

pub struct ViewEnv {
    pub signed_in: bool,
}

#[derive(Debug)]
pub struct State {
    album_id: AlbumId,
    album: Option<Album>,
    load: Load,
    viewer: state::State,
    thumbnails: HashMap<ImageId, Option<Preview>>,
    full: Option<FullImage>,
    transition: Duration,
    overlay_delay: Duration,
}

impl State {
    /// Starts loading `album_id`.
    pub fn open(
        album_id: AlbumId,
        api: &ApiClient,
        transition: Duration,
        overlay_delay: Duration,
    ) -> (Self, Task<Message>) {
        let state = Self {
            album_id: album_id.clone(),
            album: None,
            load: Load::Loading,
            viewer: state::State::default().with_timing(transition, overlay_delay),
            thumbnails: HashMap::new(),
            full: None,
            transition,
            overlay_delay,
        };
        let task = fetch_album(api.clone(), album_id);
        (state, task)
    }

    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn load(&self) -> &Load {
        &self.load
    }

    pub fn viewer(&self) -> &state::State {
        &self.viewer
    }

    pub fn thumbnail(&self, image_id: &str) -> Option<&Preview> {
        self.thumbnails.get(image_id).and_then(Option::as_ref)
    }

    pub fn thumbnail_pending(&self, image_id: &str) -> bool {
        !self.thumbnails.contains_key(image_id)
    }

    /// Full-size pixels for the image on screen, once decoded.
    pub fn current_full_image(&self) -> Option<&ImageData> {
        let current = self.viewer.current_image()?;
        match &self.full {
            Some(FullImage::Ready(id, data)) if *id == current.id => Some(data),
            _ => None,
        }
    }

    pub fn current_full_image_failed(&self) -> bool {
        let Some(current) = self.viewer.current_image() else {
            return false;
        };
        matches!(&self.full, Some(FullImage::Failed(id)) if *id == current.id)
    }

    /// Whether periodic ticks are required.
    pub fn needs_tick(&self) -> bool {
        self.viewer.needs_tick()
    }

    /// Whether the screen is showing a presentation mode rather than the grid.
    pub fn is_presenting(&self) -> bool {
        self.viewer.mode() != Mode::Grid
    }

    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_message(
        &mut self,
        message: Message,
        now: Instant,
        ctx: &mut Context<'_>,
    ) -> (Effect, Task<Message>) {
        match message {
            Message::AlbumLoaded { album_id, result } => {
                if album_id != self.album_id {
                    tracing::debug!(album = %album_id, "ignoring response for another album");
                    return (Effect::None, Task::none());
                }
                self.apply_album(result, ctx)
            }
            Message::ThumbnailLoaded {
                image_id,
                url,
                outcome,
            } => {
                if !self.viewer.images().iter().any(|image| image.id == image_id) {
                    return (Effect::None, Task::none());
                }
                let preview = outcome.into_preview();
                if let Some(preview) = &preview {
                    ctx.cache.insert(url, preview.clone());
                }
                self.thumbnails.insert(image_id, preview);
                (Effect::None, Task::none())
            }
            Message::FullImageLoaded { image_id, result } => {
                let wanted = matches!(&self.full, Some(FullImage::Loading(id)) if *id == image_id);
                if !wanted {
                    tracing::debug!(image = %image_id, "discarding stale full image");
                    return (Effect::None, Task::none());
                }
                self.full = Some(match result {
                    Ok(data) => FullImage::Ready(image_id, data),
                    Err(err) => {
                        tracing::warn!(image = %image_id, error = %err, "full image unavailable");
                        FullImage::Failed(image_id)
                    }
                });
                (Effect::None, Task::none())
            }
            Message::Viewer(viewer_message) => self.dispatch(viewer_message, now, ctx),
            Message::RawEvent { event, .. } => self.handle_raw_event(event, now, ctx),
            Message::DownloadTargetChosen { image, path } => {
                let Some(path) = path else {
                    return (Effect::None, Task::none());
                };
                match reqwest::Url::parse(&image.url) {
                    Ok(url) => {
                        let api = ctx.api.clone();
                        let task = Task::perform(
                            async move {
                                api.download(url, &path).await?;
                                Ok::<_, Error>(path)
                            },
                            Message::DownloadFinished,
                        );
                        (Effect::None, task)
                    }
                    Err(err) => (
                        Effect::ShowError(format!("Invalid image address: {err}")),
                        Task::none(),
                    ),
                }
            }
            Message::DownloadFinished(result) => match result {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "image downloaded");
                    (Effect::Downloaded(path), Task::none())
                }
                Err(err) => (Effect::ShowError(format!("Download failed: {err}")), Task::none()),
            },
            Message::ImageDeleted { image_id, result } => match result {
                Ok(()) => {
                    self.thumbnails.remove(&image_id);
                    let viewer_effect = self.viewer.remove_image(&image_id);
                    if let Some(album) = &mut self.album {
                        album.number_of_images = album.number_of_images.saturating_sub(1);
                    }
                    let (effect, task) = self.apply_viewer_effect(viewer_effect, ctx);
                    let effect = match effect {
                        Effect::None => Effect::ShowSuccess("Image deleted".into()),
                        other => other,
                    };
                    (effect, Task::batch([task, self.sync_full_image(ctx)]))
                }
                Err(err) if err.is_auth() => (Effect::SessionExpired, Task::none()),
                Err(err) => (Effect::ShowError(format!("Could not delete image: {err}")), Task::none()),
            },
            Message::Retry => {
                self.load = Load::Loading;
                (Effect::None, fetch_album(ctx.api.clone(), self.album_id.clone()))
            }
            Message::Back => {
                if self.is_presenting() {
                    self.dispatch(state::Message::Close, now, ctx)
                } else {
                    (Effect::GoHome, Task::none())
                }
            }
        }
    }

    fn apply_album(
        &mut self,
        result: Result<AlbumDetail, Error>,
        ctx: &mut Context<'_>,
    ) -> (Effect, Task<Message>) {
        let detail = match result {
            Ok(detail) => detail,
            Err(err) => {
                tracing::warn!(album = %self.album_id, error = %err, "album load failed");
                self.load = Load::Failed(err.to_string());
                return (Effect::None, Task::none());
            }
        };

        let images: Vec<ViewerImage> = detail
            .images
            .iter()
            .map(|image| ViewerImage {
                id: image.id.clone(),
                file_name: image.file_name.clone(),
                url: ctx
                    .api
                    .upload_url(&detail.album.name, &image.file_name)
                    .to_string(),
            })
            .collect();

        tracing::info!(album = %self.album_id, images = images.len(), "album loaded");

        self.thumbnails.clear();
        self.full = None;
        let mut tasks = Vec::new();
        for image in &images {
            if let Some(preview) = ctx.cache.get(&image.url) {
                self.thumbnails.insert(image.id.clone(), Some(preview));
                continue;
            }
            let image_id = image.id.clone();
            let url = image.url.clone();
            let http = ctx.api.http();
            let spec = ctx.thumbnail_spec;
            tasks.push(Task::perform(
                preview::load_remote(http, url.clone(), spec),
                move |outcome| Message::ThumbnailLoaded {
                    image_id: image_id.clone(),
                    url: url.clone(),
                    outcome,
                },
            ));
        }

        self.viewer = state::State::new(images).with_timing(self.transition, self.overlay_delay);
        self.album = Some(detail.album);
        self.load = Load::Loaded;
        (Effect::None, Task::batch(tasks))
    }

    fn handle_raw_event(
        &mut self,
        event: event::Event,
        now: Instant,
        ctx: &mut Context<'_>,
    ) -> (Effect, Task<Message>) {
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                let Some(key) = Key::from_keyboard(&key) else {
                    return (Effect::None, Task::none());
                };
                if !self.viewer.consumes_key(key) {
                    return (Effect::None, Task::none());
                }
                self.dispatch(state::Message::KeyPressed(key), now, ctx)
            }
            event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                self.dispatch(state::Message::PointerMoved(position), now, ctx)
            }
            _ => (Effect::None, Task::none()),
        }
    }

    fn dispatch(
        &mut self,
        message: state::Message,
        now: Instant,
        ctx: &mut Context<'_>,
    ) -> (Effect, Task<Message>) {
        let viewer_effect = self.viewer.handle(message, now);
        let (effect, task) = self.apply_viewer_effect(viewer_effect, ctx);
        (effect, Task::batch([task, self.sync_full_image(ctx)]))
    }

    fn apply_viewer_effect(
        &mut self,
        effect: state::Effect,
        ctx: &mut Context<'_>,
    ) -> (Effect, Task<Message>) {
        match effect {
            state::Effect::None => (Effect::None, Task::none()),
            state::Effect::SetFullscreen(on) => (Effect::SetFullscreen(on), Task::none()),
            state::Effect::TransitionChanged(transition) => {
                self.transition = transition;
                (Effect::TransitionChanged(transition), Task::none())
            }
            state::Effect::FetchMetadata(image_id) => {
                let api = ctx.api.clone();
                let task = Task::perform(
                    {
                        let image_id = image_id.clone();
                        async move { api.image_metadata(&image_id).await }
                    },
                    move |result| {
                        Message::Viewer(state::Message::MetadataLoaded {
                            image_id: image_id.clone(),
                            result: result.map_err(|err| err.to_string()),
                        })
                    },
                );
                (Effect::None, task)
            }
            state::Effect::Download(image) => {
                let start_dir = ctx.download_dir.map(Path::to_path_buf);
                let task = Task::perform(
                    {
                        let file_name = image.file_name.clone();
                        async move {
                            let mut dialog = rfd::AsyncFileDialog::new()
                                .set_title("Save Image As")
                                .set_file_name(&file_name);
                            if let Some(dir) = start_dir.filter(|dir| dir.exists()) {
                                dialog = dialog.set_directory(&dir);
                            }
                            dialog.save_file().await.map(|h| h.path().to_path_buf())
                        }
                    },
                    move |path| Message::DownloadTargetChosen {
                        image: image.clone(),
                        path,
                    },
                );
                (Effect::None, task)
            }
            state::Effect::DeleteImage(image_id) => {
                if !ctx.session.has_token() {
                    return (Effect::SessionExpired, Task::none());
                }
                let api = ctx.api.clone();
                let session = ctx.session.clone();
                let album_id = self.album_id.clone();
                let task = Task::perform(
                    {
                        let image_id = image_id.clone();
                        async move { api.delete_image(&session, &album_id, &image_id).await }
                    },
                    move |result| Message::ImageDeleted {
                        image_id: image_id.clone(),
                        result,
                    },
                );
                (Effect::None, task)
            }
        }
    }

    /// Starts fetching the full-size image for whatever is on screen, unless
    /// it is already loaded or loading.
    fn sync_full_image(&mut self, ctx: &Context<'_>) -> Task<Message> {
        let Some(current) = self.viewer.current_image() else {
            return Task::none();
        };
        if self
            .full
            .as_ref()
            .is_some_and(|full| full.image_id() == current.id)
        {
            return Task::none();
        }

        let image_id = current.id.clone();
        let url = current.url.clone();
        self.full = Some(FullImage::Loading(image_id.clone()));

        let api = ctx.api.clone();
        Task::perform(
            async move {
                let url = reqwest::Url::parse(&url)
                    .map_err(|e| Error::Config(format!("invalid image URL: {e}")))?;
                let bytes = api.fetch_bytes(url).await?;
                full_image::decode_async(bytes).await
            },
            move |result| Message::FullImageLoaded {
                image_id: image_id.clone(),
                result,
            },
        )
    }

    pub fn view(&self, env: ViewEnv) -> Element<'_, Message> {
        super::view(self, env)
    }
}

fn fetch_album(api: ApiClient, album_id: AlbumId) -> Task<Message> {
    Task::perform(
        {
            let album_id = album_id.clone();
            async move { api.album(&album_id).await }
        },
        move |result| Message::AlbumLoaded {
            album_id: album_id.clone(),
            result,
        },
    )
}
