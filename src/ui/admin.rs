// SPDX-License-Identifier: MPL-2.0
//! Admin screen: album list with edit/delete, and the create/edit dialog.
//!
//! The dialog wraps an [`AlbumEditForm`]. Every async completion that targets
//! the dialog carries the generation it was started for; opening or closing
//! the dialog bumps the generation so late completions are dropped.

use crate::album::form::SubmitTarget;
use crate::album::{AlbumEditForm, ExistingImage, SourceHandle, UploadId};
use crate::api::{Album, AlbumDetail, AlbumId, ApiClient, ImageId, Session};
use crate::error::Error;
use crate::media::extensions::{is_uploadable, UPLOAD_EXTENSIONS};
use crate::media::preview::{self, Preview, PreviewOutcome, PreviewSpec};
use crate::media::PreviewCache;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::viewer::shared_styles;
use iced::widget::{button, image::Image, text, text_input, Column, Container, Row, Scrollable, Space, Text};
use iced::{alignment, ContentFit, Element, Length, Task};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum Message {
    AlbumsLoaded(Result<Vec<Album>, Error>),
    NewAlbum,
    EditAlbum(AlbumId),
    EditDetailsLoaded {
        generation: u64,
        result: Result<AlbumDetail, Error>,
    },
    ExistingPreviewLoaded {
        generation: u64,
        image_id: ImageId,
        url: String,
        outcome: PreviewOutcome,
    },
    NameChanged(String),
    DescriptionChanged(String),
    DateChanged(String),
    PickFiles,
    FilesPicked {
        generation: u64,
        paths: Vec<PathBuf>,
    },
    PreviewReady {
        generation: u64,
        id: UploadId,
        outcome: PreviewOutcome,
    },
    RemoveFile(usize),
    RemoveAllFiles,
    ToggleDeletion(ImageId),
    Submit,
    Submitted {
        generation: u64,
        result: Result<(), Error>,
    },
    CloseEditor,
    RequestDelete(AlbumId),
    ConfirmDelete,
    CancelDelete,
    AlbumDeleted {
        album_id: AlbumId,
        result: Result<(), Error>,
    },
    Logout,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    GoHome,
    /// User asked to sign out.
    SignOut,
    /// The server rejected the session mid-operation.
    SessionExpired,
    ShowError(String),
    ShowSuccess(String),
    /// Files were picked from this file's directory.
    RememberOpenDir(PathBuf),
}

pub struct Context<'a> {
    pub api: &'a ApiClient,
    pub session: &'a Session,
    pub cache: &'a mut PreviewCache,
    pub local_spec: PreviewSpec,
    pub remote_spec: PreviewSpec,
    pub open_dir: Option<&'a Path>,
}

#[derive(Debug)]
enum Editor {
    Closed,
    /// Fetching the album's images before the edit form can open.
    Loading(AlbumId),
    Open(AlbumEditForm),
}

#[derive(Debug)]
pub struct State {
    albums: Vec<Album>,
    loading: bool,
    error: Option<String>,
    editor: Editor,
    generation: u64,
    confirm_delete: Option<AlbumId>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            albums: Vec::new(),
            loading: false,
            error: None,
            editor: Editor::Closed,
            generation: 0,
            confirm_delete: None,
        }
    }
}

impl State {
    pub fn open(api: &ApiClient) -> (Self, Task<Message>) {
        let state = Self {
            loading: true,
            ..Self::default()
        };
        (state, fetch_albums(api.clone()))
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn form(&self) -> Option<&AlbumEditForm> {
        match &self.editor {
            Editor::Open(form) => Some(form),
            _ => None,
        }
    }

    pub fn is_editor_loading(&self) -> bool {
        matches!(self.editor, Editor::Loading(_))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.confirm_delete.as_deref()
    }

    fn form_mut(&mut self, generation: u64) -> Option<&mut AlbumEditForm> {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale form completion");
            return None;
        }
        match &mut self.editor {
            Editor::Open(form) => Some(form),
            _ => None,
        }
    }

    fn open_editor(&mut self, editor: Editor) {
        self.generation += 1;
        self.editor = editor;
    }

    fn close_editor(&mut self) {
        self.generation += 1;
        self.editor = Editor::Closed;
    }

    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value, clippy::too_many_lines)]
    pub fn handle_message(&mut self, message: Message, ctx: &mut Context<'_>) -> (Effect, Task<Message>) {
        match message {
            Message::AlbumsLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(mut albums) => {
                        albums.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                        self.albums = albums;
                        self.error = None;
                    }
                    Err(err) if err.is_auth() => return (Effect::SessionExpired, Task::none()),
                    Err(err) => self.error = Some(err.to_string()),
                }
                (Effect::None, Task::none())
            }
            Message::NewAlbum => {
                self.open_editor(Editor::Open(AlbumEditForm::create()));
                (Effect::None, Task::none())
            }
            Message::EditAlbum(album_id) => {
                self.open_editor(Editor::Loading(album_id.clone()));
                let generation = self.generation;
                let api = ctx.api.clone();
                let task = Task::perform(async move { api.album(&album_id).await }, move |result| {
                    Message::EditDetailsLoaded { generation, result }
                });
                (Effect::None, task)
            }
            Message::EditDetailsLoaded { generation, result } => {
                let Editor::Loading(album_id) = &self.editor else {
                    return (Effect::None, Task::none());
                };
                if generation != self.generation {
                    return (Effect::None, Task::none());
                }
                match result {
                    Ok(detail) if detail.album.id != *album_id => {
                        tracing::warn!(
                            requested = %album_id,
                            received = %detail.album.id,
                            "album details do not match the edited album"
                        );
                        self.close_editor();
                        (
                            Effect::ShowError("Could not load album: unexpected response".into()),
                            Task::none(),
                        )
                    }
                    Ok(detail) => self.open_edit_form(detail, ctx),
                    Err(err) => {
                        self.close_editor();
                        (Effect::ShowError(format!("Could not load album: {err}")), Task::none())
                    }
                }
            }
            Message::ExistingPreviewLoaded {
                generation,
                image_id,
                url,
                outcome,
            } => {
                if let Some(preview) = outcome.preview() {
                    ctx.cache.insert(url, preview.clone());
                }
                if let Some(form) = self.form_mut(generation) {
                    form.set_existing_preview(&image_id, outcome);
                }
                (Effect::None, Task::none())
            }
            Message::NameChanged(name) => {
                if let Editor::Open(form) = &mut self.editor {
                    form.set_name(name);
                }
                (Effect::None, Task::none())
            }
            Message::DescriptionChanged(description) => {
                if let Editor::Open(form) = &mut self.editor {
                    form.set_description(description);
                }
                (Effect::None, Task::none())
            }
            Message::DateChanged(date) => {
                if let Editor::Open(form) = &mut self.editor {
                    form.set_date(date);
                }
                (Effect::None, Task::none())
            }
            Message::PickFiles => {
                if self.form().is_none_or(AlbumEditForm::is_submitting) {
                    return (Effect::None, Task::none());
                }
                let generation = self.generation;
                let start_dir = ctx.open_dir.map(Path::to_path_buf);
                let task = Task::perform(
                    async move {
                        let mut dialog = rfd::AsyncFileDialog::new()
                            .set_title("Select images")
                            .add_filter("Images", UPLOAD_EXTENSIONS);
                        if let Some(dir) = start_dir {
                            if dir.exists() {
                                dialog = dialog.set_directory(&dir);
                            }
                        }
                        dialog
                            .pick_files()
                            .await
                            .map(|handles| handles.iter().map(|h| h.path().to_path_buf()).collect())
                            .unwrap_or_default()
                    },
                    move |paths| Message::FilesPicked { generation, paths },
                );
                (Effect::None, task)
            }
            Message::FilesPicked { generation, paths } => {
                let spec = ctx.local_spec;
                let Some(form) = self.form_mut(generation) else {
                    return (Effect::None, Task::none());
                };
                let remember = paths.first().cloned();
                let sources: Vec<SourceHandle> = paths
                    .into_iter()
                    .filter(|path| is_uploadable(path))
                    .map(SourceHandle::new)
                    .collect();
                tracing::info!(count = sources.len(), "files selected for upload");

                let tasks = form.add_files(sources).into_iter().map(|job| {
                    let id = job.id;
                    Task::perform(preview::load_local(job.path, spec), move |outcome| {
                        Message::PreviewReady {
                            generation,
                            id,
                            outcome,
                        }
                    })
                });
                let task = Task::batch(tasks);
                let effect = remember.map_or(Effect::None, Effect::RememberOpenDir);
                (effect, task)
            }
            Message::PreviewReady {
                generation,
                id,
                outcome,
            } => {
                if let Some(form) = self.form_mut(generation) {
                    form.on_preview_ready(id, outcome.into_preview());
                }
                (Effect::None, Task::none())
            }
            Message::RemoveFile(index) => {
                if let Editor::Open(form) = &mut self.editor {
                    form.remove_file(index);
                }
                (Effect::None, Task::none())
            }
            Message::RemoveAllFiles => {
                if let Editor::Open(form) = &mut self.editor {
                    form.remove_all_files();
                }
                (Effect::None, Task::none())
            }
            Message::ToggleDeletion(image_id) => {
                if let Editor::Open(form) = &mut self.editor {
                    form.toggle_deletion(&image_id);
                }
                (Effect::None, Task::none())
            }
            Message::Submit => self.submit(ctx),
            Message::Submitted { generation, result } => {
                let Some(form) = self.form_mut(generation) else {
                    return (Effect::None, Task::none());
                };
                match result {
                    Ok(()) => {
                        let created = !form.is_edit();
                        form.submit_succeeded();
                        let name = form.meta().name.clone();
                        tracing::info!(created, "album saved");
                        self.close_editor();
                        self.loading = true;
                        let message = if created {
                            "Album created".to_string()
                        } else {
                            format!("Album \"{name}\" updated")
                        };
                        (Effect::ShowSuccess(message), fetch_albums(ctx.api.clone()))
                    }
                    Err(err) if err.is_auth() => {
                        form.submit_failed("Session expired");
                        (Effect::SessionExpired, Task::none())
                    }
                    Err(err) => {
                        let message = err.to_string();
                        form.submit_failed(message.clone());
                        (Effect::ShowError(format!("Could not save album: {message}")), Task::none())
                    }
                }
            }
            Message::CloseEditor => {
                if self.form().is_some_and(AlbumEditForm::is_submitting) {
                    return (Effect::None, Task::none());
                }
                self.close_editor();
                (Effect::None, Task::none())
            }
            Message::RequestDelete(album_id) => {
                self.confirm_delete = Some(album_id);
                (Effect::None, Task::none())
            }
            Message::CancelDelete => {
                self.confirm_delete = None;
                (Effect::None, Task::none())
            }
            Message::ConfirmDelete => {
                let Some(album_id) = self.confirm_delete.take() else {
                    return (Effect::None, Task::none());
                };
                let api = ctx.api.clone();
                let session = ctx.session.clone();
                let task = Task::perform(
                    {
                        let album_id = album_id.clone();
                        async move { api.delete_album(&session, &album_id).await }
                    },
                    move |result| Message::AlbumDeleted {
                        album_id: album_id.clone(),
                        result,
                    },
                );
                (Effect::None, task)
            }
            Message::AlbumDeleted { album_id, result } => match result {
                Ok(()) => {
                    tracing::info!(album = %album_id, "album deleted");
                    self.albums.retain(|album| album.id != album_id);
                    (Effect::ShowSuccess("Album deleted".into()), Task::none())
                }
                Err(err) if err.is_auth() => (Effect::SessionExpired, Task::none()),
                Err(err) => (Effect::ShowError(format!("Could not delete album: {err}")), Task::none()),
            },
            Message::Logout => (Effect::SignOut, Task::none()),
            Message::Back => (Effect::GoHome, Task::none()),
        }
    }

    fn open_edit_form(&mut self, detail: AlbumDetail, ctx: &mut Context<'_>) -> (Effect, Task<Message>) {
        let existing: Vec<ExistingImage> = detail
            .images
            .iter()
            .map(|image| {
                let url = ctx.api.upload_url(&detail.album.name, &image.file_name);
                ExistingImage::new(image, url.to_string())
            })
            .collect();

        let mut form = AlbumEditForm::edit(&detail.album, existing);
        let generation = self.generation;
        let mut tasks = Vec::new();
        let pending: Vec<(ImageId, String)> = form
            .existing_images()
            .iter()
            .map(|image| (image.id.clone(), image.url.clone()))
            .collect();

        for (image_id, url) in pending {
            if let Some(preview) = ctx.cache.get(&url) {
                form.set_existing_preview(&image_id, PreviewOutcome::Encoded(preview));
                continue;
            }
            let http = ctx.api.http();
            let spec = ctx.remote_spec;
            tasks.push(Task::perform(preview::load_remote(http, url.clone(), spec), move |outcome| {
                Message::ExistingPreviewLoaded {
                    generation,
                    image_id: image_id.clone(),
                    url: url.clone(),
                    outcome,
                }
            }));
        }

        self.editor = Editor::Open(form);
        (Effect::None, Task::batch(tasks))
    }

    fn submit(&mut self, ctx: &Context<'_>) -> (Effect, Task<Message>) {
        let generation = self.generation;
        let Editor::Open(form) = &mut self.editor else {
            return (Effect::None, Task::none());
        };
        let Some(payload) = form.begin_submit() else {
            return (Effect::None, Task::none());
        };
        if !ctx.session.has_token() {
            form.submit_failed("Not signed in");
            return (Effect::SessionExpired, Task::none());
        }

        tracing::info!(
            images = payload.images.len(),
            deletions = payload.images_to_delete.len(),
            "submitting album"
        );

        let api = ctx.api.clone();
        let session = ctx.session.clone();
        let task = Task::perform(
            async move {
                let target = payload.target.clone();
                let body = payload.into_multipart().await?;
                match target {
                    SubmitTarget::Create => api.create_album(&session, body).await,
                    SubmitTarget::Update(album_id) => api.update_album(&session, &album_id, body).await,
                }
            },
            move |result| Message::Submitted { generation, result },
        );
        (Effect::None, task)
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.editor {
            Editor::Closed => self.list_view(),
            Editor::Loading(_) => Container::new(Text::new("Loading album…").size(typography::BODY_LG))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into(),
            Editor::Open(form) => form_view(form),
        }
    }

    fn list_view(&self) -> Element<'_, Message> {
        let header = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Manage Albums").size(typography::TITLE_LG))
            .push(Space::new().width(Length::Fill))
            .push(button(Text::new("Create Album")).on_press(Message::NewAlbum))
            .push(
                button(Text::new("Logout"))
                    .style(button::danger)
                    .on_press(Message::Logout),
            )
            .push(
                button(Text::new("← Back to Home"))
                    .style(button::secondary)
                    .on_press(Message::Back),
            );

        let mut content = Column::new().spacing(spacing::MD).push(header);

        if let Some(error) = &self.error {
            content = content.push(Text::new(format!("Error: {error}")).style(text::danger));
        }

        if self.loading && self.albums.is_empty() {
            content = content.push(Text::new("Loading albums…"));
        } else if self.albums.is_empty() {
            content = content.push(Text::new("No albums found."));
        } else {
            for album in &self.albums {
                content = content.push(self.album_row(album));
            }
        }

        Scrollable::new(content.padding(spacing::LG).width(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn album_row<'a>(&'a self, album: &'a Album) -> Element<'a, Message> {
        let summary = Column::new()
            .spacing(spacing::XXS)
            .width(Length::Fill)
            .push(Text::new(album.name.as_str()).size(typography::TITLE_MD))
            .push(Text::new(album.description.as_str()).size(typography::BODY))
            .push(
                Text::new(format!(
                    "{} · {} images",
                    album.date.as_deref().unwrap_or("Undated"),
                    album.number_of_images
                ))
                .size(typography::CAPTION),
            );

        let actions: Element<'a, Message> = if self.confirm_delete.as_deref() == Some(album.id.as_str()) {
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(Text::new("Delete this album?").size(typography::BODY))
                .push(
                    button(Text::new("Delete"))
                        .style(button::danger)
                        .on_press(Message::ConfirmDelete),
                )
                .push(
                    button(Text::new("Cancel"))
                        .style(button::secondary)
                        .on_press(Message::CancelDelete),
                )
                .into()
        } else {
            Row::new()
                .spacing(spacing::XS)
                .push(
                    button(Text::new("Edit"))
                        .style(button::secondary)
                        .on_press(Message::EditAlbum(album.id.clone())),
                )
                .push(
                    button(Text::new("Delete"))
                        .style(button::danger)
                        .on_press(Message::RequestDelete(album.id.clone())),
                )
                .into()
        };

        Container::new(
            Row::new()
                .spacing(spacing::MD)
                .align_y(alignment::Vertical::Center)
                .push(summary)
                .push(actions),
        )
        .padding(spacing::SM)
        .style(iced::widget::container::bordered_box)
        .into()
    }
}

fn form_view(form: &AlbumEditForm) -> Element<'_, Message> {
    let title = if form.is_edit() { "Edit Album" } else { "Create New Album" };
    let editable = !form.is_submitting();
    let meta = form.meta();

    let mut content = Column::new()
        .spacing(spacing::MD)
        .width(Length::Fixed(sizing::FORM_WIDTH))
        .push(Text::new(title).size(typography::TITLE_MD))
        .push(labeled_input(
            "Album name",
            "Album name",
            &meta.name,
            editable.then_some(Message::NameChanged),
        ))
        .push(labeled_input(
            "Description",
            "Album description",
            &meta.description,
            editable.then_some(Message::DescriptionChanged),
        ))
        .push(labeled_input(
            "Date",
            "YYYY-MM-DD",
            &meta.date,
            editable.then_some(Message::DateChanged),
        ));

    if form.is_edit() {
        content = content.push(existing_images_view(form));
    }

    content = content.push(selection_view(form, editable));

    if let Some(error) = form.error() {
        content = content.push(Text::new(error).style(text::danger));
    } else if let Err(reason) = form.validate() {
        content = content.push(Text::new(reason.to_string()).size(typography::CAPTION));
    }

    let submit_label = match (form.is_submitting(), form.is_edit()) {
        (true, _) => "Saving…",
        (false, true) => "Save changes",
        (false, false) => "Create album",
    };

    content = content.push(
        Row::new()
            .spacing(spacing::XS)
            .push(Space::new().width(Length::Fill))
            .push(
                button(Text::new("Cancel"))
                    .style(button::secondary)
                    .on_press_maybe(editable.then_some(Message::CloseEditor)),
            )
            .push(button(Text::new(submit_label)).on_press_maybe(form.can_submit().then_some(Message::Submit))),
    );

    Scrollable::new(
        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::LG)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: Option<fn(String) -> Message>,
) -> Column<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(label).size(typography::CAPTION))
        .push(text_input(placeholder, value).on_input_maybe(on_input))
}

fn preview_tile<'a>(preview: Option<&Preview>, ready: bool, fallback: &'a str) -> Element<'a, Message> {
    let edge = Length::Fixed(sizing::THUMBNAIL_SM);
    match preview {
        Some(preview) => Image::new(preview.handle())
            .content_fit(ContentFit::Cover)
            .width(edge)
            .height(edge)
            .into(),
        None => {
            let label = if ready { fallback } else { "…" };
            Container::new(Text::new(label).size(typography::CAPTION))
                .width(edge)
                .height(edge)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into()
        }
    }
}

fn existing_images_view(form: &AlbumEditForm) -> Element<'_, Message> {
    let tiles: Vec<Element<'_, Message>> = form
        .existing_images()
        .iter()
        .map(|image| {
            let marked = form.is_marked(&image.id);
            let toggle_style: fn(&iced::Theme, button::Status) -> button::Style =
                if marked { button::secondary } else { button::danger };
            let tile = Column::new()
                .spacing(spacing::XXS)
                .align_x(alignment::Horizontal::Center)
                .push(
                    Container::new(preview_tile(
                        image.preview(),
                        image.is_preview_ready(),
                        &image.file_name,
                    ))
                    .style(shared_styles::thumbnail_frame(marked)),
                )
                .push(
                    button(Text::new(if marked { "Keep" } else { "Remove" }).size(typography::CAPTION))
                        .style(toggle_style)
                        .on_press_maybe(
                            (!form.is_submitting()).then(|| Message::ToggleDeletion(image.id.clone())),
                        ),
                );
            tile.into()
        })
        .collect();

    Column::new()
        .spacing(spacing::XS)
        .push(
            Text::new(format!(
                "Existing images ({} marked for deletion)",
                form.marked_count()
            ))
            .size(typography::CAPTION),
        )
        .push(Row::with_children(tiles).spacing(spacing::XS).wrap())
        .into()
}

fn selection_view(form: &AlbumEditForm, editable: bool) -> Element<'_, Message> {
    let selection = form.selection();
    let tiles: Vec<Element<'_, Message>> = selection
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Column::new()
                .spacing(spacing::XXS)
                .align_x(alignment::Horizontal::Center)
                .push(preview_tile(
                    item.preview(),
                    item.is_preview_ready(),
                    item.source().path().to_str().unwrap_or("image"),
                ))
                .push(
                    button(Text::new("Remove").size(typography::CAPTION))
                        .style(button::danger)
                        .on_press_maybe(editable.then_some(Message::RemoveFile(index))),
                )
                .into()
        })
        .collect();

    let mut actions = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(button(Text::new("Add images…")).on_press_maybe(editable.then_some(Message::PickFiles)))
        .push(Text::new(format!("{} selected", selection.len())).size(typography::CAPTION));
    if !selection.is_empty() {
        actions = actions.push(
            button(Text::new("Remove all"))
                .style(button::secondary)
                .on_press_maybe(editable.then_some(Message::RemoveAllFiles)),
        );
    }

    Column::new()
        .spacing(spacing::XS)
        .push(actions)
        .push(Row::with_children(tiles).spacing(spacing::XS).wrap())
        .into()
}

fn fetch_albums(api: ApiClient) -> Task<Message> {
    Task::perform(async move { api.list_albums().await }, Message::AlbumsLoaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::album::SubmitState;
    use crate::api::AlbumImage;

    struct Harness {
        api: ApiClient,
        session: Session,
        cache: PreviewCache,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                api: ApiClient::new("http://localhost:3000", "http://localhost:3000").expect("client"),
                session: Session::from_token(Some("tok".into())),
                cache: PreviewCache::default(),
            }
        }

        fn send(&mut self, state: &mut State, message: Message) -> Effect {
            let mut ctx = Context {
                api: &self.api,
                session: &self.session,
                cache: &mut self.cache,
                local_spec: PreviewSpec::LOCAL,
                remote_spec: PreviewSpec::REMOTE,
                open_dir: None,
            };
            state.handle_message(message, &mut ctx).0
        }
    }

    fn detail() -> AlbumDetail {
        AlbumDetail {
            album: Album {
                id: "a1".into(),
                name: "Trip".into(),
                description: "Summer trip".into(),
                date: Some("2024-06-01".into()),
                number_of_images: 2,
            },
            images: ["i1", "i2"]
                .iter()
                .map(|id| AlbumImage {
                    id: (*id).into(),
                    album_id: "a1".into(),
                    file_name: format!("{id}.jpg"),
                })
                .collect(),
        }
    }

    #[test]
    fn edit_opens_after_details_arrive() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::EditAlbum("a1".into()));
        assert!(state.is_editor_loading());

        let generation = state.generation();
        harness.send(
            &mut state,
            Message::EditDetailsLoaded {
                generation,
                result: Ok(detail()),
            },
        );
        let form = state.form().expect("form open");
        assert!(form.is_edit());
        assert_eq!(form.existing_images().len(), 2);
        assert_eq!(
            form.existing_images()[0].url,
            "http://localhost:3000/uploads/Trip/i1.jpg"
        );
    }

    #[test]
    fn details_for_another_album_do_not_open_the_form() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::EditAlbum("a2".into()));

        let generation = state.generation();
        let effect = harness.send(
            &mut state,
            Message::EditDetailsLoaded {
                generation,
                result: Ok(detail()),
            },
        );
        assert!(matches!(effect, Effect::ShowError(_)));
        assert!(state.form().is_none());
        assert!(!state.is_editor_loading());
    }

    #[test]
    fn details_for_closed_editor_are_dropped() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::EditAlbum("a1".into()));
        let stale = state.generation();
        harness.send(&mut state, Message::CloseEditor);
        harness.send(
            &mut state,
            Message::EditDetailsLoaded {
                generation: stale,
                result: Ok(detail()),
            },
        );
        assert!(state.form().is_none());
    }

    #[test]
    fn preview_from_previous_dialog_is_ignored() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::NewAlbum);
        let first = state.generation();
        harness.send(
            &mut state,
            Message::FilesPicked {
                generation: first,
                paths: vec![PathBuf::from("/tmp/a.jpg")],
            },
        );
        assert_eq!(state.form().map(|f| f.selection().len()), Some(1));

        harness.send(&mut state, Message::CloseEditor);
        harness.send(&mut state, Message::NewAlbum);
        harness.send(
            &mut state,
            Message::FilesPicked {
                generation: first,
                paths: vec![PathBuf::from("/tmp/b.jpg")],
            },
        );
        assert_eq!(state.form().map(|f| f.selection().len()), Some(0));
    }

    #[test]
    fn non_image_files_are_skipped() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::NewAlbum);
        let generation = state.generation();
        let effect = harness.send(
            &mut state,
            Message::FilesPicked {
                generation,
                paths: vec![PathBuf::from("/tmp/a.jpg"), PathBuf::from("/tmp/notes.txt")],
            },
        );
        assert_eq!(effect, Effect::RememberOpenDir(PathBuf::from("/tmp/a.jpg")));
        assert_eq!(state.form().map(|f| f.selection().len()), Some(1));
    }

    #[test]
    fn submit_is_guarded_and_failure_keeps_fields() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::NewAlbum);
        let generation = state.generation();
        harness.send(&mut state, Message::NameChanged("Trip".into()));
        harness.send(&mut state, Message::DescriptionChanged("Summer trip".into()));
        harness.send(
            &mut state,
            Message::FilesPicked {
                generation,
                paths: vec![PathBuf::from("/tmp/a.jpg")],
            },
        );

        harness.send(&mut state, Message::Submit);
        assert_eq!(state.form().map(AlbumEditForm::state), Some(SubmitState::Submitting));
        harness.send(&mut state, Message::CloseEditor);
        assert!(state.form().is_some(), "cannot close while submitting");

        let effect = harness.send(
            &mut state,
            Message::Submitted {
                generation,
                result: Err(Error::Io("boom".into())),
            },
        );
        assert!(matches!(effect, Effect::ShowError(_)));
        let form = state.form().expect("form kept");
        assert_eq!(form.meta().name, "Trip");
        assert_eq!(form.error(), Some("I/O Error: boom"));
    }

    #[test]
    fn successful_submit_closes_editor() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::NewAlbum);
        let generation = state.generation();
        let effect = harness.send(
            &mut state,
            Message::Submitted {
                generation,
                result: Ok(()),
            },
        );
        assert_eq!(effect, Effect::ShowSuccess("Album created".into()));
        assert!(state.form().is_none());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut harness = Harness::new();
        let mut state = State::default();
        harness.send(&mut state, Message::AlbumsLoaded(Ok(vec![detail().album])));
        harness.send(&mut state, Message::RequestDelete("a1".into()));
        assert_eq!(state.pending_delete(), Some("a1"));
        harness.send(&mut state, Message::CancelDelete);
        assert_eq!(state.pending_delete(), None);

        harness.send(
            &mut state,
            Message::AlbumDeleted {
                album_id: "a1".into(),
                result: Ok(()),
            },
        );
        assert!(state.albums().is_empty());
    }

    #[test]
    fn unauthorised_list_expires_session() {
        let mut harness = Harness::new();
        let mut state = State::default();
        let effect = harness.send(
            &mut state,
            Message::AlbumsLoaded(Err(Error::Auth("invalid token".into()))),
        );
        assert_eq!(effect, Effect::SessionExpired);
    }
}
