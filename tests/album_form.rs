// SPDX-License-Identifier: MPL-2.0
use album_lens::album::form::{today, FieldValue, SubmitTarget};
use album_lens::album::{AlbumEditForm, ExistingImage, SourceHandle, SubmitState};
use album_lens::api::{Album, AlbumImage};
use album_lens::media::preview::{preview_file, PreviewSpec};
use image_rs::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

fn existing_album() -> (Album, Vec<ExistingImage>) {
    let album = Album {
        id: "a1".into(),
        name: "Alps".into(),
        description: "Hiking week".into(),
        date: Some("2023-08-14".into()),
        number_of_images: 3,
    };
    let existing = ["i1", "i2", "i3"]
        .iter()
        .map(|id| {
            let image = AlbumImage {
                id: (*id).to_string(),
                album_id: "a1".into(),
                file_name: format!("{id}.jpg"),
            };
            ExistingImage::new(&image, format!("http://localhost:3000/uploads/Alps/{id}.jpg"))
        })
        .collect();
    (album, existing)
}

fn field_names(fields: &[(&'static str, FieldValue)]) -> Vec<&'static str> {
    fields.iter().map(|(name, _)| *name).collect()
}

#[test]
fn edit_marks_one_image_and_adds_one_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let new_photo = write_photo(dir.path(), "summit.png", 640, 480);

    let (album, existing) = existing_album();
    let mut form = AlbumEditForm::edit(&album, existing);
    form.toggle_deletion("i2");
    let jobs = form.add_files(vec![SourceHandle::new(&new_photo)]);
    assert_eq!(jobs.len(), 1);

    for job in jobs {
        let outcome = preview_file(&job.path, PreviewSpec::LOCAL);
        let preview = outcome.preview().cloned().expect("preview");
        assert!(preview.width() <= 200 && preview.height() <= 200);
        assert!(form.on_preview_ready(job.id, Some(preview)));
    }

    let payload = form.begin_submit().expect("valid form");
    assert_eq!(form.state(), SubmitState::Submitting);
    assert!(form.begin_submit().is_none());

    assert_eq!(payload.target, SubmitTarget::Update("a1".into()));
    let fields = payload.fields();
    assert_eq!(
        field_names(&fields),
        vec!["name", "description", "date", "images", "imagesToDelete"]
    );
    assert_eq!(
        fields.last().map(|(_, value)| value.clone()),
        Some(FieldValue::Text(r#"["i2"]"#.into()))
    );
    match &fields[3].1 {
        FieldValue::File(source) => assert_eq!(source.path(), new_photo.as_path()),
        other => panic!("expected a file part, got {other:?}"),
    }

    form.submit_succeeded();
    assert_eq!(form.state(), SubmitState::Idle);
    assert_eq!(form.existing_images().len(), 2);
    assert_eq!(form.marked_count(), 0);
    assert!(form.selection().is_empty());
}

#[test]
fn create_resets_to_today_after_success() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let first = write_photo(dir.path(), "a.png", 32, 32);
    let second = write_photo(dir.path(), "b.png", 32, 32);

    let mut form = AlbumEditForm::create();
    assert_eq!(form.meta().date, today());
    assert!(!form.can_submit());

    form.set_name("Beach".into());
    form.set_description("Weekend".into());
    form.set_date("2024-07-01".into());
    assert!(!form.can_submit());

    form.add_files(vec![SourceHandle::new(&first), SourceHandle::new(&second)]);
    let payload = form.begin_submit().expect("valid form");
    assert_eq!(payload.target, SubmitTarget::Create);
    assert_eq!(
        field_names(&payload.fields()),
        vec!["name", "description", "date", "images", "images"]
    );

    form.submit_succeeded();
    assert_eq!(form.meta().name, "");
    assert_eq!(form.meta().date, today());
    assert!(form.selection().is_empty());
}

#[test]
fn failed_submit_keeps_everything_for_retry() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let photo = write_photo(dir.path(), "keep.png", 16, 16);

    let (album, existing) = existing_album();
    let mut form = AlbumEditForm::edit(&album, existing);
    form.toggle_deletion("i1");
    form.add_files(vec![SourceHandle::new(&photo)]);

    let first = form.begin_submit().expect("valid form");
    form.submit_failed("HTTP Error: 500");
    assert_eq!(form.error(), Some("HTTP Error: 500"));

    let retry = form.begin_submit().expect("retry allowed");
    assert_eq!(retry, first);
}

#[tokio::test]
async fn multipart_body_reads_original_files() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let photo = write_photo(dir.path(), "original.png", 800, 600);

    let mut form = AlbumEditForm::create();
    form.set_name("Body".into());
    form.set_description("Multipart".into());
    form.add_files(vec![SourceHandle::new(&photo)]);
    let payload = form.begin_submit().expect("valid form");

    assert!(payload.into_multipart().await.is_ok());
}

#[tokio::test]
async fn missing_file_fails_the_multipart_body() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut form = AlbumEditForm::create();
    form.set_name("Body".into());
    form.set_description("Multipart".into());
    form.add_files(vec![SourceHandle::new(dir.path().join("gone.jpg"))]);
    let payload = form.begin_submit().expect("valid form");

    assert!(payload.into_multipart().await.is_err());
}
