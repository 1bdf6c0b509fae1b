// SPDX-License-Identifier: MPL-2.0
use album_lens::api::Endpoint;
use album_lens::app::config::{self, Config};
use album_lens::app::{Flags, LaunchArgs};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn settings_survive_a_save_and_reload() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut settings = Config::default();
    settings.server.api_url = Some("https://albums.example.org".into());
    settings.slideshow.transition_ms = Some(5000);
    settings.previews.remote_edge = Some(150);
    config::save_with_override(&settings, Some(dir.path().to_path_buf()))
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded.server.api_url(), "https://albums.example.org");
    assert_eq!(loaded.slideshow.transition(), Duration::from_millis(5000));
    assert_eq!(loaded.previews.remote_spec().max_width, 150);
}

#[test]
fn malformed_settings_fall_back_with_a_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[slideshow\ntransition_ms = ")
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_some());
    assert_eq!(loaded, Config::default());
}

#[test]
fn too_short_transition_is_raised_to_one_second() {
    let mut settings = Config::default();
    settings.slideshow.transition_ms = Some(200);
    assert_eq!(settings.slideshow.transition(), Duration::from_millis(1000));
}

#[test]
fn command_line_urls_override_settings() {
    let mut settings = Config::default();
    settings.server.api_url = Some("https://from-settings.example".into());

    let flags = Flags::with_config(
        LaunchArgs {
            api_url: Some("https://from-cli.example".into()),
            ..LaunchArgs::default()
        },
        settings,
        None,
    )
    .expect("valid urls");

    assert_eq!(
        flags.api.endpoint_url(Endpoint::Albums).as_str(),
        "https://from-cli.example/api/albums"
    );
}

#[test]
fn unusable_server_url_is_rejected() {
    let result = Flags::with_config(
        LaunchArgs {
            api_url: Some("not a url".into()),
            ..LaunchArgs::default()
        },
        Config::default(),
        None,
    );
    assert!(result.is_err());
}
