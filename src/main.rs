// SPDX-License-Identifier: MPL-2.0
use album_lens::app::{self, paths, Flags, LaunchArgs};
use std::path::PathBuf;

const HELP: &str = "\
album_lens - photo album client

USAGE:
  album_lens [OPTIONS] [ALBUM_ID]

OPTIONS:
  -h, --help              Print this help
  --api-url <URL>         API server origin (default http://localhost:3000)
  --upload-url <URL>      Origin serving uploaded images
  --config-dir <PATH>     Directory holding settings.toml
  --data-dir <PATH>       Directory holding state.cbor

ARGS:
  [ALBUM_ID]              Open this album instead of the album list
";

fn parse_args() -> Result<Option<LaunchArgs>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let launch = LaunchArgs {
        api_url: args.opt_value_from_str("--api-url")?,
        upload_url: args.opt_value_from_str("--upload-url")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        album_id: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };
    Ok(Some(launch))
}

fn main() -> iced::Result {
    album_lens::logging::init();

    let launch = match parse_args() {
        Ok(Some(launch)) => launch,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(
        launch.data_dir.as_ref().map(PathBuf::from),
        launch.config_dir.as_ref().map(PathBuf::from),
    );

    let flags = match Flags::resolve(launch) {
        Ok(flags) => flags,
        Err(err) => {
            tracing::error!(error = %err, "invalid startup configuration");
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}
