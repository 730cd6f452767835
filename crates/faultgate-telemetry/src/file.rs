use std::path::{Path, PathBuf};

use faultgate_config::{FileSinkOptions, RollingInterval};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;

use crate::BoxedLayer;

/// Log file path template split into the parts the rolling appender takes
///
/// `logs/log-.txt` becomes directory `logs`, prefix `log`, suffix `txt`, so
/// daily files are named `log.2025-01-31.txt`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FileTemplate {
    pub(crate) directory: PathBuf,
    pub(crate) prefix: Option<String>,
    pub(crate) suffix: Option<String>,
}

impl FileTemplate {
    pub(crate) fn parse(path: &Path) -> Self {
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let prefix = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().trim_end_matches(['-', '_', '.']).to_owned())
            .filter(|stem| !stem.is_empty());

        let suffix = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .filter(|ext| !ext.is_empty());

        Self {
            directory,
            prefix,
            suffix,
        }
    }
}

const fn rotation(interval: RollingInterval) -> Rotation {
    match interval {
        RollingInterval::Minute => Rotation::MINUTELY,
        RollingInterval::Hour => Rotation::HOURLY,
        RollingInterval::Day => Rotation::DAILY,
        RollingInterval::Never => Rotation::NEVER,
    }
}

/// Rolling file layer restricted to `level`
pub(crate) fn layer(options: &FileSinkOptions, level: LevelFilter) -> anyhow::Result<(BoxedLayer, WorkerGuard)> {
    let template = FileTemplate::parse(&options.path);

    let mut builder = RollingFileAppender::builder().rotation(rotation(options.rolling_interval));

    if let Some(ref prefix) = template.prefix {
        builder = builder.filename_prefix(prefix);
    }

    if let Some(ref suffix) = template.suffix {
        builder = builder.filename_suffix(suffix);
    }

    if let Some(count) = options.retained_file_count {
        builder = builder.max_log_files(count);
    }

    let appender = builder.build(&template.directory).map_err(|e| {
        anyhow::anyhow!(
            "failed to open rolling log file in {}: {e}",
            template.directory.display()
        )
    })?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_filter(level)
        .boxed();

    Ok((layer, guard))
}
