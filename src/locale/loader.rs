//! Discovery and loading of translation files from a workspace.
use std::path::{
    Path,
    PathBuf,
};

use futures::{
    StreamExt,
    stream,
};
use ignore::WalkBuilder;

use super::id::infer_locale;
use super::{
    LocaleError,
    LocaleId,
    LocaleSet,
};
use crate::config::{
    FileMatcher,
    I18nSettings,
};
use crate::input::{
    SourceFormat,
    TranslationTree,
};

/// A translation file found in the workspace, with the locale it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DiscoveredFile {
    path: PathBuf,
    locale: LocaleId,
    namespace: Option<String>,
}

impl LocaleSet {
    /// Loads every translation file under `workspace_root`.
    ///
    /// Files are read concurrently, up to `loading.concurrency` at a time, and
    /// merged in path order so the result does not depend on read timing.
    ///
    /// # Errors
    /// - Invalid glob pattern in settings
    /// - A matching file cannot be read or parsed
    pub async fn load(
        workspace_root: &Path,
        settings: &I18nSettings,
    ) -> Result<Self, LocaleError> {
        tracing::debug!(workspace_root = %workspace_root.display(), "Loading translations");
        let matcher = FileMatcher::new(workspace_root.to_path_buf(), settings)?;
        let files = find_translation_files(&matcher);
        let concurrency = settings.loading.effective_concurrency();

        let loaded: Vec<Result<(DiscoveredFile, TranslationTree), LocaleError>> =
            stream::iter(files.into_iter().map(load_file)).buffered(concurrency).collect().await;

        let mut set = Self::new();
        for result in loaded {
            let (file, tree) = result?;
            let origin = file.path.display().to_string();
            set.insert(file.locale, file.namespace.as_deref(), tree, &origin);
        }

        tracing::debug!(locales = set.len(), "Translations loaded");
        Ok(set)
    }
}

/// Reads and parses a single translation file.
async fn load_file(file: DiscoveredFile) -> Result<(DiscoveredFile, TranslationTree), LocaleError> {
    let content = tokio::fs::read_to_string(&file.path)
        .await
        .map_err(|source| LocaleError::Read { path: file.path.clone(), source })?;

    let tree = TranslationTree::parse(&content, SourceFormat::from_path(&file.path))
        .map_err(|source| LocaleError::Parse { path: file.path.clone(), source })?;

    tracing::debug!(path = %file.path.display(), locale = %file.locale, "Loaded translation file");
    Ok((file, tree))
}

/// Walks the workspace and returns matching translation files in sorted order.
fn find_translation_files(matcher: &FileMatcher) -> Vec<DiscoveredFile> {
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(matcher.workspace_root())
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_translation_file(path) {
            continue;
        }

        let Some((locale, namespace)) = infer_locale(path) else {
            tracing::warn!(path = %path.display(), "Cannot infer locale from path, skipping");
            continue;
        };

        found_files.push(DiscoveredFile { path: path.to_path_buf(), locale, namespace });
    }

    found_files.sort_by(|a, b| a.path.cmp(&b.path));
    found_files
}
