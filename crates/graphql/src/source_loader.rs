use libgraphql_client::registry::RegistrationError;
use libgraphql_client::Client;
use libgraphql_client::ScopePath;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A GraphQL source file found on disk along with the scope path it will be
/// registered under.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SourceFile {
    pub file_path: PathBuf,
    pub scope_path: ScopePath,
}

#[derive(Debug, Default)]
pub(crate) struct DiscoveredSources {
    pub errors: Vec<anyhow::Error>,
    pub files: Vec<SourceFile>,
    pub num_skipped: usize,
}

/// Find all GraphQL files recursively located at or under each of
/// `file_or_dir_paths`.
pub(crate) fn discover_sources(
    file_or_dir_paths: &[PathBuf],
    file_exts: &[String],
) -> DiscoveredSources {
    let file_exts: HashSet<&str> =
        file_exts.iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

    log::debug!("Scanning {} input paths...", file_or_dir_paths.len());
    let mut discovered = DiscoveredSources::default();
    for root in file_or_dir_paths {
        // An explicitly named file is loaded no matter its extension.
        if root.is_file() {
            push_source(&mut discovered, root.parent().unwrap_or(Path::new("")), root);
            continue;
        }

        for entry in WalkDir::new(root.as_path()).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if !entry.file_type().is_file() {
                        log::trace!("Skipping non-file: {path:#?}.");
                        continue;
                    }
                    let has_graphql_ext = path.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| file_exts.contains(ext));
                    if has_graphql_ext {
                        log::trace!("Found GraphQL file at {path:#?}.");
                        push_source(&mut discovered, root, path);
                    } else {
                        log::trace!("Skipping non-graphql file: {path:#?}.");
                        discovered.num_skipped += 1;
                    }
                },

                Err(err) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {root:#?}."
                    );
                    discovered.errors.push(err.into());
                },
            }
        }
    }

    log::debug!(
        "Found {} GraphQL files ({} skipped).",
        discovered.files.len(),
        discovered.num_skipped,
    );
    discovered
}

fn push_source(discovered: &mut DiscoveredSources, root: &Path, file_path: &Path) {
    match scope_path_for(root, file_path) {
        Ok(scope_path) => discovered.files.push(SourceFile {
            file_path: file_path.to_path_buf(),
            scope_path,
        }),
        Err(err) => discovered.errors.push(err),
    }
}

/// The scope path of a file is its directory segments relative to `root`
/// followed by its file stem: `<root>/App/Users/profile.graphql` registers
/// under `App::Users::profile`.
pub(crate) fn scope_path_for(root: &Path, file_path: &Path) -> anyhow::Result<ScopePath> {
    let relative = file_path.strip_prefix(root).unwrap_or(file_path);
    let mut segments: Vec<String> =
        relative.parent()
            .into_iter()
            .flat_map(Path::components)
            .filter_map(|component| match component {
                std::path::Component::Normal(segment) =>
                    Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
    let stem = file_path.file_stem()
        .ok_or_else(|| anyhow::anyhow!("{file_path:?} has no file name"))?;
    segments.push(stem.to_string_lossy().into_owned());

    ScopePath::new(segments).map_err(|err| anyhow::anyhow!(
        "Cannot derive a scope path for {file_path:?}: {err}",
    ))
}

/// Register every file with `client`.
///
/// Files spreading fragments declared in files that have not been loaded
/// yet are retried on a later pass, so the order files were discovered in
/// does not matter. Loading stops once a pass makes no progress.
pub(crate) fn register_sources(
    client: &Client,
    files: Vec<SourceFile>,
) -> Vec<anyhow::Error> {
    let mut errors = vec![];
    let mut pending = files;
    let mut pass = 1;
    while !pending.is_empty() {
        log::debug!("Registration pass {pass}: {} files pending.", pending.len());
        let num_pending = pending.len();
        let mut deferred = vec![];
        for file in pending {
            match client.register_file(&file.scope_path, &file.file_path) {
                Ok(parsed) => log::trace!(
                    "Registered {} definitions from {:?}.",
                    parsed.definitions().len(),
                    file.file_path,
                ),

                Err(err @ RegistrationError::UnresolvedFragment { .. }) =>
                    deferred.push((file, err)),

                Err(err) => errors.push(anyhow::Error::new(err).context(format!(
                    "Failed to register {:?}",
                    file.file_path,
                ))),
            }
        }

        if deferred.len() == num_pending {
            errors.extend(deferred.into_iter().map(|(file, err)|
                anyhow::Error::new(err).context(format!(
                    "Failed to register {:?}",
                    file.file_path,
                ))
            ));
            break;
        }
        pending = deferred.into_iter().map(|(file, _)| file).collect();
        pass += 1;
    }
    errors
}
