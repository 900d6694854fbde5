use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::thread;
use tokio::runtime::Runtime;

/// Spawns the watcher on its own runtime thread; events arrive on `tx`
/// while the main thread keeps a blocking render loop.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    config_path: Option<PathBuf>,
    records_path: Option<PathBuf>,
) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            tokio::spawn(async move {
                run_async_watcher(tx, config_path, records_path).await;
            });

            std::future::pending::<()>().await;
        });
    });
}

fn canonical(path: &Path) -> PathBuf {
    fs_err::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub async fn run_async_watcher(
    tx: Sender<AppEvent>,
    config_path: Option<PathBuf>,
    records_path: Option<PathBuf>,
) {
    let config_path = config_path.as_deref().map(canonical);
    let records_path = records_path.as_deref().map(canonical);

    let watch_dirs: BTreeSet<PathBuf> = [&config_path, &records_path]
        .into_iter()
        .flatten()
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect();
    if watch_dirs.is_empty() {
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    for dir in &watch_dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }

                let touches = |target: &Option<PathBuf>| {
                    target
                        .as_ref()
                        .is_some_and(|t| event.paths.iter().any(|p| p == t))
                };

                let app_event = if touches(&records_path) {
                    Some(AppEvent::RecordsChanged)
                } else if touches(&config_path) {
                    Some(AppEvent::ConfigChanged)
                } else {
                    None
                };

                if let Some(app_event) = app_event
                    && tx.send(app_event).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
