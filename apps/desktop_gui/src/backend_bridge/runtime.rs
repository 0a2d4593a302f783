//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use table_core::{load_comments, CommentSource};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(
    source: Arc<dyn CommentSource>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                match cmd {
                    BackendCommand::FetchComments => {
                        let _ = ui_tx.try_send(UiEvent::Info(format!(
                            "Loading comments from {}",
                            source.describe()
                        )));
                        let outcome = load_comments(source.as_ref()).await;
                        if ui_tx.send(UiEvent::CommentsFetched(outcome)).is_err() {
                            tracing::warn!("ui event channel closed before fetch result");
                            break;
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }
            tracing::debug!("backend worker stopped");
        });
    })
}
