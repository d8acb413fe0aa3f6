use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobboard_core::FilterCriteria;
use jobboard_logging::{jobboard_debug, jobboard_info};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ListingSource};

enum EngineCommand {
    FetchListing {
        generation: u64,
        filters: FilterCriteria,
        page: u32,
    },
    LoadFilterOptions,
}

/// Runs listing source calls on a background tokio runtime.
///
/// Completions come back through [`EngineHandle::try_recv`] in arrival order.
/// A new listing fetch cancels the one still in flight; a result that slipped
/// out before the cancel is still delivered, tagged with its old generation.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn ListingSource>, page_size: u32) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("jobboard-engine".to_string())
            .spawn(move || {
                let mut in_flight: Option<CancellationToken> = None;
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let event_tx = event_tx.clone();
                    match command {
                        EngineCommand::FetchListing {
                            generation,
                            filters,
                            page,
                        } => {
                            let token = CancellationToken::new();
                            if let Some(previous) = in_flight.replace(token.clone()) {
                                previous.cancel();
                            }
                            runtime.spawn(async move {
                                tokio::select! {
                                    _ = token.cancelled() => {
                                        jobboard_debug!("Listing fetch generation={} cancelled", generation);
                                    }
                                    result = source.list(&filters, page, page_size) => {
                                        if let Err(err) = &result {
                                            jobboard_info!("Listing fetch generation={} failed: {} ({})", generation, err, err.kind);
                                        }
                                        let _ = event_tx.send(EngineEvent::ListingCompleted { generation, result });
                                    }
                                }
                            });
                        }
                        EngineCommand::LoadFilterOptions => {
                            runtime.spawn(async move {
                                let result = source.filter_options().await;
                                let _ = event_tx.send(EngineEvent::FilterOptionsCompleted(result));
                            });
                        }
                    }
                }
                jobboard_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_listing(&self, generation: u64, filters: FilterCriteria, page: u32) {
        jobboard_debug!("Fetch listing generation={} page={}", generation, page);
        let _ = self.cmd_tx.send(EngineCommand::FetchListing {
            generation,
            filters,
            page,
        });
    }

    pub fn load_filter_options(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadFilterOptions);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
