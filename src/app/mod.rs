mod state;
mod ui;

use crate::backend::{Backend, ImageRecord, ImportRequest, SourceFilter};
use crate::error::AppError;
use eframe::{egui, App};
pub use state::{GalleryView, Notice, RequestState, Tile, UiState};
use state::{EMPTY_URL_MESSAGE, IMPORT_FAILED_MESSAGE, IMPORT_STARTED_MESSAGE, LIST_FAILED_MESSAGE};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Result of one backend call, delivered back to the UI thread.
#[derive(Debug)]
pub enum BackendEvent {
    Listed {
        generation: u64,
        filter: SourceFilter,
        result: Result<Vec<ImageRecord>, AppError>,
    },
    Imported {
        result: Result<(), AppError>,
    },
}

pub struct ImageImporter {
    state: UiState,
    backend: Arc<dyn Backend>,
    runtime: Handle,
    sender: Sender<BackendEvent>,
    receiver: Receiver<BackendEvent>,
    listing_generation: u64,
    repaint: Option<egui::Context>,
}

impl ImageImporter {
    pub fn new(cc: &eframe::CreationContext<'_>, backend: Arc<dyn Backend>, runtime: Handle) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::with_backend(backend, runtime, Some(cc.egui_ctx.clone()))
    }

    fn with_backend(
        backend: Arc<dyn Backend>,
        runtime: Handle,
        repaint: Option<egui::Context>,
    ) -> Self {
        log::info!("Initializing image importer");
        let (sender, receiver) = mpsc::channel();
        let mut app = Self {
            state: UiState::default(),
            backend,
            runtime,
            sender,
            receiver,
            listing_generation: 0,
            repaint,
        };
        app.refresh_images();
        app
    }

    /// Lists images for the active filter. Only the most recently issued
    /// listing is applied when its response arrives.
    pub fn refresh_images(&mut self) {
        self.listing_generation += 1;
        let generation = self.listing_generation;
        let filter = self.state.filter;
        self.state.listing = RequestState::Pending;

        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = backend.list_images(filter).await;
            sender
                .send(BackendEvent::Listed {
                    generation,
                    filter,
                    result,
                })
                .unwrap_or_default();
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn select_filter(&mut self, filter: SourceFilter) {
        self.state.filter = filter;
        self.refresh_images();
    }

    pub fn submit_import(&mut self) {
        if self.state.is_loading() {
            log::warn!("Import already in progress, ignoring submit");
            return;
        }

        self.state.notice = None;

        let url = self.state.url.trim();
        if url.is_empty() {
            self.state.notice = Some(Notice::error(EMPTY_URL_MESSAGE));
            return;
        }

        let request = ImportRequest {
            source: self.state.import_source,
            url: url.to_string(),
        };
        self.state.import = RequestState::Pending;

        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = backend.submit_import(&request).await;
            sender
                .send(BackendEvent::Imported { result })
                .unwrap_or_default();
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Applies every event that has arrived since the last frame.
    pub fn update_state(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Listed {
                generation,
                filter,
                result,
            } => {
                if generation != self.listing_generation {
                    log::debug!("Dropping stale listing for {:?}", filter);
                    return;
                }
                match result {
                    Ok(images) => {
                        self.state.images = images;
                        self.state.listing = RequestState::Succeeded;
                    }
                    Err(e) => {
                        log::warn!("Failed to load images for {:?}: {}", filter, e);
                        let cause = e.to_string();
                        self.state.listing = RequestState::Failed(cause.clone());
                        self.state.notice = Some(Notice::failure(LIST_FAILED_MESSAGE, cause));
                    }
                }
            }
            BackendEvent::Imported { result } => match result {
                Ok(()) => {
                    self.state.import = RequestState::Succeeded;
                    self.state.notice = Some(Notice::Success(IMPORT_STARTED_MESSAGE.to_string()));
                    self.state.url.clear();
                    self.refresh_images();
                }
                Err(e) => {
                    log::warn!("Import failed: {}", e);
                    let cause = e.to_string();
                    self.state.import = RequestState::Failed(cause.clone());
                    self.state.notice = Some(Notice::failure(IMPORT_FAILED_MESSAGE, cause));
                }
            },
        }
    }
}

impl App for ImageImporter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.render(ctx);
    }
}
