use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, SystemTime};

use egui::{Color32, RichText, Visuals, style::Widgets};
use log::{error, warn};

use crate::catalog::{Catalog, CatalogSupplier};
use crate::errors::ParcFermeError;
use crate::lineup::RosterLayout;
use crate::picker::{PickerController, PickerNotice};
use crate::team::FileTeamStore;

pub(crate) mod config;
mod roster_view;

use config::AppConfig;
use roster_view::RosterAction;

const BANNER_DURATION_MS: u128 = 4000;
const REPAINT_INTERVAL_MS: u64 = 250;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_CARBON: Color32 = Color32::from_rgb(28, 28, 30);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(196, 30, 58);
pub(crate) const PALETTE_GOLD: Color32 = Color32::from_rgb(212, 175, 55);

/// Transient message shown at the top of the window, with timed expiry.
struct StatusBanner {
    message: String,
    is_error: bool,
    shown_at: SystemTime,
}

impl StatusBanner {
    fn new(message: String, is_error: bool) -> Self {
        Self {
            message,
            is_error,
            shown_at: SystemTime::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at
            .elapsed()
            .map(|elapsed| elapsed.as_millis() > BANNER_DURATION_MS)
            .unwrap_or(true)
    }
}

/// Catalog delivery is asynchronous; until it lands the picker cannot be
/// built. A failed fetch is terminal: the app shows the error and stops.
enum CatalogState {
    Loading(Receiver<Result<Catalog, ParcFermeError>>),
    Ready {
        season: String,
        controller: PickerController<FileTeamStore>,
    },
    Failed(String),
}

/// `TeamPickerApp` is the roster-building window: a card per slot, a
/// selection sheet for the active slot, and a status banner for
/// persistence outcomes.
pub struct TeamPickerApp {
    app_config: AppConfig,
    store: Arc<FileTeamStore>,
    layout: RosterLayout,
    catalog_state: CatalogState,
    status: Option<StatusBanner>,
    position_restored: bool,
}

impl TeamPickerApp {
    pub fn new(
        supplier: Box<dyn CatalogSupplier>,
        store: Arc<FileTeamStore>,
        layout: RosterLayout,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_GOLD,
            faint_bg_color: PALETTE_CARBON,
            extreme_bg_color: PALETTE_BLACK,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            window_fill: PALETTE_CARBON,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let app_config = AppConfig::from_local_file().unwrap_or_default();

        // fetch the catalog off the UI thread; the receiver is drained in
        // update() until a result lands
        let (catalog_tx, catalog_rx) = mpsc::channel();
        thread::spawn(move || {
            if catalog_tx.send(supplier.fetch_catalog()).is_err() {
                warn!("picker window closed before the catalog arrived");
            }
        });

        Self {
            app_config,
            store,
            layout,
            catalog_state: CatalogState::Loading(catalog_rx),
            status: None,
            position_restored: false,
        }
    }

    fn poll_catalog(&mut self) {
        let CatalogState::Loading(receiver) = &self.catalog_state else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(catalog)) => {
                let initial = self.store.team().hydrate(&catalog);
                let controller = PickerController::new(
                    catalog.entries().to_vec(),
                    initial,
                    self.layout.clone(),
                    Arc::clone(&self.store),
                );
                self.catalog_state = CatalogState::Ready {
                    season: catalog.season,
                    controller,
                };
            }
            Ok(Err(e)) => {
                error!("catalog fetch failed: {e}");
                self.catalog_state = CatalogState::Failed(e.to_string());
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.catalog_state =
                    CatalogState::Failed("catalog supplier went away".to_string());
            }
        }
    }

    fn absorb_notices(status: &mut Option<StatusBanner>, notices: Vec<PickerNotice>) {
        for notice in notices {
            match notice {
                PickerNotice::Saved { .. } => {
                    *status = Some(StatusBanner::new("Saved".to_string(), false));
                }
                PickerNotice::RolledBack { slot_index, error } => {
                    *status = Some(StatusBanner::new(
                        format!("Could not save slot {}: {} (reverted)", slot_index + 1, error),
                        true,
                    ));
                }
                PickerNotice::StaleFailure { slot_index, error } => {
                    *status = Some(StatusBanner::new(
                        format!(
                            "An earlier save of slot {} failed after it was re-picked: {}",
                            slot_index + 1,
                            error
                        ),
                        true,
                    ));
                }
            }
        }
    }

    fn apply_action(&mut self, action: RosterAction) {
        let CatalogState::Ready { controller, .. } = &mut self.catalog_state else {
            return;
        };
        let applied = match action {
            RosterAction::OpenSlot(slot_index) => controller.open_slot(slot_index),
            RosterAction::CloseSheet => {
                controller.close_picker();
                Ok(())
            }
            RosterAction::RemoveSlot(slot_index) => controller.handle_remove(slot_index),
            RosterAction::Pick { slot_index, entry } => controller.handle_add(slot_index, entry),
        };
        if let Err(e) = applied {
            self.status = Some(StatusBanner::new(e.to_string(), true));
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = &self.status {
            if banner.expired() {
                self.status = None;
            } else {
                let color = if banner.is_error {
                    PALETTE_RED
                } else {
                    PALETTE_GOLD
                };
                ui.label(RichText::new(&banner.message).color(color));
                ui.separator();
            }
        }
    }
}

impl eframe::App for TeamPickerApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("could not save config: {e}");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_catalog();

        if let CatalogState::Ready { controller, .. } = &mut self.catalog_state {
            Self::absorb_notices(&mut self.status, controller.poll_outcomes());
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                controller.close_picker();
            }
        }

        if !self.position_restored {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(
                self.app_config.window_position.clone().into(),
            ));
            self.position_restored = true;
        } else if let Some(outer_rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.app_config.window_position = outer_rect.min.into();
        }

        let mut pending_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_banner(ui);
            match &self.catalog_state {
                CatalogState::Loading(_) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Fetching the season catalog...");
                    });
                }
                CatalogState::Failed(message) => {
                    ui.heading(RichText::new("Catalog unavailable").color(PALETTE_RED));
                    ui.label(message);
                    ui.label("Restart the app to try again.");
                }
                CatalogState::Ready { season, controller } => {
                    pending_action = roster_view::show(
                        ui,
                        controller,
                        season,
                        &self.store.team().name,
                        &mut self.app_config.pool_sort,
                    );
                }
            }
        });
        if let Some(action) = pending_action {
            self.apply_action(action);
        }

        // persistence outcomes and the catalog arrive on channels, so keep
        // repainting even without input events
        ctx.request_repaint_after(Duration::from_millis(REPAINT_INTERVAL_MS));
    }
}
