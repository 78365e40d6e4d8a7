use std::cmp::Ordering;

use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use itertools::Itertools;

use crate::catalog::CatalogEntry;
use crate::picker::PickerController;
use crate::team::FileTeamStore;

use super::config::PoolSort;
use super::{PALETTE_GOLD, PALETTE_RED};

const TABLE_ROW_HEIGHT: f32 = 22.0;

/// UI events bubbled up from the roster view; the app applies them to the
/// controller after rendering so the view itself stays read-only.
pub(crate) enum RosterAction {
    OpenSlot(usize),
    RemoveSlot(usize),
    Pick { slot_index: usize, entry: CatalogEntry },
    CloseSheet,
}

pub(crate) fn show(
    ui: &mut Ui,
    controller: &PickerController<FileTeamStore>,
    season: &str,
    team_name: &str,
    pool_sort: &mut PoolSort,
) -> Option<RosterAction> {
    let mut action = None;

    show_header(ui, controller, season, team_name);
    ui.separator();

    if let Some(slot_action) = show_slots(ui, controller) {
        action = Some(slot_action);
    }

    if let Some(active_slot) = controller.active_slot() {
        ui.separator();
        if let Some(sheet_action) = show_selection_sheet(ui, controller, active_slot, pool_sort) {
            action = Some(sheet_action);
        }
    }

    action
}

fn show_header(
    ui: &mut Ui,
    controller: &PickerController<FileTeamStore>,
    season: &str,
    team_name: &str,
) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new(team_name).color(PALETTE_GOLD));
        ui.label(format!("Season {season}"));
    });

    let picked: Vec<&CatalogEntry> = controller.lineup().slots().iter().flatten().collect();
    let budget: f32 = picked.iter().map(|e| e.price()).sum();
    let points: f32 = picked.iter().map(|e| e.points()).sum();
    ui.label(format!(
        "{}/{} slots filled  ·  {:.1}M spent  ·  {:.0} points",
        picked.len(),
        controller.lineup().slot_count(),
        budget,
        points
    ));
    if controller.lineup().is_complete() {
        ui.label(RichText::new("Lineup complete").color(PALETTE_GOLD));
    }
}

fn show_slots(ui: &mut Ui, controller: &PickerController<FileTeamStore>) -> Option<RosterAction> {
    let mut action = None;
    for (slot_index, occupant) in controller.lineup().slots().iter().enumerate() {
        let role = controller
            .layout()
            .role_of(slot_index)
            .map(|r| r.to_string())
            .unwrap_or_default();
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} {}", role, slot_index + 1)).strong());
                match occupant {
                    Some(entry) => {
                        ui.label(entry.display_name());
                        ui.label(format!("({})", entry.country()));
                        ui.label(format!("{:.1}M", entry.price()));
                        ui.label(format!("{:.0} pts", entry.points()));
                        if ui.button("Remove").clicked() {
                            action = Some(RosterAction::RemoveSlot(slot_index));
                        }
                    }
                    None => {
                        ui.label(RichText::new("empty").weak());
                        let selected = controller.active_slot() == Some(slot_index);
                        let label = format!("Choose {}", role.to_lowercase());
                        if ui.selectable_label(selected, label).clicked() {
                            action = if selected {
                                Some(RosterAction::CloseSheet)
                            } else {
                                Some(RosterAction::OpenSlot(slot_index))
                            };
                        }
                    }
                }
            });
        });
    }
    action
}

fn sorted_pool<'e>(entries: Vec<&'e CatalogEntry>, pool_sort: PoolSort) -> Vec<&'e CatalogEntry> {
    match pool_sort {
        PoolSort::CatalogOrder => entries,
        PoolSort::PriceDescending => entries
            .into_iter()
            .sorted_by(|a, b| b.price().partial_cmp(&a.price()).unwrap_or(Ordering::Equal))
            .collect(),
        PoolSort::PointsDescending => entries
            .into_iter()
            .sorted_by(|a, b| {
                b.points()
                    .partial_cmp(&a.points())
                    .unwrap_or(Ordering::Equal)
            })
            .collect(),
    }
}

fn show_selection_sheet(
    ui: &mut Ui,
    controller: &PickerController<FileTeamStore>,
    slot_index: usize,
    pool_sort: &mut PoolSort,
) -> Option<RosterAction> {
    let mut action = None;
    let role = controller
        .layout()
        .role_of(slot_index)
        .map(|r| r.to_string())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        ui.heading(format!("Pick a {} for slot {}", role.to_lowercase(), slot_index + 1));
        if ui.button("Cancel").clicked() {
            action = Some(RosterAction::CloseSheet);
        }
        egui::ComboBox::from_label("Sort by")
            .selected_text(pool_sort.label())
            .show_ui(ui, |ui| {
                for option in [
                    PoolSort::PriceDescending,
                    PoolSort::PointsDescending,
                    PoolSort::CatalogOrder,
                ] {
                    ui.selectable_value(pool_sort, option, option.label());
                }
            });
    });

    let entries = sorted_pool(controller.pool_for_slot(slot_index), *pool_sort);
    if entries.is_empty() {
        ui.label(RichText::new("No eligible entries left in the pool").color(PALETTE_RED));
        return action;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(TABLE_ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Price");
            });
            header.col(|ui| {
                ui.strong("Points");
            });
            header.col(|_ui| {});
        })
        .body(|mut body| {
            for entry in entries {
                body.row(TABLE_ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(entry.display_name());
                    });
                    row.col(|ui| {
                        ui.label(entry.country());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}M", entry.price()));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", entry.points()));
                    });
                    row.col(|ui| {
                        if ui.button("Pick").clicked() {
                            action = Some(RosterAction::Pick {
                                slot_index,
                                entry: entry.clone(),
                            });
                        }
                    });
                });
            }
        });

    action
}
