//! On-screen beacon markers
//!
//! [`MarkerBoard`] mirrors the tracker's marker events as drawable views. It
//! never decides lifetimes itself: markers appear and disappear only when a
//! [`MarkerEvent`] says so.

use crate::domain::layout::MarkerLayout;
use crate::domain::models::MarkerEvent;
use crate::presentation::theme::BeaconPalette;
use eframe::egui::{self, Pos2, Stroke};
use std::collections::HashMap;

/// Seconds a marker takes to glide to a new target
const MOVE_ANIMATION_SECS: f32 = 0.4;
const LABEL_FONT_SIZE: f32 = 18.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub label: String,
    pub target: f64,
}

#[derive(Debug, Default)]
pub struct MarkerBoard {
    views: HashMap<String, MarkerView>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &MarkerEvent) {
        match event {
            MarkerEvent::Added {
                identifier,
                label,
                position,
            } => {
                self.views.insert(
                    identifier.clone(),
                    MarkerView {
                        label: label.clone(),
                        target: *position,
                    },
                );
            }
            MarkerEvent::Moved {
                identifier,
                position,
            } => {
                if let Some(view) = self.views.get_mut(identifier) {
                    view.target = *position;
                } else {
                    tracing::warn!("Move for unknown marker {}", identifier);
                }
            }
            MarkerEvent::Removed { identifier } => {
                self.views.remove(identifier);
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&MarkerView> {
        self.views.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Draw every marker into `rect`, animating vertical moves.
    pub fn paint(&self, ui: &egui::Ui, rect: egui::Rect, palette: &BeaconPalette) {
        let layout = MarkerLayout::new(rect.width(), rect.height());
        let radius = layout.radius();
        let painter = ui.painter_at(rect);

        // Stable draw order so overlapping markers don't flicker
        let mut views: Vec<_> = self.views.iter().collect();
        views.sort_by(|a, b| a.0.cmp(b.0));

        for (identifier, view) in views {
            let target = layout.center(view.target).1;
            let y = ui.ctx().animate_value_with_time(
                egui::Id::new(("beacon_marker", identifier)),
                target,
                MOVE_ANIMATION_SECS,
            );
            let center = Pos2::new(rect.min.x + layout.center(view.target).0, rect.min.y + y);

            painter.circle_filled(center, radius, palette.marker_fill);
            painter.circle_stroke(center, radius, Stroke::new(2.0, palette.marker_outline));
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                &view.label,
                egui::FontId::proportional(LABEL_FONT_SIZE),
                palette.marker_label,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(identifier: &str, label: &str, position: f64) -> MarkerEvent {
        MarkerEvent::Added {
            identifier: identifier.to_string(),
            label: label.to_string(),
            position,
        }
    }

    #[test]
    fn test_add_move_remove() {
        let mut board = MarkerBoard::new();
        board.apply(&added("AA", "Sensor1", 0.2));
        board.apply(&MarkerEvent::Moved {
            identifier: "AA".to_string(),
            position: 0.7,
        });

        assert_eq!(
            board.get("AA"),
            Some(&MarkerView {
                label: "Sensor1".to_string(),
                target: 0.7,
            })
        );

        board.apply(&MarkerEvent::Removed {
            identifier: "AA".to_string(),
        });
        assert!(board.is_empty());
    }

    #[test]
    fn test_move_unknown_marker_is_ignored() {
        let mut board = MarkerBoard::new();
        board.apply(&MarkerEvent::Moved {
            identifier: "ghost".to_string(),
            position: 0.5,
        });
        assert!(board.is_empty());
    }
}
