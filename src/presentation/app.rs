use crate::domain::models::{
    AppEvent, BeaconSighting, MarkerEvent, MessageSeverity, RangingCommand, RangingStatus,
    StatusMessage, Tab,
};
use crate::domain::settings::SettingsService;
use crate::domain::tracker::{BeaconTracker, SweepSchedule};
use crate::infrastructure::logging::LoggingGuard;
use crate::infrastructure::ranging::spawn_ranging_thread;
use crate::presentation::marker::MarkerBoard;
use eframe::egui;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Tracker, sweep timer and marker views, all owned by the UI thread so
/// sightings and sweeps never interleave.
pub struct TrackingState {
    pub(crate) tracker: BeaconTracker,
    pub(crate) schedule: SweepSchedule,
    pub(crate) board: MarkerBoard,
}

impl TrackingState {
    pub fn new(tracker: BeaconTracker, start: Instant) -> Self {
        let schedule = tracker.config().sweep_schedule(start);
        Self {
            tracker,
            schedule,
            board: MarkerBoard::new(),
        }
    }

    pub fn apply_batch(&mut self, batch: &[BeaconSighting], now: Instant) {
        for sighting in batch {
            let event = self.tracker.on_sighting(sighting, now);
            if let MarkerEvent::Added { label, .. } = &event {
                info!("Beacon {} appeared as '{}'", event.identifier(), label);
            }
            self.board.apply(&event);
        }
    }

    /// Run the sweep if it is due. Returns how many markers were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.schedule.poll(now) {
            return 0;
        }
        let removed = self.tracker.sweep(now);
        for identifier in &removed {
            info!("Beacon {} lost", identifier);
            self.board.apply(&MarkerEvent::Removed {
                identifier: identifier.clone(),
            });
        }
        removed.len()
    }

    pub fn next_sweep_in(&self, now: Instant) -> Duration {
        self.schedule.time_until(now)
    }

    pub fn reset(&mut self) {
        self.tracker.clear();
        self.board.clear();
    }
}

pub struct BeaconLocatorApp {
    pub(crate) settings: SettingsService,
    pub(crate) tracking: TrackingState,

    // Ranging
    pub(crate) ranging_tx: mpsc::UnboundedSender<RangingCommand>,
    pub(crate) event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    pub(crate) ranging_status: RangingStatus,
    pub(crate) status_message: Option<StatusMessage>,

    // UI State
    pub(crate) selected_tab: Tab,
    pub(crate) is_dark_mode: bool,

    pub(crate) _logging_guard: Option<LoggingGuard>,
}

impl BeaconLocatorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: SettingsService,
        logging_guard: Option<LoggingGuard>,
    ) -> Self {
        let is_dark_mode = settings.get().dark_mode;
        crate::presentation::theme::configure_theme(&cc.egui_ctx, is_dark_mode);

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let ranging_tx = spawn_ranging_thread(settings.get().ranging.clone(), event_tx);
        if settings.get().ranging.start_on_launch {
            let _ = ranging_tx.send(RangingCommand::Start);
        }

        let tracker = BeaconTracker::new(settings.get().tracker.clone());

        Self {
            settings,
            tracking: TrackingState::new(tracker, Instant::now()),
            ranging_tx,
            event_rx,
            ranging_status: RangingStatus::Idle,
            status_message: None,
            selected_tab: Tab::default(),
            is_dark_mode,
            _logging_guard: logging_guard,
        }
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>, severity: MessageSeverity) {
        self.status_message = Some(StatusMessage::new(message, severity));
    }

    pub(crate) fn save_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            error!("Failed to save settings: {}", e);
            self.set_status(format!("Failed to save settings: {}", e), MessageSeverity::Error);
        }
    }

    pub(crate) fn start_ranging(&mut self) {
        let _ = self.ranging_tx.send(RangingCommand::Start);
    }

    pub(crate) fn stop_ranging(&mut self) {
        let _ = self.ranging_tx.send(RangingCommand::Stop);
    }

    fn drain_events(&mut self, now: Instant) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::BeaconsRanged(batch) => {
                    tracing::debug!("Ranged: {} beacons", batch.len());
                    self.tracking.apply_batch(&batch, now);
                }
                AppEvent::RangingStatus(status) => {
                    self.ranging_status = status;
                    if status == RangingStatus::Ranging {
                        self.set_status("Ranging started", MessageSeverity::Success);
                    }
                }
                AppEvent::LogMessage(msg) => self.status_message = Some(msg),
            }
        }
    }
}

impl eframe::App for BeaconLocatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_events(now);
        self.tracking.tick(now);

        // Wake up for the next sweep or scan cycle even without input
        let cycle = Duration::from_millis(self.settings.get().ranging.cycle_ms().max(16));
        ctx.request_repaint_after(self.tracking.next_sweep_in(now).min(cycle));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.selectable_value(&mut self.selected_tab, Tab::Radar, "Radar");
                ui.selectable_value(&mut self.selected_tab, Tab::Beacons, "Beacons");
                ui.selectable_value(&mut self.selected_tab, Tab::Settings, "Settings");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let switch_icon = if self.is_dark_mode {
                        "☀ Light"
                    } else {
                        "🌙 Dark"
                    };
                    if ui.button(switch_icon).clicked() {
                        self.is_dark_mode = !self.is_dark_mode;
                        crate::presentation::theme::configure_theme(ctx, self.is_dark_mode);
                        self.settings.get_mut().dark_mode = self.is_dark_mode;
                        self.save_settings();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} beacon(s) in range", self.tracking.tracker.len()));
                if let Some(msg) = &self.status_message {
                    ui.separator();
                    ui.colored_label(
                        crate::presentation::components::Components::severity_color(msg.severity),
                        &msg.message,
                    );
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            use crate::presentation::tabs;
            match self.selected_tab {
                Tab::Radar => tabs::radar::render(self, ui),
                Tab::Beacons => tabs::beacons::render(self, ui),
                Tab::Settings => tabs::settings::render(self, ui),
            }
        });
    }
}
