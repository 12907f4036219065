//! Ranging Service Module
//!
//! Owns the ranging feed and forwards each cycle's sightings to the UI over
//! the application event channel.

use crate::domain::models::{
    AppEvent, MessageSeverity, RangingCommand, RangingStatus, StatusMessage,
};
use crate::domain::settings::{RangingSettings, IBEACON_LAYOUT};
use crate::infrastructure::ranging::recording::Recording;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub struct RangingService {
    settings: RangingSettings,
    event_sender: mpsc::UnboundedSender<AppEvent>,
    feed: Option<JoinHandle<()>>,
}

impl RangingService {
    pub fn new(settings: RangingSettings, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            settings,
            event_sender,
            feed: None,
        }
    }

    /// Start delivering sightings. Must be called from inside a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        self.stop();

        let path = self
            .settings
            .recording_path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No ranging source configured"))?;
        let recording = Recording::load(&path)?;

        if self.settings.beacon_layout != IBEACON_LAYOUT {
            warn!(
                "Non-iBeacon layout '{}' configured; identifiers may not be Bluetooth addresses",
                self.settings.beacon_layout
            );
        }
        info!(
            "Ranging from {} ({} cycles, every {} ms)",
            path.display(),
            recording.len(),
            self.settings.cycle_ms()
        );

        let cycle = Duration::from_millis(self.settings.cycle_ms().max(1));
        let repeat = self.settings.loop_recording;
        let sender = self.event_sender.clone();
        self.feed = Some(tokio::spawn(replay(recording, cycle, repeat, sender)));

        let _ = self
            .event_sender
            .send(AppEvent::RangingStatus(RangingStatus::Ranging));
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(feed) = self.feed.take() {
            info!("Stopping ranging");
            feed.abort();
            let _ = self
                .event_sender
                .send(AppEvent::RangingStatus(RangingStatus::Idle));
        }
    }

    pub fn is_ranging(&self) -> bool {
        self.feed.as_ref().is_some_and(|feed| !feed.is_finished())
    }
}

impl Drop for RangingService {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.abort();
        }
    }
}

async fn replay(
    recording: Recording,
    cycle: Duration,
    repeat: bool,
    sender: mpsc::UnboundedSender<AppEvent>,
) {
    let mut ticker = tokio::time::interval(cycle);
    loop {
        for batch in recording.cycles() {
            ticker.tick().await;
            if sender
                .send(AppEvent::BeaconsRanged(batch.beacons.clone()))
                .is_err()
            {
                return;
            }
        }
        if !repeat {
            break;
        }
    }

    info!("Recording finished");
    let _ = sender.send(AppEvent::RangingStatus(RangingStatus::Idle));
}

/// Run the ranging service on its own thread and return the command
/// channel that drives it. The thread exits when the sender is dropped.
pub fn spawn_ranging_thread(
    settings: RangingSettings,
    event_sender: mpsc::UnboundedSender<AppEvent>,
) -> mpsc::UnboundedSender<RangingCommand> {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime for ranging: {}", e);
                let _ = event_sender.send(AppEvent::RangingStatus(RangingStatus::Error));
                return;
            }
        };

        rt.block_on(async move {
            let status_tx = event_sender.clone();
            let mut service = RangingService::new(settings, event_sender);

            while let Some(command) = command_rx.recv().await {
                match command {
                    RangingCommand::Start => {
                        if let Err(e) = service.start() {
                            error!("Failed to start ranging: {}", e);
                            let _ = status_tx.send(AppEvent::LogMessage(StatusMessage::new(
                                format!("Ranging unavailable: {}", e),
                                MessageSeverity::Error,
                            )));
                            let _ = status_tx.send(AppEvent::RangingStatus(RangingStatus::Error));
                        }
                    }
                    RangingCommand::Stop => service.stop(),
                }
            }
            service.stop();
        });
    });

    command_tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BeaconSighting;
    use std::io::Write;

    fn recording_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn settings_for(path: &std::path::Path) -> RangingSettings {
        RangingSettings {
            scan_period_ms: 5,
            recording_path: Some(path.to_path_buf()),
            loop_recording: false,
            ..RangingSettings::default()
        }
    }

    async fn next_event(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_replays_cycles_in_order() {
        let file = recording_file(
            "{\"beacons\":[{\"identifier\":\"AA\",\"distance\":1.0,\"name\":\"Sensor01\"}]}\n\
             {\"beacons\":[{\"identifier\":\"BB\",\"distance\":4.0,\"name\":\"Sensor02\"}]}\n",
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut service = RangingService::new(settings_for(file.path()), tx);

        service.start().unwrap();

        assert!(matches!(
            next_event(&mut rx).await,
            AppEvent::RangingStatus(RangingStatus::Ranging)
        ));
        match next_event(&mut rx).await {
            AppEvent::BeaconsRanged(batch) => {
                assert_eq!(batch, vec![BeaconSighting::new("AA", 1.0, "Sensor01")])
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match next_event(&mut rx).await {
            AppEvent::BeaconsRanged(batch) => assert_eq!(batch[0].identifier, "BB"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            next_event(&mut rx).await,
            AppEvent::RangingStatus(RangingStatus::Idle)
        ));
    }

    #[tokio::test]
    async fn test_start_without_source_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut service = RangingService::new(RangingSettings::default(), tx);

        let err = service.start().unwrap_err();
        assert!(err.to_string().contains("No ranging source"));
        assert!(!service.is_ranging());
    }

    #[tokio::test]
    async fn test_stop_reports_idle() {
        let file = recording_file("{\"beacons\":[]}\n");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut settings = settings_for(file.path());
        settings.loop_recording = true;
        let mut service = RangingService::new(settings, tx);

        service.start().unwrap();
        assert!(service.is_ranging());
        service.stop();
        assert!(!service.is_ranging());

        assert!(matches!(
            next_event(&mut rx).await,
            AppEvent::RangingStatus(RangingStatus::Ranging)
        ));
        // Any replayed batches arrive before the stop notification
        loop {
            match next_event(&mut rx).await {
                AppEvent::BeaconsRanged(_) => continue,
                AppEvent::RangingStatus(status) => {
                    assert_eq!(status, RangingStatus::Idle);
                    break;
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn test_thread_reports_start_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let commands = spawn_ranging_thread(RangingSettings::default(), tx);
        commands.send(RangingCommand::Start).unwrap();

        let first = rx.blocking_recv().unwrap();
        match first {
            AppEvent::LogMessage(msg) => assert_eq!(msg.severity, MessageSeverity::Error),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            rx.blocking_recv().unwrap(),
            AppEvent::RangingStatus(RangingStatus::Error)
        ));
    }
}
