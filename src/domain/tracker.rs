//! Beacon presence tracking
//!
//! Keeps one [`TrackedMarker`] per beacon identifier, moves it on every
//! sighting and drops it once the beacon has been silent for longer than the
//! expiry window. The tracker is passive: the owner decides when sightings
//! are applied and when [`BeaconTracker::sweep`] runs, usually through a
//! [`SweepSchedule`] polled from the same thread.

use crate::domain::models::{BeaconSighting, MarkerEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};
use tracing::debug;

/// Names up to this many characters are shown verbatim.
pub const MAX_LABEL_CHARS: usize = 8;
/// Number of trailing name characters kept for long names.
pub const LABEL_SUFFIX_CHARS: usize = 4;
pub const UNKNOWN_LABEL_PREFIX: &str = "Unk";

/// What to do with distances outside `[0, max_range]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistancePolicy {
    /// Map linearly, even past the edges of the view
    #[default]
    Extrapolate,
    /// Pin to the nearest edge
    Clamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_max_range")]
    pub max_range: f64,
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
    #[serde(default = "default_sweep_initial_delay_ms")]
    pub sweep_initial_delay_ms: u64,
    #[serde(default)]
    pub distance_policy: DistancePolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_range: default_max_range(),
            expiry_ms: default_expiry_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
            sweep_initial_delay_ms: default_sweep_initial_delay_ms(),
            distance_policy: DistancePolicy::default(),
        }
    }
}

impl TrackerConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }

    pub fn sweep_schedule(&self, start: Instant) -> SweepSchedule {
        SweepSchedule::new(
            start,
            Duration::from_millis(self.sweep_initial_delay_ms),
            Duration::from_millis(self.sweep_interval_ms),
        )
    }
}

// Largest distance ever observed in the field was ~12.6 m
fn default_max_range() -> f64 {
    13.0
}
fn default_expiry_ms() -> u64 {
    5000
}
fn default_sweep_interval_ms() -> u64 {
    2000
}
fn default_sweep_initial_delay_ms() -> u64 {
    2000
}

/// Display label for a beacon name: short names as-is, long ones as
/// `"Unk"` followed by their last four characters.
pub fn derive_label(name: &str) -> String {
    let len = name.chars().count();
    if len <= MAX_LABEL_CHARS {
        return name.to_string();
    }
    let suffix: String = name.chars().skip(len - LABEL_SUFFIX_CHARS).collect();
    format!("{}{}", UNKNOWN_LABEL_PREFIX, suffix)
}

/// Normalized vertical target for a distance: 1.0 at the beacon, 0.0 at
/// `max_range`.
pub fn position_for_distance(distance: f64, max_range: f64, policy: DistancePolicy) -> f64 {
    let distance = match policy {
        DistancePolicy::Extrapolate => distance,
        DistancePolicy::Clamp => distance.clamp(0.0, max_range),
    };
    (max_range - distance) / max_range
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMarker {
    pub identifier: String,
    pub label: String,
    pub last_seen: Instant,
    pub distance: f64,
    pub position: f64,
}

pub struct BeaconTracker {
    config: TrackerConfig,
    markers: HashMap<String, TrackedMarker>,
}

impl BeaconTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            markers: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Change how out-of-range distances are mapped. Existing markers keep
    /// their position until their next sighting.
    pub fn set_distance_policy(&mut self, policy: DistancePolicy) {
        self.config.distance_policy = policy;
    }

    /// Apply one sighting. Creates the marker on first contact, otherwise
    /// moves it and refreshes its timestamp.
    pub fn on_sighting(&mut self, sighting: &BeaconSighting, now: Instant) -> MarkerEvent {
        let position = position_for_distance(
            sighting.distance,
            self.config.max_range,
            self.config.distance_policy,
        );

        if let Some(marker) = self.markers.get_mut(&sighting.identifier) {
            marker.position = position;
            marker.distance = sighting.distance;
            marker.last_seen = now;
            return MarkerEvent::Moved {
                identifier: sighting.identifier.clone(),
                position,
            };
        }

        let label = derive_label(&sighting.name);
        debug!(
            "Tracking beacon {} as '{}' at {:.2} m",
            sighting.identifier, label, sighting.distance
        );
        self.markers.insert(
            sighting.identifier.clone(),
            TrackedMarker {
                identifier: sighting.identifier.clone(),
                label: label.clone(),
                last_seen: now,
                distance: sighting.distance,
                position,
            },
        );

        MarkerEvent::Added {
            identifier: sighting.identifier.clone(),
            label,
            position,
        }
    }

    /// Drop every marker last seen more than the expiry window before `now`
    /// and return their identifiers.
    pub fn sweep(&mut self, now: Instant) -> BTreeSet<String> {
        let expiry = self.config.expiry();
        let mut removed = BTreeSet::new();

        self.markers.retain(|identifier, marker| {
            let alive = now.saturating_duration_since(marker.last_seen) <= expiry;
            if !alive {
                removed.insert(identifier.clone());
            }
            alive
        });

        if !removed.is_empty() {
            debug!("Swept {} stale beacon(s): {:?}", removed.len(), removed);
        }
        removed
    }

    /// Forget every marker, returning what was tracked.
    pub fn clear(&mut self) -> BTreeSet<String> {
        self.markers.drain().map(|(identifier, _)| identifier).collect()
    }

    pub fn get(&self, identifier: &str) -> Option<&TrackedMarker> {
        self.markers.get(identifier)
    }

    pub fn markers(&self) -> impl Iterator<Item = &TrackedMarker> {
        self.markers.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for BeaconTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

/// Fixed-rate timer driven by the caller's clock.
#[derive(Debug, Clone)]
pub struct SweepSchedule {
    next_due: Instant,
    period: Duration,
}

impl SweepSchedule {
    pub fn new(start: Instant, initial_delay: Duration, period: Duration) -> Self {
        Self {
            next_due: start + initial_delay,
            // A zero period would never advance the deadline
            period: period.max(Duration::from_millis(1)),
        }
    }

    /// Returns true when a sweep is due. Ticks missed while the caller was
    /// not polling collapse into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }

    pub fn time_until(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
