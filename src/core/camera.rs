//! # Camera Preview
//!
//! The Expert Corner's "join live" dialog can show a preview from a capture
//! device. The device is held only while the preview is visible:
//!
//! ```text
//!   Off ──toggle──► Requesting{ticket} ──resolve Ok──► Live(PreviewGuard)
//!    ▲                   │                              │
//!    │                   └──resolve Err──► Blank        │
//!    └──────── toggle / close (drops guard) ◄───────────┘
//! ```
//!
//! Release is tied to `PreviewGuard`'s `Drop`, so every exit path stops the
//! tracks: toggling off, closing the dialog, tearing the app down, or a
//! stream that arrives after its request was abandoned.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user (or platform policy) refused access.
    PermissionDenied,
    /// No capture hardware present.
    NotFound,
    /// Another client holds the device.
    Busy,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "camera permission denied"),
            CameraError::NotFound => write!(f, "no camera found"),
            CameraError::Busy => write!(f, "camera is in use by another application"),
        }
    }
}

impl std::error::Error for CameraError {}

pub trait MediaTrack: Send {
    fn label(&self) -> &str;
    /// Releases the underlying device. Must tolerate repeat calls.
    fn stop(&mut self);
}

pub struct MediaStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }
}

#[async_trait]
pub trait CaptureDevice: Send + Sync {
    fn name(&self) -> &str;

    /// Requests access and opens a video stream.
    async fn open(&self) -> Result<MediaStream, CameraError>;
}

/// Owns an open stream; stops every track when dropped.
pub struct PreviewGuard {
    stream: MediaStream,
}

impl PreviewGuard {
    pub fn new(stream: MediaStream) -> Self {
        info!("Camera acquired ({} tracks)", stream.tracks.len());
        Self { stream }
    }

    pub fn track_labels(&self) -> Vec<&str> {
        self.stream.tracks.iter().map(|t| t.label()).collect()
    }
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        for track in &mut self.stream.tracks {
            track.stop();
        }
        info!("Camera released ({} tracks stopped)", self.stream.tracks.len());
    }
}

impl fmt::Debug for PreviewGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewGuard")
            .field("tracks", &self.track_labels())
            .finish()
    }
}

/// Opens `device` and wraps the stream so it cannot leak past this point.
pub async fn acquire(device: &dyn CaptureDevice) -> Result<PreviewGuard, CameraError> {
    debug!("Requesting camera from {}", device.name());
    device.open().await.map(PreviewGuard::new)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraTicket(Uuid);

impl fmt::Display for CameraTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub enum PreviewState {
    #[default]
    Off,
    Requesting {
        ticket: CameraTicket,
    },
    Live(PreviewGuard),
    /// Preview toggled on but the device could not be opened.
    Blank,
}

#[derive(Debug)]
pub struct CameraPreview {
    enabled: bool,
    state: PreviewState,
}

impl Default for CameraPreview {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CameraPreview {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: PreviewState::Off,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the preview is toggled on (requesting, live or blank).
    pub fn is_shown(&self) -> bool {
        !matches!(self.state, PreviewState::Off)
    }

    /// Off → Requesting (returns the ticket to request with); anything else → Off.
    pub fn toggle(&mut self) -> Option<CameraTicket> {
        if !self.enabled {
            debug!("Camera preview disabled, ignoring toggle");
            return None;
        }
        match self.state {
            PreviewState::Off => {
                let ticket = CameraTicket(Uuid::new_v4());
                self.state = PreviewState::Requesting { ticket };
                Some(ticket)
            }
            _ => {
                self.close();
                None
            }
        }
    }

    /// Applies a device result. Results for any ticket other than the one
    /// being waited on are dropped, which releases their stream.
    pub fn resolve(&mut self, ticket: CameraTicket, result: Result<PreviewGuard, CameraError>) {
        match self.state {
            PreviewState::Requesting { ticket: current } if current == ticket => {}
            _ => {
                debug!("Discarding stale camera result for ticket {}", ticket);
                return;
            }
        }
        self.state = match result {
            Ok(guard) => PreviewState::Live(guard),
            Err(e) => {
                warn!("Error accessing camera: {}", e);
                PreviewState::Blank
            }
        };
    }

    /// Hides the preview and releases the device if held.
    pub fn close(&mut self) {
        if self.is_shown() {
            debug!("Closing camera preview");
        }
        self.state = PreviewState::Off;
    }
}

/// A capture device that needs no hardware. Tracks it hands out decrement
/// a shared live counter when stopped.
pub struct SimulatedCamera {
    available: bool,
    latency: Duration,
    live_tracks: Arc<AtomicUsize>,
}

impl SimulatedCamera {
    pub fn new(available: bool, latency: Duration) -> Self {
        Self {
            available,
            latency,
            live_tracks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of tracks opened and not yet stopped.
    pub fn live_tracks(&self) -> usize {
        self.live_tracks.load(Ordering::SeqCst)
    }
}

struct SimulatedTrack {
    live: Arc<AtomicUsize>,
    stopped: bool,
}

impl MediaTrack for SimulatedTrack {
    fn label(&self) -> &str {
        "ShipTalk Virtual Camera"
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl CaptureDevice for SimulatedCamera {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn open(&self) -> Result<MediaStream, CameraError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if !self.available {
            return Err(CameraError::NotFound);
        }
        self.live_tracks.fetch_add(1, Ordering::SeqCst);
        Ok(MediaStream::new(vec![Box::new(SimulatedTrack {
            live: self.live_tracks.clone(),
            stopped: false,
        })]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> SimulatedCamera {
        SimulatedCamera::new(true, Duration::ZERO)
    }

    #[test]
    fn test_guard_drop_stops_tracks() {
        let device = camera();
        let guard = tokio_test::block_on(acquire(&device)).unwrap();
        assert_eq!(device.live_tracks(), 1);
        assert_eq!(guard.track_labels(), vec!["ShipTalk Virtual Camera"]);
        drop(guard);
        assert_eq!(device.live_tracks(), 0);
    }

    #[test]
    fn test_toggle_on_resolve_then_toggle_off_releases() {
        let device = camera();
        let mut preview = CameraPreview::new(true);

        let ticket = preview.toggle().unwrap();
        assert!(matches!(preview.state(), PreviewState::Requesting { .. }));

        preview.resolve(ticket, tokio_test::block_on(acquire(&device)));
        assert!(matches!(preview.state(), PreviewState::Live(_)));
        assert_eq!(device.live_tracks(), 1);

        assert_eq!(preview.toggle(), None);
        assert!(matches!(preview.state(), PreviewState::Off));
        assert_eq!(device.live_tracks(), 0);
    }

    #[test]
    fn test_close_releases_live_stream() {
        let device = camera();
        let mut preview = CameraPreview::new(true);
        let ticket = preview.toggle().unwrap();
        preview.resolve(ticket, tokio_test::block_on(acquire(&device)));
        preview.close();
        assert_eq!(device.live_tracks(), 0);
        assert!(!preview.is_shown());
    }

    #[test]
    fn test_teardown_releases_live_stream() {
        let device = camera();
        let mut preview = CameraPreview::new(true);
        let ticket = preview.toggle().unwrap();
        preview.resolve(ticket, tokio_test::block_on(acquire(&device)));
        drop(preview);
        assert_eq!(device.live_tracks(), 0);
    }

    #[test]
    fn test_stale_stream_is_released() {
        let device = camera();
        let mut preview = CameraPreview::new(true);
        let ticket = preview.toggle().unwrap();
        // Dialog closed before the device answered
        preview.close();

        preview.resolve(ticket, tokio_test::block_on(acquire(&device)));
        assert!(matches!(preview.state(), PreviewState::Off));
        assert_eq!(device.live_tracks(), 0);
    }

    #[test]
    fn test_superseded_ticket_is_released() {
        let device = camera();
        let mut preview = CameraPreview::new(true);
        let old = preview.toggle().unwrap();
        preview.toggle();
        let current = preview.toggle().unwrap();

        preview.resolve(old, tokio_test::block_on(acquire(&device)));
        assert!(matches!(preview.state(), PreviewState::Requesting { .. }));
        assert_eq!(device.live_tracks(), 0);

        preview.resolve(current, tokio_test::block_on(acquire(&device)));
        assert!(matches!(preview.state(), PreviewState::Live(_)));
        assert_eq!(device.live_tracks(), 1);
    }

    #[test]
    fn test_device_failure_leaves_blank_preview() {
        let device = SimulatedCamera::new(false, Duration::ZERO);
        let mut preview = CameraPreview::new(true);
        let ticket = preview.toggle().unwrap();
        let result = tokio_test::block_on(acquire(&device));
        assert_eq!(result.as_ref().err(), Some(&CameraError::NotFound));

        preview.resolve(ticket, result);
        assert!(matches!(preview.state(), PreviewState::Blank));
        assert!(preview.is_shown());

        // Toggling off from the failed state returns to Off
        preview.toggle();
        assert!(matches!(preview.state(), PreviewState::Off));
    }

    #[test]
    fn test_disabled_camera_never_requests() {
        let mut preview = CameraPreview::new(false);
        assert_eq!(preview.toggle(), None);
        assert!(!preview.is_shown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let device = SimulatedCamera::new(true, Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        let guard = acquire(&device).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
        drop(guard);
        assert_eq!(device.live_tracks(), 0);
    }
}
