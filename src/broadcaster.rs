//! Advertisement lifecycle controller.
//!
//! Orchestrates validation, payload encoding, and the timed broadcast:
//! a `broadcast` call starts an advertisement and schedules its teardown
//! after the configured duration. Each session captures the advertiser
//! handle it started with and is stopped through that same handle. A new
//! broadcast supersedes a session whose timer is still pending, so at
//! most one advertisement is live per controller.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::ble::radio::{Advertiser, RadioInterface};
use crate::ble::settings::AdvertiseSettings;
use crate::error::Error;
use crate::protocol::payload::{advertising_block, scan_response_block, AdvertisementPayload};
use crate::protocol::validate::{validate_barcode, validate_scanner_id};
use crate::protocol::BarcodeType;

/// Default advertising duration in milliseconds.
pub const DEFAULT_ADVERTISING_DURATION_MS: u32 = 4500;

/// Event emitted on the session event channel.
///
/// `broadcast` itself only reports "accepted for dispatch"; these events
/// carry the asynchronous start/stop outcomes for callers that want them.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Id of the session the event belongs to.
    pub session_id: u64,
    /// What happened.
    pub kind: SessionEventKind,
}

/// Kind of session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventKind {
    /// The radio accepted the start request; the advertisement is live.
    Started,
    /// The radio rejected or failed the start request. The session's
    /// stop timer still runs; no retry is attempted.
    StartFailed {
        /// Description of the failure.
        reason: String,
    },
    /// The configured duration elapsed and the stop request was issued.
    Stopped,
    /// A newer broadcast superseded this session before its timer fired.
    Superseded,
}

/// State of the one session this controller may have live.
struct ActiveSession {
    /// Session id, for event correlation.
    id: u64,
    /// The advertiser handle captured at start; stop goes through this.
    advertiser: Arc<dyn Advertiser>,
    /// The pending stop timer.
    stop_timer: JoinHandle<()>,
}

/// Broadcasts scanned barcodes over BLE advertising.
pub struct BarcodeBroadcaster {
    /// The injected radio.
    radio: Arc<dyn RadioInterface>,
    /// Settings applied to every session.
    settings: AdvertiseSettings,
    /// Advertising duration in milliseconds; read once per broadcast.
    duration_ms: AtomicU32,
    /// Session id counter.
    session_counter: AtomicU64,
    /// The session whose stop timer is still pending, if any.
    active: Arc<Mutex<Option<ActiveSession>>>,
    /// Channel for session events.
    event_tx: broadcast::Sender<SessionEvent>,
}

impl BarcodeBroadcaster {
    /// Create a new broadcaster using the default advertise settings
    /// (low-latency, high-power, non-connectable).
    pub fn new(radio: Arc<dyn RadioInterface>) -> Self {
        Self::with_settings(radio, AdvertiseSettings::default())
    }

    /// Create a new broadcaster with specific advertise settings.
    pub fn with_settings(radio: Arc<dyn RadioInterface>, settings: AdvertiseSettings) -> Self {
        let (event_tx, _) = broadcast::channel(32);

        Self {
            radio,
            settings,
            duration_ms: AtomicU32::new(DEFAULT_ADVERTISING_DURATION_MS),
            session_counter: AtomicU64::new(0),
            active: Arc::new(Mutex::new(None)),
            event_tx,
        }
    }

    /// Get the advertising duration in milliseconds.
    pub fn advertising_duration(&self) -> u32 {
        self.duration_ms.load(Ordering::SeqCst)
    }

    /// Set the advertising duration in milliseconds.
    ///
    /// Applies to subsequent broadcasts; a session already dispatched
    /// keeps the duration it was started with.
    pub fn set_advertising_duration(&self, millis: u32) {
        self.duration_ms.store(millis, Ordering::SeqCst);
    }

    /// Subscribe to session events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Get the id of the session whose stop timer is still pending.
    pub fn active_session_id(&self) -> Option<u64> {
        self.active.lock().as_ref().map(|session| session.id)
    }

    /// Check if a session is currently live.
    pub fn is_advertising(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Broadcast a scanned barcode.
    ///
    /// Validates the request, encodes the payload, starts the
    /// advertisement, and schedules its stop after the configured
    /// duration. Returns immediately: `true` means the request was
    /// accepted for dispatch, not that it is confirmed on the air;
    /// subscribe to session events for the asynchronous outcome. `false`
    /// means validation failed and the radio was never asked to start.
    ///
    /// On a disabled radio this fires the radio's enable-request flow and
    /// returns `false`; retry once the radio is enabled.
    pub async fn broadcast(
        &self,
        barcode: &str,
        barcode_type: BarcodeType,
        scanner_id: u32,
    ) -> bool {
        debug!("Broadcast requested: {}, {}", barcode, barcode_type);

        if !self.radio.is_available().await {
            error!("Bluetooth not supported. Can't send barcode");
            return false;
        }

        if let Err(e) = validate_barcode(barcode.as_bytes()) {
            error!("{}", e);
            return false;
        }

        let scanner_id = match validate_scanner_id(scanner_id) {
            Ok(id) => id,
            Err(e) => {
                error!("{}", e);
                return false;
            }
        };

        if !self.radio.is_enabled().await {
            warn!("{}", Error::RadioDisabled);
            self.radio.request_enable().await;
            return false;
        }

        let payload =
            AdvertisementPayload::new(scanner_id, barcode_type, barcode.as_bytes().to_vec());
        let advertising_data = advertising_block();
        let scan_response = scan_response_block(&payload);

        let session_id = self.session_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let duration = Duration::from_millis(u64::from(self.advertising_duration()));

        self.supersede_pending().await;

        let advertiser = match self.radio.advertiser().await {
            Some(advertiser) => advertiser,
            None => {
                // Accepted-for-dispatch semantics: the request was valid,
                // the radio just had no advertiser to give us.
                error!("No advertiser available, session {} not started", session_id);
                let _ = self.event_tx.send(SessionEvent {
                    session_id,
                    kind: SessionEventKind::StartFailed {
                        reason: "advertiser unavailable".to_string(),
                    },
                });
                return true;
            }
        };

        // Dispatch the start request
        let start_advertiser = advertiser.clone();
        let start_events = self.event_tx.clone();
        let settings = self.settings;
        tokio::spawn(async move {
            match start_advertiser
                .start(&settings, &advertising_data, &scan_response)
                .await
            {
                Ok(()) => {
                    info!("Advertising started, session {}", session_id);
                    let _ = start_events.send(SessionEvent {
                        session_id,
                        kind: SessionEventKind::Started,
                    });
                }
                Err(e) => {
                    error!("Advertising start failed, session {}: {}", session_id, e);
                    let _ = start_events.send(SessionEvent {
                        session_id,
                        kind: SessionEventKind::StartFailed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        });

        // Schedule the stop on this session's own handle. The session is
        // stored under the same lock acquisition so the timer can never
        // observe it missing.
        let timer_advertiser = advertiser.clone();
        let timer_events = self.event_tx.clone();
        let timer_active = Arc::clone(&self.active);
        {
            let mut active = self.active.lock();

            let stop_timer = tokio::spawn(async move {
                tokio::time::sleep(duration).await;

                debug!("Advertising duration elapsed, session {}", session_id);
                if let Err(e) = timer_advertiser.stop().await {
                    warn!("Advertising stop failed, session {}: {}", session_id, e);
                }

                {
                    let mut active = timer_active.lock();
                    if active.as_ref().map(|session| session.id) == Some(session_id) {
                        *active = None;
                    }
                }

                let _ = timer_events.send(SessionEvent {
                    session_id,
                    kind: SessionEventKind::Stopped,
                });
            });

            *active = Some(ActiveSession {
                id: session_id,
                advertiser,
                stop_timer,
            });
        }

        true
    }

    /// Stop and discard a session whose timer is still pending.
    async fn supersede_pending(&self) {
        let prior = self.active.lock().take();

        if let Some(session) = prior {
            debug!("Superseding pending advertising session {}", session.id);
            session.stop_timer.abort();

            if let Err(e) = session.advertiser.stop().await {
                warn!("Advertising stop failed, session {}: {}", session.id, e);
            }

            let _ = self.event_tx.send(SessionEvent {
                session_id: session.id,
                kind: SessionEventKind::Superseded,
            });
        }
    }
}

impl Drop for BarcodeBroadcaster {
    fn drop(&mut self) {
        if let Some(session) = self.active.lock().take() {
            session.stop_timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::radio::MockRadioInterface;
    use crate::ble::settings::AdvertisingBlock;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    /// Test advertiser that counts start/stop calls.
    #[derive(Default)]
    struct RecordingAdvertiser {
        starts: AtomicUsize,
        stops: AtomicUsize,
        fail_start: bool,
    }

    impl RecordingAdvertiser {
        fn failing() -> Self {
            Self {
                fail_start: true,
                ..Self::default()
            }
        }

        fn starts(&self) -> usize {
            self.starts.load(Ordering::SeqCst)
        }

        fn stops(&self) -> usize {
            self.stops.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Advertiser for RecordingAdvertiser {
        async fn start(
            &self,
            _settings: &AdvertiseSettings,
            _advertising_data: &AdvertisingBlock,
            _scan_response: &AdvertisingBlock,
        ) -> Result<()> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail_start {
                return Err(Error::StartFailed {
                    reason: "radio busy".to_string(),
                });
            }
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Radio that always hands out the given advertiser.
    fn ready_radio(advertiser: Arc<RecordingAdvertiser>) -> MockRadioInterface {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);
        radio.expect_is_enabled().returning(|| true);
        radio
            .expect_advertiser()
            .returning(move || Some(advertiser.clone() as Arc<dyn Advertiser>));
        radio
    }

    #[tokio::test]
    async fn test_rejects_long_barcode_without_touching_advertiser() {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);
        // No is_enabled/advertiser expectations: any call would panic

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));
        let barcode = "x".repeat(256);

        assert!(!broadcaster.broadcast(&barcode, BarcodeType::Code128, 1).await);
        assert!(!broadcaster.is_advertising());
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_scanner_id() {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));

        assert!(!broadcaster.broadcast("A1", BarcodeType::Code39, 65_536).await);
        assert!(!broadcaster.broadcast("A1", BarcodeType::Code39, u32::MAX).await);
        assert!(!broadcaster.is_advertising());
    }

    #[tokio::test]
    async fn test_rejects_when_radio_unavailable() {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| false);

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));

        assert!(!broadcaster.broadcast("A1", BarcodeType::Code39, 1).await);
    }

    #[tokio::test]
    async fn test_disabled_radio_requests_enable_exactly_once() {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);
        radio.expect_is_enabled().returning(|| false);
        radio.expect_request_enable().times(1).returning(|| ());

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));

        assert!(!broadcaster.broadcast("A1", BarcodeType::Code39, 1).await);
        assert!(!broadcaster.is_advertising());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_then_stop_after_configured_duration() {
        init_tracing();

        let advertiser = Arc::new(RecordingAdvertiser::default());
        let broadcaster = BarcodeBroadcaster::new(Arc::new(ready_radio(advertiser.clone())));
        let mut events = broadcaster.subscribe_events();

        assert!(broadcaster.broadcast("A1", BarcodeType::Discrete2Of5, 256).await);
        let dispatched_at = tokio::time::Instant::now();

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Started);
        assert_eq!(advertiser.starts(), 1);
        assert_eq!(advertiser.stops(), 0);
        assert_eq!(broadcaster.active_session_id(), Some(event.session_id));

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Stopped);
        assert_eq!(
            dispatched_at.elapsed(),
            Duration::from_millis(u64::from(DEFAULT_ADVERTISING_DURATION_MS))
        );
        assert_eq!(advertiser.stops(), 1);
        assert!(!broadcaster.is_advertising());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_change_spares_dispatched_session() {
        let advertiser = Arc::new(RecordingAdvertiser::default());
        let broadcaster = BarcodeBroadcaster::new(Arc::new(ready_radio(advertiser.clone())));
        let mut events = broadcaster.subscribe_events();

        assert!(broadcaster.broadcast("A1", BarcodeType::Code39, 1).await);
        let first_dispatched_at = tokio::time::Instant::now();

        // Changing the duration now must not touch the in-flight session
        broadcaster.set_advertising_duration(60_000);

        assert_eq!(events.recv().await.unwrap().kind, SessionEventKind::Started);
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Stopped);
        assert_eq!(
            first_dispatched_at.elapsed(),
            Duration::from_millis(u64::from(DEFAULT_ADVERTISING_DURATION_MS))
        );

        // The next session picks up the new value
        assert!(broadcaster.broadcast("B2", BarcodeType::Code39, 1).await);
        let second_dispatched_at = tokio::time::Instant::now();

        assert_eq!(events.recv().await.unwrap().kind, SessionEventKind::Started);
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Stopped);
        assert_eq!(
            second_dispatched_at.elapsed(),
            Duration::from_millis(60_000)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_broadcast_supersedes_pending_session() {
        let first = Arc::new(RecordingAdvertiser::default());
        let second = Arc::new(RecordingAdvertiser::default());

        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);
        radio.expect_is_enabled().returning(|| true);
        let handles = Mutex::new(VecDeque::from([
            first.clone() as Arc<dyn Advertiser>,
            second.clone() as Arc<dyn Advertiser>,
        ]));
        radio
            .expect_advertiser()
            .returning(move || handles.lock().pop_front());

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));
        let mut events = broadcaster.subscribe_events();

        assert!(broadcaster.broadcast("FIRST", BarcodeType::Code128, 1).await);
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Started);
        let first_id = event.session_id;

        assert!(broadcaster.broadcast("SECOND", BarcodeType::Code128, 1).await);
        let second_dispatched_at = tokio::time::Instant::now();

        // The pending session is stopped through its own handle
        let event = events.recv().await.unwrap();
        assert_eq!(event.session_id, first_id);
        assert_eq!(event.kind, SessionEventKind::Superseded);
        assert_eq!(first.stops(), 1);
        assert_eq!(second.stops(), 0);

        assert_eq!(events.recv().await.unwrap().kind, SessionEventKind::Started);
        assert_eq!(second.starts(), 1);

        // The superseded timer never fires; only the new session stops
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Stopped);
        assert_ne!(event.session_id, first_id);
        assert_eq!(
            second_dispatched_at.elapsed(),
            Duration::from_millis(u64::from(DEFAULT_ADVERTISING_DURATION_MS))
        );
        assert_eq!(first.stops(), 1);
        assert_eq!(second.stops(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_failure_still_counts_as_dispatched() {
        let advertiser = Arc::new(RecordingAdvertiser::failing());
        let broadcaster = BarcodeBroadcaster::new(Arc::new(ready_radio(advertiser.clone())));
        let mut events = broadcaster.subscribe_events();

        assert!(broadcaster.broadcast("A1", BarcodeType::Code39, 1).await);

        let event = events.recv().await.unwrap();
        match event.kind {
            SessionEventKind::StartFailed { reason } => {
                assert!(reason.contains("radio busy"));
            }
            other => panic!("expected StartFailed, got {:?}", other),
        }

        // The stop timer still fires for the failed session
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::Stopped);
        assert_eq!(advertiser.stops(), 1);
    }

    #[tokio::test]
    async fn test_missing_advertiser_still_counts_as_dispatched() {
        let mut radio = MockRadioInterface::new();
        radio.expect_is_available().returning(|| true);
        radio.expect_is_enabled().returning(|| true);
        radio.expect_advertiser().returning(|| None);

        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));
        let mut events = broadcaster.subscribe_events();

        assert!(broadcaster.broadcast("A1", BarcodeType::Code39, 1).await);

        let event = events.recv().await.unwrap();
        assert!(matches!(event.kind, SessionEventKind::StartFailed { .. }));
        assert!(!broadcaster.is_advertising());
    }

    #[tokio::test]
    async fn test_duration_accessors() {
        let radio = MockRadioInterface::new();
        let broadcaster = BarcodeBroadcaster::new(Arc::new(radio));

        assert_eq!(
            broadcaster.advertising_duration(),
            DEFAULT_ADVERTISING_DURATION_MS
        );
        broadcaster.set_advertising_duration(1000);
        assert_eq!(broadcaster.advertising_duration(), 1000);
    }
}
