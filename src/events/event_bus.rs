//! Level event bus
//!
//! Handlers are held weakly: dropping the last `Arc` of a handler
//! unsubscribes it. Channel subscribers receive events on an unbounded
//! channel and are dropped once their receiver is gone.
//!
//! `post` runs handlers on the posting thread. Handlers must return quickly;
//! anything slow belongs behind a channel subscription. A handler that
//! panics is logged and skipped; the remaining subscribers still receive
//! the event.

use super::level_event::LevelEvent;
use crate::thread_pool::panic_message;
use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

pub trait LevelEventHandler: Send + Sync {
    fn handle_event(&self, event: &LevelEvent);
}

pub struct EventBus {
    handlers: RwLock<Vec<Weak<dyn LevelEventHandler>>>,
    channels: Mutex<Vec<Sender<LevelEvent>>>,
    posted: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            channels: Mutex::new(Vec::new()),
            posted: AtomicU64::new(0),
        }
    }

    pub fn subscribe<H: LevelEventHandler + 'static>(&self, handler: &Arc<H>) {
        let handler: Arc<dyn LevelEventHandler> = handler.clone();
        self.handlers.write().push(Arc::downgrade(&handler));
    }

    pub fn subscribe_channel(&self) -> Receiver<LevelEvent> {
        let (sender, receiver) = unbounded();
        self.channels.lock().push(sender);
        receiver
    }

    /// Deliver an event to every live subscriber; returns how many received it.
    /// Handlers that panic are not counted.
    pub fn post(&self, event: LevelEvent) -> usize {
        self.posted.fetch_add(1, Ordering::Relaxed);

        // handlers may subscribe while being called, so no lock is held
        let (live, dead) = {
            let handlers = self.handlers.read();
            let live: Vec<Arc<dyn LevelEventHandler>> =
                handlers.iter().filter_map(Weak::upgrade).collect();
            let dead = live.len() != handlers.len();
            (live, dead)
        };
        if dead {
            self.handlers
                .write()
                .retain(|handler| handler.strong_count() > 0);
        }

        let mut delivered = 0;
        for handler in &live {
            match catch_unwind(AssertUnwindSafe(|| handler.handle_event(&event))) {
                Ok(()) => delivered += 1,
                Err(payload) => log::error!(
                    "[EventBus::post] Handler panicked on {:?} event for {}: {}",
                    event.kind(),
                    event.level().key(),
                    panic_message(&*payload)
                ),
            }
        }

        self.channels
            .lock()
            .retain(|sender| match sender.try_send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
                // unbounded channels are never full
                Err(TrySendError::Full(_)) => true,
            });

        log::trace!(
            "[EventBus::post] {:?} event delivered to {} subscribers",
            event.kind(),
            delivered
        );
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        let handlers = self
            .handlers
            .read()
            .iter()
            .filter(|handler| handler.strong_count() > 0)
            .count();
        handlers + self.channels.lock().len()
    }

    pub fn posted_count(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::progress::LoggingProgressListener;
    use crate::world::core::BlockPos;
    use crate::world::level::{
        ChunkGenerator, DimensionType, LevelData, LevelInit, LevelProperties, LevelStem,
        ServerLevel,
    };
    use std::sync::atomic::AtomicUsize;

    struct CountingHandler {
        seen: AtomicUsize,
    }

    impl LevelEventHandler for CountingHandler {
        fn handle_event(&self, _event: &LevelEvent) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn create_test_event() -> LevelEvent {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::default()));
        let level = ServerLevel::new(LevelInit {
            key: "test:void".parse().expect("valid key"),
            stem: LevelStem::new(
                DimensionType::overworld(),
                ChunkGenerator::void("minecraft:the_void".parse().expect("valid key")),
            ),
            level_data: LevelData::Primary(properties),
            progress: Box::new(LoggingProgressListener::new(1)),
            storage_dir: std::path::PathBuf::from("void"),
            is_debug: false,
            seed: 0,
            tick_time: true,
        })
        .expect("valid level");
        LevelEvent::load(Arc::new(level))
    }

    #[test]
    fn test_post_reaches_handlers_and_channels() {
        let bus = EventBus::new();
        let handler = Arc::new(CountingHandler {
            seen: AtomicUsize::new(0),
        });
        bus.subscribe(&handler);
        let receiver = bus.subscribe_channel();

        let delivered = bus.post(create_test_event());

        assert_eq!(delivered, 2);
        assert_eq!(handler.seen.load(Ordering::SeqCst), 1);
        let event = receiver.try_recv().expect("event on channel");
        assert!(!event.is_cancelable());
        assert_eq!(event.level().key().to_string(), "test:void");
    }

    struct PanickingHandler;

    impl LevelEventHandler for PanickingHandler {
        fn handle_event(&self, _event: &LevelEvent) {
            panic!("handler bug");
        }
    }

    #[test]
    fn test_panicking_handler_does_not_stop_delivery() {
        let bus = EventBus::new();
        let faulty = Arc::new(PanickingHandler);
        let handler = Arc::new(CountingHandler {
            seen: AtomicUsize::new(0),
        });
        bus.subscribe(&faulty);
        bus.subscribe(&handler);
        let receiver = bus.subscribe_channel();

        let delivered = bus.post(create_test_event());

        assert_eq!(delivered, 2);
        assert_eq!(handler.seen.load(Ordering::SeqCst), 1);
        assert!(receiver.try_recv().is_ok());
        // still subscribed for the next event
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let bus = EventBus::new();
        let handler = Arc::new(CountingHandler {
            seen: AtomicUsize::new(0),
        });
        bus.subscribe(&handler);
        let receiver = bus.subscribe_channel();
        assert_eq!(bus.subscriber_count(), 2);

        drop(handler);
        drop(receiver);

        assert_eq!(bus.post(create_test_event()), 0);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.posted_count(), 1);
    }
}
