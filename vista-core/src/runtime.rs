//! Event queue and timer supervision for one embedded carousel.
//!
//! Every input (host controls, touch samples, image callbacks, autoplay
//! ticks, the loader's result) is queued on one unbounded channel and applied
//! by a single task in arrival order. The host gets a [`CarouselHandle`] to
//! push input and a `watch` receiver carrying the latest [`CarouselView`].
//!
//! Only host handles hold the queue open. Timers, the loader and the loop
//! itself keep weak senders, so dropping every [`CarouselHandle`] tears the
//! carousel down the same way an explicit unmount does.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

use crate::api::GallerySource;
use crate::carousel::{
    CarouselMessage, CarouselState, CarouselView, Effect, TickScheduler,
    TimerHandle, TimerId, update,
};
use crate::config::CarouselConfig;
use crate::download::{AssetDownloader, DownloadRequest};
use crate::error::Result;
use crate::loader::GalleryLoader;

/// Runs each autoplay timer as a spawned task that posts ticks onto the
/// carousel's queue until its token is cancelled or the queue is gone.
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    sender: mpsc::WeakUnboundedSender<CarouselMessage>,
}

impl TokioTickScheduler {
    pub fn new(sender: mpsc::WeakUnboundedSender<CarouselMessage>) -> Self {
        Self { sender }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn start(&mut self, id: TimerId, interval: Duration) -> TimerHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(sender) = sender.upgrade() else {
                            break;
                        };
                        if sender.send(CarouselMessage::AutoplayTick(id)).is_err() {
                            break;
                        }
                    }
                }
            }
            trace!(%id, "autoplay timer task finished");
        });

        TimerHandle::new(id, token)
    }
}

/// Host-side input port of a mounted carousel.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    sender: mpsc::UnboundedSender<CarouselMessage>,
}

impl CarouselHandle {
    /// Queue one input. Returns `false` once the carousel is gone; that is
    /// not an error.
    pub fn send(&self, message: CarouselMessage) -> bool {
        self.sender.send(message).is_ok()
    }

    /// Tear the carousel down. The autoplay timer is cancelled before
    /// anything else happens on the unmount path.
    pub fn unmount(&self) -> bool {
        self.send(CarouselMessage::Unmount)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// A carousel running on the current tokio runtime.
#[derive(Debug)]
pub struct MountedCarousel {
    pub handle: CarouselHandle,
    pub views: watch::Receiver<CarouselView>,
    pub task: JoinHandle<()>,
}

impl MountedCarousel {
    /// Unmount and wait for the event loop to finish.
    pub async fn unmount(self) {
        self.handle.unmount();
        if let Err(err) = self.task.await {
            warn!(%err, "carousel task ended abnormally");
        }
    }
}

/// Builds mounts: owns the configuration and the collaborators every mount
/// (including ones created by a reload) shares.
#[derive(Debug, Clone)]
pub struct CarouselRuntime {
    config: CarouselConfig,
    loader: GalleryLoader,
    downloader: AssetDownloader,
}

impl CarouselRuntime {
    pub fn new(config: CarouselConfig, source: Arc<dyn GallerySource>) -> Result<Self> {
        config.validate()?;
        let loader = GalleryLoader::new(source, config.page_size);
        let downloader = AssetDownloader::new(config.download_dir.clone())?;
        Ok(Self {
            config,
            loader,
            downloader,
        })
    }

    pub fn with_downloader(mut self, downloader: AssetDownloader) -> Self {
        self.downloader = downloader;
        self
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Mount a fresh carousel and start loading it.
    pub fn mount(self) -> MountedCarousel {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (view_tx, views) = watch::channel(CarouselView::default());
        let task = tokio::spawn(self.run(sender.downgrade(), receiver, view_tx));
        let handle = CarouselHandle { sender };
        MountedCarousel {
            handle,
            views,
            task,
        }
    }

    async fn run(
        self,
        sender: mpsc::WeakUnboundedSender<CarouselMessage>,
        mut receiver: mpsc::UnboundedReceiver<CarouselMessage>,
        views: watch::Sender<CarouselView>,
    ) {
        let mut state = self.mount_state(&sender);
        publish(&views, &state);

        while let Some(message) = receiver.recv().await {
            match update(&mut state, message) {
                Effect::None => {}
                Effect::Download(request) => self.spawn_download(request),
                Effect::Reload => {
                    info!("reloading carousel");
                    state = self.mount_state(&sender);
                }
                Effect::Shutdown => break,
            }
            publish(&views, &state);
        }

        // Unmounted, or every host handle was dropped.
        state.teardown();
    }

    fn mount_state(&self, sender: &mpsc::WeakUnboundedSender<CarouselMessage>) -> CarouselState {
        let scheduler = TokioTickScheduler::new(sender.clone());
        let state = CarouselState::new(&self.config, Box::new(scheduler));
        info!(mount = ?state.mount_id(), "carousel mounted");

        let mount = state.mount_id();
        let loader = self.loader.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            let outcome = loader.load().await;
            // No live sender or a closed queue means the carousel went away
            // mid-fetch.
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(CarouselMessage::Loaded { mount, outcome });
            }
        });

        state
    }

    fn spawn_download(&self, request: DownloadRequest) {
        let downloader = self.downloader.clone();
        tokio::spawn(async move {
            if let Err(err) = downloader.download(&request).await {
                warn!(id = %request.item_id, url = %request.url, %err, "asset download failed");
            }
        });
    }
}

fn publish(views: &watch::Sender<CarouselView>, state: &CarouselState) {
    let next = state.view();
    views.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timer_ticks_on_cadence_until_cancelled() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut scheduler = TokioTickScheduler::new(sender.downgrade());
        let id = TimerId::next();
        let handle = scheduler.start(id, Duration::from_millis(4_000));

        tokio::time::sleep(Duration::from_millis(3_999)).await;
        assert!(receiver.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(matches!(
            receiver.try_recv(),
            Ok(CarouselMessage::AutoplayTick(tick)) if tick == id
        ));

        handle.cancel();
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_timer() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut scheduler = TokioTickScheduler::new(sender.downgrade());
        drop(scheduler.start(TimerId::next(), Duration::from_millis(500)));

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_task_exits_once_the_queue_has_no_owner() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut scheduler = TokioTickScheduler::new(sender.downgrade());
        let handle = scheduler.start(TimerId::next(), Duration::from_millis(500));
        drop(sender);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(receiver.try_recv().is_err());
        assert!(!handle.is_cancelled());
    }
}
