//! The draw view: owns the pool, the card art and the drawing surface, and runs one spin at a
//! time from trigger to settle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval, sleep},
};
use tracing::{debug, info, warn};

use crate::{
    draw::{
        animation::SpinAnimation,
        assets::{CardArt, ImageLoader, preload_card_art},
        carousel::{CardPlacement, CarouselLayout, Viewport},
        config::DrawConfig,
        error::DrawError,
        phase::{AnimationState, DrawEvent, DrawPhase, DrawStateMachine},
        source::PickSource,
    },
    dto::game::GameRecord,
};

const UNKNOWN_GAME_TITLE: &str = "未知游戏";

/// Drawing target owned by the view between `attach_surface` and `teardown`.
pub trait Surface: Send + 'static {
    type Loader: ImageLoader;

    fn viewport(&self) -> Viewport;

    /// Loader used to preload card art for this surface.
    fn loader(&self) -> Self::Loader;

    /// Paint one complete frame, replacing whatever was drawn before.
    fn draw_frame(&mut self, frame: &Frame<'_, <Self::Loader as ImageLoader>::Image>);
}

type Image<S> = <<S as Surface>::Loader as ImageLoader>::Image;

/// One card of a frame.
#[derive(Debug)]
pub struct CardSprite<'a, I> {
    pub placement: CardPlacement,
    /// `None` means the placeholder glyph.
    pub image: Option<&'a I>,
    pub title: &'a str,
    pub show_label: bool,
}

/// Everything needed to paint the carousel at one offset, cards ordered back to front.
#[derive(Debug)]
pub struct Frame<'a, I> {
    pub offset: f64,
    pub card_size: (f64, f64),
    pub cards: Vec<CardSprite<'a, I>>,
}

/// Receives the user-visible outcome of a draw.
///
/// Callbacks run while the view is locked; they must not call back into the view.
pub trait DrawListener: Send + Sync + 'static {
    fn on_failure(&self, error: &DrawError);

    /// The carousel rested on `game` for the settle delay.
    fn on_settled(&self, game: &GameRecord);
}

struct ViewState<S: Surface> {
    machine: DrawStateMachine,
    pool: Vec<GameRecord>,
    pool_query: Option<u32>,
    /// Set when a pick was not found in the pool; the next trigger refetches first.
    pool_stale: bool,
    pool_generation: u64,
    art: Vec<CardArt<Image<S>>>,
    art_generation: Option<u64>,
    surface: Option<S>,
    layout: Option<CarouselLayout>,
    driver: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl<S: Surface> ViewState<S> {
    fn new() -> Self {
        Self {
            machine: DrawStateMachine::new(),
            pool: Vec::new(),
            pool_query: None,
            pool_stale: false,
            pool_generation: 0,
            art: Vec::new(),
            art_generation: None,
            surface: None,
            layout: None,
            driver: None,
            torn_down: false,
        }
    }

    fn is_ready(&self) -> bool {
        self.surface.is_some() && self.art_generation == Some(self.pool_generation)
    }

    /// Cycle is still the live one and the view is still up.
    fn owns(&self, cycle: u64) -> bool {
        !self.torn_down && self.machine.cycle() == cycle
    }

    fn render(&mut self, offset: f64, label_threshold: f64) {
        let (Some(surface), Some(layout)) = (self.surface.as_mut(), self.layout.as_ref()) else {
            return;
        };

        let cards = layout
            .layout(offset, self.pool.len())
            .into_iter()
            .map(|placement| {
                let name = self.pool[placement.index].name.as_str();
                CardSprite {
                    placement,
                    image: self.art.get(placement.index).and_then(CardArt::image),
                    title: if name.is_empty() { UNKNOWN_GAME_TITLE } else { name },
                    show_label: placement.scale > label_threshold,
                }
            })
            .collect();

        surface.draw_frame(&Frame {
            offset,
            card_size: layout.card_size(),
            cards,
        });
        self.machine.set_offset(offset);
    }
}

/// Draw carousel bound to one pick source and one listener.
pub struct DrawView<S: Surface> {
    state: Arc<Mutex<ViewState<S>>>,
    source: Arc<dyn PickSource>,
    listener: Arc<dyn DrawListener>,
    config: Arc<DrawConfig>,
}

impl<S: Surface> DrawView<S> {
    pub fn new(
        source: Arc<dyn PickSource>,
        listener: Arc<dyn DrawListener>,
        config: DrawConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::new())),
            source,
            listener,
            config: Arc::new(config),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState<S>> {
        lock_state(&self.state)
    }

    pub fn snapshot(&self) -> AnimationState {
        self.lock().machine.snapshot()
    }

    pub fn phase(&self) -> DrawPhase {
        self.lock().machine.phase().clone()
    }

    /// Pool currently held by the view.
    pub fn pool(&self) -> Vec<GameRecord> {
        self.lock().pool.clone()
    }

    /// Acquire the drawing surface, preload card art and draw the resting frame.
    pub async fn attach_surface(&self, surface: S) -> Result<(), DrawError> {
        let (loader, pool, generation) = {
            let mut state = self.lock();
            if state.torn_down {
                return Err(DrawError::TornDown);
            }
            let loader = surface.loader();
            state.layout = Some(CarouselLayout::from_viewport(surface.viewport(), &self.config));
            state.surface = Some(surface);
            (loader, state.pool.clone(), state.pool_generation)
        };

        let art = preload_card_art(&loader, &pool, &self.config.default_cover).await;

        let mut state = self.lock();
        if state.torn_down {
            return Err(DrawError::TornDown);
        }
        if state.pool_generation == generation {
            state.art = art;
            state.art_generation = Some(generation);
            if !state.machine.is_spinning() {
                let offset = state.machine.current_offset();
                state.render(offset, self.config.label_scale_threshold);
            }
        }
        debug!(cards = pool.len(), "draw surface attached");
        Ok(())
    }

    /// Replace the pool with the eligible games for `player_count`. Refused while spinning.
    ///
    /// Returns the new pool size.
    pub async fn load_pool(&self, player_count: Option<u32>) -> Result<usize, DrawError> {
        {
            let state = self.lock();
            if state.torn_down {
                return Err(DrawError::TornDown);
            }
            if state.machine.is_spinning() {
                return Err(DrawError::Busy);
            }
        }

        let pool = match self.source.fetch_pool(player_count).await {
            Ok(pool) => pool,
            Err(err) => {
                let state = self.lock();
                if state.torn_down {
                    return Err(DrawError::TornDown);
                }
                warn!(error = %err, ?player_count, "failed to load draw pool");
                self.listener.on_failure(&err);
                return Err(err);
            }
        };

        self.install_pool(player_count, pool, None).await
    }

    /// Install a fetched pool and its art. `cycle` is set when a running draw refreshes a stale
    /// pool before picking.
    async fn install_pool(
        &self,
        player_count: Option<u32>,
        pool: Vec<GameRecord>,
        cycle: Option<u64>,
    ) -> Result<usize, DrawError> {
        let (loader, generation) = {
            let mut state = self.lock();
            if state.torn_down {
                return Err(DrawError::TornDown);
            }
            match cycle {
                Some(cycle) if !state.owns(cycle) => return Err(DrawError::TornDown),
                None if state.machine.is_spinning() => return Err(DrawError::Busy),
                _ => {}
            }
            if matches!(state.machine.phase(), DrawPhase::Settled { .. }) {
                let _ = state.machine.apply(DrawEvent::Reset);
            }

            state.pool_generation += 1;
            state.pool = pool;
            state.pool_query = player_count;
            state.pool_stale = false;
            state.art.clear();
            state.art_generation = None;
            info!(
                cards = state.pool.len(),
                ?player_count,
                "draw pool loaded"
            );

            let loader = state.surface.as_ref().map(S::loader);
            (loader, state.pool_generation)
        };

        let Some(loader) = loader else {
            return Ok(self.lock().pool.len());
        };
        let pool = self.lock().pool.clone();
        let art = preload_card_art(&loader, &pool, &self.config.default_cover).await;

        let mut state = self.lock();
        if state.torn_down {
            return Err(DrawError::TornDown);
        }
        if state.pool_generation == generation {
            state.art = art;
            state.art_generation = Some(generation);
            state.render(0.0, self.config.label_scale_threshold);
        }
        Ok(state.pool.len())
    }

    /// Start a draw.
    ///
    /// Triggering while a draw is in flight is a no-op. Every failure is reported to the
    /// listener and leaves the view `Idle`.
    pub async fn trigger(&self) -> Result<(), DrawError> {
        let (cycle, player_count, stale) = {
            let mut state = self.lock();
            if state.torn_down {
                return Err(DrawError::TornDown);
            }
            if state.machine.is_spinning() {
                debug!("draw already in progress; trigger ignored");
                return Ok(());
            }
            if !state.is_ready() {
                return Err(self.report(DrawError::NotReady));
            }
            if !state.pool_stale && state.pool.is_empty() {
                return Err(self.report(DrawError::NoEligibleRecords));
            }
            if let Err(err) = state.machine.apply(DrawEvent::Trigger) {
                debug!(error = %err, "trigger ignored");
                return Ok(());
            }
            (state.machine.cycle(), state.pool_query, state.pool_stale)
        };

        if stale {
            debug!(?player_count, "refetching stale draw pool");
            let refreshed = match self.source.fetch_pool(player_count).await {
                Ok(pool) => self.install_pool(player_count, pool, Some(cycle)).await,
                Err(err) => Err(err),
            };
            if let Err(err) = refreshed {
                let mut state = self.lock();
                if !state.owns(cycle) {
                    return Err(DrawError::TornDown);
                }
                return Err(self.abort(&mut state, err));
            }
        }

        let pick = {
            let mut state = self.lock();
            if !state.owns(cycle) {
                return Err(DrawError::TornDown);
            }
            if state.pool.is_empty() {
                return Err(self.abort(&mut state, DrawError::NoEligibleRecords));
            }
            self.source.pick(player_count, &state.pool)
        };
        let picked = pick.await;

        let mut state = self.lock();
        if !state.owns(cycle) {
            return Err(DrawError::TornDown);
        }
        let game = match picked {
            Ok(game) => game,
            Err(err) => return Err(self.abort(&mut state, err)),
        };
        let Some(target_index) = state.pool.iter().position(|entry| entry.id == game.id) else {
            state.pool_stale = true;
            return Err(self.abort(&mut state, DrawError::StaleSelection { id: game.id }));
        };
        let Some(spacing) = state.layout.as_ref().map(CarouselLayout::spacing) else {
            return Err(self.abort(&mut state, DrawError::NotReady));
        };

        let spin = SpinAnimation::new(
            target_index,
            state.pool.len(),
            self.config.extra_cycles,
            spacing,
            self.config.duration(),
            Instant::now(),
        );
        if let Err(err) = state.machine.apply(DrawEvent::PickResolved(spin)) {
            return Err(self.abort(&mut state, DrawError::Transient(err.to_string())));
        }
        info!(target_index, game = %game.name, "draw started");

        state.driver = Some(tokio::spawn(drive(
            self.state.clone(),
            self.listener.clone(),
            self.config.clone(),
            cycle,
        )));
        Ok(())
    }

    /// Leave the settled display. Refused while a draw is in flight, including the display delay.
    pub fn reset(&self) -> Result<(), DrawError> {
        let mut state = self.lock();
        if state.torn_down {
            return Err(DrawError::TornDown);
        }
        if state.machine.is_spinning() {
            return Err(DrawError::Busy);
        }
        if state.machine.apply(DrawEvent::Reset).is_ok() {
            state.render(0.0, self.config.label_scale_threshold);
        }
        Ok(())
    }

    /// Release the surface, the art and the driver. Every later call is refused and no
    /// callback fires afterwards. Idempotent.
    pub fn teardown(&self) {
        let mut state = self.lock();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        if let Some(driver) = state.driver.take() {
            driver.abort();
        }
        state.surface = None;
        state.layout = None;
        state.art.clear();
        state.art_generation = None;

        let event = if state.machine.is_spinning() {
            DrawEvent::Abort
        } else {
            DrawEvent::Reset
        };
        let _ = state.machine.apply(event);
        info!("draw view torn down");
    }

    fn report(&self, err: DrawError) -> DrawError {
        self.listener.on_failure(&err);
        err
    }

    fn abort(&self, state: &mut ViewState<S>, err: DrawError) -> DrawError {
        let _ = state.machine.apply(DrawEvent::Abort);
        warn!(error = %err, retryable = err.retryable(), "draw aborted");
        self.report(err)
    }
}

impl<S: Surface> Drop for DrawView<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock_state<S: Surface>(state: &Mutex<ViewState<S>>) -> MutexGuard<'_, ViewState<S>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Frame loop of one spin: redraws from the elapsed time until the spin ends, holds the result
/// for the settle delay, then settles and notifies the listener.
async fn drive<S: Surface>(
    shared: Arc<Mutex<ViewState<S>>>,
    listener: Arc<dyn DrawListener>,
    config: Arc<DrawConfig>,
    cycle: u64,
) {
    let mut ticker = interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let mut state = lock_state(&shared);
        if !state.owns(cycle) {
            return;
        }
        let Some(spin) = state.machine.animation().cloned() else {
            return;
        };

        let now = Instant::now();
        state.render(spin.offset_at(now), config.label_scale_threshold);
        if spin.is_finished(now) {
            if let Err(err) = state.machine.apply(DrawEvent::Completed) {
                warn!(error = %err, "draw could not settle");
                return;
            }
            debug!(target_index = spin.target_index, "draw settled");
            break;
        }
    }

    sleep(config.settle_delay()).await;

    let mut state = lock_state(&shared);
    if !state.owns(cycle) {
        return;
    }
    state.driver = None;
    let target_index = match state.machine.apply(DrawEvent::Landed) {
        Ok(DrawPhase::Settled { target_index }) => *target_index,
        Ok(_) => return,
        Err(err) => {
            warn!(error = %err, "draw result could not be handed out");
            return;
        }
    };
    if let Some(game) = state.pool.get(target_index) {
        info!(game = %game.name, "draw result ready");
        listener.on_settled(game);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use futures::future::{self, BoxFuture};
    use uuid::Uuid;

    use super::*;
    use crate::{
        dao::seed,
        draw::{
            error::AssetError,
            phase::{PhaseKind, SpinStage},
        },
    };

    #[derive(Clone)]
    struct NoImages;

    impl ImageLoader for NoImages {
        type Image = ();

        fn load(&self, url: &str) -> BoxFuture<'static, Result<(), AssetError>> {
            Box::pin(future::ready(Err(AssetError {
                url: url.to_owned(),
                reason: "offline".into(),
            })))
        }
    }

    #[derive(Default)]
    struct FrameLog {
        frames: AtomicUsize,
        front: Mutex<Option<usize>>,
    }

    struct TestSurface {
        log: Arc<FrameLog>,
    }

    impl Surface for TestSurface {
        type Loader = NoImages;

        fn viewport(&self) -> Viewport {
            Viewport {
                width: 375.0,
                height: 500.0,
                window_width: 375.0,
            }
        }

        fn loader(&self) -> NoImages {
            NoImages
        }

        fn draw_frame(&mut self, frame: &Frame<'_, ()>) {
            self.log.frames.fetch_add(1, Ordering::SeqCst);
            *self.log.front.lock().unwrap() = frame.cards.last().map(|card| card.placement.index);
        }
    }

    #[derive(Default)]
    struct Recorder {
        settled: Mutex<Vec<Uuid>>,
        failures: Mutex<Vec<DrawError>>,
    }

    impl DrawListener for Recorder {
        fn on_failure(&self, error: &DrawError) {
            self.failures.lock().unwrap().push(error.clone());
        }

        fn on_settled(&self, game: &GameRecord) {
            self.settled.lock().unwrap().push(game.id);
        }
    }

    struct ScriptedSource {
        pool: Mutex<Vec<GameRecord>>,
        picks: Mutex<VecDeque<Result<GameRecord, DrawError>>>,
        fetches: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(pool: Vec<GameRecord>) -> Arc<Self> {
            Arc::new(Self {
                pool: Mutex::new(pool),
                picks: Mutex::new(VecDeque::new()),
                fetches: AtomicUsize::new(0),
            })
        }

        fn queue(&self, pick: Result<GameRecord, DrawError>) {
            self.picks.lock().unwrap().push_back(pick);
        }
    }

    impl PickSource for ScriptedSource {
        fn fetch_pool(
            &self,
            _player_count: Option<u32>,
        ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Box::pin(future::ready(Ok(self.pool.lock().unwrap().clone())))
        }

        fn pick(
            &self,
            _player_count: Option<u32>,
            _pool: &[GameRecord],
        ) -> BoxFuture<'static, Result<GameRecord, DrawError>> {
            let pick = self
                .picks
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DrawError::Transient("no scripted pick".into())));
            Box::pin(future::ready(pick))
        }
    }

    fn records() -> Vec<GameRecord> {
        seed::sample_games().into_iter().map(Into::into).collect()
    }

    struct Harness {
        view: DrawView<TestSurface>,
        source: Arc<ScriptedSource>,
        recorder: Arc<Recorder>,
        log: Arc<FrameLog>,
    }

    async fn ready_view(pool: Vec<GameRecord>) -> Harness {
        let source = ScriptedSource::new(pool);
        let recorder = Arc::new(Recorder::default());
        let log = Arc::new(FrameLog::default());
        let view = DrawView::new(source.clone(), recorder.clone(), DrawConfig::default());
        view.attach_surface(TestSurface { log: log.clone() })
            .await
            .unwrap();
        view.load_pool(Some(7)).await.unwrap();
        Harness {
            view,
            source,
            recorder,
            log,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn draw_settles_on_the_picked_card() {
        let pool = records();
        let h = ready_view(pool.clone()).await;
        h.source.queue(Ok(pool[5].clone()));

        h.view.trigger().await.unwrap();
        assert_eq!(h.view.snapshot().target_index, Some(5));

        sleep(Duration::from_millis(3_600)).await;
        assert_eq!(
            h.view.phase(),
            DrawPhase::Spinning(SpinStage::Landing { target_index: 5 })
        );
        assert!(h.recorder.settled.lock().unwrap().is_empty());
        assert_eq!(*h.log.front.lock().unwrap(), Some(5));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(h.view.phase(), DrawPhase::Settled { target_index: 5 });
        assert_eq!(*h.recorder.settled.lock().unwrap(), vec![pool[5].id]);
        assert!(h.recorder.failures.lock().unwrap().is_empty());

        h.source.queue(Ok(pool[1].clone()));
        h.view.trigger().await.unwrap();
        assert_eq!(h.view.snapshot().phase, PhaseKind::Spinning);
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_delivered_even_when_poked_during_the_display_delay() {
        let pool = records();
        let h = ready_view(pool.clone()).await;
        h.source.queue(Ok(pool[5].clone()));
        h.source.queue(Ok(pool[9].clone()));

        h.view.trigger().await.unwrap();
        sleep(Duration::from_millis(3_600)).await;

        h.view.trigger().await.unwrap();
        assert_eq!(h.view.reset(), Err(DrawError::Busy));
        assert_eq!(h.view.load_pool(Some(7)).await, Err(DrawError::Busy));
        assert_eq!(h.source.picks.lock().unwrap().len(), 1);
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(h.view.snapshot().target_index, Some(5));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(*h.recorder.settled.lock().unwrap(), vec![pool[5].id]);
        assert!(h.recorder.failures.lock().unwrap().is_empty());
        assert_eq!(h.view.phase(), DrawPhase::Settled { target_index: 5 });
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_the_settled_view_to_rest() {
        let pool = records();
        let h = ready_view(pool.clone()).await;
        h.source.queue(Ok(pool[4].clone()));

        h.view.trigger().await.unwrap();
        assert_eq!(h.view.reset(), Err(DrawError::Busy));

        sleep(Duration::from_secs(5)).await;
        assert_eq!(h.view.reset(), Ok(()));
        assert_eq!(h.view.phase(), DrawPhase::Idle);
        assert_eq!(h.view.snapshot().current_offset, 0.0);
        assert_eq!(*h.log.front.lock().unwrap(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_while_spinning_is_a_no_op() {
        let pool = records();
        let h = ready_view(pool.clone()).await;
        h.source.queue(Ok(pool[2].clone()));
        h.source.queue(Ok(pool[6].clone()));

        h.view.trigger().await.unwrap();
        sleep(Duration::from_millis(200)).await;
        let before = h.view.snapshot();

        h.view.trigger().await.unwrap();
        let after = h.view.snapshot();
        assert_eq!(after.target_index, before.target_index);
        assert_eq!(after.start_time, before.start_time);
        assert_eq!(h.view.pool(), pool);
        assert_eq!(h.source.picks.lock().unwrap().len(), 1);
        assert_eq!(h.view.load_pool(None).await, Err(DrawError::Busy));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_mid_spin_silences_the_view() {
        let pool = records();
        let h = ready_view(pool.clone()).await;
        h.source.queue(Ok(pool[3].clone()));

        h.view.trigger().await.unwrap();
        sleep(Duration::from_millis(1_000)).await;
        h.view.teardown();
        let frames = h.log.frames.load(Ordering::SeqCst);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(h.log.frames.load(Ordering::SeqCst), frames);
        assert!(h.recorder.settled.lock().unwrap().is_empty());
        assert!(h.recorder.failures.lock().unwrap().is_empty());
        assert_eq!(h.view.phase(), DrawPhase::Idle);
        assert_eq!(h.view.trigger().await, Err(DrawError::TornDown));

        h.view.teardown();
    }

    #[tokio::test(start_paused = true)]
    async fn stale_pick_aborts_then_refetches_before_the_next_draw() {
        let pool = records();
        let h = ready_view(pool[..4].to_vec()).await;
        h.source.queue(Ok(pool[6].clone()));

        let err = h.view.trigger().await.unwrap_err();
        assert_eq!(err, DrawError::StaleSelection { id: pool[6].id });
        assert!(err.retryable());
        assert_eq!(h.view.phase(), DrawPhase::Idle);
        assert_eq!(h.recorder.failures.lock().unwrap().len(), 1);
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 1);

        *h.source.pool.lock().unwrap() = pool.clone();
        h.source.queue(Ok(pool[6].clone()));
        h.view.trigger().await.unwrap();
        assert_eq!(h.source.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(h.view.pool().len(), pool.len());
        assert_eq!(h.view.snapshot().target_index, Some(6));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_returns_to_idle() {
        let h = ready_view(records()).await;
        h.source.queue(Err(DrawError::Transient("connection reset".into())));

        let err = h.view.trigger().await.unwrap_err();
        assert!(matches!(err, DrawError::Transient(_)));
        assert_eq!(h.view.phase(), DrawPhase::Idle);
        assert_eq!(*h.recorder.failures.lock().unwrap(), vec![err]);

        sleep(Duration::from_secs(5)).await;
        assert!(h.recorder.settled.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_pool_is_reported_without_spinning() {
        let h = ready_view(Vec::new()).await;

        assert_eq!(h.view.trigger().await, Err(DrawError::NoEligibleRecords));
        assert_eq!(h.view.phase(), DrawPhase::Idle);
        assert_eq!(
            *h.recorder.failures.lock().unwrap(),
            vec![DrawError::NoEligibleRecords]
        );
        assert_eq!(h.log.frames.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_before_the_surface_is_attached_is_not_ready() {
        let source = ScriptedSource::new(records());
        let recorder = Arc::new(Recorder::default());
        let view: DrawView<TestSurface> =
            DrawView::new(source.clone(), recorder.clone(), DrawConfig::default());
        view.load_pool(None).await.unwrap();

        assert_eq!(view.trigger().await, Err(DrawError::NotReady));
        assert_eq!(view.phase(), DrawPhase::Idle);
        assert_eq!(*recorder.failures.lock().unwrap(), vec![DrawError::NotReady]);
    }
}
