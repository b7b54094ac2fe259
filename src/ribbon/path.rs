use std::time::Duration;

use tracing::{debug, trace};

use crate::geometry::curve::{generate_range_swing, sample_smooth_line, SmoothLineOptions};
use crate::geometry::vertex::VERTEX_STRIDE;
use crate::math::vector_2d::{angle_between, cross, direction_and_length, perpendicular, rotate};
use crate::math::{Point2, Point3, UniformSource, ValueRange, Vector2, Vector3};

use super::config::{AutoDrawParams, RibbonConfig};
use super::fade::FadeWindow;
use super::hooks::{DisappearTrigger, Hooks, Scheduler};
use super::sink::{GeometrySink, RibbonVertex, Side, VertexBuffer};

/// Delay before a finished auto-draw starts to disappear, in milliseconds.
const DISAPPEAR_DELAY_MS: ValueRange = ValueRange::from_bounds(1000.0, 6000.0);

/// Lifecycle of a ribbon path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibbonState {
    /// Neither playing nor fading.
    Idle,
    /// Consuming the auto-draw queue, one offset per update.
    AutoPlaying,
    /// Auto-draw finished; the head of the fade window is pinned.
    FadeArmed,
    /// The tail of the fade window is catching up with the head.
    Disappearing,
}

/// A growing ribbon whose centerline is extended one movement vector at a time.
///
/// Each accepted extension appends one centerline point and writes one pair
/// of edge vertices to the sink. Turns sharper than the configured minimum
/// turn angle are clamped to it. Once `max_vertex_num` pairs have been
/// written the path stops growing; it never reallocates.
pub struct RibbonPath<S: GeometrySink = VertexBuffer> {
    config: RibbonConfig,
    auto_draw: AutoDrawParams,
    sink: S,
    random: Box<dyn UniformSource>,

    main_path: Vec<Point2>,
    last_direction: Option<Vector2>,
    vertex_count: usize,
    time: f64,

    auto_play_queue: Vec<Vector2>,
    auto_play_index: usize,
    is_auto_playing: bool,

    fade_window: FadeWindow,
    fade_armed: bool,
    is_disappearing: bool,

    hooks: Hooks,
    trigger: DisappearTrigger,
}

impl RibbonPath<VertexBuffer> {
    /// Creates a path writing into an in-memory [`VertexBuffer`] sized for
    /// the configured capacity.
    pub fn new(config: RibbonConfig, random: impl UniformSource + 'static) -> Self {
        let sink = VertexBuffer::for_pairs(config.max_vertex_num());
        Self::with_sink(config, sink, random)
    }
}

impl<S: GeometrySink> RibbonPath<S> {
    /// Creates a path writing into `sink`.
    pub fn with_sink(config: RibbonConfig, sink: S, random: impl UniformSource + 'static) -> Self {
        Self {
            config,
            auto_draw: AutoDrawParams::default(),
            sink,
            random: Box::new(random),
            main_path: vec![Point2::origin()],
            last_direction: None,
            vertex_count: 0,
            time: 0.0,
            auto_play_queue: Vec::new(),
            auto_play_index: 0,
            is_auto_playing: false,
            fade_window: FadeWindow::new(0.0, 0.0),
            fade_armed: false,
            is_disappearing: false,
            hooks: Hooks::default(),
            trigger: DisappearTrigger::new(),
        }
    }

    /// Sets the starting time phase.
    #[must_use]
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self.fade_window = FadeWindow::new(time, time);
        self
    }

    /// Replaces the ranges auto-draw swings are generated from.
    #[must_use]
    pub fn with_auto_draw_params(mut self, params: AutoDrawParams) -> Self {
        self.auto_draw = params;
        self
    }

    #[must_use]
    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Centerline points, starting at the origin.
    #[must_use]
    pub fn main_path(&self) -> &[Point2] {
        &self.main_path
    }

    /// Direction of the last accepted extension.
    #[must_use]
    pub fn last_direction(&self) -> Option<&Vector2> {
        self.last_direction.as_ref()
    }

    /// Number of vertex pairs written.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of vertices to draw as a triangle strip.
    #[must_use]
    pub fn strip_len(&self) -> usize {
        self.vertex_count * 2
    }

    /// Whether the vertex capacity has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.vertex_count >= self.config.max_vertex_num()
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub fn fade_window(&self) -> FadeWindow {
        self.fade_window
    }

    #[must_use]
    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    #[must_use]
    pub fn is_disappearing(&self) -> bool {
        self.is_disappearing
    }

    /// Offsets left in the auto-draw queue.
    #[must_use]
    pub fn auto_play_remaining(&self) -> usize {
        self.auto_play_queue.len().saturating_sub(self.auto_play_index)
    }

    #[must_use]
    pub fn state(&self) -> RibbonState {
        if self.is_disappearing {
            RibbonState::Disappearing
        } else if self.is_auto_playing {
            RibbonState::AutoPlaying
        } else if self.fade_armed {
            RibbonState::FadeArmed
        } else {
            RibbonState::Idle
        }
    }

    /// Handle that deferred tasks can use to request [`Self::trigger_disappear`].
    #[must_use]
    pub fn disappear_trigger(&self) -> DisappearTrigger {
        self.trigger.clone()
    }

    /// Sets the callback fired when the auto-draw queue runs out.
    pub fn set_on_auto_draw_end(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.on_auto_draw_end = Some(Box::new(hook));
    }

    /// Sets the callback fired when the disappear countdown completes.
    pub fn set_on_disappear(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.on_disappear = Some(Box::new(hook));
    }

    /// Makes every finished auto-draw disappear after a random delay.
    ///
    /// On auto-draw end a task is scheduled 1 to 6 seconds out; when the host
    /// runs it, the next [`Self::update`] starts the disappear countdown.
    /// Replaces any auto-draw-end hook.
    pub fn schedule_disappear(
        &mut self,
        mut scheduler: impl Scheduler + 'static,
        mut random: impl UniformSource + 'static,
    ) {
        let trigger = self.trigger.clone();
        self.set_on_auto_draw_end(move || {
            let delay_ms = DISAPPEAR_DELAY_MS.sample(&mut random);
            let trigger = trigger.clone();
            debug!(delay_ms, "scheduling ribbon disappear");
            scheduler.schedule(
                Duration::from_secs_f64((delay_ms / 1000.0).max(0.0)),
                Box::new(move || trigger.fire()),
            );
        });
    }

    /// Extends the path by the movement vector `(dx, dy)`.
    ///
    /// A zero vector is ignored, as is every extension once the path is
    /// full. The direction is turned toward `(dx, dy)` by at most the minimum
    /// turn angle; the step length is always the vector's length.
    pub fn extend(&mut self, dx: f64, dy: f64) {
        let Some((mut direction, displacement)) = direction_and_length(dx, dy) else {
            return;
        };
        if self.is_full() {
            trace!(dx, dy, "ribbon full, extension dropped");
            return;
        }

        if let Some(last) = self.last_direction {
            let limit = self.config.min_turn_angle();
            if angle_between(&last, &direction) > limit {
                let sign = if cross(&last, &Vector2::new(dx, dy)) > 0.0 {
                    1.0
                } else {
                    -1.0
                };
                direction = rotate(&last, limit * sign);
            }
        }

        let head = self.main_path.last().copied().unwrap_or_else(Point2::origin);
        let next = head + direction * displacement;
        self.main_path.push(next);
        self.write_pair(&next, &perpendicular(&direction));
        self.last_direction = Some(direction);
    }

    /// Writes the outer and inner edge vertices for a centerline point.
    fn write_pair(&mut self, point: &Point2, normal: &Vector2) {
        let position = Point3::new(point.x, point.y, 0.0);
        let normal = Vector3::new(normal.x, normal.y, 0.0);
        let base = self.vertex_count * 2;

        self.sink.write_vertex(
            base,
            &RibbonVertex {
                position,
                normal,
                side: Side::Outer,
                time: self.time,
            },
        );
        self.sink.write_vertex(
            base + 1,
            &RibbonVertex {
                position,
                normal: -normal,
                side: Side::Inner,
                time: self.time,
            },
        );

        self.vertex_count += 1;
        if self.is_full() {
            debug!(vertex_count = self.vertex_count, "ribbon buffer full");
        }
    }

    /// Advances the path by `dt` seconds. A non-finite `dt` counts as zero.
    ///
    /// While auto-playing, exactly one queued offset is consumed per call.
    pub fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt } else { 0.0 };

        if self.trigger.take() {
            self.trigger_disappear();
        }

        self.time += dt;
        let epsilon = self.config.fade_epsilon();

        if self.is_auto_playing {
            if let Some(offset) = self.auto_play_queue.get(self.auto_play_index).copied() {
                self.auto_play_index += 1;
                self.extend(offset.x, offset.y);
            }
            self.fade_window.end = self.time + epsilon;
            if self.auto_play_index >= self.auto_play_queue.len() {
                self.finish_auto_draw();
            }
        }

        if self.is_disappearing {
            if self.fade_window.start < self.fade_window.end + epsilon {
                self.fade_window.start += dt;
            } else {
                self.is_disappearing = false;
                self.fade_armed = false;
                debug!(time = self.time, "ribbon disappeared");
                self.hooks.disappeared();
            }
        }
    }

    /// Stops auto-play. A run already cut short by a disappear neither arms
    /// the fade nor fires the auto-draw-end hook.
    fn finish_auto_draw(&mut self) {
        self.is_auto_playing = false;
        self.fade_window.end = self.time + self.config.fade_epsilon();
        if self.is_disappearing {
            debug!(time = self.time, "auto draw ended while disappearing");
            return;
        }
        self.fade_armed = true;
        debug!(
            vertex_count = self.vertex_count,
            time = self.time,
            "auto draw finished"
        );
        self.hooks.auto_draw_ended();
    }

    /// Generates a random swing and starts replaying it.
    ///
    /// The swing is resampled into one offset per frame. Any previous queue
    /// is replaced.
    pub fn start_auto_draw(&mut self) {
        let params = self.auto_draw.sample(self.random.as_mut());
        let swing = generate_range_swing(&params, self.random.as_mut());
        let samples = sample_smooth_line(&swing, SmoothLineOptions::default());
        let offsets = samples
            .chunks_exact(VERTEX_STRIDE)
            .map(|c| Vector2::new(c[0], c[1]))
            .collect();
        self.play_offsets(offsets);
    }

    /// Starts replaying a given offset queue, one offset per update.
    pub fn play_offsets(&mut self, offsets: Vec<Vector2>) {
        self.fade_window.start = self.time - self.config.fade_epsilon();
        self.auto_play_queue = offsets;
        self.auto_play_index = 0;
        self.is_auto_playing = true;
        self.fade_armed = false;
        debug!(
            queue_len = self.auto_play_queue.len(),
            time = self.time,
            "auto draw started"
        );
    }

    /// Starts the disappear countdown, driven by later updates.
    pub fn trigger_disappear(&mut self) {
        self.is_disappearing = true;
        self.fade_armed = false;
        debug!(time = self.time, "ribbon disappearing");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::UniformRandom;
    use approx::assert_relative_eq;
    use std::cell::{Cell, RefCell};
    use std::f64::consts::FRAC_PI_4;
    use std::rc::Rc;

    fn path(max_vertex_num: usize, min_turn_angle: f64) -> RibbonPath {
        let config = RibbonConfig::new(max_vertex_num, min_turn_angle, 0.2).unwrap();
        RibbonPath::new(config, UniformRandom::seeded(1))
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        (count, move || seen.set(seen.get() + 1))
    }

    #[derive(Clone, Default)]
    struct ManualScheduler {
        tasks: Rc<RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>>,
    }

    impl ManualScheduler {
        fn run_all(&self) -> Vec<Duration> {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            tasks
                .into_iter()
                .map(|(delay, task)| {
                    task();
                    delay
                })
                .collect()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce()>) {
            self.tasks.borrow_mut().push((delay, task));
        }
    }

    #[test]
    fn zero_vector_is_a_no_op() {
        let mut ribbon = path(10, 0.1);
        ribbon.extend(0.0, 0.0);
        assert_eq!(ribbon.vertex_count(), 0);
        assert_eq!(ribbon.main_path().len(), 1);
        assert!(ribbon.last_direction().is_none());
        assert!(ribbon.sink().is_empty());
    }

    #[test]
    fn tiny_moves_still_extend() {
        let mut ribbon = path(10, 0.1);
        ribbon.extend(1e-11, 0.0);
        assert_eq!(ribbon.vertex_count(), 1);
        assert_eq!(ribbon.main_path().len(), 2);
        assert_relative_eq!(ribbon.main_path()[1].x, 1e-11);
        assert_relative_eq!(ribbon.last_direction().unwrap().x, 1.0);
    }

    #[test]
    fn first_extension_is_not_clamped() {
        let mut ribbon = path(10, 0.01);
        ribbon.extend(0.0, -2.0);
        assert_relative_eq!(*ribbon.last_direction().unwrap(), Vector2::new(0.0, -1.0));
        assert_relative_eq!(ribbon.main_path()[1], Point2::new(0.0, -2.0));
    }

    #[test]
    fn three_step_scenario() {
        let limit = 0.1;
        let mut ribbon = path(10, limit);
        ribbon.extend(1.0, 0.0);
        ribbon.extend(1.0, 1.0);
        ribbon.extend(0.0, 1.0);

        assert_eq!(ribbon.vertex_count(), 3);
        assert_eq!(ribbon.main_path().len(), 4);

        let second = rotate(&Vector2::new(1.0, 0.0), limit);
        let third = rotate(&Vector2::new(1.0, 0.0), 2.0 * limit);
        let p = ribbon.main_path();
        assert_relative_eq!(p[1], Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(p[2], p[1] + second * 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(p[3], p[2] + third, epsilon = 1e-12);
        assert_relative_eq!(*ribbon.last_direction().unwrap(), third, epsilon = 1e-12);
    }

    #[test]
    fn turn_is_clamped_in_the_same_sense() {
        for theta in [1.0, -1.0, 3.0, -2.5] {
            let mut ribbon = path(10, 0.2);
            ribbon.extend(1.0, 0.0);
            ribbon.extend(f64::cos(theta), f64::sin(theta));
            let dir = ribbon.last_direction().unwrap();
            let turned = dir.y.atan2(dir.x);
            assert_relative_eq!(turned, 0.2 * theta.signum(), epsilon = 1e-12);
        }
    }

    #[test]
    fn small_turns_pass_through() {
        let mut ribbon = path(10, FRAC_PI_4);
        ribbon.extend(1.0, 0.0);
        ribbon.extend(1.0, 0.5);
        let dir = ribbon.last_direction().unwrap();
        assert_relative_eq!(dir.y.atan2(dir.x), 0.5f64.atan(), epsilon = 1e-12);
    }

    #[test]
    fn antiparallel_turn_does_not_produce_nan() {
        let mut ribbon = path(10, 0.3);
        ribbon.extend(1.0, 0.0);
        ribbon.extend(-1.0, 0.0);
        let dir = ribbon.last_direction().unwrap();
        assert!(dir.x.is_finite() && dir.y.is_finite());
        assert_relative_eq!(dir.y.atan2(dir.x), -0.3, epsilon = 1e-12);
    }

    #[test]
    fn edge_vertices_straddle_the_centerline() {
        let mut ribbon = path(4, 0.1);
        ribbon.update(2.0);
        ribbon.extend(3.0, 0.0);
        let buffer = ribbon.sink();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.vertex(0).unwrap(), &[3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0]);
        assert_eq!(buffer.vertex(1).unwrap(), &[3.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 2.0]);
        assert_eq!(ribbon.strip_len(), 2);
    }

    #[test]
    fn capacity_truncates_the_path() {
        let mut ribbon = path(2, 0.1);
        for _ in 0..5 {
            ribbon.extend(1.0, 0.0);
        }
        assert!(ribbon.is_full());
        assert_eq!(ribbon.vertex_count(), 2);
        assert_eq!(ribbon.main_path().len(), 3);
        assert_eq!(ribbon.sink().len(), 4);
    }

    #[test]
    fn missing_dt_counts_as_zero() {
        let mut ribbon = path(4, 0.1).with_time(3.0);
        ribbon.update(f64::NAN);
        assert_relative_eq!(ribbon.time(), 3.0);
        ribbon.update(0.5);
        assert_relative_eq!(ribbon.time(), 3.5);
    }

    #[test]
    fn auto_draw_plays_one_offset_per_update_and_finishes_once() {
        let mut ribbon = path(4096, 0.05);
        let (finished, hook) = counter();
        ribbon.set_on_auto_draw_end(hook);

        ribbon.start_auto_draw();
        assert_eq!(ribbon.state(), RibbonState::AutoPlaying);
        let queued = ribbon.auto_play_remaining();
        assert!(queued > 0);

        let mut stops = 0;
        let mut frames = 0;
        while frames < queued + 10 {
            let was_playing = ribbon.is_auto_playing();
            ribbon.update(1.0 / 60.0);
            if was_playing && !ribbon.is_auto_playing() {
                stops += 1;
            }
            frames += 1;
        }

        assert_eq!(stops, 1);
        assert_eq!(finished.get(), 1);
        assert_eq!(ribbon.auto_play_remaining(), 0);
        assert_eq!(ribbon.state(), RibbonState::FadeArmed);
        assert!(ribbon.vertex_count() <= queued);
    }

    #[test]
    fn empty_queue_finishes_on_next_update() {
        let mut ribbon = path(8, 0.1);
        let (finished, hook) = counter();
        ribbon.set_on_auto_draw_end(hook);
        ribbon.play_offsets(Vec::new());
        ribbon.update(0.1);
        assert!(!ribbon.is_auto_playing());
        assert_eq!(finished.get(), 1);
    }

    #[test]
    fn fade_window_tracks_playback() {
        let mut ribbon = path(8, 0.1).with_time(5.0);
        ribbon.play_offsets(vec![Vector2::new(1.0, 0.0), Vector2::new(1.0, 0.0)]);
        assert_relative_eq!(ribbon.fade_window().start, 4.9);
        ribbon.update(1.0);
        assert_relative_eq!(ribbon.fade_window().end, 6.1);
        ribbon.update(1.0);
        assert_relative_eq!(ribbon.fade_window().end, 7.1);
        assert_eq!(ribbon.state(), RibbonState::FadeArmed);
    }

    #[test]
    fn disappear_countdown_fires_hook() {
        let mut ribbon = path(8, 0.1);
        ribbon.play_offsets(vec![Vector2::new(1.0, 0.0)]);
        ribbon.update(0.5);
        let (gone, hook) = counter();
        ribbon.set_on_disappear(hook);

        ribbon.trigger_disappear();
        assert_eq!(ribbon.state(), RibbonState::Disappearing);
        for _ in 0..100 {
            ribbon.update(0.1);
        }
        assert_eq!(gone.get(), 1);
        assert_eq!(ribbon.state(), RibbonState::Idle);
        let window = ribbon.fade_window();
        assert!(window.start >= window.end + ribbon.config().fade_epsilon() - 1e-9);
    }

    #[test]
    fn scheduled_disappear_runs_through_trigger() {
        let mut ribbon = path(8, 0.1);
        let scheduler = ManualScheduler::default();
        ribbon.schedule_disappear(scheduler.clone(), UniformRandom::seeded(3));

        ribbon.play_offsets(vec![Vector2::new(0.0, 1.0)]);
        ribbon.update(0.1);
        assert_eq!(ribbon.state(), RibbonState::FadeArmed);

        let delays = scheduler.run_all();
        assert_eq!(delays.len(), 1);
        assert!(delays[0] >= Duration::from_secs(1) && delays[0] < Duration::from_secs(6));

        ribbon.update(0.1);
        assert_eq!(ribbon.state(), RibbonState::Disappearing);
    }

    #[test]
    fn disappear_during_auto_draw_ends_idle() {
        let mut ribbon = path(64, 0.1);
        let scheduler = ManualScheduler::default();
        ribbon.schedule_disappear(scheduler.clone(), UniformRandom::seeded(8));
        let (gone, on_disappear) = counter();
        ribbon.set_on_disappear(on_disappear);

        ribbon.play_offsets(vec![Vector2::new(0.1, 0.0); 5]);
        ribbon.update(0.1);
        ribbon.trigger_disappear();
        for _ in 0..200 {
            ribbon.update(0.1);
            if gone.get() > 0 {
                break;
            }
        }

        assert_eq!(gone.get(), 1);
        assert_eq!(ribbon.state(), RibbonState::Idle);
        assert_eq!(ribbon.vertex_count(), 5);
        // The interrupted run never asked for a second disappear.
        assert!(scheduler.run_all().is_empty());
        for _ in 0..10 {
            ribbon.update(0.1);
        }
        assert_eq!(ribbon.state(), RibbonState::Idle);
        assert_eq!(gone.get(), 1);
    }

        #[test]
    fn auto_draw_can_restart() {
        let mut ribbon = path(4096, 0.05);
        ribbon.start_auto_draw();
        let first = ribbon.auto_play_remaining();
        ribbon.update(0.1);
        ribbon.start_auto_draw();
        assert!(ribbon.is_auto_playing());
        assert!(ribbon.auto_play_remaining() > 0);
        assert!(first > 0);
    }
}
