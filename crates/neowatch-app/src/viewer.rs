//! The running viewer: scene, feed client and in-flight fetches.
//!
//! Fetches run on the tokio runtime and report back over a channel tagged
//! with the [`FetchGeneration`] issued when they started. The frame thread
//! drains that channel between frames, so the scene is only ever touched
//! from one thread and keeps animating while requests are pending.

use std::io::Write;
use std::ops::ControlFlow;

use crossbeam_channel::{Receiver, Sender};
use neowatch_config::Config;
use neowatch_feed::{FeedBatch, FeedClient, FeedError, FeedRequest};
use neowatch_scene::{
    ApplyOutcome, Camera, FetchGeneration, HeadlessScene, SceneContext, Viewport,
};
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::console::{Command, HELP};
use crate::display::ConsoleDisplay;
use crate::frame_loop::{FIXED_DT, FrameLoop};

type FetchResult = (FetchGeneration, Result<FeedBatch, FeedError>);

pub struct Viewer<W: Write> {
    context: SceneContext<HeadlessScene, ConsoleDisplay<W>>,
    client: FeedClient,
    runtime: Handle,
    results_tx: Sender<FetchResult>,
    results_rx: Receiver<FetchResult>,
    frames: FrameLoop,
    in_flight: usize,
}

impl<W: Write> Viewer<W> {
    pub fn new(config: &Config, out: W, runtime: Handle) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        let camera = Camera::from_config(&config.camera, width, height);
        let context = SceneContext::new(
            HeadlessScene::new(camera),
            ConsoleDisplay::new(out),
            config.scene.clone(),
            Viewport::new(width, height),
        );
        let (results_tx, results_rx) = crossbeam_channel::unbounded();
        Self {
            context,
            client: FeedClient::from_config(&config.feed),
            runtime,
            results_tx,
            results_rx,
            frames: FrameLoop::new(),
            in_flight: 0,
        }
    }

    pub fn context(&self) -> &SceneContext<HeadlessScene, ConsoleDisplay<W>> {
        &self.context
    }

    /// Fetches started whose results have not been drained yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching `date`. Any earlier fetch still in flight becomes stale.
    ///
    /// An invalid date is reported right away and returns `None`; no request
    /// is made and fetches in flight are left alone.
    pub fn submit(&mut self, date: &str) -> Option<FetchGeneration> {
        let request = match FeedRequest::single(date) {
            Ok(request) => request,
            Err(error) => {
                self.context.reject_submission(&error);
                return None;
            }
        };
        let generation = self.context.begin_fetch();
        info!(date, ?generation, "submitting date");

        let client = self.client.clone();
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch(&request).await.map_err(FeedError::from);
            // The viewer may have shut down; nothing to deliver to.
            let _ = tx.send((generation, result));
        });
        self.in_flight += 1;
        Some(generation)
    }

    /// Apply every fetch result that has arrived. Returns how many were
    /// received, stale ones included.
    pub fn drain_results(&mut self) -> usize {
        let mut received = 0;
        while let Ok((generation, result)) = self.results_rx.try_recv() {
            received += 1;
            self.in_flight = self.in_flight.saturating_sub(1);
            match self.context.apply_fetch(generation, result) {
                ApplyOutcome::Applied { count, skipped } => {
                    info!(count, skipped, "asteroid batch applied");
                }
                outcome => debug!(?outcome, ?generation, "fetch result handled"),
            }
        }
        received
    }

    /// Act on one console command. `Break` means the user asked to quit.
    pub fn handle(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Submit(date) => {
                self.submit(&date);
            }
            Command::Move(x, y) => {
                self.context.pointer_move(x, y);
            }
            Command::Click(x, y) => {
                self.context.click(x, y);
            }
            Command::Touch(x, y) => {
                self.context.touch_start(x, y);
            }
            Command::Orbit(yaw, pitch) => {
                self.context.orbit_camera(yaw.to_radians(), pitch.to_radians());
            }
            Command::Resize(width, height) => self.context.resize(width, height),
            Command::Help => self.context.display_mut().print(HELP),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply arrived results, advance the animation in fixed steps, draw.
    pub fn frame(&mut self) {
        self.drain_results();

        for _ in 0..self.frames.tick() {
            self.context.advance(FIXED_DT as f32);
        }
        self.context.render();
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};
    use tiny_http::{Response, Server};

    const BATCH: &str = r#"{
        "element_count": 2,
        "near_earth_objects": {
            "2015-09-07": [
                {
                    "name": "Test-1",
                    "is_potentially_hazardous_asteroid": true,
                    "estimated_diameter": {
                        "feet": { "estimated_diameter_min": 300, "estimated_diameter_max": 700 }
                    },
                    "close_approach_data": [{
                        "miss_distance": { "miles": "1000000" },
                        "relative_velocity": { "miles_per_hour": "25000" }
                    }]
                },
                {
                    "name": "(2015 RC)",
                    "is_potentially_hazardous_asteroid": false,
                    "estimated_diameter": {
                        "feet": { "estimated_diameter_min": 80, "estimated_diameter_max": 112 }
                    },
                    "close_approach_data": [{
                        "miss_distance": { "miles": "24522" },
                        "relative_velocity": { "miles_per_hour": "43950" }
                    }]
                }
            ]
        }
    }"#;

    fn serve(status: u16, body: &'static str) -> String {
        serve_after(Duration::ZERO, status, body)
    }

    /// Like [`serve`], but each response waits `delay` first.
    fn serve_after(delay: Duration, status: u16, body: &'static str) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            for request in server.incoming_requests() {
                thread::sleep(delay);
                let _ = request.respond(Response::from_string(body).with_status_code(status));
            }
        });
        format!("http://127.0.0.1:{port}")
    }

    fn viewer(base_url: String, runtime: &tokio::runtime::Runtime) -> Viewer<Vec<u8>> {
        let mut config = Config::default();
        config.feed.base_url = base_url;
        config.feed.timeout_seconds = 5;
        config.scene.seed = Some(7);
        Viewer::new(&config, Vec::new(), runtime.handle().clone())
    }

    fn settle(viewer: &mut Viewer<Vec<u8>>) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while viewer.in_flight() > 0 {
            assert!(Instant::now() < deadline, "fetch did not complete");
            viewer.frame();
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn output(viewer: &Viewer<Vec<u8>>) -> String {
        String::from_utf8(viewer.context().display().get_ref().clone()).unwrap()
    }

    #[test]
    fn test_submit_populates_scene() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);

        viewer.submit("2015-09-07");
        settle(&mut viewer);

        assert_eq!(viewer.context().asteroid_count(), 2);
        assert!(output(&viewer).contains("Asteroid Count: 2"));
        assert!(viewer.frame_count() > 0);
    }

    #[test]
    fn test_second_submit_makes_first_stale() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);

        viewer.submit("2015-09-07");
        viewer.submit("2015-09-07");
        settle(&mut viewer);

        assert_eq!(output(&viewer).matches("Asteroid Count").count(), 1);
        assert_eq!(viewer.context().asteroid_count(), 2);
    }

    #[test]
    fn test_not_found_reports_apology() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(404, "{}"), &runtime);

        viewer.submit("2015-09-07");
        settle(&mut viewer);

        assert_eq!(viewer.context().asteroid_count(), 0);
        assert!(output(&viewer).contains("lost in space"));
    }

    #[test]
    fn test_invalid_date_reported_without_scene_change() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);

        assert!(viewer.handle(Command::Submit("1850-01-01".into())).is_continue());
        assert_eq!(viewer.in_flight(), 0);
        viewer.frame();

        assert_eq!(viewer.context().asteroid_count(), 0);
        assert_eq!(
            output(&viewer),
            "Please choose a date after the year 1900 (got 1850)\n"
        );
    }

    #[test]
    fn test_invalid_submit_does_not_cancel_pending_fetch() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(
            serve_after(Duration::from_millis(300), 200, BATCH),
            &runtime,
        );

        assert!(viewer.submit("2015-09-07").is_some());
        assert!(viewer.submit("1850-01-01").is_none());
        assert!(viewer.submit("").is_none());
        settle(&mut viewer);

        assert_eq!(viewer.context().asteroid_count(), 2);
        let text = output(&viewer);
        assert!(text.contains("Please choose a date after the year 1900"));
        assert!(text.contains("Please enter a valid date"));
        assert!(text.contains("Asteroid Count: 2"));
        assert!(!text.contains("lost in space"));
    }

    #[test]
    fn test_help_goes_to_viewer_output() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);
        assert!(viewer.handle(Command::Help).is_continue());
        assert!(output(&viewer).starts_with("commands:"));
    }

    #[test]
    fn test_orbit_command_moves_camera() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);
        assert!(viewer.handle(Command::Orbit(90.0, 0.0)).is_continue());
        let camera = viewer.context().backend().camera();
        assert!((camera.position.x - 40.0).abs() < 1e-3);
        assert!(camera.position.z.abs() < 1e-3);
    }

    #[test]
    fn test_quit_breaks() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut viewer = viewer(serve(200, BATCH), &runtime);
        assert!(viewer.handle(Command::Click(0.0, 0.0)).is_continue());
        assert!(viewer.handle(Command::Quit).is_break());
    }
}
