//! Shared state, playback ticker and the HTTP server itself.

use std::sync::Arc;
use std::time::Duration;

use algoviz_engine::PlaybackStatus;
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{Mutex, RwLock};

use crate::api::build_router;
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::session::{random_input, Control, RunStatus, Session};
use crate::storage::{AlgorithmStore, MemoryStore};

/// Shared application state.
pub struct AppState {
    store: Arc<dyn AlgorithmStore>,
    config: ServerConfig,
    run: RwLock<Option<Session>>,
    rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn AlgorithmStore>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            config,
            run: RwLock::new(None),
            rng: Mutex::new(rng),
        }
    }

    /// State backed by the built-in catalog. The config is validated first.
    pub fn seeded(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, Arc::new(MemoryStore::seeded()?)))
    }

    pub fn store(&self) -> &dyn AlgorithmStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Replace the current run with a fresh one on new random input.
    pub async fn start_run(&self, algorithm_id: &str) -> Result<RunStatus> {
        let algorithm = self
            .store
            .get(algorithm_id)
            .ok_or_else(Error::algorithm_not_found)?;

        let input = {
            let mut rng = self.rng.lock().await;
            random_input(algorithm.kind(), &self.config, &mut *rng)
        };

        let session = Session::start(&algorithm, input);
        let status = session.status();
        let replaced = {
            let mut run = self.run.write().await;
            Option::replace(&mut *run, session)
        };
        if let Some(previous) = replaced {
            tracing::info!(previous = previous.algorithm_id(), next = %algorithm.id, "run replaced");
        }
        Ok(status)
    }

    /// Read from the current run.
    pub async fn with_run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session) -> Result<T>,
    {
        let run = self.run.read().await;
        let session = run.as_ref().ok_or_else(Error::no_active_run)?;
        f(session)
    }

    /// Apply a playback command to the current run.
    pub async fn control(&self, control: Control) -> Result<PlaybackStatus> {
        let mut run = self.run.write().await;
        let session = run.as_mut().ok_or_else(Error::no_active_run)?;
        Ok(session.apply(control))
    }

    /// One timer advance of the current run, if it is playing.
    pub async fn tick(&self) -> bool {
        let mut run = self.run.write().await;
        match run.as_mut() {
            Some(session) if session.is_playing() => session.tick(),
            _ => false,
        }
    }

    /// Delay before the next tick at the current run's speed.
    pub async fn tick_interval(&self) -> Duration {
        let run = self.run.read().await;
        let ms = match run.as_ref() {
            Some(session) => session.playback().speed().ms_per_step(self.config.tick_ms),
            None => self.config.tick_ms,
        };
        Duration::from_millis(ms.max(1))
    }
}

/// Advance playback forever at the configured interval.
///
/// Holds no state of its own between iterations, so aborting the task at
/// any await point is safe.
pub async fn run_ticker(state: Arc<AppState>) {
    loop {
        let interval = state.tick_interval().await;
        tokio::time::sleep(interval).await;
        state.tick().await;
    }
}

/// Algorithm visualization server.
pub struct AlgovizServer {
    state: Arc<AppState>,
}

impl AlgovizServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address, start the ticker and serve until shutdown.
    pub async fn serve(self) -> Result<()> {
        let addr = self.state.config().api_addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Algoviz server running on http://{}", addr);

        let ticker = tokio::spawn(run_ticker(self.state.clone()));
        let served = axum::serve(listener, self.router()).await;
        ticker.abort();

        served?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_engine::{PlaybackSpeed, PlaybackState, RunInput};

    fn test_state() -> AppState {
        let config = ServerConfig {
            seed: Some(7),
            array_len: 6,
            ..ServerConfig::default()
        };
        AppState::seeded(config).unwrap()
    }

    #[test]
    fn no_run_until_started() {
        tokio_test::block_on(async {
            let state = test_state();
            let err = state.with_run(|s| Ok(s.status())).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)));
            assert!(state.control(Control::Play).await.is_err());
            assert!(!state.tick().await);
        });
    }

    #[test]
    fn oversized_config_rejected() {
        let config = ServerConfig {
            grid_width: usize::MAX,
            grid_height: 2,
            ..ServerConfig::default()
        };
        assert!(matches!(AppState::seeded(config), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_algorithm_not_found() {
        tokio_test::block_on(async {
            let err = test_state().start_run("bogo-sort").await.unwrap_err();
            assert_eq!(err.to_string(), "Algorithm not found");
        });
    }

    #[test]
    fn start_run_uses_configured_input() {
        tokio_test::block_on(async {
            let state = test_state();
            let status = state.start_run("bubble-sort").await.unwrap();
            assert_eq!(status.algorithm_id, "bubble-sort");
            assert_eq!(status.playback.position, -1);

            let input = state.with_run(|s| Ok(s.input().clone())).await.unwrap();
            match input {
                RunInput::Sequence(values) => {
                    assert_eq!(values.len(), 6);
                    assert!(values.iter().all(|v| (5..=100).contains(v)));
                }
                other => panic!("expected sequence, got {other:?}"),
            }

            state.start_run("a-star").await.unwrap();
            let input = state.with_run(|s| Ok(s.input().clone())).await.unwrap();
            assert_eq!(input, RunInput::Grid { width: 10, height: 10 });
        });
    }

    #[test]
    fn same_seed_same_first_run() {
        tokio_test::block_on(async {
            let a = test_state();
            let b = test_state();
            a.start_run("heap-sort").await.unwrap();
            b.start_run("heap-sort").await.unwrap();
            let input_a = a.with_run(|s| Ok(s.input().clone())).await.unwrap();
            let input_b = b.with_run(|s| Ok(s.input().clone())).await.unwrap();
            assert_eq!(input_a, input_b);
        });
    }

    #[test]
    fn tick_only_advances_playing_run() {
        tokio_test::block_on(async {
            let state = test_state();
            state.start_run("selection-sort").await.unwrap();
            assert!(!state.tick().await);

            state.control(Control::Play).await.unwrap();
            assert!(state.tick().await);
            assert!(state.tick().await);
            let position = state
                .with_run(|s| Ok(s.playback().position()))
                .await
                .unwrap();
            assert_eq!(position, 1);

            while state.tick().await {}
            let status = state.with_run(|s| Ok(s.status())).await.unwrap();
            assert_eq!(status.playback.state, PlaybackState::Finished);
        });
    }

    #[test]
    fn interval_follows_speed() {
        tokio_test::block_on(async {
            let state = test_state();
            assert_eq!(state.tick_interval().await, Duration::from_millis(1000));

            state.start_run("bubble-sort").await.unwrap();
            state
                .control(Control::Speed(PlaybackSpeed::new(4.0)))
                .await
                .unwrap();
            assert_eq!(state.tick_interval().await, Duration::from_millis(250));
        });
    }

    #[test]
    fn new_run_replaces_old() {
        tokio_test::block_on(async {
            let state = test_state();
            state.start_run("bubble-sort").await.unwrap();
            state.control(Control::Seek(3)).await.unwrap();

            let status = state.start_run("heap-sort").await.unwrap();
            assert_eq!(status.algorithm_id, "heap-sort");
            let current = state
                .with_run(|s| Ok(s.algorithm_id().to_string()))
                .await
                .unwrap();
            assert_eq!(current, "heap-sort");
            assert_eq!(status.playback.position, -1);
            assert_eq!(status.playback.state, PlaybackState::Stopped);
        });
    }
}
