use crate::gui_bridge::model::ViewState;
use eegviscore::records::{Electrode, Model};
use eegviscore::{ScrollVis, VisError};
use serde::Deserialize;
use serde_json::json;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter, Rejection, Reply};

/// The scene is shared by every request; the lock serializes them so the
/// controller still sees one event at a time.
pub type SharedVis = Arc<RwLock<ScrollVis>>;

pub fn gui_bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[derive(Debug)]
enum BridgeError {
    Rejected(String),
    Missing(&'static str),
    Poisoned,
}

impl warp::reject::Reject for BridgeError {}

impl From<VisError> for BridgeError {
    fn from(err: VisError) -> Self {
        BridgeError::Rejected(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct IndexRequest {
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ElectrodeRequest {
    electrode: Electrode,
}

#[derive(Debug, Deserialize)]
struct TickRequest {
    elapsed_ms: u64,
}

fn read_vis<T>(
    state: &SharedVis,
    op: impl FnOnce(&ScrollVis) -> Result<T, BridgeError>,
) -> Result<T, Rejection> {
    let guard = state
        .read()
        .map_err(|_| warp::reject::custom(BridgeError::Poisoned))?;
    op(&*guard).map_err(warp::reject::custom)
}

fn write_vis<T>(
    state: &SharedVis,
    op: impl FnOnce(&mut ScrollVis) -> Result<T, BridgeError>,
) -> Result<T, Rejection> {
    let mut guard = state
        .write()
        .map_err(|_| warp::reject::custom(BridgeError::Poisoned))?;
    op(&mut *guard).map_err(warp::reject::custom)
}

fn svg_reply(svg: String) -> impl Reply {
    warp::reply::with_header(svg, "content-type", "image/svg+xml")
}

/// Every endpoint of the bridge, without rejection handling.
pub fn routes(
    state: SharedVis,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let scene_route = warp::path!("scene")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(|state: SharedVis| async move {
            let svg = read_vis(&state, |vis| Ok(vis.to_svg()?))?;
            Ok::<_, Rejection>(svg_reply(svg))
        });

    let animation_route = warp::path!("animation")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(|state: SharedVis| async move {
            let svg = read_vis(&state, |vis| {
                vis.animation_svg().ok_or(BridgeError::Missing("animation"))
            })?;
            Ok::<_, Rejection>(svg_reply(svg))
        });

    let state_route = warp::path!("state")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(|state: SharedVis| async move {
            let view = read_vis(&state, |vis| Ok(ViewState::capture(vis)))?;
            Ok::<_, Rejection>(warp::reply::json(&view))
        });

    let activate_route = warp::path!("activate")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(|request: IndexRequest, state: SharedVis| async move {
            let activation = write_vis(&state, |vis| Ok(vis.activate(request.index)?))?;
            Ok::<_, Rejection>(warp::reply::json(&activation))
        });

    let model_route = warp::path!("model")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(|request: IndexRequest, state: SharedVis| async move {
            let view = write_vis(&state, |vis| {
                let model = Model::from_index(request.index).ok_or_else(|| {
                    BridgeError::Rejected(format!("unknown model index {}", request.index))
                })?;
                vis.select_model(model)?;
                Ok(ViewState::capture(vis))
            })?;
            Ok::<_, Rejection>(warp::reply::json(&view))
        });

    let electrode_route = warp::path!("electrode")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(|request: ElectrodeRequest, state: SharedVis| async move {
            let view = write_vis(&state, |vis| {
                vis.select_electrode(request.electrode)?;
                Ok(ViewState::capture(vis))
            })?;
            Ok::<_, Rejection>(warp::reply::json(&view))
        });

    let tick_route = warp::path!("tick")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .and_then(|request: TickRequest, state: SharedVis| async move {
            let view = write_vis(&state, |vis| {
                vis.advance(request.elapsed_ms)?;
                Ok(ViewState::capture(vis))
            })?;
            Ok::<_, Rejection>(warp::reply::json(&view))
        });

    scene_route
        .or(animation_route)
        .or(state_route)
        .or(activate_route)
        .or(model_route)
        .or(electrode_route)
        .or(tick_route)
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(bridge) = err.find::<BridgeError>() {
        match bridge {
            BridgeError::Rejected(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            BridgeError::Missing(what) => (StatusCode::NOT_FOUND, format!("no {} loaded", what)),
            BridgeError::Poisoned => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "scene lock poisoned".to_string(),
            ),
        }
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "no such route".to_string())
    } else {
        (StatusCode::BAD_REQUEST, format!("{:?}", err))
    };
    log::warn!("bridge request failed: {}", message);
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "status": "error", "message": message })),
        status,
    ))
}

/// Bridge that hosts the HTTP endpoint driving the shared scene.
pub struct GuiBridge {
    state: SharedVis,
}

impl GuiBridge {
    pub fn new(vis: ScrollVis) -> Self {
        Self {
            state: Arc::new(RwLock::new(vis)),
        }
    }

    pub fn shared(&self) -> SharedVis {
        self.state.clone()
    }

    /// Serves the routes on a background thread with its own runtime.
    pub fn spawn(&self, address: SocketAddr) -> thread::JoinHandle<()> {
        let routes = routes(self.shared()).recover(handle_rejection);
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        })
    }

    pub fn publish_status(&self, message: &str) {
        log::info!("{}", message);
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> anyhow::Result<ViewState> {
        let guard = self
            .state
            .read()
            .map_err(|_| anyhow::anyhow!("scene lock poisoned"))?;
        Ok(ViewState::capture(&guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{write_dataset, GeneratorConfig};
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use eegviscore::SectionState;
    use tempfile::tempdir;

    fn bridge() -> GuiBridge {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            samples: 40,
            segments: 20,
            ..Default::default()
        };
        write_dataset(dir.path(), &config).unwrap();
        let cfg = WorkflowConfig::from_args(dir.path().to_path_buf(), dir.path().join("frames"));
        GuiBridge::new(Runner::new(cfg).prepare().unwrap())
    }

    #[tokio::test]
    async fn activate_moves_the_shared_scene() {
        let gui = bridge();
        let filter = routes(gui.shared()).recover(handle_rejection);
        let response = warp::test::request()
            .method("POST")
            .path("/activate")
            .json(&json!({ "index": 3 }))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["replayed"], json!([0, 1, 2, 3]));

        let view = gui.snapshot().unwrap();
        assert_eq!(view.last_section, Some(3));
        assert_eq!(view.state, Some(SectionState::CleanSeries));
    }

    #[tokio::test]
    async fn unknown_model_is_a_bad_request() {
        let gui = bridge();
        let filter = routes(gui.shared()).recover(handle_rejection);
        let response = warp::test::request()
            .method("POST")
            .path("/model")
            .json(&json!({ "index": 9 }))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(gui.snapshot().unwrap().model, Some(Model::LogisticRegression));
    }

    #[tokio::test]
    async fn electrode_switch_and_scene_fetch() {
        let gui = bridge();
        let filter = routes(gui.shared()).recover(handle_rejection);
        let response = warp::test::request()
            .method("POST")
            .path("/electrode")
            .json(&json!({ "electrode": "AF7" }))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = warp::test::request()
            .method("GET")
            .path("/scene")
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let svg = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(svg.contains("Electrode AF7"));
    }

    #[tokio::test]
    async fn tick_reports_settled_transitions() {
        let gui = bridge();
        let filter = routes(gui.shared()).recover(handle_rejection);
        warp::test::request()
            .method("POST")
            .path("/activate")
            .json(&json!({ "index": 2 }))
            .reply(&filter)
            .await;
        assert!(gui.snapshot().unwrap().pending_transitions > 0);
        let response = warp::test::request()
            .method("POST")
            .path("/tick")
            .json(&json!({ "elapsed_ms": 10_000 }))
            .reply(&filter)
            .await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["pending_transitions"], json!(0));
    }
}
