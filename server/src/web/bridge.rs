use crate::web::model::{PageModel, StatusReply};
use crate::web::page::Pages;
use crate::workflow::runner::Runner;
use anyhow::Context;
use log::{debug, info, warn};
use std::future::{self, Future};
use std::{collections::HashMap, io, net::SocketAddr, sync::Arc};
use tokio::runtime::Builder;
use tokio::signal;
use warp::filters::body::BodyDeserializeError;
use warp::reply::{Json, WithStatus};
use warp::{http::StatusCode, Filter, Rejection, Reply};
use winequality::dataset::ReferenceSample;
use winequality::{FeatureRecord, FormInput, FormState, WineError, FIELD_SPECS};

const FORM_LIMIT: u64 = 16 * 1024;

/// Shared, read-only handles every handler receives.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<Runner>,
    pub sample: Arc<ReferenceSample>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(runner: Runner, sample: ReferenceSample) -> anyhow::Result<Self> {
        let pages = Pages::new().context("compiling page templates")?;
        Ok(Self {
            runner: Arc::new(runner),
            sample: Arc::new(sample),
            pages: Arc::new(pages),
        })
    }
}

#[derive(Debug)]
struct PageFailure {
    status: StatusCode,
    message: String,
}

impl warp::reject::Reject for PageFailure {}

#[derive(Debug)]
struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl warp::reject::Reject for ApiFailure {}

fn status_for(err: &WineError) -> StatusCode {
    match err {
        WineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn page_failure(err: WineError) -> Rejection {
    warn!("page render failed: {}", err);
    warp::reject::custom(PageFailure {
        status: status_for(&err),
        message: err.to_string(),
    })
}

fn render_failure(err: minijinja::Error) -> Rejection {
    warn!("template render failed: {}", err);
    warp::reject::custom(PageFailure {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("page could not be rendered: {}", err),
    })
}

fn api_failure(err: WineError) -> Rejection {
    warn!("api request failed: {}", err);
    warp::reject::custom(ApiFailure {
        status: status_for(&err),
        message: err.to_string(),
    })
}

async fn index_page(state: AppState) -> Result<impl Reply, Rejection> {
    let form = FormInput::default();
    let form_state = FormState::AwaitingSubmission;
    let html = state
        .pages
        .render_page(&PageModel::new(&state.sample, &form, &form_state))
        .map_err(render_failure)?;
    Ok(warp::reply::html(html))
}

async fn submit_page(
    fields: HashMap<String, String>,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let form = FormInput::from_form(&fields).map_err(page_failure)?;
    let outcome = state.runner.submit(&form).map_err(page_failure)?;
    info!("form submission -> {}", outcome.record.prediction);
    debug!("submitted by {} {}", form.name, form.surname);
    let form_state = FormState::Submitted(Box::new(outcome));
    let html = state
        .pages
        .render_page(&PageModel::new(&state.sample, &form, &form_state))
        .map_err(render_failure)?;
    Ok(warp::reply::html(html))
}

async fn predict_api(record: FeatureRecord, state: AppState) -> Result<impl Reply, Rejection> {
    let result = state.runner.predict(&record).map_err(api_failure)?;
    Ok(warp::reply::json(&result))
}

async fn submit_api(input: FormInput, state: AppState) -> Result<impl Reply, Rejection> {
    let outcome = state.runner.submit(&input).map_err(api_failure)?;
    Ok(warp::reply::json(&outcome))
}

async fn handle_page_rejection(
    err: Rejection,
    pages: Arc<Pages>,
) -> Result<Box<dyn Reply>, Rejection> {
    let Some(failure) = err.find::<PageFailure>() else {
        return Err(err);
    };
    match pages.render_error(&failure.message) {
        Ok(html) => Ok(Box::new(warp::reply::with_status(
            warp::reply::html(html),
            failure.status,
        ))),
        Err(render_err) => {
            warn!("error page render failed: {}", render_err);
            Ok(Box::new(warp::reply::with_status(
                failure.message.clone(),
                failure.status,
            )))
        }
    }
}

/// API failures always answer with a JSON `StatusReply`.
async fn handle_api_rejection(err: Rejection) -> Result<WithStatus<Json>, Rejection> {
    let (status, message) = if let Some(failure) = err.find::<ApiFailure>() {
        (failure.status, failure.message.clone())
    } else if let Some(body_err) = err.find::<BodyDeserializeError>() {
        warn!("api request body rejected: {}", body_err);
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else {
        return Err(err);
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&StatusReply::error(message)),
        status,
    ))
}

/// Page routes plus the JSON API used by the desktop client.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let pages = state.pages.clone();
    let state_filter = warp::any().map(move || state.clone());

    let index = warp::path::end()
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(index_page);

    let submit = warp::path!("submit")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::form())
        .and(state_filter.clone())
        .and_then(submit_page);

    let schema = warp::path!("schema")
        .and(warp::get())
        .map(|| warp::reply::json(&FIELD_SPECS.to_vec()));

    let sample = warp::path!("sample")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: AppState| warp::reply::json(&*state.sample));

    let metrics = warp::path!("metrics")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: AppState| warp::reply::json(&state.runner.metrics()));

    let predict = warp::path!("predict")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(predict_api);

    let submit_json = warp::path!("submit")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::json())
        .and(state_filter)
        .and_then(submit_api);

    let api = warp::path("api")
        .and(
            schema
                .or(sample)
                .or(metrics)
                .or(predict)
                .or(submit_json),
        )
        .recover(handle_api_rejection);

    index
        .or(submit)
        .or(api)
        .recover(move |err: Rejection| handle_page_rejection(err, pages.clone()))
}

/// Resolves once `signal` fires. A listener that cannot be installed leaves
/// the server running instead of shutting it down.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!("cannot listen for Ctrl+C, serving until killed: {}", err);
            future::pending::<()>().await;
        }
    }
}

/// Serves until Ctrl+C.
pub fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating runtime for HTTP server")?;
    runtime.block_on(async move {
        let (bound, server) = warp::serve(routes(state))
            .try_bind_with_graceful_shutdown(addr, shutdown_on(signal::ctrl_c()))
            .with_context(|| format!("binding {}", addr))?;
        info!("serving prediction form on http://{} (Ctrl+C to stop)", bound);
        server.await;
        Ok::<(), anyhow::Error>(())
    })?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::demo::{demo_forest, synthetic_dataset, DemoConfig};
    use crate::web::content;
    use serde_json::Value;
    use std::time::Duration;
    use winequality::dataset::DEFAULT_SAMPLE_SEED;
    use winequality::{Classifier, QualityClass, SubmissionOutcome, WineResult};

    struct Unavailable;

    impl Classifier for Unavailable {
        fn predict(&self, _: &FeatureRecord) -> WineResult<QualityClass> {
            Err(WineError::Prediction("model artifact unavailable".into()))
        }

        fn predict_proba(&self, _: &FeatureRecord) -> WineResult<[f64; 2]> {
            Err(WineError::Prediction("model artifact unavailable".into()))
        }
    }

    fn state_with(classifier: Arc<dyn Classifier>) -> AppState {
        let forest = demo_forest().unwrap();
        let dataset = synthetic_dataset(&forest, &DemoConfig::default()).unwrap();
        let sample = ReferenceSample::draw(&dataset, 5, DEFAULT_SAMPLE_SEED).unwrap();
        AppState::new(Runner::new(classifier), sample).unwrap()
    }

    fn demo_state() -> AppState {
        state_with(Arc::new(demo_forest().unwrap()))
    }

    fn body_text(body: &[u8]) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_awaits_submission() {
        let api = routes(demo_state());
        let res = warp::test::request().method("GET").path("/").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res.body());
        assert!(body.contains(content::SUBMIT_PROMPT));
        assert!(!body.contains(content::OUTCOME_INFO));
    }

    #[tokio::test]
    async fn form_post_renders_results() {
        let state = demo_state();
        let api = routes(state.clone());
        let res = warp::test::request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Ada&surname=Lovelace&alcohol=13.5&volatile_acidity=0.3&sulphates=0.8")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res.body());
        assert!(body.contains(content::OUTCOME_INFO));
        assert!(body.contains("<td>High Quality</td>"));
        assert!(body.contains("<td>Ada</td><td>Lovelace</td>"));
        assert_eq!(state.runner.metrics().submissions, 1);
    }

    #[tokio::test]
    async fn non_numeric_form_field_is_a_bad_request() {
        let api = routes(demo_state());
        let res = warp::test::request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("alcohol=plenty")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res.body()).contains("alcohol is not a number"));
    }

    #[tokio::test]
    async fn classifier_failure_surfaces_as_error_page() {
        let api = routes(state_with(Arc::new(Unavailable)));
        let res = warp::test::request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Ada")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(res.body()).contains("model artifact unavailable"));
    }

    #[tokio::test]
    async fn predict_api_returns_label_and_probabilities() {
        let api = routes(demo_state());
        let res = warp::test::request()
            .method("POST")
            .path("/api/predict")
            .json(&FeatureRecord::maximum())
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        let label = json["label"].as_u64().unwrap();
        assert!(label == 0 || label == 1);
        let proba: Vec<f64> = serde_json::from_value(json["probabilities"].clone()).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() <= 0.01);
    }

    #[tokio::test]
    async fn submit_api_reports_failures_as_json() {
        let api = routes(state_with(Arc::new(Unavailable)));
        let res = warp::test::request()
            .method("POST")
            .path("/api/submit")
            .json(&FormInput::default())
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn sample_and_schema_are_exposed() {
        let api = routes(demo_state());
        let res = warp::test::request().path("/api/sample").reply(&api).await;
        let sample: ReferenceSample = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(sample.len(), 5);
        assert_eq!(sample.seed, DEFAULT_SAMPLE_SEED);

        let res = warp::test::request().path("/api/schema").reply(&api).await;
        let schema: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(schema.as_array().unwrap().len(), 11);
        assert_eq!(schema[7]["name"], "density");
    }

    #[tokio::test]
    async fn malformed_api_body_is_a_json_bad_request() {
        let api = routes(demo_state());
        let res = warp::test::request()
            .method("POST")
            .path("/api/predict")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("deserialize"));
    }

    #[tokio::test]
    async fn api_fills_missing_features_like_the_form() {
        let state = demo_state();
        let api = routes(state.clone());
        let res = warp::test::request()
            .method("POST")
            .path("/api/submit")
            .json(&serde_json::json!({"name": "Ada", "features": {"alcohol": 12.0}}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let outcome: SubmissionOutcome = serde_json::from_slice(res.body()).unwrap();
        let mut expected = FeatureRecord::minimum();
        expected.alcohol = 12.0;
        assert_eq!(outcome.record.features, expected);

        let res = warp::test::request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Ada&alcohol=12.0")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cell = format!("<td>{}</td>", outcome.record.prediction);
        assert!(body_text(res.body()).contains(&cell));
    }

    #[tokio::test]
    async fn failed_signal_listener_keeps_serving() {
        let broken = async { Err(io::Error::new(io::ErrorKind::Other, "no signal driver")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown_on(broken)).await;
        assert!(waited.is_err());

        let delivered = tokio::time::timeout(
            Duration::from_millis(50),
            shutdown_on(async { Ok::<(), io::Error>(()) }),
        )
        .await;
        assert!(delivered.is_ok());
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let api = routes(demo_state());
        let res = warp::test::request().path("/nowhere").reply(&api).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = warp::test::request().path("/api/nowhere").reply(&api).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
