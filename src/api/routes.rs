use super::errors::ApiResponseError;
use super::requests::SimulationRequest;

use crate::actors::runner::{RunSimulation, SimulationRunner};
use crate::catalog;
use crate::errors::ServiceError;

use actix::Addr;
use actix_cors::Cors;
use actix_web::{
    get,
    http::header,
    post,
    web::{self, Data, Json},
    HttpResponse, Responder, Result,
};

#[get("ping")]
async fn ping() -> Result<impl Responder> {
    Ok(HttpResponse::Ok().finish())
}

#[get("config/algorithms")]
async fn algorithms() -> Result<impl Responder> {
    Ok(Json(catalog::algorithms()))
}

#[get("config/distributions")]
async fn distributions() -> Result<impl Responder> {
    Ok(Json(catalog::distributions()))
}

#[post("simulations")]
async fn run_simulation(
    runner: Data<Addr<SimulationRunner>>,
    request: Json<SimulationRequest>,
) -> Result<impl Responder> {
    let response = runner
        .send(RunSimulation {
            request: request.into_inner(),
        })
        .await
        .map_err(|err| ServiceError::Mailbox {
            actor: "SimulationRunner",
            source: err,
        })
        .map_err(ApiResponseError::from)?
        .map_err(ServiceError::from)
        .map_err(ApiResponseError::from)?;

    Ok(Json(response))
}

/// Malformed bodies get the same JSON error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _| ApiResponseError::InvalidPayload(err.to_string()).into())
}

/// Browser access for the configured frontend origins.
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Routes served under the configured API prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(algorithms)
        .service(distributions)
        .service(run_simulation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    use actix::SyncArbiter;
    use actix_web::{
        http::{Method, StatusCode},
        test, App,
    };
    use serde_json::{json, Value};

    const FRONTEND: &str = "http://localhost:5173";

    fn start_runner() -> Addr<SimulationRunner> {
        SyncArbiter::start(1, || {
            SimulationRunner::new(SimulationConfig {
                max_steps: 1_000,
                max_runs: 20,
                max_setups: 3,
            })
        })
    }

    macro_rules! make_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(start_runner()))
                    .app_data(json_config())
                    .wrap(cors(&[FRONTEND.to_string()]))
                    .service(ping)
                    .service(web::scope("/api/v1").configure(configure)),
            )
            .await
        };
    }

    fn two_arm_problem() -> Value {
        json!({"arms": [
            {"distribution": {"id": "bernoulli", "params": {"p": 0.3}}},
            {"distribution": {"id": "bernoulli", "params": {"p": 0.7}}}
        ]})
    }

    #[actix_web::test]
    async fn ping_route() {
        let app = make_app!();
        let req = test::TestRequest::get().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn allows_frontend_preflight() {
        let app = make_app!();
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/simulations")
            .insert_header((header::ORIGIN, FRONTEND))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(FRONTEND)
        );
        let methods = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(methods.contains("POST"));
    }

    #[actix_web::test]
    async fn tags_frontend_responses() {
        let app = make_app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/config/algorithms")
            .insert_header((header::ORIGIN, FRONTEND))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(FRONTEND)
        );
    }

    #[actix_web::test]
    async fn lists_catalog() {
        let app = make_app!();

        let req = test::TestRequest::get()
            .uri("/api/v1/config/algorithms")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[1]["id"], "ucb1");

        let req = test::TestRequest::get()
            .uri("/api/v1/config/distributions")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["id"], "bernoulli");
    }

    #[actix_web::test]
    async fn runs_simulation() {
        let app = make_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": two_arm_problem(),
                "setups": [
                    {"setup_id": "greedy", "algorithm": {"id": "epsilon_greedy", "params": {"epsilon": 0.0}}},
                    {"setup_id": "ucb", "algorithm": {"id": "ucb1", "params": {"c": 1.414}}},
                    {"setup_id": "unknown", "algorithm": {"id": "softmax", "params": {}}}
                ],
                "num_steps": 1,
                "seed": 42
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);

        let greedy = &results[0];
        assert_eq!(greedy["setup_id"], "greedy");
        assert_eq!(greedy["metrics"]["steps"], json!([0]));
        assert_eq!(greedy["metrics"]["raw_data_available"], true);
        assert!(greedy["metrics"].get("stddev_cumulative_reward").is_none());
        assert_eq!(greedy["metrics"]["avg_arm_counts"][0]["arm_index"], 0);
        assert_eq!(greedy["metrics"]["avg_arm_counts"][0]["count"], 1.0);
        let regret = greedy["summary"]["final_regret"].as_f64().unwrap();
        assert!((regret - 0.4).abs() < 1e-9);

        assert_eq!(results[1]["setup_id"], "ucb");
        assert!(results[1].get("metrics").is_some());

        assert_eq!(results[2]["setup_id"], "unknown");
        assert!(results[2]["error"].as_str().unwrap().contains("softmax"));
    }

    #[actix_web::test]
    async fn multiple_runs_report_stddev() {
        let app = make_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": two_arm_problem(),
                "setups": [{"setup_id": "ts", "algorithm": {"id": "thompson_sampling", "params": {}}}],
                "num_steps": 25,
                "num_runs": 4
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let metrics = &body["results"][0]["metrics"];

        assert_eq!(metrics["stddev_cumulative_reward"].as_array().map(Vec::len), Some(25));
        assert_eq!(metrics["stddev_cumulative_regret"].as_array().map(Vec::len), Some(25));
        assert_eq!(metrics["stddev_average_reward"].as_array().map(Vec::len), Some(25));
    }

    #[actix_web::test]
    async fn rejects_bad_requests() {
        let app = make_app!();

        let unknown_distribution = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": {"arms": [
                    {"distribution": {"id": "bernoulli", "params": {}}},
                    {"distribution": {"id": "cauchy", "params": {}}}
                ]},
                "setups": [{"setup_id": "a", "algorithm": {"id": "ucb1", "params": {}}}],
                "num_steps": 10
            }))
            .to_request();
        let resp = test::call_service(&app, unknown_distribution).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("cauchy"));

        let too_many_steps = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": two_arm_problem(),
                "setups": [{"setup_id": "a", "algorithm": {"id": "ucb1", "params": {}}}],
                "num_steps": 5_000
            }))
            .to_request();
        let resp = test::call_service(&app, too_many_steps).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let too_many_setups = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": two_arm_problem(),
                "setups": (0..4)
                    .map(|i| json!({"setup_id": format!("ucb-{i}"), "algorithm": {"id": "ucb1", "params": {}}}))
                    .collect::<Vec<_>>(),
                "num_steps": 10
            }))
            .to_request();
        let resp = test::call_service(&app, too_many_setups).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("setups"));

        let zero_steps = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({
                "bandit_problem": two_arm_problem(),
                "setups": [{"setup_id": "a", "algorithm": {"id": "ucb1", "params": {}}}],
                "num_steps": 0
            }))
            .to_request();
        let resp = test::call_service(&app, zero_steps).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let malformed = test::TestRequest::post()
            .uri("/api/v1/simulations")
            .set_json(json!({"setups": [], "num_steps": -3}))
            .to_request();
        let resp = test::call_service(&app, malformed).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().is_some());
    }
}
