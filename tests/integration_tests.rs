// Integration tests for the PCOS risk service

use actix_web::{http::StatusCode, test, web, App};
use pcos_risk::core::{FeatureSchema, LIKELY_MESSAGE, UNLIKELY_MESSAGE};
use pcos_risk::routes::{self, AppState};
use pcos_risk::{Classifier, FeatureVector, Label, LogisticModel, ModelRegistry, PredictionError, Predictor, Tier};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Classifier that records every vector it is handed
#[derive(Debug, Default)]
struct SpyClassifier {
    seen: Mutex<Vec<FeatureVector>>,
}

impl Classifier for SpyClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, PredictionError> {
        self.seen.lock().unwrap().push(features.clone());
        Ok(Label::from(features.get("hair growth(Y/N)") == Some(1.0)))
    }
}

fn logistic_model(tier: Tier) -> LogisticModel {
    let schema = FeatureSchema::for_tier(tier);
    let coefficients: Vec<f64> = schema
        .full
        .iter()
        .map(|c| if *c == "Weight gain(Y/N)" { 2.0 } else { 0.0 })
        .collect();
    let artifact = json!({
        "model_id": format!("integration-{}", tier),
        "tier": tier,
        "feature_names": schema.full,
        "coefficients": coefficients,
        "intercept": -1.0,
    });
    LogisticModel::from_json(&artifact.to_string()).unwrap()
}

fn simple_payload() -> Map<String, Value> {
    let payload = json!({
        " Age (yrs)": 28,
        "Weight (Kg)": 62.5,
        "Height(Cm) ": 158.0,
        "BMI": 25.0,
        "Blood Group": 15,
        "Pulse rate(bpm) ": 74,
        "RR (breaths/min)": 18,
        "Cycle(R/I)": 4,
        "Cycle length(days)": 5,
        "Pregnant(Y/N)": 0,
        "No. of aborptions": 0,
        "Hip(inch)": 38,
        "Waist(inch)": 33,
        "Waist:Hip Ratio": 0.87,
        "Weight gain(Y/N)": 1,
        "hair growth(Y/N)": 0,
        "Skin darkening (Y/N)": 0,
        "Hair loss(Y/N)": 1,
        "Pimples(Y/N)": 1,
        "Fast food (Y/N)": 1,
        "Reg.Exercise(Y/N)": 0,
        "BP _Systolic (mmHg)": 110,
        "BP _Diastolic (mmHg)": 80
    });
    match payload {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn enhanced_payload() -> Map<String, Value> {
    let payload = json!({
        " Age (yrs)": 31,
        "Weight (Kg)": 70.2,
        "Height(Cm) ": 161.0,
        "BMI": 27.1,
        "Pulse rate(bpm) ": 72,
        "Hb(g/dl)": 11.5,
        "Cycle(R/I)": 2,
        "Cycle length(days)": 5,
        "No. of aborptions": 0,
        "FSH(mIU/mL)": 5.2,
        "LH(mIU/mL)": 3.1,
        "FSH/LH": 1.68,
        "Hip(inch)": 40,
        "Waist(inch)": 36,
        "Waist:Hip Ratio": 0.9,
        "TSH (mIU/L)": 2.4,
        "AMH(ng/mL)": 6.8,
        "Vit D3 (ng/mL)": 24.0,
        "RBS(mg/dl)": 98,
        "Follicle No. (L)": 12,
        "Follicle No. (R)": 14,
        "Avg. F size (L) (mm)": 16,
        "Avg. F size (R) (mm)": 17,
        "Endometrium (mm)": 8.5,
        "Pregnant(Y/N)": "N",
        "Weight gain(Y/N)": "Y",
        "hair growth(Y/N)": "Y",
        "Skin darkening (Y/N)": "N",
        "Hair loss(Y/N)": "N",
        "Pimples(Y/N)": "Y",
        "Fast food (Y/N)": "N"
    });
    match payload {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn state_with(registry: ModelRegistry) -> web::Data<AppState> {
    web::Data::new(AppState {
        registry: Arc::new(registry),
        predictor: Predictor::default(),
    })
}

fn logistic_registry() -> ModelRegistry {
    ModelRegistry::empty()
        .with_classifier(Tier::Simple, Arc::new(logistic_model(Tier::Simple)))
        .with_classifier(Tier::Enhanced, Arc::new(logistic_model(Tier::Enhanced)))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .configure(routes::configure_routes)
                .default_service(web::to(routes::not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_simple_prediction_end_to_end() {
    let app = app!(state_with(logistic_registry()));

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_json(Value::Object(simple_payload()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    // Weight gain = 1 gives z = 2 - 1 > 0
    assert_eq!(body, json!({"prediction": LIKELY_MESSAGE}));
}

#[actix_web::test]
async fn test_enhanced_prediction_end_to_end() {
    let app = app!(state_with(logistic_registry()));

    let mut payload = enhanced_payload();
    payload.insert("Weight gain(Y/N)".to_string(), json!("N"));

    let req = test::TestRequest::post()
        .uri("/predict-enhanced")
        .set_json(Value::Object(payload))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"prediction": UNLIKELY_MESSAGE}));
}

#[actix_web::test]
async fn test_every_missing_feature_is_named() {
    let app = app!(state_with(logistic_registry()));

    for (uri, payload) in [("/predict-simple", simple_payload()), ("/predict-enhanced", enhanced_payload())] {
        for column in payload.keys() {
            let mut partial = payload.clone();
            partial.remove(column);

            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(Value::Object(partial))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{} without {:?}", uri, column);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": format!("Missing feature: {}", column)}));
        }
    }
}

#[actix_web::test]
async fn test_non_json_content_type_rejected() {
    let app = app!(state_with(logistic_registry()));

    for uri in ["/predict-simple", "/predict-enhanced"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "text/plain"))
            .set_payload(Value::Object(simple_payload()).to_string())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Unsupported Media Type. Only JSON requests are allowed."}));
    }
}

#[actix_web::test]
async fn test_missing_content_type_rejected() {
    let app = app!(state_with(logistic_registry()));

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_payload(Value::Object(simple_payload()).to_string())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = app!(state_with(logistic_registry()));

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"BMI\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Bad Request");
}

#[actix_web::test]
async fn test_non_numeric_value_is_bad_request() {
    let app = app!(state_with(logistic_registry()));

    let mut payload = simple_payload();
    payload.insert("BMI".to_string(), json!("twenty"));

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_json(Value::Object(payload))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("BMI"));
}

#[actix_web::test]
async fn test_other_methods_not_allowed() {
    let app = app!(state_with(logistic_registry()));

    for uri in ["/predict-simple", "/predict-enhanced"] {
        for req in [
            test::TestRequest::get().uri(uri).to_request(),
            test::TestRequest::put().uri(uri).to_request(),
            test::TestRequest::delete().uri(uri).to_request(),
            test::TestRequest::patch().uri(uri).to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Method Not Allowed"}));
        }
    }
}

#[actix_web::test]
async fn test_unknown_path_not_found() {
    let app = app!(state_with(logistic_registry()));

    let req = test::TestRequest::get().uri("/predict-everything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[actix_web::test]
async fn test_unavailable_tier_does_not_affect_other() {
    let registry = ModelRegistry::empty().with_classifier(Tier::Simple, Arc::new(logistic_model(Tier::Simple)));
    let app = app!(state_with(registry));

    let req = test::TestRequest::post()
        .uri("/predict-enhanced")
        .set_json(Value::Object(enhanced_payload()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal Server Error");

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_json(Value::Object(simple_payload()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["tiers"]["simple"]["available"], true);
    assert!(body["tiers"]["simple"].get("reason").is_none());
    assert_eq!(body["tiers"]["enhanced"]["available"], false);
    assert_eq!(body["tiers"]["enhanced"]["reason"], "not loaded");
}

#[actix_web::test]
async fn test_unavailable_tier_still_rejects_bad_requests() {
    let app = app!(state_with(ModelRegistry::empty()));

    let req = test::TestRequest::post()
        .uri("/predict-enhanced")
        .set_json(json!({"BMI": 22}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Missing feature:  Age (yrs)"}));

    let mut payload = simple_payload();
    payload.insert("Waist:Hip Ratio".to_string(), json!([0.87]));
    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_json(Value::Object(payload))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Bad Request");
}

#[actix_web::test]
async fn test_classifier_receives_schema_ordered_vectors() {
    let simple_spy = Arc::new(SpyClassifier::default());
    let enhanced_spy = Arc::new(SpyClassifier::default());
    let registry = ModelRegistry::empty()
        .with_classifier(Tier::Simple, simple_spy.clone())
        .with_classifier(Tier::Enhanced, enhanced_spy.clone());
    let app = app!(state_with(registry));

    let req = test::TestRequest::post()
        .uri("/predict-simple")
        .set_json(Value::Object(simple_payload()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/predict-enhanced")
        .set_json(Value::Object(enhanced_payload()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let simple_seen = simple_spy.seen.lock().unwrap();
    assert_eq!(simple_seen.len(), 1);
    assert_eq!(simple_seen[0].columns(), FeatureSchema::for_tier(Tier::Simple).full);
    assert_eq!(simple_seen[0].get("Blood Group"), Some(15.0));
    assert_eq!(simple_seen[0].get("BMI"), Some(0.0));

    let enhanced_seen = enhanced_spy.seen.lock().unwrap();
    assert_eq!(enhanced_seen.len(), 1);
    assert_eq!(enhanced_seen[0].len(), 30);
    assert_eq!(enhanced_seen[0].columns(), FeatureSchema::for_tier(Tier::Enhanced).full);
    assert_eq!(enhanced_seen[0].get("hair growth(Y/N)"), Some(1.0));
}

#[actix_web::test]
async fn test_repeated_requests_give_same_prediction() {
    let app = app!(state_with(logistic_registry()));

    let mut predictions = Vec::new();
    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/predict-enhanced")
            .set_json(Value::Object(enhanced_payload()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        predictions.push(body["prediction"].clone());
    }

    assert!(predictions.iter().all(|p| *p == predictions[0]));
    assert!(predictions[0] == LIKELY_MESSAGE || predictions[0] == UNLIKELY_MESSAGE);
}
