use crate::{
    ActionFailure, ActionOutcome, CardinalityError, HttpTransport, ProtocolError, RedfishError,
    RedpowerClient,
    tests::{TEST_PASS, TEST_USER, test_target},
};
use reqwest::StatusCode;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_json, method, path},
};

const RESET_TARGET: &str = "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset";

fn create_client(mock_server: &MockServer) -> RedpowerClient {
    let target = test_target(&mock_server.uri());
    let transport = HttpTransport::new(&target).unwrap();
    RedpowerClient::with_transport(target, transport)
}

async fn mount_single_system(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .and(basic_auth(TEST_USER, TEST_PASS))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@odata.id": "/redfish/v1/Systems",
            "Members": [{"@odata.id": "/redfish/v1/Systems/1"}],
            "Members@odata.count": 1
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems/1"))
        .and(basic_auth(TEST_USER, TEST_PASS))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@odata.id": "/redfish/v1/Systems/1",
            "PowerState": "On",
            "Actions": {
                "#ComputerSystem.Reset": {
                    "ResetType@Redfish.AllowableValues": ["On", "ForceOff", "GracefulRestart"],
                    "target": RESET_TARGET
                }
            }
        })))
        .mount(mock_server)
        .await;
}

async fn mount_reset(mock_server: &MockServer, reset_type: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(RESET_TARGET))
        .and(body_json(serde_json::json!({"ResetType": reset_type})))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_read_power_state() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    let client = create_client(&mock_server);

    assert_eq!(client.power_state().await.unwrap(), "On");
}

#[tokio::test]
async fn test_list_actions() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    let client = create_client(&mock_server);

    assert_eq!(
        client.allowed_actions().await.unwrap(),
        ["On", "ForceOff", "GracefulRestart"]
    );
}

#[tokio::test]
async fn test_system_url() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    let client = create_client(&mock_server);

    let url = client.system_url().await.unwrap();
    assert_eq!(url.as_str(), format!("{}/redfish/v1/Systems/1", mock_server.uri()));
}

#[tokio::test]
async fn test_force_off_applied_on_204() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    mount_reset(&mock_server, "ForceOff", 204).await;
    let client = create_client(&mock_server);

    let outcome = client.perform_action("ForceOff", false).await.unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
}

#[tokio::test]
async fn test_conflict_ignored() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    mount_reset(&mock_server, "On", 409).await;
    let client = create_client(&mock_server);

    let outcome = client.perform_action("On", true).await.unwrap();
    assert_eq!(outcome, ActionOutcome::AppliedIgnoredConflict);
    assert!(outcome.into_result().is_ok());
}

#[tokio::test]
async fn test_conflict_not_ignored() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    mount_reset(&mock_server, "On", 409).await;
    let client = create_client(&mock_server);

    let outcome = client.perform_action("On", false).await.unwrap();
    assert!(matches!(
        outcome,
        ActionOutcome::Failed(ActionFailure::Conflict { .. })
    ));

    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
}

#[tokio::test]
async fn test_value_outside_allowed_list_is_still_submitted() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(RESET_TARGET))
        .and(body_json(serde_json::json!({"ResetType": "Nmi"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": "Base.1.0.ActionParameterValueNotInList"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_client(&mock_server);

    let outcome = client.perform_action("Nmi", false).await.unwrap();
    match outcome {
        ActionOutcome::Failed(failure) => {
            assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
            assert!(failure.response_body().contains("ActionParameterValueNotInList"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_multiple_systems_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Members": [
                {"@odata.id": "/redfish/v1/Systems/1"},
                {"@odata.id": "/redfish/v1/Systems/2"}
            ],
            "Members@odata.count": 2
        })))
        .mount(&mock_server)
        .await;

    // Nothing past the collection may be touched.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = create_client(&mock_server);

    let result = client.perform_action("ForceOff", true).await;
    assert!(matches!(
        result,
        Err(RedfishError::Cardinality(CardinalityError::Multiple { count: 2 }))
    ));
}

#[tokio::test]
async fn test_unauthorized_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;
    let client = create_client(&mock_server);

    let err = client.power_state().await.unwrap_err();
    assert!(matches!(
        err,
        RedfishError::Protocol(ProtocolError::UnexpectedStatus { .. })
    ));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.response_body(), Some("Unauthorized"));
}

#[tokio::test]
async fn test_reset_target_rediscovered_each_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Members": [{"@odata.id": "/redfish/v1/Systems/System.Embedded.1"}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Systems/System.Embedded.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "PowerState": "Off",
            "Actions": {
                "#ComputerSystem.Reset": {
                    "ResetType@Redfish.AllowableValues": ["On", "ForceOff"],
                    "target": "/redfish/v1/Systems/System.Embedded.1/Actions/ComputerSystem.Reset"
                }
            }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(
            "/redfish/v1/Systems/System.Embedded.1/Actions/ComputerSystem.Reset",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;
    let client = create_client(&mock_server);

    for _ in 0..2 {
        let outcome = client.perform_action("On", false).await.unwrap();
        assert_eq!(outcome, ActionOutcome::Applied);
    }
}

#[tokio::test]
async fn test_system_snapshot() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    let client = create_client(&mock_server);

    let system = client.system().await.unwrap();
    assert_eq!(system.power_state(), "On");
    assert_eq!(system.reset_target(), RESET_TARGET);
    assert_eq!(system.allowed_reset_types().len(), 3);
}

#[tokio::test]
async fn test_submit_reset_on_fetched_system() {
    let mock_server = MockServer::start().await;
    mount_single_system(&mock_server).await;
    mount_reset(&mock_server, "GracefulRestart", 200).await;
    let client = create_client(&mock_server);

    let system = client.system().await.unwrap();
    let outcome = client
        .submit_reset(&system, "GracefulRestart", false)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
}
