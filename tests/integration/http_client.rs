use serde_json::json;
use spice::client::HttpAdminClient;
use spice::config::ServerConfig;
use spice::directory::AgentDirectory;
use spice::predicate::PropertyStore;
use spice::skill::{AssignedSkill, Namespace, SkillCatalog, SkillQuery};
use spice::ApiError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpAdminClient {
    HttpAdminClient::new(&ServerConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn profile_skills_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/profiles/Support/getskills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "items": [
                {"atom": "english"},
                {"atom": "_queue", "expanded": "support"},
                {"atom": "spanish", "expanded": null}
            ]
        })))
        .mount(&server)
        .await;

    let skills = client(&server).profile_skills("Support").await.unwrap();

    assert_eq!(
        skills,
        vec![
            AssignedSkill::atom("english"),
            AssignedSkill::expanded("_queue", "support"),
            AssignedSkill::atom("spanish"),
        ]
    );
}

#[tokio::test]
async fn success_false_becomes_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/agents/ghost/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Unknown agent"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).agent("ghost").await.unwrap_err();

    assert!(matches!(err, ApiError::Remote(ref m) if m == "Unknown agent"));
}

#[tokio::test]
async fn agent_record_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/agents/jdoe/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agent": {
                "login": "jdoe",
                "integrated": "yes",
                "securitylevel": 2,
                "profile": "Night",
                "skills": [{"atom": "_brand", "expanded": "acme"}]
            }
        })))
        .mount(&server)
        .await;

    let agent = client(&server).agent("jdoe").await.unwrap();

    assert_eq!(agent.login, "jdoe");
    assert_eq!(agent.integrated_display(), "yes");
    assert_eq!(agent.securitylevel, 2);
    assert_eq!(agent.skills, vec![AssignedSkill::expanded("_brand", "acme")]);
}

#[tokio::test]
async fn delete_rejection_is_returned_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/profiles/Default/delete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Profile in use"})),
        )
        .mount(&server)
        .await;

    let status = client(&server).delete_profile("Default").await.unwrap();

    assert!(!status.success);
    assert_eq!(status.message.as_deref(), Some("Profile in use"));
}

#[tokio::test]
async fn catalog_groups_and_expansions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/skills/groups"))
        .and(query_param("type", "group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"name": "languages", "type": "group", "skills": ["english", "spanish"]}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/skills/expand/_queue"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": ["support", "sales"]})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let groups = client.fetch(&SkillQuery::groups()).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "languages");
    assert_eq!(groups[0].skills, vec!["english".to_string(), "spanish".to_string()]);

    let items = client.expand(Namespace::Queue).await.unwrap();
    assert_eq!(items, vec!["support".to_string(), "sales".to_string()]);
}

#[tokio::test]
async fn property_lookup_takes_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("value", "priority"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "value": "priority",
                "comparisons": [{"label": "equals", "value": "eq"}],
                "regExp": "[1-5]"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("value", "nothing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = client(&server);
    let entry = client.lookup("priority").await.unwrap().unwrap();
    assert_eq!(entry.reg_exp, "[1-5]");
    assert_eq!(entry.comparisons.len(), 1);
    assert!(client.lookup("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/skills/expand/_brand"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).expand(Namespace::Brand).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!err.is_soft());
}
