use super::*;

mod scenarios;

#[tokio::test]
async fn test_search_sends_term_and_bound() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .and(query_param("term", "breast cancer"))
    .and(query_param("retmax", "7"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({ "esearchresult": { "idlist": ["9", "3", "5"] } })),
    )
    .expect(1)
    .mount(&server)
    .await;

  let ids = client.search_ids(&Query::new("breast cancer").with_max_results(7)).await?;
  assert_eq!(ids, ["9", "3", "5"]);
  Ok(())
}

#[tokio::test]
async fn test_search_uses_default_bound() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .and(query_param("retmax", "50"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "esearchresult": { "idlist": ["1"] } })))
    .expect(1)
    .mount(&server)
    .await;

  assert_eq!(client.search_ids(&client.query("aspirin")).await?, ["1"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_search_without_idlist_is_empty() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({ "esearchresult": { "ERROR": "Invalid query" } })),
    )
    .mount(&server)
    .await;

  assert!(client.search_ids(&Query::new("(((")).await?.is_empty());
  assert!(logs_contain("Invalid query"));

  server.reset().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .mount(&server)
    .await;
  assert!(client.search_ids(&Query::new("anything")).await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_search_rejects_non_json_body() {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
    .mount(&server)
    .await;

  let err = client.search_ids(&Query::new("cancer")).await.unwrap_err();
  assert!(matches!(err, PubfinderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_search_rejects_zero_bound_without_request() {
  let (server, client) = mock_pubmed().await;
  let err = client.search_ids(&Query::new("cancer").with_max_results(0)).await.unwrap_err();
  assert!(matches!(err, PubfinderError::Config(_)));
  assert_eq!(requests_to(&server, "/esearch.fcgi").await, 0);
}

#[tokio::test]
async fn test_fetch_joins_ids_into_one_request() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/efetch.fcgi"))
    .and(query_param("id", "11,22,33"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<PubmedArticleSet/>"))
    .expect(1)
    .mount(&server)
    .await;

  let ids = vec!["11".to_string(), "22".to_string(), "33".to_string()];
  assert_eq!(client.fetch_details(&ids).await?, "<PubmedArticleSet/>");
  Ok(())
}

#[tokio::test]
async fn test_fetch_with_no_ids_skips_network() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  mount_fetch(&server, SCENARIO_A_XML).await;

  assert_eq!(client.fetch_details(&[]).await?, "");
  assert_eq!(requests_to(&server, "/efetch.fcgi").await, 0);
  assert!(client.extract("")?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_fetch_error_status() {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/efetch.fcgi"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&server)
    .await;

  let err = client.fetch_details(&["1".to_string()]).await.unwrap_err();
  assert!(matches!(err, PubfinderError::RemoteRequest(_)));
}

#[tokio::test]
async fn test_identity_params_are_sent() -> TestResult<()> {
  let server = MockServer::start().await;
  let mut config = Config::default()
    .with_search_url(format!("{}/esearch.fcgi", server.uri()))
    .with_fetch_url(format!("{}/efetch.fcgi", server.uri()))
    .with_api_key("secret");
  config.tool = Some("pubfinder".to_string());
  let client = PubmedClient::new(config)?;

  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .and(query_param("api_key", "secret"))
    .and(query_param("tool", "pubfinder"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "esearchresult": { "idlist": [] } })))
    .expect(1)
    .mount(&server)
    .await;

  assert!(client.search_ids(&Query::new("x")).await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_malformed_fetch_document() {
  let (server, client) = mock_pubmed().await;
  mount_search(&server, &["1"]).await;
  mount_fetch(&server, "<PubmedArticleSet><PubmedArticle></PubmedArticleSet>").await;

  let err = client.find_papers(&Query::new("cancer")).await.unwrap_err();
  assert!(matches!(err, PubfinderError::MalformedDocument(_)));
}

#[tokio::test]
async fn test_strict_scope_through_client() -> TestResult<()> {
  let server = MockServer::start().await;
  let config = Config::default()
    .with_search_url(format!("{}/esearch.fcgi", server.uri()))
    .with_fetch_url(format!("{}/efetch.fcgi", server.uri()))
    .with_affiliation_scope(AffiliationScope::Author);
  let client = PubmedClient::new(config)?;
  mount_search(&server, &["1", "2"]).await;
  mount_fetch(&server, SCENARIO_A_XML).await;

  let papers: Vec<PaperRecord> = client.find_papers(&Query::new("cancer")).await?;
  assert_eq!(papers[0].company_affiliations, ["XYZ Pharma"]);
  assert!(papers[1].company_affiliations.is_empty());
  Ok(())
}

#[test]
fn test_example_config_matches_defaults() -> TestResult<()> {
  let config = Config::from_file("../../config/pubfinder.toml")?;
  assert_eq!(config, Config::default());
  Ok(())
}
