//! End-to-end runs of the search, fetch and extract pipeline against a mock PubMed.

use super::*;

#[traced_test]
#[tokio::test]
async fn test_scenario_a_two_articles() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  mount_search(&server, &["1", "2"]).await;
  Mock::given(method("GET"))
    .and(path("/efetch.fcgi"))
    .and(query_param("id", "1,2"))
    .respond_with(ResponseTemplate::new(200).set_body_string(SCENARIO_A_XML))
    .expect(1)
    .mount(&server)
    .await;

  let papers = client.find_papers(&Query::new("cancer")).await?;

  assert_eq!(papers.len(), 2);
  assert_eq!(papers[0].pubmed_id, "1");
  assert_eq!(papers[0].title, "Checkpoint inhibitors in <i>solid</i> tumours.");
  assert_eq!(papers[0].publication_date, "2023");
  assert_eq!(papers[0].non_academic_authors, ["Jane Doe"]);
  assert_eq!(papers[0].company_affiliations, ["XYZ Pharma"]);

  assert_eq!(papers[1].pubmed_id, "2");
  assert_eq!(papers[1].title, "Survival outcomes after surgery.");
  assert_eq!(papers[1].publication_date, "");
  assert_eq!(papers[1].non_academic_authors, ["John Roe"]);
  assert!(papers[1].company_affiliations.is_empty());

  assert!(papers.iter().all(|p| p.corresponding_author_email.is_empty()));
  assert!(logs_contain("Search returned 2 identifiers"));
  Ok(())
}

#[tokio::test]
async fn test_scenario_b_no_results() -> TestResult<()> {
  let (server, client) = mock_pubmed().await;
  mount_search(&server, &[]).await;
  mount_fetch(&server, SCENARIO_A_XML).await;

  let papers = client.find_papers(&Query::new("zzzznoresults")).await?;
  assert!(papers.is_empty());
  assert_eq!(requests_to(&server, "/esearch.fcgi").await, 1);
  assert_eq!(requests_to(&server, "/efetch.fcgi").await, 0);

  let dir = tempfile::tempdir()?;
  let file = pubfinder::export::write_csv_file(&papers, dir.path().join("empty.csv"))?;
  let content = std::fs::read_to_string(file)?;
  assert_eq!(content.lines().count(), 1);
  assert!(content.starts_with("PubmedID,Title,Publication Date"));
  Ok(())
}

#[tokio::test]
async fn test_scenario_c_search_server_error() {
  let (server, client) = mock_pubmed().await;
  Mock::given(method("GET"))
    .and(path("/esearch.fcgi"))
    .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
    .mount(&server)
    .await;
  mount_fetch(&server, SCENARIO_A_XML).await;

  let err = client.find_papers(&Query::new("cancer")).await.unwrap_err();
  match err {
    PubfinderError::RemoteRequest(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(500)),
    other => panic!("expected a remote request error, got {other:?}"),
  }
  assert_eq!(requests_to(&server, "/efetch.fcgi").await, 0);
}

#[tokio::test]
async fn test_unreachable_server() {
  // Bind an ephemeral port and release it so nothing is listening there.
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let uri = format!("http://{}", listener.local_addr().unwrap());
  drop(listener);

  let config = Config::default()
    .with_search_url(format!("{uri}/esearch.fcgi"))
    .with_fetch_url(format!("{uri}/efetch.fcgi"));
  let client = PubmedClient::new(config).unwrap();

  let err = client.find_papers(&Query::new("cancer")).await.unwrap_err();
  assert!(matches!(&err, PubfinderError::RemoteRequest(e) if e.is_connect()), "{err:?}");
}
