use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vanguard_analysis::{analyze_lol_team, analyze_valorant_team};
use vanguard_generator::MatchGenerator;
use vanguard_model::label::Lane;
use vanguard_model::lol::{JunglePosition, LolMatch};
use vanguard_report::error::ProviderParseError;
use vanguard_report::llm::Endpoints;
use vanguard_report::template;
use vanguard_report::{Credentials, Provider, ScoutAgent, ScoutingStats};

fn lol_stats() -> ScoutingStats {
    let lanes = [Lane::Top, Lane::Top, Lane::Top, Lane::Mid, Lane::Mid, Lane::Bot];
    let jungle_positions = lanes
        .into_iter()
        .enumerate()
        .map(|(i, lane)| JunglePosition {
            timestamp: 60 * i as u32,
            x: 7000,
            y: 7000,
            lane,
        })
        .collect();

    let game = LolMatch {
        match_id: "LOL_1".into(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        team: "Cloud9".into(),
        opponent: "Team_1".into(),
        won: true,
        duration: 1800,
        kills: vec![],
        dragons: vec![],
        heralds: vec![],
        barons: vec![],
        gold_updates: vec![],
        jungle_positions,
    };
    analyze_lol_team(&[game]).into()
}

fn valorant_stats() -> ScoutingStats {
    let matches = MatchGenerator::seeded(11).valorant_matches("Sentinels", 5);
    analyze_valorant_team(&matches).into()
}

fn keyed_agent(provider: Provider, endpoints: Endpoints) -> ScoutAgent {
    let credentials = Credentials {
        openai_api_key: Some("test-key".into()),
        google_api_key: Some("test-key".into()),
        openrouter_api_key: Some("test-key".into()),
    };
    ScoutAgent::new(provider, credentials).with_endpoints(endpoints)
}

fn local_endpoints(url: &str) -> Endpoints {
    Endpoints {
        openai: url.to_string(),
        gemini: url.to_string(),
        openrouter: url.to_string(),
    }
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]);
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// Answers a single HTTP request with `status` and `body`, handing back the raw request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        while !request_complete(&request) {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/generate"), handle)
}

#[test]
fn test_lol_template_targets_least_visited_lane() {
    let report = template::render(&lol_stats());

    assert!(report.contains("## 🎯 SCOUTING REPORT: Cloud9"));
    assert!(report.contains("- Top Lane: 50.0%"));
    assert!(report.contains("Bot lane receives the LEAST jungle attention (16.7%)"));
    assert!(report.contains("### 🚨 THE WIN CONDITION"));
    assert!(report.contains("1. **Camp Bot Lane**"));
    assert!(report.contains("**Gold @ 10min:** +0"));
    assert!(report.contains("**Gold @ 20min:** +0"));
    // No dragons and no gold data: weak early control, non-positive gold
    assert!(report.contains("They STRUGGLE to secure early objectives"));
    assert!(report.contains("**Punish Their Early Aggression**"));
}

#[test]
fn test_valorant_template_names_favorite_site() {
    let stats = valorant_stats();
    let ScoutingStats::Valorant(valorant) = &stats else {
        panic!("expected VALORANT stats");
    };
    let favorite = valorant.site_bias_stats.favorite_site.unwrap();
    let report = template::render(&stats);

    assert!(report.contains("## 🎯 SCOUTING REPORT: Sentinels"));
    assert!(report.contains("### 🗺️ Site Attack Tendencies"));
    assert!(report.contains(&format!("1. **Stack {favorite}-Site Early**")));
    assert!(report.contains("### 🚨 THE WIN CONDITION"));
    assert!(report.contains("**Site C Attacks:**"));
}

#[test]
fn test_templates_render_empty_reports() {
    let lol = template::render(&analyze_lol_team(&[]).into());
    let valorant = template::render(&analyze_valorant_team(&[]).into());

    assert!(lol.contains("SCOUTING REPORT: Unknown"));
    assert!(lol.contains("(0 matches analyzed)"));
    assert!(valorant.contains("SCOUTING REPORT: Unknown"));
    assert!(valorant.contains("**Total Rounds:** 0"));
}

#[test]
fn test_provider_parses_configuration_strings() {
    assert_eq!("mock".parse::<Provider>(), Ok(Provider::Mock));
    assert_eq!("OpenAI".parse::<Provider>(), Ok(Provider::OpenAi));
    assert_eq!(" gemini ".parse::<Provider>(), Ok(Provider::Gemini));
    assert_eq!("openrouter".parse::<Provider>(), Ok(Provider::OpenRouter));
    assert_eq!(
        "claude".parse::<Provider>(),
        Err(ProviderParseError("claude".into()))
    );
    assert_eq!(Provider::default(), Provider::Mock);
}

#[tokio::test]
async fn test_mock_provider_returns_template() {
    let stats = lol_stats();
    let agent = ScoutAgent::new(Provider::Mock, Credentials::default());

    assert_eq!(agent.scouting_report(&stats).await, template::render(&stats));
}

#[tokio::test]
async fn test_missing_credential_falls_back_to_template() {
    let stats = valorant_stats();
    let agent = ScoutAgent::new(Provider::OpenAi, Credentials::default());
    let report = agent.scouting_report(&stats).await;

    assert!(report.starts_with(
        "⚠️ ERROR calling OpenAI: OPENAI_API_KEY not found in environment variables"
    ));
    assert!(report.ends_with(&template::render(&stats)));
}

#[tokio::test]
async fn test_unreachable_provider_falls_back_to_template() {
    let stats = lol_stats();
    let agent = keyed_agent(
        Provider::OpenRouter,
        local_endpoints("http://127.0.0.1:9/v1/chat/completions"),
    );
    let report = agent.scouting_report(&stats).await;

    assert!(report.starts_with("⚠️ ERROR calling OpenRouter"));
    assert!(report.contains("Using template report instead."));
    assert!(report.ends_with(&template::render(&stats)));
}

#[tokio::test]
async fn test_openai_reply_is_returned_verbatim() {
    let (url, request) = serve_once(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"Camp bot lane."}}]}"#,
    )
    .await;
    let agent = keyed_agent(Provider::OpenAi, local_endpoints(&url));

    let report = agent.scouting_report(&lol_stats()).await;
    let request = request.await.unwrap();

    assert_eq!(report, "Camp bot lane.");
    assert!(request.starts_with("POST /generate"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer test-key"));
    assert!(request.contains("\"model\":\"gpt-4-turbo-preview\""));
    assert!(request.contains("\"temperature\":0.7"));
}

#[tokio::test]
async fn test_gemini_reply_joins_text_parts() {
    let (url, request) = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"Stack "},{"text":"A-Site."}]}}]}"#,
    )
    .await;
    let agent = keyed_agent(Provider::Gemini, local_endpoints(&url));

    let report = agent.scouting_report(&valorant_stats()).await;
    let request = request.await.unwrap();

    assert_eq!(report, "Stack A-Site.");
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains("RUTHLESS VALORANT Esports Coach"));
}

#[tokio::test]
async fn test_error_status_falls_back_to_template() {
    let (url, _request) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let stats = lol_stats();
    let agent = keyed_agent(Provider::OpenRouter, local_endpoints(&url));

    let report = agent.scouting_report(&stats).await;

    assert!(report.starts_with("⚠️ ERROR calling OpenRouter: provider answered 500"));
    assert!(report.ends_with(&template::render(&stats)));
}

#[tokio::test]
async fn test_empty_choices_fall_back_to_template() {
    let (url, _request) = serve_once("200 OK", r#"{"choices":[]}"#).await;
    let stats = lol_stats();
    let agent = keyed_agent(Provider::OpenAi, local_endpoints(&url));

    let report = agent.scouting_report(&stats).await;

    assert!(report.starts_with("⚠️ ERROR calling OpenAI: provider response had no text content"));
}
