use anyhow::bail;
use indoc::indoc;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};
use vanguard_generator::{relabel_win_rate, MatchGenerator, Outcome};
use vanguard_model::lol::LolMatch;
use vanguard_model::valorant::ValorantMatch;

pub const GRID_STATS_FEED_URL: &str = "https://api-op.grid.gg/statistics-feed/graphql";

const GRID_TIMEOUT: Duration = Duration::from_secs(10);
const TEAM_ID_PREFIX: &str = "TeamID:";
// Used when the feed reports games but no win entry
const DEFAULT_WIN_PERCENT: f64 = 50.0;

const TEAM_STATISTICS_QUERY: &str = indoc! {"
    query TeamStatisticsForLastThreeMonths($teamId: ID!) {
      teamStatistics(teamId: $teamId, filter: { timeWindow: LAST_3_MONTHS }) {
        id
        series {
          count
        }
        game {
          count
          wins {
            value
            count
            percentage
          }
        }
      }
    }"};

/// Extract `<id>` from a `TeamID:<id>` team identifier.
pub fn parse_team_id(team: &str) -> Option<&str> {
    team.strip_prefix(TEAM_ID_PREFIX)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamStatisticsData {
    team_statistics: Option<TeamStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct TeamStatistics {
    pub series: SeriesStatistics,
    pub game: GameStatistics,
}

#[derive(Debug, Deserialize)]
pub struct SeriesStatistics {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct GameStatistics {
    pub count: u64,
    #[serde(default)]
    pub wins: Vec<WinStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct WinStatistics {
    pub value: bool,
    pub percentage: f64,
}

impl TeamStatistics {
    pub fn win_percent(&self) -> f64 {
        self.game
            .wins
            .iter()
            .find(|wins| wins.value)
            .map_or(DEFAULT_WIN_PERCENT, |wins| wins.percentage)
    }
}

/// Supplies match batches, either purely synthetic or shaped by the team's
/// real win rate from the GRID statistics feed.
pub struct GridDataLoader {
    http: reqwest::Client,
    generator: MatchGenerator<ChaCha8Rng>,
    live: bool,
    api_key: Option<String>,
    stats_url: String,
}

impl std::fmt::Debug for GridDataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridDataLoader")
            .field("live", &self.live)
            .field("stats_url", &self.stats_url)
            .finish()
    }
}

impl GridDataLoader {
    pub fn synthetic(generator: MatchGenerator<ChaCha8Rng>) -> Self {
        Self {
            http: reqwest::Client::new(),
            generator,
            live: false,
            api_key: None,
            stats_url: GRID_STATS_FEED_URL.to_string(),
        }
    }

    /// Ask the statistics feed first. `api_key` may be missing, in which case every load falls back.
    pub fn live(generator: MatchGenerator<ChaCha8Rng>, api_key: Option<String>) -> Self {
        Self {
            live: true,
            api_key,
            ..Self::synthetic(generator)
        }
    }

    #[cfg(test)]
    pub fn with_stats_url(mut self, url: impl Into<String>) -> Self {
        self.stats_url = url.into();
        self
    }

    pub async fn load_lol_matches(&mut self, team: &str, count: usize) -> Vec<LolMatch> {
        self.load(team, count, MatchGenerator::lol_matches).await
    }

    pub async fn load_valorant_matches(&mut self, team: &str, count: usize) -> Vec<ValorantMatch> {
        self.load(team, count, MatchGenerator::valorant_matches)
            .await
    }

    async fn load<T, F>(&mut self, team: &str, count: usize, generate: F) -> Vec<T>
    where
        T: Outcome,
        F: FnOnce(&mut MatchGenerator<ChaCha8Rng>, &str, usize) -> Vec<T>,
    {
        let Some((team_id, win_percent)) = self.live_win_percent(team).await else {
            return generate(&mut self.generator, team, count);
        };

        let display_name = format!("Team {team_id}");
        let mut matches = generate(&mut self.generator, &display_name, count);
        relabel_win_rate(&mut matches, win_percent, self.generator.rng());
        info!(
            "Generated {} matches for {display_name} at a {win_percent:.1}% win rate",
            matches.len()
        );
        matches
    }

    /// Team id and win percentage from the feed, or `None` when synthetic data should be used.
    async fn live_win_percent(&self, team: &str) -> Option<(String, f64)> {
        if !self.live {
            return None;
        }
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Live data requested but GRID_API_KEY is not set, using synthetic data");
            return None;
        };
        let Some(team_id) = parse_team_id(team) else {
            warn!("Live data needs a team identifier like {TEAM_ID_PREFIX}83, got `{team}`, using synthetic data");
            return None;
        };

        info!("Fetching statistics for team {team_id} from GRID");
        match self.fetch_team_statistics(api_key, team_id).await {
            Ok(Some(stats)) if stats.game.count > 0 => {
                let win_percent = stats.win_percent();
                info!(
                    "GRID stats: {} series, {} games, {win_percent:.1}% win rate",
                    stats.series.count, stats.game.count
                );
                Some((team_id.to_string(), win_percent))
            }
            Ok(_) => {
                warn!("No GRID statistics for team {team_id}, using synthetic data");
                None
            }
            Err(e) => {
                warn!("Failed to fetch GRID statistics, using synthetic data: {e:?}");
                None
            }
        }
    }

    async fn fetch_team_statistics(
        &self,
        api_key: &str,
        team_id: &str,
    ) -> anyhow::Result<Option<TeamStatistics>> {
        let body = json!({
            "query": TEAM_STATISTICS_QUERY,
            "variables": { "teamId": team_id },
        });

        let response: GraphQlResponse<TeamStatisticsData> = self
            .http
            .post(&self.stats_url)
            .timeout(GRID_TIMEOUT)
            .header("x-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("GRID response: {response:?}");

        if !response.errors.is_empty() {
            bail!("GRID statistics feed returned errors: {:?}", response.errors);
        }
        Ok(response.data.and_then(|data| data.team_statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn generator() -> MatchGenerator<ChaCha8Rng> {
        MatchGenerator::seeded(3).with_anchor(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
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
    fn test_team_ids_need_the_prefix() {
        assert_eq!(parse_team_id("TeamID:83"), Some("83"));
        assert_eq!(parse_team_id("TeamID: 47 "), Some("47"));
        assert_eq!(parse_team_id("TeamID:"), None);
        assert_eq!(parse_team_id("Cloud9"), None);
    }

    #[test]
    fn test_win_percent_defaults_without_a_win_entry() {
        let stats: TeamStatistics = serde_json::from_str(
            r#"{"series":{"count":4},"game":{"count":9,"wins":[{"value":false,"count":9,"percentage":100.0}]}}"#,
        )
        .unwrap();

        assert_eq!(stats.win_percent(), 50.0);
    }

    #[tokio::test]
    async fn test_synthetic_loader_matches_the_generator() {
        let mut loader = GridDataLoader::synthetic(generator());
        let loaded = loader.load_lol_matches("Cloud9", 4).await;

        assert_eq!(loaded, generator().lol_matches("Cloud9", 4));
    }

    #[tokio::test]
    async fn test_missing_api_key_falls_back() {
        let mut loader = GridDataLoader::live(generator(), None);
        let loaded = loader.load_valorant_matches("TeamID:83", 3).await;

        assert_eq!(loaded, generator().valorant_matches("TeamID:83", 3));
    }

    #[tokio::test]
    async fn test_team_name_without_id_falls_back() {
        let mut loader = GridDataLoader::live(generator(), Some("key".into()))
            .with_stats_url("http://127.0.0.1:9/graphql");
        let loaded = loader.load_lol_matches("Cloud9", 3).await;

        assert_eq!(loaded, generator().lol_matches("Cloud9", 3));
    }

    #[tokio::test]
    async fn test_unreachable_feed_falls_back() {
        let mut loader = GridDataLoader::live(generator(), Some("key".into()))
            .with_stats_url("http://127.0.0.1:9/graphql");
        let loaded = loader.load_lol_matches("TeamID:83", 3).await;

        assert_eq!(loaded.len(), 3);
        assert!(loaded.iter().all(|data| data.team == "TeamID:83"));
    }

    #[tokio::test]
    async fn test_live_stats_relabel_wins() {
        let (url, request) = serve_once(
            "200 OK",
            r#"{"data":{"teamStatistics":{"id":"83","series":{"count":5},"game":{"count":12,"wins":[{"value":false,"count":5,"percentage":41.7},{"value":true,"count":7,"percentage":60.0}]}}}}"#,
        )
        .await;
        let mut loader =
            GridDataLoader::live(generator(), Some("grid-key".into())).with_stats_url(url);

        let loaded = loader.load_lol_matches("TeamID:83", 10).await;
        let request = request.await.unwrap();

        assert_eq!(loaded.len(), 10);
        assert_eq!(loaded.iter().filter(|data| data.won).count(), 6);
        assert!(loaded.iter().all(|data| data.team == "Team 83"));
        assert!(request.to_ascii_lowercase().contains("x-api-key: grid-key"));
        assert!(request.contains("\"teamId\":\"83\""));
    }

    #[tokio::test]
    async fn test_zero_games_fall_back() {
        let (url, _request) = serve_once(
            "200 OK",
            r#"{"data":{"teamStatistics":{"id":"83","series":{"count":0},"game":{"count":0,"wins":[]}}}}"#,
        )
        .await;
        let mut loader = GridDataLoader::live(generator(), Some("key".into())).with_stats_url(url);

        let loaded = loader.load_valorant_matches("TeamID:83", 2).await;

        assert!(loaded.iter().all(|data| data.team == "TeamID:83"));
    }

    #[tokio::test]
    async fn test_graphql_errors_fall_back() {
        let (url, _request) =
            serve_once("200 OK", r#"{"data":null,"errors":[{"message":"team not found"}]}"#).await;
        let mut loader = GridDataLoader::live(generator(), Some("key".into())).with_stats_url(url);

        let loaded = loader.load_lol_matches("TeamID:999", 2).await;

        assert!(loaded.iter().all(|data| data.team == "TeamID:999"));
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let (url, _request) = serve_once("503 Service Unavailable", r#"{"message":"down"}"#).await;
        let mut loader = GridDataLoader::live(generator(), Some("key".into())).with_stats_url(url);

        let loaded = loader.load_lol_matches("TeamID:83", 2).await;

        assert_eq!(loaded, generator().lol_matches("TeamID:83", 2));
    }
}
