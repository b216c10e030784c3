use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

use crate::{
    config::Settings,
    osu::{
        auth::{AccessToken, TokenCache},
        models::{Beatmap, OsuUser, RecentScore, ScoreCard},
        OsuError,
    },
};

enum Endpoint<'a> {
    Token,
    User(&'a str),
    RecentScores(u64),
    Beatmap(u64),
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Token => write!(f, "/oauth/token"),
            Endpoint::User(username) => write!(f, "/api/v2/users/{}/osu", username),
            Endpoint::RecentScores(user_id) => {
                write!(f, "/api/v2/users/{}/scores/recent?mode=osu&limit=1", user_id)
            }
            Endpoint::Beatmap(beatmap_id) => write!(f, "/api/v2/beatmaps/{}", beatmap_id),
        }
    }
}

impl Endpoint<'_> {
    // Usernames are pushed as a single percent-encoded path segment.
    fn url(&self, base_url: &str) -> Result<Url, OsuError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| OsuError::NetworkFailure(format!("invalid base url {base_url}: {e}")))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                OsuError::NetworkFailure(format!("base url {base_url} cannot have a path"))
            })?;
            segments.pop_if_empty();
            match self {
                Endpoint::Token => {
                    segments.extend(["oauth", "token"]);
                }
                Endpoint::User(username) => {
                    segments.extend(["api", "v2", "users"]).push(username).push("osu");
                }
                Endpoint::RecentScores(user_id) => {
                    segments
                        .extend(["api", "v2", "users"])
                        .push(&user_id.to_string())
                        .extend(["scores", "recent"]);
                }
                Endpoint::Beatmap(beatmap_id) => {
                    segments
                        .extend(["api", "v2", "beatmaps"])
                        .push(&beatmap_id.to_string());
                }
            }
        }

        if let Endpoint::RecentScores(_) = self {
            url.query_pairs_mut()
                .append_pair("mode", "osu")
                .append_pair("limit", "1");
        }

        Ok(url)
    }
}

pub struct Osu {
    http_client: Client,
    base_url: String,
    tokens: TokenCache,
}

impl Osu {
    pub fn new(
        base_url: &str,
        timeout: std::time::Duration,
        tokens: TokenCache,
    ) -> Result<Self, OsuError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, OsuError> {
        Osu::new(
            &settings.osu_base_url,
            std::time::Duration::from_secs(settings.osu_api_timeout_sec),
            TokenCache::new(settings.osu_client_id, settings.osu_client_secret.clone()),
        )
    }

    /// Site root, also used to build profile and beatmap links.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Most recent osu!standard play of `username`, with the beatmap maximum combo.
    /// Returns `Ok(None)` if the user has no recent play.
    pub async fn latest_score(&self, username: &str) -> Result<Option<ScoreCard>, OsuError> {
        let token_url = Endpoint::Token.url(&self.base_url)?;
        let token = self
            .tokens
            .get_or_refresh(&self.http_client, token_url.as_str())
            .await?;

        let user: OsuUser = self.get(&Endpoint::User(username), &token).await?;

        let scores: Vec<RecentScore> = self.get(&Endpoint::RecentScores(user.id), &token).await?;
        let score = match scores.into_iter().next() {
            Some(score) => score,
            None => return Ok(None),
        };

        // The score only carries the combo achieved by the player.
        let beatmap: Beatmap = self
            .get(&Endpoint::Beatmap(score.beatmap.id), &token)
            .await?;

        Ok(Some(ScoreCard {
            user,
            score,
            beatmap,
        }))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
        token: &AccessToken,
    ) -> Result<T, OsuError> {
        let url = endpoint.url(&self.base_url)?;
        debug!("GET {url}");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await?;

        match (response.status(), endpoint) {
            (StatusCode::OK, _) => {
                let body = response.text().await?;
                serde_json::from_str::<T>(&body)
                    .map_err(|e| OsuError::MalformedResponse(format!("{endpoint}: {e}")))
            }
            (StatusCode::NOT_FOUND, Endpoint::User(username)) => {
                Err(OsuError::UserNotFound(username.to_string()))
            }
            (status, _) => {
                let body = response.text().await.unwrap_or_default();
                Err(OsuError::NetworkFailure(format!(
                    "{endpoint} responded with {status}: {body}"
                )))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 86400,
                "access_token": "test-token"
            })))
            .mount(server)
            .await;
    }

    pub(crate) async fn mount_user(server: &MockServer, username: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/users/{username}/osu")))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 2,
                "username": username,
                "avatar_url": "https://a.ppy.sh/2"
            })))
            .mount(server)
            .await;
    }

    pub(crate) async fn mount_recent_scores(server: &MockServer, scores: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/v2/users/2/scores/recent"))
            .and(query_param("mode", "osu"))
            .and(query_param("limit", "1"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(scores))
            .mount(server)
            .await;
    }

    pub(crate) async fn mount_beatmap(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v2/beatmaps/129891"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 129891,
                "max_combo": 2385
            })))
            .mount(server)
            .await;
    }

    pub(crate) fn sample_score() -> serde_json::Value {
        serde_json::json!({
            "rank": "A",
            "pp": 256.4,
            "accuracy": 0.9567,
            "score": 12345678,
            "max_combo": 1024,
            "mods": ["HD", "DT"],
            "created_at": "2023-05-01T18:30:00Z",
            "beatmap": { "id": 129891, "version": "FOUR DIMENSIONS" },
            "beatmapset": {
                "title": "Freedom Dive",
                "covers": { "cover": "https://assets.ppy.sh/beatmaps/39804/covers/cover.jpg" }
            }
        })
    }

    pub(crate) fn client(server: &MockServer) -> Osu {
        Osu::new(
            &server.uri(),
            std::time::Duration::from_secs(5),
            TokenCache::new(1, "secret".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn latest_score_chains_user_score_and_beatmap_lookups() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_user(&server, "peppy").await;
        mount_recent_scores(&server, serde_json::json!([sample_score()])).await;
        mount_beatmap(&server).await;

        let card = client(&server)
            .latest_score("peppy")
            .await
            .unwrap()
            .expect("a recent play");

        assert_eq!(card.user.id, 2);
        assert_eq!(card.score.max_combo, 1024);
        assert_eq!(card.beatmap.max_combo, 2385);
        assert_eq!(card.score.mods, vec!["HD", "DT"]);
    }

    #[tokio::test]
    async fn empty_recent_scores_is_not_an_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_user(&server, "peppy").await;
        mount_recent_scores(&server, serde_json::json!([])).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/beatmaps/129891"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).latest_score("peppy").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_reported_as_such() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/users/nobody/osu"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server).latest_score("nobody").await;
        assert!(matches!(result, Err(OsuError::UserNotFound(name)) if name == "nobody"));
    }

    #[tokio::test]
    async fn username_is_escaped_in_the_lookup_path() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/users/foo%23bar/osu"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/users/foo/osu"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).latest_score("foo#bar").await;
        assert!(matches!(result, Err(OsuError::UserNotFound(name)) if name == "foo#bar"));
    }

    #[test]
    fn endpoint_urls() {
        let base = "https://osu.ppy.sh";
        assert_eq!(
            Endpoint::Token.url(base).unwrap().as_str(),
            "https://osu.ppy.sh/oauth/token"
        );
        assert_eq!(
            Endpoint::User("a b?").url(base).unwrap().as_str(),
            "https://osu.ppy.sh/api/v2/users/a%20b%3F/osu"
        );
        assert_eq!(
            Endpoint::RecentScores(2).url(base).unwrap().as_str(),
            "https://osu.ppy.sh/api/v2/users/2/scores/recent?mode=osu&limit=1"
        );
        assert_eq!(
            Endpoint::Beatmap(129891).url(base).unwrap().as_str(),
            "https://osu.ppy.sh/api/v2/beatmaps/129891"
        );
    }

    #[tokio::test]
    async fn server_error_is_a_network_failure() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/users/peppy/osu"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).latest_score("peppy").await;
        assert!(matches!(result, Err(OsuError::NetworkFailure(_))));
    }

    #[tokio::test]
    async fn unexpected_payload_is_a_malformed_response() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_user(&server, "peppy").await;
        mount_recent_scores(&server, serde_json::json!({ "error": "nope" })).await;

        let result = client(&server).latest_score("peppy").await;
        assert!(matches!(result, Err(OsuError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn token_failure_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).latest_score("peppy").await;
        assert!(matches!(result, Err(OsuError::TokenAcquisition(_))));
    }
}
