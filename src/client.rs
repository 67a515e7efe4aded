use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  const GENERATE_PATH: &str = "/api/recommendations/generate";
  const LOAD_PATH: &str = "/api/plans/load";
  const SAVE_PATH: &str = "/api/plans/save";
  const SEARCH_PATH: &str = "/api/courses/search";

  /// Maps a finished response onto `T`, or onto the server's `error`
  /// message (falling back to `fallback`) for non-success statuses.
  pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    fallback: &str,
  ) -> Result<T, ApiError> {
    if !status.is_success() {
      let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| fallback.to_string());

      return Err(if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized { message }
      } else {
        ApiError::Status {
          message,
          status: status.as_u16(),
        }
      });
    }

    Ok(serde_json::from_slice(body)?)
  }

  async fn execute<T: DeserializeOwned>(
    request: RequestBuilder,
    fallback: &str,
  ) -> Result<T, ApiError> {
    let response = request.send().await?;

    let status = response.status();
    let body = response.bytes().await?;

    Self::decode_body(status, &body, fallback)
  }

  pub(crate) async fn generate_recommendations(
    &self,
    token: &str,
    request: &GenerateRequest,
  ) -> Result<Vec<Recommendation>, ApiError> {
    let response: RecommendationsResponse = Self::execute(
      self.generate_request(token, request),
      "Failed to generate recommendations",
    )
    .await?;

    Ok(response.courses)
  }

  fn generate_request(
    &self,
    token: &str,
    request: &GenerateRequest,
  ) -> RequestBuilder {
    self
      .client
      .post(self.url(Self::GENERATE_PATH))
      .bearer_auth(token)
      .json(request)
  }

  pub(crate) async fn load_plan(
    &self,
    token: &str,
    semester: &str,
  ) -> Result<Vec<String>, ApiError> {
    let plans: SavedPlans = Self::execute(
      self.client.get(self.url(Self::LOAD_PATH)).bearer_auth(token),
      "Failed to load semester plans",
    )
    .await?;

    Ok(plans.courses_for(semester))
  }

  pub(crate) fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client: reqwest::Client::new(),
    }
  }

  pub(crate) async fn save_plan(
    &self,
    token: &str,
    request: &SavePlanRequest,
    fallback: &str,
  ) -> Result<(), ApiError> {
    let _: Value = Self::execute(
      self
        .client
        .post(self.url(Self::SAVE_PATH))
        .bearer_auth(token)
        .json(request),
      fallback,
    )
    .await?;

    Ok(())
  }

  pub(crate) async fn search_courses(
    &self,
    lookup: &Lookup,
    token: Option<&str>,
  ) -> Result<Vec<Course>, ApiError> {
    let response: SearchResponse = Self::execute(
      self.search_request(lookup, token),
      "Failed to search courses",
    )
    .await?;

    Ok(response.courses)
  }

  fn search_request(
    &self,
    lookup: &Lookup,
    token: Option<&str>,
  ) -> RequestBuilder {
    let request = self
      .client
      .get(self.url(Self::SEARCH_PATH))
      .query(&[("q", lookup.query.as_str())])
      .query(&[("limit", lookup.limit)]);

    match token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url)
  }
}
