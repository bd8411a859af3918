use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

  pub(crate) async fn cast_vote(&self, vote: &Vote) -> Result<(), ApiError> {
    let response = self
      .client
      .post(self.url("/vote"))
      .json(vote)
      .send()
      .await?;

    Self::check(response).await.map(|_| ())
  }

  async fn check(
    response: reqwest::Response,
  ) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
      Ok(response)
    } else {
      Err(ApiError::from_response(response).await)
    }
  }

  pub(crate) async fn fetch_comments(
    &self,
    view: ViewMode,
  ) -> Result<CommentsResponse, ApiError> {
    let response = self
      .client
      .get(self.url("/comments"))
      .query(&[("view", view.label())])
      .send()
      .await?;

    let body = Self::check(response).await?.bytes().await?;

    Ok(CommentsResponse::decode(&body)?)
  }

  pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(Self::USER_AGENT)
      .build()
      .context("could not build HTTP client")?;

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client,
    })
  }

  pub(crate) async fn post_comment(
    &self,
    comment: &NewComment,
  ) -> Result<(), ApiError> {
    let response = self
      .client
      .post(self.url("/comments"))
      .json(comment)
      .send()
      .await?;

    Self::check(response).await.map(|_| ())
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{path}", self.base_url)
  }
}
