use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
  #[error("{message}")]
  Backend {
    message: String,
    status: reqwest::StatusCode,
  },
  #[error("invalid response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

impl ApiError {
  const FALLBACK_MESSAGE: &str = "Error";

  /// Builds the error for a non-success response, preferring the message the
  /// backend put in `{"error": ...}`.
  pub(crate) async fn from_response(response: reqwest::Response) -> Self {
    let status = response.status();

    let body = response.text().await.unwrap_or_default();

    Self::Backend {
      message: Self::message_from_body(&body),
      status,
    }
  }

  pub(crate) fn is_backend(&self) -> bool {
    matches!(self, ApiError::Backend { .. })
  }

  fn message_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
      .ok()
      .and_then(|body| body.error)
      .map(|message| message.trim().to_string())
      .filter(|message| !message.is_empty())
      .unwrap_or_else(|| Self::FALLBACK_MESSAGE.to_string())
  }
}
