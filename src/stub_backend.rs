//! In-process comment backend for tests, serving the same REST surface as the
//! real server on an ephemeral local port.

use {
  super::*,
  axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
  },
  chrono::Utc,
  serde_json::json,
  std::{net::SocketAddr, sync::Arc},
};

type Rejection = (StatusCode, &'static str);

type Shared = Arc<Mutex<Store>>;

#[derive(Deserialize)]
struct ListQuery {
  view: Option<String>,
}

struct StoredComment {
  content: String,
  id: String,
  parent_comment_id: Option<String>,
  replies: Vec<String>,
  timestamp: String,
  user: String,
  votes: i64,
}

#[derive(Default)]
struct Store {
  comments: Vec<StoredComment>,
  votes: Vec<Value>,
}

impl Store {
  const AUTO_COLLAPSE_THRESHOLD: usize = 10;
  const EPOCH: i64 = 1_700_000_000;
  const MAX_DEPTH: usize = 5;

  fn add(
    &mut self,
    user: &str,
    content: &str,
    parent: Option<&str>,
  ) -> Result<String, Rejection> {
    let content = content.trim();

    if content.is_empty() {
      return Err((StatusCode::BAD_REQUEST, "Empty content"));
    }

    if let Some(parent) = parent {
      if self.get(parent).is_none() {
        return Err((StatusCode::BAD_REQUEST, "Parent not found"));
      }

      if self.depth(parent) + 1 > Self::MAX_DEPTH {
        return Err((StatusCode::BAD_REQUEST, "Max reply depth exceeded"));
      }
    }

    let sequence = self.comments.len() + 1;

    let id = sequence.to_string();

    let seconds = Self::EPOCH + i64::try_from(sequence).unwrap_or_default();

    let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0)
      .unwrap_or_default()
      .format("%Y-%m-%dT%H:%M:%SZ")
      .to_string();

    if let Some(parent) = parent
      && let Some(parent) = self.get_mut(parent)
    {
      parent.replies.push(id.clone());
    }

    self.comments.push(StoredComment {
      content: content.to_string(),
      id: id.clone(),
      parent_comment_id: parent.map(str::to_string),
      replies: Vec::new(),
      timestamp,
      user: user.to_string(),
      votes: 0,
    });

    Ok(id)
  }

  fn depth(&self, id: &str) -> usize {
    let mut depth = 1;

    let mut current = self.get(id);

    while let Some(parent) =
      current.and_then(|comment| comment.parent_comment_id.as_deref())
    {
      depth += 1;
      current = self.get(parent);
    }

    depth
  }

  fn flat(&self) -> Value {
    let mut comments = self.comments.iter().collect::<Vec<_>>();

    comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    json!({
      "comments": comments
        .into_iter()
        .map(|comment| {
          json!({
            "content": comment.content,
            "id": comment.id,
            "parent_comment_id": comment.parent_comment_id,
            "replies": comment.replies,
            "timestamp": comment.timestamp,
            "user": comment.user,
            "votes": comment.votes,
          })
        })
        .collect::<Vec<_>>(),
    })
  }

  fn get(&self, id: &str) -> Option<&StoredComment> {
    self.comments.iter().find(|comment| comment.id == id)
  }

  fn get_mut(&mut self, id: &str) -> Option<&mut StoredComment> {
    self.comments.iter_mut().find(|comment| comment.id == id)
  }

  fn node(&self, comment: &StoredComment) -> Value {
    json!({
      "content": comment.content,
      "id": comment.id,
      "parent_comment_id": comment.parent_comment_id,
      "replies": comment
        .replies
        .iter()
        .filter_map(|id| self.get(id))
        .map(|reply| self.node(reply))
        .collect::<Vec<_>>(),
      "timestamp": comment.timestamp,
      "user": comment.user,
      "votes": comment.votes,
    })
  }

  fn tree(&self) -> Value {
    json!({
      "auto_collapse_threshold": Self::AUTO_COLLAPSE_THRESHOLD,
      "comments": self
        .comments
        .iter()
        .filter(|comment| comment.parent_comment_id.is_none())
        .map(|comment| self.node(comment))
        .collect::<Vec<_>>(),
    })
  }
}

pub(crate) struct StubBackend {
  address: Option<SocketAddr>,
  store: Shared,
}

impl StubBackend {
  /// Adds a comment directly to the store, bypassing HTTP.
  pub(crate) fn add(&self, content: &str, parent: Option<&str>) -> String {
    self.add_as("Seed", content, parent)
  }

  fn add_as(&self, user: &str, content: &str, parent: Option<&str>) -> String {
    self
      .store
      .lock()
      .unwrap()
      .add(user, content, parent)
      .expect("seed comment is valid")
  }

  pub(crate) fn base_url(&self) -> String {
    format!("http://{}", self.address.expect("stub backend started"))
  }

  pub(crate) fn recorded_votes(&self) -> Vec<Value> {
    self.store.lock().unwrap().votes.clone()
  }

  /// Alice's root comment with Bob's reply and Carol's reply to Bob, as ids
  /// "1", "2" and "3".
  pub(crate) fn seeded() -> Self {
    let backend = Self {
      address: None,
      store: Shared::default(),
    };

    let alice = backend.add_as("Alice", "This is a great post!", None);
    let bob = backend.add_as("Bob", "I agree with Alice", Some(&alice));
    backend.add_as("Carol", "Replying to Bob", Some(&bob));

    backend
  }

  pub(crate) async fn start(mut self) -> Self {
    let router = Router::new()
      .route("/api/comments", get(list).post(create))
      .route("/api/vote", post(vote))
      .with_state(self.store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .expect("bind stub backend");

    self.address = Some(listener.local_addr().expect("stub backend address"));

    tokio::spawn(async move {
      let _ = axum::serve(listener, router).await;
    });

    self
  }
}

async fn create(
  State(store): State<Shared>,
  Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
  let user = body["user"]
    .as_str()
    .filter(|user| !user.is_empty())
    .unwrap_or("Anonymous");

  let content = body["content"].as_str().unwrap_or_default();

  let parent = body["parent_comment_id"]
    .as_str()
    .filter(|parent| !parent.is_empty());

  let mut store = store.lock().unwrap();

  match store.add(user, content, parent) {
    Ok(id) => {
      let comment = store.get(&id).map(|comment| store.node(comment));
      (StatusCode::CREATED, Json(json!({ "comment": comment })))
    }
    Err((status, message)) => (status, Json(json!({ "error": message }))),
  }
}

async fn list(
  State(store): State<Shared>,
  Query(query): Query<ListQuery>,
) -> Json<Value> {
  let store = store.lock().unwrap();

  Json(match query.view.as_deref() {
    Some("flat") => store.flat(),
    _ => store.tree(),
  })
}

async fn vote(
  State(store): State<Shared>,
  Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
  let mut store = store.lock().unwrap();

  store.votes.push(body.clone());

  let delta = body["delta"].as_i64().unwrap_or_default();

  match body["comment_id"]
    .as_str()
    .and_then(|id| store.get_mut(id))
  {
    Some(comment) => {
      comment.votes += delta;
      (StatusCode::OK, Json(json!({ "votes": comment.votes })))
    }
    None => (
      StatusCode::NOT_FOUND,
      Json(json!({ "error": "Comment not found" })),
    ),
  }
}
