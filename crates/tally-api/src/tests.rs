//! Router-level tests: requests go through the full axum stack against an
//! in-memory SQLite store.

use axum::{
  body::Body,
  http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tally_core::{model::NewUser, ops::users, store::Store};
use tally_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{AppState, TokenSigner, auth::hash_password, router};

async fn make_state() -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  AppState::new(store, TokenSigner::new("test-secret").unwrap())
}

/// Insert a user straight into the store and return `(id, token)`. Skips
/// argon2 so tests stay fast; these users cannot log in with a password.
async fn seed_user(state: &AppState<SqliteStore>, email: &str) -> (i64, String) {
  let new = NewUser {
    email_address: email.to_owned(),
    first_name:    "Test".into(),
    last_name:     "User".into(),
    password_hash: "unusable".into(),
  };
  let user = state
    .store
    .write(move |repo| users::register(repo, &new))
    .await
    .unwrap();
  let token = state.signer.issue(&user).unwrap();
  (user.id, token)
}

async fn send(
  state: &AppState<SqliteStore>,
  method: Method,
  uri: &str,
  token: Option<&str>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(token) = token {
    builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
  }
  let body = match body {
    Some(json) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };

  let resp = router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

/// Create a seeded restaurant and return `(restaurant_id, seed summary)`.
async fn create_restaurant(
  state: &AppState<SqliteStore>,
  token: &str,
  name: &str,
) -> (i64, Value) {
  let (status, body) = send(
    state,
    Method::POST,
    "/restaurants",
    Some(token),
    Some(json!({ "name": name })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  (body["restaurant"]["id"].as_i64().unwrap(), body["seeded"].clone())
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn signup_then_login() {
  let state = make_state().await;

  let (status, body) = send(
    &state,
    Method::POST,
    "/users",
    None,
    Some(json!({
      "emailAddress": "chef@example.com",
      "password": "s3cret",
      "firstName": "Ada",
      "lastName": "Cook",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["user"]["emailAddress"], "chef@example.com");
  assert!(body["user"].get("passwordHash").is_none());
  let id = body["user"]["id"].as_i64().unwrap();
  assert!(state.signer.verify(body["token"].as_str().unwrap()).is_ok());

  let (status, body) = send(
    &state,
    Method::POST,
    "/auth/token",
    None,
    Some(json!({ "emailAddress": "chef@example.com", "password": "s3cret" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["id"], id);
  let claims = state.signer.verify(body["token"].as_str().unwrap()).unwrap();
  assert_eq!(claims.sub, id);

  let (status, body) = send(
    &state,
    Method::POST,
    "/auth/token",
    None,
    Some(json!({ "emailAddress": "chef@example.com", "password": "wrong" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(
    body,
    json!({ "error": { "message": "invalid email address or password", "status": 401 } })
  );
}

#[tokio::test]
async fn stored_hashes_are_argon2() {
  let state = make_state().await;
  let hash = hash_password("s3cret").unwrap();
  let new = NewUser {
    email_address: "a@example.com".into(),
    first_name:    "A".into(),
    last_name:     "B".into(),
    password_hash: hash,
  };
  state
    .store
    .write(move |repo| users::register(repo, &new))
    .await
    .unwrap();

  let (status, _) = send(
    &state,
    Method::POST,
    "/auth/token",
    None,
    Some(json!({ "emailAddress": "a@example.com", "password": "s3cret" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn users_cannot_read_each_other() {
  let state = make_state().await;
  let (_, token_a) = seed_user(&state, "a@example.com").await;
  let (b, _) = seed_user(&state, "b@example.com").await;

  let (status, _) =
    send(&state, Method::GET, &format!("/users/{b}"), Some(&token_a), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_account_tokens_stop_working() {
  let state = make_state().await;
  seed_user(&state, "a@example.com").await;
  let (gone, gone_token) = seed_user(&state, "gone@example.com").await;

  let (status, _) = send(
    &state,
    Method::DELETE,
    &format!("/users/{gone}"),
    Some(&gone_token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (fresh, _) = seed_user(&state, "new@example.com").await;
  assert_ne!(fresh, gone);

  for uri in [format!("/users/{gone}"), format!("/users/{fresh}")] {
    let (status, body) =
      send(&state, Method::GET, &uri, Some(&gone_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");
    assert_eq!(body["error"]["message"], "invalid authorization token");
  }
}

#[tokio::test]
async fn email_change_reissues_the_token() {
  let state = make_state().await;
  let (id, old_token) = seed_user(&state, "old@example.com").await;
  let uri = format!("/users/{id}");

  let (status, body) = send(
    &state,
    Method::PUT,
    &uri,
    Some(&old_token),
    Some(json!({ "emailAddress": "new@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["user"]["emailAddress"], "new@example.com");
  let new_token = body["token"].as_str().unwrap().to_owned();

  let (status, _) = send(&state, Method::GET, &uri, Some(&old_token), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  let (status, _) = send(&state, Method::GET, &uri, Some(&new_token), None).await;
  assert_eq!(status, StatusCode::OK);
}

// ─── Envelope ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_token_is_401_with_envelope() {
  let state = make_state().await;
  let (status, body) = send(&state, Method::GET, "/restaurants/1", None, None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(
    body,
    json!({ "error": { "message": "authorization token required", "status": 401 } })
  );
}

#[tokio::test]
async fn forged_token_is_rejected() {
  let state = make_state().await;
  let (id, _) = seed_user(&state, "a@example.com").await;
  let other = TokenSigner::new("another-secret").unwrap();
  let forged = other
    .issue(&tally_core::model::User {
      id,
      email_address: "a@example.com".into(),
      first_name: "Test".into(),
      last_name: "User".into(),
    })
    .unwrap();

  let (status, body) =
    send(&state, Method::GET, &format!("/users/{id}"), Some(&forged), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"]["message"], "invalid authorization token");
}

#[tokio::test]
async fn malformed_input_is_400() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "a@example.com").await;

  let (status, body) = send(
    &state,
    Method::POST,
    "/restaurants",
    Some(&token),
    Some(json!({ "address": "no name" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"]["status"], 400);

  let (status, _) =
    send(&state, Method::GET, "/categories/abc", Some(&token), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_rows_are_404() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "a@example.com").await;

  let (status, body) =
    send(&state, Method::GET, "/invoices/404", Some(&token), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"]["message"], "there is no invoice with id 404");
}

// ─── Restaurants ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn restaurant_get_shows_owner_membership() {
  let state = make_state().await;
  let (owner, token) = seed_user(&state, "owner@example.com").await;
  let (rid, seeded) = create_restaurant(&state, &token, "Rest1").await;
  assert_eq!(seeded["categories"].as_array().unwrap().len(), 6);
  assert_eq!(seeded["allocations"].as_array().unwrap().len(), 15);

  let (status, body) = send(
    &state,
    Method::GET,
    &format!("/restaurants/{rid}"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");

  let restaurant = &body["restaurant"];
  assert_eq!(restaurant["ownerId"], owner);
  assert_eq!(restaurant["isOwner"], true);
  assert_eq!(restaurant["isAdmin"], true);
  assert_eq!(
    restaurant["users"],
    json!([{ "restaurantId": rid, "userId": owner, "isAdmin": true }])
  );
  assert_eq!(restaurant["mealPeriods"].as_array().unwrap().len(), 3);
  assert_eq!(restaurant["defaultSales"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn owner_membership_cannot_be_removed() {
  let state = make_state().await;
  let (owner, token) = seed_user(&state, "owner@example.com").await;
  let (rid, _) = create_restaurant(&state, &token, "Rest1").await;

  let (status, body) = send(
    &state,
    Method::DELETE,
    &format!("/restaurants/{rid}/users/{owner}"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(
    body["error"]["message"],
    "cannot modify the owner's restaurant association"
  );
}

#[tokio::test]
async fn members_can_be_added_and_leave() {
  let state = make_state().await;
  let (_, owner_token) = seed_user(&state, "owner@example.com").await;
  let (staff, staff_token) = seed_user(&state, "staff@example.com").await;
  let (rid, _) = create_restaurant(&state, &owner_token, "Rest1").await;
  let member_uri = format!("/restaurants/{rid}/users/{staff}");

  let (status, body) = send(
    &state,
    Method::POST,
    &member_uri,
    Some(&owner_token),
    Some(json!({ "isAdmin": false })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["added"]["isAdmin"], false);

  // Non-admins cannot edit the restaurant.
  let (status, _) = send(
    &state,
    Method::PUT,
    &format!("/restaurants/{rid}"),
    Some(&staff_token),
    Some(json!({ "name": "Renamed" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let (status, body) =
    send(&state, Method::DELETE, &member_uri, Some(&staff_token), None).await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["deleted"], json!({ "restaurantId": rid, "userId": staff }));

  let (status, _) = send(
    &state,
    Method::GET,
    &format!("/restaurants/{rid}"),
    Some(&staff_token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn member_body_defaults_to_non_admin() {
  let state = make_state().await;
  let (_, owner_token) = seed_user(&state, "owner@example.com").await;
  let (staff, _) = seed_user(&state, "staff@example.com").await;
  let (rid, _) = create_restaurant(&state, &owner_token, "Rest1").await;
  let member_uri = format!("/restaurants/{rid}/users/{staff}");

  let (status, body) =
    send(&state, Method::POST, &member_uri, Some(&owner_token), None).await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  assert_eq!(body["added"]["isAdmin"], false);

  let (status, body) = send(
    &state,
    Method::PUT,
    &member_uri,
    Some(&owner_token),
    Some(json!({ "isAdmin": true })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["restUser"]["isAdmin"], true);

  let (status, body) =
    send(&state, Method::PUT, &member_uri, Some(&owner_token), None).await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["restUser"]["isAdmin"], false);
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn cross_restaurant_category_group_is_rejected() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "owner@example.com").await;
  let (rid1, _) = create_restaurant(&state, &token, "Rest1").await;
  let (_, seeded2) = create_restaurant(&state, &token, "Rest2").await;
  let foreign_group = seeded2["catGroups"][0].as_i64().unwrap();

  let (status, body) = send(
    &state,
    Method::POST,
    "/categories",
    Some(&token),
    Some(json!({
      "restaurantId": rid1,
      "name": "Desserts",
      "catGroupId": foreign_group,
      "cogsPercent": "0.3",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["error"]["message"],
    format!(
      "category group {foreign_group} and restaurant {rid1} are not associated \
       with the same restaurant"
    )
  );

  let (_, body) = send(
    &state,
    Method::GET,
    &format!("/categories/restaurants/{rid1}"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(body["categories"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn category_reads_require_membership() {
  let state = make_state().await;
  let (_, owner_token) = seed_user(&state, "owner@example.com").await;
  let (outsider, outsider_token) = seed_user(&state, "outsider@example.com").await;
  let (_, seeded) = create_restaurant(&state, &owner_token, "Rest1").await;
  let category = seeded["categories"][0].as_i64().unwrap();
  let uri = format!("/categories/{category}");

  let (status, body) = send(&state, Method::GET, &uri, Some(&outsider_token), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(
    body["error"]["message"],
    format!("user {outsider} is not authorized to view category {category}")
  );

  let (status, body) = send(&state, Method::GET, &uri, Some(&owner_token), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["category"]["name"], "Food");
  assert_eq!(body["category"]["restaurantName"], "Rest1");
}

#[tokio::test]
async fn patching_group_zero_ungroups() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "owner@example.com").await;
  let (_, seeded) = create_restaurant(&state, &token, "Rest1").await;
  let category = seeded["categories"][1].as_i64().unwrap();

  let (status, body) = send(
    &state,
    Method::PATCH,
    &format!("/categories/{category}/group/0"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["category"]["catGroupId"], Value::Null);
}

// ─── Allocations & purchasing ────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_allocation_is_400() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "owner@example.com").await;
  let (_, seeded) = create_restaurant(&state, &token, "Rest1").await;
  let period = seeded["mealPeriods"][0].as_i64().unwrap();
  let food = seeded["categories"][0].as_i64().unwrap();
  let uri = format!("/mealperiods/{period}/categories/{food}");

  let (status, body) = send(&state, Method::GET, &uri, Some(&token), None).await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["mealPeriodCat"]["salesPercentOfPeriod"], "0.5");

  let (status, body) = send(
    &state,
    Method::POST,
    &uri,
    Some(&token),
    Some(json!({ "salesPercentOfPeriod": "0.2" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["error"]["message"],
    format!("meal period {period} and category {food} association already exists")
  );
}

#[tokio::test]
async fn invoices_by_date_range() {
  let state = make_state().await;
  let (_, token) = seed_user(&state, "owner@example.com").await;
  let (rid, seeded) = create_restaurant(&state, &token, "Rest1").await;
  let wine = seeded["categories"][4].as_i64().unwrap();

  for (date, number) in [("2024-02-01", "W-1"), ("2024-02-20", "W-2")] {
    let (status, body) = send(
      &state,
      Method::POST,
      "/invoices",
      Some(&token),
      Some(json!({
        "restaurantId": rid,
        "date": date,
        "invoice": number,
        "vendor": "Wine Co",
        "total": "480.00",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let invoice = body["invoice"]["id"].as_i64().unwrap();

    let (status, body) = send(
      &state,
      Method::POST,
      "/expenses",
      Some(&token),
      Some(json!({
        "restaurantId": rid,
        "invoiceId": invoice,
        "categoryId": wine,
        "amount": "480.00",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
  }

  let (status, body) = send(
    &state,
    Method::GET,
    &format!("/invoices/restaurants/{rid}/startdate/2024-02-10/enddate/2024-02-29"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  let invoices = body["invoices"].as_array().unwrap();
  assert_eq!(invoices.len(), 1);
  assert_eq!(invoices[0]["invoice"], "W-2");

  let (status, body) = send(
    &state,
    Method::GET,
    &format!("/expenses/restaurants/{rid}/startdate/2024-01-01/enddate/2024-12-31"),
    Some(&token),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{body}");
  assert_eq!(body["expenses"].as_array().unwrap().len(), 2);
}
