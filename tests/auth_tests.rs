// tests/auth_tests.rs

use chatboard::{config::Config, db, models::role::UserRole, models::user::User, routes, state::AppState};
use sqlx::SqlitePool;

/// Helper function to spawn the app on a random port against a throwaway
/// SQLite database. Returns the base URL and a pool connected to the same
/// database for direct assertions.
async fn spawn_app() -> (String, SqlitePool) {
    let db_path = std::env::temp_dir().join(format!("chatboard-test-{}.db", uuid::Uuid::new_v4()));
    let database_url = format!("sqlite://{}", db_path.display());

    let pool = db::connect(&database_url)
        .await
        .expect("Failed to open test database");

    db::init_schema(&pool)
        .await
        .expect("Failed to apply schema");

    let config = Config {
        database_url: database_url.clone(),
        session_secret: "test_secret_for_integration_tests".to_string(),
        session_ttl: 600,
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// A browser-like client: holds cookies, never follows redirects so the
/// tests can assert on them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Expected a Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn unknown_path_is_404() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = client();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_hashes_password_and_attaches_default_role() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = client();
    let uid = uuid::Uuid::new_v4().to_string();
    let unique = &uid[..8];
    let email = format!("u_{}@example.com", unique);

    // Act
    let response = client
        .post(format!("{}/register", address))
        .form(&[
            ("username", format!("u_{}", unique).as_str()),
            ("email", email.as_str()),
            ("password", "password123"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: redirected to the login page
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");

    // Assert: the stored credential is an Argon2 hash, not the raw password
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .expect("User was not created");

    assert_ne!(user.password, "password123");
    assert!(user.password.starts_with("$argon2"));

    // Assert: the default role is attached through the join table
    let roles = sqlx::query_as::<_, UserRole>(
        "SELECT id, user_id, role_id FROM user_roles WHERE user_id = ?",
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(roles.len(), 1);
}

#[tokio::test]
async fn duplicate_registration_is_rejected_with_redirect() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = client();
    let uid = uuid::Uuid::new_v4().to_string();
    let unique = &uid[..8];
    let email = format!("dup_{}@example.com", unique);

    for attempt in 0..2 {
        // Act: same email twice, different usernames
        let response = client
            .post(format!("{}/register", address))
            .form(&[
                ("username", format!("dup_{}_{}", unique, attempt).as_str()),
                ("email", email.as_str()),
                ("password", "password123"),
            ])
            .send()
            .await
            .expect("Failed to execute request");

        // Assert: first attempt lands on login, second back on the form
        assert_eq!(response.status().as_u16(), 303);
        let expected = if attempt == 0 { "/login" } else { "/register" };
        assert_eq!(location(&response), expected);
    }

    // Assert: only one user row exists for the email
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn login_with_bad_credentials_never_establishes_a_session() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = client();
    let uid = uuid::Uuid::new_v4().to_string();
    let unique = &uid[..8];
    let email = format!("u_{}@example.com", unique);

    client
        .post(format!("{}/register", address))
        .form(&[
            ("username", format!("u_{}", unique).as_str()),
            ("email", email.as_str()),
            ("password", "password123"),
        ])
        .send()
        .await
        .expect("Register failed");

    // Act: wrong password, then unknown email
    for (email, password) in [
        (email.as_str(), "wrong_password"),
        ("nobody@example.com", "password123"),
    ] {
        let response = client
            .post(format!("{}/login", address))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("Login request failed");

        // Assert: bounced back to the login page
        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(location(&response), "/login");
    }

    // Assert: protected routes still redirect to login
    let response = client
        .get(format!("{}/messages", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login?next=/messages");

    // Assert: the danger notice is rendered on the login form
    let page = client
        .get(format!("{}/login", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Invalid email or password"));
}

#[tokio::test]
async fn login_establishes_session_until_logout() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = client();
    let uid = uuid::Uuid::new_v4().to_string();
    let unique = &uid[..8];
    let email = format!("u_{}@example.com", unique);

    client
        .post(format!("{}/register", address))
        .form(&[
            ("username", format!("u_{}", unique).as_str()),
            ("email", email.as_str()),
            ("password", "password123"),
        ])
        .send()
        .await
        .expect("Register failed");

    // Act: login
    let response = client
        .post(format!("{}/login", address))
        .form(&[("email", email.as_str()), ("password", "password123")])
        .send()
        .await
        .expect("Login failed");

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    // Assert: the session is visible to subsequent requests
    let response = client
        .get(format!("{}/messages", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Assert: the landing page shows the chat view
    let page = client
        .get(format!("{}/", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Welcome back"));

    // Act: logout
    let response = client
        .get(format!("{}/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");

    // Assert: back to anonymous, protected routes require re-authentication
    let response = client
        .get(format!("{}/messages", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login?next=/messages");
}

#[tokio::test]
async fn login_replays_the_remembered_path() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = client();
    let uid = uuid::Uuid::new_v4().to_string();
    let unique = &uid[..8];
    let email = format!("u_{}@example.com", unique);

    client
        .post(format!("{}/register", address))
        .form(&[
            ("username", format!("u_{}", unique).as_str()),
            ("email", email.as_str()),
            ("password", "password123"),
        ])
        .send()
        .await
        .expect("Register failed");

    // Act: hit a protected route anonymously, then login through the
    // remembered path
    let response = client
        .get(format!("{}/new_message", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login?next=/new_message");

    let response = client
        .post(format!("{}/login?next=/new_message", address))
        .form(&[("email", email.as_str()), ("password", "password123")])
        .send()
        .await
        .unwrap();

    // Assert: replayed to the originally requested path
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/new_message");
}

#[tokio::test]
async fn anonymous_landing_page_shows_the_post_feed() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = client();

    // Act
    let page = client
        .get(format!("{}/", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // Assert
    assert!(page.contains("Latest posts"));
}
