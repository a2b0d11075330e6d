
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn home_endpoint_reports_service_metadata() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"].is_object());
}

#[actix_rt::test]
async fn login_returns_token_and_status_reflects_it() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let token = app.login_admin().await;
    assert!(!token.is_empty());

    let response = app
        .client
        .get(format!("{}/api/auth/status", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["email"], ADMIN_EMAIL);
}

#[actix_rt::test]
async fn auth_status_without_token_is_not_authenticated() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .get(format!("{}/api/auth/status", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], false);
}

#[actix_rt::test]
async fn login_with_wrong_password_returns_401() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .post(format!("{}/api/login", app.address))
        .json(&serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": "not-the-password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid email or password");
}

#[actix_rt::test]
async fn logout_succeeds_without_server_state() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .post(format!("{}/api/logout", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[actix_rt::test]
async fn protected_routes_require_auth() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .multipart(project_form("No auth", "rust"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized. Please login first.");
}

#[actix_rt::test]
async fn garbage_token_is_rejected() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .delete(format!("{}/api/projects/{}", app.address, Uuid::new_v4()))
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn create_then_fetch_project_with_served_image() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let id = app.create_project(&token, "Image pipeline", &tech).await;
    let project = app.get_project(&id).await;

    assert_eq!(project["title"], "Image pipeline");
    assert_eq!(project["technology"], tech);
    assert_eq!(project["github_link"], "https://github.com/example/project");

    let images = project["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["is_primary"], true);

    let image_path = images[0]["image_path"].as_str().unwrap();
    assert!(image_path.starts_with("/uploads/images/"));

    // The stored file is reachable through the static mount.
    let served = app
        .client
        .get(format!("{}{}", app.address, image_path))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);
}

#[actix_rt::test]
async fn create_without_title_returns_400() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;

    let form = reqwest::multipart::Form::new()
        .text("description", "No title given")
        .text("technology", "rust");

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn create_rejects_non_image_upload() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;

    // Carries an allowed extension but is not actually an image.
    let bogus = reqwest::multipart::Part::bytes(b"plain text, not pixels".to_vec())
        .file_name("notes.png")
        .mime_str("image/png")
        .unwrap();

    let form = reqwest::multipart::Form::new()
        .text("title", "Bad upload")
        .text("description", "Should be rejected")
        .text("technology", "rust")
        .part("images", bogus);

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn list_projects_filters_by_technology() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech_a = app.unique_technology();
    let tech_b = app.unique_technology();

    let id_a = app.create_project(&token, "Filtered in", &tech_a).await;
    app.create_project(&token, "Filtered out", &tech_b).await;

    let response = app
        .client
        .get(format!(
            "{}/api/projects?technology={}",
            app.address, tech_a
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let projects: Vec<Value> = response.json().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], id_a.to_string());

    // Path-based filter returns the same rows.
    let response = app
        .client
        .get(format!(
            "{}/api/projects/technology/{}",
            app.address, tech_a
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let projects: Vec<Value> = response.json().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], id_a.to_string());
}

#[actix_rt::test]
async fn list_orders_newest_created_first() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let older = app.create_project(&token, "Older entry", &tech).await;
    // Separate the creation timestamps.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let newer = app.create_project(&token, "Newer entry", &tech).await;

    for url in [
        format!("{}/api/projects?technology={}", app.address, tech),
        format!("{}/api/projects/technology/{}", app.address, tech),
    ] {
        let response = app.client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let projects: Vec<Value> = response.json().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["id"], newer.to_string());
        assert_eq!(projects[1]["id"], older.to_string());
    }
}

#[actix_rt::test]
async fn upload_between_decimal_and_binary_cap_is_accepted() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    // Over 5 MB decimal, under the 5 MiB per-file cap.
    let form = reqwest::multipart::Form::new()
        .text("title", "Large image")
        .text("description", "Sized just under the per-file cap")
        .text("technology", tech)
        .part("images", png_part_of_size("large.png", 5_100_000));

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn get_unknown_project_returns_404() {
    let Some(app) = TestApp::try_spawn().await else { return };

    let response = app
        .client
        .get(format!("{}/api/projects/{}", app.address, Uuid::new_v4()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn update_project_replaces_fields_and_appends_images() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let id = app.create_project(&token, "Before update", &tech).await;

    let form = project_form("After update", &tech).part("images", png_part("second.png"));
    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, id))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let project = app.get_project(&id).await;
    assert_eq!(project["title"], "After update");

    let images = project["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    // The original primary image survives an update.
    assert_eq!(images[0]["is_primary"], true);
}

#[actix_rt::test]
async fn update_without_required_fields_returns_400() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let id = app.create_project(&token, "Needs fields", &tech).await;

    let form = reqwest::multipart::Form::new().text("title", "Only a title");
    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, id))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn update_unknown_project_returns_404() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;

    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, Uuid::new_v4()))
        .bearer_auth(&token)
        .multipart(project_form("Ghost", "rust"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_project_removes_rows_and_files() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let id = app.create_project(&token, "Doomed", &tech).await;
    let project = app.get_project(&id).await;
    let image_path = project["images"][0]["image_path"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .client
        .delete(format!("{}/api/projects/{}", app.address, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let response = app
        .client
        .get(format!("{}/api/projects/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Image rows go with the project row.
    let orphaned: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_images WHERE project_id = $1")
            .bind(id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(orphaned, 0);

    let served = app
        .client
        .get(format!("{}{}", app.address, image_path))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_image_detaches_it_from_the_project() {
    let Some(app) = TestApp::try_spawn().await else { return };
    let token = app.login_admin().await;
    let tech = app.unique_technology();

    let id = app.create_project(&token, "Losing a picture", &tech).await;
    let project = app.get_project(&id).await;
    let image_id = project["images"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .client
        .delete(format!("{}/api/images/{}", app.address, image_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let project = app.get_project(&id).await;
    assert_eq!(project["images"].as_array().unwrap().len(), 0);

    // A second delete of the same image is a 404, not a crash.
    let response = app
        .client
        .delete(format!("{}/api/images/{}", app.address, image_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
