//! One function per checked behavior of the user API. Each takes the request
//! specification to run against, so the same checks drive both the stub and
//! the live service.

use anyhow::{Context, Result, ensure};
use reqres_api_tests::domain::models::{CreateUserRequest, CreateUserResponse, UsersPage};
use reqres_api_tests::domain::user::{
    Registration, SuccessfulUserRegistration, UnsuccessfulUserRegistration,
};
use reqres_api_tests::{LogDetail, RequestSpec, response_specification};
use tracing::info;

pub async fn list_users_contains_eve(spec: &RequestSpec) -> Result<()> {
    let page: UsersPage = spec
        .get("/api/users")
        .await?
        .then(&response_specification(200))?
        .json()
        .context("listing body should decode into a users page")?;

    ensure!(
        page.first_names().any(|name| name == "Eve"),
        "no user named Eve in {:?}",
        page.first_names().collect::<Vec<_>>()
    );
    Ok(())
}

pub async fn first_user_email(spec: &RequestSpec) -> Result<()> {
    let expectation =
        response_specification(200).with_body_field("data[0].email", "george.bluth@reqres.in");

    spec.get("/api/users").await?.then(&expectation)?;
    Ok(())
}

pub async fn response_body_logged(spec: &RequestSpec) -> Result<()> {
    let verbose = spec.clone().with_log_detail(LogDetail::All);
    let response = verbose
        .get("/api/users")
        .await?
        .then(&response_specification(200))?;

    ensure!(!response.is_empty(), "listing body should not be empty");
    ensure!(
        !response.request_id().is_empty(),
        "every call should carry a request id"
    );
    Ok(())
}

pub async fn response_time_measured(spec: &RequestSpec) -> Result<()> {
    let response = spec.get("/api/users").await?;

    info!(
        duration_ms = response.elapsed().as_millis() as u64,
        "The time taken to the response"
    );
    ensure!(
        response.elapsed() <= std::time::Duration::from_secs(30),
        "listing took {:?}",
        response.elapsed()
    );
    Ok(())
}

pub async fn create_user(spec: &RequestSpec) -> Result<()> {
    let request = CreateUserRequest::new("morpheus", "leader");

    let created: CreateUserResponse = spec
        .post("/api/users", &request)
        .await?
        .then(&response_specification(201))?
        .json()?;

    ensure!(
        created.name == request.name,
        "created name {:?} does not match request {:?}",
        created.name,
        request.name
    );
    ensure!(created.id.is_some(), "created user should get an id");
    ensure!(created.created_at.is_some(), "createdAt should be set");
    Ok(())
}

pub async fn update_user(spec: &RequestSpec) -> Result<()> {
    let request = CreateUserRequest::new("morpheus", "zion resident");

    let updated: CreateUserResponse = spec
        .put("/api/users/2", &request)
        .await?
        .then(&response_specification(200))?
        .json()?;

    ensure!(
        updated.job.as_deref() == Some("zion resident"),
        "updated job was {:?}",
        updated.job
    );
    ensure!(updated.updated_at.is_some(), "updatedAt should be set");
    Ok(())
}

pub async fn delete_user(spec: &RequestSpec) -> Result<()> {
    let response = spec
        .delete("/api/users/2")
        .await?
        .then(&response_specification(204))?;

    ensure!(
        response.is_empty(),
        "delete should return an empty body, got {:?}",
        response.body()
    );
    Ok(())
}

pub async fn successful_registration(spec: &RequestSpec) -> Result<()> {
    let user = Registration::new("eve.holt@reqres.in", "pistol");

    let registered: SuccessfulUserRegistration = spec
        .post("/api/register", &user)
        .await?
        .then(&response_specification(200))?
        .json()?;

    ensure!(registered.id.is_some(), "registration should return an id");
    ensure!(registered.id == Some(4), "unexpected id {:?}", registered.id);
    ensure!(
        registered.token.as_deref() == Some("QpwL5tke4Pnpja7X4"),
        "unexpected token {:?}",
        registered.token
    );
    Ok(())
}

pub async fn unsuccessful_registration(spec: &RequestSpec) -> Result<()> {
    let user = Registration::new("sydney@fife", "");

    let rejected: UnsuccessfulUserRegistration = spec
        .post("/api/register", &user)
        .await?
        .then(&response_specification(400))?
        .json()?;

    ensure!(
        rejected.error.as_deref() == Some("Missing password"),
        "unexpected error {:?}",
        rejected.error
    );
    Ok(())
}

pub async fn page_two_emails_on_reqres_domain(spec: &RequestSpec) -> Result<()> {
    let page: UsersPage = spec
        .get("/api/users?page=2")
        .await?
        .then(&response_specification(200))?
        .json()?;

    ensure!(!page.data.is_empty(), "page 2 should not be empty");
    let outsiders: Vec<Option<&str>> = page
        .data
        .iter()
        .map(|user| user.email.as_deref())
        .filter(|email| !email.is_some_and(|email| email.ends_with("@reqres.in")))
        .collect();
    ensure!(outsiders.is_empty(), "emails off the reqres domain: {:?}", outsiders);
    Ok(())
}

pub async fn page_two_avatars_contain_id(spec: &RequestSpec) -> Result<()> {
    let page: UsersPage = spec
        .get("/api/users?page=2")
        .await?
        .then(&response_specification(200))?
        .json()?;

    for user in &page.data {
        let id = user.id.context("listed user has no id")?;
        let avatar = user
            .avatar
            .as_deref()
            .with_context(|| format!("user {} has no avatar", id))?;
        ensure!(
            avatar.contains(&id.to_string()),
            "avatar {} does not mention id {}",
            avatar,
            id
        );
    }
    Ok(())
}
