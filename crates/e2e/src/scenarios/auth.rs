//! Registration, login, protected access, and rejection paths

use crate::check;
use crate::error::E2eResult;
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "auth",
        description: "register, login, reach a protected resource, reject bad credentials",
        tags: &["auth", "smoke"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let user = fixtures::register_user();

    let registered = ctx.api.register(&user).await?;
    check::created(&registered, "register")?;
    let user_id = check::require_id(&registered.body, "register")?;
    check::expect_str_eq(&registered.body, "email", &user.email, "register")?;
    check::expect_str_eq(&registered.body, "role", &user.role, "register")?;

    let login = ctx.api.login(&fixtures::credentials_of(&user)).await?;
    check::ok(&login, "login")?;
    let token = check::require_str(&login.body, "token", "login")?.to_string();
    ctx.api.set_bearer(token);
    ctx.cleanup.defer(format!("/auth/users/{user_id}"));

    let profile = ctx.api.profile().await?;
    check::ok(&profile, "profile")?;
    check::expect_str_eq(&profile.body, "email", &user.email, "profile")?;
    check::expect_str_eq(&profile.body, "role", &user.role, "profile")?;

    // Wrong password must be rejected without locking out the account.
    let mut wrong = fixtures::credentials_of(&user);
    wrong.password = "WrongPass123!".to_string();
    let rejected = ctx.api.login(&wrong).await?;
    check::expect_status_in(&rejected, check::AUTH_FAILURE_STATUSES, "login with wrong password")?;

    // Re-registering the same email is a conflict or validation error.
    let duplicate = ctx.api.register(&user).await?;
    check::expect_status_in(&duplicate, check::CONFLICT_STATUSES, "duplicate registration")?;

    let deleted = ctx.api.delete_user(&user_id).await?;
    check::expect_status_in(
        &deleted,
        &[reqwest::StatusCode::OK, reqwest::StatusCode::NO_CONTENT],
        "delete user",
    )?;

    Ok(())
}
