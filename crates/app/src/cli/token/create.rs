use std::time::Duration;

use clap::Args;
use shopfront_app::auth::{JwtAuthService, UserId};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Shared HS256 signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Identity to embed in the `userId` claim
    #[arg(long)]
    user_id: String,

    /// Optional email claim
    #[arg(long)]
    email: Option<String>,

    /// Hours until the token expires; 0 issues a token without `exp`
    #[arg(long, default_value_t = 24)]
    ttl_hours: u64,
}

pub(crate) fn run(args: CreateTokenArgs) -> Result<(), String> {
    if args.user_id.trim().is_empty() {
        return Err("user-id cannot be empty".to_string());
    }

    if args.jwt_secret.is_empty() {
        return Err("jwt-secret cannot be empty".to_string());
    }

    let ttl = (args.ttl_hours > 0).then(|| Duration::from_secs(args.ttl_hours.saturating_mul(3600)));
    let user = UserId::new(args.user_id);

    let token = JwtAuthService::new(&args.jwt_secret)
        .issue_token(&user, args.email, ttl)
        .map_err(|error| format!("failed to sign token: {error}"))?;

    #[expect(clippy::print_stdout, reason = "the token is the command's output")]
    {
        println!("user_id: {user}");
        println!("expires_in_hours: {}", args.ttl_hours);
        println!("token: {token}");
    }

    Ok(())
}
