pub mod auth;

static USER_AGENT: &str = concat!("portal-cli/", env!("CARGO_PKG_VERSION"));

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap()
}
