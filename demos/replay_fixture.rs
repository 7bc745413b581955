//! Record a response into a fixture directory, then replay it through a mock client.
//!
//! Run with `cargo run --example replay_fixture`.

use tavern_http::{
    FakeResponse, Fixture, MockClient, MockConfig, MockResponse, PendingRequest, RecordedResponse,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let dir = std::env::temp_dir().join("tavern-demo-fixtures");
    let config = MockConfig {
        fixture_path: dir,
        create_missing_fixture_directory: true,
        ..Default::default()
    };

    let fixture = Fixture::with_config("weather/today", config.clone())?;
    if !fixture.exists() {
        let live = MockResponse::make(
            r#"{"city":"Helsinki","celsius":-3}"#,
            200,
            [("Content-Type", "application/json")],
        )?;
        fixture.store(&RecordedResponse::from_fake_response(&live)?)?;
        println!("Recorded {}", fixture.path().display());
    }

    let replay = fixture
        .mock_response()?
        .ok_or_else(|| anyhow::anyhow!("fixture {} vanished", fixture.name()))?;
    println!("Replaying status {} from {}", replay.status(), fixture.name());

    let mut client = MockClient::sequence([replay]).with_config(config);
    let response = client.send(&PendingRequest::get("https://weather.test/today")?)?;

    println!(
        "{} {}",
        response.status(),
        String::from_utf8_lossy(response.body())
    );
    Ok(())
}
